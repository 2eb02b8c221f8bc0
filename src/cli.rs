//! CLI domain: parse, route, output, and presentation only.
//! No tree logic here; the route table dispatches to the tree and mirror services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands, ListKind, MirrorArgs, RenderFormat};
pub use presentation::{format_mirror_report, format_node_table, format_snapshot};
pub use route::{CommandOutput, RunContext};
