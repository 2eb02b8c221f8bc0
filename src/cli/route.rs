//! CLI route: single route table and run context. Dispatches to the tree and
//! mirror services and hands results to presentation.

use crate::cli::parse::{Commands, ListKind, MirrorArgs};
use crate::cli::presentation::{
    format_mirror_report, format_node_table, format_snapshot, format_warnings,
};
use crate::config::{ConfigLoader, FstreeConfig};
use crate::error::AppError;
use crate::mirror::{self, MirrorMode, MirrorScope};
use crate::tree::{Tree, TreeBuilder};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Printable result of a command: `text` goes to stdout, `warnings` (when
/// the scan abandoned any directory) to stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub warnings: Option<String>,
}

impl CommandOutput {
    fn new(tree: &Tree, text: String) -> Self {
        let warnings = (!tree.warnings().is_empty()).then(|| format_warnings(tree.warnings()));
        Self { text, warnings }
    }
}

/// Runtime context for CLI execution: the merged configuration.
pub struct RunContext {
    config: FstreeConfig,
}

impl RunContext {
    /// Create run context from an optional config path. Uses ConfigLoader only.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, AppError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(Path::new("."))?,
        };
        config.ensure_valid()?;
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: FstreeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FstreeConfig {
        &self.config
    }

    /// Execute a command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, AppError> {
        match command {
            Commands::Show { path, format } => {
                let tree = self.scan(path)?;
                let text = format_snapshot(&tree.snapshot(), *format)?;
                Ok(CommandOutput::new(&tree, text))
            }
            Commands::List { path, kind, search } => {
                let tree = self.scan(path)?;
                let root = tree.root();
                let mut nodes = match kind {
                    ListKind::All => root.children_where(|_| true),
                    ListKind::Files => root.files(),
                    ListKind::Directories => root.directories(),
                };
                if let Some(needle) = search {
                    let hits = root.search(needle);
                    nodes.retain(|n| hits.contains(n));
                }
                Ok(CommandOutput::new(&tree, format_node_table(&nodes)))
            }
            Commands::Map { path } => {
                let tree = self.scan(path)?;
                let nodes: Vec<_> = tree
                    .map()
                    .iter()
                    .filter_map(|(_, id)| tree.node(id))
                    .collect();
                Ok(CommandOutput::new(&tree, format_node_table(&nodes)))
            }
            Commands::Copy(args) => self.mirror(args, MirrorMode::Copy),
            Commands::Replicate(args) => self.mirror(args, MirrorMode::Replicate),
            Commands::Replace(args) => self.mirror(args, MirrorMode::Replace),
        }
    }

    fn scan(&self, path: &Path) -> Result<Tree, AppError> {
        let tree = TreeBuilder::new(path.to_path_buf())
            .with_config(self.config.scan.clone())
            .build()?;
        Ok(tree)
    }

    fn mirror(&self, args: &MirrorArgs, mode: MirrorMode) -> Result<CommandOutput, AppError> {
        let tree = self.scan(&args.source)?;
        let scope = if args.recursive {
            MirrorScope::Subtree
        } else {
            self.config.mirror.scope
        };
        if !tree.warnings().is_empty() {
            warn!(
                warning_count = tree.warnings().len(),
                "Mirroring a partially scanned tree"
            );
        }

        let report = mirror::mirror(tree.root(), &args.destination, mode, scope)?;
        info!(?mode, ?scope, "Mirror command finished");
        Ok(CommandOutput::new(
            &tree,
            format_mirror_report(mode, &args.source, &args.destination, &report),
        ))
    }
}
