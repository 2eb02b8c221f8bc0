//! CLI parse: clap types for fstree. No behavior; definitions only.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fstree - Inspect and mirror directory subtrees
#[derive(Parser)]
#[command(name = "fstree")]
#[command(about = "Model a directory subtree in memory and mirror it elsewhere")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a directory and print its tree
    Show {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: RenderFormat,
    },
    /// List the direct children of a directory
    List {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Which children to show
        #[arg(long, value_enum, default_value = "all")]
        kind: ListKind,
        /// Only children whose path contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// List every node under a directory
    Map {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Copy children to a destination, keeping existing files
    Copy(MirrorArgs),
    /// Copy children to a destination, overwriting existing files
    Replicate(MirrorArgs),
    /// Delete the destination, then copy children into it
    Replace(MirrorArgs),
}

#[derive(Args, Clone)]
pub struct MirrorArgs {
    /// Source directory
    pub source: PathBuf,
    /// Destination directory
    pub destination: PathBuf,
    /// Mirror every directory below the source, not just direct children
    #[arg(long)]
    pub recursive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    Json,
    Yaml,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    All,
    Files,
    Directories,
}
