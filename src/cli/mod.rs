//! CLI argument parsing for notecluster
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json

pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub use output::OutputFormat;

/// Notecluster - group a note vault into topical clusters
#[derive(Parser, Debug)]
#[command(name = "notecluster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (overrides --verbose)
    #[arg(long, global = true, env = "NOTECLUSTER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cluster the notes of a vault snapshot
    Cluster(ClusterArgs),

    /// List the snapshot's folders, deepest first
    Folders {
        /// Snapshot JSON file (files, metadata, resolvedLinks)
        #[arg(long, short)]
        snapshot: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ClusterArgs {
    /// Snapshot JSON file (files, metadata, resolvedLinks)
    #[arg(long, short)]
    pub snapshot: PathBuf,

    /// Clustering config TOML file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Override the minimum cluster size
    #[arg(long)]
    pub min_size: Option<usize>,

    /// Override the maximum cluster size
    #[arg(long)]
    pub max_size: Option<usize>,

    /// Treat undersized clusters in nested folders as merge partners
    #[arg(long)]
    pub merge_nested: bool,
}
