use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "steering")]
#[command(author, version, about = "Resolve which steering documents apply to the files you edit", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Project root (default: current directory)
    #[arg(long, global = true, env = "STEERING_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Path to steering.toml (default: <root>/.kiro/steering.toml)
    #[arg(long, global = true, env = "STEERING_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Output format for CLI results.
/// - Text: Human-readable text output (default)
/// - Json: Single JSON object
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve applicable steering documents and assemble their context
    Resolve {
        /// Files being edited
        files: Vec<PathBuf>,

        /// Read additional newline-separated paths from stdin
        #[arg(long)]
        stdin: bool,

        /// Include a manual steering document by identity (repeatable)
        #[arg(short, long = "manual", value_name = "ID")]
        manual: Vec<String>,

        /// Byte budget for the assembled context (overrides config)
        #[arg(long)]
        max_bytes: Option<usize>,

        /// Only list the resolved documents, without assembling context
        #[arg(long)]
        list_only: bool,
    },

    /// List all steering documents
    List,

    /// Validate the steering directory
    Check,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show effective configuration
    Show,
    /// Write a default configuration file if none exists
    Init,
}
