//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Fetch a paginated category catalog and query it as a tree
#[derive(Parser, Debug)]
#[command(name = "cattree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file (default: $XDG_CONFIG_HOME/cattree/cattree.toml)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Abort the category fetch after this many seconds.
    ///
    /// Checked between pages; the per-request timeout is lowered to the same
    /// value, so the total can exceed it by at most one request.
    #[arg(long, global = true)]
    pub deadline: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the category hierarchy
    Tree,

    /// Print all categories flat, in fetch order
    List,

    /// Show the category with this id
    Get {
        /// Category id (0 is the root)
        id: u32,
    },

    /// Resolve a `/`-separated path of category names
    Find {
        /// Path such as "Shoes/Boots"
        path: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings (secrets masked)
    Show,

    /// Show config file location
    Path,
}
