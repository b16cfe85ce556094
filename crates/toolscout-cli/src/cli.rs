//! Command-line arguments.

use clap::{Parser, Subcommand};

/// Toolscout: tool reviews, comparisons and account connect
#[derive(Parser, Debug)]
#[command(name = "toolscout", version)]
#[command(about = "Serve and inspect the Toolscout site", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true, env = "TOOLSCOUT_CONFIG")]
    pub config: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Bind host (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Inspect the page catalogue
    Pages {
        /// Pages subcommand
        #[command(subcommand)]
        action: PagesAction,
    },
    /// Manage configuration
    Config {
        /// Config subcommand
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `pages` subcommands.
#[derive(Subcommand, Debug)]
pub enum PagesAction {
    /// List every page
    List,
    /// Show one page
    Show {
        /// Page slug
        slug: String,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,
    /// Print a value by dotted key
    Get {
        /// Dotted key, e.g. `server.port`
        key: String,
    },
    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value
        value: String,
    },
    /// Write a default config file
    Init {
        /// Target file (defaults to the platform config dir)
        #[arg(long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for docker
        #[arg(long)]
        docker_env: bool,
    },
}
