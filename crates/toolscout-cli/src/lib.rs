//! Toolscout CLI.
//!
//! The `toolscout` binary serves the site and offers a few maintenance
//! commands:
//!
//! - `toolscout serve [--host H] [--port P]`: run the HTTP server
//! - `toolscout pages list|show <slug>`: inspect the page catalogue
//! - `toolscout config path|get|set|init|export`: manage `config.toml`
//!
//! Config resolution order is `--config`, then `TOOLSCOUT_CONFIG`, then the
//! platform config directory. `TOOLSCOUT_*` variables override file values.

pub mod cli;
pub mod config_handlers;
pub mod pages;
pub mod serve;

pub use cli::{Args, Command, ConfigAction, PagesAction};
