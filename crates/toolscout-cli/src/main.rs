//! `toolscout` binary entry point.

use anyhow::Result;
use clap::Parser;
use toolscout_cli::config_handlers::handle_config_command;
use toolscout_cli::pages::handle_pages_command;
use toolscout_cli::serve::{apply_bind_overrides, run_server};
use toolscout_cli::{Args, Command};
use toolscout_content::Catalogue;
use toolscout_core::{ConfigManager, SiteConfig};

fn load_config(config_path: Option<&str>) -> Result<SiteConfig> {
    let config = SiteConfig::load(config_path)?;
    toolscout_core::logging::init(&config.logging.level);
    tracing::debug!(project = %config.project_name, "Configuration loaded");
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.as_deref();

    match args.command {
        // Config commands must work before a valid config file exists.
        Command::Config { action } => {
            toolscout_core::logging::init("warn");
            handle_config_command(config_path, action)?;
        }
        Command::Serve { host, port } => {
            let mut config = load_config(config_path)?;
            apply_bind_overrides(&mut config, host, port);
            run_server(config).await?;
        }
        Command::Pages { action } => {
            let config = load_config(config_path)?;
            let catalogue = Catalogue::from_config(&config.content)?;
            handle_pages_command(&catalogue, action)?;
        }
    }
    Ok(())
}
