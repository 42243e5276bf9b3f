//! Handlers behind the `eventsnap` subcommands
pub mod config;
pub mod parse;
pub mod scan;

use crate::api_server;
use crate::cli::{Cli, Commands, ServeArgs};
use crate::config::Config;
use anyhow::Result;
use log::debug;

/// Load configuration and dispatch the parsed command line
pub async fn execute(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    let config = Config::load(config_path)?;
    debug!("Effective config: {:?}", config);

    match cli.command {
        None => serve(config, ServeArgs::default()).await,
        Some(Commands::Serve(args)) => serve(config, args).await,
        Some(Commands::Parse { file }) => parse::handle_parse(file.as_deref()),
        Some(Commands::Scan { image }) => scan::handle_scan(&image, &config).await,
        Some(Commands::Config { action }) => config::handle_config_action(action, config_path, &config),
    }
}

async fn serve(mut config: Config, args: ServeArgs) -> Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    api_server::start_api_server(config).await
}
