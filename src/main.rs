use clap::Parser;
use eventsnap::cli::Cli;
use log::{debug, error};

#[tokio::main]
async fn main() {
    // Load .env before anything reads EVENTSNAP_* or RUST_LOG
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    eventsnap::init_logger(if cli.verbose { "debug" } else { "info" });

    match dotenv {
        Ok(path) => debug!("Loaded environment from {:?}", path),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    if let Err(e) = eventsnap::run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
