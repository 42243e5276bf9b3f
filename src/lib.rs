pub mod api_server;
pub mod cli;
pub mod commands;
pub mod config;
pub mod event;
pub mod ocr;
pub mod parser;

use anyhow::Result;
use env_logger::Env;
use log::*;

pub async fn run(cli: cli::Cli) -> Result<()> {
    info!("Starting EventSnap {}", env!("CARGO_PKG_VERSION"));
    commands::execute(cli).await
}

/// Initialise `env_logger`; `RUST_LOG` wins over `default_level`
pub fn init_logger(default_level: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

// Re-export commonly used types
pub use config::Config;
pub use event::EventRecord;
pub use parser::parse_event;
