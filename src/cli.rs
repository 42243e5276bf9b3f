use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// EventSnap - turn event poster photos into structured event fields
#[derive(Debug, Parser)]
#[command(name = "eventsnap")]
#[command(about = "Turn event poster photos into structured event fields", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute (starts the API server if not specified)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),

    /// Extract event fields from OCR text (file or stdin)
    Parse {
        /// Text file to read; stdin when omitted
        file: Option<PathBuf>,
    },

    /// Run OCR on a local image and extract event fields
    Scan {
        /// Image file (PNG, JPEG, ...)
        #[arg(required = true)]
        image: PathBuf,
    },

    /// View or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },
}

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long, short)]
    pub port: Option<u16>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigActions {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print where the configuration file lives
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["eventsnap"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from(["eventsnap", "serve", "--host", "0.0.0.0", "-p", "9000"])
            .unwrap();
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.host.as_deref(), Some("0.0.0.0"));
                assert_eq!(args.port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["eventsnap", "parse", "notes.txt", "--config", "/tmp/c.toml", "-v"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(cli.command, Some(Commands::Parse { file: Some(_) })));
    }

    #[test]
    fn test_scan_requires_image() {
        assert!(Cli::try_parse_from(["eventsnap", "scan"]).is_err());
    }
}
