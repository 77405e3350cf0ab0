//! # Tierprice CLI Library
//!
//! Argument parsing, logging setup and command dispatch for the `tierprice`
//! binary.
//!
//! ## Module Organization
//! ```text
//! tierprice_cli/
//! ├── lib.rs        ◄─── You are here (args, tracing, dispatch)
//! ├── commands.rs   ◄─── quote / ladder / validate handlers
//! ├── config.rs     ◄─── TIERPRICE_* environment configuration
//! └── error.rs      ◄─── CLI error type and exit codes
//! ```
//!
//! ## Usage
//! ```text
//! tierprice quote product.json --quantity 25
//! tierprice ladder product.json --format json
//! curl -s $API/products/42 | tierprice validate -
//! ```

pub mod commands;
pub mod config;
pub mod error;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub use commands::CommandOutput;
pub use config::{CliConfig, ConfigError, OutputFormat};
pub use error::CliError;

/// Quantity-tier pricing for storefront products.
#[derive(Debug, Parser)]
#[command(name = "tierprice", version, about)]
pub struct Cli {
    /// Output format (defaults to TIERPRICE_OUTPUT_FORMAT, then text)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a quantity of a product
    Quote {
        /// Product JSON file, or `-` for stdin
        product: String,

        /// Number of units
        #[arg(short, long)]
        quantity: i64,
    },

    /// Show the product's quantity pricing tiers
    Ladder {
        /// Product JSON file, or `-` for stdin
        product: String,
    },

    /// Check the product's tier configuration (exit status 1 on violations)
    Validate {
        /// Product JSON file, or `-` for stdin
        product: String,
    },
}

/// Runs one command.
pub fn run(cli: &Cli, config: &CliConfig) -> Result<CommandOutput, CliError> {
    let format = cli.format.unwrap_or(config.output_format);
    debug!(?format, command = ?cli.command, "Running command");

    match &cli.command {
        Command::Quote { product, quantity } => {
            let document = commands::read_document(product)?;
            commands::quote(&document, *quantity, format, config)
        }
        Command::Ladder { product } => {
            let document = commands::read_document(product)?;
            commands::ladder(&document, format, config)
        }
        Command::Validate { product } => {
            let document = commands::read_document(product)?;
            commands::validate(&document, format)
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays clean for piping JSON.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tierprice=trace` - Show trace for tierprice crates only
/// - Default: warnings, plus INFO for tierprice crates
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,tierprice=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote() {
        let cli = Cli::try_parse_from(["tierprice", "quote", "mug.json", "--quantity", "25"]).unwrap();
        assert!(cli.format.is_none());
        match cli.command {
            Command::Quote { product, quantity } => {
                assert_eq!(product, "mug.json");
                assert_eq!(quantity, 25);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_format() {
        let cli = Cli::try_parse_from(["tierprice", "validate", "-", "--format", "json"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Command::Validate { ref product } if product == "-"));
    }

    #[test]
    fn test_parse_requires_quantity() {
        assert!(Cli::try_parse_from(["tierprice", "quote", "mug.json"]).is_err());
        assert!(Cli::try_parse_from(["tierprice", "quote", "mug.json", "-q", "ten"]).is_err());
    }

    #[test]
    fn test_run_missing_file() {
        let cli = Cli::try_parse_from(["tierprice", "ladder", "/no/such/product.json"]).unwrap();
        let err = run(&cli, &CliConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
