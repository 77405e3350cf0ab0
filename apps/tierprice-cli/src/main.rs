//! # tierprice
//!
//! Command-line entry point. All logic lives in the library half of this
//! crate and in `tierprice-core`.

use std::process::ExitCode;

use clap::Parser;
use tierprice_cli::{init_tracing, run, Cli, CliConfig, CliError};

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let outcome = CliConfig::load()
        .map_err(CliError::from)
        .and_then(|config| run(&cli, &config));

    match outcome {
        Ok(output) => {
            println!("{}", output.text);
            if output.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
