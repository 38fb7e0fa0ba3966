//! # checkout-cli
//!
//! Prices one checkout request.
//!
//! ## Usage
//! ```bash
//! # Request from stdin
//! echo '{"user_id": 7, "items": [{"price": 100, "qty": 2}], "coupon": "SAVE20"}' | checkout-cli
//!
//! # Request from a file, pretty output
//! checkout-cli --input request.json --pretty
//! ```
//!
//! ## Environment
//! - `CHECKOUT_LOG_LEVEL` - default log level (`info`)
//! - `CHECKOUT_PRETTY` - pretty-print output (`false`)
//! - `CHECKOUT_INPUT` - request file (stdin when unset)
//! - `RUST_LOG` - full tracing filter, overrides `CHECKOUT_LOG_LEVEL`

use std::io;
use std::process::ExitCode;

use checkout_cli::config::{CliConfig, Command};
use checkout_cli::{init_tracing, run};
use tracing::info;

fn main() -> anyhow::Result<ExitCode> {
    let config = match CliConfig::load()?.apply_args(std::env::args().skip(1))? {
        Command::Run(config) => config,
        Command::Help => {
            print_help();
            return Ok(ExitCode::SUCCESS);
        }
    };

    init_tracing(&config);
    info!(input = ?config.input, pretty = config.pretty, "Configuration loaded");

    let status = run(&config, io::stdin().lock(), io::stdout().lock())?;
    Ok(ExitCode::from(status as u8))
}

fn print_help() {
    println!("Price a checkout request");
    println!();
    println!("Usage: checkout-cli [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -i, --input <PATH>  Request JSON file (default: stdin)");
    println!("  -p, --pretty        Pretty-print the JSON output");
    println!("  -h, --help          Show this help message");
}
