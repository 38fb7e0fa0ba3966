//! # Checkout CLI
//!
//! Thin host around `checkout-core`: reads one JSON request, prints one
//! JSON result or error.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. CliConfig::load() + flags ─► input path, pretty, log level          │
//! │  2. init_tracing()            ─► stderr, RUST_LOG or configured level   │
//! │  3. read request              ─► file or stdin                          │
//! │  4. process_checkout_json     ─► CheckoutResult | CheckoutError         │
//! │  5. write JSON to stdout      ─► exit 0 (priced) / 2 (rejected)         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;

use std::fs;
use std::io::{Read, Write};

use anyhow::Context;
use checkout_core::{process_checkout_json, CheckoutResult};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::error::{ApiError, ErrorCode};

/// Installs the global tracing subscriber.
///
/// Logs go to stderr so stdout carries only the JSON answer. `RUST_LOG`
/// wins over the configured level.
pub fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},checkout_core={level},checkout_cli={level}",
            level = config.log_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Prices one raw request.
pub fn execute(raw: &Value) -> Result<CheckoutResult, ApiError> {
    process_checkout_json(raw).map_err(ApiError::from)
}

/// Reads the request named by `config` (or `stdin`), prices it and writes
/// the answer to `out`. Returns the process exit status.
pub fn run<R, W>(config: &CliConfig, stdin: R, mut out: W) -> anyhow::Result<i32>
where
    R: Read,
    W: Write,
{
    let text = read_input(config, stdin)?;
    let raw: Value = match serde_json::from_str(&text) {
        Ok(raw) => raw,
        Err(e) => {
            let err = ApiError::new(
                ErrorCode::InvalidRequest,
                format!("request is not valid JSON: {}", e),
            );
            write_json(&mut out, &err, config.pretty)?;
            return Ok(ApiError::EXIT_CODE);
        }
    };

    match execute(&raw) {
        Ok(result) => {
            info!(order_id = %result.order_id, total = result.total, "Checkout complete");
            write_json(&mut out, &result, config.pretty)?;
            Ok(0)
        }
        Err(err) => {
            info!(code = ?err.code, message = %err.message, "Checkout rejected");
            write_json(&mut out, &err, config.pretty)?;
            Ok(ApiError::EXIT_CODE)
        }
    }
}

fn read_input<R: Read>(config: &CliConfig, mut stdin: R) -> anyhow::Result<String> {
    match &config.input {
        Some(path) => {
            debug!(?path, "Reading request file");
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            debug!("Reading request from stdin");
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .context("failed to read request from stdin")?;
            Ok(text)
        }
    }
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
