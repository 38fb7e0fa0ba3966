//! Checkout CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Command-line flags are applied on top by [`CliConfig::apply_args`].

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::Level;

/// Checkout CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default tracing level when `RUST_LOG` is unset
    pub log_level: String,

    /// Pretty-print the JSON written to stdout
    pub pretty: bool,

    /// Request file; `None` reads stdin
    pub input: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            log_level: "info".to_string(),
            pretty: false,
            input: None,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(CliConfig),
    Help,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from any key → value lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CliConfig::default();

        let log_level = lookup("CHECKOUT_LOG_LEVEL").unwrap_or(defaults.log_level);
        log_level
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidValue("CHECKOUT_LOG_LEVEL".to_string()))?;

        let pretty = match lookup("CHECKOUT_PRETTY") {
            None => defaults.pretty,
            Some(v) => parse_bool(&v)
                .ok_or_else(|| ConfigError::InvalidValue("CHECKOUT_PRETTY".to_string()))?,
        };

        let input = lookup("CHECKOUT_INPUT")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(CliConfig {
            log_level,
            pretty,
            input,
        })
    }

    /// Applies command-line flags (program name already stripped).
    pub fn apply_args<I>(mut self, args: I) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--input" | "-i" => {
                    let path = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingRequired("--input <PATH>".to_string()))?;
                    self.input = Some(PathBuf::from(path));
                }
                "--pretty" | "-p" => self.pretty = true,
                "--help" | "-h" => return Ok(Command::Help),
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }
        Ok(Command::Run(self))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}
