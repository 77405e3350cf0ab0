//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                    | Values          | Default |
//! |-----------------------------|-----------------|---------|
//! | `TIERPRICE_CURRENCY_SYMBOL` | any non-empty   | `$`     |
//! | `TIERPRICE_OUTPUT_FORMAT`   | `text`, `json`  | `text`  |
//! | `TIERPRICE_STRICT`          | `true`, `false` | `false` |

use std::env;
use std::str::FromStr;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(()),
        }
    }
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Currency symbol used in text output
    pub currency_symbol: String,

    /// Default output format (overridden by `--format`)
    pub output_format: OutputFormat,

    /// Refuse to quote products whose tiers fail validation
    pub strict: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            currency_symbol: "$".to_string(),
            output_format: OutputFormat::Text,
            strict: false,
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = CliConfig::default();

        let currency_symbol = match lookup("TIERPRICE_CURRENCY_SYMBOL") {
            Some(symbol) if symbol.trim().is_empty() => {
                return Err(ConfigError::InvalidValue(
                    "TIERPRICE_CURRENCY_SYMBOL".to_string(),
                ))
            }
            Some(symbol) => symbol.trim().to_string(),
            None => defaults.currency_symbol,
        };

        let output_format = match lookup("TIERPRICE_OUTPUT_FORMAT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TIERPRICE_OUTPUT_FORMAT".to_string()))?,
            None => defaults.output_format,
        };

        let strict = match lookup("TIERPRICE_STRICT") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("TIERPRICE_STRICT".to_string()))?,
            None => defaults.strict,
        };

        Ok(CliConfig {
            currency_symbol,
            output_format,
            strict,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = CliConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.currency_symbol, "$");
        assert!(!config.strict);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = CliConfig::from_lookup(lookup_from(&[
            ("TIERPRICE_CURRENCY_SYMBOL", "€"),
            ("TIERPRICE_OUTPUT_FORMAT", "JSON"),
            ("TIERPRICE_STRICT", "yes"),
        ]))
        .unwrap();

        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.output_format, OutputFormat::Json);
        assert!(config.strict);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = CliConfig::from_lookup(lookup_from(&[("TIERPRICE_OUTPUT_FORMAT", "xml")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for TIERPRICE_OUTPUT_FORMAT");

        assert!(CliConfig::from_lookup(lookup_from(&[("TIERPRICE_STRICT", "maybe")])).is_err());
        assert!(CliConfig::from_lookup(lookup_from(&[("TIERPRICE_CURRENCY_SYMBOL", "  ")])).is_err());
    }
}
