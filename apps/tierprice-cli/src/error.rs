//! Error types for the CLI.

use tierprice_core::CoreError;

use crate::config::ConfigError;

/// CLI errors.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Strict mode refused to quote a misconfigured product.
    #[error("Product has {count} tier violation(s):\n{details}")]
    InvalidTiers { count: usize, details: String },
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// `1` means "the data is bad", `2` means "the command could not run".
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidTiers { .. } => 1,
            CliError::Io { .. } | CliError::Core(_) | CliError::Config(_) | CliError::Json(_) => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let err = CliError::InvalidTiers {
            count: 1,
            details: "- Tier 1 (1+) ...".to_string(),
        };
        assert_eq!(err.exit_code(), 1);

        let err: CliError = CoreError::InvalidProduct("expected value".to_string()).into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "Invalid product record: expected value");
    }
}
