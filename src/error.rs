//! Error types for ftp-dl
//!
//! Only a handful of conditions abort an operation and reach the caller: a
//! top-level pattern match with zero results, a cancellation request observed
//! during the transfer loop, an invalid pattern, and (when `continue_on_error`
//! is off) a failed transfer. Everything else — malformed listing lines,
//! directory creation failures — is contained locally and logged.

use thiserror::Error;

/// Result type alias for ftp-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for ftp-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "root_dir")
        key: Option<String>,
    },

    /// Top-level pattern match produced zero files
    #[error("no file found matching expressions: {patterns:?}")]
    NoMatch {
        /// The patterns that matched nothing
        patterns: Vec<String>,
    },

    /// Cancellation flag observed during download; remaining batch aborted
    #[error("kill request received, exiting")]
    Cancelled,

    /// A path pattern failed to compile as a regular expression
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Network error from the default HTTP transport
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A fetch that did not complete successfully
    #[error("transfer failed for {name}: {reason}")]
    Transfer {
        /// Remote name of the entry whose transfer failed
        name: String,
        /// Why the transfer failed
        reason: String,
    },

    /// Other error
    #[error("{0}")]
    Other(String),
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_display_includes_patterns() {
        let err = Error::NoMatch {
            patterns: vec!["^alu.*".to_string()],
        };
        assert!(err.to_string().contains("^alu.*"));
    }

    #[test]
    fn transfer_display_includes_name_and_reason() {
        let err = Error::Transfer {
            name: "db/alu1.gz".into(),
            reason: "status 550".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("db/alu1.gz"));
        assert!(msg.contains("status 550"));
    }

    #[test]
    fn invalid_pattern_converts_from_regex_error() {
        let regex_err = regex::Regex::new("(unclosed").unwrap_err();
        let err: Error = regex_err.into();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
