//! Configuration types for ftp-dl

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Remote source protocol used to build the base URL
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Plain FTP (`ftp://`)
    #[default]
    Ftp,
    /// FTP over TLS (`ftps://`)
    Ftps,
    /// Plain HTTP (`http://`)
    Http,
    /// HTTP over TLS (`https://`)
    Https,
}

impl Protocol {
    /// URL scheme for this protocol
    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Ftp => "ftp",
            Protocol::Ftps => "ftps",
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

/// Main configuration for a [`FtpDownloader`](crate::downloader::FtpDownloader)
///
/// Mirrors the bank-source properties the library was built around:
///
/// ```text
/// protocol=ftp
/// server=ftp.ncbi.nih.gov
/// remote.dir=/blast/db/FASTA/
/// remote.files=^alu.*\.gz$
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Remote source protocol (default: ftp)
    #[serde(default)]
    pub protocol: Protocol,

    /// Remote host name, without scheme (e.g. "ftp.ncbi.nih.gov")
    pub host: String,

    /// Remote root directory all patterns are resolved against
    /// (e.g. "/blast/db/FASTA/")
    #[serde(default = "default_root_dir")]
    pub root_dir: String,

    /// Optional "user:password" credentials applied to listings and fetches
    #[serde(default)]
    pub credentials: Option<String>,

    /// Maximum directory recursion depth during pattern matching (default: 64)
    ///
    /// Listings classify symlinks as both files and directories without
    /// following them, so a looping link can otherwise descend forever.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Keep going after a failed transfer (default: true)
    ///
    /// When true a failed fetch is logged and the batch continues; when false
    /// the first failure aborts the batch with [`Error::Transfer`](crate::error::Error).
    #[serde(default = "default_true")]
    pub continue_on_error: bool,
}

impl Config {
    /// Create a configuration for the given source
    pub fn new(protocol: Protocol, host: impl Into<String>, root_dir: impl Into<String>) -> Self {
        Self {
            protocol,
            host: host.into(),
            root_dir: root_dir.into(),
            credentials: None,
            max_depth: default_max_depth(),
            continue_on_error: true,
        }
    }

    /// Base URL for the configured source, scheme and host only
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.protocol.scheme(), self.host)
    }

    /// Check that the configuration can produce well-formed URLs
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(Error::Config {
                message: "remote host is required".to_string(),
                key: Some("host".to_string()),
            });
        }
        if self.host.contains("://") {
            return Err(Error::Config {
                message: "host must not include a scheme, set `protocol` instead".to_string(),
                key: Some("host".to_string()),
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            protocol: Protocol::default(),
            host: String::new(),
            root_dir: default_root_dir(),
            credentials: None,
            max_depth: default_max_depth(),
            continue_on_error: true,
        }
    }
}

fn default_root_dir() -> String {
    "/".to_string()
}

fn default_max_depth() -> usize {
    64
}

fn default_true() -> bool {
    true
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_joins_scheme_and_host() {
        let config = Config::new(Protocol::Ftp, "ftp.ncbi.nih.gov", "/blast/db/FASTA/");
        assert_eq!(config.base_url(), "ftp://ftp.ncbi.nih.gov");
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"host": "ftp.example.org"}"#).unwrap();
        assert_eq!(config.protocol, Protocol::Ftp);
        assert_eq!(config.root_dir, "/");
        assert!(config.credentials.is_none());
        assert_eq!(config.max_depth, 64);
        assert!(config.continue_on_error);
    }

    #[test]
    fn validate_rejects_empty_or_schemed_host() {
        assert!(Config::default().validate().is_err());
        let schemed = Config::new(Protocol::Ftp, "ftp://host.example.org", "/");
        assert!(matches!(
            schemed.validate(),
            Err(crate::error::Error::Config { key: Some(key), .. }) if key == "host"
        ));
        let good = Config::new(Protocol::Ftp, "host.example.org", "/");
        assert!(good.validate().is_ok());
    }

    #[test]
    fn protocol_serializes_lowercase() {
        let json = serde_json::to_string(&Protocol::Https).unwrap();
        assert_eq!(json, r#""https""#);
    }
}
