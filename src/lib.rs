//! # ftp-dl
//!
//! Pattern-driven mirroring library for remote file catalogs.
//!
//! ## Design Philosophy
//!
//! ftp-dl is designed to be:
//! - **Pattern-driven** - Files are selected by slash-delimited regular
//!   expressions resolved against live remote listings
//! - **Transport-agnostic** - Listings and fetches go through the
//!   [`RemoteTransport`] trait; an HTTP implementation ships by default
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Cooperative** - Cancellation, progress, and permission handling are
//!   pluggable collaborators with no-op defaults
//!
//! ## Quick Start
//!
//! ```no_run
//! use ftp_dl::{Config, FtpDownloader, Protocol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new(Protocol::Https, "mirror.example.org", "/pub/db");
//!     let mut downloader = FtpDownloader::new(config);
//!
//!     // Resolve patterns against the remote tree, then transfer the matches
//!     let patterns = vec![r"^alu.*\.gz$".to_string(), r"sub/.*\.fa$".to_string()];
//!     downloader.select(&patterns).await?;
//!     let done = downloader.download(std::path::Path::new("/tmp/mirror"), true).await?;
//!
//!     println!("downloaded {} files", done.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Source configuration types
pub mod config;
/// Core download engine (decomposed into focused submodules)
pub mod downloader;
/// Error types
pub mod error;
/// Unix long-format listing parser
pub mod listing;
/// Local permission application
pub mod permissions;
/// Batched progress reporting
pub mod progress;
/// Remote transport abstraction and HTTP implementation
pub mod transport;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::{Config, Protocol};
pub use downloader::FtpDownloader;
pub use error::{Error, Result};
pub use listing::parse_listing;
pub use permissions::{NoOpPermissionSetter, PermissionSetter};
pub use progress::{ChannelProgressReporter, NoOpProgressReporter, ProgressReporter, progress_batch};
pub use transport::{HttpTransport, RemoteTransport};
pub use types::{EntryDate, RemoteEntry};

#[cfg(unix)]
pub use permissions::UnixPermissionSetter;
