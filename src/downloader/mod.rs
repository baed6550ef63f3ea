//! Core download engine split into focused submodules.
//!
//! The `FtpDownloader` struct and its methods are organized by domain:
//! - [`matching`] - Recursive pattern matching over remote listings
//! - [`transfer`] - Sequential transfer loop with batched progress
//!
//! One downloader instance runs its loops sequentially; parallelism is the
//! caller running several instances, which must share the mkdir lock when
//! their local trees overlap (see [`FtpDownloader::with_mkdir_lock`]).

mod matching;
mod transfer;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

#[cfg(test)]
pub(crate) use test_helpers::test_entry;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::Result;
use crate::listing::parse_listing;
use crate::permissions::{NoOpPermissionSetter, PermissionSetter};
use crate::progress::{NoOpProgressReporter, ProgressReporter};
use crate::transport::{HttpTransport, RemoteTransport};
use crate::types::RemoteEntry;
use crate::utils::join_url;

/// Pattern-driven downloader for one remote source
///
/// Resolves slash-delimited patterns against a remote directory tree and
/// transfers the matched files to local storage. The instance accumulates the
/// match set across [`match_listing`](FtpDownloader::match_listing) calls and
/// consumes it in [`download`](FtpDownloader::download).
pub struct FtpDownloader {
    /// Source configuration
    pub(crate) config: Arc<Config>,
    /// Transport used for listings and fetches
    pub(crate) transport: Arc<dyn RemoteTransport>,
    /// Sink for batched progress updates
    pub(crate) progress: Arc<dyn ProgressReporter>,
    /// Post-transfer metadata application
    pub(crate) permissions: Arc<dyn PermissionSetter>,
    /// Cooperative cancellation flag, polled once per file
    pub(crate) cancel_token: CancellationToken,
    /// Shared check-and-create lock for local directory creation
    pub(crate) mkdir_lock: Arc<tokio::sync::Mutex<()>>,
    /// Accumulated match set, reset on every top-level match call
    pub(crate) files_to_download: Vec<RemoteEntry>,
}

impl FtpDownloader {
    /// Create a downloader with the default HTTP transport and no-op
    /// progress/permission collaborators
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(HttpTransport::new()),
            progress: Arc::new(NoOpProgressReporter),
            permissions: Arc::new(NoOpPermissionSetter),
            cancel_token: CancellationToken::new(),
            mkdir_lock: Arc::new(tokio::sync::Mutex::new(())),
            files_to_download: Vec::new(),
        }
    }

    /// Replace the transport implementation
    pub fn with_transport(mut self, transport: Arc<dyn RemoteTransport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the progress reporter
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Replace the permission setter
    pub fn with_permissions(mut self, permissions: Arc<dyn PermissionSetter>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Share a directory-creation lock with other downloader instances
    ///
    /// Every concurrently active instance that might write under overlapping
    /// local trees must hold the same lock, otherwise two instances can both
    /// observe "directory absent" and race the creation.
    pub fn with_mkdir_lock(mut self, lock: Arc<tokio::sync::Mutex<()>>) -> Self {
        self.mkdir_lock = lock;
        self
    }

    /// Cancellation token polled once per file during [`download`](Self::download)
    ///
    /// Cancel it from any task to abort the remaining batch; files already
    /// written stay on disk.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    /// The directory-creation lock this instance uses
    pub fn mkdir_lock(&self) -> Arc<tokio::sync::Mutex<()>> {
        Arc::clone(&self.mkdir_lock)
    }

    /// Source configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The accumulated match set, in traversal order
    pub fn files_to_download(&self) -> &[RemoteEntry] {
        &self.files_to_download
    }

    /// List one remote directory, relative to the configured root
    ///
    /// Performs a single listing request and parses the response into
    /// `(files, dirs)` preserving line order. `directory` is empty for the
    /// root itself, or a relative path such as `"sub"` / `"sub/nested"`.
    pub async fn list(
        &self,
        directory: &str,
    ) -> Result<(Vec<RemoteEntry>, Vec<RemoteEntry>)> {
        self.config.validate()?;
        let url = self.listing_url(directory);
        tracing::debug!(url = %url, "listing remote directory");
        let raw = self
            .transport
            .fetch_listing(&url, self.config.credentials.as_deref())
            .await?;
        Ok(parse_listing(&raw, chrono::Local::now().date_naive()))
    }

    /// List the root and resolve `patterns` against it in one call
    ///
    /// Convenience wrapper: equivalent to [`list`](Self::list) on the root
    /// followed by a top-level [`match_listing`](Self::match_listing).
    pub async fn select(&mut self, patterns: &[String]) -> Result<()> {
        let (files, dirs) = self.list("").await?;
        self.match_listing(patterns, &files, &dirs, "", false).await
    }

    fn listing_url(&self, directory: &str) -> String {
        let root = join_url(&self.config.base_url(), &self.config.root_dir);
        let mut url = if directory.is_empty() {
            root
        } else {
            join_url(&root, directory)
        };
        // Directory listings are requested with a trailing slash
        if !url.ends_with('/') {
            url.push('/');
        }
        url
    }
}
