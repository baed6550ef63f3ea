//! Shared test helpers: an in-memory transport and entry/downloader factories.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::config::{Config, Protocol};
use crate::error::{Error, Result};
use crate::transport::RemoteTransport;
use crate::types::{EntryDate, RemoteEntry};

use super::FtpDownloader;

/// In-memory transport keyed by full URL.
///
/// Listings and file bodies are registered up front; every request is
/// recorded so tests can assert on the URLs the engine builds. Unknown URLs
/// and URLs registered as failing return an error.
#[derive(Default)]
pub(crate) struct MockTransport {
    listings: Mutex<HashMap<String, String>>,
    files: Mutex<HashMap<String, Vec<u8>>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_listing(&self, url: &str, body: &str) {
        self.listings.lock().unwrap().insert(url.into(), body.into());
    }

    pub(crate) fn add_file(&self, url: &str, body: &[u8]) {
        self.files.lock().unwrap().insert(url.into(), body.to_vec());
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteTransport for MockTransport {
    async fn fetch_listing(&self, url: &str, _credentials: Option<&str>) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.listings
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Other(format!("no listing registered for {url}")))
    }

    async fn fetch_file(
        &self,
        url: &str,
        _credentials: Option<&str>,
        dest: &Path,
    ) -> Result<u64> {
        self.requests.lock().unwrap().push(url.to_string());
        let body = self
            .files
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Other(format!("no file registered for {url}")))?;
        tokio::fs::write(dest, &body).await?;
        Ok(body.len() as u64)
    }
}

/// Minimal file entry for matcher and permission tests.
pub(crate) fn test_entry(name: &str, permissions: &str) -> RemoteEntry {
    RemoteEntry {
        name: name.to_string(),
        is_directory: permissions.starts_with('d'),
        is_symlink: false,
        permissions: permissions.to_string(),
        owner: "ftp".to_string(),
        group: "anonymous".to_string(),
        size: 1024,
        modified: EntryDate {
            month: 3,
            day: 12,
            year: 2023,
        },
        root: String::new(),
        save_as: None,
        url_override: None,
    }
}

pub(crate) fn file_entry(name: &str) -> RemoteEntry {
    test_entry(name, "-rw-r--r--")
}

pub(crate) fn dir_entry(name: &str) -> RemoteEntry {
    test_entry(name, "drwxr-xr-x")
}

/// Downloader over a mock transport, rooted at `ftp://mock.example.org/db`.
pub(crate) fn mock_downloader(transport: Arc<MockTransport>) -> FtpDownloader {
    let config = Config::new(Protocol::Ftp, "mock.example.org", "/db");
    FtpDownloader::new(config).with_transport(transport)
}
