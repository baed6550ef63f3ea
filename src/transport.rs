//! Transport seam for listings and fetches
//!
//! The engine never talks to the network directly; it goes through
//! [`RemoteTransport`], which covers exactly the two primitives the core
//! needs — fetch a listing as text, and stream one file to disk. The crate
//! ships [`HttpTransport`] as the default implementation; FTP-capable
//! collaborators plug in the same way.

use std::path::Path;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::error::Result;

/// Blocking-style remote primitives consumed by the download engine
///
/// Both operations run to completion before returning; the engine awaits them
/// sequentially and never fans out. `credentials` is an opaque
/// `"user:password"` string applied uniformly to listings and fetches.
#[async_trait]
pub trait RemoteTransport: Send + Sync {
    /// Fetch a directory listing response as raw text
    async fn fetch_listing(&self, url: &str, credentials: Option<&str>) -> Result<String>;

    /// Stream one remote file into `dest`, returning the bytes written
    async fn fetch_file(&self, url: &str, credentials: Option<&str>, dest: &Path) -> Result<u64>;
}

/// Default transport backed by a shared [`reqwest::Client`]
///
/// Listing requests expect the server to answer a GET on a directory URL with
/// long-format listing text. File fetches are streamed to disk chunk by
/// chunk, never buffered whole in memory.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a fresh client
    pub fn new() -> Self {
        Self::default()
    }

    fn request(&self, url: &str, credentials: Option<&str>) -> reqwest::RequestBuilder {
        let mut builder = self.client.get(url);
        if let Some(creds) = credentials {
            let (user, password) = match creds.split_once(':') {
                Some((user, password)) => (user, Some(password)),
                None => (creds, None),
            };
            builder = builder.basic_auth(user, password);
        }
        builder
    }
}

#[async_trait]
impl RemoteTransport for HttpTransport {
    async fn fetch_listing(&self, url: &str, credentials: Option<&str>) -> Result<String> {
        tracing::debug!(url = %url, "fetching listing");
        let response = self
            .request(url, credentials)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }

    async fn fetch_file(&self, url: &str, credentials: Option<&str>, dest: &Path) -> Result<u64> {
        tracing::debug!(url = %url, dest = %dest.display(), "fetching file");
        let response = self
            .request(url, credentials)
            .send()
            .await?
            .error_for_status()?;

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;
        Ok(written)
    }
}
