//! Basic mirroring example
//!
//! This example demonstrates the core functionality of ftp-dl:
//! - Configuring a remote source
//! - Resolving file patterns against the remote tree
//! - Watching batched progress from another task
//! - Downloading the matched files while keeping the remote layout

use std::path::Path;
use std::sync::Arc;

use ftp_dl::{ChannelProgressReporter, Config, FtpDownloader, Protocol};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Configure the remote source
    let config = Config::new(Protocol::Https, "ftp.ncbi.nih.gov", "/blast/db/FASTA/");

    // Watch progress from another task
    let (reporter, mut progress) = ChannelProgressReporter::new();
    tokio::spawn(async move {
        let mut done = 0;
        while let Some((batch, total)) = progress.recv().await {
            done += batch;
            println!("⬇ {done}/{total} files transferred");
        }
    });

    let mut downloader = FtpDownloader::new(config).with_progress(Arc::new(reporter));

    // Resolve patterns against the live remote listing. A pattern without a
    // slash selects files at the root; slash-delimited patterns descend into
    // matching subdirectories first.
    let patterns = vec![r"^alu.*\.gz$".to_string()];
    downloader.select(&patterns).await?;

    for entry in downloader.files_to_download() {
        println!("✓ Matched: {} ({} bytes)", entry.name, entry.size);
    }

    // Transfer the matches, recreating the remote directory layout locally
    let done = downloader.download(Path::new("mirror"), true).await?;
    println!("✓ Downloaded {} files", done.len());

    Ok(())
}
