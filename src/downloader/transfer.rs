//! Sequential transfer loop — local path resolution, locked directory
//! creation, streamed fetches, and batched progress reporting.

use std::path::Path;

use crate::error::{Error, Result};
use crate::progress::progress_batch;
use crate::types::RemoteEntry;
use crate::utils::join_url;

use super::FtpDownloader;

impl FtpDownloader {
    /// Transfer the accumulated match set into `local_dir`, in order
    ///
    /// With `keep_dirs` the entry's directory structure (derived from
    /// `save_as`) is recreated under `local_dir`; without it every file lands
    /// flat under `local_dir` using only the base filename. Returns the
    /// selection with `save_as` resolved on every entry.
    ///
    /// Cancellation is cooperative: the token is polled once per file, and a
    /// cancelled batch leaves already-written files on disk. A failed fetch
    /// is logged and skipped when `continue_on_error` is set (the default),
    /// otherwise it aborts the batch with [`Error::Transfer`]. There is no
    /// internal retry and no cleanup of partially-written batches.
    pub async fn download(
        &mut self,
        local_dir: &Path,
        keep_dirs: bool,
    ) -> Result<Vec<RemoteEntry>> {
        let mut selection = std::mem::take(&mut self.files_to_download);
        let outcome = self.transfer_all(&mut selection, local_dir, keep_dirs).await;
        self.files_to_download = selection;
        outcome?;
        Ok(self.files_to_download.clone())
    }

    async fn transfer_all(
        &self,
        selection: &mut [RemoteEntry],
        local_dir: &Path,
        keep_dirs: bool,
    ) -> Result<()> {
        let total = selection.len();
        for (i, rfile) in selection.iter_mut().enumerate() {
            let index = i + 1;

            if self.cancel_token.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let save_as = rfile
                .save_as
                .get_or_insert_with(|| rfile.name.clone())
                .clone();
            let save_path = Path::new(&save_as);
            let file_dir = if keep_dirs {
                match save_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    Some(parent) => local_dir.join(parent),
                    None => local_dir.to_path_buf(),
                }
            } else {
                local_dir.to_path_buf()
            };

            match save_path.file_name() {
                None => {
                    tracing::warn!(save_as = %save_as, "entry has no usable file name, skipping");
                }
                Some(file_name) => {
                    self.create_dir_locked(&file_dir).await;

                    let file_path = file_dir.join(file_name);
                    tracing::debug!(
                        progress = %format!("{index}/{total}"),
                        name = %rfile.name,
                        save_as = %save_as,
                        "downloading file"
                    );

                    let base = rfile
                        .url_override
                        .clone()
                        .unwrap_or_else(|| self.config.base_url());
                    let url = join_url(&join_url(&base, &rfile.root), &rfile.name);

                    match self
                        .transport
                        .fetch_file(&url, self.config.credentials.as_deref(), &file_path)
                        .await
                    {
                        Ok(bytes) => {
                            tracing::debug!(url = %url, bytes, "transfer complete");
                            self.permissions.set_permissions(&file_path, rfile);
                        }
                        Err(e) if self.config.continue_on_error => {
                            tracing::warn!(url = %url, error = %e, "transfer failed, continuing batch");
                        }
                        Err(e) => {
                            return Err(Error::Transfer {
                                name: rfile.name.clone(),
                                reason: e.to_string(),
                            });
                        }
                    }
                }
            }

            if let Some(batch) = progress_batch(index, total) {
                self.progress.set_progress(batch, total);
            }
        }
        Ok(())
    }

    /// Check-and-create a local directory under the shared mkdir lock
    ///
    /// The lock must be shared by every executor writing under overlapping
    /// trees; creation failure is logged and non-fatal — if the directory
    /// truly cannot be created the subsequent write surfaces the error as a
    /// transfer failure instead.
    async fn create_dir_locked(&self, dir: &Path) {
        let _guard = self.mkdir_lock.lock().await;
        if !dir.exists()
            && let Err(e) = tokio::fs::create_dir_all(dir).await
        {
            tracing::error!(dir = %dir.display(), error = %e, "failed to create local directory");
        }
    }
}
