//! Recursive pattern matching over remote listings.
//!
//! Patterns are slash-delimited regular-expression segments. A pattern
//! without `/` selects files in the current listing; with `/`, the first
//! segment selects subdirectories to descend into and the remainder is
//! matched against their listings. The literal pattern `**/*` matches
//! everything recursively at and below the current level.

use futures::future::BoxFuture;
use regex::Regex;

use crate::error::{Error, Result};
use crate::types::RemoteEntry;

use super::FtpDownloader;

/// The recursive wildcard pattern: match everything at and below this level
pub const RECURSIVE_WILDCARD: &str = "**/*";

impl FtpDownloader {
    /// Resolve `patterns` against one listing, descending into matching
    /// subdirectories as needed
    ///
    /// Accepted entries are stamped with the configured root, prefixed with
    /// `prefix`, and appended to the accumulated match set in traversal
    /// order; duplicates by `(root, name)` are dropped. A top-level call
    /// (`is_recursive = false`) resets the accumulator first and fails with
    /// [`Error::NoMatch`] if, after all patterns, it is still empty. Nested
    /// calls never fail on empty — a subdirectory legitimately matching zero
    /// files is not an error.
    pub async fn match_listing(
        &mut self,
        patterns: &[String],
        files: &[RemoteEntry],
        dirs: &[RemoteEntry],
        prefix: &str,
        is_recursive: bool,
    ) -> Result<()> {
        tracing::debug!(patterns = ?patterns, prefix = %prefix, "matching patterns");
        if !is_recursive {
            self.files_to_download.clear();
        }
        for pattern in patterns {
            self.apply_pattern(pattern, files, dirs, prefix, 0).await?;
        }
        if !is_recursive && self.files_to_download.is_empty() {
            return Err(Error::NoMatch {
                patterns: patterns.to_vec(),
            });
        }
        Ok(())
    }

    /// Apply one pattern to one listing, recursing into subdirectories
    ///
    /// Boxed because async recursion needs an indirected future type.
    fn apply_pattern<'a>(
        &'a mut self,
        pattern: &'a str,
        files: &'a [RemoteEntry],
        dirs: &'a [RemoteEntry],
        prefix: &'a str,
        depth: usize,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            if pattern == RECURSIVE_WILDCARD {
                return self.apply_wildcard(files, dirs, prefix, depth).await;
            }

            let mut segments: &[&str] = &pattern.split('/').collect::<Vec<_>>();

            // A leading literal `^` segment anchors the pattern at the
            // listing root without being consumed as a selector. The pattern
            // stays a directory pattern: `^/alu.*` selects directories named
            // alu* and accepts everything inside them.
            let mut caret_dropped = false;
            if segments.len() > 1 && segments[0] == "^" {
                segments = &segments[1..];
                caret_dropped = true;
            }

            if segments.len() == 1 && !caret_dropped {
                let matcher = start_anchored(segments[0])?;
                for rfile in files {
                    if matcher.is_match(&rfile.name) {
                        self.accept(rfile.clone(), prefix);
                    }
                }
                return Ok(());
            }

            // Multi-segment: first segment selects subdirectories
            let selector = start_anchored(segments[0])?;
            let remainder = segments[1..].join("/");
            for dir in dirs {
                if !selector.is_match(&dir.name) {
                    continue;
                }
                tracing::debug!(subdir = %dir.name, "descending into matching subdirectory");
                let subdir = extend_prefix(prefix, &dir.name);
                let (subfiles, subdirs) = self.list(&subdir).await?;
                self.apply_pattern(&remainder, &subfiles, &subdirs, &subdir, depth + 1)
                    .await?;
            }
            Ok(())
        })
    }

    /// `**/*`: accept every file at the current level, then descend into
    /// every subdirectory with the same pattern
    async fn apply_wildcard(
        &mut self,
        files: &[RemoteEntry],
        dirs: &[RemoteEntry],
        prefix: &str,
        depth: usize,
    ) -> Result<()> {
        for rfile in files {
            self.accept(rfile.clone(), prefix);
        }
        if depth >= self.config.max_depth {
            // Listings classify symlinks into both lists without following
            // them, so an unbounded wildcard descent could loop forever
            tracing::warn!(
                prefix = %prefix,
                depth,
                "max recursion depth reached, stopping wildcard descent"
            );
            return Ok(());
        }
        for dir in dirs {
            let subdir = extend_prefix(prefix, &dir.name);
            let (subfiles, subdirs) = self.list(&subdir).await?;
            self.apply_pattern(RECURSIVE_WILDCARD, &subfiles, &subdirs, &subdir, depth + 1)
                .await?;
        }
        Ok(())
    }

    /// Stamp, prefix, and append an entry to the match set
    ///
    /// Duplicates by `(root, name)` are dropped so overlapping patterns and
    /// wildcard descent cannot enqueue the same file twice.
    fn accept(&mut self, mut entry: RemoteEntry, prefix: &str) {
        entry.root = self.config.root_dir.clone();
        if !prefix.is_empty() {
            entry.name = format!("{prefix}/{}", entry.name);
        }
        if self
            .files_to_download
            .iter()
            .any(|e| e.root == entry.root && e.name == entry.name)
        {
            return;
        }
        tracing::debug!(name = %entry.name, "pattern matched remote file");
        self.files_to_download.push(entry);
    }
}

/// Compile a pattern segment anchored at the start of the name
///
/// Matching succeeds when the segment matches a prefix of the name, not
/// necessarily the whole name — the original matching discipline, preserved
/// deliberately. Patterns wanting whole-name matches end with `$`.
fn start_anchored(segment: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("^(?:{segment})"))?)
}

/// Extend the accumulated directory prefix with one more path segment
fn extend_prefix(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
