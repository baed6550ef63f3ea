//! Core types for ftp-dl

use serde::{Deserialize, Serialize};

/// Modification date of a remote entry as reported by the listing
///
/// Servers omit the year for recent files; it is inferred once at parse time
/// (see [`crate::listing`]) and never recomputed afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDate {
    /// Month, 1-12
    pub month: u32,
    /// Day of month
    pub day: u32,
    /// Four-digit year, parsed or inferred
    pub year: i32,
}

/// Structured representation of one remote directory-listing line
///
/// At parse time `name` is a single path segment relative to its own listing.
/// Once the entry is accepted into a match set, `name` carries the directory
/// prefix accumulated during recursive descent and `root` is stamped with the
/// configured remote root; the entry is not mutated again except for
/// `save_as` defaulting at download time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Path segment at parse time; prefixed relative path once matched
    pub name: String,

    /// Raw permission column; a leading `d` denotes a directory
    pub permissions: String,

    /// Owning user
    pub owner: String,

    /// Owning group
    pub group: String,

    /// Size in bytes
    pub size: u64,

    /// Modification date, year inferred when the server omits it
    pub modified: EntryDate,

    /// Derived from `permissions`
    pub is_directory: bool,

    /// Listing line carries a `->` link target; the entry is classified as
    /// both a file candidate and a directory candidate since the target type
    /// is unknown without following it
    pub is_symlink: bool,

    /// Base remote path, copied from the downloader's configured root at
    /// match time
    #[serde(default)]
    pub root: String,

    /// Local relative path override; defaults to `name` at download time
    #[serde(default)]
    pub save_as: Option<String>,

    /// Per-entry full base URL overriding the downloader's configured one
    #[serde(default)]
    pub url_override: Option<String>,
}

/// Map an English month name from a listing to 1-12
///
/// Only the first three letters are significant, case-insensitive. Returns
/// `None` for anything that is not a month name.
pub fn month_to_num(month: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let prefix = month.get(..3)?.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|idx| idx as u32 + 1)
}
