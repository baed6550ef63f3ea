//! Unix long-format directory listing parser
//!
//! Turns one raw listing response into structured [`RemoteEntry`] values,
//! split into files and directories. Parsing is per-line recoverable: a
//! malformed line is dropped with a debug log and never fails the call.

use chrono::{Datelike, NaiveDate};

use crate::types::{EntryDate, RemoteEntry, month_to_num};

/// Parse a raw listing response into `(files, dirs)`, preserving line order
///
/// Lines are separated by any run of `\n`/`\r`. Each line follows the Unix
/// long-listing column convention:
///
/// ```text
/// -rw-r--r--   1 ftp      anonymous  151k Mar 12 2023  alu1.gz
/// drwxr-xr-x   2 ftp      anonymous  4096 Dec  4 14:02 sub
/// lrwxrwxrwx   1 ftp      anonymous    12 Jan  9 2024  latest -> 2024-01-09
/// ```
///
/// Column 7 is either a four-digit year or a time-of-day token; in the latter
/// case the year is inferred from `today` (see [`infer_year`]). Symlink lines
/// (a `->` in column 9) land in both output lists because the link target's
/// type is unknown without following it.
pub fn parse_listing(raw: &str, today: NaiveDate) -> (Vec<RemoteEntry>, Vec<RemoteEntry>) {
    let mut files = Vec::new();
    let mut dirs = Vec::new();

    for line in raw.split(['\n', '\r']) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        match parse_line(&parts, today) {
            Some(entry) => {
                if entry.is_symlink {
                    // Ambiguous type: candidate for both lists
                    files.push(entry.clone());
                    dirs.push(entry);
                } else if entry.is_directory {
                    dirs.push(entry);
                } else {
                    files.push(entry);
                }
            }
            None => {
                tracing::debug!(line = %line, "skipping malformed listing line");
            }
        }
    }

    (files, dirs)
}

/// Infer the year for a listing entry whose year column was a time-of-day
///
/// Default is the current year. A month later than the current month, or the
/// current month with a later day, can only come from the previous year — the
/// server omits the year precisely because the entry is recent.
pub fn infer_year(month: u32, day: u32, today: NaiveDate) -> i32 {
    let mut year = today.year();
    if month > today.month() || (month == today.month() && day > today.day()) {
        year -= 1;
    }
    year
}

fn parse_line(parts: &[&str], today: NaiveDate) -> Option<RemoteEntry> {
    if parts.len() < 9 {
        return None;
    }

    let permissions = parts[0].to_string();
    let size: u64 = parts[4].parse().ok()?;
    let month = month_to_num(parts[5])?;
    let day: u32 = parts[6].parse().ok()?;
    let year: i32 = match parts[7].parse() {
        Ok(year) => year,
        // Time-of-day token instead of a year: the entry is recent
        Err(_) => infer_year(month, day, today),
    };

    Some(RemoteEntry {
        name: parts[8].to_string(),
        is_directory: permissions.starts_with('d'),
        is_symlink: parts.len() >= 10 && parts[9] == "->",
        permissions,
        group: parts[2].to_string(),
        owner: parts[3].to_string(),
        size,
        modified: EntryDate { month, day, year },
        root: String::new(),
        save_as: None,
        url_override: None,
    })
}
