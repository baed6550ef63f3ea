//! Utility functions for URL and path manipulation

/// Join two URL pieces with exactly one `/` at the boundary
///
/// Remote roots are configured both with and without trailing slashes and
/// entry names never carry a leading one; collapsing the boundary keeps
/// `{base}{root}/{name}` well-formed either way.
///
/// # Examples
///
/// ```
/// use ftp_dl::utils::join_url;
///
/// assert_eq!(join_url("ftp://host", "/db/"), "ftp://host/db/");
/// assert_eq!(join_url("ftp://host/db/", "sub/x.fa"), "ftp://host/db/sub/x.fa");
/// ```
pub fn join_url(base: &str, segment: &str) -> String {
    let base = base.trim_end_matches('/');
    let segment = segment.trim_start_matches('/');
    if segment.is_empty() {
        format!("{base}/")
    } else {
        format!("{base}/{segment}")
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_duplicate_slashes_at_the_boundary() {
        assert_eq!(join_url("ftp://host/", "/db"), "ftp://host/db");
        assert_eq!(join_url("ftp://host", "db"), "ftp://host/db");
    }

    #[test]
    fn empty_segment_yields_trailing_slash() {
        assert_eq!(join_url("ftp://host/db", ""), "ftp://host/db/");
    }

    #[test]
    fn preserves_inner_slashes() {
        assert_eq!(
            join_url("ftp://host/db", "sub/nested/x.fa"),
            "ftp://host/db/sub/nested/x.fa"
        );
    }
}
