//! Post-transfer permission application
//!
//! Applying ownership and mode bits after a file lands on disk is a
//! collaborator concern. The trait-based architecture supports a real
//! implementation ([`UnixPermissionSetter`] on Unix) and a stub
//! ([`NoOpPermissionSetter`]) for graceful degradation everywhere else.

use std::path::Path;

use crate::types::RemoteEntry;

/// Applies filesystem metadata to a file after transfer
pub trait PermissionSetter: Send + Sync {
    /// Apply permissions/ownership derived from `entry` to `path`
    ///
    /// Failures are the implementation's to log; the download loop never
    /// aborts on metadata application.
    fn set_permissions(&self, path: &Path, entry: &RemoteEntry);
}

/// Stub implementation that leaves files exactly as written
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpPermissionSetter;

impl PermissionSetter for NoOpPermissionSetter {
    fn set_permissions(&self, _path: &Path, _entry: &RemoteEntry) {}
}

/// Applies the listing's mode bits to the local file (Unix only)
#[cfg(unix)]
#[derive(Clone, Copy, Debug, Default)]
pub struct UnixPermissionSetter;

#[cfg(unix)]
impl PermissionSetter for UnixPermissionSetter {
    fn set_permissions(&self, path: &Path, entry: &RemoteEntry) {
        use std::os::unix::fs::PermissionsExt;

        let Some(mode) = mode_from_permissions(&entry.permissions) else {
            tracing::debug!(
                permissions = %entry.permissions,
                name = %entry.name,
                "unparseable permission column, leaving file mode untouched"
            );
            return;
        };
        if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)) {
            tracing::warn!(path = %path.display(), error = %e, "failed to apply file mode");
        }
    }
}

/// Parse a `rwxr-xr--` style permission column into mode bits
///
/// The leading type character (`-`, `d`, `l`) is ignored; returns `None` when
/// the column is too short or contains unexpected characters.
pub fn mode_from_permissions(permissions: &str) -> Option<u32> {
    let bits: Vec<char> = permissions.chars().skip(1).take(9).collect();
    if bits.len() != 9 {
        return None;
    }
    let mut mode: u32 = 0;
    for (i, ch) in bits.iter().enumerate() {
        let expected = match i % 3 {
            0 => 'r',
            1 => 'w',
            _ => 'x',
        };
        mode <<= 1;
        match ch {
            c if *c == expected => mode |= 1,
            '-' => {}
            // setuid/setgid/sticky render as s/S/t/T in the x slot
            's' | 'S' | 't' | 'T' if expected == 'x' => {
                if matches!(ch, 's' | 't') {
                    mode |= 1;
                }
            }
            _ => return None,
        }
    }
    Some(mode)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_modes() {
        assert_eq!(mode_from_permissions("-rw-r--r--"), Some(0o644));
        assert_eq!(mode_from_permissions("drwxr-xr-x"), Some(0o755));
        assert_eq!(mode_from_permissions("-rwxrwxrwx"), Some(0o777));
        assert_eq!(mode_from_permissions("----------"), Some(0o000));
    }

    #[test]
    fn rejects_short_or_garbled_columns() {
        assert_eq!(mode_from_permissions("-rw-r"), None);
        assert_eq!(mode_from_permissions("-rq-r--r--"), None);
        assert_eq!(mode_from_permissions(""), None);
    }

    #[test]
    fn setuid_style_bits_map_to_execute() {
        // 's' means setuid + execute; 'S' means setuid without execute
        assert_eq!(mode_from_permissions("-rwsr-xr-x"), Some(0o755));
        assert_eq!(mode_from_permissions("-rwSr-xr-x"), Some(0o655));
    }

    #[cfg(unix)]
    #[test]
    fn unix_setter_applies_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.txt");
        std::fs::write(&path, "x").unwrap();

        let entry = crate::downloader::test_entry("f.txt", "-r--r--r--");
        UnixPermissionSetter.set_permissions(&path, &entry);

        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o444);
    }
}
