//! Mtime-based change detection.
//!
//! Each watched path is compared against its own last recorded mtime, not
//! against the time of the last build.

use std::path::Path;
use std::time::SystemTime;

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub async fn get_mtime(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path).await.and_then(|m| m.modified()).ok()
}

/// Whether `observed` counts as a change against the `recorded` mtime.
///
/// | recorded | observed | changed |
/// |----------|----------|---------|
/// | none     | none     | no      |
/// | none     | some     | yes     |
/// | some     | none     | no      |
/// | t₀       | t₁       | t₁ > t₀ |
pub fn has_changed(recorded: Option<SystemTime>, observed: Option<SystemTime>) -> bool {
    match (recorded, observed) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(recorded), Some(observed)) => observed > recorded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_get_mtime() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("a.js");
        assert!(get_mtime(&file).await.is_none());

        std::fs::write(&file, "x").unwrap();
        assert!(get_mtime(&file).await.is_some());
    }

    #[test]
    fn test_has_changed() {
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let t1 = t0 + Duration::from_secs(1);

        assert!(has_changed(Some(t0), Some(t1)));
        assert!(!has_changed(Some(t1), Some(t0)));
        assert!(!has_changed(Some(t0), Some(t0)));
        // a missing file that appears
        assert!(has_changed(None, Some(t0)));
        // a file that disappears
        assert!(!has_changed(Some(t0), None));
        assert!(!has_changed(None, None));
    }
}
