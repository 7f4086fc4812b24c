//! Watched paths and the bundles each one feeds.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use indexmap::IndexMap;

use crate::freshness::{get_mtime, has_changed};

/// Bundles affected by a change to one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleSet {
    /// The manifest: everything.
    All,
    Named(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct IndexEntry {
    pub bundles: BundleSet,
    /// Last recorded mtime; `None` while the file is missing.
    pub last_modified: Option<SystemTime>,
}

/// Path → entry, sources in manifest order followed by the manifest.
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    entries: IndexMap<PathBuf, IndexEntry>,
}

impl FileIndex {
    /// Index `files` (source → bundles) plus `manifest`, recording current mtimes.
    pub async fn build(files: IndexMap<PathBuf, Vec<String>>, manifest: &Path) -> Self {
        let mut entries: IndexMap<PathBuf, IndexEntry> = IndexMap::with_capacity(files.len() + 1);
        for (path, bundles) in files {
            let last_modified = get_mtime(&path).await;
            let entry = IndexEntry {
                bundles: BundleSet::Named(bundles),
                last_modified,
            };
            entries.insert(path, entry);
        }

        // a source listed under the manifest's own name still rebuilds everything
        entries.insert(
            manifest.to_path_buf(),
            IndexEntry {
                bundles: BundleSet::All,
                last_modified: get_mtime(manifest).await,
            },
        );
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }

    /// First path, in index order, whose mtime moved past its record.
    pub async fn first_changed(&self) -> Option<(PathBuf, SystemTime)> {
        for (path, entry) in &self.entries {
            let observed = get_mtime(path).await;
            if let Some(mtime) = observed.filter(|_| has_changed(entry.last_modified, observed)) {
                return Some((path.clone(), mtime));
            }
        }
        None
    }

    /// Record `mtime` as the last seen modification of `path`.
    pub fn record(&mut self, path: &Path, mtime: SystemTime) {
        if let Some(entry) = self.entries.get_mut(path) {
            entry.last_modified = Some(mtime);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    fn files(fx: &Fixture) -> IndexMap<PathBuf, Vec<String>> {
        let mut files = IndexMap::new();
        files.insert(fx.path("js/src/a.js"), vec!["one.js".to_string()]);
        files.insert(
            fx.path("js/src/b.js"),
            vec!["one.js".to_string(), "two.js".to_string()],
        );
        files
    }

    #[tokio::test]
    async fn test_manifest_maps_to_all() {
        let fx = Fixture::new();
        fx.write("js/src/a.js", "");
        fx.write("Bunchfile", "{}");
        let index = FileIndex::build(files(&fx), &fx.path("Bunchfile")).await;

        assert_eq!(index.len(), 3);
        assert_eq!(index.get(&fx.path("Bunchfile")).unwrap().bundles, BundleSet::All);
        assert_eq!(
            index.get(&fx.path("js/src/b.js")).unwrap().bundles,
            BundleSet::Named(vec!["one.js".into(), "two.js".into()])
        );
        // b.js does not exist yet
        assert!(index.get(&fx.path("js/src/b.js")).unwrap().last_modified.is_none());
        assert_eq!(index.paths().last(), Some(fx.path("Bunchfile").as_path()));
    }

    #[tokio::test]
    async fn test_first_changed_and_record() {
        let fx = Fixture::new();
        fx.write("js/src/a.js", "");
        fx.write("js/src/b.js", "");
        fx.write("Bunchfile", "{}");
        let mut index = FileIndex::build(files(&fx), &fx.path("Bunchfile")).await;
        assert!(index.first_changed().await.is_none());

        fx.touch_ahead("js/src/b.js", "b", 10);
        fx.touch_ahead("Bunchfile", "{ }", 10);
        let (path, mtime) = index.first_changed().await.unwrap();
        assert_eq!(path, fx.path("js/src/b.js"));

        index.record(&path, mtime);
        let (path, mtime) = index.first_changed().await.unwrap();
        assert_eq!(path, fx.path("Bunchfile"));

        index.record(&path, mtime);
        assert!(index.first_changed().await.is_none());
    }

    #[tokio::test]
    async fn test_appearing_file_is_a_change() {
        let fx = Fixture::new();
        fx.write("js/src/a.js", "");
        fx.write("Bunchfile", "{}");
        let index = FileIndex::build(files(&fx), &fx.path("Bunchfile")).await;

        fx.write("js/src/b.js", "new");
        let (path, _) = index.first_changed().await.unwrap();
        assert_eq!(path, fx.path("js/src/b.js"));
    }
}
