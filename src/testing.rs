//! Shared test fixtures: a temporary project root with a memory reporter.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use serde_json::Value;
use tempfile::TempDir;

use crate::config::{BunchConfig, MANIFEST_NAME};
use crate::context::BuildContext;
use crate::report::MemoryReporter;

pub struct Fixture {
    dir: TempDir,
    pub reporter: Arc<MemoryReporter>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
            reporter: Arc::new(MemoryReporter::new()),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write `contents` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel)).unwrap()
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }

    pub fn mtime(&self, rel: &str) -> SystemTime {
        std::fs::metadata(self.path(rel)).unwrap().modified().unwrap()
    }

    /// Rewrite `rel` and push its mtime `secs` into the future, so change
    /// detection does not depend on filesystem timestamp granularity.
    pub fn touch_ahead(&self, rel: &str, contents: &str, secs: u64) {
        self.write(rel, contents);
        let file = std::fs::File::options()
            .write(true)
            .open(self.path(rel))
            .unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(secs))
            .unwrap();
    }

    pub fn ctx(&self) -> BuildContext {
        BuildContext::new(self.root()).with_reporter(self.reporter.clone())
    }

    pub fn config(&self, value: Value) -> BunchConfig {
        let mut config = BunchConfig::default();
        config.load_value(value).unwrap();
        config
    }

    /// Write a Bunchfile at the root and return its path.
    pub fn manifest(&self, value: &Value) -> PathBuf {
        self.write(MANIFEST_NAME, &serde_json::to_string_pretty(value).unwrap());
        self.path(MANIFEST_NAME)
    }
}
