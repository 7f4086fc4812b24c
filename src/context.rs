//! Explicit build context passed into every pipeline operation.
//!
//! Carries the working root and the injected capabilities; there is no
//! process-wide configuration, reporter or working directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::render::{AssetMinifier, LessPreprocessor, Minifier, Preprocessor};
use crate::report::{LogReporter, Reporter};

#[derive(Clone)]
pub struct BuildContext {
    root: PathBuf,
    reporter: Arc<dyn Reporter>,
    preprocessor: Arc<dyn Preprocessor>,
    minifier: Arc<dyn Minifier>,
}

impl BuildContext {
    /// Context with the default capabilities (log reporter, LESS, oxc/lightningcss).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            reporter: Arc::new(LogReporter::default()),
            preprocessor: Arc::new(LessPreprocessor),
            minifier: Arc::new(AssetMinifier),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_preprocessor(mut self, preprocessor: Arc<dyn Preprocessor>) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    pub fn with_minifier(mut self, minifier: Arc<dyn Minifier>) -> Self {
        self.minifier = minifier;
        self
    }

    /// Directory that manifest paths are relative to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn reporter(&self) -> &dyn Reporter {
        self.reporter.as_ref()
    }

    pub fn preprocessor(&self) -> &dyn Preprocessor {
        self.preprocessor.as_ref()
    }

    pub fn minifier(&self) -> &dyn Minifier {
        self.minifier.as_ref()
    }
}

impl std::fmt::Debug for BuildContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildContext")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}
