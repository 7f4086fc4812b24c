//! Bunchfile configuration management.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error      # ConfigError
//! ├── path       # PathResolver
//! └── mod.rs     # BunchConfig (this file)
//! ```
//!
//! # Keys
//!
//! | Key         | Purpose                                          |
//! |-------------|--------------------------------------------------|
//! | `variables` | Values injected into every bundle's preamble     |
//! | `jsDir`     | Base directory of scripts (`js`)                 |
//! | `cssDir`    | Base directory of stylesheets (`css`)            |
//! | `buildDir`  | Output subdirectory (`bin`)                      |
//! | `sourceDir` | Source subdirectory (`src`)                      |
//! | `js`, `css` | Per-type `buildDir` / `sourceDir` overrides      |
//! | `bundles`   | Bundle name → ordered member list                |
//!
//! Unknown keys are ignored so older binaries accept newer manifests.

mod error;
mod path;

pub use error::ConfigError;
pub use path::{DirUse, PathResolver};

use crate::core::AssetKind;
use crate::debug;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Default manifest file name.
pub const MANIFEST_NAME: &str = "Bunchfile";

// ============================================================================
// root configuration
// ============================================================================

/// In-memory representation of a Bunchfile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BunchConfig {
    /// Variables shared by script and stylesheet preambles.
    pub variables: IndexMap<String, Value>,
    pub js_dir: PathBuf,
    pub css_dir: PathBuf,
    /// Default output subdirectory within `jsDir` / `cssDir`.
    pub build_dir: PathBuf,
    /// Default source subdirectory within `jsDir` / `cssDir`.
    pub source_dir: PathBuf,
    pub js: TypeDirs,
    pub css: TypeDirs,
    /// Bundle name → members, both in declaration order.
    pub bundles: IndexMap<String, Vec<String>>,
}

/// Per-type directory overrides (`"js": { "buildDir": "public" }`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDirs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<PathBuf>,
}

impl Default for BunchConfig {
    fn default() -> Self {
        Self {
            variables: IndexMap::new(),
            js_dir: PathBuf::from("js"),
            css_dir: PathBuf::from("css"),
            build_dir: PathBuf::from("bin"),
            source_dir: PathBuf::from("src"),
            js: TypeDirs::default(),
            css: TypeDirs::default(),
            bundles: IndexMap::new(),
        }
    }
}

/// Recognized top-level keys of a manifest. Absent keys keep their value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManifestPatch {
    variables: Option<IndexMap<String, Value>>,
    js_dir: Option<PathBuf>,
    css_dir: Option<PathBuf>,
    build_dir: Option<PathBuf>,
    source_dir: Option<PathBuf>,
    js: Option<TypeDirs>,
    css: Option<TypeDirs>,
    bundles: Option<IndexMap<String, Vec<String>>>,
}

impl BunchConfig {
    /// Load a manifest file on top of the defaults.
    pub async fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.load_path(path).await?;
        Ok(config)
    }

    /// Merge structured data into this configuration.
    ///
    /// Each recognized key replaces the current value wholesale.
    pub fn load_value(&mut self, value: Value) -> Result<(), ConfigError> {
        let mut ignored = Vec::new();
        let patch: ManifestPatch = serde_ignored::deserialize(value, |path| {
            ignored.push(path.to_string());
        })?;
        self.apply(patch, &ignored);
        Ok(())
    }

    /// Read, parse and merge a manifest file.
    pub async fn load_path(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        self.load_str(&content)
    }

    /// Parse manifest text (JSON5: comments and trailing commas allowed)
    /// and merge it.
    pub fn load_str(&mut self, content: &str) -> Result<(), ConfigError> {
        let value: Value = serde_json5::from_str(content)?;
        self.load_value(value)
    }

    fn apply(&mut self, patch: ManifestPatch, ignored: &[String]) {
        for key in ignored {
            debug!("config"; "ignoring unknown key `{}`", key);
        }

        let ManifestPatch {
            variables,
            js_dir,
            css_dir,
            build_dir,
            source_dir,
            js,
            css,
            bundles,
        } = patch;

        if let Some(v) = variables {
            self.variables = v;
        }
        if let Some(v) = js_dir {
            self.js_dir = v;
        }
        if let Some(v) = css_dir {
            self.css_dir = v;
        }
        if let Some(v) = build_dir {
            self.build_dir = v;
        }
        if let Some(v) = source_dir {
            self.source_dir = v;
        }
        if let Some(v) = js {
            self.js = v;
        }
        if let Some(v) = css {
            self.css = v;
        }
        if let Some(v) = bundles {
            self.bundles = v;
        }
    }

    /// Current configuration in manifest form.
    pub fn to_structured(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Bundle names in declaration order.
    pub fn bundle_names(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    pub fn members(&self, bundle: &str) -> Option<&[String]> {
        self.bundles.get(bundle).map(Vec::as_slice)
    }

    /// Base directory (`jsDir` / `cssDir`) of an asset kind.
    pub fn base_dir(&self, kind: AssetKind) -> Option<&Path> {
        match kind {
            AssetKind::Script => Some(&self.js_dir),
            AssetKind::Stylesheet => Some(&self.css_dir),
            AssetKind::Unknown => None,
        }
    }

    pub fn type_dirs(&self, kind: AssetKind) -> Option<&TypeDirs> {
        match kind {
            AssetKind::Script => Some(&self.js),
            AssetKind::Stylesheet => Some(&self.css),
            AssetKind::Unknown => None,
        }
    }

    /// Path resolver rooted at `root`.
    pub fn resolver<'a>(&'a self, root: &'a Path) -> PathResolver<'a> {
        PathResolver::new(self, root)
    }
}

// ============================================================================
// tests
// ============================================================================
