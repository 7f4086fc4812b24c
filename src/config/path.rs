//! Source and output path resolution.
//!
//! ```text
//! root / <jsDir|cssDir> / <type override or global sourceDir> / member
//! root / <jsDir|cssDir> / <type override or global buildDir>  / bundle
//! ```

use std::path::{Path, PathBuf};

use super::BunchConfig;
use crate::core::AssetKind;
use crate::error::BuildError;

/// Which directory of an asset type to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirUse {
    Source,
    Build,
}

/// Maps bundle members and bundle names to absolute paths.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    config: &'a BunchConfig,
    root: &'a Path,
}

impl<'a> PathResolver<'a> {
    pub fn new(config: &'a BunchConfig, root: &'a Path) -> Self {
        Self { config, root }
    }

    /// Directory for `kind` and `usage`, or `None` for unknown kinds.
    pub fn dir(&self, kind: AssetKind, usage: DirUse) -> Option<PathBuf> {
        let base = self.config.base_dir(kind)?;
        let overrides = self.config.type_dirs(kind)?;
        let sub = match usage {
            DirUse::Source => overrides
                .source_dir
                .as_deref()
                .unwrap_or(&self.config.source_dir),
            DirUse::Build => overrides
                .build_dir
                .as_deref()
                .unwrap_or(&self.config.build_dir),
        };
        Some(self.root.join(base).join(sub))
    }

    /// Absolute source path of a bundle member.
    pub fn resolve_source_path(&self, member: &str) -> Result<PathBuf, BuildError> {
        self.resolve(member, DirUse::Source)
    }

    /// Absolute artifact path of a bundle.
    pub fn resolve_output_path(&self, bundle: &str) -> Result<PathBuf, BuildError> {
        self.resolve(bundle, DirUse::Build)
    }

    fn resolve(&self, name: &str, usage: DirUse) -> Result<PathBuf, BuildError> {
        self.dir(AssetKind::classify(name), usage)
            .map(|dir| dir.join(name))
            .ok_or_else(|| BuildError::UnknownFileType(name.to_string()))
    }
}
