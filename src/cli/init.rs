//! `bunch init`: write the starter manifest.

use anyhow::{Context, Result};
use std::path::Path;

use crate::embed::starter_manifest;
use crate::log;

/// Outcome of [`write_manifest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Written,
    AlreadyExists,
}

/// Write the starter manifest to `path` unless a file is already there.
///
/// If `dry_run` is true, only prints the template to stdout.
pub fn new_manifest(path: &Path, dry_run: bool) -> Result<()> {
    if dry_run {
        print!("{}", starter_manifest());
        return Ok(());
    }

    match write_manifest(path)? {
        InitOutcome::AlreadyExists => {
            log!("init"; "looks like you already have a {}", path.display());
        }
        InitOutcome::Written => log!("init"; "wrote {}", path.display()),
    }
    Ok(())
}

pub fn write_manifest(path: &Path) -> Result<InitOutcome> {
    if path.exists() {
        return Ok(InitOutcome::AlreadyExists);
    }
    std::fs::write(path, starter_manifest())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(InitOutcome::Written)
}
