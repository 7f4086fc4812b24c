//! Command-line interface module.

mod args;
pub mod init;
pub mod monitor;
pub mod pack;

pub use args::{Cli, Commands};

use std::path::{Path, PathBuf};

/// Directory that manifest paths are relative to.
pub fn project_root(manifest: &Path) -> PathBuf {
    match manifest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_root() {
        assert_eq!(project_root(Path::new("Bunchfile")), PathBuf::from("."));
        assert_eq!(project_root(Path::new("web/Bunchfile")), PathBuf::from("web"));
    }
}
