//! Artifact output: the only place bundles reach the filesystem.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::BuildError;

/// Write `contents` to `path`, creating its directory (one level) if absent.
pub async fn write_out(path: &Path, contents: &str) -> Result<(), BuildError> {
    ensure_output_dir(path).await?;
    fs::write(path, contents)
        .await
        .map_err(|err| BuildError::Write(path.to_path_buf(), err))
}

/// Append `banner` to the existing artifact at `path` without rewriting it.
pub async fn append_banner(path: &Path, banner: &str) -> Result<(), BuildError> {
    ensure_output_dir(path).await?;
    let write_err = |err| BuildError::Write(path.to_path_buf(), err);
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(write_err)?;
    file.write_all(banner.as_bytes()).await.map_err(write_err)?;
    file.flush().await.map_err(write_err)
}

/// Create the artifact's parent directory. Not recursive: the directory
/// above it must already exist.
async fn ensure_output_dir(path: &Path) -> Result<(), BuildError> {
    let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) else {
        return Ok(());
    };
    if fs::try_exists(dir).await.unwrap_or(false) {
        return Ok(());
    }
    match fs::create_dir(dir).await {
        Ok(()) => Ok(()),
        // a sibling bundle created it first
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(BuildError::OutputDir(dir.to_path_buf(), err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[tokio::test]
    async fn test_write_out_creates_output_dir() {
        let fx = Fixture::new();
        fx.write("js/src/app.js", "");

        write_out(&fx.path("js/bin/app.js"), "var a;").await.unwrap();
        assert_eq!(fx.read("js/bin/app.js"), "var a;");

        // overwritten in place
        write_out(&fx.path("js/bin/app.js"), "var b;").await.unwrap();
        assert_eq!(fx.read("js/bin/app.js"), "var b;");
    }

    #[tokio::test]
    async fn test_write_out_is_not_recursive() {
        let fx = Fixture::new();
        let err = write_out(&fx.path("missing/bin/app.js"), "x")
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::OutputDir(..)));
        assert!(!err.is_fatal());
    }

    #[tokio::test]
    async fn test_append_banner_keeps_existing_content() {
        let fx = Fixture::new();
        fx.write("css/bin/site.css", ".a{}");

        append_banner(&fx.path("css/bin/site.css"), "\n/* banner */\n")
            .await
            .unwrap();
        assert_eq!(fx.read("css/bin/site.css"), ".a{}\n/* banner */\n");
    }
}
