//! `bunch pack`: build bundles once.

use anyhow::{Result, bail};
use std::path::Path;
use std::sync::Arc;

use super::project_root;
use crate::config::BunchConfig;
use crate::context::BuildContext;
use crate::core::BuildMode;
use crate::log;
use crate::packager::{PackOptions, Packager};

pub async fn pack(manifest: &Path, bundles: &[String], compress: bool) -> Result<()> {
    let config = BunchConfig::from_path(manifest).await?;
    let ctx = BuildContext::new(project_root(manifest));
    let packager = Packager::new(Arc::new(config), ctx);

    let options = PackOptions {
        bundles: (!bundles.is_empty()).then(|| bundles.to_vec()),
        compress,
        mode: BuildMode::PACK,
    };
    let result = packager.pack(&options).await?;

    for built in &result.built {
        log!("pack"; "Wrote file {}", built.output.display());
    }
    if !result.is_success() {
        bail!(
            "{} of {} bundles failed: {}",
            result.failed.len(),
            result.dispatched(),
            result.failed_names().join(", ")
        );
    }
    Ok(())
}
