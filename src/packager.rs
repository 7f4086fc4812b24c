//! Packager: dispatches bundle builds and collects their outcomes.
//!
//! ```text
//! pack(options)
//!   ├── spawn build(bundle₁) ──┐
//!   ├── spawn build(bundle₂) ──┼──► channel ──► counter == dispatched
//!   └── spawn build(bundleₙ) ──┘
//! ```
//!
//! Bundles build concurrently; members inside one bundle are read in order.
//! A failed bundle never stops its siblings.

use std::path::PathBuf;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tokio::sync::mpsc;

use crate::bundle::Assembler;
use crate::config::BunchConfig;
use crate::context::BuildContext;
use crate::core::{AssetKind, BuildMode};
use crate::debug;
use crate::error::{BuildError, PackError};
use crate::render::Renderer;

/// Options of one `pack` invocation.
#[derive(Debug, Clone, Default)]
pub struct PackOptions {
    /// Bundles to build; `None` builds every declared bundle.
    pub bundles: Option<Vec<String>>,
    pub compress: bool,
    pub mode: BuildMode,
}

impl PackOptions {
    pub fn all(compress: bool, mode: BuildMode) -> Self {
        Self {
            bundles: None,
            compress,
            mode,
        }
    }

    pub fn only(bundles: Vec<String>, compress: bool, mode: BuildMode) -> Self {
        Self {
            bundles: Some(bundles),
            compress,
            mode,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BuiltBundle {
    pub name: String,
    pub output: PathBuf,
}

#[derive(Debug)]
pub struct FailedBundle {
    pub name: String,
    pub error: BuildError,
}

/// Outcome of one invocation, in dispatch order.
#[derive(Debug, Default)]
pub struct BuildResult {
    pub built: Vec<BuiltBundle>,
    pub failed: Vec<FailedBundle>,
}

impl BuildResult {
    /// Number of bundles that reported back.
    pub fn dispatched(&self) -> usize {
        self.built.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn succeeded_names(&self) -> Vec<&str> {
        self.built.iter().map(|b| b.name.as_str()).collect()
    }

    pub fn failed_names(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Message sent by each bundle task when it finishes.
struct Finished {
    index: usize,
    name: String,
    outcome: Result<PathBuf, BuildError>,
}

pub struct Packager {
    config: Arc<BunchConfig>,
    ctx: BuildContext,
}

impl Packager {
    pub fn new(config: Arc<BunchConfig>, ctx: BuildContext) -> Self {
        Self { config, ctx }
    }

    pub fn config(&self) -> &BunchConfig {
        &self.config
    }

    pub fn context(&self) -> &BuildContext {
        &self.ctx
    }

    /// Bundle names in manifest order.
    pub fn bundle_list(&self) -> Vec<String> {
        self.config.bundle_names().map(str::to_string).collect()
    }

    /// Unique source paths of all members. Members of unknown type are
    /// reported and left out.
    pub fn file_list(&self) -> Vec<PathBuf> {
        let mut seen = IndexSet::new();
        let resolver = self.config.resolver(self.ctx.root());
        for members in self.config.bundles.values() {
            for member in members {
                match resolver.resolve_source_path(member) {
                    Ok(path) => {
                        seen.insert(path);
                    }
                    Err(err) => self.ctx.reporter().report(&[err.name(), &err.detail()]),
                }
            }
        }
        seen.into_iter().collect()
    }

    /// Source path → bundles that include it.
    pub fn files(&self) -> IndexMap<PathBuf, Vec<String>> {
        let mut files: IndexMap<PathBuf, Vec<String>> = IndexMap::new();
        let resolver = self.config.resolver(self.ctx.root());
        for (bundle, members) in &self.config.bundles {
            for member in members {
                let Ok(path) = resolver.resolve_source_path(member) else {
                    continue;
                };
                let owners = files.entry(path).or_default();
                if !owners.contains(bundle) {
                    owners.push(bundle.clone());
                }
            }
        }
        files
    }

    /// Build the requested bundles concurrently.
    ///
    /// Returns once every dispatched bundle has reported. A permission
    /// failure creating an output directory turns into [`PackError`].
    pub async fn pack(&self, options: &PackOptions) -> Result<BuildResult, PackError> {
        let targets = options
            .bundles
            .clone()
            .unwrap_or_else(|| self.bundle_list());
        let total = targets.len();
        debug!("pack"; "dispatching {} bundles", total);

        let (tx, mut rx) = mpsc::unbounded_channel::<Finished>();
        for (index, name) in targets.into_iter().enumerate() {
            let tx = tx.clone();
            let config = Arc::clone(&self.config);
            let ctx = self.ctx.clone();
            let (compress, mode) = (options.compress, options.mode);
            tokio::spawn(async move {
                let outcome = build_bundle(&config, &ctx, &name, compress, mode).await;
                let _ = tx.send(Finished {
                    index,
                    name,
                    outcome,
                });
            });
        }
        drop(tx);

        let mut finished = Vec::with_capacity(total);
        while finished.len() < total {
            match rx.recv().await {
                Some(msg) => {
                    if let Err(err) = &msg.outcome {
                        let target = self.target(&msg.name);
                        self.ctx
                            .reporter()
                            .report(&["Failed to build bundle:", &target, &err.detail()]);
                    }
                    finished.push(msg);
                }
                // a task panicked before reporting
                None => break,
            }
        }
        collect(finished)
    }

    /// Artifact path of `bundle` for reporting, or its name when unresolvable.
    fn target(&self, bundle: &str) -> String {
        self.config
            .resolver(self.ctx.root())
            .resolve_output_path(bundle)
            .map(|path| path.display().to_string())
            .unwrap_or_else(|_| bundle.to_string())
    }
}

/// Fold outcomes into dispatch order. The first fatal failure, if any, is
/// returned with everything the other bundles produced.
fn collect(mut finished: Vec<Finished>) -> Result<BuildResult, PackError> {
    finished.sort_by_key(|msg| msg.index);

    let mut result = BuildResult::default();
    for Finished { name, outcome, .. } in finished {
        match outcome {
            Ok(output) => result.built.push(BuiltBundle { name, output }),
            Err(error) => result.failed.push(FailedBundle { name, error }),
        }
    }

    if let Some(pos) = result.failed.iter().position(|f| f.error.is_fatal()) {
        let FailedBundle { name, error } = result.failed.remove(pos);
        return Err(PackError::OutputDirectory {
            bundle: name,
            source: error,
            result,
        });
    }
    Ok(result)
}

async fn build_bundle(
    config: &BunchConfig,
    ctx: &BuildContext,
    bundle: &str,
    compress: bool,
    mode: BuildMode,
) -> Result<PathBuf, BuildError> {
    let text = Assembler::new(config, ctx, mode).assemble(bundle).await?;
    let output = config.resolver(ctx.root()).resolve_output_path(bundle)?;
    Renderer::new(ctx, mode)
        .render(text, AssetKind::classify(bundle), &output, compress)
        .await?;
    Ok(output)
}
