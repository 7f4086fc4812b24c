//! Watch engine: poll sources and the manifest, rebuild what changed.
//!
//! # Lifecycle
//!
//! ```text
//! Idle ──start()──► Building ──► Watching ◄──► Rebuilding
//!                                    │
//!                          check_files() every interval
//! ```
//!
//! # Change handling
//!
//! | Changed path | Action                                             |
//! |--------------|----------------------------------------------------|
//! | manifest     | reload config, re-index, rebuild every bundle      |
//! | source       | rebuild the bundles that include it                |
//!
//! Only the first changed path of a sweep starts a cycle; later changes are
//! picked up by the following sweeps.

mod events;
mod index;

pub use events::{EventHub, EventKind, MonitorEvent, RegenerateState};
pub use index::{BundleSet, FileIndex};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use crate::config::BunchConfig;
use crate::context::BuildContext;
use crate::core::BuildMode;
use crate::debug;
use crate::error::PackError;
use crate::logger::{status_error, status_success};
use crate::packager::{PackOptions, Packager};

/// Default poll interval.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Building,
    Watching,
    Rebuilding,
}

#[derive(Debug, Clone, Copy)]
pub struct MonitorOptions {
    pub interval: Duration,
    pub compress: bool,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            compress: false,
        }
    }
}

pub struct Monitor {
    manifest: PathBuf,
    ctx: BuildContext,
    options: MonitorOptions,
    config: Arc<BunchConfig>,
    index: FileIndex,
    /// Completion time of the last cycle; never moves backwards.
    watermark: Option<SystemTime>,
    state: MonitorState,
    events: EventHub,
}

impl Monitor {
    pub fn new(manifest: impl Into<PathBuf>, ctx: BuildContext, options: MonitorOptions) -> Self {
        Self {
            manifest: manifest.into(),
            ctx,
            options,
            config: Arc::new(BunchConfig::default()),
            index: FileIndex::default(),
            watermark: None,
            state: MonitorState::Idle,
            events: EventHub::new(),
        }
    }

    pub fn on(&self, kind: EventKind, listener: impl FnMut(&MonitorEvent) + Send + 'static) {
        self.events.on(kind, listener);
    }

    pub fn once(&self, kind: EventKind, listener: impl FnMut(&MonitorEvent) + Send + 'static) {
        self.events.once(kind, listener);
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn watermark(&self) -> Option<SystemTime> {
        self.watermark
    }

    pub fn config(&self) -> &BunchConfig {
        &self.config
    }

    pub fn index(&self) -> &FileIndex {
        &self.index
    }

    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    /// Load the manifest, index every watched path and build all bundles.
    pub async fn start(&mut self) -> Result<Arc<RegenerateState>, PackError> {
        let reporter = self.ctx.reporter();
        reporter.report(&["== Bunch Monitor started"]);
        reporter.report(&[&format!(
            ">> Checking for file changes every {} second(s)",
            self.options.interval.as_secs_f64()
        )]);
        reporter.report(&[">> CTRL+C to stop"]);

        self.state = MonitorState::Building;
        let config = match BunchConfig::from_path(&self.manifest).await {
            Ok(config) => config,
            Err(err) => {
                self.state = MonitorState::Idle;
                return Err(err.into());
            }
        };
        self.config = Arc::new(config);
        self.reindex().await;

        let state = match self.regenerate(None).await {
            Ok(state) => state,
            Err(err) => {
                self.state = MonitorState::Idle;
                return Err(err);
            }
        };
        self.state = MonitorState::Watching;
        self.events.emit(&MonitorEvent::MonitorStarted);
        Ok(state)
    }

    /// One poll sweep. Returns the cycle's state when something was rebuilt.
    pub async fn check_files(&mut self) -> Result<Option<Arc<RegenerateState>>, PackError> {
        let Some((path, mtime)) = self.index.first_changed().await else {
            return Ok(None);
        };
        let Some(bundles) = self.index.get(&path).map(|entry| entry.bundles.clone()) else {
            return Ok(None);
        };
        self.index.record(&path, mtime);
        self.events.emit(&MonitorEvent::FileChanged(path.clone()));
        self.state = MonitorState::Rebuilding;

        let reporter = self.ctx.reporter();
        let outcome = match bundles {
            BundleSet::All => {
                reporter.report(&["Bunchfile changed."]);
                reporter.report(&["Reloading manifest..."]);
                self.reload_manifest().await;
                self.ctx.reporter().report(&["Rebuilding all bundles..."]);
                self.regenerate(None).await
            }
            BundleSet::Named(names) => {
                reporter.report(&["File changed ->", &path.display().to_string()]);
                reporter.report(&["Rebuilding bundles:", &names.join(",")]);
                self.regenerate(Some(names)).await
            }
        };

        self.state = MonitorState::Watching;
        self.ctx.reporter().report(&["Done."]);
        outcome.map(Some)
    }

    /// `start()`, then poll until the process is stopped.
    pub async fn run(&mut self) -> Result<(), PackError> {
        let state = self.start().await?;
        show_status(&state);

        loop {
            tokio::time::sleep(self.options.interval).await;
            match self.check_files().await {
                Ok(Some(state)) => show_status(&state),
                Ok(None) => {}
                Err(err) => status_error("rebuild failed", &err.to_string()),
            }
        }
    }

    /// Replace the config from the manifest. A manifest that no longer
    /// parses is reported and the previous config stays in effect.
    async fn reload_manifest(&mut self) {
        match BunchConfig::from_path(&self.manifest).await {
            Ok(config) => {
                self.config = Arc::new(config);
                self.reindex().await;
            }
            Err(err) => self.ctx.reporter().report(&[err.name(), &err.to_string()]),
        }
    }

    async fn reindex(&mut self) {
        let packager = Packager::new(Arc::clone(&self.config), self.ctx.clone());
        self.index = FileIndex::build(packager.files(), &self.manifest).await;
        debug!("monitor"; "watching {} files", self.index.len());
    }

    async fn regenerate(
        &mut self,
        bundles: Option<Vec<String>>,
    ) -> Result<Arc<RegenerateState>, PackError> {
        let packager = Packager::new(Arc::clone(&self.config), self.ctx.clone());
        let options = PackOptions {
            bundles,
            compress: self.options.compress,
            mode: BuildMode::MONITOR,
        };
        let result = packager.pack(&options).await?;
        for built in &result.built {
            self.ctx
                .reporter()
                .report(&["Wrote file", &built.output.display().to_string()]);
        }

        let now = SystemTime::now();
        let watermark = self.watermark.map_or(now, |prev| prev.max(now));
        self.watermark = Some(watermark);

        let state = Arc::new(RegenerateState { watermark, result });
        self.events
            .emit(&MonitorEvent::AfterRegenerate(Arc::clone(&state)));
        Ok(state)
    }
}

fn show_status(state: &RegenerateState) {
    let result = &state.result;
    if result.is_success() {
        status_success(&format!("built: {}", result.succeeded_names().join(", ")));
    } else {
        let detail = result
            .failed
            .iter()
            .map(|f| format!("{}: {}", f.name, f.error))
            .collect::<Vec<_>>()
            .join("\n");
        status_error(
            &format!("failed: {}", result.failed_names().join(", ")),
            &detail,
        );
    }
}
