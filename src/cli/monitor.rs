//! `bunch monitor`: watch sources and the manifest.

use anyhow::Result;
use std::path::Path;
use std::time::Duration;

use super::project_root;
use crate::context::BuildContext;
use crate::core::setup_shutdown_handler;
use crate::monitor::{Monitor, MonitorOptions};
use crate::report::LogReporter;

const BANNER: &str = r"
.-.                     .-.
: :                     : :
: `-. .-..-.,-.,-. .--. : `-.
' .; :: :; :: ,. :'  ..': .. :
`.__.'`.__.':_;:_;`.__.':_;:_;
";

pub async fn monitor(manifest: &Path, compress: bool, interval_ms: u64) -> Result<()> {
    setup_shutdown_handler()?;
    println!("{BANNER}");

    let ctx = BuildContext::new(project_root(manifest))
        .with_reporter(std::sync::Arc::new(LogReporter::new("monitor")));
    let options = MonitorOptions {
        interval: Duration::from_millis(interval_ms),
        compress,
    };
    Monitor::new(manifest, ctx, options).run().await?;
    Ok(())
}
