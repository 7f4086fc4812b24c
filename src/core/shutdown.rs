//! Ctrl+C handling for long-running commands.

/// Exit the process immediately on Ctrl+C.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        crate::log!("monitor"; "stopped");
        std::process::exit(0);
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}
