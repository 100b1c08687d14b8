// 📝 Logging setup for the binary
// Diagnostics go to stderr so stdout only carries the confirmation lines.

use anyhow::{anyhow, Result};
use tracing::Level;

/// Install a plain `fmt` subscriber at INFO on stderr
pub fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))
}
