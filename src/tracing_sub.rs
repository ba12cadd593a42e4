use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::Level;

/// Initialize the tracing subscriber.
///
/// The UI owns stdout and stderr while the alternate screen is active, so
/// diagnostics go to a log file when one is configured and are discarded
/// otherwise. Safe to call multiple times; later calls are no-ops for the
/// global subscriber.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    match log_file {
        Some(path) => {
            let file = Arc::new(File::create(path)?);
            let _ = tracing_subscriber::fmt()
                .with_max_level(Level::DEBUG)
                .with_writer(file)
                .with_ansi(false)
                .with_target(false)
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_max_level(Level::DEBUG)
                .with_writer(io::sink)
                .try_init();
        }
    }
    Ok(())
}
