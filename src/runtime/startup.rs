use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::admin::{UploadStore, default_data_dir};
use crate::config::Settings;

/// Initialize tracing before the terminal enters raw mode.
///
/// Quiet by default; `RUST_LOG` raises the filter for debugging.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Open the upload store. `None` disables the admin upload features but
/// never prevents the app from starting.
pub fn open_store(settings: &Settings) -> Option<UploadStore> {
    let dir = settings.storage.data_dir.clone().or_else(default_data_dir)?;
    match UploadStore::open(&dir) {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(error = %e, dir = %dir.display(), "upload store unavailable");
            None
        }
    }
}
