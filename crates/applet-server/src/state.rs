use applet_core::config::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state passed to all route handlers.
///
/// The catalog is re-read from `root` on every request so edits made by the
/// CLI show up without a restart.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub config: Config,
    /// Held across each catalog read-modify-write.
    pub catalog_write: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(root: PathBuf, config: Config) -> Self {
        Self {
            root,
            config,
            catalog_write: Arc::new(Mutex::new(())),
        }
    }
}
