use admin_client::{AdminClient, ClientConfig};
use admin_console::{FileStore, KeyValueStore};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// File inside the state directory holding drafts, comment timestamps and
/// the last active tab.
pub const STATE_FILE: &str = "state.json";

pub fn default_state_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("admin-console"))
        .unwrap_or_else(|| PathBuf::from(".admin-console"))
}

/// Everything a command needs, resolved from `.env`, environment and flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub state_dir: PathBuf,
    pub per_page: usize,
    pub assume_yes: bool,
}

impl Settings {
    pub fn client(&self) -> Result<AdminClient> {
        AdminClient::new(ClientConfig::new(&self.api_url))
            .with_context(|| format!("Invalid server URL {:?}", self.api_url))
    }

    pub fn store(&self) -> Result<Arc<dyn KeyValueStore>> {
        let path = self.state_dir.join(STATE_FILE);
        let store = FileStore::open(&path)
            .with_context(|| format!("Failed to open state file {:?}", path))?;
        tracing::debug!("Using state file {:?}", store.path());
        Ok(Arc::new(store))
    }
}
