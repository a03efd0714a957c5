use crate::error::Result;
use crate::storage::KeyValueStore;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub const ACTIVE_TAB_KEY: &str = "activeTab";

/// Top-level console tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Users,
    Posts,
    Tasks,
}

impl Tab {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Users => "users",
            Tab::Posts => "posts",
            Tab::Tasks => "tasks",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "users" => Ok(Tab::Users),
            "posts" => Ok(Tab::Posts),
            "tasks" => Ok(Tab::Tasks),
            other => Err(format!("unknown tab: {}", other)),
        }
    }
}

#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Falls back to the default tab when nothing (or garbage) is stored.
    pub fn active_tab(&self) -> Tab {
        self.store
            .get(ACTIVE_TAB_KEY)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_active_tab(&self, tab: Tab) -> Result<()> {
        self.store.set(ACTIVE_TAB_KEY, tab.as_str())
    }
}
