use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::db::connection;
use crate::models::{Priority, TaskDraft};

/// Project settings from `.tasklist/config.json`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_priority: Priority,
    pub default_category: String,
}

impl Config {
    /// Load the project config, falling back to defaults when the file is
    /// absent or unreadable.
    pub fn load(root: &Path) -> Self {
        let path = connection::config_path(root);
        let Ok(content) = fs::read_to_string(&path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "ignoring malformed config");
            Self::default()
        })
    }

    /// An empty draft carrying the configured defaults.
    pub fn blank_draft(&self) -> TaskDraft {
        TaskDraft::default()
            .with_priority(self.default_priority)
            .with_category(self.default_category.clone())
    }
}
