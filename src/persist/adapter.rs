use tracing::{debug, warn};

use crate::error::TasklistError;
use crate::models::{Task, TaskDraft};

use super::blob::BlobStore;

/// Key holding the serialized task collection.
pub const TASKS_KEY: &str = "tasks";

/// Key holding the staged draft of an in-progress edit.
pub const DRAFT_KEY: &str = "tasks.editDraft";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// Nothing stored under the key yet.
    Missing,
    /// Stored value is not a JSON sequence of tasks.
    Malformed(String),
    /// The blob store itself failed.
    Unavailable(String),
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loaded => "loaded",
            Self::Missing => "missing",
            Self::Malformed(_) => "malformed",
            Self::Unavailable(_) => "unavailable",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::Unavailable(_))
    }
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub tasks: Vec<Task>,
    pub status: LoadStatus,
}

impl LoadOutcome {
    fn empty(status: LoadStatus) -> Self {
        Self {
            tasks: Vec::new(),
            status,
        }
    }
}

/// Reads and writes the task collection as one JSON blob.
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
}

impl<S: BlobStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn save(&mut self, tasks: &[Task]) -> Result<(), TasklistError> {
        let json = serde_json::to_string(tasks)?;
        self.store.set(TASKS_KEY, &json)?;
        debug!(count = tasks.len(), "saved tasks");
        Ok(())
    }

    /// Never fails: any problem falls back to an empty collection and is
    /// reported through [`LoadOutcome::status`].
    pub fn load(&self) -> LoadOutcome {
        let raw = match self.store.get(TASKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::empty(LoadStatus::Missing),
            Err(e) => {
                warn!(error = %e, "blob store unavailable, starting with no tasks");
                return LoadOutcome::empty(LoadStatus::Unavailable(e.message));
            }
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                debug!(count = tasks.len(), "loaded tasks");
                LoadOutcome {
                    tasks,
                    status: LoadStatus::Loaded,
                }
            }
            Err(e) => {
                warn!(error = %e, "stored tasks are malformed, starting with no tasks");
                LoadOutcome::empty(LoadStatus::Malformed(e.to_string()))
            }
        }
    }

    /// Store the staged edit draft, or clear it when `None`.
    pub fn save_draft(&mut self, draft: Option<&TaskDraft>) -> Result<(), TasklistError> {
        match draft {
            Some(d) => {
                let json = serde_json::to_string(d)?;
                self.store.set(DRAFT_KEY, &json)
            }
            None => self.store.remove(DRAFT_KEY),
        }
    }

    pub fn flush(&mut self) -> Result<(), TasklistError> {
        self.store.flush()
    }

    pub fn load_draft(&self) -> Option<TaskDraft> {
        let raw = match self.store.get(DRAFT_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "could not read staged edit");
                return None;
            }
        };
        serde_json::from_str(&raw)
            .map_err(|e| warn!(error = %e, "discarding malformed staged edit"))
            .ok()
    }
}
