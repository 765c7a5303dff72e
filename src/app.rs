use tracing::{debug, warn};
use ulid::{Generator, Ulid};

use crate::config::Config;
use crate::error::TasklistError;
use crate::models::{FilterState, PriorityFilter, StatusFilter, Task, TaskDraft};
use crate::persist::{BlobStore, LoadStatus, Persistence};
use crate::query::{filtered_view, Statistics};
use crate::store::TaskStore;

/// Edit workflow state.
///
/// Beginning an edit removes the task from the store right away and stages
/// its fields. The next successful add consumes the staged draft and creates
/// a task with a fresh ID. There is no cancel: an abandoned edit loses the
/// task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(TaskDraft),
}

impl EditState {
    pub fn draft(&self) -> Option<&TaskDraft> {
        match self {
            Self::Idle => None,
            Self::Editing(d) => Some(d),
        }
    }
}

/// Single owner of the task collection, filter selections, search text and
/// edit state. Every mutation is written through to the blob store; write
/// failures are logged and kept in [`TaskList::last_persist`] but never
/// returned from the mutating call.
pub struct TaskList<S> {
    store: TaskStore,
    filters: FilterState,
    search: String,
    edit: EditState,
    config: Config,
    persistence: Persistence<S>,
    ids: Generator,
    load_status: LoadStatus,
    last_persist: Result<(), TasklistError>,
}

impl<S: BlobStore> TaskList<S> {
    pub fn open(blobs: S, config: Config) -> Self {
        let persistence = Persistence::new(blobs);
        let loaded = persistence.load();
        let edit = persistence
            .load_draft()
            .map_or(EditState::Idle, EditState::Editing);
        Self {
            store: TaskStore::from_tasks(loaded.tasks),
            filters: FilterState::default(),
            search: String::new(),
            edit,
            config,
            persistence,
            ids: Generator::new(),
            load_status: loaded.status,
            last_persist: Ok(()),
        }
    }

    pub fn into_blob_store(self) -> S {
        self.persistence.into_inner()
    }

    /// Add a task built from `draft`. Ends an in-progress edit.
    pub fn add(&mut self, draft: TaskDraft) -> Result<Task, TasklistError> {
        let id = self.next_id();
        let task = draft.into_task(id)?;
        let added = self.store.add(task)?.clone();
        if self.edit != EditState::Idle {
            debug!(id = %added.id, "edit committed as new task");
        }
        self.edit = EditState::Idle;
        debug!(id = %added.id, title = %added.title, "added task");
        self.persist();
        Ok(added)
    }

    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let removed = self.store.remove(id)?;
        debug!(id, "deleted task");
        self.persist();
        Some(removed)
    }

    /// Flip completion, returning the new value. Unknown IDs are ignored.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let completed = self.store.toggle_completion(id)?;
        debug!(id, completed, "toggled task");
        self.persist();
        Some(completed)
    }

    /// Remove the task and stage its fields for the next add.
    pub fn begin_edit(&mut self, id: &str) -> Option<&TaskDraft> {
        let task = self.store.remove(id)?;
        if let EditState::Editing(previous) = &self.edit {
            warn!(title = %previous.title, "replacing staged edit, previous task is discarded");
        }
        debug!(id, "editing task");
        self.edit = EditState::Editing(TaskDraft::from(&task));
        self.persist();
        self.edit.draft()
    }

    /// Overwrite a task's fields in place, keeping its ID and position.
    pub fn update(&mut self, id: &str, draft: TaskDraft) -> Result<Option<Task>, TasklistError> {
        let Some(updated) = self.store.update(id, draft)?.cloned() else {
            return Ok(None);
        };
        debug!(id, "updated task");
        self.persist();
        Ok(Some(updated))
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filters.status = status;
    }

    pub fn set_priority_filter(&mut self, priority: PriorityFilter) {
        self.filters.priority = priority;
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.store.find_by_id(id)
    }

    pub fn resolve(&self, reference: &str) -> Result<Option<&Task>, TasklistError> {
        self.store.resolve(reference)
    }

    pub fn filters(&self) -> FilterState {
        self.filters
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn view(&self) -> Vec<&Task> {
        filtered_view(self.store.tasks(), self.filters.status, self.filters.priority, &self.search)
    }

    pub fn stats(&self) -> Statistics {
        Statistics::from_tasks(self.store.tasks())
    }

    pub fn staged(&self) -> Option<&TaskDraft> {
        self.edit.draft()
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    /// Base draft for the next add: the staged edit, or configured defaults.
    pub fn next_draft(&self) -> TaskDraft {
        match &self.edit {
            EditState::Editing(d) => d.clone(),
            EditState::Idle => self.config.blank_draft(),
        }
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn last_persist(&self) -> Result<(), &TasklistError> {
        self.last_persist.as_ref().map(|_| ())
    }

    fn next_id(&mut self) -> String {
        self.ids
            .generate()
            .unwrap_or_else(|_| Ulid::new())
            .to_string()
    }

    fn persist(&mut self) {
        let result = save_state(&mut self.persistence, &self.store, &self.edit);
        if let Err(e) = &result {
            warn!(error = %e, "could not persist tasks, continuing in memory");
        }
        self.last_persist = result;
    }
}

fn save_state<S: BlobStore>(
    persistence: &mut Persistence<S>,
    store: &TaskStore,
    edit: &EditState,
) -> Result<(), TasklistError> {
    persistence.save(store.tasks())?;
    persistence.save_draft(edit.draft())?;
    persistence.flush()
}
