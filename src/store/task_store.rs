use crate::error::TasklistError;
use crate::models::{Task, TaskDraft};

/// Insertion-ordered, exclusively owned task collection.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already deserialized collection. Tasks are taken as-is.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a task. A blank title is rejected without touching the collection.
    pub fn add(&mut self, task: Task) -> Result<&Task, TasklistError> {
        if task.title.trim().is_empty() {
            return Err(TasklistError::empty_title());
        }
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let pos = self.position(id)?;
        Some(self.tasks.remove(pos))
    }

    /// Flip the completed flag, returning the new value.
    pub fn toggle_completion(&mut self, id: &str) -> Option<bool> {
        let pos = self.position(id)?;
        let task = &mut self.tasks[pos];
        task.completed = !task.completed;
        Some(task.completed)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Resolve a task by exact ID, then by unique case-insensitive ID suffix.
    ///
    /// IDs created close together share their leading timestamp characters,
    /// so the tail is the part users can abbreviate to.
    pub fn resolve(&self, reference: &str) -> Result<Option<&Task>, TasklistError> {
        if let Some(task) = self.find_by_id(reference) {
            return Ok(Some(task));
        }
        if reference.is_empty() {
            return Ok(None);
        }

        let suffix = reference.to_ascii_lowercase();
        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.id.to_ascii_lowercase().ends_with(&suffix))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches[0])),
            _ => {
                let candidates: Vec<String> = matches
                    .iter()
                    .map(|t| format!("{} ({})", t.title, t.id))
                    .collect();
                Err(TasklistError::ambiguous_ref(reference, &candidates))
            }
        }
    }

    /// Overwrite the editable fields of a task, keeping its ID, position and
    /// completion state.
    pub fn update(&mut self, id: &str, draft: TaskDraft) -> Result<Option<&Task>, TasklistError> {
        let fresh = draft.into_task(id.to_string())?;
        let Some(pos) = self.position(id) else {
            return Ok(None);
        };
        let task = &mut self.tasks[pos];
        task.title = fresh.title;
        task.description = fresh.description;
        task.priority = fresh.priority;
        task.category = fresh.category;
        task.due_date = fresh.due_date;
        Ok(Some(&self.tasks[pos]))
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn task(id: &str, title: &str) -> Task {
        TaskDraft::new(title).into_task(id.into()).unwrap()
    }

    #[test]
    fn test_add_then_find() {
        let mut store = TaskStore::new();
        store.add(task("01A", "Buy milk")).unwrap();
        store.add(task("01B", "Pay bills")).unwrap();
        assert_eq!(store.find_by_id("01B").unwrap().title, "Pay bills");
        let titles: Vec<_> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Buy milk", "Pay bills"]);
    }

    #[test]
    fn test_add_blank_title_leaves_store_unchanged() {
        let mut store = TaskStore::new();
        store.add(task("01A", "Buy milk")).unwrap();
        let mut blank = task("01B", "x");
        blank.title = "  ".into();
        assert!(store.add(blank).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_id_is_noop() {
        let mut store = TaskStore::new();
        store.add(task("01A", "Buy milk")).unwrap();
        assert!(store.remove("nope").is_none());
        assert!(store.toggle_completion("nope").is_none());
        assert!(store.find_by_id("nope").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut store = TaskStore::new();
        store.add(task("01A", "Buy milk")).unwrap();
        assert_eq!(store.toggle_completion("01A"), Some(true));
        assert_eq!(store.toggle_completion("01A"), Some(false));
        assert!(!store.find_by_id("01A").unwrap().completed);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut store = TaskStore::new();
        for (id, title) in [("1", "a"), ("2", "b"), ("3", "c")] {
            store.add(task(id, title)).unwrap();
        }
        assert_eq!(store.remove("2").unwrap().title, "b");
        let ids: Vec<_> = store.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_resolve_suffix() {
        let mut store = TaskStore::new();
        store.add(task("01HXAAA", "a")).unwrap();
        store.add(task("01HXBAA", "b")).unwrap();
        assert_eq!(store.resolve("01HXAAA").unwrap().unwrap().title, "a");
        assert_eq!(store.resolve("zaa").unwrap(), None);
        assert_eq!(store.resolve("baa").unwrap().unwrap().title, "b");
        assert!(store.resolve("AA").is_err());
        assert_eq!(store.resolve("").unwrap(), None);
    }

    #[test]
    fn test_update_in_place() {
        let mut store = TaskStore::new();
        store.add(task("1", "a")).unwrap();
        store.add(task("2", "b")).unwrap();
        store.toggle_completion("1");

        let draft = TaskDraft::new("renamed").with_priority(Priority::High);
        let updated = store.update("1", draft).unwrap().unwrap();
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.priority, Priority::High);
        assert!(updated.completed);
        assert_eq!(store.tasks()[0].id, "1");

        assert!(store.update("1", TaskDraft::new(" ")).is_err());
        assert_eq!(store.find_by_id("1").unwrap().title, "renamed");
        assert!(store.update("9", TaskDraft::new("x")).unwrap().is_none());
    }
}
