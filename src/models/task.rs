use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TasklistError;

/// Calendar format of stored due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Parsed due date. Stored values that are not `YYYY-MM-DD` yield `None`.
    pub fn due(&self) -> Option<NaiveDate> {
        self.due_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, DUE_DATE_FORMAT).ok())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due().is_some_and(|due| due < today)
    }
}

/// Raw field values collected for a task that does not exist yet.
///
/// Drafts are unvalidated. They become a [`Task`] only through
/// [`TaskDraft::into_task`], which enforces the non-empty title gate. The edit
/// workflow also uses a draft as its staging area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub category: String,
    pub due_date: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due.format(DUE_DATE_FORMAT).to_string());
        self
    }

    pub fn validate(&self) -> Result<(), TasklistError> {
        if self.title.trim().is_empty() {
            return Err(TasklistError::empty_title());
        }
        Ok(())
    }

    pub fn into_task(self, id: String) -> Result<Task, TasklistError> {
        self.validate()?;
        Ok(Task {
            id,
            title: self.title.trim().to_string(),
            description: non_blank(self.description),
            priority: self.priority,
            category: self.category.trim().to_string(),
            due_date: non_blank(self.due_date),
            completed: false,
        })
    }
}

impl From<&Task> for TaskDraft {
    fn from(t: &Task) -> Self {
        Self {
            title: t.title.clone(),
            description: t.description.clone(),
            priority: t.priority,
            category: t.category.clone(),
            due_date: t.due_date.clone(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
