use super::enums::{FilterMode, Priority};
use super::error::ValidationError;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// A single to-do entry as persisted under the `todo-list` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Creation timestamp in epoch milliseconds, unique within the list
    pub id: i64,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub priority: Priority,
}

impl Task {
    /// Local calendar date the task was created, for display
    pub fn created_date(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d")
            .to_string()
    }
}

/// Trim task text, rejecting blank input
pub fn validate_text(text: &str) -> Result<String, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyTask);
    }
    Ok(trimmed.to_string())
}

/// The ordered task collection. Vec order is insertion order, which the
/// priority sort in [`TaskList::view`] relies on for ties.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    /// Last id handed out this session (0 = none yet)
    last_issued: i64,
}

impl TaskList {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            last_issued: 0,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    pub fn has_completed(&self) -> bool {
        self.tasks.iter().any(|t| t.completed)
    }

    /// Append a new task stamped with the current time
    pub fn add(&mut self, text: &str, priority: Priority) -> Result<&Task, ValidationError> {
        self.add_at(text, priority, Utc::now())
    }

    /// Append a new task created at `now`. The id is `now` in milliseconds,
    /// bumped past every existing id when the clock has not moved on.
    pub fn add_at(
        &mut self,
        text: &str,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<&Task, ValidationError> {
        let text = validate_text(text)?;
        let id = self
            .next_id(now.timestamp_millis())
            .ok_or(ValidationError::IdsExhausted)?;

        self.tasks.push(Task {
            id,
            text,
            completed: false,
            created_at: now,
            priority,
        });
        self.last_issued = id;
        log::debug!("added task {} ({})", id, priority.label());

        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// None once an existing id sits at `i64::MAX`
    fn next_id(&self, now_ms: i64) -> Option<i64> {
        let max_existing = self.tasks.iter().map(|t| t.id).max().unwrap_or(0);
        let after_existing = max_existing.checked_add(1)?;
        let after_issued = self.last_issued.checked_add(1)?;
        Some(now_ms.max(after_existing).max(after_issued))
    }

    /// Flip completion; returns false when the id is unknown
    pub fn toggle(&mut self, id: i64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                log::debug!("toggled task {} -> completed={}", id, task.completed);
                true
            }
            None => false,
        }
    }

    /// Delete by id; returns false when the id is unknown
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            log::debug!("removed task {}", id);
        }
        removed
    }

    /// Drop every completed task, returning how many were removed
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        if removed > 0 {
            log::info!("cleared {} completed task(s)", removed);
        }
        removed
    }

    /// Replace the text of a task. Validation failure leaves it untouched.
    pub fn set_text(&mut self, id: i64, text: &str) -> Result<bool, ValidationError> {
        let text = validate_text(text)?;
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.text = text;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Derived, read-only listing: completion filter, then case-insensitive
    /// search, then a stable sort by priority (high first).
    pub fn view(&self, filter: FilterMode, search: &str) -> Vec<&Task> {
        let needle = search.to_lowercase();
        let mut rows: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| filter.matches(t.completed))
            .filter(|t| t.text.to_lowercase().contains(&needle))
            .collect();
        rows.sort_by_key(|t| t.priority.rank());
        rows
    }
}
