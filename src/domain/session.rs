use super::enums::{FilterMode, Priority};
use super::error::ValidationError;
use super::task::{Task, TaskList};

/// In-progress inline edit of a single task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: i64,
    pub buffer: String,
}

/// Per-view state for the to-do widget. Nothing here is persisted.
///
/// The `editing` slot is the only place an edit can live, so at most one
/// task is ever being edited.
#[derive(Debug, Clone, Default)]
pub struct TodoSession {
    pub filter: FilterMode,
    pub search: String,
    pub priority: Priority,
    pub editing: Option<EditState>,
    /// Last validation failure, cleared on the next successful operation
    pub error: Option<ValidationError>,
}

impl TodoSession {
    pub fn new(priority: Priority) -> Self {
        Self {
            priority,
            ..Self::default()
        }
    }

    pub fn editing_id(&self) -> Option<i64> {
        self.editing.as_ref().map(|e| e.id)
    }

    pub fn is_searching(&self) -> bool {
        !self.search.is_empty()
    }

    /// Visible rows for the current filter and search term
    pub fn view<'a>(&self, list: &'a TaskList) -> Vec<&'a Task> {
        list.view(self.filter, &self.search)
    }

    /// Message for an empty view
    pub fn empty_message(&self) -> &'static str {
        if self.is_searching() {
            "No matching tasks found"
        } else {
            "No tasks yet"
        }
    }

    /// Add a task with the session's selected priority
    pub fn add(&mut self, list: &mut TaskList, text: &str) -> Result<i64, ValidationError> {
        match list.add(text, self.priority) {
            Ok(task) => {
                self.error = None;
                Ok(task.id)
            }
            Err(e) => {
                self.error = Some(e);
                Err(e)
            }
        }
    }

    /// Enter edit mode for `id`, replacing any edit already in progress.
    /// Unknown ids leave the session unchanged.
    pub fn edit_start(&mut self, list: &TaskList, id: i64) -> bool {
        match list.get(id) {
            Some(task) => {
                self.editing = Some(EditState {
                    id,
                    buffer: task.text.clone(),
                });
                true
            }
            None => false,
        }
    }

    /// Commit `text` to task `id`. On validation failure the task and the
    /// edit mode are both kept as they were.
    pub fn edit_save(
        &mut self,
        list: &mut TaskList,
        id: i64,
        text: &str,
    ) -> Result<(), ValidationError> {
        if let Err(e) = list.set_text(id, text) {
            self.error = Some(e);
            return Err(e);
        }
        self.editing = None;
        self.error = None;
        Ok(())
    }

    /// Commit the current edit buffer, if an edit is active
    pub fn edit_commit(&mut self, list: &mut TaskList) -> Result<(), ValidationError> {
        match self.editing.clone() {
            Some(edit) => self.edit_save(list, edit.id, &edit.buffer),
            None => Ok(()),
        }
    }

    /// Leave edit mode, discarding the pending text
    pub fn edit_cancel(&mut self) {
        self.editing = None;
    }
}
