//! The task collection together with its persisted mirror.
//!
//! The in-memory list is the source of truth. It is read from the store once
//! when loaded and written back in full after every successful change.

use crate::storage::KeyValueStore;
use crate::task::{Task, TaskDraft, TaskError, local_today};
use crate::view::{self, PriorityFilter, StatusFilter};
use chrono::NaiveDate;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Key under which the task list is persisted.
pub const TASKS_KEY: &str = "tasks";

pub struct TaskStore<S: KeyValueStore> {
    storage: S,
    tasks: Vec<Task>,
    today: fn() -> NaiveDate,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Loads the task list from `storage`, using the local calendar for due-date checks.
    pub fn load(storage: S) -> Self {
        Self::load_with_calendar(storage, local_today)
    }

    /// Loads the task list, taking "today" from the given function.
    ///
    /// Unreadable or malformed data is logged and replaced by an empty list.
    pub fn load_with_calendar(storage: S, today: fn() -> NaiveDate) -> Self {
        let tasks = match storage.get(TASKS_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Task>>(&json) {
                Ok(tasks) => tasks,
                Err(err) => {
                    warn!(error = %err, "Error loading tasks, starting with an empty list");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "Error reading task storage, starting with an empty list");
                Vec::new()
            }
        };
        info!(count = tasks.len(), "loaded tasks");
        Self {
            storage,
            tasks,
            today,
        }
    }

    /// Validates the draft and appends it as a new pending task.
    #[tracing::instrument(skip(self))]
    pub fn create(&mut self, draft: TaskDraft) -> Result<&Task, TaskError> {
        draft.validate((self.today)())?;
        let task = Task::from_draft(Uuid::new_v4().to_string(), draft);
        self.tasks.push(task);
        self.save();
        let created = &self.tasks[self.tasks.len() - 1];
        info!(id = created.id(), "task created");
        Ok(created)
    }

    /// Replaces the editable fields of a pending task.
    ///
    /// Returns `Ok(None)` when no task has this id.
    #[tracing::instrument(skip(self))]
    pub fn update(&mut self, id: &str, draft: TaskDraft) -> Result<Option<&Task>, TaskError> {
        let Some(index) = self.position(id) else {
            return Ok(None);
        };
        if self.tasks[index].is_completed() {
            return Err(TaskError::Completed);
        }
        draft.validate((self.today)())?;
        let task = &mut self.tasks[index];
        task.title = draft.title;
        task.description = draft.description;
        task.due_date = draft.due_date;
        task.priority = draft.priority;
        self.save();
        Ok(Some(&self.tasks[index]))
    }

    /// Flips a task between pending and completed, returning the new state.
    #[tracing::instrument(skip(self))]
    pub fn toggle_complete(&mut self, id: &str) -> Option<bool> {
        let index = self.position(id)?;
        let task = &mut self.tasks[index];
        task.completed = !task.completed;
        let completed = task.completed;
        self.save();
        Some(completed)
    }

    /// Removes a task, returning it if it existed.
    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let index = self.position(id)?;
        let removed = self.tasks.remove(index);
        self.save();
        Some(removed)
    }

    /// Tasks matching both filters, in display order.
    pub fn visible(&self, status: StatusFilter, priority: PriorityFilter) -> Vec<&Task> {
        let mut shown = view::filter(&self.tasks, status, priority);
        view::sort(&mut shown);
        shown
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == id)
    }

    fn save(&mut self) {
        let result = serde_json::to_string(&self.tasks)
            .map_err(Into::into)
            .and_then(|json| self.storage.set(TASKS_KEY, json));
        if let Err(err) = result {
            error!(error = %err, "failed to persist tasks");
        }
    }
}
