//! The local task list shown next to the timer.
//!
//! Tasks carry no scheduling semantics -- they are a checklist persisted
//! under `pomodoroTasks`, mutated through [`TaskList`] and written back
//! on every change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::{keys, Store};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Store-backed task collection.
#[derive(Debug)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Rehydrate from the store; absent or malformed entries start empty.
    pub fn load(store: &Store) -> Self {
        Self {
            tasks: store.get_or(keys::TASKS, Vec::new()),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Append a new task and persist. Returns its id.
    pub fn add(&mut self, store: &Store, title: impl Into<String>) -> Uuid {
        let task = Task {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
            created_at: Utc::now(),
        };
        let id = task.id;
        self.tasks.push(task);
        self.save(store);
        id
    }

    /// Flip the completed flag. Unknown ids are ignored.
    pub fn toggle(&mut self, store: &Store, id: Uuid) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.completed = !task.completed;
            self.save(store);
        }
    }

    /// Remove a task. Unknown ids are ignored.
    pub fn remove(&mut self, store: &Store, id: Uuid) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() != before {
            self.save(store);
        }
    }

    /// Drop every completed task.
    pub fn clear_completed(&mut self, store: &Store) {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        if self.tasks.len() != before {
            self.save(store);
        }
    }

    fn save(&self, store: &Store) {
        store.set(keys::TASKS, &self.tasks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_toggle_remove_round_trip() {
        let store = Store::in_memory();
        let mut list = TaskList::load(&store);
        assert!(list.is_empty());

        let id = list.add(&store, "write the report");
        list.add(&store, "review the queue");
        list.toggle(&store, id);

        let reloaded = TaskList::load(&store);
        assert_eq!(reloaded.tasks().len(), 2);
        assert!(reloaded.tasks()[0].completed);
        assert!(!reloaded.tasks()[1].completed);

        let mut list = reloaded;
        list.clear_completed(&store);
        assert_eq!(TaskList::load(&store).tasks().len(), 1);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let store = Store::in_memory();
        let mut list = TaskList::load(&store);
        list.add(&store, "only task");
        list.toggle(&store, Uuid::new_v4());
        list.remove(&store, Uuid::new_v4());
        assert_eq!(list.tasks().len(), 1);
        assert!(!list.tasks()[0].completed);
    }

    #[test]
    fn malformed_stored_list_starts_empty() {
        let store = Store::in_memory();
        store.set(keys::TASKS, &12345);
        assert!(TaskList::load(&store).is_empty());
    }
}
