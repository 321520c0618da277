use crate::todo::error::TaskError;
use crate::todo::models::{Task, TaskStore};
use std::fmt;

/// A reversible mutation of a [`TaskStore`].
///
/// Commands do not hold on to the store; it is passed in to every
/// `execute` and `undo` call. Undo assumes strict LIFO use: the store must
/// look the way this command left it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTask {
        description: String,
    },
    RemoveTask {
        index: usize,
        /// Filled in by a successful `execute`.
        removed: Option<Task>,
    },
    MarkDone {
        index: usize,
    },
}

impl Command {
    pub fn add_task(description: impl Into<String>) -> Self {
        Self::AddTask {
            description: description.into(),
        }
    }

    pub fn remove_task(index: usize) -> Self {
        Self::RemoveTask {
            index,
            removed: None,
        }
    }

    pub fn mark_done(index: usize) -> Self {
        Self::MarkDone { index }
    }

    /// Applies the command. On error the store is left untouched.
    pub fn execute(&mut self, store: &mut TaskStore) -> Result<(), TaskError> {
        match self {
            Self::AddTask { description } => {
                store.append(description.clone());
                Ok(())
            }
            Self::RemoveTask { index, removed } => {
                let task = store.remove_at(*index)?;
                *removed = Some(task);
                Ok(())
            }
            Self::MarkDone { index } => store.set_done(*index, true),
        }
    }

    pub fn undo(&mut self, store: &mut TaskStore) -> Result<(), TaskError> {
        match self {
            Self::AddTask { .. } => {
                let last = store
                    .len()
                    .checked_sub(1)
                    .ok_or(TaskError::IndexOutOfRange { index: 0, len: 0 })?;
                store.remove_at(last)?;
                Ok(())
            }
            Self::RemoveTask { index, removed } => match removed {
                Some(task) => store.insert_at(*index, task.clone()),
                // Never executed successfully, nothing to put back
                None => Ok(()),
            },
            Self::MarkDone { index } => store.set_done(*index, false),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddTask { description } => write!(f, "add \"{}\"", description),
            Self::RemoveTask {
                removed: Some(task),
                index,
            } => write!(f, "remove #{} \"{}\"", index, task.description),
            Self::RemoveTask { index, .. } => write!(f, "remove #{}", index),
            Self::MarkDone { index } => write!(f, "mark #{} done", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> TaskStore {
        let mut store = TaskStore::new();
        store.append("first".to_string());
        store.append("second".to_string());
        store.append("third".to_string());
        store
    }

    fn descriptions(store: &TaskStore) -> Vec<String> {
        store
            .snapshot()
            .map(|view| view.description.to_string())
            .collect()
    }

    #[test]
    fn test_add_task_execute_and_undo() {
        let mut store = TaskStore::new();
        let mut command = Command::add_task("buy milk");

        command.execute(&mut store).unwrap();
        assert_eq!(descriptions(&store), vec!["buy milk"]);

        command.undo(&mut store).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_task_undo_on_empty_store_fails() {
        let mut store = TaskStore::new();
        let mut command = Command::add_task("ghost");

        let result = command.undo(&mut store);
        assert_eq!(result, Err(TaskError::IndexOutOfRange { index: 0, len: 0 }));
    }

    #[test]
    fn test_remove_task_captures_removed_task() {
        let mut store = create_test_store();
        store.set_done(1, true).unwrap();
        let mut command = Command::remove_task(1);

        command.execute(&mut store).unwrap();
        assert_eq!(descriptions(&store), vec!["first", "third"]);
        match &command {
            Command::RemoveTask { removed: Some(task), .. } => {
                assert_eq!(task.description, "second");
                assert!(task.done);
            }
            _ => panic!("Expected captured task"),
        }

        command.undo(&mut store).unwrap();
        assert_eq!(descriptions(&store), vec!["first", "second", "third"]);
        assert!(store.get(1).unwrap().done);
    }

    #[test]
    fn test_remove_task_out_of_range_leaves_store_alone() {
        let mut store = create_test_store();
        let mut command = Command::remove_task(7);

        let result = command.execute(&mut store);
        assert_eq!(result, Err(TaskError::IndexOutOfRange { index: 7, len: 3 }));
        assert_eq!(store.len(), 3);

        // Undo without a captured task does nothing
        command.undo(&mut store).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_mark_done_execute_and_undo() {
        let mut store = create_test_store();
        let mut command = Command::mark_done(2);

        command.execute(&mut store).unwrap();
        assert!(store.get(2).unwrap().done);

        command.undo(&mut store).unwrap();
        assert!(!store.get(2).unwrap().done);
    }

    #[test]
    fn test_mark_done_out_of_range() {
        let mut store = create_test_store();
        let mut command = Command::mark_done(3);

        assert!(command.execute(&mut store).is_err());
        assert_eq!(store.completed_tasks(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Command::add_task("x").to_string(), "add \"x\"");
        assert_eq!(Command::remove_task(4).to_string(), "remove #4");
        assert_eq!(Command::mark_done(0).to_string(), "mark #0 done");

        let mut store = create_test_store();
        let mut command = Command::remove_task(0);
        command.execute(&mut store).unwrap();
        assert_eq!(command.to_string(), "remove #0 \"first\"");
    }
}
