use crate::history::{Command, HistoryManager};
use crate::todo::error::TaskError;
use crate::todo::models::{TaskStore, TaskView};
use std::num::NonZeroUsize;

/// One task list together with its undo/redo history.
#[derive(Debug, Default)]
pub struct Session {
    store: TaskStore,
    history: HistoryManager,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` keeps the whole history.
    pub fn with_history_limit(limit: Option<NonZeroUsize>) -> Self {
        let history = match limit {
            Some(limit) => HistoryManager::with_limit(limit),
            None => HistoryManager::new(),
        };
        Self {
            store: TaskStore::new(),
            history,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn execute(&mut self, command: Command) -> Result<(), TaskError> {
        self.history.execute(command, &mut self.store)
    }

    pub fn add(&mut self, description: impl Into<String>) -> Result<(), TaskError> {
        self.execute(Command::add_task(description))
    }

    pub fn remove(&mut self, index: usize) -> Result<(), TaskError> {
        self.execute(Command::remove_task(index))
    }

    pub fn mark_done(&mut self, index: usize) -> Result<(), TaskError> {
        self.execute(Command::mark_done(index))
    }

    /// Returns a description of what was undone, or `None` if the history
    /// was empty.
    pub fn undo(&mut self) -> Result<Option<String>, TaskError> {
        Ok(self.history.undo(&mut self.store)?.map(ToString::to_string))
    }

    pub fn redo(&mut self) -> Result<Option<String>, TaskError> {
        Ok(self.history.redo(&mut self.store)?.map(ToString::to_string))
    }

    pub fn snapshot(&self) -> impl Iterator<Item = TaskView<'_>> + Clone + '_ {
        self.store.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_add_remove_undo() {
        let mut session = Session::new();
        session.add("write report").unwrap();
        session.add("water plants").unwrap();
        session.remove(0).unwrap();

        let names: Vec<_> = session.snapshot().map(|view| view.description).collect();
        assert_eq!(names, vec!["water plants"]);

        let undone = session.undo().unwrap();
        assert_eq!(undone.as_deref(), Some("remove #0 \"write report\""));
        assert_eq!(session.store().len(), 2);
        assert_eq!(session.store().get(0).unwrap().description, "write report");
    }

    #[test]
    fn test_session_reports_empty_history() {
        let mut session = Session::new();
        assert_eq!(session.undo(), Ok(None));
        assert_eq!(session.redo(), Ok(None));
    }

    #[test]
    fn test_session_rejects_bad_index() {
        let mut session = Session::new();
        session.add("only").unwrap();

        assert!(session.mark_done(1).is_err());
        assert!(session.remove(1).is_err());
        assert_eq!(session.history().undo_len(), 1);
        assert_eq!(session.store().completed_tasks(), 0);
    }

    #[test]
    fn test_session_history_limit() {
        let mut session = Session::with_history_limit(NonZeroUsize::new(1));
        session.add("a").unwrap();
        session.add("b").unwrap();

        assert!(session.undo().unwrap().is_some());
        assert_eq!(session.undo(), Ok(None));
        assert_eq!(session.store().len(), 1);
    }
}
