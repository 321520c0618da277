use super::command::Command;
use crate::todo::error::TaskError;
use crate::todo::models::TaskStore;
use log::debug;
use std::num::NonZeroUsize;

/// Linear undo/redo history. Both stacks keep the most recent command last.
#[derive(Debug, Default)]
pub struct HistoryManager {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    limit: Option<NonZeroUsize>,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps at most `limit` undoable commands, dropping the oldest first.
    pub fn with_limit(limit: NonZeroUsize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Runs `command` and records it. A command that fails is not recorded
    /// and the redo history survives.
    pub fn execute(&mut self, mut command: Command, store: &mut TaskStore) -> Result<(), TaskError> {
        command.execute(store)?;
        debug!("executed {}", command);
        self.push_undo(command);
        self.redo_stack.clear();
        Ok(())
    }

    /// Returns `Ok(None)` when there is nothing to undo.
    pub fn undo(&mut self, store: &mut TaskStore) -> Result<Option<&Command>, TaskError> {
        let Some(mut command) = self.undo_stack.pop() else {
            debug!("nothing to undo");
            return Ok(None);
        };

        if let Err(e) = command.undo(store) {
            self.undo_stack.push(command);
            return Err(e);
        }

        debug!("undid {}", command);
        self.redo_stack.push(command);
        Ok(self.redo_stack.last())
    }

    /// Returns `Ok(None)` when there is nothing to redo.
    pub fn redo(&mut self, store: &mut TaskStore) -> Result<Option<&Command>, TaskError> {
        let Some(mut command) = self.redo_stack.pop() else {
            debug!("nothing to redo");
            return Ok(None);
        };

        if let Err(e) = command.execute(store) {
            self.redo_stack.push(command);
            return Err(e);
        }

        debug!("redid {}", command);
        self.push_undo(command);
        Ok(self.undo_stack.last())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_stack(&self) -> &[Command] {
        &self.undo_stack
    }

    pub fn redo_stack(&self) -> &[Command] {
        &self.redo_stack
    }

    fn push_undo(&mut self, command: Command) {
        self.undo_stack.push(command);

        if let Some(limit) = self.limit {
            if self.undo_stack.len() > limit.get() {
                let dropped = self.undo_stack.remove(0);
                debug!("history limit {} reached, dropped {}", limit, dropped);
            }
        }
    }
}
