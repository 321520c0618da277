use super::error::TaskError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub description: String,
    pub done: bool,
}

impl Task {
    pub fn new(description: String) -> Self {
        Self {
            description,
            done: false,
        }
    }
}

/// Read-only view of a task handed out by [`TaskStore::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskView<'a> {
    pub index: usize,
    pub description: &'a str,
    pub done: bool,
}

/// Ordered list of tasks. A task is identified only by its position, so
/// removing one shifts every later index down by one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn append(&mut self, description: String) {
        self.tasks.push(Task::new(description));
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Task, TaskError> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Inserting at `len` is allowed and appends.
    pub fn insert_at(&mut self, index: usize, task: Task) -> Result<(), TaskError> {
        if index > self.tasks.len() {
            return Err(TaskError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        self.tasks.insert(index, task);
        Ok(())
    }

    pub fn set_done(&mut self, index: usize, value: bool) -> Result<(), TaskError> {
        self.check_index(index)?;
        self.tasks[index].done = value;
        Ok(())
    }

    pub fn snapshot(&self) -> impl Iterator<Item = TaskView<'_>> + Clone + '_ {
        self.tasks.iter().enumerate().map(|(index, task)| TaskView {
            index,
            description: &task.description,
            done: task.done,
        })
    }

    pub fn total_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|task| task.done).count()
    }

    fn check_index(&self, index: usize) -> Result<(), TaskError> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TaskError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
        }
    }
}
