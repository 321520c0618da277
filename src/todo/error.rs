use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("index {index} is out of range (list has {len} tasks)")]
    IndexOutOfRange { index: usize, len: usize },
}
