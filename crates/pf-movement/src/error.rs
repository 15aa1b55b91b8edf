use pf_core::{PfError, TaskId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MovementError {
    #[error("task {0} has already been started")]
    AlreadyStarted(TaskId),

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("worker thread of task {0} panicked")]
    WorkerPanicked(TaskId),

    #[error(transparent)]
    Config(#[from] PfError),
}

pub type MovementResult<T> = Result<T, MovementError>;
