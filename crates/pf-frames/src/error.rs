use std::time::Duration;

use pf_core::PfError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("timed out after {waited:?} waiting for {what}")]
    Timeout { what: String, waited: Duration },

    #[error("driver error: {0}")]
    Driver(String),

    #[error(transparent)]
    Config(#[from] PfError),
}

pub type SyncResult<T> = Result<T, SyncError>;
