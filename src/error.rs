//! Error types shared by the roster, storage, and predictor.

use crate::student::StudentId;

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("student with id {0} already exists")]
    DuplicateStudent(StudentId),

    #[error("student with id {0} not found")]
    UnknownStudent(StudentId),

    #[error("not enough data to train: have {have} samples, need at least {need}")]
    InsufficientData { have: usize, need: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, RecordError>;
