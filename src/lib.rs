pub mod config;
pub mod error;
pub mod grade;
pub mod predictor;
pub mod report;
pub mod roster;
pub mod session;
pub mod store;
pub mod student;

pub use error::{RecordError, Result};
pub use roster::Roster;
pub use student::{GradeRecord, Student, StudentId};
