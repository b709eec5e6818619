pub mod calendar;
pub mod exercise;
pub mod from_row;
pub mod log;
pub mod user;

pub use exercise::{CreateExercise, Exercise, ExerciseResponse};
pub use from_row::FromSqliteRow;
pub use log::{ExerciseLog, LogEntry, LogFilter, LogQuery};
pub use user::{CreateUser, CreatedUser, User};
