use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::calendar::{format_calendar_date, parse_date};
use super::exercise::serialize_duration;
use super::{Exercise, User};

/// Raw query string of a log request. Every field is optional and an empty
/// value counts as absent.
#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// Validated log filter. `limit: None` returns every matching entry.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LogFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Read a limit the lenient way: an optional sign and leading digits, with
/// anything after them ignored (`2abc` and `2.5` are 2). A negative count is
/// taken by magnitude. Values past `u32::MAX` saturate.
fn parse_limit(input: &str) -> Option<u32> {
    let unsigned = input.strip_prefix(&['+', '-'][..]).unwrap_or(input);
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..digits_end];

    if digits.is_empty() {
        return None;
    }

    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

impl LogQuery {
    pub fn into_filter(self) -> Result<LogFilter, String> {
        let from = non_empty(&self.from)
            .map(|s| parse_date(s).ok_or_else(|| format!("Invalid from date: {}", s)))
            .transpose()?;
        let to = non_empty(&self.to)
            .map(|s| parse_date(s).ok_or_else(|| format!("Invalid to date: {}", s)))
            .transpose()?;
        let limit = non_empty(&self.limit)
            .map(|s| parse_limit(s).ok_or_else(|| format!("Invalid limit: {}", s)))
            .transpose()?
            .filter(|&n| n > 0);

        Ok(LogFilter { from, to, limit })
    }
}

#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub description: String,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: f64,
    pub date: String,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self {
            description: exercise.description,
            duration: exercise.duration,
            date: format_calendar_date(&exercise.date),
        }
    }
}

/// A user's filtered exercise log. `count` is the length of `log`.
#[derive(Debug, Serialize)]
pub struct ExerciseLog {
    #[serde(rename = "_id")]
    pub user_id: String,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

impl ExerciseLog {
    pub fn new(user: User, exercises: Vec<Exercise>) -> Self {
        let log: Vec<LogEntry> = exercises.into_iter().map(LogEntry::from).collect();
        Self {
            user_id: user.id,
            username: user.username,
            count: log.len(),
            log,
        }
    }
}
