use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::calendar::format_calendar_date;
use super::{FromSqliteRow, User};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

/// Deserialize an optional number that may arrive as a JSON number or as a
/// form string. Empty strings become `None`.
fn deserialize_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<NumberOrString>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(NumberOrString::Number(n)) => n,
        Some(NumberOrString::Text(s)) if s.trim().is_empty() => return Ok(None),
        Some(NumberOrString::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid number: {}", s)))?,
    };

    if value.is_finite() {
        Ok(Some(value))
    } else {
        Err(de::Error::custom("number must be finite"))
    }
}

fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.trim().is_empty()))
}

/// Whole durations are written as integers, so `30` stays `30` on the wire.
pub(crate) fn serialize_duration<S>(duration: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if duration.fract() == 0.0 && duration.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*duration as i64)
    } else {
        serializer.serialize_f64(*duration)
    }
}

#[derive(Debug, Clone)]
pub struct Exercise {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub duration: f64,
    pub date: DateTime<Utc>,
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            description: row.get("description")?,
            duration: row.get("duration")?,
            date: row.get("date")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateExercise {
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub date: Option<String>,
}

/// Response to a recorded exercise. `_id` is the owning user's id.
#[derive(Debug, Serialize)]
pub struct ExerciseResponse {
    #[serde(rename = "_id")]
    pub user_id: String,
    pub username: String,
    pub description: String,
    #[serde(serialize_with = "serialize_duration")]
    pub duration: f64,
    pub date: String,
}

impl ExerciseResponse {
    pub fn new(user: User, exercise: Exercise) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            description: exercise.description,
            duration: exercise.duration,
            date: format_calendar_date(&exercise.date),
        }
    }
}
