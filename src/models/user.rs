use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

/// A registered user, serialized as `{_id, username}`.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
}

impl FromSqliteRow for User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            username: row.get("username")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: Option<String>,
}

/// Registration response, serialized as `{username, _id}`.
#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<User> for CreatedUser {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            id: user.id,
        }
    }
}
