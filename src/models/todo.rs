use chrono::{DateTime, Duration, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

const DISPLAY_FORMAT: &str = "%A, %b %-d, %Y, %I:%M:%S %p";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    pub fn created_at_display(&self) -> String {
        self.created_at.format(DISPLAY_FORMAT).to_string()
    }

    pub fn updated_at_display(&self) -> String {
        self.updated_at.format(DISPLAY_FORMAT).to_string()
    }
}

/// Raw HTML form body for create and update.
///
/// Checkboxes are only submitted when ticked, so `completed` is a presence flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoForm {
    pub title: Option<String>,
    pub completed: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoInput {
    pub title: String,
    pub completed: bool,
}

impl TryFrom<TodoForm> for TodoInput {
    type Error = AppError;

    fn try_from(form: TodoForm) -> Result<Self, Self::Error> {
        let title = form
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation("title is required".to_string()))?;

        Ok(Self {
            title,
            completed: form.completed.is_some(),
        })
    }
}

/// Current time at the precision the store keeps.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for a mutation of a record last touched at `previous`.
/// Always strictly later than `previous`, even if the clock has not moved.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

/// Fixed-width text form, so lexical order in the database matches time order.
pub fn to_db_text(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
