use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// An account held by the identity gateway. Created on signup, read on
/// login, never deleted here.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: String,
    pub email: String,
}

/// The authenticated user attached to a session, and the value the access
/// gate inserts into request extensions for downstream handlers.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, sqlx::Type)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Maps form input to a priority. Absent, empty, and unrecognized
    /// values all fall back to the default.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("Low") => Priority::Low,
            Some("Medium") => Priority::Medium,
            Some("High") => Priority::High,
            _ => Priority::default(),
        }
    }
}

/// Lifecycle state of a task. Every task is created `Pending`; no handler
/// ever moves one to `Done` (tasks are immutable apart from deletion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, sqlx::Type)]
pub enum TaskStatus {
    #[default]
    Pending,
    Done,
}

// Data model representing a stored task record
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Task {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

/// A task as handed to the store. The store assigns the id and the
/// creation timestamp; everything else is decided by the caller.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
}
