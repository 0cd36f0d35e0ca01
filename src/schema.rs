use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::{NewTask, Priority, TaskStatus};

// Struct representing the signup form submission
#[derive(Debug, Deserialize)]
pub struct SignupSchema {
    pub email: String,
    pub password: String,
}

// Struct representing the login form submission. No password field: the
// login flow only looks the account up by email.
#[derive(Debug, Deserialize)]
pub struct LoginSchema {
    pub email: String,
}

// Struct representing the add-task form submission. Every field is
// optional; the fallbacks live in `into_record`.
#[derive(Debug, Default, Deserialize)]
pub struct NewTaskSchema {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
}

impl NewTaskSchema {
    /// Applies the documented defaults and stamps the record with its
    /// owner. Empty strings count as missing, matching a browser form that
    /// always submits every field.
    pub fn into_record(self, owner_id: &str) -> NewTask {
        NewTask {
            owner_id: owner_id.to_string(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            category: non_empty(self.category).unwrap_or_else(|| "General".to_string()),
            priority: Priority::parse_or_default(self.priority.as_deref()),
            due_date: non_empty(self.due_date)
                .and_then(|value| NaiveDate::parse_from_str(&value, "%Y-%m-%d").ok()),
            status: TaskStatus::Pending,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
