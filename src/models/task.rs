use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Task {
    pub id: u32,
    pub project_id: u32,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone)]
pub struct NewTask {
    pub project_id: u32,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub done: bool,
}

impl NewTask {
    pub fn new(project_id: u32, description: impl Into<String>) -> Self {
        Self {
            project_id,
            description: description.into(),
            due_date: None,
            done: false,
        }
    }
}
