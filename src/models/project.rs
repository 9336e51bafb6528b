use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status assigned to projects created without an explicit one.
pub const DEFAULT_PROJECT_STATUS: &str = "offen";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub id: u32,
    pub name: String,
    pub customer: String,
    pub address: Option<String>,
    pub due_date: Option<NaiveDate>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Input for creating a project; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub customer: String,
    pub address: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub notes: Option<String>,
}

impl NewProject {
    pub fn new(name: impl Into<String>, customer: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            customer: customer.into(),
            address: None,
            due_date: None,
            status: DEFAULT_PROJECT_STATUS.to_string(),
            notes: None,
        }
    }
}

fn default_status() -> String {
    DEFAULT_PROJECT_STATUS.to_string()
}
