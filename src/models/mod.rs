mod project;
mod task;
mod material;
mod document;

pub use project::{Project, NewProject, DEFAULT_PROJECT_STATUS};
pub use task::{Task, NewTask};
pub use material::{Material, NewMaterial, DEFAULT_UNIT};
pub use document::Document;

use chrono::NaiveDate;

use crate::error::StoreError;

/// Format used for due dates on the command line and in the data file.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
        StoreError::Validation(format!(
            "malformed date `{input}`, expected YYYY-MM-DD"
        ))
    })
}
