//! Project, task and material records for craft businesses, kept in a
//! single JSON data file.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{MaterialScope, ProjectDetail, RecordStore};
