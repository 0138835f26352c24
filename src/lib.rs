//! academia - gym back-office client
//!
//! Talks to the gym-management REST API: accounts, objective and equipment
//! catalog, workout templates and training plans ("fichas").

pub mod api;
pub mod assignment;
pub mod db;
pub mod error;
pub mod forms;
pub mod models;
pub mod report;
pub mod tui;
pub mod workout;

pub use api::ApiClient;
pub use db::Database;
pub use error::{ApiError, ApiResult};
