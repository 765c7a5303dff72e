pub mod app;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod output;
pub mod persist;
pub mod query;
pub mod store;

pub use app::{EditState, TaskList};
pub use error::{ErrorCode, TasklistError};
