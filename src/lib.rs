//! GraphQL API over clients and the projects that reference them.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod relations;
pub mod schema;
pub mod server;

pub use error::{ApiError, Result};
