/// Devlink Post Service Library
///
/// Handles the posts and comments endpoints for the devlink platform.
/// Likes and comments are embedded in the post aggregate and every
/// mutation is a read-modify-write of that aggregate.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route registration
/// - `models`: Data structures for the post aggregate
/// - `services`: Business logic layer (validation, ownership, consistency)
/// - `repository`: Store traits and their PostgreSQL implementations
/// - `middleware`: Bearer-token authentication
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
/// - `db`: Embedded schema migrations
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod services;

pub use config::Config;
pub use error::{ApiError, Result};

use repository::{PostStore, UserStore};
use std::sync::Arc;

/// Shared application state handed to every handler.
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub users: Arc<dyn UserStore>,
}
