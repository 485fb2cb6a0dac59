//! Movies API: REST CRUD over movies, directors and genres backed by SQLite.

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use model::{Director, Genre, Movie, Resource};
pub use routes::app;
pub use service::Repository;
pub use state::AppState;
pub use store::{connect, ensure_tables};
