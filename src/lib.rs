//! Bookshelf server
//!
//! A REST JSON API for managing users, books, categories and items, stored
//! as flat JSON files, with JWT authentication and role-based authorization.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use self::config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire repositories and services for the given configuration
    pub fn new(config: AppConfig) -> Self {
        let repository = repository::Repository::new(config.storage.data_dir.clone());
        let services = services::Services::new(repository, &config);

        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
