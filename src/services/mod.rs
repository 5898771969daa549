//! Business logic services

pub mod auth;
pub mod books;
pub mod categories;
pub mod items;
pub mod users;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub auth: auth::AuthService,
    pub users: users::UsersService,
    pub books: books::BooksService,
    pub categories: categories::CategoriesService,
    pub items: items::ItemsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        Self {
            auth: auth::AuthService::new(repository.clone(), config.auth.clone()),
            users: users::UsersService::new(repository.clone(), config.install.clone()),
            books: books::BooksService::new(repository.clone()),
            categories: categories::CategoriesService::new(repository.clone()),
            items: items::ItemsService::new(repository.clone()),
            repository,
        }
    }
}
