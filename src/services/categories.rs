//! Category service

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        category::{CreateCategory, UpdateCategory},
        Category, PageRequest,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_categories(&self, page: &PageRequest) -> AppResult<(Vec<Category>, usize)> {
        self.repository.categories.list(page).await
    }

    pub async fn get_category(&self, id: &str) -> AppResult<Category> {
        self.repository.categories.get(id).await
    }

    pub async fn create_category(&self, request: CreateCategory) -> AppResult<Category> {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            created_at: Utc::now(),
        };
        let created = self.repository.categories.insert(category).await?;
        tracing::info!("Created category {} ({})", created.id, created.name);
        Ok(created)
    }

    pub async fn update_category(&self, id: &str, request: UpdateCategory) -> AppResult<Category> {
        self.repository
            .categories
            .update(id, |category| {
                if let Some(name) = request.name {
                    category.name = name;
                }
                Ok(())
            })
            .await
    }

    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        self.repository.categories.remove(id).await?;
        tracing::info!("Deleted category {}", id);
        Ok(())
    }
}
