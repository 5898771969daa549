//! Item service

use chrono::Utc;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        item::{CreateItem, UpdateItem},
        Item, ItemStatistics, PageRequest,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_items(&self, page: &PageRequest) -> AppResult<(Vec<Item>, usize)> {
        self.repository.items.list(page).await
    }

    pub async fn get_item(&self, id: &str) -> AppResult<Item> {
        self.repository.items.get(id).await
    }

    pub async fn create_item(&self, request: CreateItem) -> AppResult<Item> {
        // Categories stay locked until the item is written
        let _categories = self.repository.categories.lock_writes().await;
        self.ensure_category_exists(&request.category_id).await?;

        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            category_id: request.category_id,
            created_at: Utc::now(),
        };
        let created = self.repository.items.insert(item).await?;
        tracing::info!("Created item {} in category {}", created.id, created.category_id);
        Ok(created)
    }

    pub async fn update_item(&self, id: &str, request: UpdateItem) -> AppResult<Item> {
        let _categories = self.repository.categories.lock_writes().await;
        if let Some(ref category_id) = request.category_id {
            self.ensure_category_exists(category_id).await?;
        }

        self.repository
            .items
            .update(id, |item| {
                if let Some(name) = request.name {
                    item.name = name;
                }
                if let Some(category_id) = request.category_id {
                    item.category_id = category_id;
                }
                Ok(())
            })
            .await
    }

    pub async fn delete_item(&self, id: &str) -> AppResult<()> {
        self.repository.items.remove(id).await?;
        tracing::info!("Deleted item {}", id);
        Ok(())
    }

    pub async fn statistics(&self) -> AppResult<ItemStatistics> {
        let items = self.repository.items.load().await?;
        let categories = self.repository.categories.load().await?;
        Ok(ItemStatistics::compute(&items, &categories))
    }

    async fn ensure_category_exists(&self, category_id: &str) -> AppResult<()> {
        let categories = self.repository.categories.load().await?;
        if categories.iter().any(|category| category.id == category_id) {
            Ok(())
        } else {
            Err(AppError::Validation(format!("Invalid category: {}", category_id)))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{models::Category, services::categories::CategoriesService};

    async fn service_with_category(dir: &tempfile::TempDir) -> ItemsService {
        let repository = Repository::new(dir.path());
        repository
            .categories
            .insert(Category {
                id: "tools".to_string(),
                name: "Tools".to_string(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        ItemsService::new(repository)
    }

    fn hammer(category_id: &str) -> CreateItem {
        CreateItem {
            name: "Hammer".to_string(),
            category_id: category_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_item_waits_for_category_writes() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with_category(&dir).await;

        let guard = service.repository.categories.lock_writes().await;
        let pending =
            tokio::time::timeout(Duration::from_millis(50), service.create_item(hammer("tools"))).await;
        assert!(pending.is_err());
        assert!(service.repository.items.load().await.unwrap().is_empty());
        drop(guard);

        let item = service.create_item(hammer("tools")).await.unwrap();
        assert_eq!(item.category_id, "tools");
    }

    #[tokio::test]
    async fn test_item_never_outlives_concurrent_category_delete() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_with_category(&dir).await;
        let categories = CategoriesService::new(service.repository.clone());

        let (created, deleted) = tokio::join!(
            service.create_item(hammer("tools")),
            categories.delete_category("tools")
        );
        deleted.unwrap();

        // Either the item was written first, or it was refused once the category was gone
        let items = service.repository.items.load().await.unwrap();
        match created {
            Ok(item) => assert_eq!(items[0].id, item.id),
            Err(AppError::Validation(_)) => assert!(items.is_empty()),
            Err(other) => panic!("unexpected error: {other}"),
        }

        let err = service.create_item(hammer("tools")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
