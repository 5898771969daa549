//! Item model and catalog statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::Record;

/// Catalog item filed under a category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category_id: String,
    pub created_at: DateTime<Utc>,
}

impl Record for Item {
    const KIND: &'static str = "Item";

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "categoryId is required"))]
    pub category_id: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "categoryId must not be empty"))]
    pub category_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Aggregate view over the items collection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemStatistics {
    pub total_items: usize,
    pub items_by_category: Vec<CategoryCount>,
    pub oldest_item: Option<Item>,
    pub newest_item: Option<Item>,
}

impl ItemStatistics {
    pub fn compute(items: &[Item], categories: &[super::Category]) -> Self {
        let items_by_category = categories
            .iter()
            .map(|category| CategoryCount {
                category: category.name.clone(),
                count: items.iter().filter(|item| item.category_id == category.id).count(),
            })
            .collect();

        ItemStatistics {
            total_items: items.len(),
            items_by_category,
            oldest_item: items.iter().min_by_key(|item| item.created_at).cloned(),
            newest_item: items.iter().max_by_key(|item| item.created_at).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use chrono::{Duration, TimeZone};

    fn item(id: &str, category_id: &str, age_days: i64) -> Item {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        Item {
            id: id.to_string(),
            name: format!("item {}", id),
            category_id: category_id.to_string(),
            created_at: base - Duration::days(age_days),
        }
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_statistics_empty() {
        let stats = ItemStatistics::compute(&[], &[category("c1", "Tools")]);
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.items_by_category[0].count, 0);
        assert!(stats.oldest_item.is_none());
        assert!(stats.newest_item.is_none());
    }

    #[test]
    fn test_statistics_counts_and_extremes() {
        let items = vec![item("a", "c1", 3), item("b", "c2", 10), item("c", "c1", 1)];
        let categories = vec![category("c1", "Tools"), category("c2", "Toys")];
        let stats = ItemStatistics::compute(&items, &categories);

        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.items_by_category[0].category, "Tools");
        assert_eq!(stats.items_by_category[0].count, 2);
        assert_eq!(stats.items_by_category[1].count, 1);
        assert_eq!(stats.oldest_item.unwrap().id, "b");
        assert_eq!(stats.newest_item.unwrap().id, "c");
    }
}
