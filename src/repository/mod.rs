//! Repository layer over the JSON data files

pub mod json_file;
pub mod users;

use std::path::{Path, PathBuf};

pub use json_file::JsonCollection;

use crate::models::{Book, Category, Item, User};

/// Main repository struct holding one collection per entity
#[derive(Clone)]
pub struct Repository {
    data_dir: PathBuf,
    pub users: JsonCollection<User>,
    pub books: JsonCollection<Book>,
    pub categories: JsonCollection<Category>,
    pub items: JsonCollection<Item>,
}

impl Repository {
    /// Create a new repository rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            users: JsonCollection::new(data_dir.join("users.json")),
            books: JsonCollection::new(data_dir.join("books.json")),
            categories: JsonCollection::new(data_dir.join("categories.json")),
            items: JsonCollection::new(data_dir.join("items.json")),
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the data directory if it does not exist yet
    pub async fn init(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.data_dir).await
    }

    /// Check the data directory exists and accepts writes, without creating it
    pub async fn check_ready(&self) -> std::io::Result<()> {
        let metadata = tokio::fs::metadata(&self.data_dir).await?;
        if !metadata.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} is not a directory", self.data_dir.display()),
            ));
        }

        let marker = self.data_dir.join(".ready");
        tokio::fs::write(&marker, b"").await?;
        tokio::fs::remove_file(&marker).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_check_ready_does_not_create_directory() {
        let dir = tempfile::tempdir().unwrap();
        let repository = Repository::new(dir.path().join("data"));

        assert!(repository.check_ready().await.is_err());
        assert!(!repository.data_dir().exists());

        repository.init().await.unwrap();
        repository.check_ready().await.unwrap();
        assert!(!repository.data_dir().join(".ready").exists());
    }

    #[tokio::test]
    async fn test_check_ready_rejects_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data");
        std::fs::write(&path, "").unwrap();

        assert!(Repository::new(path).check_ready().await.is_err());
    }
}
