//! Book catalog service

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, BookInput, PageRequest},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_books(&self, page: &PageRequest) -> AppResult<(Vec<Book>, usize)> {
        self.repository.books.list(page).await
    }

    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.repository.books.get(id).await
    }

    pub async fn create_book(&self, input: BookInput) -> AppResult<Book> {
        let book = input.into_book(Uuid::new_v4().to_string());
        let created = self.repository.books.insert(book).await?;
        tracing::info!("Created book {} ({})", created.id, created.title);
        Ok(created)
    }

    /// Replace every field of an existing book
    pub async fn replace_book(&self, id: &str, input: BookInput) -> AppResult<Book> {
        self.repository
            .books
            .update(id, |book| {
                *book = input.into_book(book.id.clone());
                Ok(())
            })
            .await
    }

    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        self.repository.books.remove(id).await?;
        tracing::info!("Deleted book {}", id);
        Ok(())
    }
}
