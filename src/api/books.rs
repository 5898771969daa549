//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{Action, Book, BookInput, PageQuery, PageRequest},
};

use super::{
    AuthenticatedUser, PageParams, PaginatedResponse, Payload, QueryParams, ValidatedJson,
};

/// List books with pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "List of books", body = crate::api::PaginatedBooks),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    params: PageParams,
) -> AppResult<Json<PaginatedResponse<Book>>> {
    claims.require(Action::ReadCatalog)?;
    let QueryParams(query) = params?;

    let page = PageRequest::resolve(&query, &state.config.pagination);
    let (books, total) = state.services.books.list_books(&page).await?;

    Ok(Json(PaginatedResponse::new(books, total, &page)))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Book>> {
    claims.require(Action::ReadCatalog)?;

    let book = state.services.books.get_book(&id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    security(("bearer_auth" = [])),
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    payload: Payload<BookInput>,
) -> AppResult<(StatusCode, Json<Book>)> {
    claims.require(Action::WriteCatalog)?;
    let ValidatedJson(input) = payload?;

    let created = state.services.books.create_book(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Replace an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
    payload: Payload<BookInput>,
) -> AppResult<Json<Book>> {
    claims.require(Action::WriteCatalog)?;
    let ValidatedJson(input) = payload?;

    let updated = state.services.books.replace_book(&id, input).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    claims.require(Action::WriteCatalog)?;

    state.services.books.delete_book(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
