//! Category endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        category::{CreateCategory, UpdateCategory},
        Action, Category, PageQuery, PageRequest,
    },
};

use super::{
    AuthenticatedUser, PageParams, PaginatedResponse, Payload, QueryParams, ValidatedJson,
};

/// List categories with pagination
#[utoipa::path(
    get,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "List of categories", body = crate::api::PaginatedCategories)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    params: PageParams,
) -> AppResult<Json<PaginatedResponse<Category>>> {
    claims.require(Action::ReadCatalog)?;
    let QueryParams(query) = params?;

    let page = PageRequest::resolve(&query, &state.config.pagination);
    let (categories, total) = state.services.categories.list_categories(&page).await?;

    Ok(Json(PaginatedResponse::new(categories, total, &page)))
}

/// Get category by ID
#[utoipa::path(
    get,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category details", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    claims.require(Action::ReadCatalog)?;

    let category = state.services.categories.get_category(&id).await?;
    Ok(Json(category))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/categories",
    tag = "categories",
    security(("bearer_auth" = [])),
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    payload: Payload<CreateCategory>,
) -> AppResult<(StatusCode, Json<Category>)> {
    claims.require(Action::WriteCatalog)?;
    let ValidatedJson(request) = payload?;

    let created = state.services.categories.create_category(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated", body = Category),
        (status = 404, description = "Category not found")
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
    payload: Payload<UpdateCategory>,
) -> AppResult<Json<Category>> {
    claims.require(Action::WriteCatalog)?;
    let ValidatedJson(request) = payload?;

    let updated = state.services.categories.update_category(&id, request).await?;
    Ok(Json(updated))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    tag = "categories",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Category not found")
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    claims.require(Action::WriteCatalog)?;

    state.services.categories.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
