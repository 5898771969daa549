//! Item endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        item::{CreateItem, UpdateItem},
        Action, Item, ItemStatistics, PageQuery, PageRequest,
    },
};

use super::{
    AuthenticatedUser, PageParams, PaginatedResponse, Payload, QueryParams, ValidatedJson,
};

/// List items with pagination
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "List of items", body = crate::api::PaginatedItems)
    )
)]
pub async fn list_items(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    params: PageParams,
) -> AppResult<Json<PaginatedResponse<Item>>> {
    claims.require(Action::ReadCatalog)?;
    let QueryParams(query) = params?;

    let page = PageRequest::resolve(&query, &state.config.pagination);
    let (items, total) = state.services.items.list_items(&page).await?;

    Ok(Json(PaginatedResponse::new(items, total, &page)))
}

/// Item counts per category and oldest/newest items
#[utoipa::path(
    get,
    path = "/items/statistics",
    tag = "items",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Item statistics", body = ItemStatistics)
    )
)]
pub async fn get_statistics(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ItemStatistics>> {
    claims.require(Action::ViewStatistics)?;

    let stats = state.services.items.statistics().await?;
    Ok(Json(stats))
}

/// Get item by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item details", body = Item),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<Item>> {
    claims.require(Action::ReadCatalog)?;

    let item = state.services.items.get_item(&id).await?;
    Ok(Json(item))
}

/// Create a new item in an existing category
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    security(("bearer_auth" = [])),
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Invalid input or unknown category"),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn create_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    payload: Payload<CreateItem>,
) -> AppResult<(StatusCode, Json<Item>)> {
    claims.require(Action::WriteCatalog)?;
    let ValidatedJson(request) = payload?;

    let created = state.services.items.create_item(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an item's name or category
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Unknown category"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
    payload: Payload<UpdateItem>,
) -> AppResult<Json<Item>> {
    claims.require(Action::WriteCatalog)?;
    let ValidatedJson(request) = payload?;

    let updated = state.services.items.update_item(&id, request).await?;
    Ok(Json(updated))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    claims.require(Action::WriteCatalog)?;

    state.services.items.delete_item(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
