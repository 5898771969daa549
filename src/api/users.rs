//! User management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        user::{CreateUser, UpdateUser},
        Action, PageQuery, PageRequest, Role, UserShort,
    },
};

use super::{
    AuthenticatedUser, PageParams, PaginatedResponse, Payload, QueryParams, ValidatedJson,
};

/// List users with pagination
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "List of users", body = crate::api::PaginatedUsers),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Administrator privileges required")
    )
)]
pub async fn list_users(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    params: PageParams,
) -> AppResult<Json<PaginatedResponse<UserShort>>> {
    claims.require(Action::ListUsers)?;
    let QueryParams(query) = params?;

    let page = PageRequest::resolve(&query, &state.config.pagination);
    let (users, total) = state.services.users.list_users(&page).await?;
    let users = users.into_iter().map(UserShort::from).collect();

    Ok(Json(PaginatedResponse::new(users, total, &page)))
}

/// Get user details by ID (own account, or any account for administrators)
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = UserShort),
        (status = 403, description = "Not allowed to view this user"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<UserShort>> {
    claims.require_self_or(&id, Action::ManageUsers)?;

    let user = state.services.users.get_by_id(&id).await?;
    Ok(Json(user.into()))
}

/// Register a new user account
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserShort),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    ValidatedJson(request): ValidatedJson<CreateUser>,
) -> AppResult<(StatusCode, Json<UserShort>)> {
    let created = state.services.users.create_user(request, Role::User).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Create a new administrator
#[utoipa::path(
    post,
    path = "/users/admin",
    tag = "users",
    security(("bearer_auth" = [])),
    request_body = CreateUser,
    responses(
        (status = 201, description = "Administrator created", body = UserShort),
        (status = 400, description = "Invalid input"),
        (status = 403, description = "Administrator privileges required"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn create_admin(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    payload: Payload<CreateUser>,
) -> AppResult<(StatusCode, Json<UserShort>)> {
    claims.require(Action::CreateAdmin)?;
    let ValidatedJson(request) = payload?;

    let created = state.services.users.create_user(request, Role::Admin).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Update username, email or password
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserShort),
        (status = 403, description = "Not allowed to modify this user"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn update_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
    payload: Payload<UpdateUser>,
) -> AppResult<Json<UserShort>> {
    claims.require_self_or(&id, Action::ManageUsers)?;
    let ValidatedJson(request) = payload?;

    let updated = state.services.users.update_user(&id, request).await?;
    Ok(Json(updated.into()))
}

/// Delete a non-administrator user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Administrator privileges required, or target is an administrator"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    claims.require(Action::DeleteUser)?;

    state.services.users.delete_user(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
