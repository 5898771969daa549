//! Install bootstrap endpoint

use axum::{extract::State, http::StatusCode, Json};

use crate::{error::AppResult, models::UserShort};

/// Create the default administrator account
#[utoipa::path(
    get,
    path = "/install",
    tag = "install",
    responses(
        (status = 201, description = "Default administrator created", body = UserShort),
        (status = 409, description = "An administrator already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn install(
    State(state): State<crate::AppState>,
) -> AppResult<(StatusCode, Json<UserShort>)> {
    let admin = state.services.users.install().await?;
    Ok((StatusCode::CREATED, Json(admin.into())))
}
