//! API handlers for Bookshelf REST endpoints

pub mod auth;
pub mod books;
pub mod categories;
pub mod health;
pub mod install;
pub mod items;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    routing::{get, post},
    Json, Router,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejectionReason,
    TypedHeader,
};
use serde::{de::DeserializeOwned, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppError,
    models::{Book, Category, Item, PageQuery, PageRequest, UserClaims, UserShort},
    AppState,
};

/// Extractor for authenticated user from JWT token
pub struct AuthenticatedUser(pub UserClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| match rejection.reason() {
                    TypedHeaderRejectionReason::Missing => {
                        AppError::Authentication("Missing authorization header".to_string())
                    }
                    _ => AppError::Authentication(
                        "Invalid authorization header format, expected 'Bearer <token>'".to_string(),
                    ),
                })?;

        let claims = state.services.auth.verify_token(bearer.token())?;

        Ok(AuthenticatedUser(claims))
    }
}

/// JSON body that has been deserialized and validated.
///
/// Malformed JSON and missing fields are reported as validation errors (400).
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Request body whose rejection is deferred until the caller has been
/// authorized, so that forbidden callers get 403 whatever they send.
pub type Payload<T> = Result<ValidatedJson<T>, AppError>;

/// Query string parameters; rejections render as JSON validation errors
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(QueryParams(value))
    }
}

/// Page parameters, rejected only after authorization like [`Payload`]
pub type PageParams = Result<QueryParams<PageQuery>, AppError>;

/// Paginated response wrapper
#[derive(Serialize, ToSchema)]
#[aliases(
    PaginatedUsers = PaginatedResponse<UserShort>,
    PaginatedBooks = PaginatedResponse<Book>,
    PaginatedCategories = PaginatedResponse<Category>,
    PaginatedItems = PaginatedResponse<Item>
)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Records on this page
    pub items: Vec<T>,
    /// Total number of records
    pub total: usize,
    /// Current page number
    pub page: usize,
    /// Records per page
    pub per_page: usize,
}

impl<T> PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(items: Vec<T>, total: usize, request: &PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            per_page: request.per_page,
        }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        .route("/", get(health::root))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Authentication
        .route("/login", post(auth::login))
        .route("/auth/login", post(auth::login))
        .route("/install", get(install::install))
        // Users
        .route("/users", get(users::list_users).post(users::register))
        .route("/users/admin", post(users::create_admin))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Categories
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Items
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/statistics", get(items::get_statistics))
        .route(
            "/items/:id",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
