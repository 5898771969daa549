//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, categories, health, install, items, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "0.1.0",
        description = "Book, category and item catalog REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        install::install,
        // Users
        users::list_users,
        users::get_user,
        users::register,
        users::create_admin,
        users::update_user,
        users::delete_user,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Categories
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        // Items
        items::list_items,
        items::get_statistics,
        items::get_item,
        items::create_item,
        items::update_item,
        items::delete_item,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            // Users
            crate::models::user::Role,
            crate::models::user::UserShort,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Catalog
            crate::models::book::Book,
            crate::models::book::BookInput,
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            crate::models::item::Item,
            crate::models::item::CreateItem,
            crate::models::item::UpdateItem,
            crate::models::item::ItemStatistics,
            crate::models::item::CategoryCount,
            // Pages
            crate::api::PaginatedUsers,
            crate::api::PaginatedBooks,
            crate::api::PaginatedCategories,
            crate::api::PaginatedItems,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "install", description = "First-run bootstrap"),
        (name = "users", description = "User management"),
        (name = "books", description = "Book catalog"),
        (name = "categories", description = "Item categories"),
        (name = "items", description = "Catalog items")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_protected_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/login"));
        assert!(doc.paths.paths.contains_key("/users/{id}"));
        assert!(doc.paths.paths.contains_key("/items/statistics"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
        for page in ["PaginatedUsers", "PaginatedBooks", "PaginatedCategories", "PaginatedItems"] {
            assert!(components.schemas.contains_key(page), "{page} missing");
        }
    }
}
