//! HTTP route handlers for the showroom server.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                              - Health check
//!
//! # Catalog
//! GET    /api/categories                      - Category tree
//! GET    /api/products?sort=                  - Product listing
//! GET    /api/products/category/{category}    - Listing by category (?subcategory=)
//! GET    /api/products/search?q=              - Search
//! GET    /api/products/{id}                   - Product detail
//!
//! # Admin session
//! POST   /api/admin/login                     - Login
//! POST   /api/admin/logout                    - Logout (requires auth)
//! GET    /api/admin/me                        - Current admin (requires auth)
//!
//! # Admin catalog (requires auth)
//! POST   /api/admin/products                  - Create (multipart)
//! PUT    /api/admin/products/{id}             - Partial update (JSON)
//! DELETE /api/admin/products/{id}             - Delete
//! ```

pub mod admin_products;
pub mod auth;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the public catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(products::categories))
        .route("/products", get(products::index))
        .route("/products/category/{category}", get(products::by_category))
        .route("/products/search", get(products::search))
        .route("/products/{id}", get(products::show))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .route("/products", post(admin_products::create))
        .route(
            "/products/{id}",
            put(admin_products::update).delete(admin_products::delete),
        )
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", catalog_routes())
        .nest("/api/admin", admin_routes())
}
