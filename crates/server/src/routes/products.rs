//! Public catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use showroom_core::{Category, Product, ProductId, ProductSort};

use crate::error::{AppError, Result};
use crate::state::AppState;

// =============================================================================
// Query Types
// =============================================================================

/// Listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
}

/// Category listing query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub subcategory: Option<String>,
}

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// A category and the subcategories products may use within it.
#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub category: Category,
    pub subcategories: &'static [&'static str],
}

// =============================================================================
// Handlers
// =============================================================================

/// List the fixed category tree.
pub async fn categories() -> Json<Vec<CategoryView>> {
    Json(
        Category::ALL
            .iter()
            .map(|&category| CategoryView {
                category,
                subcategories: category.subcategories(),
            })
            .collect(),
    )
}

/// List every product, optionally sorted.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Product>>> {
    let sort: ProductSort = query.sort.as_deref().unwrap_or_default().parse()?;

    let mut products = state.products().list_all().await;
    sort.apply(&mut products);
    Ok(Json(products))
}

/// List products in a category, optionally narrowed to a subcategory.
///
/// An unknown category yields an empty list rather than an error.
#[instrument(skip(state))]
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<CategoryQuery>,
) -> Json<Vec<Product>> {
    let subcategory = query.subcategory.as_deref().filter(|s| !s.is_empty());
    Json(state.products().list_by_category(&category, subcategory).await)
}

/// Case-insensitive search over names and descriptions.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>> {
    let q = query.q.unwrap_or_default();
    if q.trim().is_empty() {
        return Err(AppError::BadRequest("Search query required".to_string()));
    }
    Ok(Json(state.products().search(&q).await))
}

/// Fetch a single product.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = parse_product_id(&id)?;
    Ok(Json(state.products().get(id).await?))
}

/// Parse a path segment as a product id.
///
/// Non-numeric ids can never match a product, so they are reported as
/// not found.
pub(crate) fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse::<i32>()
        .map(ProductId::new)
        .map_err(|_| AppError::NotFound("Product not found".to_string()))
}
