//! Integration tests for the public catalog API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde_json::Value;

use showroom_core::{Category, Product};
use showroom_integration_tests::{TestContext, json_body};

async fn products(ctx: &TestContext, path: &str) -> Vec<Product> {
    let resp = ctx.get(path).await;
    assert_eq!(resp.status(), StatusCode::OK, "GET {path}");
    resp.json().await.unwrap()
}

fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::empty().await;
    let resp = ctx.get("/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_list_returns_seeded_catalog_in_insertion_order() {
    let ctx = TestContext::new().await;
    let all = products(&ctx, "/api/products").await;

    assert_eq!(
        names(&all),
        [
            "Modern Sofa",
            "Premium Bed",
            "Minimalist Chair",
            "Premium Laptop",
            "Smartphone"
        ]
    );

    let ids: Vec<i32> = all.iter().map(|p| p.id.as_i32()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_products_serialize_camel_case() {
    let ctx = TestContext::new().await;
    let body = json_body(ctx.get("/api/products").await).await;
    let first = &body[0];

    assert_eq!(first["finalPrice"], 899);
    assert!(first["imageUrl"].is_string());
    assert!(first.get("final_price").is_none());
}

#[tokio::test]
async fn test_list_sorting() {
    let ctx = TestContext::new().await;

    let by_price = products(&ctx, "/api/products?sort=price-asc").await;
    assert_eq!(
        names(&by_price),
        [
            "Minimalist Chair",
            "Modern Sofa",
            "Smartphone",
            "Premium Bed",
            "Premium Laptop"
        ]
    );

    let by_price_desc = products(&ctx, "/api/products?sort=price-desc").await;
    assert_eq!(by_price_desc[0].name, "Premium Laptop");

    let by_name = products(&ctx, "/api/products?sort=name-asc").await;
    assert_eq!(
        names(&by_name),
        [
            "Minimalist Chair",
            "Modern Sofa",
            "Premium Bed",
            "Premium Laptop",
            "Smartphone"
        ]
    );

    let resp = ctx.get("/api/products?sort=cheapest").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_catalog_lists_nothing() {
    let ctx = TestContext::empty().await;
    assert!(products(&ctx, "/api/products").await.is_empty());
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn test_categories_tree() {
    let ctx = TestContext::empty().await;
    let body = json_body(ctx.get("/api/categories").await).await;

    let tree = body.as_array().unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0]["category"], "furniture");
    assert_eq!(
        tree[0]["subcategories"],
        serde_json::json!(["beds", "sofas", "chairs", "almirahs"])
    );
    assert_eq!(tree[1]["category"], "electronics");
}

#[tokio::test]
async fn test_list_by_category_and_subcategory() {
    let ctx = TestContext::new().await;

    let furniture = products(&ctx, "/api/products/category/furniture").await;
    assert_eq!(furniture.len(), 3);
    assert!(furniture.iter().all(|p| p.category == Category::Furniture));

    let laptops = products(&ctx, "/api/products/category/electronics?subcategory=laptops").await;
    assert_eq!(names(&laptops), ["Premium Laptop"]);

    let empty_filter = products(&ctx, "/api/products/category/electronics?subcategory=").await;
    assert_eq!(empty_filter.len(), 2);
}

#[tokio::test]
async fn test_unknown_category_is_empty_not_error() {
    let ctx = TestContext::new().await;
    assert!(products(&ctx, "/api/products/category/toys").await.is_empty());
    assert!(products(&ctx, "/api/products/category/Furniture").await.is_empty());
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_is_case_insensitive_over_name_and_description() {
    let ctx = TestContext::new().await;

    let by_name = products(&ctx, "/api/products/search?q=SOFA").await;
    assert_eq!(names(&by_name), ["Modern Sofa"]);

    let by_description = products(&ctx, "/api/products/search?q=king-size").await;
    assert_eq!(names(&by_description), ["Premium Bed"]);

    let trimmed = products(&ctx, "/api/products/search?q=%20%20premium%20").await;
    assert_eq!(names(&trimmed), ["Premium Bed", "Premium Laptop"]);

    let none = products(&ctx, "/api/products/search?q=toaster").await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_blank_search_is_rejected() {
    let ctx = TestContext::new().await;

    for path in ["/api/products/search", "/api/products/search?q=", "/api/products/search?q=%20%20"] {
        let resp = ctx.get(path).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "GET {path}");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["message"], "Search query required");
    }
}

// =============================================================================
// Single product
// =============================================================================

#[tokio::test]
async fn test_get_product_by_id() {
    let ctx = TestContext::new().await;
    let all = products(&ctx, "/api/products").await;
    let bed = all.iter().find(|p| p.name == "Premium Bed").unwrap();

    let resp = ctx.get(&format!("/api/products/{}", bed.id)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Product = resp.json().await.unwrap();
    assert_eq!(&fetched, bed);
}

#[tokio::test]
async fn test_get_missing_product_is_not_found() {
    let ctx = TestContext::new().await;

    for path in ["/api/products/9999", "/api/products/not-a-number"] {
        let resp = ctx.get(path).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {path}");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["message"], "Product not found");
    }
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let ctx = TestContext::empty().await;
    let resp = ctx.get("/api/products").await;
    assert!(resp.headers().contains_key("x-request-id"));
}
