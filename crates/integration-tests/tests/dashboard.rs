//! Seller dashboard integration tests.
//!
//! Every test acts as the demo seller through the development fallback
//! identity unless it says otherwise.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;

use kitzz_core::{Email, Plan, Price, ProductId, ProductKind, ProductStatus, Username};
use kitzz_integration_tests::TestContext;
use kitzz_storefront::db::Repository;
use kitzz_storefront::models::{Product, User};

const SELLER: &str = "producerboy";

/// Add a second seller owning product `"rival-1"`.
fn add_rival(ctx: &TestContext) {
    let username = Username::parse("beatmaker").unwrap();
    let repository: &dyn Repository = ctx.repository.as_ref();
    repository
        .users()
        .insert(User {
            username: username.clone(),
            email: Email::parse("beatmaker@example.com").unwrap(),
            verified: true,
            plan: Plan::Starter,
            payment_account_id: None,
            created_at: Utc::now(),
        })
        .unwrap();
    repository
        .products()
        .insert(Product {
            id: ProductId::new("rival-1"),
            title: "Lofi Keys".to_string(),
            kind: ProductKind::Loop,
            price: Price::from_cents(399),
            bpm: Some("90".to_string()),
            key: None,
            format: "WAV".to_string(),
            file_size: "3.1 MB".to_string(),
            description: "Dusty keys".to_string(),
            image: None,
            tags: vec!["lofi".to_string()],
            owner: username,
            status: ProductStatus::Published,
            slug: "lofi-keys".to_string(),
            created_at: Utc::now(),
        })
        .unwrap();
}

// =============================================================================
// Overview Pages
// =============================================================================

#[tokio::test]
async fn test_dashboard_overview() {
    let ctx = TestContext::demo(Some(SELLER)).unwrap();
    let response = ctx.server.get("/dashboard").await;
    response.assert_status_ok();

    let body = response.text();
    assert!(body.contains("$37.95"));
    assert!(body.contains("New sale: Dark Melody Loop"));
}

#[tokio::test]
async fn test_dashboard_requires_seller() {
    let ctx = TestContext::demo(None).unwrap();
    for path in ["/dashboard", "/dashboard/orders", "/dashboard/products/1"] {
        ctx.server
            .get(path)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_orders_page_lists_seller_orders() {
    let ctx = TestContext::demo(Some(SELLER)).unwrap();
    let response = ctx.server.get("/dashboard/orders").await;
    response.assert_status_ok();

    let body = response.text();
    for id in ["ORD-001", "ORD-002", "ORD-003", "ORD-004", "ORD-005"] {
        assert!(body.contains(id), "missing {id}");
    }
    assert!(body.contains("customer1@example.com"));
}

#[tokio::test]
async fn test_analytics_pages() {
    let ctx = TestContext::demo(Some(SELLER)).unwrap();

    let seller = ctx.server.get("/dashboard/analytics").await;
    seller.assert_status_ok();
    let body = seller.text();
    assert!(body.contains("$7.59"));
    assert!(body.contains("Trap Drums Vol.1"));

    let product = ctx.server.get("/dashboard/products/1/analytics").await;
    product.assert_status_ok();
    assert!(product.text().contains("$9.98"));
}

// =============================================================================
// Ownership
// =============================================================================

#[tokio::test]
async fn test_foreign_product_is_forbidden() {
    let ctx = TestContext::demo(Some(SELLER)).unwrap();
    add_rival(&ctx);

    for path in [
        "/dashboard/products/rival-1",
        "/dashboard/products/rival-1/delete",
        "/dashboard/products/rival-1/analytics",
    ] {
        ctx.server
            .get(path)
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    ctx.server
        .post("/dashboard/products/rival-1")
        .form(&[("title", "Stolen"), ("price", "not a price")])
        .await
        .assert_status(StatusCode::FORBIDDEN);
    ctx.server
        .post("/dashboard/products/rival-1/delete")
        .await
        .assert_status(StatusCode::FORBIDDEN);
    ctx.server
        .post("/dashboard/products/rival-1")
        .json(&json!({ "title": "Stolen" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let product = ctx
        .repository
        .products()
        .get(&ProductId::new("rival-1"))
        .unwrap()
        .unwrap();
    assert_eq!(product.title, "Lofi Keys");
}

#[tokio::test]
async fn test_product_list_excludes_other_sellers() {
    let ctx = TestContext::demo(Some(SELLER)).unwrap();
    add_rival(&ctx);

    let response = ctx.server.get("/dashboard/products").await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Hard 808"));
    assert!(!body.contains("Lofi Keys"));
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let ctx = TestContext::demo(Some(SELLER)).unwrap();
    ctx.server
        .get("/dashboard/products/99")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    ctx.server
        .post("/dashboard/products/99/delete")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    ctx.server
        .post("/dashboard/products/99")
        .json(&json!({ "title": "Ghost" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rejects_unreadable_body_for_owned_product() {
    let ctx = TestContext::demo(Some(SELLER)).unwrap();
    ctx.server
        .post("/dashboard/products/1")
        .json(&json!({ "title": "Renamed" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let product = ctx
        .repository
        .products()
        .get(&ProductId::new("1"))
        .unwrap()
        .unwrap();
    assert_eq!(product.title, "Dark Melody Loop");
}

// =============================================================================
// Edit and Delete
// =============================================================================

#[tokio::test]
async fn test_update_publishes_draft() {
    let ctx = TestContext::demo(Some(SELLER)).unwrap();
    let response = ctx
        .server
        .post("/dashboard/products/4")
        .form(&[
            ("title", "Chill Guitar Loop"),
            ("price", "6.50"),
            ("type", "loop"),
            ("bpm", "90"),
            ("key", "Em"),
            ("published", "on"),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/dashboard/products");

    let product = ctx
        .repository
        .products()
        .get(&ProductId::new("4"))
        .unwrap()
        .unwrap();
    assert!(product.status.is_published());
    assert_eq!(product.price.plain(), "6.50");
    assert_eq!(product.bpm.as_deref(), Some("90"));
    assert_eq!(product.key.as_deref(), Some("Em"));
}

#[tokio::test]
async fn test_update_rejects_invalid_input() {
    let ctx = TestContext::demo(Some(SELLER)).unwrap();

    let price = ctx
        .server
        .post("/dashboard/products/1")
        .form(&[("price", "-1")])
        .await;
    price.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(price.text(), "Bad request: Invalid price");

    ctx.server
        .post("/dashboard/products/1")
        .form(&[("type", "vocal")])
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let product = ctx
        .repository
        .products()
        .get(&ProductId::new("1"))
        .unwrap()
        .unwrap();
    assert_eq!(product.price, Price::from_cents(499));
}

#[tokio::test]
async fn test_delete_keeps_orders() {
    let ctx = TestContext::demo(Some(SELLER)).unwrap();

    ctx.server
        .post("/dashboard/products/1/delete")
        .await
        .assert_status(StatusCode::SEE_OTHER);

    assert_eq!(ctx.repository.products().list().unwrap().len(), 3);
    assert_eq!(ctx.repository.orders().list().unwrap().len(), 5);

    let dashboard = ctx.server.get("/dashboard").await;
    dashboard.assert_status_ok();
    assert!(dashboard.text().contains("$27.97"));

    let orders = ctx.server.get("/dashboard/orders").await.text();
    assert!(!orders.contains("ORD-001"));
    assert!(orders.contains("ORD-002"));
}
