//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                    - Landing page
//! GET  /signup                              - Signup page
//! GET  /profile/{username}                  - Seller profile
//! GET  /profile/{username}/product/{id}     - Product detail
//!
//! # Dashboard (requires a seller)
//! GET  /dashboard                           - Overview
//! GET  /dashboard/analytics                 - Seller analytics
//! GET  /dashboard/orders                    - Orders
//! GET  /dashboard/products                  - Product list
//! GET  /dashboard/products/{id}             - Edit form
//! POST /dashboard/products/{id}             - Apply edit
//! GET  /dashboard/products/{id}/delete      - Delete confirmation
//! POST /dashboard/products/{id}/delete      - Delete
//! GET  /dashboard/products/{id}/analytics   - Product analytics
//!
//! # Auth (stub)
//! POST /auth/register                       - Accept registration
//! POST /auth/login                          - Issue placeholder token
//! ```

pub mod auth;
pub mod dashboard;
pub mod home;
pub mod products;
pub mod profile;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

/// Create the seller product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::edit).post(products::update))
        .route(
            "/{id}/delete",
            get(products::confirm_delete).post(products::delete),
        )
        .route("/{id}/analytics", get(products::analytics))
}

/// Create the dashboard routes router.
pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/analytics", get(dashboard::analytics))
        .route("/orders", get(dashboard::orders))
        .nest("/products", product_routes())
}

/// Create the public profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/{username}", get(profile::show))
        .route("/{username}/product/{product_id}", get(profile::product))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/signup", get(home::signup))
        .nest("/profile", profile_routes())
        .nest("/dashboard", dashboard_routes())
        .nest("/auth", auth_routes())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::Utc;

    use crate::config::StorefrontConfig;
    use crate::db::{MemoryRepository, Repository, seed::demo_tables};
    use crate::state::AppState;

    fn server_with(dev_seller: Option<&str>) -> (TestServer, Arc<MemoryRepository>) {
        let dev_seller = dev_seller.map(str::to_string);
        let config = StorefrontConfig::from_lookup(|key| match key {
            "KITZZ_DEV_SELLER" => dev_seller.clone(),
            _ => None,
        })
        .unwrap();
        let repository = Arc::new(MemoryRepository::with_tables(demo_tables(Utc::now()).unwrap()));
        let state = AppState::new(config, repository.clone());
        (TestServer::new(crate::app(state)).unwrap(), repository)
    }

    #[tokio::test]
    async fn test_dashboard_lists_demo_activity() {
        let (server, _) = server_with(Some("producerboy"));
        let response = server.get("/dashboard").await;
        response.assert_status_ok();
        let body = response.text();
        assert!(body.contains("$37.95"));
        assert!(body.contains("New sale: Dark Melody Loop"));
        assert!(body.contains("2 minutes ago"));
    }

    #[tokio::test]
    async fn test_dashboard_requires_seller() {
        let (server, _) = server_with(None);
        server
            .get("/dashboard")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_dev_seller_is_unauthorized() {
        let (server, _) = server_with(Some("ghost"));
        server
            .get("/dashboard/products")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_product_redirects_and_persists() {
        let (server, repository) = server_with(Some("producerboy"));
        let response = server
            .post("/dashboard/products/2")
            .form(&[
                ("title", "Harder 808"),
                ("price", "2.49"),
                ("type", "sample"),
                ("published", "on"),
            ])
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/dashboard/products");

        let product = repository
            .products()
            .get(&kitzz_core::ProductId::new("2"))
            .unwrap()
            .unwrap();
        assert_eq!(product.title, "Harder 808");
        assert_eq!(product.price.plain(), "2.49");
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_price() {
        let (server, _) = server_with(Some("producerboy"));
        let response = server
            .post("/dashboard/products/1")
            .form(&[("price", "cheap")])
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "Bad request: Invalid price");
    }

    #[tokio::test]
    async fn test_multipart_update_discards_image() {
        use axum_test::multipart::{MultipartForm, Part};

        let (server, repository) = server_with(Some("producerboy"));
        let form = MultipartForm::new()
            .add_text("title", "Dark Melody Loop (Remastered)")
            .add_text("bpm", "")
            .add_part("image", Part::bytes(vec![0_u8; 16]).file_name("cover.png"));
        server
            .post("/dashboard/products/1")
            .multipart(form)
            .await
            .assert_status(StatusCode::SEE_OTHER);

        let product = repository
            .products()
            .get(&kitzz_core::ProductId::new("1"))
            .unwrap()
            .unwrap();
        assert_eq!(product.title, "Dark Melody Loop (Remastered)");
        assert_eq!(product.bpm, None);
        assert_eq!(product.image, None);
        assert!(!product.status.is_published());
    }

    #[tokio::test]
    async fn test_delete_flow() {
        let (server, repository) = server_with(Some("producerboy"));

        let confirm = server.get("/dashboard/products/3/delete").await;
        confirm.assert_status_ok();
        let body = confirm.text();
        assert!(body.contains("Delete Trap Drums Vol.1?"));
        assert!(body.contains("1 sales records are retained but no longer listed"));
        assert_eq!(repository.products().list().unwrap().len(), 4);

        server
            .post("/dashboard/products/3/delete")
            .await
            .assert_status(StatusCode::SEE_OTHER);
        assert_eq!(repository.products().list().unwrap().len(), 3);
        assert_eq!(repository.orders().list().unwrap().len(), 5);

        server
            .get("/dashboard/products/3")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_profile_pages() {
        let (server, _) = server_with(None);

        let profile = server.get("/profile/producerboy").await;
        profile.assert_status_ok();
        assert!(profile.text().contains("4 products"));

        server
            .get("/profile/nobody")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let product = server.get("/profile/producerboy/product/3").await;
        product.assert_status_ok();
        assert!(product.text().contains("Trap Drums Vol.1"));

        let foreign = server.get("/profile/someoneelse/product/3").await;
        foreign.assert_status_ok();
        let body = foreign.text();
        assert!(body.contains("Trap Drums Vol.1"));
        assert!(!body.contains("More from"));

        server
            .get("/profile/producerboy/product/99")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (server, _) = server_with(None);
        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "ok");
        server.get("/health/ready").await.assert_status_ok();
    }
}
