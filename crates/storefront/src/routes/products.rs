//! Seller product management route handlers.
//!
//! Mounted under `/dashboard/products`. Every handler resolves the product
//! through [`catalog`], so an unknown ID yields 404 and a product owned by
//! another seller yields 403 before anything else happens.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{FromRequest, Multipart, Path, Request, State},
    http::header::CONTENT_TYPE,
    response::Redirect,
};
use tracing::instrument;

use kitzz_core::{ProductId, ProductKind};

use super::dashboard::{ProductRowView, SellerView, StatsView};
use crate::error::{AppError, Result};
use crate::middleware::RequireSeller;
use crate::services::analytics;
use crate::services::catalog::{self, ProductUpdate};
use crate::state::AppState;

const PRODUCTS_PATH: &str = "/dashboard/products";

// =============================================================================
// Form Types
// =============================================================================

/// Submitted product edit form, urlencoded or multipart.
///
/// File parts (the cover image upload) are read and discarded.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub fields: HashMap<String, String>,
}

impl<S> FromRequest<S> for ProductForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            return Ok(Self {
                fields: pairs.into_iter().collect(),
            });
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        let mut fields = HashMap::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to parse multipart data: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();
            if let Some(file_name) = field.file_name().map(str::to_owned) {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                tracing::debug!(
                    field = %name,
                    file_name = %file_name,
                    size = bytes.len(),
                    "Discarding uploaded file"
                );
                continue;
            }
            let value = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read field {name}: {e}")))?;
            fields.insert(name, value);
        }

        Ok(Self { fields })
    }
}

// =============================================================================
// View Types
// =============================================================================

/// Option in the product type select.
#[derive(Debug, Clone)]
pub struct KindOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn kind_options(current: ProductKind) -> Vec<KindOption> {
    ProductKind::ALL
        .iter()
        .map(|kind| KindOption {
            value: kind.as_str(),
            label: kind.label(),
            selected: *kind == current,
        })
        .collect()
}

/// Single-product figures.
#[derive(Debug, Clone)]
pub struct ProductAnalyticsView {
    pub total_revenue: String,
    pub total_sales: usize,
    pub total_views: usize,
    pub conversion_rate: String,
    pub average_order_value: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Seller product list template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/products.html")]
pub struct ProductsTemplate {
    pub seller: SellerView,
    pub stats: StatsView,
    pub products: Vec<ProductRowView>,
}

/// Product edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/product_edit.html")]
pub struct ProductEditTemplate {
    pub seller: SellerView,
    pub product: ProductRowView,
    pub kinds: Vec<KindOption>,
}

/// Delete confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/product_delete.html")]
pub struct ProductDeleteTemplate {
    pub seller: SellerView,
    pub product: ProductRowView,
}

/// Product analytics template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/product_analytics.html")]
pub struct ProductAnalyticsTemplate {
    pub seller: SellerView,
    pub product: ProductRowView,
    pub analytics: ProductAnalyticsView,
}

// =============================================================================
// Handlers
// =============================================================================

/// List the seller's products with their sales figures.
#[instrument(skip_all, fields(seller = %seller.username))]
pub async fn index(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
) -> Result<ProductsTemplate> {
    let snapshot = state.repository().snapshot()?;
    let products = analytics::enrich_products_with_stats(&snapshot, &seller.username);
    let stats = analytics::dashboard_stats(&snapshot, &seller.username);

    Ok(ProductsTemplate {
        seller: SellerView::from(&seller),
        stats: StatsView::from(&stats),
        products: products.iter().map(ProductRowView::from).collect(),
    })
}

/// Display the edit form for one product.
#[instrument(skip_all, fields(seller = %seller.username, product_id = %id))]
pub async fn edit(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Path(id): Path<String>,
) -> Result<ProductEditTemplate> {
    let product = catalog::owned_product(state.repository(), &ProductId::new(id), &seller.username)?;
    let snapshot = state.repository().snapshot()?;
    let enriched = analytics::enrich_product(&snapshot, &product);

    Ok(ProductEditTemplate {
        seller: SellerView::from(&seller),
        kinds: kind_options(product.kind),
        product: ProductRowView::from(&enriched),
    })
}

/// Apply the edit form.
///
/// The body is read only after the ownership check, so an unknown or
/// foreign product is reported before any form error.
#[instrument(skip_all, fields(seller = %seller.username, product_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Path(id): Path<String>,
    request: Request,
) -> Result<Redirect> {
    let id = ProductId::new(id);
    catalog::owned_product(state.repository(), &id, &seller.username)?;

    let form = ProductForm::from_request(request, &state).await?;
    let update = ProductUpdate::from_fields(&form.fields)?;
    let product = catalog::update_product(state.repository(), &id, &seller.username, &update)?;

    tracing::info!(product_id = %product.id, status = %product.status, "Product updated");
    Ok(Redirect::to(PRODUCTS_PATH))
}

/// Ask for confirmation before deleting a product.
#[instrument(skip_all, fields(seller = %seller.username, product_id = %id))]
pub async fn confirm_delete(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Path(id): Path<String>,
) -> Result<ProductDeleteTemplate> {
    let product = catalog::owned_product(state.repository(), &ProductId::new(id), &seller.username)?;
    let snapshot = state.repository().snapshot()?;
    let enriched = analytics::enrich_product(&snapshot, &product);

    Ok(ProductDeleteTemplate {
        seller: SellerView::from(&seller),
        product: ProductRowView::from(&enriched),
    })
}

/// Delete a product. Its orders are kept.
#[instrument(skip_all, fields(seller = %seller.username, product_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let removed = catalog::delete_product(state.repository(), &ProductId::new(id), &seller.username)?;

    tracing::info!(product_id = %removed.id, title = %removed.title, "Product deleted");
    Ok(Redirect::to(PRODUCTS_PATH))
}

/// Display figures for one product.
#[instrument(skip_all, fields(seller = %seller.username, product_id = %id))]
pub async fn analytics(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
    Path(id): Path<String>,
) -> Result<ProductAnalyticsTemplate> {
    let product = catalog::owned_product(state.repository(), &ProductId::new(id), &seller.username)?;
    let snapshot = state.repository().snapshot()?;
    let figures = analytics::product_analytics(&snapshot, &product);
    let enriched = analytics::enrich_product(&snapshot, &product);

    Ok(ProductAnalyticsTemplate {
        seller: SellerView::from(&seller),
        product: ProductRowView::from(&enriched),
        analytics: ProductAnalyticsView {
            total_revenue: figures.total_revenue.to_string(),
            total_sales: figures.total_sales,
            total_views: figures.total_views,
            conversion_rate: format!("{:.1}%", figures.conversion_rate),
            average_order_value: figures.average_order_value.to_string(),
        },
    })
}
