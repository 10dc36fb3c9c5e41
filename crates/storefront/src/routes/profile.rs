//! Public seller profile and product pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use kitzz_core::{ProductId, Username};

use super::dashboard::ProductRowView;
use crate::error::{AppError, Result};
use crate::middleware::OptionalSeller;
use crate::models::User;
use crate::services::catalog::{self, RELATED_PRODUCTS_LIMIT};
use crate::state::AppState;

/// Public view of a seller.
#[derive(Debug, Clone)]
pub struct ProfileUserView {
    pub username: String,
    pub plan: String,
    pub verified: bool,
    pub member_since: String,
}

impl From<&User> for ProfileUserView {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.to_string(),
            plan: user.plan.to_string(),
            verified: user.verified,
            member_since: user.created_at.format("%B %Y").to_string(),
        }
    }
}

/// Seller profile template.
#[derive(Template, WebTemplate)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub profile_user: ProfileUserView,
    pub total_products: usize,
    pub products: Vec<ProductRowView>,
    pub is_own_profile: bool,
    pub viewer: Option<String>,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductTemplate {
    pub product: ProductRowView,
    pub creator: Option<ProfileUserView>,
    pub owner: String,
    pub related_products: Vec<ProductRowView>,
    pub viewer: Option<String>,
}

/// Display a seller's profile with every product they list.
#[instrument(skip_all, fields(username = %username))]
pub async fn show(
    State(state): State<AppState>,
    OptionalSeller(viewer): OptionalSeller,
    Path(username): Path<String>,
) -> Result<ProfileTemplate> {
    let username =
        Username::parse(&username).map_err(|_| AppError::NotFound("User not found".to_string()))?;
    let user = state
        .repository()
        .users()
        .get(&username)?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let products = state.repository().products().list_by_owner(&username)?;

    Ok(ProfileTemplate {
        profile_user: ProfileUserView::from(&user),
        total_products: products.len(),
        products: products.iter().map(ProductRowView::from_product).collect(),
        is_own_profile: viewer.as_ref() == Some(&username),
        viewer: viewer.map(|v| v.to_string()),
    })
}

/// Display a product under the profile named in the path.
///
/// Only the product ID decides 404. The creator and related products come
/// from the path username, so either may be empty.
#[instrument(skip_all, fields(username = %username, product_id = %product_id))]
pub async fn product(
    State(state): State<AppState>,
    OptionalSeller(viewer): OptionalSeller,
    Path((username, product_id)): Path<(String, String)>,
) -> Result<ProductTemplate> {
    let id = ProductId::new(product_id);
    let product = catalog::storefront_product(state.repository(), &id)?;

    let (creator, related) = match Username::parse(&username) {
        Ok(profile) => (
            state.repository().users().get(&profile)?,
            catalog::related_products(state.repository(), &profile, &id, RELATED_PRODUCTS_LIMIT)?,
        ),
        Err(_) => (None, Vec::new()),
    };

    Ok(ProductTemplate {
        product: ProductRowView::from_product(&product),
        creator: creator.as_ref().map(ProfileUserView::from),
        owner: username,
        related_products: related.iter().map(ProductRowView::from_product).collect(),
        viewer: viewer.map(|v| v.to_string()),
    })
}
