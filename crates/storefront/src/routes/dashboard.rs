//! Seller dashboard route handlers.
//!
//! Every handler here takes [`RequireSeller`] and reads one consistent
//! snapshot of the tables; product management lives in
//! [`super::products`].

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use chrono::Utc;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireSeller;
use crate::models::{Product, User};
use crate::services::analytics::{
    self, ActivityItem, DashboardStats, EnrichedProduct, OrderLine, RECENT_ACTIVITY_LIMIT,
    SellerAnalytics, TOP_PRODUCTS_LIMIT, TagCount,
};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Seller shown in the dashboard header.
#[derive(Debug, Clone)]
pub struct SellerView {
    pub username: String,
    pub email: String,
    pub plan: String,
    pub verified: bool,
}

impl From<&User> for SellerView {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.to_string(),
            email: user.email.to_string(),
            plan: user.plan.to_string(),
            verified: user.verified,
        }
    }
}

/// Headline numbers.
#[derive(Debug, Clone)]
pub struct StatsView {
    pub total_revenue: String,
    pub total_sales: usize,
    pub active_products: usize,
}

impl From<&DashboardStats> for StatsView {
    fn from(stats: &DashboardStats) -> Self {
        Self {
            total_revenue: stats.total_revenue.to_string(),
            total_sales: stats.total_sales,
            active_products: stats.active_products,
        }
    }
}

/// Activity feed entry.
#[derive(Debug, Clone)]
pub struct ActivityView {
    pub title: String,
    pub amount: String,
    pub time_ago: String,
}

impl From<&ActivityItem> for ActivityView {
    fn from(item: &ActivityItem) -> Self {
        Self {
            title: item.title.clone(),
            amount: item.amount.to_string(),
            time_ago: item.time_ago.clone(),
        }
    }
}

/// A product row with its derived figures.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub id: String,
    pub title: String,
    pub kind: String,
    pub kind_label: String,
    pub price: String,
    pub price_plain: String,
    pub status: String,
    pub is_published: bool,
    pub bpm: Option<String>,
    pub key: Option<String>,
    pub format: String,
    pub file_size: String,
    pub description: String,
    pub image: Option<String>,
    pub tags: Vec<String>,
    pub created_at: String,
    pub downloads: usize,
    pub revenue: String,
    pub views: usize,
}

impl ProductRowView {
    /// A row without sales figures.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            kind: product.kind.as_str().to_string(),
            kind_label: product.kind.label().to_string(),
            price: product.price.to_string(),
            price_plain: product.price.plain(),
            status: product.status.to_string(),
            is_published: product.status.is_published(),
            bpm: product.bpm.clone(),
            key: product.key.clone(),
            format: product.format.clone(),
            file_size: product.file_size.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            tags: product.tags.clone(),
            created_at: product.created_at.format("%b %-d, %Y").to_string(),
            downloads: 0,
            revenue: String::new(),
            views: 0,
        }
    }
}

impl From<&EnrichedProduct> for ProductRowView {
    fn from(enriched: &EnrichedProduct) -> Self {
        Self {
            downloads: enriched.downloads,
            revenue: enriched.revenue.to_string(),
            views: enriched.views,
            ..Self::from_product(&enriched.product)
        }
    }
}

/// Order table row.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: String,
    pub product_id: String,
    pub product_title: String,
    pub buyer_email: String,
    pub amount: String,
    pub status: String,
    pub created_at: String,
}

impl From<&OrderLine> for OrderView {
    fn from(line: &OrderLine) -> Self {
        Self {
            id: line.order.id.to_string(),
            product_id: line.order.product_id.to_string(),
            product_title: line.product_title.clone(),
            buyer_email: line.order.buyer_email.to_string(),
            amount: line.order.amount.to_string(),
            status: line.order.status.to_string(),
            created_at: line.order.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Seller analytics figures.
#[derive(Debug, Clone)]
pub struct AnalyticsView {
    pub total_revenue: String,
    pub total_sales: usize,
    pub total_views: usize,
    pub conversion_rate: String,
    pub average_order_value: String,
    pub best_product: Option<String>,
}

impl From<&SellerAnalytics> for AnalyticsView {
    fn from(analytics: &SellerAnalytics) -> Self {
        Self {
            total_revenue: analytics.total_revenue.to_string(),
            total_sales: analytics.total_sales,
            total_views: analytics.total_views,
            conversion_rate: format!("{:.1}%", analytics.conversion_rate),
            average_order_value: analytics.average_order_value.to_string(),
            best_product: analytics.best_product.clone(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Dashboard overview template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub seller: SellerView,
    pub stats: StatsView,
    pub recent_activity: Vec<ActivityView>,
    pub top_products: Vec<ProductRowView>,
}

/// Seller analytics template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/analytics.html")]
pub struct AnalyticsTemplate {
    pub seller: SellerView,
    pub analytics: AnalyticsView,
    pub top_products: Vec<ProductRowView>,
    pub popular_tags: Vec<TagCount>,
}

/// Seller orders template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/orders.html")]
pub struct OrdersTemplate {
    pub seller: SellerView,
    pub orders: Vec<OrderView>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the dashboard overview.
#[instrument(skip_all, fields(seller = %seller.username))]
pub async fn index(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
) -> Result<DashboardTemplate> {
    let snapshot = state.repository().snapshot()?;
    let username = &seller.username;

    let stats = analytics::dashboard_stats(&snapshot, username);
    let activity =
        analytics::recent_activity(&snapshot, username, Utc::now(), RECENT_ACTIVITY_LIMIT);
    let top = analytics::top_products(&snapshot, username, TOP_PRODUCTS_LIMIT);

    Ok(DashboardTemplate {
        seller: SellerView::from(&seller),
        stats: StatsView::from(&stats),
        recent_activity: activity.iter().map(ActivityView::from).collect(),
        top_products: top.iter().map(ProductRowView::from).collect(),
    })
}

/// Display seller analytics.
#[instrument(skip_all, fields(seller = %seller.username))]
pub async fn analytics(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
) -> Result<AnalyticsTemplate> {
    let snapshot = state.repository().snapshot()?;
    let report = analytics::seller_analytics(&snapshot, &seller.username);

    Ok(AnalyticsTemplate {
        seller: SellerView::from(&seller),
        analytics: AnalyticsView::from(&report),
        top_products: report.top_products.iter().map(ProductRowView::from).collect(),
        popular_tags: report.popular_tags,
    })
}

/// Display the seller's orders.
#[instrument(skip_all, fields(seller = %seller.username))]
pub async fn orders(
    State(state): State<AppState>,
    RequireSeller(seller): RequireSeller,
) -> Result<OrdersTemplate> {
    let snapshot = state.repository().snapshot()?;
    let lines = analytics::seller_orders(&snapshot, &seller.username);

    Ok(OrdersTemplate {
        seller: SellerView::from(&seller),
        orders: lines.iter().map(OrderView::from).collect(),
    })
}
