//! Seller-facing aggregations.
//!
//! Everything here is a pure function over a [`Snapshot`]. Nothing is
//! cached: downloads, revenue and views are derived from the orders table
//! on every call, so a figure can never drift from the rows it summarizes.
//!
//! # Derivations
//!
//! - a product's downloads and sales count are the number of orders
//!   referencing it; revenue is the sum of their amounts
//! - views are estimated as [`VIEWS_PER_DOWNLOAD`] × downloads
//! - orders whose product has been deleted are never attributed to anyone

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use kitzz_core::{Price, ProductId, Username};

use crate::db::Snapshot;
use crate::models::{Order, Product};

/// Estimated product page views per download.
pub const VIEWS_PER_DOWNLOAD: usize = 3;

/// Entries shown in the dashboard activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Entries shown in the dashboard "top products" card.
pub const TOP_PRODUCTS_LIMIT: usize = 3;

/// Entries in the analytics page revenue ranking.
pub const TOP_BY_REVENUE_LIMIT: usize = 5;

/// Entries in the analytics page tag cloud.
pub const POPULAR_TAGS_LIMIT: usize = 8;

// =============================================================================
// Result types
// =============================================================================

/// Headline numbers for a seller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_revenue: Price,
    pub total_sales: usize,
    /// Owned products, drafts included.
    pub active_products: usize,
}

/// One sale in the activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityItem {
    /// `"New sale: {product title}"`.
    pub title: String,
    pub amount: Price,
    pub created_at: DateTime<Utc>,
    /// Relative time, e.g. `"2 minutes ago"`.
    pub time_ago: String,
}

/// A product together with the figures derived from its orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedProduct {
    pub product: Product,
    pub downloads: usize,
    pub sales_count: usize,
    pub revenue: Price,
    pub views: usize,
}

/// How often a tag appears across a seller's products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// The seller analytics page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerAnalytics {
    pub total_revenue: Price,
    pub total_sales: usize,
    pub total_views: usize,
    /// Sales per view, as a percentage.
    pub conversion_rate: Decimal,
    pub average_order_value: Price,
    /// Title of the highest-earning product.
    pub best_product: Option<String>,
    pub top_products: Vec<EnrichedProduct>,
    pub popular_tags: Vec<TagCount>,
}

/// Figures for a single product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductAnalytics {
    pub total_revenue: Price,
    pub total_sales: usize,
    pub total_views: usize,
    pub conversion_rate: Decimal,
    /// The product's list price.
    pub average_order_value: Price,
}

/// An order joined to the title of the product sold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub order: Order,
    pub product_title: String,
}

// =============================================================================
// Aggregations
// =============================================================================

fn owned_ids<'a>(snapshot: &'a Snapshot, username: &'a Username) -> HashSet<&'a ProductId> {
    snapshot
        .owned_products(username)
        .map(|product| &product.id)
        .collect()
}

fn owned_orders<'a>(
    snapshot: &'a Snapshot,
    username: &'a Username,
) -> impl Iterator<Item = &'a Order> + 'a {
    let owned = owned_ids(snapshot, username);
    snapshot
        .orders
        .iter()
        .filter(move |order| owned.contains(&order.product_id))
}

/// Sales per view as a percentage, or zero when there were no views.
fn conversion_rate(sales: usize, views: usize) -> Decimal {
    if views == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(sales) / Decimal::from(views) * Decimal::ONE_HUNDRED
}

/// Revenue, sales and product count across everything `username` owns.
#[must_use]
pub fn dashboard_stats(snapshot: &Snapshot, username: &Username) -> DashboardStats {
    let (total_revenue, total_sales) = owned_orders(snapshot, username)
        .fold((Price::ZERO, 0), |(revenue, sales), order| {
            (revenue + order.amount, sales + 1)
        });

    DashboardStats {
        total_revenue,
        total_sales,
        active_products: snapshot.owned_products(username).count(),
    }
}

/// The most recent sales of `username`'s products, newest first.
#[must_use]
pub fn recent_activity(
    snapshot: &Snapshot,
    username: &Username,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<ActivityItem> {
    let mut sales: Vec<(&Order, &Product)> = owned_orders(snapshot, username)
        .filter_map(|order| {
            snapshot
                .product(&order.product_id)
                .map(|product| (order, product))
        })
        .collect();
    sales.sort_by(|(a, _), (b, _)| b.created_at.cmp(&a.created_at));
    sales.truncate(limit);

    sales
        .into_iter()
        .map(|(order, product)| ActivityItem {
            title: format!("New sale: {}", product.title),
            amount: order.amount,
            created_at: order.created_at,
            time_ago: time_ago(now, order.created_at),
        })
        .collect()
}

/// Format the time elapsed since `then` at day, hour or minute granularity.
///
/// Timestamps in the future count as no time elapsed.
#[must_use]
pub fn time_ago(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let elapsed = (now - then).max(Duration::zero());

    let days = elapsed.num_days();
    if days >= 1 {
        return ago(days, "day");
    }
    let hours = elapsed.num_hours();
    if hours >= 1 {
        return ago(hours, "hour");
    }
    ago(elapsed.num_minutes(), "minute")
}

fn ago(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Derive download, revenue and view figures for one product.
#[must_use]
pub fn enrich_product(snapshot: &Snapshot, product: &Product) -> EnrichedProduct {
    let (revenue, downloads) = snapshot
        .orders_for(&product.id)
        .fold((Price::ZERO, 0), |(revenue, count), order| {
            (revenue + order.amount, count + 1)
        });

    EnrichedProduct {
        product: product.clone(),
        downloads,
        sales_count: downloads,
        revenue,
        views: downloads * VIEWS_PER_DOWNLOAD,
    }
}

/// Every product `username` owns, in listing order, with derived figures.
#[must_use]
pub fn enrich_products_with_stats(snapshot: &Snapshot, username: &Username) -> Vec<EnrichedProduct> {
    snapshot
        .owned_products(username)
        .map(|product| enrich_product(snapshot, product))
        .collect()
}

/// Best sellers by number of sales. Ties keep listing order.
#[must_use]
pub fn top_products(snapshot: &Snapshot, username: &Username, limit: usize) -> Vec<EnrichedProduct> {
    let mut products = enrich_products_with_stats(snapshot, username);
    products.sort_by(|a, b| b.sales_count.cmp(&a.sales_count));
    products.truncate(limit);
    products
}

/// The seller analytics page.
#[must_use]
pub fn seller_analytics(snapshot: &Snapshot, username: &Username) -> SellerAnalytics {
    let products = enrich_products_with_stats(snapshot, username);

    let total_revenue: Price = products.iter().map(|p| p.revenue).sum();
    let total_sales: usize = products.iter().map(|p| p.downloads).sum();
    let total_views: usize = products.iter().map(|p| p.views).sum();
    let popular_tags = popular_tags(&products, POPULAR_TAGS_LIMIT);

    let mut by_revenue = products;
    by_revenue.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    let best_product = by_revenue.first().map(|p| p.product.title.clone());
    by_revenue.truncate(TOP_BY_REVENUE_LIMIT);

    SellerAnalytics {
        total_revenue,
        total_sales,
        total_views,
        conversion_rate: conversion_rate(total_sales, total_views),
        average_order_value: total_revenue.average_over(total_sales),
        best_product,
        top_products: by_revenue,
        popular_tags,
    }
}

/// Count tag occurrences, most frequent first. Ties keep first-seen order.
fn popular_tags(products: &[EnrichedProduct], limit: usize) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    for tag in products.iter().flat_map(|p| &p.product.tags) {
        match counts.iter_mut().find(|c| &c.tag == tag) {
            Some(entry) => entry.count += 1,
            None => counts.push(TagCount {
                tag: tag.clone(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Figures for a single product page.
#[must_use]
pub fn product_analytics(snapshot: &Snapshot, product: &Product) -> ProductAnalytics {
    let enriched = enrich_product(snapshot, product);
    ProductAnalytics {
        total_revenue: enriched.revenue,
        total_sales: enriched.downloads,
        total_views: enriched.views,
        conversion_rate: conversion_rate(enriched.downloads, enriched.views),
        average_order_value: product.price,
    }
}

/// Orders for `username`'s products, in order-table order.
#[must_use]
pub fn seller_orders(snapshot: &Snapshot, username: &Username) -> Vec<OrderLine> {
    snapshot
        .orders
        .iter()
        .filter_map(|order| {
            snapshot
                .product(&order.product_id)
                .filter(|product| product.is_owned_by(username))
                .map(|product| OrderLine {
                    order: order.clone(),
                    product_title: product.title.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kitzz_core::{Email, OrderId, OrderStatus, ProductKind, ProductStatus};

    use super::*;
    use crate::db::seed::{DEMO_SELLER, demo_tables};

    fn seller() -> Username {
        Username::parse(DEMO_SELLER).unwrap()
    }

    fn demo(now: DateTime<Utc>) -> Snapshot {
        let tables = demo_tables(now).unwrap();
        Snapshot {
            products: tables.products,
            orders: tables.orders,
        }
    }

    fn product(id: &str, owner: &str, cents: u32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            kind: ProductKind::Loop,
            price: Price::from_cents(cents),
            bpm: None,
            key: None,
            format: "WAV".to_string(),
            file_size: "1 MB".to_string(),
            description: String::new(),
            image: None,
            tags: Vec::new(),
            owner: Username::parse(owner).unwrap(),
            status: ProductStatus::Published,
            slug: format!("product-{id}"),
            created_at: Utc::now(),
        }
    }

    fn order(id: &str, product_id: &str, cents: u32, created_at: DateTime<Utc>) -> Order {
        Order {
            id: OrderId::new(id),
            product_id: ProductId::new(product_id),
            buyer_email: Email::parse("buyer@example.com").unwrap(),
            amount: Price::from_cents(cents),
            status: OrderStatus::Completed,
            created_at,
        }
    }

    #[test]
    fn test_dashboard_stats_single_sale() {
        let snapshot = Snapshot {
            products: vec![product("1", "producerboy", 499)],
            orders: vec![order("ORD-1", "1", 499, Utc::now())],
        };
        let stats = dashboard_stats(&snapshot, &seller());
        assert_eq!(stats.total_revenue, Price::from_cents(499));
        assert_eq!(stats.total_sales, 1);
        assert_eq!(stats.active_products, 1);
    }

    #[test]
    fn test_dashboard_stats_for_seller_without_products() {
        let snapshot = demo(Utc::now());
        let nobody = Username::parse("nobody").unwrap();
        let stats = dashboard_stats(&snapshot, &nobody);
        assert_eq!(
            stats,
            DashboardStats {
                total_revenue: Price::ZERO,
                total_sales: 0,
                active_products: 0,
            }
        );
    }

    #[test]
    fn test_dashboard_stats_demo() {
        let stats = dashboard_stats(&demo(Utc::now()), &seller());
        assert_eq!(stats.total_revenue, Price::from_cents(3795));
        assert_eq!(stats.total_sales, 5);
        assert_eq!(stats.active_products, 4);
    }

    #[test]
    fn test_orders_for_deleted_products_are_ignored() {
        let mut snapshot = demo(Utc::now());
        snapshot.products.retain(|p| p.id.as_str() != "1");

        let stats = dashboard_stats(&snapshot, &seller());
        assert_eq!(stats.total_sales, 3);
        assert_eq!(stats.total_revenue, Price::from_cents(2797));
        assert_eq!(seller_orders(&snapshot, &seller()).len(), 3);
        assert_eq!(snapshot.orders.len(), 5);
    }

    #[test]
    fn test_recent_activity_newest_first() {
        let now = Utc::now();
        let activity = recent_activity(&demo(now), &seller(), now, RECENT_ACTIVITY_LIMIT);

        let titles: Vec<&str> = activity.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "New sale: Dark Melody Loop",
                "New sale: Hard 808",
                "New sale: Chill Guitar Loop",
                "New sale: Trap Drums Vol.1",
                "New sale: Dark Melody Loop",
            ]
        );
        let times: Vec<&str> = activity.iter().map(|a| a.time_ago.as_str()).collect();
        assert_eq!(
            times,
            ["2 minutes ago", "8 hours ago", "15 hours ago", "1 day ago", "2 days ago"]
        );
        assert!(
            activity
                .windows(2)
                .all(|pair| pair[0].created_at >= pair[1].created_at)
        );
    }

    #[test]
    fn test_recent_activity_respects_limit() {
        let now = Utc::now();
        let activity = recent_activity(&demo(now), &seller(), now, 2);
        assert_eq!(activity.len(), 2);
        assert_eq!(activity[0].amount, Price::from_cents(499));
    }

    #[test]
    fn test_time_ago_granularity() {
        let now = Utc::now();
        assert_eq!(time_ago(now, now), "0 minutes ago");
        assert_eq!(time_ago(now, now - Duration::seconds(59)), "0 minutes ago");
        assert_eq!(time_ago(now, now - Duration::minutes(1)), "1 minute ago");
        assert_eq!(time_ago(now, now - Duration::minutes(59)), "59 minutes ago");
        assert_eq!(time_ago(now, now - Duration::minutes(61)), "1 hour ago");
        assert_eq!(time_ago(now, now - Duration::hours(23)), "23 hours ago");
        assert_eq!(time_ago(now, now - Duration::hours(25)), "1 day ago");
        assert_eq!(time_ago(now, now - Duration::days(40)), "40 days ago");
    }

    #[test]
    fn test_time_ago_future_timestamp() {
        let now = Utc::now();
        assert_eq!(time_ago(now, now + Duration::hours(3)), "0 minutes ago");
    }

    #[test]
    fn test_enrich_products_with_stats() {
        let enriched = enrich_products_with_stats(&demo(Utc::now()), &seller());
        let figures: Vec<(&str, usize, Price, usize)> = enriched
            .iter()
            .map(|e| (e.product.id.as_str(), e.downloads, e.revenue, e.views))
            .collect();
        assert_eq!(
            figures,
            [
                ("1", 2, Price::from_cents(998), 6),
                ("2", 1, Price::from_cents(199), 3),
                ("3", 1, Price::from_cents(1999), 3),
                ("4", 1, Price::from_cents(599), 3),
            ]
        );
        assert!(enriched.iter().all(|e| e.sales_count == e.downloads));
    }

    #[test]
    fn test_top_products_stable_by_sales() {
        let top = top_products(&demo(Utc::now()), &seller(), TOP_PRODUCTS_LIMIT);
        let ids: Vec<&str> = top.iter().map(|e| e.product.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);

        let none = top_products(&demo(Utc::now()), &seller(), 0);
        assert!(none.is_empty());
    }

    #[test]
    fn test_seller_analytics_demo() {
        let analytics = seller_analytics(&demo(Utc::now()), &seller());
        assert_eq!(analytics.total_revenue, Price::from_cents(3795));
        assert_eq!(analytics.total_sales, 5);
        assert_eq!(analytics.total_views, 15);
        assert_eq!(
            analytics.conversion_rate.round_dp(2),
            Decimal::new(3333, 2)
        );
        assert_eq!(analytics.average_order_value, Price::from_cents(759));
        assert_eq!(analytics.best_product.as_deref(), Some("Trap Drums Vol.1"));

        let ranking: Vec<&str> = analytics
            .top_products
            .iter()
            .map(|e| e.product.id.as_str())
            .collect();
        assert_eq!(ranking, ["3", "1", "4", "2"]);

        let tags: Vec<(&str, usize)> = analytics
            .popular_tags
            .iter()
            .map(|t| (t.tag.as_str(), t.count))
            .collect();
        assert_eq!(
            tags,
            [
                ("hard", 2),
                ("metro boomin", 1),
                ("ambient", 1),
                ("dark", 1),
                ("808", 1),
                ("one shot", 1),
                ("trap", 1),
                ("drum kit", 1),
            ]
        );
    }

    #[test]
    fn test_seller_analytics_empty() {
        let analytics = seller_analytics(&Snapshot::default(), &seller());
        assert_eq!(analytics.total_revenue, Price::ZERO);
        assert_eq!(analytics.conversion_rate, Decimal::ZERO);
        assert_eq!(analytics.average_order_value, Price::ZERO);
        assert!(analytics.best_product.is_none());
        assert!(analytics.popular_tags.is_empty());
    }

    #[test]
    fn test_product_analytics_uses_list_price() {
        let snapshot = demo(Utc::now());
        let dark_melody = snapshot.product(&ProductId::new("1")).unwrap().clone();
        let analytics = product_analytics(&snapshot, &dark_melody);
        assert_eq!(analytics.total_revenue, Price::from_cents(998));
        assert_eq!(analytics.total_sales, 2);
        assert_eq!(analytics.total_views, 6);
        assert_eq!(analytics.average_order_value, Price::from_cents(499));

        let unsold = product("9", "producerboy", 100);
        let analytics = product_analytics(&snapshot, &unsold);
        assert_eq!(analytics.conversion_rate, Decimal::ZERO);
    }

    #[test]
    fn test_seller_orders_join_titles() {
        let lines = seller_orders(&demo(Utc::now()), &seller());
        let joined: Vec<(&str, &str)> = lines
            .iter()
            .map(|l| (l.order.id.as_str(), l.product_title.as_str()))
            .collect();
        assert_eq!(
            joined,
            [
                ("ORD-001", "Dark Melody Loop"),
                ("ORD-002", "Hard 808"),
                ("ORD-003", "Chill Guitar Loop"),
                ("ORD-004", "Trap Drums Vol.1"),
                ("ORD-005", "Dark Melody Loop"),
            ]
        );
    }
}
