//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `analytics` - Seller dashboard aggregations (stats, activity, rankings)
//! - `catalog` - Ownership-checked product lookup, edit and delete

pub mod analytics;
pub mod catalog;
