//! Domain models for the storefront.
//!
//! These are the rows of the three marketplace tables. Derived figures
//! (downloads, revenue, views) are never stored here; see
//! [`crate::services::analytics`].

pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use order::Order;
pub use product::Product;
pub use session::{CurrentSeller, session_keys};
pub use user::User;
