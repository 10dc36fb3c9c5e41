//! Storage for the marketplace tables.
//!
//! # Tables
//!
//! - `users` - sellers, keyed by username
//! - `products` - listed audio assets, in listing order
//! - `orders` - immutable sales records
//!
//! Handlers never touch storage directly: they receive an
//! `Arc<dyn Repository>` through [`crate::state::AppState`]. The only
//! implementation today is [`MemoryRepository`], seeded from
//! [`seed::demo_tables`] on startup.
//!
//! # Consistency
//!
//! - Aggregation reads go through [`Repository::snapshot`], which copies the
//!   products and orders tables under one read lock.
//! - Product mutations take an `owner` argument; the ownership check and the
//!   write happen atomically (the equivalent of `WHERE id = $1 AND owner = $2`).

pub mod memory;
pub mod seed;

use thiserror::Error;

use kitzz_core::{Email, OrderId, ProductId, Username};

use crate::models::{Order, Product, User};

pub use memory::{MemoryRepository, Tables};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// The entity exists but belongs to someone else.
    #[error("not owned by the acting seller")]
    NotOwner,

    /// Constraint violation (e.g., duplicate key).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Stored data is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The storage backend cannot serve requests.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Access to the users table.
pub trait UserRepository: Send + Sync {
    /// Get a user by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if storage cannot be read.
    fn get(&self, username: &Username) -> Result<Option<User>, RepositoryError>;

    /// Get a user by email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if storage cannot be read.
    fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// List all users in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if storage cannot be read.
    fn list(&self) -> Result<Vec<User>, RepositoryError>;

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    fn insert(&self, user: User) -> Result<(), RepositoryError>;

    /// Replace an existing user, matched by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user doesn't exist.
    fn update(&self, user: User) -> Result<(), RepositoryError>;

    /// Delete a user. Returns `true` if a user was removed.
    ///
    /// Products owned by the user are left in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if storage cannot be written.
    fn delete(&self, username: &Username) -> Result<bool, RepositoryError>;
}

/// Access to the products table.
pub trait ProductRepository: Send + Sync {
    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if storage cannot be read.
    fn get(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    /// List all products in listing order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if storage cannot be read.
    fn list(&self) -> Result<Vec<Product>, RepositoryError>;

    /// List the products owned by `owner`, in listing order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if storage cannot be read.
    fn list_by_owner(&self, owner: &Username) -> Result<Vec<Product>, RepositoryError>;

    /// Append a product to the listing.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the ID is taken.
    fn insert(&self, product: Product) -> Result<(), RepositoryError>;

    /// Apply `apply` to the product with `id` if `owner` owns it, returning
    /// the updated product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist, or
    /// `RepositoryError::NotOwner` if it belongs to another seller. Nothing
    /// is modified in either case.
    fn update(
        &self,
        id: &ProductId,
        owner: &Username,
        apply: &dyn Fn(&mut Product),
    ) -> Result<Product, RepositoryError>;

    /// Remove the product with `id` if `owner` owns it, returning it.
    ///
    /// Orders referencing the product are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist, or
    /// `RepositoryError::NotOwner` if it belongs to another seller.
    fn delete(&self, id: &ProductId, owner: &Username) -> Result<Product, RepositoryError>;
}

/// Access to the orders table. Orders are append-only.
pub trait OrderRepository: Send + Sync {
    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if storage cannot be read.
    fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError>;

    /// List all orders in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if storage cannot be read.
    fn list(&self) -> Result<Vec<Order>, RepositoryError>;

    /// List the orders for one product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if storage cannot be read.
    fn list_by_product(&self, product_id: &ProductId) -> Result<Vec<Order>, RepositoryError>;

    /// Record a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the ID is taken.
    fn insert(&self, order: Order) -> Result<(), RepositoryError>;
}

/// The full storage interface handed to request handlers.
pub trait Repository: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn products(&self) -> &dyn ProductRepository;
    fn orders(&self) -> &dyn OrderRepository;

    /// Copy the products and orders tables at a single point in time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if storage cannot be read.
    fn snapshot(&self) -> Result<Snapshot, RepositoryError>;
}

/// A consistent, owned copy of the products and orders tables.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

impl Snapshot {
    /// Find a product by ID.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products owned by `owner`, in listing order.
    pub fn owned_products<'a>(
        &'a self,
        owner: &'a Username,
    ) -> impl Iterator<Item = &'a Product> + 'a {
        self.products.iter().filter(move |p| p.is_owned_by(owner))
    }

    /// Orders for one product, in insertion order.
    pub fn orders_for<'a>(&'a self, product_id: &'a ProductId) -> impl Iterator<Item = &'a Order> + 'a {
        self.orders.iter().filter(move |o| &o.product_id == product_id)
    }
}
