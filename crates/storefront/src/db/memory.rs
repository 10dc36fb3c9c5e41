//! In-memory repository.
//!
//! All three tables live behind one `RwLock`, so a snapshot sees products
//! and orders from the same instant and a product mutation excludes every
//! concurrent reader and writer.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use kitzz_core::{Email, OrderId, ProductId, Username};

use super::{
    OrderRepository, ProductRepository, Repository, RepositoryError, Snapshot, UserRepository,
};
use crate::models::{Order, Product, User};

/// The raw table contents.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
}

type SharedTables = Arc<RwLock<Tables>>;

fn read(tables: &RwLock<Tables>) -> Result<RwLockReadGuard<'_, Tables>, RepositoryError> {
    tables
        .read()
        .map_err(|_| RepositoryError::Unavailable("table lock poisoned".to_owned()))
}

fn write(tables: &RwLock<Tables>) -> Result<RwLockWriteGuard<'_, Tables>, RepositoryError> {
    tables
        .write()
        .map_err(|_| RepositoryError::Unavailable("table lock poisoned".to_owned()))
}

/// Repository backed by process memory. Contents are lost on restart.
#[derive(Debug, Clone)]
pub struct MemoryRepository {
    users: MemoryUsers,
    products: MemoryProducts,
    orders: MemoryOrders,
    tables: SharedTables,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::with_tables(Tables::default())
    }

    /// Create a repository holding `tables`.
    #[must_use]
    pub fn with_tables(tables: Tables) -> Self {
        let tables = Arc::new(RwLock::new(tables));
        Self {
            users: MemoryUsers(Arc::clone(&tables)),
            products: MemoryProducts(Arc::clone(&tables)),
            orders: MemoryOrders(Arc::clone(&tables)),
            tables,
        }
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MemoryRepository {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn products(&self) -> &dyn ProductRepository {
        &self.products
    }

    fn orders(&self) -> &dyn OrderRepository {
        &self.orders
    }

    fn snapshot(&self) -> Result<Snapshot, RepositoryError> {
        let tables = read(&self.tables)?;
        Ok(Snapshot {
            products: tables.products.clone(),
            orders: tables.orders.clone(),
        })
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone)]
struct MemoryUsers(SharedTables);

impl UserRepository for MemoryUsers {
    fn get(&self, username: &Username) -> Result<Option<User>, RepositoryError> {
        let tables = read(&self.0)?;
        Ok(tables
            .users
            .iter()
            .find(|u| &u.username == username)
            .cloned())
    }

    fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let tables = read(&self.0)?;
        Ok(tables.users.iter().find(|u| &u.email == email).cloned())
    }

    fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(read(&self.0)?.users.clone())
    }

    fn insert(&self, user: User) -> Result<(), RepositoryError> {
        let mut tables = write(&self.0)?;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(RepositoryError::Conflict(format!(
                "username '{}' already exists",
                user.username
            )));
        }
        tables.users.push(user);
        Ok(())
    }

    fn update(&self, user: User) -> Result<(), RepositoryError> {
        let mut tables = write(&self.0)?;
        let existing = tables
            .users
            .iter_mut()
            .find(|u| u.username == user.username)
            .ok_or(RepositoryError::NotFound)?;
        *existing = user;
        Ok(())
    }

    fn delete(&self, username: &Username) -> Result<bool, RepositoryError> {
        let mut tables = write(&self.0)?;
        let before = tables.users.len();
        tables.users.retain(|u| &u.username != username);
        Ok(tables.users.len() < before)
    }
}

// =============================================================================
// Products
// =============================================================================

#[derive(Debug, Clone)]
struct MemoryProducts(SharedTables);

impl MemoryProducts {
    /// Index of the product `owner` may modify.
    fn owned_index(
        tables: &Tables,
        id: &ProductId,
        owner: &Username,
    ) -> Result<usize, RepositoryError> {
        let index = tables
            .products
            .iter()
            .position(|p| &p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        match tables.products.get(index) {
            Some(product) if product.is_owned_by(owner) => Ok(index),
            Some(_) => Err(RepositoryError::NotOwner),
            None => Err(RepositoryError::NotFound),
        }
    }
}

impl ProductRepository for MemoryProducts {
    fn get(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let tables = read(&self.0)?;
        Ok(tables.products.iter().find(|p| &p.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(read(&self.0)?.products.clone())
    }

    fn list_by_owner(&self, owner: &Username) -> Result<Vec<Product>, RepositoryError> {
        let tables = read(&self.0)?;
        Ok(tables
            .products
            .iter()
            .filter(|p| p.is_owned_by(owner))
            .cloned()
            .collect())
    }

    fn insert(&self, product: Product) -> Result<(), RepositoryError> {
        let mut tables = write(&self.0)?;
        if tables.products.iter().any(|p| p.id == product.id) {
            return Err(RepositoryError::Conflict(format!(
                "product '{}' already exists",
                product.id
            )));
        }
        tables.products.push(product);
        Ok(())
    }

    fn update(
        &self,
        id: &ProductId,
        owner: &Username,
        apply: &dyn Fn(&mut Product),
    ) -> Result<Product, RepositoryError> {
        let mut tables = write(&self.0)?;
        let index = Self::owned_index(&tables, id, owner)?;
        let product = tables
            .products
            .get_mut(index)
            .ok_or(RepositoryError::NotFound)?;
        apply(product);
        if &product.id != id || !product.is_owned_by(owner) {
            return Err(RepositoryError::DataCorruption(
                "product update changed its key or owner".to_owned(),
            ));
        }
        Ok(product.clone())
    }

    fn delete(&self, id: &ProductId, owner: &Username) -> Result<Product, RepositoryError> {
        let mut tables = write(&self.0)?;
        let index = Self::owned_index(&tables, id, owner)?;
        Ok(tables.products.remove(index))
    }
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Debug, Clone)]
struct MemoryOrders(SharedTables);

impl OrderRepository for MemoryOrders {
    fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let tables = read(&self.0)?;
        Ok(tables.orders.iter().find(|o| &o.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        Ok(read(&self.0)?.orders.clone())
    }

    fn list_by_product(&self, product_id: &ProductId) -> Result<Vec<Order>, RepositoryError> {
        let tables = read(&self.0)?;
        Ok(tables
            .orders
            .iter()
            .filter(|o| &o.product_id == product_id)
            .cloned()
            .collect())
    }

    fn insert(&self, order: Order) -> Result<(), RepositoryError> {
        let mut tables = write(&self.0)?;
        if tables.orders.iter().any(|o| o.id == order.id) {
            return Err(RepositoryError::Conflict(format!(
                "order '{}' already exists",
                order.id
            )));
        }
        tables.orders.push(order);
        Ok(())
    }
}
