//! Product catalog operations.
//!
//! Ownership-checked lookup and mutation of products, plus parsing of the
//! dashboard edit form into a [`ProductUpdate`].

use std::collections::HashMap;

use thiserror::Error;

use kitzz_core::{ParseKindError, Price, PriceError, ProductId, ProductKind, ProductStatus, Username};

use crate::db::{Repository, RepositoryError};
use crate::models::Product;

/// Related products shown under a storefront product page.
pub const RELATED_PRODUCTS_LIMIT: usize = 3;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The product does not exist.
    #[error("product not found")]
    NotFound,

    /// The product belongs to another seller.
    #[error("not authorized")]
    NotOwner,

    /// The submitted price is not a non-negative number.
    #[error("invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    /// The submitted product type is unknown.
    #[error(transparent)]
    InvalidKind(#[from] ParseKindError),

    /// Storage failed.
    #[error("repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for CatalogError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::NotOwner => Self::NotOwner,
            other => Self::Repository(other),
        }
    }
}

// =============================================================================
// Edit form
// =============================================================================

/// A validated set of changes from the product edit form.
///
/// `None` means "leave unchanged". For `bpm` and `key`, `Some(None)` clears
/// the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub format: Option<String>,
    pub kind: Option<ProductKind>,
    pub price: Option<Price>,
    pub bpm: Option<Option<String>>,
    pub key: Option<Option<String>>,
    /// Whether the product should be listed. Always applied.
    pub published: bool,
}

impl ProductUpdate {
    /// Build an update from submitted form fields.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidPrice` or `CatalogError::InvalidKind`
    /// when those fields are present but malformed.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, CatalogError> {
        let text = |name: &str| fields.get(name).cloned();
        let clearable = |name: &str| {
            fields.get(name).map(|value| {
                let value = value.trim();
                (!value.is_empty()).then(|| value.to_owned())
            })
        };

        let kind = fields
            .get("type")
            .map(|value| value.parse::<ProductKind>())
            .transpose()?;
        let price = fields
            .get("price")
            .map(|value| Price::parse(value))
            .transpose()?;

        Ok(Self {
            title: text("title"),
            description: text("description"),
            format: text("format"),
            kind,
            price,
            bpm: clearable("bpm"),
            key: clearable("key"),
            published: fields.get("published").is_some_and(|v| !v.is_empty()),
        })
    }

    /// Write the changes into `product`.
    pub fn apply(&self, product: &mut Product) {
        if let Some(title) = &self.title {
            product.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            product.description.clone_from(description);
        }
        if let Some(format) = &self.format {
            product.format.clone_from(format);
        }
        if let Some(kind) = self.kind {
            product.kind = kind;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(bpm) = &self.bpm {
            product.bpm.clone_from(bpm);
        }
        if let Some(key) = &self.key {
            product.key.clone_from(key);
        }
        product.status = if self.published {
            ProductStatus::Published
        } else {
            ProductStatus::Draft
        };
    }
}

// =============================================================================
// Operations
// =============================================================================

/// Look up a product the acting seller may manage.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` if the product doesn't exist and
/// `CatalogError::NotOwner` if it belongs to someone else.
pub fn owned_product(
    repo: &dyn Repository,
    id: &ProductId,
    seller: &Username,
) -> Result<Product, CatalogError> {
    let product = repo.products().get(id)?.ok_or(CatalogError::NotFound)?;
    if !product.is_owned_by(seller) {
        return Err(CatalogError::NotOwner);
    }
    Ok(product)
}

/// Look up a product for its public page.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` if product `id` does not exist.
pub fn storefront_product(repo: &dyn Repository, id: &ProductId) -> Result<Product, CatalogError> {
    repo.products().get(id)?.ok_or(CatalogError::NotFound)
}

/// Products listed by `seller` other than `exclude`, in listing order.
///
/// # Errors
///
/// Returns `CatalogError::Repository` if storage cannot be read.
pub fn related_products(
    repo: &dyn Repository,
    seller: &Username,
    exclude: &ProductId,
    limit: usize,
) -> Result<Vec<Product>, CatalogError> {
    Ok(repo
        .products()
        .list_by_owner(seller)?
        .into_iter()
        .filter(|other| &other.id != exclude)
        .take(limit)
        .collect())
}

/// Apply `update` to a product the acting seller owns.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` or `CatalogError::NotOwner` without
/// modifying anything.
pub fn update_product(
    repo: &dyn Repository,
    id: &ProductId,
    seller: &Username,
    update: &ProductUpdate,
) -> Result<Product, CatalogError> {
    Ok(repo
        .products()
        .update(id, seller, &|product| update.apply(product))?)
}

/// Remove a product the acting seller owns. Its orders are kept.
///
/// # Errors
///
/// Returns `CatalogError::NotFound` or `CatalogError::NotOwner` without
/// modifying anything.
pub fn delete_product(
    repo: &dyn Repository,
    id: &ProductId,
    seller: &Username,
) -> Result<Product, CatalogError> {
    Ok(repo.products().delete(id, seller)?)
}
