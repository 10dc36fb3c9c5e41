//! Product domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kitzz_core::{Price, ProductId, ProductKind, ProductStatus, Username};

/// A digital audio asset listed by a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub kind: ProductKind,
    /// List price.
    pub price: Price,
    /// Tempo in beats per minute, as entered by the seller (e.g. `"140"`).
    pub bpm: Option<String>,
    /// Musical key (e.g. `"Cm"`).
    pub key: Option<String>,
    /// Audio file format (e.g. `"WAV"`).
    pub format: String,
    /// Display size of the downloadable file (e.g. `"4.2 MB"`).
    pub file_size: String,
    pub description: String,
    /// Cover image URL.
    pub image: Option<String>,
    pub tags: Vec<String>,
    /// The seller who owns this product.
    pub owner: Username,
    pub status: ProductStatus,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether `seller` owns this product.
    #[must_use]
    pub fn is_owned_by(&self, seller: &Username) -> bool {
        &self.owner == seller
    }
}
