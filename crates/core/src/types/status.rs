//! Status and kind enums for catalog entities.
//!
//! Each enum serializes to the lowercase (or capitalized, for plans) form
//! stored in the tables and submitted by the dashboard forms, and parses
//! back from it via `FromStr`.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: '{value}'")]
pub struct ParseKindError {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseKindError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// What kind of audio asset a product is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// A repeating musical phrase.
    Loop,
    /// A single one-shot sound.
    Sample,
    /// A bundle of sounds (drum kit, sample pack).
    Kit,
}

impl ProductKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 3] = [Self::Loop, Self::Sample, Self::Kit];

    /// The form/storage value (`"loop"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loop => "loop",
            Self::Sample => "sample",
            Self::Kit => "kit",
        }
    }

    /// Human-readable label (`"Loop"`).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Loop => "Loop",
            Self::Sample => "Sample",
            Self::Kit => "Kit",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "loop" => Ok(Self::Loop),
            "sample" => Ok(Self::Sample),
            "kit" => Ok(Self::Kit),
            _ => Err(ParseKindError::new("product type", s)),
        }
    }
}

/// Publication status of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Visible only to its seller's dashboard.
    #[default]
    Draft,
    /// Listed on the storefront.
    Published,
}

impl ProductStatus {
    /// The storage value (`"draft"`).
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    /// Whether the product is listed.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        matches!(self, Self::Published)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(ParseKindError::new("product status", s)),
        }
    }
}

/// Seller subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Plan {
    #[default]
    Free,
    Starter,
    Pro,
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "Free"),
            Self::Starter => write!(f, "Starter"),
            Self::Pro => write!(f, "Pro"),
        }
    }
}

impl FromStr for Plan {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "starter" => Ok(Self::Starter),
            "pro" => Ok(Self::Pro),
            _ => Err(ParseKindError::new("plan", s)),
        }
    }
}

/// Order status.
///
/// Orders are written once by checkout; only completed sales are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Completed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
        }
    }
}
