//! Session-related types.
//!
//! Types stored in the session for identity state.

use serde::{Deserialize, Serialize};

use kitzz_core::Username;

/// Session-stored seller identity.
///
/// Minimal data stored in the session to identify the acting seller. The
/// full [`crate::models::User`] record is looked up on every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSeller {
    pub username: Username,
}

/// Session keys for identity data.
pub mod session_keys {
    /// Key for storing the current seller.
    pub const CURRENT_SELLER: &str = "current_seller";
}
