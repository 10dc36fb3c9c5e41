//! User domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kitzz_core::{Email, Plan, Username};

/// A marketplace user. Every seller is a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique public handle; the users table key.
    pub username: Username,
    /// Account email address.
    pub email: Email,
    /// Whether the email has been verified.
    pub verified: bool,
    /// Subscription plan.
    pub plan: Plan,
    /// Reference to the seller's account at the payment provider.
    pub payment_account_id: Option<String>,
    /// When the user signed up.
    pub created_at: DateTime<Utc>,
}
