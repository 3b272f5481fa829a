//! Prefixed entity identifiers.
//!
//! A guid is a two-letter entity prefix followed by the simple (hyphenless)
//! form of a random v4 UUID, e.g. `PL0f8fad5bd9cb469fa16570867728950e`.

use uuid::Uuid;

use crate::types::Guid;

pub const COMPANY_PREFIX: &str = "CP";
pub const PLAN_PREFIX: &str = "PL";
pub const CUSTOMER_PREFIX: &str = "CU";
pub const SUBSCRIPTION_PREFIX: &str = "SU";
pub const TRANSACTION_PREFIX: &str = "TX";

/// Generate a new guid with the given entity prefix.
pub fn make_guid(prefix: &str) -> Guid {
    format!("{prefix}{}", Uuid::new_v4().simple())
}
