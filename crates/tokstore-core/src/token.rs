//! Token identities and hashes.
//!
//! A token's identity is hidden and stable for its whole lifetime; the
//! hash that names it can change on every commit. Keeping the two apart
//! is what makes a rename distinguishable from a delete plus an insert.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Hidden, stable identity of a token.
///
/// Identities are process-unique and never reused. Ulids order by creation
/// time at millisecond granularity, so ordered enumerations keyed by
/// `TokenId` walk tokens in roughly creation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(Ulid);

impl TokenId {
    /// Allocate a fresh identity.
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for TokenId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 64-bit signed hash naming a token at a point in time.
///
/// A hash may be unassigned, currently assigned to exactly one token, or
/// historically referenced by a deleted token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenHash(pub i64);

impl TokenHash {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for TokenHash {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
