//! Per-token lifecycle state and committed-change records.

use crate::token::{TokenHash, TokenId};
use serde::{Deserialize, Serialize};

/// The three reference points of a token's history.
///
/// Each slot is an optional hash:
///
/// - `initial`: the hash at seed time; `None` forever for tokens that were
///   inserted rather than seeded.
/// - `previous`: the hash before the last commit; mirrors `current` right
///   after seeding and advances on every commit.
/// - `current`: the most recently committed hash; `None` iff the token has
///   been deleted by a commit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenState {
    pub initial: Option<TokenHash>,
    pub previous: Option<TokenHash>,
    pub current: Option<TokenHash>,
}

impl TokenState {
    /// State of a freshly seeded token: all three slots name the seed hash.
    pub fn seeded(hash: TokenHash) -> Self {
        Self {
            initial: Some(hash),
            previous: Some(hash),
            current: Some(hash),
        }
    }

    /// State of a freshly inserted token: nothing committed yet.
    pub fn inserted() -> Self {
        Self::default()
    }

    /// Whether the token is committed-alive (named by some hash).
    pub fn is_live(&self) -> bool {
        self.current.is_some()
    }

    /// Every hash referenced by a slot, duplicates included.
    pub fn hashes(&self) -> impl Iterator<Item = TokenHash> {
        [self.initial, self.previous, self.current]
            .into_iter()
            .flatten()
    }
}

/// One entry of the committed-change log.
///
/// `left` is the token's `current` hash before the commit, `right` the one
/// after. The log is cleared and refilled on every commit, so it always
/// describes the most recent commit only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub id: TokenId,
    pub left: Option<TokenHash>,
    pub right: Option<TokenHash>,
}
