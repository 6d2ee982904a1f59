//! Decimal-string hash facade over the shared store.
//!
//! The default configuration of the store: hashes travel as base-10
//! strings of signed 64-bit integers, values are nullable strings. An
//! empty string is an absent hash; a non-empty string that does not parse
//! is rejected with [`OpError::InvalidInput`] on mutating calls and reads
//! as no token on queries.

use crate::handle::SharedTokenStore;
use serde::{Deserialize, Serialize};
use tokstore_core::{OpError, OpResult, StoreStats, TokenHash};
use tokstore_txn::{Diff, Snapshot};

/// The value type of the default configuration.
pub type StringValue = Option<String>;

/// A [`Snapshot`] with stringified hashes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringSnapshot {
    pub initial_hash: Option<String>,
    pub previous_hash: Option<String>,
    pub current_hash: Option<String>,
    pub initial_value: StringValue,
    pub previous_value: StringValue,
    pub current_value: StringValue,
}

impl From<Snapshot<StringValue>> for StringSnapshot {
    fn from(snap: Snapshot<StringValue>) -> Self {
        Self {
            initial_hash: format_hash(snap.initial_hash),
            previous_hash: format_hash(snap.previous_hash),
            current_hash: format_hash(snap.current_hash),
            initial_value: snap.initial_value,
            previous_value: snap.previous_value,
            current_value: snap.current_value,
        }
    }
}

/// A [`Diff`] with stringified hashes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringDiff {
    pub left_hash: Option<String>,
    pub right_hash: Option<String>,
    pub left_value: StringValue,
    pub right_value: StringValue,
}

impl From<Diff<StringValue>> for StringDiff {
    fn from(diff: Diff<StringValue>) -> Self {
        Self {
            left_hash: format_hash(diff.left_hash),
            right_hash: format_hash(diff.right_hash),
            left_value: diff.left_value,
            right_value: diff.right_value,
        }
    }
}

/// Parse a string hash: empty means absent, anything else must be a
/// base-10 signed 64-bit integer.
fn parse_hash(input: &str) -> Result<Option<TokenHash>, OpError> {
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse::<i64>()
        .map(|value| Some(TokenHash(value)))
        .map_err(|_| OpError::InvalidInput)
}

fn format_hash(hash: Option<TokenHash>) -> Option<String> {
    hash.map(|h| h.to_string())
}

/// Token store with string hashes and nullable string values.
#[derive(Clone, Default)]
pub struct StringTokenStore {
    inner: SharedTokenStore<StringValue>,
}

impl StringTokenStore {
    /// Create a handle to a fresh, empty store.
    pub fn new() -> Self {
        Self {
            inner: SharedTokenStore::new(),
        }
    }

    /// The underlying typed handle.
    pub fn typed(&self) -> &SharedTokenStore<StringValue> {
        &self.inner
    }

    // ── Mutator facade ───────────────────────────────────────────────────

    /// Register a pre-existing token. The hash is required here, so an
    /// empty string is invalid input.
    pub fn seed(&self, hash: &str, value: StringValue) -> OpResult {
        match parse_hash(hash)? {
            Some(hash) => self.inner.seed(hash, value),
            None => Err(OpError::InvalidInput),
        }
    }

    /// Stage an insert, modify, or delete for the next commit.
    pub fn stage(&self, old: &str, new: &str, value: StringValue) -> OpResult {
        let old = parse_hash(old)?;
        let new = parse_hash(new)?;
        self.inner.stage(old, new, value)
    }

    /// Apply every staged change atomically.
    pub fn commit(&self) {
        self.inner.commit()
    }

    /// Drop every staged change.
    pub fn discard(&self) {
        self.inner.discard()
    }

    // ── Reader facade ────────────────────────────────────────────────────

    /// The committed image of the token `hash` names. Queries never fail:
    /// an empty or unparseable hash reads as no token.
    pub fn snapshot(&self, hash: &str) -> Option<StringSnapshot> {
        let hash = parse_hash(hash).ok()??;
        self.inner.snapshot(hash).map(StringSnapshot::from)
    }

    /// The changes applied by the most recent commit.
    pub fn committed_diff(&self) -> Vec<StringDiff> {
        self.inner
            .committed_diff()
            .into_iter()
            .map(StringDiff::from)
            .collect()
    }

    /// The changes staging would apply if committed now.
    pub fn uncommitted_diff(&self) -> Vec<StringDiff> {
        self.inner
            .uncommitted_diff()
            .into_iter()
            .map(StringDiff::from)
            .collect()
    }

    /// Each token's net committed change from its initial hash.
    pub fn full_diff(&self) -> Vec<StringDiff> {
        self.inner
            .full_diff()
            .into_iter()
            .map(StringDiff::from)
            .collect()
    }

    /// One snapshot per token, reflecting the uncommitted image.
    pub fn current_snapshots(&self) -> Vec<StringSnapshot> {
        self.inner
            .current_snapshots()
            .into_iter()
            .map(StringSnapshot::from)
            .collect()
    }

    /// Summarize the store's contents.
    pub fn stats(&self) -> StoreStats {
        self.inner.stats()
    }
}
