//! The raw container backing the token state store.
//!
//! `TokenStore` owns the six structures the rest of the workspace operates
//! on and exposes pure container primitives: no operation here validates
//! anything. The transactional rules (duplicate checks, collision checks,
//! commit sequencing) live in `tokstore-txn`.

use crate::state::{ChangeRecord, TokenState};
use crate::token::{TokenHash, TokenId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Raw state of the token store.
///
/// Token-keyed maps are `BTreeMap` so that enumerations are stable
/// sequences; the hash index and the value pool only ever serve point
/// lookups and pruning sweeps.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenStore<V> {
    /// Per-token lifecycle state.
    states: BTreeMap<TokenId, TokenState>,

    /// Which token a hash currently names.
    index: HashMap<TokenHash, TokenId>,

    /// Values cached per hash; pruned down to live hashes.
    pool: HashMap<TokenHash, V>,

    /// The value each token was created with; written once, never evicted.
    sanctuary: BTreeMap<TokenId, V>,

    /// Pending change per token; a `None` target is a delete tombstone.
    staging: BTreeMap<TokenId, Option<TokenHash>>,

    /// Records produced by the most recent commit.
    changes: Vec<ChangeRecord>,
}

impl<V> TokenStore<V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            states: BTreeMap::new(),
            index: HashMap::new(),
            pool: HashMap::new(),
            sanctuary: BTreeMap::new(),
            staging: BTreeMap::new(),
            changes: Vec::new(),
        }
    }

    // ── Token states ─────────────────────────────────────────────────────

    /// Get a token's state.
    pub fn state(&self, id: TokenId) -> Option<&TokenState> {
        self.states.get(&id)
    }

    /// Set or replace a token's state.
    pub fn set_state(&mut self, id: TokenId, state: TokenState) {
        self.states.insert(id, state);
    }

    /// Enumerate all `(identity, state)` pairs, in identity order.
    pub fn states(&self) -> impl Iterator<Item = (TokenId, &TokenState)> + '_ {
        self.states.iter().map(|(id, state)| (*id, state))
    }

    /// Number of tokens ever created (deleted tokens included).
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no token has ever been created.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    // ── Hash index ───────────────────────────────────────────────────────

    /// Which token a hash currently names, if any.
    pub fn lookup(&self, hash: TokenHash) -> Option<TokenId> {
        self.index.get(&hash).copied()
    }

    /// Whether a hash currently names a token.
    pub fn contains_hash(&self, hash: TokenHash) -> bool {
        self.index.contains_key(&hash)
    }

    /// Map a hash to a token, replacing any prior mapping.
    pub fn map_hash(&mut self, hash: TokenHash, id: TokenId) {
        self.index.insert(hash, id);
    }

    /// Remove a hash mapping, returning the token it named.
    pub fn unmap_hash(&mut self, hash: TokenHash) -> Option<TokenId> {
        self.index.remove(&hash)
    }

    // ── Value pool ───────────────────────────────────────────────────────

    /// The pooled value at a hash, if any.
    pub fn pooled(&self, hash: TokenHash) -> Option<&V> {
        self.pool.get(&hash)
    }

    /// Store a value at a hash, replacing any prior value.
    pub fn set_pooled(&mut self, hash: TokenHash, value: V) {
        self.pool.insert(hash, value);
    }

    /// Evict every pool entry whose hash is not in `live`.
    ///
    /// Returns the number of evicted entries. The sanctuary and the token
    /// states are untouched.
    pub fn prune(&mut self, live: &HashSet<TokenHash>) -> usize {
        let before = self.pool.len();
        self.pool.retain(|hash, _| live.contains(hash));
        before - self.pool.len()
    }

    // ── Initial-value sanctuary ──────────────────────────────────────────

    /// The value a token was created with.
    pub fn seed_value(&self, id: TokenId) -> Option<&V> {
        self.sanctuary.get(&id)
    }

    /// Record a token's creation value.
    pub fn set_seed_value(&mut self, id: TokenId, value: V) {
        self.sanctuary.insert(id, value);
    }

    // ── Staging ──────────────────────────────────────────────────────────

    /// Stage a pending change for a token. A `None` target is a tombstone.
    pub fn stage(&mut self, id: TokenId, target: Option<TokenHash>) {
        self.staging.insert(id, target);
    }

    /// Whether a token has a pending change.
    pub fn is_staged(&self, id: TokenId) -> bool {
        self.staging.contains_key(&id)
    }

    /// A token's staged target: `None` if unstaged, `Some(None)` for a
    /// tombstone, `Some(Some(hash))` for a pending insert or modify.
    pub fn staged_target(&self, id: TokenId) -> Option<Option<TokenHash>> {
        self.staging.get(&id).copied()
    }

    /// Enumerate all staged changes, in identity order.
    pub fn staged(&self) -> impl Iterator<Item = (TokenId, Option<TokenHash>)> + '_ {
        self.staging.iter().map(|(id, target)| (*id, *target))
    }

    /// Drop every staged change.
    pub fn clear_staged(&mut self) {
        self.staging.clear();
    }

    // ── Committed-change log ─────────────────────────────────────────────

    /// Append a record to the committed-change log.
    pub fn record_change(&mut self, record: ChangeRecord) {
        self.changes.push(record);
    }

    /// The records produced by the most recent commit.
    pub fn changes(&self) -> &[ChangeRecord] {
        &self.changes
    }

    /// Clear the committed-change log.
    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }

    // ── Reporting ────────────────────────────────────────────────────────

    /// Summarize the store's contents.
    pub fn stats(&self) -> StoreStats {
        let live = self.states.values().filter(|s| s.is_live()).count();

        StoreStats {
            total_tokens: self.states.len(),
            live_tokens: live,
            dead_tokens: self.states.len() - live,
            staged_changes: self.staging.len(),
            pooled_values: self.pool.len(),
        }
    }
}

/// Summary of a store's contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    /// Tokens ever created, deleted ones included.
    pub total_tokens: usize,
    /// Tokens whose committed `current` names a hash.
    pub live_tokens: usize,
    /// Tokens with no committed hash (deleted, or inserted and not yet
    /// committed).
    pub dead_tokens: usize,
    /// Pending staged changes.
    pub staged_changes: usize,
    /// Values currently held in the pool.
    pub pooled_values: usize,
}
