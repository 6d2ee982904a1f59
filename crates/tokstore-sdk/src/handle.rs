//! Cloneable, thread-safe handle over a token store.
//!
//! One lock guards the whole store: mutations take the write guard, reads
//! take the read guard, and every returned sequence is copied into an
//! owned container before the guard drops. Callers therefore always
//! iterate a frozen image, and all operations linearize on lock
//! acquisition order.

use parking_lot::RwLock;
use std::sync::Arc;
use tokstore_core::{OpResult, StoreStats, TokenHash, TokenStore};
use tokstore_txn::{Diff, Mutator, Reader, Snapshot};

/// Shared handle to a token store.
///
/// Clones refer to the same underlying store.
pub struct SharedTokenStore<V> {
    inner: Arc<RwLock<TokenStore<V>>>,
}

impl<V> Clone for SharedTokenStore<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone + Default + PartialEq> SharedTokenStore<V> {
    /// Create a handle to a fresh, empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(TokenStore::new())),
        }
    }

    // ── Mutator facade ───────────────────────────────────────────────────

    /// Register a pre-existing token under `hash` with `value`.
    pub fn seed(&self, hash: TokenHash, value: V) -> OpResult {
        Mutator::new(&mut self.inner.write()).seed(hash, value)
    }

    /// Stage an insert, modify, or delete for the next commit.
    pub fn stage(&self, old: Option<TokenHash>, new: Option<TokenHash>, value: V) -> OpResult {
        Mutator::new(&mut self.inner.write()).stage(old, new, value)
    }

    /// Apply every staged change atomically.
    pub fn commit(&self) {
        Mutator::new(&mut self.inner.write()).commit()
    }

    /// Drop every staged change.
    pub fn discard(&self) {
        Mutator::new(&mut self.inner.write()).discard()
    }

    // ── Reader facade ────────────────────────────────────────────────────

    /// The committed image of the token `hash` names, if visible.
    pub fn snapshot(&self, hash: TokenHash) -> Option<Snapshot<V>> {
        Reader::new(&self.inner.read()).snapshot(hash)
    }

    /// The changes applied by the most recent commit.
    pub fn committed_diff(&self) -> Vec<Diff<V>> {
        Reader::new(&self.inner.read()).committed_diff()
    }

    /// The changes staging would apply if committed now.
    pub fn uncommitted_diff(&self) -> Vec<Diff<V>> {
        Reader::new(&self.inner.read()).uncommitted_diff()
    }

    /// Each token's net committed change from its initial hash.
    pub fn full_diff(&self) -> Vec<Diff<V>> {
        Reader::new(&self.inner.read()).full_diff()
    }

    /// One snapshot per token, reflecting the uncommitted image.
    pub fn current_snapshots(&self) -> Vec<Snapshot<V>> {
        Reader::new(&self.inner.read()).current_snapshots()
    }

    /// Summarize the store's contents.
    pub fn stats(&self) -> StoreStats {
        self.inner.read().stats()
    }
}

impl<V: Clone + Default + PartialEq> Default for SharedTokenStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
