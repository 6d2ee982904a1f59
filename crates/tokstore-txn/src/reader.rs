//! Derived read views over the token store.
//!
//! Every method materializes its result into owned values, so a caller
//! iterating a returned sequence sees a frozen image no matter what the
//! store does afterwards.
//!
//! Two visibility rules differ on purpose: [`Reader::snapshot`] reports the
//! committed image (hiding only tokens staged for deletion), while
//! [`Reader::current_snapshots`] reports the uncommitted image including
//! staged targets.

use serde::{Deserialize, Serialize};
use tokstore_core::{TokenHash, TokenId, TokenStore};

/// A token's three reference points with their values.
///
/// Value slots without a backing hash, and hashes whose pool entry has
/// been evicted, carry the value type's default.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot<V> {
    pub initial_hash: Option<TokenHash>,
    pub previous_hash: Option<TokenHash>,
    pub current_hash: Option<TokenHash>,
    pub initial_value: V,
    pub previous_value: V,
    pub current_value: V,
}

/// One reported change: a hash transition and the values on both sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff<V> {
    pub left_hash: Option<TokenHash>,
    pub right_hash: Option<TokenHash>,
    pub left_value: V,
    pub right_value: V,
}

/// Read-only view derivation over a borrowed store.
pub struct Reader<'a, V> {
    store: &'a TokenStore<V>,
}

impl<'a, V: Clone + Default> Reader<'a, V> {
    pub fn new(store: &'a TokenStore<V>) -> Self {
        Self { store }
    }

    /// The committed image of the token a hash names.
    ///
    /// Returns `None` when the hash is unmapped, the token is staged for
    /// deletion, or the token has no committed hash. Staged modifications
    /// are ignored: querying either the committed hash or a staged target
    /// yields the committed triple.
    pub fn snapshot(&self, hash: TokenHash) -> Option<Snapshot<V>> {
        let id = self.store.lookup(hash)?;
        if self.store.staged_target(id) == Some(None) {
            return None;
        }

        let state = self.store.state(id)?;
        state.current?;

        Some(Snapshot {
            initial_hash: state.initial,
            previous_hash: state.previous,
            current_hash: state.current,
            initial_value: self.seed_value(id),
            previous_value: self.pool_value(state.previous),
            current_value: self.pool_value(state.current),
        })
    }

    /// The changes applied by the most recent commit.
    ///
    /// Records whose two sides are equal carry no information and are
    /// dropped.
    pub fn committed_diff(&self) -> Vec<Diff<V>> {
        self.store
            .changes()
            .iter()
            .filter(|record| record.left != record.right)
            .map(|record| Diff {
                left_hash: record.left,
                right_hash: record.right,
                left_value: self.origin_value(record.id, record.left),
                right_value: self.pool_value(record.right),
            })
            .collect()
    }

    /// The changes staging would apply if committed now.
    pub fn uncommitted_diff(&self) -> Vec<Diff<V>> {
        self.store
            .staged()
            .filter_map(|(id, target)| {
                let state = self.store.state(id)?;
                if state.current == target {
                    return None;
                }
                Some(Diff {
                    left_hash: state.current,
                    right_hash: target,
                    left_value: self.origin_value(id, state.current),
                    right_value: self.pool_value(target),
                })
            })
            .collect()
    }

    /// Each token's net committed change from its initial hash, ignoring
    /// intermediate commits and staging.
    ///
    /// Deleted tokens that were once seeded report `initial -> None`;
    /// tokens that were inserted and later deleted report nothing.
    pub fn full_diff(&self) -> Vec<Diff<V>> {
        self.store
            .states()
            .filter_map(|(id, state)| match (state.initial, state.current) {
                (Some(initial), current) if current != Some(initial) => Some(Diff {
                    left_hash: Some(initial),
                    right_hash: current,
                    left_value: self.seed_value(id),
                    right_value: self.pool_value(current),
                }),
                (None, Some(current)) => Some(Diff {
                    left_hash: None,
                    right_hash: Some(current),
                    left_value: V::default(),
                    right_value: self.pool_value(Some(current)),
                }),
                _ => None,
            })
            .collect()
    }

    /// One snapshot per token, reflecting the uncommitted image.
    ///
    /// A staged token reports its staged target as `current` and the
    /// committed `current` as `previous`; an unstaged token reports its
    /// committed triple. Deleted tokens are included with an empty
    /// `current` slot.
    pub fn current_snapshots(&self) -> Vec<Snapshot<V>> {
        self.store
            .states()
            .map(|(id, state)| match self.store.staged_target(id) {
                Some(target) => Snapshot {
                    initial_hash: state.initial,
                    previous_hash: state.current,
                    current_hash: target,
                    initial_value: self.seed_value(id),
                    previous_value: self.pool_value(state.current),
                    current_value: self.pool_value(target),
                },
                None => Snapshot {
                    initial_hash: state.initial,
                    previous_hash: state.previous,
                    current_hash: state.current,
                    initial_value: self.seed_value(id),
                    previous_value: self.pool_value(state.previous),
                    current_value: self.pool_value(state.current),
                },
            })
            .collect()
    }

    fn pool_value(&self, hash: Option<TokenHash>) -> V {
        hash.and_then(|h| self.store.pooled(h))
            .cloned()
            .unwrap_or_default()
    }

    fn seed_value(&self, id: TokenId) -> V {
        self.store.seed_value(id).cloned().unwrap_or_default()
    }

    /// Value on the left side of a diff: the sanctuary when the hash is the
    /// token's initial, the pool otherwise.
    fn origin_value(&self, id: TokenId, hash: Option<TokenHash>) -> V {
        let Some(hash) = hash else {
            return V::default();
        };
        match self.store.state(id) {
            Some(state) if state.initial == Some(hash) => self.seed_value(id),
            _ => self.pool_value(Some(hash)),
        }
    }
}
