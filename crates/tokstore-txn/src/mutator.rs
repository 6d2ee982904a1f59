//! The single writer of token store state.
//!
//! Every mutation validates its preconditions against the raw store, then
//! applies its effects in a fixed order. Failures are reported as
//! [`OpError`] values; once a mutation starts writing it cannot fail.

use std::collections::HashSet;
use tokstore_core::{ChangeRecord, OpError, OpResult, TokenHash, TokenId, TokenState, TokenStore};

/// Mutating operations over a borrowed store.
pub struct Mutator<'a, V> {
    store: &'a mut TokenStore<V>,
}

impl<'a, V: Clone + PartialEq> Mutator<'a, V> {
    pub fn new(store: &'a mut TokenStore<V>) -> Self {
        Self { store }
    }

    /// Register a pre-existing token under `hash` with `value`.
    ///
    /// All three state slots are set to the seed hash and the value is
    /// recorded both in the pool and in the sanctuary.
    pub fn seed(&mut self, hash: TokenHash, value: V) -> OpResult {
        if self.store.contains_hash(hash) {
            return Err(OpError::DuplicateHash(hash));
        }

        let id = TokenId::new();
        self.store.map_hash(hash, id);
        self.store.set_pooled(hash, value.clone());
        self.store.set_seed_value(id, value);
        self.store.set_state(id, TokenState::seeded(hash));
        Ok(())
    }

    /// Stage a change for the next commit.
    ///
    /// The combination of `old` and `new` selects the operation: a delete
    /// (`old` only), an insert (`new` only), or a modify (both). With
    /// neither hash there is nothing to stage.
    pub fn stage(&mut self, old: Option<TokenHash>, new: Option<TokenHash>, value: V) -> OpResult {
        match (old, new) {
            (None, None) => Err(OpError::InvalidInput),
            (Some(old), None) => self.stage_delete(old),
            (None, Some(new)) => self.stage_insert(new, value),
            (Some(old), Some(new)) => self.stage_modify(old, new, value),
        }
    }

    fn stage_delete(&mut self, old: TokenHash) -> OpResult {
        let id = self.store.lookup(old).ok_or(OpError::UnknownHash(old))?;
        if self.store.is_staged(id) {
            return Err(OpError::AlreadyStaged);
        }

        self.store.stage(id, None);
        Ok(())
    }

    fn stage_insert(&mut self, new: TokenHash, value: V) -> OpResult {
        if self.store.contains_hash(new) {
            return Err(OpError::DuplicateHash(new));
        }

        let id = TokenId::new();
        self.store.map_hash(new, id);
        self.store.set_pooled(new, value.clone());
        self.store.set_seed_value(id, value);
        self.store.set_state(id, TokenState::inserted());
        self.store.stage(id, Some(new));
        Ok(())
    }

    fn stage_modify(&mut self, old: TokenHash, new: TokenHash, value: V) -> OpResult {
        let id = self.store.lookup(old).ok_or(OpError::UnknownHash(old))?;

        if let Some(other) = self.store.lookup(new) {
            if other != id {
                return Err(OpError::Collision(new));
            }
        }
        if self.store.is_staged(id) {
            return Err(OpError::AlreadyStaged);
        }
        if let Some(existing) = self.store.pooled(new) {
            if *existing != value {
                return Err(OpError::Collision(new));
            }
        }

        self.store.map_hash(new, id);
        self.store.set_pooled(new, value);
        self.store.stage(id, Some(new));
        Ok(())
    }

    /// Apply every staged change atomically and refill the change log.
    ///
    /// Per staged token: the old `current` hash loses its mapping when the
    /// target differs, `previous` advances to `current`, `current` becomes
    /// the target, and the target (if any) is mapped. Staging is cleared
    /// and the pool pruned afterwards. Total: never fails.
    pub fn commit(&mut self) {
        self.store.clear_changes();

        let staged: Vec<(TokenId, Option<TokenHash>)> = self.store.staged().collect();
        for (id, target) in staged {
            let Some(state) = self.store.state(id).copied() else {
                continue;
            };

            self.store.record_change(ChangeRecord {
                id,
                left: state.current,
                right: target,
            });

            if let Some(old) = state.current {
                if Some(old) != target {
                    self.store.unmap_hash(old);
                }
            }

            self.store.set_state(
                id,
                TokenState {
                    initial: state.initial,
                    previous: state.current,
                    current: target,
                },
            );

            if let Some(new) = target {
                self.store.map_hash(new, id);
            }
        }

        self.store.clear_staged();
        self.prune();
    }

    /// Drop every staged change without touching committed state.
    ///
    /// Total: never fails.
    pub fn discard(&mut self) {
        self.store.clear_staged();
        self.prune();
    }

    /// Evict pool entries for hashes no state slot or staged target
    /// references. Returns the eviction count.
    pub fn prune(&mut self) -> usize {
        let mut live: HashSet<TokenHash> = HashSet::new();
        for (_, state) in self.store.states() {
            live.extend(state.hashes());
        }
        for (_, target) in self.store.staged() {
            if let Some(hash) = target {
                live.insert(hash);
            }
        }

        self.store.prune(&live)
    }
}
