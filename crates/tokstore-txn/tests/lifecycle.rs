//! End-to-end lifecycle tests for the token state store.
//!
//! These drive seed / stage / commit / discard sequences through the
//! public API and check the derived views after each step, including the
//! deliberate visibility asymmetry between the point snapshot (committed
//! image) and the full current snapshot (uncommitted image).

use tokstore_core::{OpError, TokenHash, TokenStore};
use tokstore_txn::{Mutator, Reader};

type Value = Option<String>;

fn val(s: &str) -> Value {
    Some(s.to_string())
}

fn h(n: i64) -> TokenHash {
    TokenHash(n)
}

#[test]
fn test_seed_modify_commit() {
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("A")).unwrap();
    mutator.stage(Some(h(1)), Some(h(2)), val("B")).unwrap();
    mutator.commit();

    let reader = Reader::new(&store);
    let snap = reader.snapshot(h(2)).unwrap();
    assert_eq!(snap.initial_hash, Some(h(1)));
    assert_eq!(snap.previous_hash, Some(h(1)));
    assert_eq!(snap.current_hash, Some(h(2)));
    assert_eq!(snap.initial_value, val("A"));
    assert_eq!(snap.previous_value, val("A"));
    assert_eq!(snap.current_value, val("B"));

    // The old hash no longer names the token.
    assert!(reader.snapshot(h(1)).is_none());
}

#[test]
fn test_three_step_chain() {
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("A")).unwrap();
    mutator.stage(Some(h(1)), Some(h(2)), val("B")).unwrap();
    mutator.commit();
    mutator.stage(Some(h(2)), Some(h(3)), val("C")).unwrap();
    mutator.commit();

    let snap = Reader::new(&store).snapshot(h(3)).unwrap();
    assert_eq!(snap.initial_hash, Some(h(1)));
    assert_eq!(snap.previous_hash, Some(h(2)));
    assert_eq!(snap.current_hash, Some(h(3)));
    assert_eq!(snap.initial_value, val("A"));
    assert_eq!(snap.previous_value, val("B"));
    assert_eq!(snap.current_value, val("C"));
}

#[test]
fn test_delete_then_reinsert_same_hash() {
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("X")).unwrap();
    mutator.stage(Some(h(1)), None, None).unwrap();
    mutator.commit();
    mutator.stage(None, Some(h(1)), val("Y")).unwrap();
    mutator.commit();

    let snaps = Reader::new(&store).current_snapshots();
    assert_eq!(snaps.len(), 2);

    let deleted = snaps
        .iter()
        .find(|s| s.current_hash.is_none())
        .expect("deleted token is retained");
    assert_eq!(deleted.initial_hash, Some(h(1)));
    assert_eq!(deleted.initial_value, val("X"));

    let inserted = snaps
        .iter()
        .find(|s| s.current_hash.is_some())
        .expect("fresh token exists");
    assert_eq!(inserted.initial_hash, None);
    assert_eq!(inserted.current_hash, Some(h(1)));
    assert_eq!(inserted.current_value, val("Y"));
}

#[test]
fn test_modify_collides_with_existing_hash() {
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("A")).unwrap();
    mutator.seed(h(2), val("B")).unwrap();

    assert_eq!(
        mutator.stage(Some(h(1)), Some(h(2)), val("A*")),
        Err(OpError::Collision(h(2)))
    );

    // Committed state is unchanged.
    let reader = Reader::new(&store);
    assert_eq!(reader.snapshot(h(1)).unwrap().current_value, val("A"));
    assert_eq!(reader.snapshot(h(2)).unwrap().current_value, val("B"));
    assert!(reader.uncommitted_diff().is_empty());
}

#[test]
fn test_discard_rolls_back() {
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("A")).unwrap();
    mutator.stage(Some(h(1)), Some(h(2)), val("A*")).unwrap();
    mutator.discard();

    let reader = Reader::new(&store);
    assert!(reader.uncommitted_diff().is_empty());

    let snap = reader.snapshot(h(1)).unwrap();
    assert_eq!(snap.current_hash, Some(h(1)));
    assert_eq!(snap.current_value, val("A"));
}

#[test]
fn test_mixed_batch_committed_diff() {
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("one")).unwrap();
    mutator.seed(h(2), val("two")).unwrap();
    mutator.seed(h(3), val("three")).unwrap();

    mutator.stage(Some(h(1)), Some(h(11)), val("one*")).unwrap();
    mutator.stage(Some(h(2)), None, None).unwrap();
    mutator.stage(None, Some(h(12)), val("twelve")).unwrap();
    mutator.commit();

    let diffs = Reader::new(&store).committed_diff();
    assert_eq!(diffs.len(), 3);

    let modify = diffs.iter().find(|d| d.left_hash == Some(h(1))).unwrap();
    assert_eq!(modify.right_hash, Some(h(11)));
    assert_eq!(modify.left_value, val("one"));
    assert_eq!(modify.right_value, val("one*"));

    let delete = diffs.iter().find(|d| d.left_hash == Some(h(2))).unwrap();
    assert_eq!(delete.right_hash, None);
    assert_eq!(delete.left_value, val("two"));
    assert_eq!(delete.right_value, None);

    let insert = diffs.iter().find(|d| d.left_hash.is_none()).unwrap();
    assert_eq!(insert.right_hash, Some(h(12)));
    assert_eq!(insert.left_value, None);
    assert_eq!(insert.right_value, val("twelve"));
}

#[test]
fn test_deleted_hash_is_free_for_reseeding() {
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("v")).unwrap();
    mutator.stage(Some(h(1)), None, None).unwrap();
    mutator.commit();

    assert_eq!(mutator.seed(h(1), val("v2")), Ok(()));

    // Two tokens now exist: the retained deleted one and the new one.
    let snaps = Reader::new(&store).current_snapshots();
    assert_eq!(snaps.len(), 2);
}

#[test]
fn test_commit_idempotent_on_empty_staging() {
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("A")).unwrap();
    mutator.stage(Some(h(1)), Some(h(2)), val("B")).unwrap();
    mutator.commit();
    mutator.commit();

    let reader = Reader::new(&store);
    assert!(reader.committed_diff().is_empty());
    let snap = reader.snapshot(h(2)).unwrap();
    assert_eq!(snap.current_hash, Some(h(2)));
    assert_eq!(snap.previous_hash, Some(h(1)));
}

#[test]
fn test_discard_is_left_inverse_of_stage() {
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("A")).unwrap();
    mutator.seed(h(2), val("B")).unwrap();

    mutator.stage(Some(h(1)), Some(h(3)), val("A*")).unwrap();
    mutator.stage(Some(h(2)), None, None).unwrap();
    mutator.discard();

    let reader = Reader::new(&store);
    assert!(reader.uncommitted_diff().is_empty());
    assert_eq!(reader.snapshot(h(1)).unwrap().current_value, val("A"));
    assert_eq!(reader.snapshot(h(2)).unwrap().current_value, val("B"));
    assert!(reader.full_diff().is_empty());
}

#[test]
fn test_full_diff_includes_committed_deletions() {
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("gone")).unwrap();
    mutator.stage(Some(h(1)), None, None).unwrap();
    mutator.commit();

    let diffs = Reader::new(&store).full_diff();
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].left_hash, Some(h(1)));
    assert_eq!(diffs[0].right_hash, None);
    assert_eq!(diffs[0].left_value, val("gone"));
    assert_eq!(diffs[0].right_value, None);
}

#[test]
fn test_full_diff_excludes_inserted_then_deleted_tokens() {
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.stage(None, Some(h(5)), val("ephemeral")).unwrap();
    mutator.commit();
    mutator.stage(Some(h(5)), None, None).unwrap();
    mutator.commit();

    // initial = None and current = None: no net contribution.
    assert!(Reader::new(&store).full_diff().is_empty());
}

#[test]
fn test_full_diff_reports_net_insertion() {
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.stage(None, Some(h(5)), val("new")).unwrap();
    mutator.commit();

    let diffs = Reader::new(&store).full_diff();
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].left_hash, None);
    assert_eq!(diffs[0].left_value, None);
    assert_eq!(diffs[0].right_hash, Some(h(5)));
    assert_eq!(diffs[0].right_value, val("new"));
}

#[test]
fn test_current_hash_always_mapped_after_commit() {
    // Quantified invariant: a token's committed hash maps back to it.
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("A")).unwrap();
    mutator.seed(h(2), val("B")).unwrap();
    mutator.stage(Some(h(1)), Some(h(10)), val("A*")).unwrap();
    mutator.stage(Some(h(2)), None, None).unwrap();
    mutator.stage(None, Some(h(20)), val("C")).unwrap();
    mutator.commit();

    for (id, state) in store.states() {
        match state.current {
            Some(current) => assert_eq!(store.lookup(current), Some(id)),
            None => {}
        }
    }
}

#[test]
fn test_pool_only_holds_referenced_hashes() {
    // Quantified invariant: after prune, every pooled hash is live.
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("A")).unwrap();
    mutator.stage(Some(h(1)), Some(h(2)), val("B")).unwrap();
    mutator.commit();
    mutator.stage(Some(h(2)), Some(h(3)), val("C")).unwrap();
    mutator.commit();
    mutator.stage(Some(h(3)), Some(h(4)), val("D")).unwrap();
    mutator.commit();

    // State is (1, 3, 4); hash 2 is no longer referenced by any slot.
    assert_eq!(store.pooled(h(1)), Some(&val("A")));
    assert!(store.pooled(h(2)).is_none());
    assert_eq!(store.pooled(h(3)), Some(&val("C")));
    assert_eq!(store.pooled(h(4)), Some(&val("D")));
}

#[test]
fn test_sanctuary_outlives_pool_eviction() {
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("origin")).unwrap();
    mutator.stage(Some(h(1)), Some(h(2)), val("B")).unwrap();
    mutator.commit();
    mutator.stage(Some(h(2)), Some(h(3)), val("C")).unwrap();
    mutator.commit();
    mutator.stage(Some(h(3)), None, None).unwrap();
    mutator.commit();

    // The initial value still reaches both reporting paths.
    let reader = Reader::new(&store);
    let full = reader.full_diff();
    assert_eq!(full.len(), 1);
    assert_eq!(full[0].left_value, val("origin"));

    let snaps = reader.current_snapshots();
    assert_eq!(snaps[0].initial_value, val("origin"));
}

#[test]
fn test_seed_after_modify_reuses_abandoned_hash() {
    // After a rename the old hash is unmapped but still pooled (it is the
    // token's initial). Seeding it again claims the pool slot for the new
    // token's value.
    let mut store: TokenStore<Value> = TokenStore::new();
    let mut mutator = Mutator::new(&mut store);
    mutator.seed(h(1), val("A")).unwrap();
    mutator.stage(Some(h(1)), Some(h(2)), val("B")).unwrap();
    mutator.commit();

    assert_eq!(mutator.seed(h(1), val("Z")), Ok(()));

    let reader = Reader::new(&store);
    assert_eq!(reader.snapshot(h(1)).unwrap().current_value, val("Z"));
    // The first token's previous/initial value lookups now observe the
    // overwritten pool entry; its sanctuary copy is untouched.
    let snap = reader.snapshot(h(2)).unwrap();
    assert_eq!(snap.previous_value, val("Z"));
    assert_eq!(snap.initial_value, val("A"));
}
