//! Transactional mutation and derived read views for the token state store.
//!
//! - [`mutator`] - seed, stage, commit, discard, and pool pruning; the
//!   only writer of store state
//! - [`reader`] - point snapshots, the full snapshot sequence, and the
//!   three diff views, derived read-only
//!
//! Both operate on a borrowed [`tokstore_core::TokenStore`]; serialization
//! of writers against readers is the concern of `tokstore-sdk`.

pub mod mutator;
pub mod reader;

pub use mutator::Mutator;
pub use reader::{Diff, Reader, Snapshot};
