//! Thread-safe handle and string-hash facade for the token state store.
//!
//! - [`handle`] - [`SharedTokenStore`], a cloneable handle serializing all
//!   store access behind one lock
//! - [`strings`] - [`StringTokenStore`], the default configuration: decimal
//!   string hashes over nullable string values
//!
//! # Quick start
//!
//! ```rust
//! use tokstore_sdk::StringTokenStore;
//!
//! let store = StringTokenStore::new();
//! store.seed("1", Some("A".to_string())).unwrap();
//! store.stage("1", "2", Some("B".to_string())).unwrap();
//! store.commit();
//!
//! let snap = store.snapshot("2").unwrap();
//! assert_eq!(snap.initial_hash.as_deref(), Some("1"));
//! assert_eq!(snap.current_value.as_deref(), Some("B"));
//! ```

pub mod handle;
pub mod strings;

pub use handle::SharedTokenStore;
pub use strings::{StringDiff, StringSnapshot, StringTokenStore, StringValue};

// Re-export the core vocabulary so most callers need only this crate.
pub use tokstore_core::{OpError, OpResult, StoreStats, TokenHash};
pub use tokstore_txn::{Diff, Snapshot};
