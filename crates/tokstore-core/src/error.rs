//! Failure taxonomy for mutating operations.
//!
//! Mutating entry points report failures as values, never as panics;
//! success is plain `Ok(())`. Reader operations cannot fail at all.

use crate::token::TokenHash;
use thiserror::Error;

/// Why a seed or stage operation was rejected.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpError {
    /// The caller asked to introduce a hash that is already in use.
    #[error("hash {0} is already in use")]
    DuplicateHash(TokenHash),

    /// The caller referred to a hash that is not presently mapped.
    #[error("hash {0} does not name any token")]
    UnknownHash(TokenHash),

    /// The target hash is claimed by a different token, or the value pool
    /// already holds a different value at it.
    #[error("hash {0} collides with an existing token or value")]
    Collision(TokenHash),

    /// The token already has a staged change in this commit cycle.
    #[error("token already has a staged change")]
    AlreadyStaged,

    /// Both hashes were absent, or a required hash was unparseable.
    #[error("a required hash was absent or unparseable")]
    InvalidInput,
}

/// Result type of every mutating operation.
pub type OpResult = Result<(), OpError>;
