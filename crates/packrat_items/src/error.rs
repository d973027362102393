//! # Catalog Error Types
//!
//! All errors that can occur while loading or validating item kinds.

use thiserror::Error;

/// Errors that can occur in the item catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A kind failed validation (zero-size footprint, bad stack limits).
    #[error("invalid item kind '{id}': {reason}")]
    InvalidKind {
        /// The offending kind's identifier.
        id: String,
        /// Human-readable reason the kind was rejected.
        reason: String,
    },

    /// Two kinds in the same catalog share an identifier.
    #[error("duplicate item kind: {0}")]
    DuplicateKind(String),

    /// The catalog file could not be read or parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
