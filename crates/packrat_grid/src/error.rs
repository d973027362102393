//! # Placement Error Types
//!
//! All errors that can occur in the placement engine. Every one of these is
//! an ordinary negative result for an interactive caller to retry on, never
//! a fatal condition, and every failed mutating call leaves the engine
//! untouched.

use thiserror::Error;

use crate::item::SlotIndex;

/// Errors that can occur in the placement engine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// The footprint extends outside the grid extents.
    #[error("footprint {width}x{height} at ({x}, {y}) exits the grid")]
    OutOfBounds {
        /// Requested anchor x.
        x: i32,
        /// Requested anchor y.
        y: i32,
        /// Effective footprint width.
        width: u32,
        /// Effective footprint height.
        height: u32,
    },

    /// The footprint overlaps a different live item.
    #[error("cell ({x}, {y}) already owned by slot {occupant}")]
    Conflict {
        /// First conflicting cell x.
        x: i32,
        /// First conflicting cell y.
        y: i32,
        /// The slot that owns the conflicting cell.
        occupant: SlotIndex,
    },

    /// The slot index is out of range or tombstoned.
    #[error("no live item at slot {0}")]
    InvalidIndex(SlotIndex),

    /// A grid or kind dimension is zero.
    #[error("invalid dimensions {width}x{height}")]
    BadDimensions {
        /// Offending width.
        width: u32,
        /// Offending height.
        height: u32,
    },

    /// The requested quantity violates the kind's stack contract.
    #[error("quantity {quantity} out of range 1..={max_stack}")]
    BadQuantity {
        /// Requested quantity.
        quantity: u32,
        /// The kind's stack limit (1 for non-stackable kinds).
        max_stack: u32,
    },
}

/// Result type for placement operations.
pub type PlacementResult<T> = Result<T, PlacementError>;
