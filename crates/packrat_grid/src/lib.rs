//! # PACKRAT Grid Placement Engine
//!
//! Spatial inventory logic for the PACKRAT engine: rectangular items of
//! varying footprint on a fixed-size 2D grid, with collision detection,
//! rotation, relocation and removal.
//!
//! ## Design Principles
//!
//! 1. **The grid is a cache** - the placed-item registry is the source of
//!    truth; the occupancy grid is a derived index rebuilt by
//!    [`GridInventory::resynchronize`]
//! 2. **Indices are stable** - removed slots are tombstoned, never compacted
//!    or reused, so presentation-side references stay valid for a session
//! 3. **Failed mutations are no-ops** - a move that cannot land rolls the
//!    vacated footprint back before returning
//! 4. **Queries never mutate** - [`GridInventory::fits`] runs on every drag
//!    frame and allocates nothing
//!
//! ## Thread Safety
//!
//! The engine is single-owner and synchronous. A concurrent host must
//! serialize mutating calls against each other and against any read that
//! needs a consistent grid+registry snapshot.
//!
//! ## Example
//!
//! ```rust,ignore
//! use packrat_grid::GridInventory;
//! use packrat_items::ItemKind;
//!
//! let mut inv = GridInventory::new(10, 6)?;
//! let shield = ItemKind::simple("tower_shield", 2, 3);
//!
//! let slot = inv.place(&shield, 0, 0, false)?;
//! inv.move_item(slot, 4, 1, true)?;
//! let shield_back = inv.remove(slot)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod engine;
pub mod error;
pub mod grid;
pub mod item;

pub use engine::GridInventory;
pub use error::{PlacementError, PlacementResult};
pub use grid::OccupancyGrid;
pub use item::{Footprint, PlacedItem, SlotIndex};
