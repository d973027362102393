//! # Placed Items
//!
//! A placed item is one live entry in the registry: a kind, an anchor cell,
//! a rotation flag and a quantity. The footprint is always computed from the
//! kind's static extents plus the rotation flag, never cached, so a rotation
//! toggle can never leave a stale size behind.

use packrat_items::ItemKind;

/// Stable identifier for a registry slot.
///
/// Slot indices are assigned at placement (registry length before append)
/// and are never reused: removal tombstones the slot and later placements
/// keep appending. External references to a slot stay valid for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SlotIndex(u32);

impl SlotIndex {
    /// Creates a slot index from a raw registry position.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw registry position.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the registry position as a `usize` for indexing.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Effective extents of an item at a given rotation.
///
/// Computed on every access from the kind's unrotated extents; rotation is a
/// transform, not stored state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Footprint {
    /// Effective width in grid cells.
    pub width: u32,
    /// Effective height in grid cells.
    pub height: u32,
}

impl Footprint {
    /// Computes the effective footprint of a kind at a rotation.
    #[inline]
    #[must_use]
    pub const fn of(kind: &ItemKind, rotated: bool) -> Self {
        if rotated {
            Self {
                width: kind.height,
                height: kind.width,
            }
        } else {
            Self {
                width: kind.width,
                height: kind.height,
            }
        }
    }

    /// Total cells covered.
    #[inline]
    #[must_use]
    pub const fn area(self) -> u32 {
        self.width * self.height
    }

    /// Returns true if this footprint covers no cells.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Iterates the grid cells covered when anchored at `(x, y)`.
    ///
    /// Row-major, top-left first. Cells may lie outside the grid; callers
    /// that care clip against [`crate::OccupancyGrid::is_inside`].
    pub fn cells(self, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> {
        let (w, h) = (self.width as i32, self.height as i32);
        (0..h).flat_map(move |dy| (0..w).map(move |dx| (x + dx, y + dy)))
    }
}

/// One live entry in the placement registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedItem {
    /// The static kind this placement instantiates.
    pub kind: ItemKind,
    /// Anchor x: left column of the unrotated bounding box.
    pub x: i32,
    /// Anchor y: top row of the unrotated bounding box.
    pub y: i32,
    /// Whether the footprint is rotated 90 degrees.
    pub rotated: bool,
    /// Units in this placement. Validated at placement, never merged.
    pub quantity: u32,
}

impl PlacedItem {
    /// The item's current effective footprint.
    #[inline]
    #[must_use]
    pub const fn footprint(&self) -> Footprint {
        Footprint::of(&self.kind, self.rotated)
    }

    /// Iterates the grid cells this item currently covers.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        self.footprint().cells(self.x, self.y)
    }

    /// Returns true if this item covers the given cell.
    #[must_use]
    pub fn covers(&self, x: i32, y: i32) -> bool {
        let fp = self.footprint();
        x >= self.x
            && y >= self.y
            && x < self.x + fp.width as i32
            && y < self.y + fp.height as i32
    }
}
