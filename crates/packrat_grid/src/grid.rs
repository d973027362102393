//! # Occupancy Grid
//!
//! A `width x height` array of cells, each holding the slot that covers it
//! or nothing. The grid is a derived view over the registry: it answers
//! "who owns this cell" in O(1), and the registry can rebuild it from
//! scratch at any time.

use crate::item::{Footprint, SlotIndex};

/// Cell-to-owner index over the placement registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    /// Row-major cells; `None` is empty.
    cells: Vec<Option<SlotIndex>>,
}

impl OccupancyGrid {
    /// Allocates an empty grid. Dimensions are validated by the caller.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; (width as usize) * (height as usize)],
        }
    }

    /// Grid width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns true iff `(x, y)` lies on the grid.
    #[inline]
    #[must_use]
    pub const fn is_inside(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Returns the slot occupying `(x, y)`, or `None` if the cell is empty
    /// or outside the grid.
    #[inline]
    #[must_use]
    pub fn occupant(&self, x: i32, y: i32) -> Option<SlotIndex> {
        if !self.is_inside(x, y) {
            return None;
        }
        self.cells[self.offset(x, y)]
    }

    /// Sets the occupant of `(x, y)`. Cells outside the grid are ignored,
    /// which lets resynchronization clip footprints that hang off the edge.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: Option<SlotIndex>) {
        if self.is_inside(x, y) {
            let offset = self.offset(x, y);
            self.cells[offset] = value;
        }
    }

    /// Returns true iff a footprint anchored at `(x, y)` lies fully on the
    /// grid.
    #[must_use]
    pub fn contains_rect(&self, x: i32, y: i32, footprint: Footprint) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        (x as u64) + u64::from(footprint.width) <= u64::from(self.width)
            && (y as u64) + u64::from(footprint.height) <= u64::from(self.height)
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of occupied cells. O(area); used by invariant checks, not by
    /// the placement hot path.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}
