//! # Grid Inventory Engine
//!
//! Owns the occupancy grid and the placed-item registry and keeps the two
//! consistent through every placement, move and removal. The registry is the
//! source of truth; the grid is a derived index that
//! [`GridInventory::resynchronize`] can rebuild from scratch.

use packrat_items::ItemKind;

use crate::error::{PlacementError, PlacementResult};
use crate::grid::OccupancyGrid;
use crate::item::{Footprint, PlacedItem, SlotIndex};

/// The placement engine: one grid, one ordered registry of placed items.
///
/// Registry slots are an arena with holes: removal tombstones a slot and
/// placement always appends, so a [`SlotIndex`] handed out once stays valid
/// (or dead) for the whole session.
#[derive(Clone, Debug)]
pub struct GridInventory {
    grid: OccupancyGrid,
    registry: Vec<Option<PlacedItem>>,
}

impl GridInventory {
    /// Creates an empty inventory grid.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::BadDimensions`] if either extent is zero.
    pub fn new(width: u32, height: u32) -> PlacementResult<Self> {
        if width == 0 || height == 0 {
            return Err(PlacementError::BadDimensions { width, height });
        }
        Ok(Self {
            grid: OccupancyGrid::new(width, height),
            registry: Vec::new(),
        })
    }

    /// Creates an inventory over a pre-populated registry and builds the
    /// grid from it.
    ///
    /// This is the bulk-edit entry point: fixtures and load paths seed the
    /// registry (tombstones included), and the grid is derived by replay.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::BadDimensions`] if either extent is zero.
    pub fn with_registry(
        width: u32,
        height: u32,
        registry: Vec<Option<PlacedItem>>,
    ) -> PlacementResult<Self> {
        let mut inv = Self::new(width, height)?;
        inv.registry = registry;
        inv.resynchronize();
        Ok(inv)
    }

    /// Grid width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Grid height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Returns true iff `(x, y)` lies on the grid.
    #[inline]
    #[must_use]
    pub const fn is_inside(&self, x: i32, y: i32) -> bool {
        self.grid.is_inside(x, y)
    }

    /// Returns the slot occupying `(x, y)`, or `None` for empty or
    /// off-grid cells. This is what pointer-to-item hit testing calls.
    #[inline]
    #[must_use]
    pub fn occupant_at(&self, x: i32, y: i32) -> Option<SlotIndex> {
        self.grid.occupant(x, y)
    }

    /// Returns the live item at `index`, or `None` for out-of-range or
    /// tombstoned slots.
    #[must_use]
    pub fn get(&self, index: SlotIndex) -> Option<&PlacedItem> {
        self.registry.get(index.index()).and_then(Option::as_ref)
    }

    /// Iterates live items in registry order with their slot indices.
    pub fn items(&self) -> impl Iterator<Item = (SlotIndex, &PlacedItem)> {
        self.registry.iter().enumerate().filter_map(|(i, slot)| {
            #[allow(clippy::cast_possible_truncation)]
            let index = SlotIndex::new(i as u32);
            slot.as_ref().map(|item| (index, item))
        })
    }

    /// Number of live items.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.registry.iter().filter(|s| s.is_some()).count()
    }

    /// Total registry length, tombstones included. The next placement gets
    /// this value as its slot index.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.registry.len()
    }

    /// Checks whether `kind` fits at `(x, y)` with the given rotation.
    ///
    /// Pure query, no side effects - this runs on every drag-preview frame.
    /// Cells owned by `ignore` count as free, which lets a move validate a
    /// destination that overlaps the mover's own current footprint.
    #[must_use]
    pub fn fits(
        &self,
        kind: &ItemKind,
        x: i32,
        y: i32,
        rotated: bool,
        ignore: Option<SlotIndex>,
    ) -> bool {
        self.check_placement(kind, x, y, rotated, ignore).is_ok()
    }

    /// Places a single unit of `kind` at `(x, y)`.
    ///
    /// # Errors
    ///
    /// See [`GridInventory::place_stack`].
    pub fn place(
        &mut self,
        kind: &ItemKind,
        x: i32,
        y: i32,
        rotated: bool,
    ) -> PlacementResult<SlotIndex> {
        self.place_stack(kind, x, y, rotated, 1)
    }

    /// Places `quantity` units of `kind` at `(x, y)` as one new item.
    ///
    /// On success the registry grows by one, the new item's cells flip to
    /// occupied, and the new slot index (registry length before append) is
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`PlacementError::BadQuantity`] if `quantity` is zero or exceeds
    ///   the kind's stack limit (1 for non-stackable kinds)
    /// - [`PlacementError::BadDimensions`] for a zero-area kind
    /// - [`PlacementError::OutOfBounds`] if the footprint exits the grid
    /// - [`PlacementError::Conflict`] if any covered cell is owned by a
    ///   live item
    ///
    /// All failures leave the engine untouched.
    pub fn place_stack(
        &mut self,
        kind: &ItemKind,
        x: i32,
        y: i32,
        rotated: bool,
        quantity: u32,
    ) -> PlacementResult<SlotIndex> {
        let max_stack = if kind.stackable { kind.max_stack } else { 1 };
        if quantity == 0 || quantity > max_stack {
            return Err(PlacementError::BadQuantity {
                quantity,
                max_stack,
            });
        }

        self.check_placement(kind, x, y, rotated, None)?;

        #[allow(clippy::cast_possible_truncation)]
        let index = SlotIndex::new(self.registry.len() as u32);
        self.mark(Footprint::of(kind, rotated), x, y, Some(index));
        self.registry.push(Some(PlacedItem {
            kind: kind.clone(),
            x,
            y,
            rotated,
            quantity,
        }));

        tracing::debug!(slot = index.raw(), kind = %kind.id, x, y, rotated, "placed item");
        Ok(index)
    }

    /// Relocates and/or rotates the item at `index`.
    ///
    /// The item's current footprint is vacated first so the destination
    /// check is not blocked by the mover's own cells (a one-cell shift
    /// overlaps its old footprint and must still succeed). If the
    /// destination does not fit, the old footprint is restored and the item
    /// is untouched: a failed move is a no-op.
    ///
    /// # Errors
    ///
    /// - [`PlacementError::InvalidIndex`] for out-of-range or tombstoned
    ///   slots
    /// - [`PlacementError::OutOfBounds`] / [`PlacementError::Conflict`] if
    ///   the destination does not fit (state rolled back)
    pub fn move_item(
        &mut self,
        index: SlotIndex,
        x: i32,
        y: i32,
        rotated: bool,
    ) -> PlacementResult<()> {
        let Some(item) = self.get(index) else {
            return Err(PlacementError::InvalidIndex(index));
        };
        let kind = item.kind.clone();
        let (old_x, old_y) = (item.x, item.y);
        let old_fp = item.footprint();

        self.mark(old_fp, old_x, old_y, None);

        match self.check_placement(&kind, x, y, rotated, Some(index)) {
            Ok(()) => {
                self.mark(Footprint::of(&kind, rotated), x, y, Some(index));
                if let Some(item) = self.registry.get_mut(index.index()).and_then(Option::as_mut) {
                    item.x = x;
                    item.y = y;
                    item.rotated = rotated;
                }
                tracing::debug!(slot = index.raw(), x, y, rotated, "moved item");
                Ok(())
            }
            Err(err) => {
                // Mandatory rollback: restore the vacated footprint.
                self.mark(old_fp, old_x, old_y, Some(index));
                Err(err)
            }
        }
    }

    /// Removes the item at `index`, vacating its cells and tombstoning the
    /// slot. The slot is never reused; later placements keep appending.
    ///
    /// Returns the removed item so a caller can hand it to a cursor, drop
    /// routine or another grid.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::InvalidIndex`] for out-of-range or
    /// tombstoned slots; state is untouched.
    pub fn remove(&mut self, index: SlotIndex) -> PlacementResult<PlacedItem> {
        let Some(slot) = self.registry.get_mut(index.index()) else {
            return Err(PlacementError::InvalidIndex(index));
        };
        let Some(item) = slot.take() else {
            return Err(PlacementError::InvalidIndex(index));
        };

        self.mark(item.footprint(), item.x, item.y, None);
        tracing::debug!(slot = index.raw(), kind = %item.kind.id, "removed item");
        Ok(item)
    }

    /// Rebuilds the grid from the registry.
    ///
    /// Clears every cell, then replays each live item's footprint in
    /// registry order. This is best-effort repair, not validation: if the
    /// registry was edited into an overlapping state, later items win and
    /// the overlap is logged. Cells hanging off the grid are clipped.
    pub fn resynchronize(&mut self) {
        self.grid.clear();

        for (i, slot) in self.registry.iter().enumerate() {
            let Some(item) = slot.as_ref() else { continue };
            #[allow(clippy::cast_possible_truncation)]
            let index = SlotIndex::new(i as u32);
            for (cx, cy) in item.cells() {
                if let Some(prev) = self.grid.occupant(cx, cy) {
                    tracing::warn!(
                        cell = ?(cx, cy),
                        loser = prev.raw(),
                        winner = index.raw(),
                        "resynchronize repaired overlapping footprints"
                    );
                }
                self.grid.set(cx, cy, Some(index));
            }
        }
    }

    /// Classifies a candidate placement against the current grid.
    fn check_placement(
        &self,
        kind: &ItemKind,
        x: i32,
        y: i32,
        rotated: bool,
        ignore: Option<SlotIndex>,
    ) -> PlacementResult<()> {
        let fp = Footprint::of(kind, rotated);
        if fp.is_empty() {
            return Err(PlacementError::BadDimensions {
                width: fp.width,
                height: fp.height,
            });
        }
        if !self.grid.contains_rect(x, y, fp) {
            return Err(PlacementError::OutOfBounds {
                x,
                y,
                width: fp.width,
                height: fp.height,
            });
        }
        for (cx, cy) in fp.cells(x, y) {
            if let Some(occupant) = self.grid.occupant(cx, cy) {
                if Some(occupant) != ignore {
                    return Err(PlacementError::Conflict {
                        x: cx,
                        y: cy,
                        occupant,
                    });
                }
            }
        }
        Ok(())
    }

    /// Writes `value` over a footprint's cells. Off-grid cells are clipped;
    /// bounds are enforced by `check_placement` before any commit.
    fn mark(&mut self, footprint: Footprint, x: i32, y: i32, value: Option<SlotIndex>) {
        for (cx, cy) in footprint.cells(x, y) {
            self.grid.set(cx, cy, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_2x2() -> ItemKind {
        ItemKind::simple("crate", 2, 2)
    }

    fn kind_3x2() -> ItemKind {
        ItemKind::simple("rifle", 3, 2)
    }

    fn inv_10x6() -> GridInventory {
        GridInventory::new(10, 6).unwrap()
    }

    #[test]
    fn test_zero_dimension_grid_rejected() {
        assert!(matches!(
            GridInventory::new(0, 5),
            Err(PlacementError::BadDimensions { .. })
        ));
        assert!(matches!(
            GridInventory::new(5, 0),
            Err(PlacementError::BadDimensions { .. })
        ));
    }

    #[test]
    fn test_place_marks_cells() {
        let mut inv = inv_10x6();
        let slot = inv.place(&kind_2x2(), 0, 0, false).unwrap();
        assert_eq!(slot, SlotIndex::new(0));

        for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(inv.occupant_at(x, y), Some(slot));
        }
        assert_eq!(inv.occupant_at(2, 0), None);
        assert_eq!(inv.live_count(), 1);
    }

    #[test]
    fn test_place_flush_against_far_edge() {
        let mut inv = inv_10x6();
        let kind = kind_2x2();
        // x = width - kind.width, y = height - kind.height.
        assert!(inv.place(&kind, 8, 4, false).is_ok());

        let err = inv.place(&kind, 9, 4, false).unwrap_err();
        assert!(matches!(err, PlacementError::OutOfBounds { .. }));
    }

    #[test]
    fn test_place_negative_anchor_out_of_bounds() {
        let mut inv = inv_10x6();
        assert!(matches!(
            inv.place(&kind_2x2(), -1, 0, false),
            Err(PlacementError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_place_conflict_reports_occupant() {
        let mut inv = inv_10x6();
        let first = inv.place(&kind_2x2(), 0, 0, false).unwrap();

        let err = inv.place(&kind_2x2(), 1, 1, false).unwrap_err();
        assert!(matches!(err, PlacementError::Conflict { occupant, .. } if occupant == first));
        // Failed placement is a no-op.
        assert_eq!(inv.slot_count(), 1);
    }

    #[test]
    fn test_rotated_placement_uses_swapped_extents() {
        let mut inv = GridInventory::new(2, 3).unwrap();
        let rifle = kind_3x2();
        // 3x2 does not fit a 2x3 grid unrotated, but does rotated.
        assert!(inv.place(&rifle, 0, 0, false).is_err());
        assert!(inv.place(&rifle, 0, 0, true).is_ok());
        assert_eq!(inv.occupant_at(1, 2), Some(SlotIndex::new(0)));
    }

    #[test]
    fn test_fits_ignores_own_footprint() {
        let mut inv = inv_10x6();
        let kind = kind_2x2();
        let slot = inv.place(&kind, 0, 0, false).unwrap();

        assert!(!inv.fits(&kind, 0, 0, false, None));
        assert!(inv.fits(&kind, 0, 0, false, Some(slot)));
    }

    #[test]
    fn test_fits_never_mutates() {
        let mut inv = inv_10x6();
        let slot = inv.place(&kind_2x2(), 3, 2, false).unwrap();

        let before = inv.clone();
        let _ = inv.fits(&kind_3x2(), 2, 1, true, Some(slot));
        let _ = inv.fits(&kind_3x2(), -4, 9, false, None);
        assert_eq!(inv.occupant_at(3, 2), before.occupant_at(3, 2));
        assert_eq!(inv.live_count(), before.live_count());
    }

    #[test]
    fn test_move_to_same_spot_roundtrip() {
        let mut inv = inv_10x6();
        let slot = inv.place(&kind_2x2(), 4, 2, false).unwrap();

        inv.move_item(slot, 4, 2, false).unwrap();

        let item = inv.get(slot).unwrap();
        assert_eq!((item.x, item.y, item.rotated), (4, 2, false));
        assert_eq!(inv.occupant_at(5, 3), Some(slot));
    }

    #[test]
    fn test_move_overlapping_old_footprint() {
        let mut inv = inv_10x6();
        let slot = inv.place(&kind_2x2(), 0, 0, false).unwrap();

        // New footprint (1,1)-(2,2) shares cell (1,1) with the old one;
        // succeeds because the old footprint is vacated before the check.
        inv.move_item(slot, 1, 1, false).unwrap();

        assert_eq!(inv.occupant_at(0, 0), None);
        assert_eq!(inv.occupant_at(1, 1), Some(slot));
        assert_eq!(inv.occupant_at(2, 2), Some(slot));
    }

    #[test]
    fn test_failed_move_rolls_back() {
        let mut inv = inv_10x6();
        let a = inv.place(&kind_2x2(), 0, 0, false).unwrap();
        let b = inv.place(&kind_3x2(), 3, 1, false).unwrap();

        let err = inv.move_item(b, 0, 0, false).unwrap_err();
        assert!(matches!(err, PlacementError::Conflict { occupant, .. } if occupant == a));

        // B untouched, its old cells restored.
        let item = inv.get(b).unwrap();
        assert_eq!((item.x, item.y), (3, 1));
        assert_eq!(inv.occupant_at(5, 2), Some(b));
        assert_eq!(inv.occupant_at(3, 1), Some(b));
    }

    #[test]
    fn test_failed_move_out_of_bounds_rolls_back() {
        let mut inv = inv_10x6();
        let slot = inv.place(&kind_3x2(), 0, 0, false).unwrap();

        assert!(matches!(
            inv.move_item(slot, 8, 0, false),
            Err(PlacementError::OutOfBounds { .. })
        ));
        assert_eq!(inv.occupant_at(2, 1), Some(slot));
    }

    #[test]
    fn test_move_rotation_in_place() {
        let mut inv = inv_10x6();
        let slot = inv.place(&kind_3x2(), 0, 0, false).unwrap();

        inv.move_item(slot, 0, 0, true).unwrap();

        let item = inv.get(slot).unwrap();
        assert!(item.rotated);
        // Rotated 3x2 covers columns 0-1, rows 0-2.
        assert_eq!(inv.occupant_at(1, 2), Some(slot));
        assert_eq!(inv.occupant_at(2, 0), None);
    }

    #[test]
    fn test_remove_vacates_and_tombstones() {
        let mut inv = inv_10x6();
        let kind = kind_2x2();
        let slot = inv.place(&kind, 0, 0, false).unwrap();

        let removed = inv.remove(slot).unwrap();
        assert_eq!(removed.kind.id, "crate");

        assert!(inv.fits(&kind, 0, 0, false, None));
        assert_eq!(inv.get(slot), None);
        assert_eq!(inv.live_count(), 0);
        // Tombstone remains; the slot is not compacted away.
        assert_eq!(inv.slot_count(), 1);
    }

    #[test]
    fn test_dead_indices_rejected() {
        let mut inv = inv_10x6();
        let slot = inv.place(&kind_2x2(), 0, 0, false).unwrap();
        inv.remove(slot).unwrap();

        assert!(matches!(
            inv.move_item(slot, 2, 2, false),
            Err(PlacementError::InvalidIndex(_))
        ));
        assert!(matches!(
            inv.remove(slot),
            Err(PlacementError::InvalidIndex(_))
        ));
        assert!(matches!(
            inv.remove(SlotIndex::new(99)),
            Err(PlacementError::InvalidIndex(_))
        ));
    }

    #[test]
    fn test_indices_never_reused() {
        let mut inv = inv_10x6();
        let first = inv.place(&kind_2x2(), 0, 0, false).unwrap();
        inv.remove(first).unwrap();

        // Same spot, new index: the registry keeps growing past tombstones.
        let second = inv.place(&kind_2x2(), 0, 0, false).unwrap();
        assert_eq!(second, SlotIndex::new(1));
        assert_eq!(inv.slot_count(), 2);
    }

    #[test]
    fn test_quantity_validated_against_stack_limit() {
        let mut inv = inv_10x6();
        let mut arrows = ItemKind::simple("arrows", 1, 1);
        arrows.stackable = true;
        arrows.max_stack = 50;

        let slot = inv.place_stack(&arrows, 0, 0, false, 50).unwrap();
        assert_eq!(inv.get(slot).unwrap().quantity, 50);

        assert!(matches!(
            inv.place_stack(&arrows, 1, 0, false, 51),
            Err(PlacementError::BadQuantity { .. })
        ));
        assert!(matches!(
            inv.place_stack(&arrows, 1, 0, false, 0),
            Err(PlacementError::BadQuantity { .. })
        ));
    }

    #[test]
    fn test_non_stackable_quantity_capped_at_one() {
        let mut inv = inv_10x6();
        assert!(matches!(
            inv.place_stack(&kind_2x2(), 0, 0, false, 2),
            Err(PlacementError::BadQuantity { max_stack: 1, .. })
        ));
    }

    #[test]
    fn test_zero_area_kind_rejected_defensively() {
        let mut inv = inv_10x6();
        let ghost = ItemKind::simple("ghost", 0, 2);
        assert!(!inv.fits(&ghost, 0, 0, false, None));
        assert!(matches!(
            inv.place(&ghost, 0, 0, false),
            Err(PlacementError::BadDimensions { .. })
        ));
    }

    #[test]
    fn test_resynchronize_idempotent() {
        let mut inv = inv_10x6();
        let a = inv.place(&kind_2x2(), 0, 0, false).unwrap();
        let b = inv.place(&kind_3x2(), 3, 1, false).unwrap();
        inv.move_item(b, 3, 2, true).unwrap();
        inv.remove(a).unwrap();

        let before = inv.grid.clone();
        inv.resynchronize();
        assert_eq!(inv.grid, before);
    }

    #[test]
    fn test_with_registry_builds_grid() {
        let items = vec![
            Some(PlacedItem {
                kind: kind_2x2(),
                x: 0,
                y: 0,
                rotated: false,
                quantity: 1,
            }),
            None, // tombstone survives seeding
            Some(PlacedItem {
                kind: kind_3x2(),
                x: 3,
                y: 1,
                rotated: false,
                quantity: 1,
            }),
        ];

        let inv = GridInventory::with_registry(10, 6, items).unwrap();
        assert_eq!(inv.occupant_at(1, 1), Some(SlotIndex::new(0)));
        assert_eq!(inv.occupant_at(5, 2), Some(SlotIndex::new(2)));
        assert_eq!(inv.live_count(), 2);
        assert_eq!(inv.slot_count(), 3);
    }

    #[test]
    fn test_resynchronize_later_item_wins_overlap() {
        // Deliberately corrupt registry: two items on the same cells.
        let items = vec![
            Some(PlacedItem {
                kind: kind_2x2(),
                x: 0,
                y: 0,
                rotated: false,
                quantity: 1,
            }),
            Some(PlacedItem {
                kind: kind_2x2(),
                x: 1,
                y: 1,
                rotated: false,
                quantity: 1,
            }),
        ];

        let inv = GridInventory::with_registry(10, 6, items).unwrap();
        // Best-effort repair: the shared cell belongs to the later item.
        assert_eq!(inv.occupant_at(1, 1), Some(SlotIndex::new(1)));
        assert_eq!(inv.occupant_at(0, 0), Some(SlotIndex::new(0)));
    }

    #[test]
    fn test_resynchronize_clips_off_grid_footprints() {
        let items = vec![Some(PlacedItem {
            kind: kind_3x2(),
            x: 8,
            y: 5,
            rotated: false,
            quantity: 1,
        })];

        let inv = GridInventory::with_registry(10, 6, items).unwrap();
        // Only the on-grid part of the footprint is marked.
        assert_eq!(inv.occupant_at(8, 5), Some(SlotIndex::new(0)));
        assert_eq!(inv.occupant_at(9, 5), Some(SlotIndex::new(0)));
    }

    #[test]
    fn test_items_iterates_live_in_order() {
        let mut inv = inv_10x6();
        let a = inv.place(&kind_2x2(), 0, 0, false).unwrap();
        let b = inv.place(&kind_2x2(), 4, 0, false).unwrap();
        let c = inv.place(&kind_2x2(), 8, 0, false).unwrap();
        inv.remove(b).unwrap();

        let indices: Vec<_> = inv.items().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![a, c]);
    }
}
