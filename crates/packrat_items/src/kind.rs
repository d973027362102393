//! # Item Kind Definitions
//!
//! A kind is the static description of an item type: how many grid cells it
//! covers unrotated, whether it stacks, and which icon the presentation layer
//! should draw for it. Kinds are loaded from TOML and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Static definition of an item type.
///
/// The grid engine only ever reads `width` and `height`; everything else is
/// presentation or stacking metadata carried for the layers above it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemKind {
    /// Unique identifier, stable across sessions.
    pub id: String,
    /// Opaque icon reference (sprite id / asset path). Never read here.
    #[serde(default)]
    pub icon: String,
    /// Unrotated footprint width in grid cells.
    #[serde(default = "default_extent")]
    pub width: u32,
    /// Unrotated footprint height in grid cells.
    #[serde(default = "default_extent")]
    pub height: u32,
    /// Whether multiple units may share one placement.
    #[serde(default)]
    pub stackable: bool,
    /// Maximum units per placement. Always 1 for non-stackable kinds.
    #[serde(default = "default_max_stack")]
    pub max_stack: u32,
}

const fn default_extent() -> u32 {
    1
}

const fn default_max_stack() -> u32 {
    1
}

impl ItemKind {
    /// Creates a non-stackable 1x1 kind with the given id.
    ///
    /// Mostly useful for tests; production kinds come from the catalog.
    #[must_use]
    pub fn simple(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            icon: String::new(),
            width,
            height,
            stackable: false,
            max_stack: 1,
        }
    }

    /// Checks this kind against the catalog contract.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidKind`] if the footprint has a zero
    /// extent, `max_stack` is zero, or a non-stackable kind declares a stack
    /// limit above 1.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.id.is_empty() {
            return Err(CatalogError::InvalidKind {
                id: self.id.clone(),
                reason: "empty id".into(),
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(CatalogError::InvalidKind {
                id: self.id.clone(),
                reason: format!("zero-size footprint {}x{}", self.width, self.height),
            });
        }
        if self.max_stack == 0 {
            return Err(CatalogError::InvalidKind {
                id: self.id.clone(),
                reason: "max_stack must be at least 1".into(),
            });
        }
        if !self.stackable && self.max_stack != 1 {
            return Err(CatalogError::InvalidKind {
                id: self.id.clone(),
                reason: format!("non-stackable kind with max_stack {}", self.max_stack),
            });
        }
        Ok(())
    }

    /// Total cells covered by the unrotated footprint.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> u32 {
        self.width * self.height
    }
}
