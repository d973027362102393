//! # Item Catalog
//!
//! Id-keyed collection of item kinds, loaded from a TOML file once at
//! startup. Every kind is validated on the way in so the grid engine can
//! trust the footprints it is handed.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};
use crate::kind::ItemKind;

/// On-disk shape of the catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    /// All kind definitions, in file order.
    #[serde(default, rename = "kind")]
    kinds: Vec<ItemKind>,
}

/// The loaded, validated set of item kinds.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    kinds: HashMap<String, ItemKind>,
}

impl ItemCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a TOML file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidConfig`] if the file cannot be read or
    /// parsed, and the validation errors of [`ItemCatalog::from_toml_str`].
    pub fn from_toml_path(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            CatalogError::InvalidConfig(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses a catalog from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidConfig`] on parse failure,
    /// [`CatalogError::InvalidKind`] if any kind fails validation, and
    /// [`CatalogError::DuplicateKind`] if two kinds share an id.
    pub fn from_toml_str(text: &str) -> CatalogResult<Self> {
        let file: CatalogFile = toml::from_str(text)
            .map_err(|e| CatalogError::InvalidConfig(format!("failed to parse catalog: {e}")))?;

        let mut catalog = Self::new();
        for kind in file.kinds {
            catalog.insert(kind)?;
        }
        Ok(catalog)
    }

    /// Adds a kind, validating it first.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidKind`] if validation fails, or
    /// [`CatalogError::DuplicateKind`] if the id is already present.
    pub fn insert(&mut self, kind: ItemKind) -> CatalogResult<()> {
        kind.validate()?;
        if self.kinds.contains_key(&kind.id) {
            return Err(CatalogError::DuplicateKind(kind.id));
        }
        self.kinds.insert(kind.id.clone(), kind);
        Ok(())
    }

    /// Looks up a kind by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ItemKind> {
        self.kinds.get(id)
    }

    /// Number of kinds in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns true if the catalog holds no kinds.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Iterates over all kinds in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemKind> {
        self.kinds.values()
    }
}
