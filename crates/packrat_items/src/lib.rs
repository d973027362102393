//! # PACKRAT Item Catalog
//!
//! Static item-kind definitions for the PACKRAT inventory engine.
//!
//! ## Design Principles
//!
//! 1. **Immutable after load** - kinds are balance data, loaded once at startup
//! 2. **External configuration** - the catalog is a TOML file, not code
//! 3. **Validate at the boundary** - the grid engine trusts the kinds it is
//!    handed, so every kind is checked here before it ever reaches a grid
//!
//! ## Example
//!
//! ```rust,ignore
//! use packrat_items::ItemCatalog;
//!
//! let catalog = ItemCatalog::from_toml_path("data/items.toml")?;
//! let sword = catalog.get("iron_sword").expect("missing kind");
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod catalog;
pub mod error;
pub mod kind;

pub use catalog::ItemCatalog;
pub use error::{CatalogError, CatalogResult};
pub use kind::ItemKind;
