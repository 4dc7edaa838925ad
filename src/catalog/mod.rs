// src/catalog/mod.rs
// =============================================================================
// Catalog files and what we collect from them.
//
// Submodules:
// - loader: reads a directory of YAML catalog files into CatalogRecords
// - registry: turns records into the per-catalog path lists to check and
//   the name -> categories index
// =============================================================================

mod loader;
mod registry;

pub use loader::{load_catalogs, CatalogRecord};
pub use registry::{CategoryIndex, LinkSet};
