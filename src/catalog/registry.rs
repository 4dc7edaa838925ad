// src/catalog/registry.rs
// =============================================================================
// Collects what the later stages need from loaded catalogs.
//
// - LinkSet: per catalog file, the distinct documentation paths to check.
//   The primary path always comes first, even when it is missing (it is
//   then an empty string); import/export overrides follow if they are new.
// - CategoryIndex: catalog name -> declared categories, in load order.
//
// Pure data shuffling, no I/O.
// =============================================================================

use super::CatalogRecord;

/// Paths to check, grouped by catalog file name, in load order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkSet {
    entries: Vec<(String, Vec<String>)>,
}

impl LinkSet {
    pub fn from_records(records: &[CatalogRecord]) -> Self {
        let entries = records
            .iter()
            .map(|record| (record.file_name.clone(), doc_paths(record)))
            .collect();

        LinkSet { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, paths)| (key.as_str(), paths.as_slice()))
    }

    #[cfg(test)]
    pub fn get(&self, file_name: &str) -> Option<&[String]> {
        self.iter()
            .find(|(key, _)| *key == file_name)
            .map(|(_, paths)| paths)
    }

    /// Flattens to one (catalog, path) pair per check.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .flat_map(|(key, paths)| paths.iter().map(move |p| (key.clone(), p.clone())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Builds the ordered, duplicate-free path list for one catalog.
pub fn doc_paths(record: &CatalogRecord) -> Vec<String> {
    let mut paths = vec![record.docs_path.clone().unwrap_or_default()];

    for extra in [&record.import_path, &record.export_path].into_iter().flatten() {
        if !paths.contains(extra) {
            paths.push(extra.clone());
        }
    }

    paths
}

/// Catalog name -> categories, in the order catalogs were loaded.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CategoryIndex {
    entries: Vec<(String, Vec<String>)>,
}

impl CategoryIndex {
    /// Catalogs without a `name` are keyed by file name. A repeated name
    /// keeps its first position and takes the later category list.
    pub fn from_records(records: &[CatalogRecord]) -> Self {
        let mut index = CategoryIndex::default();

        for record in records {
            let key = record
                .name
                .clone()
                .unwrap_or_else(|| record.file_name.clone());
            let categories = record.categories.clone().unwrap_or_default();

            match index.entries.iter_mut().find(|(name, _)| *name == key) {
                Some(existing) => existing.1 = categories,
                None => index.entries.push((key, categories)),
            }
        }

        index
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, cats)| (name.as_str(), cats.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a Vec of pairs and not a HashMap?
//    - Reports follow load order, which a HashMap would scramble
//    - Catalog counts are small, so the linear lookup in from_records is fine
//
// 2. paths.contains() for dedupe
//    - At most three entries per catalog, a HashSet would be overkill
// -----------------------------------------------------------------------------
