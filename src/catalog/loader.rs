// src/catalog/loader.rs
// =============================================================================
// Loads catalog YAML files from a directory.
//
// Every regular file in the directory is treated as one catalog. A file
// that cannot be read or parsed is logged and skipped; it never stops the
// remaining files from loading. A directory that cannot be read, holds no
// files, or holds only files that fail to load is an error for the caller.
//
// Recognised fields (everything else is ignored):
//   name, docs_path, categories, documentation_links.import,
//   documentation_links.export
// =============================================================================

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::AuditError;

/// One catalog file after parsing. Keyed by its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    pub file_name: String,
    pub name: Option<String>,
    pub docs_path: Option<String>,
    pub categories: Option<Vec<String>>,
    pub import_path: Option<String>,
    pub export_path: Option<String>,
}

// Shape of the YAML document. Unknown keys are ignored by serde.
#[derive(Debug, Deserialize)]
struct RawCatalog {
    name: Option<String>,
    docs_path: Option<String>,
    categories: Option<Vec<String>>,
    documentation_links: Option<RawDocumentationLinks>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDocumentationLinks {
    import: Option<String>,
    export: Option<String>,
}

/// Reads every regular file in `dir`, sorted by file name.
///
/// Returns an error for directory-level problems, or when no file in the
/// directory loads. Files that fail to load are logged at warn level and
/// left out of the result.
pub fn load_catalogs(dir: &Path) -> Result<Vec<CatalogRecord>, AuditError> {
    let entries = fs::read_dir(dir).map_err(|source| AuditError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AuditError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        // fs::metadata follows symlinks, so a linked catalog file still counts.
        match fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => files.push(entry.path()),
            Ok(_) => debug!(path = %entry.path().display(), "skipping non-file entry"),
            Err(e) => warn!(path = %entry.path().display(), error = %e, "could not stat entry"),
        }
    }

    if files.is_empty() {
        return Err(AuditError::EmptyDir(dir.to_path_buf()));
    }

    files.sort();

    let mut records = Vec::with_capacity(files.len());
    for path in &files {
        match load_file(path) {
            Ok(record) => records.push(record),
            Err(e) => warn!(error = %e, "skipping catalog file"),
        }
    }

    if records.is_empty() {
        return Err(AuditError::NoCatalogs(dir.to_path_buf()));
    }

    Ok(records)
}

fn load_file(path: &Path) -> Result<CatalogRecord, AuditError> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let text = fs::read_to_string(path).map_err(|source| AuditError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_catalog(&file_name, &text)
}

/// Parses the text of one catalog file.
pub(crate) fn parse_catalog(file_name: &str, text: &str) -> Result<CatalogRecord, AuditError> {
    let parse_err = |source| AuditError::Parse {
        file: file_name.to_string(),
        source,
    };

    let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(parse_err)?;
    if !value.is_mapping() {
        return Err(AuditError::NotAMapping(file_name.to_string()));
    }

    let raw: RawCatalog = serde_yaml::from_value(value).map_err(parse_err)?;
    let links = raw.documentation_links.unwrap_or_default();

    Ok(CatalogRecord {
        file_name: file_name.to_string(),
        name: raw.name,
        docs_path: raw.docs_path,
        categories: raw.categories,
        // An empty override means "no override".
        import_path: links.import.filter(|p| !p.is_empty()),
        export_path: links.export.filter(|p| !p.is_empty()),
    })
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why parse into serde_yaml::Value first?
//    - A bare list or scalar would otherwise surface as a confusing
//      "invalid type" error; checking for a mapping gives a clearer message
//    - from_value then applies the typed RawCatalog shape
//
// 2. Option<T> fields
//    - serde treats a missing key and an explicit `key:` (null) the same way
//    - Both end up as None, so the registry never has to tell them apart
// -----------------------------------------------------------------------------
