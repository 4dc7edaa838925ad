// src/error.rs
// =============================================================================
// Typed errors for the audit pipeline.
//
// The loader and checker return these so callers can decide what is fatal
// (directory problems) and what is recovered locally (a single bad file,
// a single failed request). main.rs wraps them in anyhow with context.
// =============================================================================

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum AuditError {
    #[error("could not read catalog directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not find yaml files in {0}")]
    EmptyDir(PathBuf),

    #[error("no catalog in {0} could be loaded")]
    NoCatalogs(PathBuf),

    #[error("could not read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{0}: document is not a mapping")]
    NotAMapping(String),

    #[error("invalid redirector url '{0}'")]
    InvalidRedirector(String),

    /// Upstream answered with 4xx/5xx.
    #[error("Response code {code} ({reason})")]
    HttpStatus { code: u16, reason: String },
}
