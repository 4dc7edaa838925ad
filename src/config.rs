// src/config.rs
// =============================================================================
// Run configuration.
//
// Built once from the parsed command line and handed to each stage by
// reference. Nothing downstream looks at the Cli struct or global state.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::cli::{Cli, ReportMode};
use crate::error::AuditError;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_dir: PathBuf,
    pub report_name: String,
    pub mode: ReportMode,
    /// Redirector base with no trailing slash; paths are appended verbatim.
    pub redirector: String,
    pub concurrency: usize,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, AuditError> {
        let redirector = normalize_redirector(&cli.redirector)?;

        Ok(Config {
            catalog_dir: PathBuf::from(&cli.path),
            report_name: cli.csv.clone(),
            mode: cli.mode(),
            redirector,
            concurrency: usize::from(cli.concurrency),
            timeout: cli.timeout_secs.map(Duration::from_secs),
        })
    }

    /// `<report_name>.csv`, relative to the current directory.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(format!("{}.csv", self.report_name))
    }
}

// Only http(s) URLs with a host are accepted.
fn normalize_redirector(raw: &str) -> Result<String, AuditError> {
    let parsed = Url::parse(raw).map_err(|_| AuditError::InvalidRedirector(raw.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(AuditError::InvalidRedirector(raw.to_string()));
    }

    Ok(raw.trim_end_matches('/').to_string())
}
