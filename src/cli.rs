// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// One command, two report modes:
// - redirect-check (default): check every documentation path against the
//   redirector and record where it lands
// - categories: list each catalog's declared categories
//
// The flags choosing the mode are mutually exclusive; clap rejects both
// being given at once.
// =============================================================================

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "doc-redirect-audit",
    version,
    about = "Audit documentation redirect links declared in catalog YAML files",
    long_about = "doc-redirect-audit reads every catalog file in a directory, requests each \
                  documentation path from the redirector without following redirects, and \
                  writes where each one lands to a CSV report."
)]
pub struct Cli {
    /// Directory containing the catalog YAML files
    #[arg(short = 'p', long = "path", value_name = "YAML DIR")]
    pub path: String,

    /// Base name of the CSV report (written as <NAME>.csv in the current directory)
    #[arg(long = "csv", value_name = "NAME", default_value = "info")]
    pub csv: String,

    /// Check documentation redirects (the default)
    #[arg(long, conflicts_with = "categories")]
    pub redirects: bool,

    /// Report each catalog's categories instead of checking redirects
    #[arg(long)]
    pub categories: bool,

    /// Redirector host the documentation paths are appended to
    #[arg(long, value_name = "URL", default_value = "https://go.treasuredata.com")]
    pub redirector: String,

    /// Maximum number of checks in flight at once
    #[arg(
        long,
        default_value_t = 50,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub concurrency: u16,

    /// Per-request timeout in seconds (library default when omitted)
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,

    /// Shape of log lines written to stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Which report the run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Redirects,
    Categories,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Cli {
    /// Redirect checking unless --categories was asked for.
    pub fn mode(&self) -> ReportMode {
        if self.categories {
            ReportMode::Categories
        } else {
            ReportMode::Redirects
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. conflicts_with
//    - clap refuses `--redirects --categories` before main() runs, so mode()
//      only has to look at one flag
//
// 2. value_parser!(u16).range(1..)
//    - A concurrency of 0 would never start a check; clap rejects it with a
//      usage error instead
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["doc-redirect-audit", "-p", "catalogs"]).unwrap();
        assert_eq!(cli.path, "catalogs");
        assert_eq!(cli.csv, "info");
        assert_eq!(cli.mode(), ReportMode::Redirects);
        assert_eq!(cli.concurrency, 50);
        assert_eq!(cli.timeout_secs, None);
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_categories_mode() {
        let cli = Cli::try_parse_from([
            "doc-redirect-audit",
            "--path",
            "catalogs",
            "--categories",
            "--csv",
            "cats",
        ])
        .unwrap();
        assert_eq!(cli.mode(), ReportMode::Categories);
        assert_eq!(cli.csv, "cats");
    }

    #[test]
    fn test_modes_conflict() {
        let result = Cli::try_parse_from([
            "doc-redirect-audit",
            "-p",
            "catalogs",
            "--redirects",
            "--categories",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_path_is_required() {
        assert!(Cli::try_parse_from(["doc-redirect-audit"]).is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let result =
            Cli::try_parse_from(["doc-redirect-audit", "-p", "x", "--concurrency", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["doc-redirect-audit", "-p", "x", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
