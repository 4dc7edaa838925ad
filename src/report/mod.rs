// src/report/mod.rs
// =============================================================================
// CSV report output.
//
// Two report shapes:
// - categories: one row per catalog, categories newline-joined in one cell
// - redirects:  one row per check, appended in completion order
//
// A single csv::Writer owns the output file. Checks are driven from one
// task and every row goes through that writer, so rows never interleave
// mid-record. finish() flushes before the caller reports success.
// =============================================================================

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::catalog::CategoryIndex;
use crate::checker::{CheckOutcome, CheckResult, Classification};

pub const REDIRECT_HEADER: [&str; 4] = ["Catalog", "Doc path", "Redirect", "Wrong/Default"];
pub const CATEGORY_HEADER: [&str; 2] = ["Catalog", "Categories"];

/// Creates (or truncates) the report file.
pub fn create(path: &Path) -> Result<csv::Writer<File>> {
    csv::Writer::from_path(path)
        .with_context(|| format!("could not create report {}", path.display()))
}

/// Writes the whole category report and flushes it.
pub fn write_categories<W: Write>(
    mut writer: csv::Writer<W>,
    index: &CategoryIndex,
) -> Result<usize> {
    writer.write_record(CATEGORY_HEADER)?;

    let mut rows = 0;
    for (name, categories) in index.iter() {
        writer.write_record([name, categories.join("\n").as_str()])?;
        rows += 1;
    }

    writer.flush().context("could not flush category report")?;
    Ok(rows)
}

/// Counts gathered while writing the redirect report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub wrong: usize,
    pub docs: usize,
    pub unknown: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, result: &CheckResult) {
        self.total += 1;
        match result.flag() {
            Some(Classification::Wrong) => self.wrong += 1,
            Some(Classification::Docs) => self.docs += 1,
            Some(Classification::Unknown) => self.unknown += 1,
            None => self.failed += 1,
        }
    }

    /// A failed request or a redirect to the primary site.
    pub fn has_problems(&self) -> bool {
        self.failed > 0 || self.wrong > 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} checked: {} wrong/default, {} docs, {} unknown, {} failed",
            self.total, self.wrong, self.docs, self.unknown, self.failed
        )
    }
}

/// Streaming writer for redirect-check rows.
pub struct RedirectReport<W: Write> {
    writer: csv::Writer<W>,
    summary: Summary,
}

impl<W: Write> RedirectReport<W> {
    /// Writes the header row straight away.
    pub fn new(mut writer: csv::Writer<W>) -> Result<Self> {
        writer.write_record(REDIRECT_HEADER)?;
        Ok(RedirectReport {
            writer,
            summary: Summary::default(),
        })
    }

    pub fn write(&mut self, result: &CheckResult) -> Result<()> {
        let row = redirect_row(result);
        self.writer.write_record(row)?;
        self.summary.record(result);
        Ok(())
    }

    pub fn finish(mut self) -> io::Result<Summary> {
        self.writer.flush()?;
        Ok(self.summary)
    }
}

// Failures put the error text where the flag would go.
fn redirect_row(result: &CheckResult) -> [&str; 4] {
    match &result.outcome {
        CheckOutcome::Redirected { location, flag } => [
            result.catalog.as_str(),
            result.path.as_str(),
            location.as_deref().unwrap_or(""),
            flag.report_cell(),
        ],
        CheckOutcome::Failed { message } => [
            result.catalog.as_str(),
            result.path.as_str(),
            "",
            message.as_str(),
        ],
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why csv::Writer instead of format!?
//    - Category cells contain newlines and error text can contain commas;
//      the csv crate quotes those correctly
//
// 2. Why does finish() take self?
//    - Flushing consumes the report, so no row can be written after the
//      summary has been handed back
// -----------------------------------------------------------------------------
