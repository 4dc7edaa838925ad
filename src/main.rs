// src/main.rs
// =============================================================================
// Entry point.
//
// What happens here:
// 1. Parse command-line arguments and build the run Config
// 2. Load catalog files and build the link registry / category index
// 3. Either write the category report, or check every documentation path
//    against the redirector and stream results into the CSV report
// 4. Flush the report, then exit with a code that reflects the outcome
//    (0 = clean, 1 = failed checks or wrong redirects, 2 = fatal error)
// =============================================================================

mod catalog;
mod checker;
mod cli;
mod config;
mod error;
mod logging;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use tracing::{debug, error, info, warn};

use catalog::{CategoryIndex, LinkSet};
use cli::{Cli, ReportMode};
use config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.log_format, cli.verbose);

    let exit_code = match Config::from_cli(&cli) {
        Ok(config) => match run(&config).await {
            Ok(code) => code,
            Err(e) => {
                error!("{:#}", e);
                2
            }
        },
        Err(e) => {
            error!("{}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = report written, nothing to flag
//   Ok(1) = report written, some checks failed or hit the primary site
//   Err   = fatal; nothing useful was written
async fn run(config: &Config) -> Result<i32> {
    info!(dir = %config.catalog_dir.display(), "parsing yaml files");
    let records = catalog::load_catalogs(&config.catalog_dir)?;
    info!(count = records.len(), "catalogs loaded");

    let output = config.output_path();

    match config.mode {
        ReportMode::Categories => {
            let index = CategoryIndex::from_records(&records);
            info!(catalogs = index.len(), "writing category report");
            let rows = report::write_categories(report::create(&output)?, &index)?;
            info!(rows, report = %output.display(), "category report written");
            println!("{} catalog(s) written to {}", rows, output.display());
            Ok(0)
        }
        ReportMode::Redirects => {
            let links = LinkSet::from_records(&records);
            check_redirects(config, &links, &output).await
        }
    }
}

async fn check_redirects(
    config: &Config,
    links: &LinkSet,
    output: &std::path::Path,
) -> Result<i32> {
    let client =
        checker::build_client(config.timeout).context("could not create HTTP client")?;
    for (catalog, paths) in links.iter() {
        debug!(catalog, paths = ?paths, "queued");
    }
    let pairs = links.pairs();
    info!(
        catalogs = links.len(),
        checks = pairs.len(),
        redirector = %config.redirector,
        concurrency = config.concurrency,
        "checking redirects"
    );

    let mut report = report::RedirectReport::new(report::create(output)?)?;

    // Every check is awaited here; the stream ends only when all are done.
    let mut results = std::pin::pin!(checker::check_all(
        &client,
        &config.redirector,
        pairs,
        config.concurrency
    ));
    while let Some(result) = results.next().await {
        report.write(&result)?;
    }

    let summary = report
        .finish()
        .with_context(|| format!("could not flush report {}", output.display()))?;

    if summary.unknown > 0 {
        warn!(count = summary.unknown, "redirects matched neither site");
    }
    info!(%summary, report = %output.display(), "redirect report written");
    println!("{} -> {}", summary, output.display());

    Ok(if summary.has_problems() { 1 } else { 0 })
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why std::process::exit and not `fn main() -> Result`?
//    - We need three distinct codes (0, 1, 2); returning Err only gives 1
//
// 2. Why std::pin::pin! around the check stream?
//    - StreamExt::next() needs an Unpin stream; pinning on the stack is the
//      cheapest way to get one without boxing
// -----------------------------------------------------------------------------
