// src/checker/redirect.rs
// =============================================================================
// Requests documentation paths from the redirector and records where they
// point.
//
// Key functionality:
// - One GET per (catalog, path), redirects NOT followed, so the first
//   Location header is what we see
// - Failures (DNS, refused connection, timeout, 4xx/5xx) become result rows
//   carrying the error text instead of aborting anything
// - Checks run concurrently, bounded by buffer_unordered, and come back in
//   completion order
// =============================================================================

use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use reqwest::{redirect, Client, Response};
use tracing::{debug, warn};

use super::Classification;
use crate::error::AuditError;

/// What happened to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The redirector answered; `location` is the raw Location header.
    Redirected {
        location: Option<String>,
        flag: Classification,
    },
    /// The request itself failed.
    Failed { message: String },
}

/// Result of checking one documentation path for one catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub catalog: String,
    pub path: String,
    pub outcome: CheckOutcome,
}

impl CheckResult {
    /// The flag, when the request succeeded.
    pub fn flag(&self) -> Option<Classification> {
        match &self.outcome {
            CheckOutcome::Redirected { flag, .. } => Some(*flag),
            CheckOutcome::Failed { .. } => None,
        }
    }
}

/// Client shared by all checks: no redirect following, and the library's
/// default (no) timeout unless one is given.
pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder().redirect(redirect::Policy::none());
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// Redirector and path are joined as plain strings.
pub fn target_url(redirector: &str, path: &str) -> String {
    format!("{}{}", redirector, path)
}

/// Checks every (catalog, path) pair with at most `concurrency` requests in
/// flight. Results are yielded as they complete, not in input order.
pub fn check_all<'a>(
    client: &'a Client,
    redirector: &'a str,
    pairs: Vec<(String, String)>,
    concurrency: usize,
) -> impl Stream<Item = CheckResult> + 'a {
    stream::iter(pairs)
        .map(move |(catalog, path)| check_path(client, redirector, catalog, path))
        .buffer_unordered(concurrency.max(1))
}

/// Issues a single GET and turns the response or error into a CheckResult.
pub async fn check_path(
    client: &Client,
    redirector: &str,
    catalog: String,
    path: String,
) -> CheckResult {
    let url = target_url(redirector, &path);
    debug!(%catalog, %url, "checking");

    let outcome = match client.get(&url).send().await {
        Ok(response) => analyze_response(response),
        Err(e) => CheckOutcome::Failed {
            message: describe_error(&e),
        },
    };

    match &outcome {
        CheckOutcome::Failed { message } => {
            warn!(%catalog, %path, error = %message, "check failed");
        }
        CheckOutcome::Redirected {
            location,
            flag: Classification::Unknown,
        } => {
            warn!(%catalog, %path, location = location.as_deref().unwrap_or(""), "redirect matched neither site");
        }
        CheckOutcome::Redirected { location, flag } => {
            debug!(%catalog, %path, location = location.as_deref().unwrap_or(""), %flag, "checked");
        }
    }

    CheckResult {
        catalog,
        path,
        outcome,
    }
}

// 4xx/5xx count as failures; anything else is read for its Location header.
fn analyze_response(response: Response) -> CheckOutcome {
    let status = response.status();

    if status.is_client_error() || status.is_server_error() {
        let err = AuditError::HttpStatus {
            code: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        };
        return CheckOutcome::Failed {
            message: err.to_string(),
        };
    }

    let location = response
        .headers()
        .get(reqwest::header::LOCATION)
        // Raw bytes, not to_str(): non-ASCII targets are still real redirects.
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
    let flag = Classification::of(location.as_deref());

    CheckOutcome::Redirected { location, flag }
}

// Short, readable text for the report cell.
fn describe_error(error: &reqwest::Error) -> String {
    let detail = root_cause(error);

    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", detail)
    } else if error.is_builder() {
        format!("Invalid request: {}", detail)
    } else {
        detail
    }
}

fn root_cause(error: &(dyn std::error::Error + 'static)) -> String {
    let mut current = error;
    while let Some(next) = current.source() {
        current = next;
    }
    current.to_string()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why redirect::Policy::none()?
//    - reqwest follows redirects by default and would hand us the final page
//    - We want the first hop, so the 3xx response comes back as-is and its
//      Location header is readable
//
// 2. buffer_unordered(N)
//    - Keeps at most N requests in flight
//    - Yields each result as soon as it finishes, so row order in the report
//      follows completion, not input
//    - The stream only ends once every request has resolved, which is what
//      lets main.rs flush the report knowing nothing is still outstanding
// -----------------------------------------------------------------------------
