// src/checker/mod.rs
// =============================================================================
// Redirect checking.
//
// Submodules:
// - redirect: makes the HTTP requests against the redirector
// - classify: decides whether a Location points at the primary site, the
//   documentation site, or neither
// =============================================================================

mod classify;
mod redirect;

pub use classify::Classification;
pub use redirect::{build_client, check_all, CheckOutcome, CheckResult};
