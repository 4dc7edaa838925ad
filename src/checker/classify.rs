// src/checker/classify.rs
// =============================================================================
// Classifies where a redirect landed.
//
// - Location on the primary site (www.treasuredata...) -> "yes": the path
//   fell through to the default/marketing site, i.e. the link is wrong
// - Location on the documentation site (docs.treasuredata...) -> "no"
// - Anything else, or no Location at all -> unknown
//
// Matching is case-insensitive and anchored at the start of the URL.
// =============================================================================

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Landed on the primary site ("yes" in the report).
    Wrong,
    /// Landed on the documentation site ("no" in the report).
    Docs,
    /// Matched neither pattern.
    Unknown,
}

fn primary_site() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(http|https)://www\.treasuredata").unwrap())
}

fn docs_site() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(http|https)://docs\.treasuredata").unwrap())
}

impl Classification {
    pub fn of(location: Option<&str>) -> Self {
        match location {
            Some(loc) if primary_site().is_match(loc) => Classification::Wrong,
            Some(loc) if docs_site().is_match(loc) => Classification::Docs,
            _ => Classification::Unknown,
        }
    }

    /// Value of the "Wrong/Default" column. Unknown stays an empty cell.
    pub fn report_cell(self) -> &'static str {
        match self {
            Classification::Wrong => "yes",
            Classification::Docs => "no",
            Classification::Unknown => "",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Wrong => write!(f, "yes"),
            Classification::Docs => write!(f, "no"),
            Classification::Unknown => write!(f, "unknown"),
        }
    }
}
