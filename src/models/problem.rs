//! Problem records returned by the solved.ac search endpoint.

use serde::{Deserialize, Serialize};

/// Base URL for Baekjoon problem pages.
pub const PROBLEM_PAGE_BASE: &str = "https://www.acmicpc.net/problem";

/// A single problem record, taken verbatim from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Catalog-wide unique problem identifier
    pub problem_id: u64,

    /// Korean title, absent for untranslated problems
    #[serde(default)]
    pub title_ko: Option<String>,

    /// solved.ac difficulty level (1 = Bronze V, 15 = Gold I, ...)
    #[serde(default)]
    pub level: Option<u32>,
}

impl Problem {
    /// URL of the problem page on acmicpc.net.
    pub fn page_url(&self) -> String {
        format!("{}/{}", PROBLEM_PAGE_BASE, self.problem_id)
    }

    /// Whether this problem carries a non-empty Korean title.
    ///
    /// The catalog sometimes returns the field as an empty string rather
    /// than omitting it, so both cases count as "no title".
    pub fn has_korean_title(&self) -> bool {
        self.title_ko
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }
}

/// Response envelope of the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<Problem>,
}
