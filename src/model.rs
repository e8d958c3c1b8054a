//! Normalized result models
//!
//! [`JobPosting`] is the common shape every backend's entries are mapped
//! into; [`PageResult`] is the page envelope carrying paging metadata and
//! the replayable cursor. The `PageResult` constructors enforce the paging
//! invariants so adapters cannot produce an inconsistent envelope:
//!
//! - `total_results == 0` implies `page`, `last` and `jobs` are all `None`
//! - the cursor (`key`) is always populated, even for error results
//! - empty posting fields are `None`, never `""`

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Output format for normalized posting dates (day/month/two-digit-year)
pub const DATE_FORMAT: &str = "%d/%m/%y";

// ============================================================================
// Job Posting
// ============================================================================

/// A single normalized job posting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    /// Position title
    pub jobtitle: Option<String>,
    /// Human-readable location, usually `"{country}, {city}"`
    pub location: Option<String>,
    /// Hiring company
    pub company: Option<String>,
    /// Posting date in [`DATE_FORMAT`]
    pub date: Option<String>,
    /// Link to the posting
    pub url: Option<String>,
}

impl JobPosting {
    /// Replace empty-string fields with `None`.
    ///
    /// Distinguishes "backend omitted the field" from "backend returned
    /// empty text"; both normalize to absent.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        self.jobtitle = none_if_empty(self.jobtitle);
        self.location = none_if_empty(self.location);
        self.company = none_if_empty(self.company);
        self.date = none_if_empty(self.date);
        self.url = none_if_empty(self.url);
        self
    }
}

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// ============================================================================
// Page Result
// ============================================================================

/// One page of results from one provider, with paging metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// HTTP-style status code; 501 marks backend application errors and
    /// misconfiguration
    pub code: u16,
    /// Status message or backend error text
    pub msg: String,
    /// Total matches reported by the backend
    pub total_results: u64,
    /// Current page, zero-indexed; `None` when there are no results
    pub page: Option<u32>,
    /// Last page, zero-indexed; `None` when there are no results
    pub last: Option<u32>,
    /// Cursor: the replayable request key (a full URL for URL-paged
    /// backends, the keyword string for in-band-offset backends)
    pub key: String,
    /// Parsed postings; `None` when there are no results
    pub jobs: Option<Vec<JobPosting>>,
}

impl PageResult {
    /// A successful page. Enforces the zero-result invariant: when
    /// `total_results` is 0 the paging fields and postings are cleared.
    pub fn results(
        key: impl Into<String>,
        total_results: u64,
        page: u32,
        last: Option<u32>,
        jobs: Vec<JobPosting>,
    ) -> Self {
        if total_results == 0 {
            return Self::empty(200, "OK", key);
        }
        Self {
            code: 200,
            msg: "OK".to_string(),
            total_results,
            page: Some(page),
            last,
            key: key.into(),
            jobs: Some(jobs),
        }
    }

    /// A successful response that matched nothing
    pub fn empty(code: u16, msg: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            total_results: 0,
            page: None,
            last: None,
            key: key.into(),
            jobs: None,
        }
    }

    /// A transport-level failure (non-200 status, connection error, timeout)
    pub fn transport_error(code: u16, msg: impl Into<String>, key: impl Into<String>) -> Self {
        Self::empty(code, msg, key)
    }

    /// A backend application error delivered inside a 200 response, or a
    /// misconfigured provider; both normalize to status 501
    pub fn backend_error(msg: impl Into<String>, key: impl Into<String>) -> Self {
        Self::empty(501, msg, key)
    }

    /// Whether another page exists after the current one
    pub fn has_next(&self) -> bool {
        matches!((self.page, self.last), (Some(page), Some(last)) if page < last)
    }

    /// Whether this result carries postings
    pub fn is_success(&self) -> bool {
        self.code == 200
    }
}

// ============================================================================
// Date Normalization
// ============================================================================

/// Parse a backend date string in any of the known source formats and
/// render it in [`DATE_FORMAT`]. Returns `None` for empty or unparseable
/// input.
///
/// Known source formats: RFC 2822 (Indeed), ISO 8601 with offset
/// (Xing, Upwork), `%Y-%m-%d %H:%M:%S` (CareerJet), `%d/%m/%Y` (Reed,
/// CareerBuilder after month/day swap), and bare `%Y-%m-%d`.
pub fn normalize_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
        return Some(dt.date_naive().format(DATE_FORMAT).to_string());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive().format(DATE_FORMAT).to_string());
    }
    // ISO 8601 with a numeric offset and no colon, e.g. 2016-06-30T15:14:03+0000
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.date_naive().format(DATE_FORMAT).to_string());
    }

    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date().format(DATE_FORMAT).to_string());
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d/%m/%y"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date.format(DATE_FORMAT).to_string());
        }
    }

    None
}
