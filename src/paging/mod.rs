//! Pagination normalizer and cursor codec
//!
//! Every backend reports its position differently (1-based page numbers,
//! record offsets, or nothing at all), but they all reduce to the same
//! output contract: a zero-indexed `(page, last)` pair derived from
//! `(total, page_size)`. The functions here are pure; adapters feed them
//! whatever their wire format provides.
//!
//! The cursor codec half rewrites a provider's paging parameter inside a
//! fully-formed request URL. A cursor is the first-page URL carrying every
//! query parameter except the paging position; advancing to page N strips
//! the old position with the provider's pattern and appends the recomputed
//! one, so non-paging parameters survive byte-identical across pages.

use regex::Regex;
use std::fmt::Display;

/// Default postings per page, used whenever a configured page size is
/// missing or outside the provider's valid range
pub const DEFAULT_PAGE_SIZE: u32 = 25;

// ============================================================================
// Normalizer
// ============================================================================

/// Zero-indexed last page for a result set.
///
/// `None` when there are no results. A total exactly divisible by the page
/// size yields one less than the quotient (no phantom trailing empty page);
/// otherwise the remainder page is the last page.
pub fn last_page(total_results: u64, page_size: u32) -> Option<u32> {
    if total_results == 0 {
        return None;
    }
    let size = u64::from(page_size.max(1));
    let last = if total_results % size == 0 {
        total_results / size - 1
    } else {
        total_results / size
    };
    Some(last as u32)
}

/// Zero-indexed current page for an offset-paged backend.
///
/// A zero skip is page 0 regardless of the total, so zero-result responses
/// never divide.
pub fn page_for_offset(skip: u64, page_size: u32) -> u32 {
    if skip == 0 {
        return 0;
    }
    (skip / u64::from(page_size.max(1))) as u32
}

/// Resolve a configured page size against a provider's valid range.
///
/// Values in `1..=max` pass through; anything else (including `None`)
/// silently falls back to [`DEFAULT_PAGE_SIZE`]. Out-of-range settings are
/// never an error.
pub fn resolve_page_size(requested: Option<u32>, max: u32) -> u32 {
    match requested {
        Some(size) if size >= 1 && size <= max => size,
        _ => DEFAULT_PAGE_SIZE,
    }
}

// ============================================================================
// Cursor Codec
// ============================================================================

/// Rewrite a cursor's paging parameter.
///
/// Strips any existing position marker matched by `pattern` and appends
/// `&{param}={value}`. Everything else in the URL is left untouched.
pub fn rewrite_paging_param(
    url: &str,
    pattern: &Regex,
    param: &str,
    value: impl Display,
) -> String {
    let stripped = pattern.replace(url, "");
    format!("{stripped}&{param}={value}")
}

/// Read the current position back out of a cursor.
///
/// `pattern` must contain one capture group over the numeric value.
pub fn extract_paging_param(url: &str, pattern: &Regex) -> Option<u64> {
    pattern
        .captures(url)?
        .get(1)
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests;
