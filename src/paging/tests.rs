//! Tests for the pagination normalizer and cursor codec

use super::*;
use once_cell::sync::Lazy;
use test_case::test_case;

// ============================================================================
// Normalizer Tests
// ============================================================================

#[test_case(100, 25 => Some(3) ; "exactly divisible drops phantom page")]
#[test_case(101, 25 => Some(4) ; "remainder page is last")]
#[test_case(1, 25 => Some(0) ; "single result")]
#[test_case(25, 25 => Some(0) ; "one full page")]
#[test_case(26, 25 => Some(1) ; "one over")]
#[test_case(0, 25 => None ; "no results")]
fn test_last_page(total: u64, page_size: u32) -> Option<u32> {
    last_page(total, page_size)
}

#[test]
fn test_page_for_offset() {
    assert_eq!(page_for_offset(0, 25), 0);
    assert_eq!(page_for_offset(25, 25), 1);
    assert_eq!(page_for_offset(50, 25), 2);
    assert_eq!(page_for_offset(30, 25), 1);
    // zero skip short-circuits before any division
    assert_eq!(page_for_offset(0, 0), 0);
}

#[test]
fn test_resolve_page_size() {
    assert_eq!(resolve_page_size(Some(10), 100), 10);
    assert_eq!(resolve_page_size(Some(100), 100), 100);
    assert_eq!(resolve_page_size(Some(1), 25), 1);
    // out of range falls back silently
    assert_eq!(resolve_page_size(Some(0), 100), DEFAULT_PAGE_SIZE);
    assert_eq!(resolve_page_size(Some(101), 100), DEFAULT_PAGE_SIZE);
    assert_eq!(resolve_page_size(None, 100), DEFAULT_PAGE_SIZE);
}

// ============================================================================
// Cursor Codec Tests
// ============================================================================

static SKIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&resultsToSkip=\d+").expect("valid regex"));
static SKIP_CAPTURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&resultsToSkip=(\d+)").expect("valid regex"));

const CURSOR: &str =
    "https://reed.co.uk/api/1.0/search?resultsToTake=25&keywords=rust&locationName=London";

#[test]
fn test_rewrite_appends_when_absent() {
    let rewritten = rewrite_paging_param(CURSOR, &SKIP_PATTERN, "resultsToSkip", 50);
    assert_eq!(rewritten, format!("{CURSOR}&resultsToSkip=50"));
}

#[test]
fn test_rewrite_replaces_existing() {
    let page_two = rewrite_paging_param(CURSOR, &SKIP_PATTERN, "resultsToSkip", 50);
    let page_five = rewrite_paging_param(&page_two, &SKIP_PATTERN, "resultsToSkip", 125);
    assert_eq!(page_five, format!("{CURSOR}&resultsToSkip=125"));
}

#[test]
fn test_rewrite_preserves_non_paging_params() {
    // paging back and forth leaves keywords/location/page-size byte-identical
    let forward = rewrite_paging_param(CURSOR, &SKIP_PATTERN, "resultsToSkip", 75);
    let back = rewrite_paging_param(&forward, &SKIP_PATTERN, "resultsToSkip", 0);
    let stripped = SKIP_PATTERN.replace_all(&back, "");
    assert_eq!(stripped, CURSOR);
}

#[test]
fn test_rewrite_is_stable_under_repetition() {
    let once = rewrite_paging_param(CURSOR, &SKIP_PATTERN, "resultsToSkip", 50);
    let twice = rewrite_paging_param(&once, &SKIP_PATTERN, "resultsToSkip", 50);
    assert_eq!(once, twice);
}

#[test]
fn test_extract_paging_param() {
    let cursor = format!("{CURSOR}&resultsToSkip=125");
    assert_eq!(extract_paging_param(&cursor, &SKIP_CAPTURE), Some(125));
    assert_eq!(extract_paging_param(CURSOR, &SKIP_CAPTURE), None);
}

#[test]
fn test_roundtrip_offset_to_page() {
    // extract + normalize recovers the page the rewrite encoded
    let cursor = rewrite_paging_param(CURSOR, &SKIP_PATTERN, "resultsToSkip", 3 * 25);
    let skip = extract_paging_param(&cursor, &SKIP_CAPTURE).unwrap();
    assert_eq!(page_for_offset(skip, 25), 3);
}
