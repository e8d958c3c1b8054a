//! CareerJet public API adapter
//!
//! JSON over GET, page-indexed through a 1-based `page` parameter embedded
//! in the URL. CareerJet refuses empty keyword searches, and reports
//! application errors inside 200 responses with `"type": "ERROR"`. The
//! location filter defaults to `europe` when unset.

use super::{fetch_page, JobApi, Provider};
use crate::config::CareerJetConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::model::{normalize_date, JobPosting, PageResult};
use crate::paging;
use crate::types::SearchCriteria;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Largest page size CareerJet accepts
const MAX_PAGE_SIZE: u32 = 99;

/// Location used when the criteria leave it unset
const DEFAULT_LOCATION: &str = "europe";

static PAGE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"&page=\d+").expect("valid regex"));
static PAGE_CAPTURE: Lazy<Regex> = Lazy::new(|| Regex::new(r"&page=(\d+)").expect("valid regex"));

/// Adapter for the CareerJet public search API
#[derive(Debug, Clone)]
pub struct CareerJetApi {
    api: String,
    page_size: u32,
}

impl CareerJetApi {
    /// Build an adapter with resolved settings
    pub fn new(config: &CareerJetConfig) -> Self {
        Self {
            api: config.api.clone(),
            page_size: paging::resolve_page_size(config.page_size, MAX_PAGE_SIZE),
        }
    }

    /// First-page URL; CareerJet needs both an endpoint and keywords
    fn build_url(&self, criteria: &SearchCriteria) -> Option<String> {
        let keywords = criteria.keywords_with_company();
        if self.api.is_empty() || keywords.is_empty() {
            return None;
        }
        let location = if criteria.location.is_empty() {
            DEFAULT_LOCATION
        } else {
            &criteria.location
        };
        Some(format!(
            "http://{api}/search?locale_code=US_en&pagesize={pagesize}&sort=date\
             &keywords={keywords}&location={location}&page=1",
            api = self.api,
            pagesize = self.page_size,
        ))
    }

    async fn request(&self, http: &HttpClient, url: &str) -> Result<PageResult> {
        let response = match fetch_page(http, url, None).await {
            Ok(response) => response,
            Err(error_result) => return Ok(error_result),
        };
        if !response.is_success() {
            return Ok(PageResult::transport_error(
                response.status,
                response.message,
                url,
            ));
        }
        self.parse_body(url, &response.body)
    }

    fn parse_body(&self, url: &str, body: &str) -> Result<PageResult> {
        let parsed: CareerJetResponse = serde_json::from_str(body)
            .map_err(|e| Error::malformed(Provider::CareerJet.name(), e.to_string()))?;

        if parsed.response_type.as_deref() == Some("ERROR") {
            let message = parsed.error.unwrap_or_else(|| "unknown error".to_string());
            return Ok(PageResult::backend_error(message, url));
        }

        let total = parsed.hits;
        // 1-based page read back out of the request URL
        let page_number = paging::extract_paging_param(url, &PAGE_CAPTURE).unwrap_or(1);
        let page = page_number.saturating_sub(1) as u32;
        let last = paging::last_page(total, self.page_size);

        let jobs = parsed
            .jobs
            .into_iter()
            .map(CareerJetJob::into_posting)
            .collect();
        Ok(PageResult::results(url, total, page, last, jobs))
    }
}

#[async_trait]
impl JobApi for CareerJetApi {
    fn provider(&self) -> Provider {
        Provider::CareerJet
    }

    async fn search(&self, http: &HttpClient, criteria: &SearchCriteria) -> Result<PageResult> {
        match self.build_url(criteria) {
            Some(url) => self.request(http, &url).await,
            None => Ok(PageResult::backend_error(
                "lack of keywords or api setting",
                String::new(),
            )),
        }
    }

    async fn page(&self, http: &HttpClient, key: &str, page: u32) -> Result<PageResult> {
        let url = paging::rewrite_paging_param(key, &PAGE_PATTERN, "page", page + 1);
        self.request(http, &url).await
    }
}

// ============================================================================
// Wire Format
// ============================================================================

#[derive(Debug, Deserialize)]
struct CareerJetResponse {
    #[serde(rename = "type")]
    response_type: Option<String>,
    error: Option<String>,
    #[serde(default)]
    hits: u64,
    #[serde(default)]
    jobs: Vec<CareerJetJob>,
}

#[derive(Debug, Deserialize)]
struct CareerJetJob {
    title: Option<String>,
    locations: Option<String>,
    company: Option<String>,
    date: Option<String>,
    url: Option<String>,
}

impl CareerJetJob {
    fn into_posting(self) -> JobPosting {
        JobPosting {
            jobtitle: self.title,
            location: self.locations,
            company: self.company,
            date: self.date.as_deref().and_then(normalize_date),
            url: self.url,
        }
        .normalize()
    }
}
