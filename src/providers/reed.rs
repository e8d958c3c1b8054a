//! Reed.co.uk jobseeker API adapter
//!
//! JSON over GET with basic auth (the API key travels as the username,
//! empty password). Offset-paged through `resultsToSkip`; the current page
//! is re-derived from the cursor URL on every parse rather than tracked in
//! a counter, so a replayed cursor always reports the page it actually
//! requested.

use super::{fetch_page, JobApi, Provider};
use crate::config::ReedConfig;
use crate::error::{Error, Result};
use crate::http::{BasicAuth, HttpClient};
use crate::model::{normalize_date, JobPosting, PageResult};
use crate::paging;
use crate::types::SearchCriteria;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Largest page size Reed accepts
const MAX_PAGE_SIZE: u32 = 100;

static SKIP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&resultsToSkip=\d+").expect("valid regex"));
static SKIP_CAPTURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&resultsToSkip=(\d+)").expect("valid regex"));

/// Adapter for the Reed.co.uk job search API
#[derive(Debug, Clone)]
pub struct ReedApi {
    api: String,
    version: String,
    clientid: String,
    page_size: u32,
}

impl ReedApi {
    /// Build an adapter with resolved settings
    pub fn new(config: &ReedConfig) -> Self {
        Self {
            api: config.api.clone(),
            version: config.version.clone(),
            clientid: config.clientid.clone(),
            page_size: paging::resolve_page_size(config.page_size, MAX_PAGE_SIZE),
        }
    }

    fn build_url(&self, criteria: &SearchCriteria) -> Option<String> {
        if self.api.is_empty() || self.clientid.is_empty() {
            return None;
        }
        Some(format!(
            "https://{api}/{version}/search?resultsToTake={take}&keywords={keywords}\
             &locationName={location}",
            api = self.api,
            version = self.version,
            take = self.page_size,
            keywords = criteria.keywords_with_company(),
            location = criteria.location,
        ))
    }

    async fn request(&self, http: &HttpClient, url: &str) -> Result<PageResult> {
        let auth = BasicAuth::new(self.clientid.clone(), "");
        let response = match fetch_page(http, url, Some(&auth)).await {
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
        let parsed: ReedResponse = serde_json::from_str(body)
            .map_err(|e| Error::malformed(Provider::Reed.name(), e.to_string()))?;

        let total = parsed.total_results;
        // position comes from the cursor, not a stored counter
        let skip = paging::extract_paging_param(url, &SKIP_CAPTURE).unwrap_or(0);
        let page = paging::page_for_offset(skip, self.page_size);
        let last = paging::last_page(total, self.page_size);

        let jobs = parsed
            .results
            .into_iter()
            .map(ReedJob::into_posting)
            .collect();
        Ok(PageResult::results(url, total, page, last, jobs))
    }
}

#[async_trait]
impl JobApi for ReedApi {
    fn provider(&self) -> Provider {
        Provider::Reed
    }

    async fn search(&self, http: &HttpClient, criteria: &SearchCriteria) -> Result<PageResult> {
        match self.build_url(criteria) {
            Some(url) => self.request(http, &url).await,
            None => Ok(PageResult::backend_error(
                "lack of api or clientid setting",
                String::new(),
            )),
        }
    }

    async fn page(&self, http: &HttpClient, key: &str, page: u32) -> Result<PageResult> {
        let offset = u64::from(page) * u64::from(self.page_size);
        let url = paging::rewrite_paging_param(key, &SKIP_PATTERN, "resultsToSkip", offset);
        self.request(http, &url).await
    }
}

// ============================================================================
// Wire Format
// ============================================================================

#[derive(Debug, Deserialize)]
struct ReedResponse {
    #[serde(rename = "totalResults", default)]
    total_results: u64,
    #[serde(default)]
    results: Vec<ReedJob>,
}

#[derive(Debug, Deserialize)]
struct ReedJob {
    #[serde(rename = "jobTitle")]
    job_title: Option<String>,
    #[serde(rename = "locationName")]
    location_name: Option<String>,
    #[serde(rename = "employerName")]
    employer_name: Option<String>,
    date: Option<String>,
    #[serde(rename = "jobUrl")]
    job_url: Option<String>,
}

impl ReedJob {
    fn into_posting(self) -> JobPosting {
        let location = self
            .location_name
            .filter(|name| !name.is_empty())
            .map(|name| format!("United Kingdom, {name}"));
        JobPosting {
            jobtitle: self.job_title,
            location,
            company: self.employer_name,
            date: self.date.as_deref().and_then(normalize_date),
            url: self.job_url,
        }
        .normalize()
    }
}
