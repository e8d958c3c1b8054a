//! Indeed publisher API adapter
//!
//! JSON over GET, offset-paged through the `start` query parameter
//! (`start = page * page_size`). Indeed reports application errors inside
//! 200 responses via an `error` field, normalized here to status 501. The
//! current page comes from the body's own `pageNumber` report.

use super::{fetch_page, JobApi, Provider};
use crate::config::IndeedConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::model::{normalize_date, JobPosting, PageResult};
use crate::paging;
use crate::types::SearchCriteria;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Largest page size Indeed accepts
const MAX_PAGE_SIZE: u32 = 25;

static START_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"&start=\d+").expect("valid regex"));

/// Adapter for the Indeed job search API
#[derive(Debug, Clone)]
pub struct IndeedApi {
    api: String,
    version: String,
    publisher: String,
    page_size: u32,
}

impl IndeedApi {
    /// Build an adapter with resolved settings
    pub fn new(config: &IndeedConfig) -> Self {
        Self {
            api: config.api.clone(),
            version: config.version.clone(),
            publisher: config.publisher.clone(),
            page_size: paging::resolve_page_size(config.page_size, MAX_PAGE_SIZE),
        }
    }

    /// First-page URL, or `None` when the endpoint or publisher key is missing
    fn build_url(&self, criteria: &SearchCriteria) -> Option<String> {
        if self.api.is_empty() || self.publisher.is_empty() {
            return None;
        }
        let keywords = criteria.keywords_with_company();
        Some(format!(
            "http://{api}/ads/apisearch?publisher={publisher}&q={keywords}&l={location}\
             &v={version}&format=json&limit={limit}&start=0",
            api = self.api,
            publisher = self.publisher,
            location = criteria.location,
            version = self.version,
            limit = self.page_size,
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
        let parsed: IndeedResponse = serde_json::from_str(body)
            .map_err(|e| Error::malformed(Provider::Indeed.name(), e.to_string()))?;

        if let Some(error) = parsed.error {
            return Ok(PageResult::backend_error(error, url));
        }

        let total = parsed.total_results;
        let last = paging::last_page(total, self.page_size);
        let jobs = parsed.results.into_iter().map(IndeedJob::into_posting);
        Ok(PageResult::results(
            url,
            total,
            parsed.page_number,
            last,
            jobs.collect(),
        ))
    }
}

#[async_trait]
impl JobApi for IndeedApi {
    fn provider(&self) -> Provider {
        Provider::Indeed
    }

    async fn search(&self, http: &HttpClient, criteria: &SearchCriteria) -> Result<PageResult> {
        match self.build_url(criteria) {
            Some(url) => self.request(http, &url).await,
            None => Ok(PageResult::backend_error(
                "lack of api or publisher setting",
                String::new(),
            )),
        }
    }

    async fn page(&self, http: &HttpClient, key: &str, page: u32) -> Result<PageResult> {
        let offset = u64::from(page) * u64::from(self.page_size);
        let url = paging::rewrite_paging_param(key, &START_PATTERN, "start", offset);
        self.request(http, &url).await
    }
}

// ============================================================================
// Wire Format
// ============================================================================

#[derive(Debug, Deserialize)]
struct IndeedResponse {
    error: Option<String>,
    #[serde(rename = "totalResults", default)]
    total_results: u64,
    #[serde(rename = "pageNumber", default)]
    page_number: u32,
    #[serde(default)]
    results: Vec<IndeedJob>,
}

#[derive(Debug, Deserialize)]
struct IndeedJob {
    jobtitle: Option<String>,
    country: Option<String>,
    city: Option<String>,
    company: Option<String>,
    date: Option<String>,
    url: Option<String>,
}

impl IndeedJob {
    fn into_posting(self) -> JobPosting {
        let location = join_location(self.country.as_deref(), self.city.as_deref());
        JobPosting {
            jobtitle: self.jobtitle,
            location,
            company: self.company,
            date: self.date.as_deref().and_then(normalize_date),
            url: self.url,
        }
        .normalize()
    }
}

/// `"{country}, {city}"`, degrading to whichever part is present
fn join_location(country: Option<&str>, city: Option<&str>) -> Option<String> {
    match (
        country.filter(|s| !s.is_empty()),
        city.filter(|s| !s.is_empty()),
    ) {
        (Some(country), Some(city)) => Some(format!("{country}, {city}")),
        (Some(part), None) | (None, Some(part)) => Some(part.to_string()),
        (None, None) => None,
    }
}
