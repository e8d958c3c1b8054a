//! Xing jobs API adapter
//!
//! Vendor-SDK backend modeled as an explicit per-session HTTP call, with
//! the consumer credentials sent as basic auth. There is no URL cursor:
//! the cursor is the keyword string
//! itself, and the record offset travels in-band (`offset = page *
//! page_size`), recomputed for every page request.

use super::{fetch_page, JobApi, Provider};
use crate::config::XingConfig;
use crate::error::{Error, Result};
use crate::http::{BasicAuth, HttpClient};
use crate::model::{normalize_date, JobPosting, PageResult};
use crate::paging;
use crate::types::SearchCriteria;
use async_trait::async_trait;
use serde::Deserialize;

/// Largest page size Xing accepts
const MAX_PAGE_SIZE: u32 = 100;

/// Adapter for the Xing jobs API
#[derive(Debug, Clone)]
pub struct XingApi {
    api: String,
    consumer_key: String,
    consumer_secret: String,
    page_size: u32,
}

impl XingApi {
    /// Build an adapter with resolved settings
    pub fn new(config: &XingConfig) -> Self {
        Self {
            api: config.api.clone(),
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
            page_size: paging::resolve_page_size(config.page_size, MAX_PAGE_SIZE),
        }
    }

    fn configured(&self) -> bool {
        !self.api.is_empty() && !self.consumer_key.is_empty() && !self.consumer_secret.is_empty()
    }

    fn build_url(&self, keywords: &str, offset: u64) -> String {
        format!(
            "https://{api}/v1/jobs/find?query={keywords}&limit={limit}&offset={offset}",
            api = self.api,
            limit = self.page_size,
        )
    }

    /// One request at the given page; the keyword string doubles as the key
    async fn request(&self, http: &HttpClient, keywords: &str, page: u32) -> Result<PageResult> {
        if !self.configured() {
            return Ok(PageResult::backend_error("incorrect settings", keywords));
        }

        let offset = u64::from(page) * u64::from(self.page_size);
        let url = self.build_url(keywords, offset);
        let auth = BasicAuth::new(self.consumer_key.clone(), self.consumer_secret.clone());

        let response = match fetch_page(http, &url, Some(&auth)).await {
            Ok(response) => response,
            Err(mut error_result) => {
                error_result.key = keywords.to_string();
                return Ok(error_result);
            }
        };
        if !response.is_success() {
            return Ok(PageResult::transport_error(
                response.status,
                response.message,
                keywords,
            ));
        }
        self.parse_body(keywords, page, &response.body)
    }

    fn parse_body(&self, keywords: &str, page: u32, body: &str) -> Result<PageResult> {
        let parsed: XingResponse = serde_json::from_str(body)
            .map_err(|e| Error::malformed(Provider::Xing.name(), e.to_string()))?;

        let total = parsed.jobs.total;
        let last = paging::last_page(total, self.page_size);
        let jobs = parsed
            .jobs
            .items
            .into_iter()
            .map(XingJob::into_posting)
            .collect();
        Ok(PageResult::results(keywords, total, page, last, jobs))
    }
}

#[async_trait]
impl JobApi for XingApi {
    fn provider(&self) -> Provider {
        Provider::Xing
    }

    async fn search(&self, http: &HttpClient, criteria: &SearchCriteria) -> Result<PageResult> {
        let keywords = criteria.keywords_with_company();
        self.request(http, &keywords, 0).await
    }

    async fn page(&self, http: &HttpClient, key: &str, page: u32) -> Result<PageResult> {
        self.request(http, key, page).await
    }
}

// ============================================================================
// Wire Format
// ============================================================================

#[derive(Debug, Deserialize)]
struct XingResponse {
    #[serde(default)]
    jobs: XingJobs,
}

#[derive(Debug, Default, Deserialize)]
struct XingJobs {
    #[serde(default)]
    total: u64,
    #[serde(default)]
    items: Vec<XingJob>,
}

#[derive(Debug, Deserialize)]
struct XingJob {
    title: Option<String>,
    #[serde(default)]
    location: XingLocation,
    company: Option<XingCompany>,
    published_at: Option<String>,
    #[serde(default)]
    links: XingLinks,
}

#[derive(Debug, Default, Deserialize)]
struct XingLocation {
    country: Option<String>,
    city: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XingCompany {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct XingLinks {
    xing: Option<String>,
}

impl XingJob {
    fn into_posting(self) -> JobPosting {
        let location = match (
            self.location.country.filter(|s| !s.is_empty()),
            self.location.city.filter(|s| !s.is_empty()),
        ) {
            (Some(country), Some(city)) => Some(format!("{country}, {city}")),
            (Some(part), None) | (None, Some(part)) => Some(part),
            (None, None) => None,
        };
        JobPosting {
            jobtitle: self.title,
            location,
            company: self.company.and_then(|c| c.name),
            date: self.published_at.as_deref().and_then(normalize_date),
            url: self.links.xing,
        }
        .normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api() -> XingApi {
        XingApi::new(&XingConfig {
            activated: true,
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
            ..XingConfig::default()
        })
    }

    #[test]
    fn test_build_url_carries_offset() {
        assert_eq!(
            api().build_url("rust", 50),
            "https://api.xing.com/v1/jobs/find?query=rust&limit=25&offset=50"
        );
    }

    #[tokio::test]
    async fn test_missing_credentials_short_circuit() {
        let unconfigured = XingApi::new(&XingConfig::default());
        let http = HttpClient::new();
        let result = unconfigured
            .search(&http, &SearchCriteria::keywords("rust"))
            .await
            .unwrap();
        assert_eq!(result.code, 501);
        assert_eq!(result.msg, "incorrect settings");
    }

    #[test]
    fn test_parse_body_success() {
        let body = json!({
            "jobs": {
                "total": 26,
                "items": [{
                    "title": "Rust Engineer",
                    "location": {"country": "DE", "city": "Hamburg"},
                    "company": {"name": "Acme"},
                    "published_at": "2016-06-30T15:14:03+02:00",
                    "links": {"xing": "https://xing.example.com/job/1"}
                }]
            }
        })
        .to_string();

        let result = api().parse_body("rust", 0, &body).unwrap();
        assert_eq!(result.total_results, 26);
        assert_eq!(result.page, Some(0));
        assert_eq!(result.last, Some(1));
        // cursor is the keyword string, not a URL
        assert_eq!(result.key, "rust");
        let jobs = result.jobs.unwrap();
        assert_eq!(jobs[0].location.as_deref(), Some("DE, Hamburg"));
        assert_eq!(jobs[0].date.as_deref(), Some("30/06/16"));
    }

    #[test]
    fn test_parse_body_zero_total() {
        let body = json!({"jobs": {"total": 0, "items": []}}).to_string();
        let result = api().parse_body("rust", 0, &body).unwrap();
        assert_eq!(result.page, None);
        assert_eq!(result.jobs, None);
        assert_eq!(result.key, "rust");
    }

    #[test]
    fn test_parse_body_malformed_is_hard_error() {
        assert!(api().parse_body("rust", 0, "<html/>").is_err());
    }
}
