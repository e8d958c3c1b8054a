//! Upwork job search adapter
//!
//! Another vendor-SDK backend modeled as a direct HTTP call. Paging
//! travels in-band through the compound
//! `paging={offset};{count}` parameter; the cursor is the keyword string.
//! A 200 response can still carry an `error` object, which keeps its own
//! status and message when both are present.

use super::{fetch_page, JobApi, Provider};
use crate::config::UpworkConfig;
use crate::error::{Error, Result};
use crate::http::{BasicAuth, HttpClient};
use crate::model::{normalize_date, JobPosting, PageResult};
use crate::paging;
use crate::types::SearchCriteria;
use async_trait::async_trait;
use serde::Deserialize;

/// Largest page size Upwork accepts
const MAX_PAGE_SIZE: u32 = 100;

/// Company name attached to every posting; Upwork listings are freelance
/// contracts with no employer field
const COMPANY: &str = "Upwork";

/// Adapter for the Upwork job search API
#[derive(Debug, Clone)]
pub struct UpworkApi {
    api: String,
    consumer_key: String,
    consumer_secret: String,
    page_size: u32,
}

impl UpworkApi {
    /// Build an adapter with resolved settings
    pub fn new(config: &UpworkConfig) -> Self {
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
            "https://{api}/api/profiles/v2/search/jobs.json?q={keywords}&sort=create_time+desc\
             &paging={offset};{count}",
            api = self.api,
            count = self.page_size,
        )
    }

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
        let parsed: UpworkResponse = serde_json::from_str(body)
            .map_err(|e| Error::malformed(Provider::Upwork.name(), e.to_string()))?;

        if let Some(error) = parsed.error {
            return Ok(match (error.status, error.message) {
                (Some(status), Some(message)) => PageResult::empty(status, message, keywords),
                _ => PageResult::backend_error("incorrect settings", keywords),
            });
        }

        let total = parsed.paging.map_or(0, |p| p.total);
        let last = paging::last_page(total, self.page_size);
        let jobs = parsed
            .jobs
            .into_iter()
            .map(UpworkJob::into_posting)
            .collect();
        Ok(PageResult::results(keywords, total, page, last, jobs))
    }
}

#[async_trait]
impl JobApi for UpworkApi {
    fn provider(&self) -> Provider {
        Provider::Upwork
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
struct UpworkResponse {
    error: Option<UpworkError>,
    #[serde(default)]
    jobs: Vec<UpworkJob>,
    paging: Option<UpworkPaging>,
}

#[derive(Debug, Deserialize)]
struct UpworkError {
    status: Option<u16>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpworkPaging {
    #[serde(default)]
    total: u64,
}

#[derive(Debug, Deserialize)]
struct UpworkJob {
    title: Option<String>,
    client: Option<UpworkClient>,
    date_created: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UpworkClient {
    country: Option<String>,
}

impl UpworkJob {
    fn into_posting(self) -> JobPosting {
        JobPosting {
            jobtitle: self.title,
            location: self.client.and_then(|c| c.country),
            company: Some(COMPANY.to_string()),
            date: self.date_created.as_deref().and_then(normalize_date),
            url: self.url,
        }
        .normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api() -> UpworkApi {
        UpworkApi::new(&UpworkConfig {
            activated: true,
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
            ..UpworkConfig::default()
        })
    }

    #[test]
    fn test_build_url_compound_paging() {
        assert_eq!(
            api().build_url("rust", 75),
            "https://www.upwork.com/api/profiles/v2/search/jobs.json?q=rust\
             &sort=create_time+desc&paging=75;25"
        );
    }

    #[test]
    fn test_parse_body_success() {
        let body = json!({
            "jobs": [{
                "title": "Rust backend work",
                "client": {"country": "Ireland"},
                "date_created": "2016-06-30T15:14:03+0000",
                "url": "https://upwork.example.com/jobs/~01"
            }],
            "paging": {"offset": 0, "count": 25, "total": 886}
        })
        .to_string();

        let result = api().parse_body("rust", 0, &body).unwrap();
        assert_eq!(result.total_results, 886);
        assert_eq!(result.page, Some(0));
        assert_eq!(result.last, Some(35));
        assert_eq!(result.key, "rust");
        let jobs = result.jobs.unwrap();
        assert_eq!(jobs[0].location.as_deref(), Some("Ireland"));
        assert_eq!(jobs[0].company.as_deref(), Some(COMPANY));
        assert_eq!(jobs[0].date.as_deref(), Some("30/06/16"));
    }

    #[test]
    fn test_parse_body_error_object_keeps_own_status() {
        let body = json!({"error": {"status": 403, "message": "forbidden"}}).to_string();
        let result = api().parse_body("rust", 0, &body).unwrap();
        assert_eq!(result.code, 403);
        assert_eq!(result.msg, "forbidden");

        let partial = json!({"error": {"message": "hm"}}).to_string();
        let result = api().parse_body("rust", 0, &partial).unwrap();
        assert_eq!(result.code, 501);
        assert_eq!(result.msg, "incorrect settings");
    }

    #[test]
    fn test_parse_body_no_paging_is_empty() {
        let body = json!({"jobs": []}).to_string();
        let result = api().parse_body("rust", 0, &body).unwrap();
        assert_eq!(result.total_results, 0);
        assert_eq!(result.jobs, None);
    }

    #[tokio::test]
    async fn test_missing_credentials_short_circuit() {
        let unconfigured = UpworkApi::new(&UpworkConfig::default());
        let http = HttpClient::new();
        let result = unconfigured
            .search(&http, &SearchCriteria::keywords("rust"))
            .await
            .unwrap();
        assert_eq!(result.code, 501);
    }
}
