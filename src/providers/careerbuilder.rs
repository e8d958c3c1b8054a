//! CareerBuilder API adapter
//!
//! The one XML backend. Page-indexed through a 1-based `PageNumber`
//! parameter; the zero-indexed current page is the URL's `PageNumber`
//! minus one. Posting locations are not flat fields: the response carries
//! a `SearchLocations` lookup table mapping state codes to display names,
//! resolved per posting.

use super::{fetch_page, value_str, value_u64, JobApi, Provider};
use crate::config::CareerBuilderConfig;
use crate::decode::{element_list, xml_to_value};
use crate::error::Result;
use crate::http::HttpClient;
use crate::model::{normalize_date, JobPosting, PageResult};
use crate::paging;
use crate::types::{JsonValue, SearchCriteria};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

/// Largest page size CareerBuilder accepts
const MAX_PAGE_SIZE: u32 = 100;

/// Fallback country when the lookup table has no entry for a state code
const DEFAULT_COUNTRY: &str = "United States";

static PAGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&PageNumber=\d+").expect("valid regex"));
static PAGE_CAPTURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&PageNumber=(\d+)").expect("valid regex"));

/// Adapter for the CareerBuilder job search API
#[derive(Debug, Clone)]
pub struct CareerBuilderApi {
    api: String,
    version: String,
    clientid: String,
    page_size: u32,
}

impl CareerBuilderApi {
    /// Build an adapter with resolved settings
    pub fn new(config: &CareerBuilderConfig) -> Self {
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
            "https://{api}/{version}/jobsearch?PerPage={per_page}&DeveloperKey={clientid}\
             &Keywords={keywords}&Location={location}&CompanyName={company}",
            api = self.api,
            version = self.version,
            per_page = self.page_size,
            clientid = self.clientid,
            keywords = criteria.keywords,
            location = criteria.location,
            company = criteria.company,
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
        let doc = xml_to_value(body)
            .map_err(|e| crate::error::Error::malformed(Provider::CareerBuilder.name(), e.to_string()))?;
        let root = &doc["ResponseJobSearch"];

        // no Results element means no matches (or an unrecognized but
        // well-formed payload); both shape as an empty page
        if root["Results"].is_null() {
            return Ok(PageResult::empty(200, "OK", url));
        }

        let total = value_u64(&root["TotalCount"]).unwrap_or(0);
        // 1-based PageNumber read back out of the request URL
        let page_number = paging::extract_paging_param(url, &PAGE_CAPTURE).unwrap_or(1);
        let page = page_number.saturating_sub(1) as u32;
        let last = paging::last_page(total, self.page_size);

        let locations = &root["SearchMetaData"]["SearchLocations"];
        let jobs: Vec<JobPosting> = element_list(&root["Results"]["JobSearchResult"])
            .into_iter()
            .map(|offer| parse_offer(offer, locations))
            .collect();

        Ok(PageResult::results(url, total, page, last, jobs))
    }
}

#[async_trait]
impl JobApi for CareerBuilderApi {
    fn provider(&self) -> Provider {
        Provider::CareerBuilder
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
        let url = paging::rewrite_paging_param(key, &PAGE_PATTERN, "PageNumber", page + 1);
        self.request(http, &url).await
    }
}

// ============================================================================
// Response Navigation
// ============================================================================

fn parse_offer(offer: &JsonValue, locations: &JsonValue) -> JobPosting {
    let state = value_str(&offer["State"]);
    let city = value_str(&offer["City"]);

    let country = country_for_state(state.as_deref(), locations);
    let mut location = country.clone();
    if let Some(city) = city.filter(|c| !c.is_empty() && *c != country) {
        location.push_str(", ");
        location.push_str(&city);
    }

    JobPosting {
        jobtitle: value_str(&offer["JobTitle"]),
        location: Some(location),
        company: value_str(&offer["Company"]),
        date: value_str(&offer["PostedDate"])
            .as_deref()
            .and_then(swap_month_day)
            .as_deref()
            .and_then(normalize_date),
        url: value_str(&offer["JobDetailsURL"]),
    }
    .normalize()
}

/// Resolve a posting's state code through the response's own
/// `SearchLocations` table; unmatched codes fall back to the default.
fn country_for_state(state: Option<&str>, locations: &JsonValue) -> String {
    let Some(state) = state.filter(|s| !s.is_empty()) else {
        return DEFAULT_COUNTRY.to_string();
    };
    let entries = match locations {
        JsonValue::Object(map) => map.values().flat_map(element_list).collect::<Vec<_>>(),
        _ => Vec::new(),
    };
    for entry in entries {
        let code = value_str(&entry["StateCode"]);
        if code.as_deref() == Some(state) {
            if let Some(city) = value_str(&entry["City"]) {
                return city;
            }
        }
    }
    DEFAULT_COUNTRY.to_string()
}

/// CareerBuilder dates arrive month-first (`%m/%d/%Y`); swap to day-first
/// before the shared normalization
fn swap_month_day(date: &str) -> Option<String> {
    let mut parts = date.splitn(3, '/');
    let month = parts.next()?;
    let day = parts.next()?;
    let year = parts.next()?;
    Some(format!("{day}/{month}/{year}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api() -> CareerBuilderApi {
        CareerBuilderApi::new(&CareerBuilderConfig {
            activated: true,
            clientid: "dev-key".to_string(),
            ..CareerBuilderConfig::default()
        })
    }

    fn sample_xml() -> String {
        "<ResponseJobSearch>\
            <TotalCount>100</TotalCount>\
            <TotalPages>4</TotalPages>\
            <Results>\
                <JobSearchResult>\
                    <JobTitle>Rust Engineer</JobTitle>\
                    <Company>Acme</Company>\
                    <State>NY</State>\
                    <City>New York</City>\
                    <PostedDate>6/30/2016</PostedDate>\
                    <JobDetailsURL>https://cb.example.com/job/1</JobDetailsURL>\
                </JobSearchResult>\
                <JobSearchResult>\
                    <JobTitle>Backend Engineer</JobTitle>\
                    <Company>Globex</Company>\
                    <State>ZZ</State>\
                    <City></City>\
                    <PostedDate>1/05/2016</PostedDate>\
                    <JobDetailsURL>https://cb.example.com/job/2</JobDetailsURL>\
                </JobSearchResult>\
            </Results>\
            <SearchMetaData>\
                <SearchLocations>\
                    <Location><StateCode>NY</StateCode><City>USA-New York</City></Location>\
                </SearchLocations>\
            </SearchMetaData>\
        </ResponseJobSearch>"
            .to_string()
    }

    #[test]
    fn test_build_url() {
        let criteria = SearchCriteria::keywords("rust")
            .with_location("New York")
            .with_company("Acme");
        let url = api().build_url(&criteria).unwrap();
        assert_eq!(
            url,
            "https://api.careerbuilder.com/v2/jobsearch?PerPage=25&DeveloperKey=dev-key\
             &Keywords=rust&Location=New York&CompanyName=Acme"
        );
    }

    #[test]
    fn test_parse_body_first_page() {
        let result = api().parse_body("http://key?PerPage=25", &sample_xml()).unwrap();
        assert_eq!(result.total_results, 100);
        assert_eq!(result.page, Some(0));
        assert_eq!(result.last, Some(3));

        let jobs = result.jobs.unwrap();
        assert_eq!(jobs.len(), 2);
        // state resolved through the lookup table, city appended
        assert_eq!(jobs[0].location.as_deref(), Some("USA-New York, New York"));
        // month/day swap: 6/30/2016 is June 30
        assert_eq!(jobs[0].date.as_deref(), Some("30/06/16"));
        // unmatched state code falls back
        assert_eq!(jobs[1].location.as_deref(), Some("United States"));
    }

    #[test]
    fn test_parse_body_page_from_url() {
        let result = api()
            .parse_body("http://key?PerPage=25&PageNumber=3", &sample_xml())
            .unwrap();
        assert_eq!(result.page, Some(2));
    }

    #[test]
    fn test_parse_body_without_results_is_empty() {
        let xml = "<ResponseJobSearch><TotalCount>0</TotalCount></ResponseJobSearch>";
        let result = api().parse_body("http://key", xml).unwrap();
        assert_eq!(result.total_results, 0);
        assert_eq!(result.jobs, None);
        assert_eq!(result.key, "http://key");
    }

    #[test]
    fn test_parse_body_malformed_is_hard_error() {
        assert!(api().parse_body("http://key", "{\"not\": \"xml\"}").is_err());
    }

    #[test]
    fn test_country_lookup() {
        let locations = json!({
            "Location": [
                {"StateCode": "NY", "City": "USA-New York"},
                {"StateCode": "WA", "City": "USA-Washington"}
            ]
        });
        assert_eq!(country_for_state(Some("WA"), &locations), "USA-Washington");
        assert_eq!(country_for_state(Some("XX"), &locations), DEFAULT_COUNTRY);
        assert_eq!(country_for_state(None, &locations), DEFAULT_COUNTRY);
    }

    #[test]
    fn test_swap_month_day() {
        assert_eq!(swap_month_day("6/30/2016").as_deref(), Some("30/6/2016"));
        assert_eq!(swap_month_day("2016"), None);
    }
}
