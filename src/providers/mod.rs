//! Provider adapters
//!
//! One module per backend. Every adapter translates its backend's
//! request/response/paging contract into the common [`PageResult`] shape:
//! it builds the first-page URL (or replays a cursor verbatim), calls the
//! transport, parses the raw body, and normalizes paging through
//! [`crate::paging`].
//!
//! Error shaping is uniform across adapters:
//! - transport failure (non-200, connection error) → error-shaped `PageResult`
//! - backend application error inside a 200 body → status 501 + backend text
//! - missing credentials/endpoint → status 501, no request issued
//! - malformed success payload → hard `Err`, the one loud failure

pub mod careerbuilder;
pub mod careerjet;
pub mod indeed;
pub mod reed;
pub mod upwork;
pub mod xing;

pub use careerbuilder::CareerBuilderApi;
pub use careerjet::CareerJetApi;
pub use indeed::IndeedApi;
pub use reed::ReedApi;
pub use upwork::UpworkApi;
pub use xing::XingApi;

use crate::config::JobsConfig;
use crate::error::Result;
use crate::http::{BasicAuth, HttpClient, RawResponse};
use crate::model::PageResult;
use crate::types::{JsonValue, SearchCriteria};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Provider Enumeration
// ============================================================================

/// The supported backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// CareerBuilder (XML, 1-based `PageNumber`)
    CareerBuilder,
    /// CareerJet (JSON, 1-based `page`)
    CareerJet,
    /// Indeed (JSON, `start` record offset)
    Indeed,
    /// Reed.co.uk (JSON, `resultsToSkip` record offset)
    Reed,
    /// Upwork (in-band `{offset};{count}` paging)
    Upwork,
    /// Xing (in-band `offset` field)
    Xing,
}

impl Provider {
    /// All providers, in the order the aggregator visits them
    pub const ALL: [Provider; 6] = [
        Provider::CareerBuilder,
        Provider::CareerJet,
        Provider::Indeed,
        Provider::Reed,
        Provider::Upwork,
        Provider::Xing,
    ];

    /// Lowercase provider name
    pub fn name(self) -> &'static str {
        match self {
            Provider::CareerBuilder => "careerbuilder",
            Provider::CareerJet => "careerjet",
            Provider::Indeed => "indeed",
            Provider::Reed => "reed",
            Provider::Upwork => "upwork",
            Provider::Xing => "xing",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "careerbuilder" => Ok(Provider::CareerBuilder),
            "careerjet" => Ok(Provider::CareerJet),
            "indeed" => Ok(Provider::Indeed),
            "reed" => Ok(Provider::Reed),
            "upwork" => Ok(Provider::Upwork),
            "xing" => Ok(Provider::Xing),
            other => Err(crate::error::Error::config(format!(
                "unknown provider: {other}"
            ))),
        }
    }
}

// ============================================================================
// Adapter Trait
// ============================================================================

/// Common contract implemented by every provider adapter.
///
/// Adapters are constructed once per session with their settings already
/// resolved (defaults applied, page size clamped); requests receive the
/// shared per-session [`HttpClient`] by reference.
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Which backend this adapter serves
    fn provider(&self) -> Provider;

    /// First-page search for the given criteria
    async fn search(&self, http: &HttpClient, criteria: &SearchCriteria) -> Result<PageResult>;

    /// Fetch a specific page by rewriting the cursor from a previous result
    async fn page(&self, http: &HttpClient, key: &str, page: u32) -> Result<PageResult>;
}

/// Construct adapters for every activated provider in the config.
///
/// The provider-to-adapter mapping is static; activation is the only
/// runtime decision.
pub fn build_adapters(config: &JobsConfig) -> Vec<Box<dyn JobApi>> {
    let mut adapters: Vec<Box<dyn JobApi>> = Vec::new();
    if config.careerbuilder.activated {
        adapters.push(Box::new(CareerBuilderApi::new(&config.careerbuilder)));
    }
    if config.careerjet.activated {
        adapters.push(Box::new(CareerJetApi::new(&config.careerjet)));
    }
    if config.indeed.activated {
        adapters.push(Box::new(IndeedApi::new(&config.indeed)));
    }
    if config.reed.activated {
        adapters.push(Box::new(ReedApi::new(&config.reed)));
    }
    if config.upwork.activated {
        adapters.push(Box::new(UpworkApi::new(&config.upwork)));
    }
    if config.xing.activated {
        adapters.push(Box::new(XingApi::new(&config.xing)));
    }
    adapters
}

// ============================================================================
// Shared Adapter Helpers
// ============================================================================

/// Fetch a URL, converting connection-level failures into an error-shaped
/// page result keyed by the request URL.
///
/// Adapters use the `Err` arm for early return: it is a `PageResult`, not
/// a crate error, so one provider's dead network never aborts the
/// aggregate.
pub(crate) async fn fetch_page(
    http: &HttpClient,
    url: &str,
    auth: Option<&BasicAuth>,
) -> std::result::Result<RawResponse, PageResult> {
    match http.fetch(url, auth).await {
        Ok(response) => Ok(response),
        Err(e) => Err(PageResult::transport_error(
            500,
            format!("Internal error {e}"),
            url,
        )),
    }
}

/// String view of a decoded value (XML text nodes type numbers)
pub(crate) fn value_str(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Unsigned view of a decoded value, accepting numeric strings
pub(crate) fn value_u64(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Number(n) => n.as_u64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
