// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # jobhub
//!
//! One search session over many job boards. Each backend speaks its own
//! wire format (JSON or XML) and its own pagination dialect (page index,
//! record offset, or in-band offset); jobhub normalizes all of them into a
//! common zero-based page model and a uniform result shape.
//!
//! ## Features
//!
//! - **Six backends**: CareerBuilder, CareerJet, Indeed, Reed, Upwork, Xing
//! - **One result shape**: postings plus `page`/`last` paging metadata
//! - **Failure isolation**: a dead or misconfigured provider becomes an
//!   error-shaped entry, never an aborted search
//! - **Cursor replay**: next-page requests rewrite the previous request URL
//!   instead of rebuilding it
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jobhub::{JobClient, SearchCriteria, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let mut client = JobClient::from_yaml_file("jobhub.yml")?;
//!
//!     let criteria = SearchCriteria::keywords("ruby").with_location("London");
//!     client.search(&criteria).await?;
//!     println!("{} offers across all boards", client.count(None));
//!
//!     while let Some(table) = client.next().await? {
//!         for (provider, page) in table {
//!             println!("{provider}: page {:?}", page.page);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// YAML settings
pub mod config;

/// HTTP transport shared by all adapters
pub mod http;

/// XML response decoding
pub mod decode;

/// Pagination normalizer and cursor codec
pub mod paging;

/// Job posting and page result models
pub mod model;

/// Provider adapters
pub mod providers;

/// Multi-provider search session
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{JobClient, ResultTable};
pub use config::JobsConfig;
pub use error::{Error, Result};
pub use model::{JobPosting, PageResult};
pub use providers::{JobApi, Provider};
pub use types::SearchCriteria;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
