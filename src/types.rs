//! Common types used throughout jobhub
//!
//! This module contains the shared search criteria type and the JSON
//! value alias used across multiple modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

// ============================================================================
// Search Criteria
// ============================================================================

/// Search criteria shared by every provider.
///
/// All fields are independently optional; an empty string means "unset".
/// The criteria are immutable for the lifetime of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// Free-text keywords
    pub keywords: String,
    /// Location filter (city, region or country, provider-dependent)
    pub location: String,
    /// Company filter
    pub company: String,
}

impl SearchCriteria {
    /// Create criteria with only keywords set
    pub fn keywords(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            ..Self::default()
        }
    }

    /// Set the location filter
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the company filter
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Keywords with the company filter folded in.
    ///
    /// Backends without a dedicated company parameter receive the company
    /// as a `company:<value>` token prepended to the keywords.
    pub fn keywords_with_company(&self) -> String {
        match (self.keywords.is_empty(), self.company.is_empty()) {
            (false, false) => format!("company:{}+{}", self.company, self.keywords),
            (true, false) => format!("company:{}", self.company),
            _ => self.keywords.clone(),
        }
    }
}
