//! Configuration types for provider activation and credentials
//!
//! Each backend gets its own settings struct with serde defaults, so a
//! partial YAML document (or a hand-built struct) always deserializes to a
//! complete configuration. Page size bounds are provider-specific and are
//! resolved once at adapter construction, never re-derived per request.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete jobhub configuration covering every supported provider.
///
/// Providers default to deactivated; activating one requires filling in its
/// credential fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    /// Indeed settings
    pub indeed: IndeedConfig,
    /// Xing settings
    pub xing: XingConfig,
    /// Reed settings
    pub reed: ReedConfig,
    /// CareerBuilder settings
    pub careerbuilder: CareerBuilderConfig,
    /// CareerJet settings
    pub careerjet: CareerJetConfig,
    /// Upwork settings
    pub upwork: UpworkConfig,
}

impl JobsConfig {
    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}

// ============================================================================
// Per-Provider Configs
// ============================================================================

/// Indeed publisher API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndeedConfig {
    /// Whether this provider takes part in aggregate sessions
    pub activated: bool,
    /// API hostname
    pub api: String,
    /// API version
    pub version: String,
    /// Publisher key used as the auth marker
    pub publisher: String,
    /// Postings per page, valid range 1..=25; out-of-range falls back to 25
    pub page_size: Option<u32>,
}

impl Default for IndeedConfig {
    fn default() -> Self {
        Self {
            activated: false,
            api: "api.indeed.com".to_string(),
            version: "2".to_string(),
            publisher: String::new(),
            page_size: None,
        }
    }
}

/// Xing jobs API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct XingConfig {
    /// Whether this provider takes part in aggregate sessions
    pub activated: bool,
    /// API hostname
    pub api: String,
    /// OAuth consumer key
    pub consumer_key: String,
    /// OAuth consumer secret
    pub consumer_secret: String,
    /// OAuth token
    pub oauth_token: String,
    /// OAuth token secret
    pub oauth_token_secret: String,
    /// Postings per page, valid range 1..=100; out-of-range falls back to 25
    pub page_size: Option<u32>,
}

impl Default for XingConfig {
    fn default() -> Self {
        Self {
            activated: false,
            api: "api.xing.com".to_string(),
            consumer_key: String::new(),
            consumer_secret: String::new(),
            oauth_token: String::new(),
            oauth_token_secret: String::new(),
            page_size: None,
        }
    }
}

/// Reed.co.uk API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReedConfig {
    /// Whether this provider takes part in aggregate sessions
    pub activated: bool,
    /// API hostname and base path
    pub api: String,
    /// API version
    pub version: String,
    /// API key, sent as the basic-auth username
    pub clientid: String,
    /// Postings per page, valid range 1..=100; out-of-range falls back to 25
    pub page_size: Option<u32>,
}

impl Default for ReedConfig {
    fn default() -> Self {
        Self {
            activated: false,
            api: "reed.co.uk/api".to_string(),
            version: "1.0".to_string(),
            clientid: String::new(),
            page_size: None,
        }
    }
}

/// CareerBuilder API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerBuilderConfig {
    /// Whether this provider takes part in aggregate sessions
    pub activated: bool,
    /// API hostname
    pub api: String,
    /// API version
    pub version: String,
    /// Developer key
    pub clientid: String,
    /// Postings per page, valid range 1..=100; out-of-range falls back to 25
    pub page_size: Option<u32>,
}

impl Default for CareerBuilderConfig {
    fn default() -> Self {
        Self {
            activated: false,
            api: "api.careerbuilder.com".to_string(),
            version: "v2".to_string(),
            clientid: String::new(),
            page_size: None,
        }
    }
}

/// CareerJet public API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CareerJetConfig {
    /// Whether this provider takes part in aggregate sessions
    pub activated: bool,
    /// API hostname
    pub api: String,
    /// Postings per page, valid range 1..=99; out-of-range falls back to 25
    pub page_size: Option<u32>,
}

impl Default for CareerJetConfig {
    fn default() -> Self {
        Self {
            activated: false,
            api: "public.api.careerjet.net".to_string(),
            page_size: None,
        }
    }
}

/// Upwork API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpworkConfig {
    /// Whether this provider takes part in aggregate sessions
    pub activated: bool,
    /// API hostname
    pub api: String,
    /// OAuth consumer key
    pub consumer_key: String,
    /// OAuth consumer secret
    pub consumer_secret: String,
    /// OAuth token
    pub oauth_token: String,
    /// OAuth token secret
    pub oauth_token_secret: String,
    /// Postings per page, valid range 1..=100; out-of-range falls back to 25
    pub page_size: Option<u32>,
}

impl Default for UpworkConfig {
    fn default() -> Self {
        Self {
            activated: false,
            api: "www.upwork.com".to_string(),
            consumer_key: String::new(),
            consumer_secret: String::new(),
            oauth_token: String::new(),
            oauth_token_secret: String::new(),
            page_size: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = JobsConfig::default();
        assert!(!config.indeed.activated);
        assert_eq!(config.indeed.api, "api.indeed.com");
        assert_eq!(config.reed.api, "reed.co.uk/api");
        assert_eq!(config.reed.version, "1.0");
        assert_eq!(config.careerbuilder.version, "v2");
        assert_eq!(config.careerjet.api, "public.api.careerjet.net");
        assert!(config.xing.page_size.is_none());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
indeed:
  activated: true
  publisher: secret-key
  page_size: 10
reed:
  activated: true
  clientid: secret-key
"#;
        let config = JobsConfig::from_yaml_str(yaml).unwrap();
        assert!(config.indeed.activated);
        assert_eq!(config.indeed.publisher, "secret-key");
        assert_eq!(config.indeed.page_size, Some(10));
        // untouched sections keep their defaults
        assert_eq!(config.indeed.api, "api.indeed.com");
        assert!(config.reed.activated);
        assert!(!config.careerjet.activated);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(JobsConfig::from_yaml_str("indeed: [not, a, map]").is_err());
    }
}
