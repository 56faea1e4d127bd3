#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_STYLE: &str = "apa";
pub const DEFAULT_LOCALE: &str = "en-US";

/// 外部服務的基底 URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoints {
    pub doi_resolver: String,
    pub ncbi_citation: String,
    pub open_library: String,
}

impl Default for ServiceEndpoints {
    fn default() -> Self {
        Self {
            doi_resolver: "https://doi.org".to_string(),
            ncbi_citation: "https://api.ncbi.nlm.nih.gov/lit/ctxp/v1".to_string(),
            open_library: "https://openlibrary.org".to_string(),
        }
    }
}

impl ServiceEndpoints {
    /// 所有服務都指向同一個基底 URL (測試用)
    pub fn with_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            doi_resolver: base.clone(),
            ncbi_citation: base.clone(),
            open_library: base,
        }
    }
}

impl Validate for ServiceEndpoints {
    fn validate(&self) -> Result<()> {
        validate_url("endpoints.doi_resolver", &self.doi_resolver)?;
        validate_url("endpoints.ncbi_citation", &self.ncbi_citation)?;
        validate_url("endpoints.open_library", &self.open_library)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub style: String,
    pub locale: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            style: DEFAULT_STYLE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Validate for RenderConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("render.style", &self.style)?;
        validate_non_empty_string("render.locale", &self.locale)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ServiceEndpoints::default().validate().is_ok());
        assert!(RenderConfig::default().validate().is_ok());
        assert_eq!(RenderConfig::default().style, "apa");
        assert_eq!(RenderConfig::default().locale, "en-US");
    }

    #[test]
    fn test_with_base_strips_trailing_slash() {
        let endpoints = ServiceEndpoints::with_base("http://127.0.0.1:5000/");
        assert_eq!(endpoints.doi_resolver, "http://127.0.0.1:5000");
        assert_eq!(endpoints.open_library, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let endpoints = ServiceEndpoints {
            ncbi_citation: "not a url".to_string(),
            ..Default::default()
        };
        assert!(endpoints.validate().is_err());
    }
}
