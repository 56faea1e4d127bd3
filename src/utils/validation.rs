use crate::utils::error::{BibError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 解析 http/https URL，失敗時回傳原因
pub fn parse_http_url(url_str: &str) -> std::result::Result<Url, String> {
    if url_str.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(format!("Unsupported URL scheme: {}", scheme)),
        },
        Err(e) => Err(format!("Invalid URL format: {}", e)),
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    parse_http_url(url_str)
        .map(|_| ())
        .map_err(|reason| BibError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason,
        })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BibError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoints.doi_resolver", "https://doi.org").is_ok());
        assert!(validate_url("endpoints.doi_resolver", "http://localhost:8080").is_ok());
        assert!(validate_url("endpoints.doi_resolver", "").is_err());
        assert!(validate_url("endpoints.doi_resolver", "invalid-url").is_err());
        assert!(validate_url("endpoints.doi_resolver", "ftp://example.com").is_err());
    }

    #[test]
    fn test_parse_http_url_reports_scheme() {
        let reason = parse_http_url("ftp://bad").unwrap_err();
        assert_eq!(reason, "Unsupported URL scheme: ftp");

        let url = parse_http_url("https://example.com/page?x=1").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("render.style", "apa").is_ok());
        assert!(validate_non_empty_string("render.style", "   ").is_err());
    }
}
