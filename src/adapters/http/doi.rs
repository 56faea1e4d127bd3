use super::{ensure_success, require_value};
use crate::domain::csl::{CslItem, StringOrNumber};
use crate::domain::model::IdentifierKind;
use crate::utils::error::Result;
use regex::Regex;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::sync::LazyLock;

const CSL_JSON: &str = "application/vnd.citationstyles.csl+json";

static RESOLVER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(dx\.)?doi\.org/").expect("resolver prefix pattern is valid")
});

/// 去掉 https://doi.org/ 之類的解析器前綴
pub fn normalize_doi(doi: &str) -> &str {
    let doi = doi.trim();
    match RESOLVER_PREFIX.find(doi) {
        Some(m) => &doi[m.end()..],
        None => doi,
    }
}

pub(super) async fn fetch(client: &Client, resolver: &str, doi: &str) -> Result<CslItem> {
    let doi = normalize_doi(doi);
    require_value(IdentifierKind::Doi, doi)?;

    let url = format!("{}/{}", resolver.trim_end_matches('/'), doi);
    tracing::debug!("Resolving DOI via {}", url);

    let response = client.get(&url).header(ACCEPT, CSL_JSON).send().await?;
    let mut item: CslItem = ensure_success(response)?.json().await?;

    if item.doi.is_none() {
        item.doi = Some(doi.to_string());
    }
    if item.id.is_none() {
        item.id = Some(StringOrNumber::from(doi));
    }
    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_doi() {
        assert_eq!(normalize_doi("10.1000/xyz123"), "10.1000/xyz123");
        assert_eq!(normalize_doi("https://doi.org/10.1000/xyz123"), "10.1000/xyz123");
        assert_eq!(normalize_doi("http://dx.doi.org/10.1000/182"), "10.1000/182");
        assert_eq!(normalize_doi(" doi.org/10.1000/182 "), "10.1000/182");
        assert_eq!(normalize_doi("not-a-real-doi"), "not-a-real-doi");
    }
}
