use super::{ensure_success, require_value};
use crate::domain::csl::CslItem;
use crate::domain::model::IdentifierKind;
use crate::utils::error::{BibError, Result};
use reqwest::Client;
use serde_json::Value;

/// NCBI Literature Citation Exporter，format=csl
async fn fetch_csl(client: &Client, base: &str, database: &str, id: &str) -> Result<CslItem> {
    let url = format!("{}/{}/", base.trim_end_matches('/'), database);
    tracing::debug!("Requesting CSL from {} (id={})", url, id);

    let response = client
        .get(&url)
        .query(&[("format", "csl"), ("id", id)])
        .send()
        .await?;
    let body: Value = ensure_success(response)?.json().await?;

    // 多筆查詢回傳陣列，這裡只取第一筆
    let record = match body {
        Value::Array(items) => items.into_iter().next(),
        Value::Object(ref map) if map.get("status").and_then(Value::as_str) == Some("error") => {
            None
        }
        other => Some(other),
    };

    match record {
        Some(record) => Ok(serde_json::from_value(record)?),
        None => Err(BibError::NotFound {
            kind: database.to_uppercase(),
            value: id.to_string(),
        }),
    }
}

pub(super) async fn fetch_pmid(client: &Client, base: &str, pmid: &str) -> Result<CslItem> {
    let pmid = pmid.trim();
    require_value(IdentifierKind::Pmid, pmid)?;

    let mut item = fetch_csl(client, base, "pubmed", pmid).await?;
    if item.pmid.is_none() {
        item.pmid = Some(pmid.to_string());
    }
    Ok(item)
}

pub(super) async fn fetch_pmcid(client: &Client, base: &str, pmcid: &str) -> Result<CslItem> {
    let digits = strip_pmc_prefix(pmcid);
    require_value(IdentifierKind::Pmcid, digits)?;

    let mut item = fetch_csl(client, base, "pmc", digits).await?;
    if item.pmcid.is_none() {
        item.pmcid = Some(format!("PMC{}", digits));
    }
    Ok(item)
}

/// 導出服務只接受數字部分
fn strip_pmc_prefix(pmcid: &str) -> &str {
    let pmcid = pmcid.trim();
    pmcid.strip_prefix("PMC").unwrap_or(pmcid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_pmc_prefix() {
        assert_eq!(strip_pmc_prefix("PMC1234567"), "1234567");
        assert_eq!(strip_pmc_prefix(" 1234567 "), "1234567");
        assert_eq!(strip_pmc_prefix("PMC"), "");
    }
}
