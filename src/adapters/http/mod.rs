// HTTP 中繼資料來源: DOI 內容協商、NCBI 引用匯出、Open Library、一般網頁

mod doi;
mod ncbi;
mod open_library;
mod webpage;

pub use doi::normalize_doi;
pub use webpage::scrape_webpage;

use crate::config::ServiceEndpoints;
use crate::domain::csl::CslItem;
use crate::domain::model::IdentifierKind;
use crate::domain::ports::MetadataSource;
use crate::utils::error::{BibError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct HttpMetadataSource {
    client: Client,
    endpoints: ServiceEndpoints,
}

impl HttpMetadataSource {
    pub fn new(endpoints: ServiceEndpoints) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, endpoints))
    }

    pub fn with_client(client: Client, endpoints: ServiceEndpoints) -> Self {
        Self { client, endpoints }
    }
}

/// 非 2xx 狀態視為失敗
pub(crate) fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    tracing::debug!("HTTP {} from {}", status, response.url());
    if !status.is_success() {
        return Err(BibError::UnexpectedStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }
    Ok(response)
}

/// 沒有標題的紀錄無法產生參考文獻
pub(crate) fn ensure_title(item: CslItem, kind: IdentifierKind, value: &str) -> Result<CslItem> {
    if item.title_text().is_none() {
        return Err(BibError::MetadataError {
            message: format!("{} {} returned a record without a title", kind, value),
        });
    }
    Ok(item)
}

pub(crate) fn require_value(kind: IdentifierKind, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BibError::InvalidIdentifier {
            kind: kind.to_string(),
            value: value.to_string(),
            reason: "identifier is empty".to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl MetadataSource for HttpMetadataSource {
    async fn fetch_url(&self, url: &str) -> Result<CslItem> {
        let item = webpage::fetch(&self.client, url).await?;
        ensure_title(item, IdentifierKind::Url, url)
    }

    async fn fetch_doi(&self, doi: &str) -> Result<CslItem> {
        let item = doi::fetch(&self.client, &self.endpoints.doi_resolver, doi).await?;
        ensure_title(item, IdentifierKind::Doi, doi)
    }

    async fn fetch_pmcid(&self, pmcid: &str) -> Result<CslItem> {
        let item = ncbi::fetch_pmcid(&self.client, &self.endpoints.ncbi_citation, pmcid).await?;
        ensure_title(item, IdentifierKind::Pmcid, pmcid)
    }

    async fn fetch_pmid(&self, pmid: &str) -> Result<CslItem> {
        let item = ncbi::fetch_pmid(&self.client, &self.endpoints.ncbi_citation, pmid).await?;
        ensure_title(item, IdentifierKind::Pmid, pmid)
    }

    async fn fetch_isbn(&self, isbn: &str) -> Result<CslItem> {
        let item = open_library::fetch(&self.client, &self.endpoints.open_library, isbn).await?;
        ensure_title(item, IdentifierKind::Isbn, isbn)
    }
}
