use crate::config::{RenderConfig, ServiceEndpoints};
use crate::domain::csl::CslItem;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn endpoints(&self) -> &ServiceEndpoints;
    fn render_config(&self) -> &RenderConfig;
}

/// 每種識別碼各一個取回操作
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn fetch_url(&self, url: &str) -> Result<CslItem>;
    async fn fetch_doi(&self, doi: &str) -> Result<CslItem>;
    async fn fetch_pmcid(&self, pmcid: &str) -> Result<CslItem>;
    async fn fetch_pmid(&self, pmid: &str) -> Result<CslItem>;
    async fn fetch_isbn(&self, isbn: &str) -> Result<CslItem>;
}

pub trait BibliographyRenderer: Send + Sync {
    fn render(&self, items: &[CslItem], config: &RenderConfig) -> Result<String>;
}
