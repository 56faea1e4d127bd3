use crate::app::report::Report;
use crate::config::RenderConfig;
use crate::core::classifier::{classify_all, partition_defined};
use crate::core::orchestrator::retrieve;
use crate::domain::csl::CslItem;
use crate::domain::model::RetrievalStatus;
use crate::domain::ports::{BibliographyRenderer, MetadataSource};
use crate::utils::error::Result;

pub struct CitationEngine<S: MetadataSource, R: BibliographyRenderer> {
    source: S,
    renderer: R,
    render_config: RenderConfig,
}

impl<S: MetadataSource, R: BibliographyRenderer> CitationEngine<S, R> {
    pub fn new(source: S, renderer: R, render_config: RenderConfig) -> Self {
        Self {
            source,
            renderer,
            render_config,
        }
    }

    /// 分類、取回、產生參考文獻；只有渲染錯誤會往上傳
    pub async fn run<A: AsRef<str>>(&self, raw_identifiers: &[A]) -> Result<Report> {
        // Classify
        let (defined, undefined) = partition_defined(classify_all(raw_identifiers));
        tracing::info!(
            "Classified {} identifiers ({} undefined)",
            defined.len() + undefined.len(),
            undefined.len()
        );

        let mut report = Report {
            undefined,
            ..Default::default()
        };
        if defined.is_empty() {
            return Ok(report);
        }

        // Retrieve
        let results = retrieve(&self.source, &defined).await;
        report.requested = defined;

        let (succeeded, failed): (Vec<_>, Vec<_>) = results
            .into_iter()
            .partition(|result| result.status() == RetrievalStatus::Ok);
        tracing::info!(
            "Retrieved {} records, {} failed",
            succeeded.len(),
            failed.len()
        );
        report.failed = failed;

        // Render
        if !succeeded.is_empty() {
            let items: Vec<CslItem> = succeeded
                .iter()
                .filter_map(|result| result.payload().cloned())
                .collect();
            let references = self.renderer.render(&items, &self.render_config)?;
            report.references = Some(references);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::IdentifierKind;
    use crate::utils::error::BibError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSource {
        seen: Mutex<Vec<String>>,
    }

    impl RecordingSource {
        fn record(&self, value: &str) -> Result<CslItem> {
            self.seen
                .lock()
                .map_err(|_| BibError::MetadataError {
                    message: "poisoned".to_string(),
                })?
                .push(value.to_string());
            if value.starts_with("ftp://") {
                return Err(BibError::InvalidIdentifier {
                    kind: "URL".to_string(),
                    value: value.to_string(),
                    reason: "Unsupported URL scheme: ftp".to_string(),
                });
            }
            Ok(CslItem {
                title: Some(value.into()),
                ..Default::default()
            })
        }
    }

    #[async_trait]
    impl MetadataSource for RecordingSource {
        async fn fetch_url(&self, url: &str) -> Result<CslItem> {
            self.record(url)
        }

        async fn fetch_doi(&self, doi: &str) -> Result<CslItem> {
            self.record(doi)
        }

        async fn fetch_pmcid(&self, pmcid: &str) -> Result<CslItem> {
            self.record(pmcid)
        }

        async fn fetch_pmid(&self, pmid: &str) -> Result<CslItem> {
            self.record(pmid)
        }

        async fn fetch_isbn(&self, isbn: &str) -> Result<CslItem> {
            self.record(isbn)
        }
    }

    /// 只列出標題，方便斷言
    struct TitleRenderer;

    impl BibliographyRenderer for TitleRenderer {
        fn render(&self, items: &[CslItem], config: &RenderConfig) -> Result<String> {
            if config.style != "apa" {
                return Err(BibError::UnsupportedStyle {
                    style: config.style.clone(),
                });
            }
            Ok(items
                .iter()
                .filter_map(|item| item.title_text())
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }

    fn engine() -> CitationEngine<RecordingSource, TitleRenderer> {
        CitationEngine::new(
            RecordingSource::default(),
            TitleRenderer,
            RenderConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_undefined_identifier_is_not_retrieved() {
        let engine = engine();

        let report = engine.run(&["hello world"]).await.unwrap();

        assert_eq!(report.undefined.len(), 1);
        assert!(report.requested.is_empty());
        assert!(report.references.is_none());
        assert!(engine.source.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_identifiers_gives_empty_report() {
        let engine = engine();

        let report = engine.run(&[] as &[&str]).await.unwrap();

        assert!(report.is_empty());
        assert_eq!(report.to_string(), "");
    }

    #[tokio::test]
    async fn test_hyphen_tokens_are_undefined() {
        let engine = engine();

        let report = engine.run(&["-x", "-h"]).await.unwrap();

        assert!(!report.is_empty());
        assert_eq!(report.undefined.len(), 2);
        assert!(engine.source.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mixed_pmid_and_undefined() {
        let engine = engine();

        let report = engine.run(&["1234567", "not-an-id"]).await.unwrap();

        assert_eq!(report.undefined[0].value(), "not-an-id");
        assert_eq!(report.requested.len(), 1);
        assert_eq!(report.requested[0].kind(), IdentifierKind::Pmid);
        assert!(report.failed.is_empty());
        assert_eq!(report.references.as_deref(), Some("1234567"));
        assert_eq!(*engine.source.seen.lock().unwrap(), vec!["1234567"]);
    }

    #[tokio::test]
    async fn test_prefixed_bad_url_is_reported_as_failed() {
        let engine = engine();

        let report = engine.run(&["url:ftp://bad", "PMC1234567"]).await.unwrap();

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].kind(), IdentifierKind::Url);
        assert_eq!(report.failed[0].identifier.value(), "ftp://bad");
        assert_eq!(report.references.as_deref(), Some("PMC1234567"));
    }

    #[tokio::test]
    async fn test_all_failed_skips_rendering() {
        let engine = engine();

        let report = engine.run(&["url:ftp://bad"]).await.unwrap();

        assert_eq!(report.failed.len(), 1);
        assert!(report.references.is_none());
    }

    #[tokio::test]
    async fn test_render_failure_propagates() {
        let engine = CitationEngine::new(
            RecordingSource::default(),
            TitleRenderer,
            RenderConfig {
                style: "chicago".to_string(),
                locale: "en-US".to_string(),
            },
        );

        let err = engine.run(&["10.1000/xyz123"]).await.unwrap_err();
        assert!(matches!(err, BibError::UnsupportedStyle { .. }));
    }
}
