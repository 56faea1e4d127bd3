use crate::domain::model::{Identifier, IdentifierKind, RetrievalResult};
use crate::domain::ports::MetadataSource;
use futures::future::join_all;

/// 依種類派送到對應的取回操作，錯誤轉為 Failed 結果
async fn dispatch<S>(source: &S, identifier: &Identifier) -> Option<RetrievalResult>
where
    S: MetadataSource + ?Sized,
{
    let value = identifier.value();
    let fetched = match identifier.kind() {
        IdentifierKind::Url => source.fetch_url(value).await,
        IdentifierKind::Doi => source.fetch_doi(value).await,
        IdentifierKind::Pmcid => source.fetch_pmcid(value).await,
        IdentifierKind::Pmid => source.fetch_pmid(value).await,
        IdentifierKind::Isbn => source.fetch_isbn(value).await,
        IdentifierKind::Undefined => {
            tracing::debug!("Skipping undefined identifier: {}", value);
            return None;
        }
    };

    let result = match fetched {
        Ok(item) => {
            tracing::debug!("✅ Retrieved {}", identifier);
            RetrievalResult::retrieved(identifier.clone(), item)
        }
        Err(e) => {
            tracing::warn!("❌ Retrieval failed for {}: {}", identifier, e);
            RetrievalResult::failed(identifier.clone(), e.to_string())
        }
    };
    Some(result)
}

/// 並行取回所有識別碼的中繼資料；結果順序與輸入相同
pub async fn retrieve<S>(source: &S, identifiers: &[Identifier]) -> Vec<RetrievalResult>
where
    S: MetadataSource + ?Sized,
{
    tracing::info!("Retrieving {} identifiers", identifiers.len());

    join_all(identifiers.iter().map(|identifier| dispatch(source, identifier)))
        .await
        .into_iter()
        .flatten()
        .collect()
}
