use crate::domain::csl::CslItem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 識別碼種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentifierKind {
    Url,
    Doi,
    Pmcid,
    Pmid,
    Isbn,
    Undefined,
}

impl IdentifierKind {
    pub fn label(&self) -> &'static str {
        match self {
            IdentifierKind::Url => "URL",
            IdentifierKind::Doi => "DOI",
            IdentifierKind::Pmcid => "PMCID",
            IdentifierKind::Pmid => "PMID",
            IdentifierKind::Isbn => "ISBN",
            IdentifierKind::Undefined => "Undefined",
        }
    }

    pub fn is_defined(&self) -> bool {
        *self != IdentifierKind::Undefined
    }
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 分類後的識別碼，建立後不可變
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    kind: IdentifierKind,
    value: String,
}

impl Identifier {
    pub fn new(kind: IdentifierKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn kind(&self) -> IdentifierKind {
        self.kind
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalStatus {
    Ok,
    Failed,
}

#[derive(Debug, Clone)]
pub enum RetrievalOutcome {
    Retrieved(CslItem),
    Failed(String),
}

/// 單一識別碼的取回結果
#[derive(Debug, Clone)]
pub struct RetrievalResult {
    pub identifier: Identifier,
    pub outcome: RetrievalOutcome,
}

impl RetrievalResult {
    pub fn retrieved(identifier: Identifier, item: CslItem) -> Self {
        Self {
            identifier,
            outcome: RetrievalOutcome::Retrieved(item),
        }
    }

    pub fn failed(identifier: Identifier, reason: impl Into<String>) -> Self {
        Self {
            identifier,
            outcome: RetrievalOutcome::Failed(reason.into()),
        }
    }

    pub fn status(&self) -> RetrievalStatus {
        match self.outcome {
            RetrievalOutcome::Retrieved(_) => RetrievalStatus::Ok,
            RetrievalOutcome::Failed(_) => RetrievalStatus::Failed,
        }
    }

    pub fn kind(&self) -> IdentifierKind {
        self.identifier.kind()
    }

    pub fn payload(&self) -> Option<&CslItem> {
        match &self.outcome {
            RetrievalOutcome::Retrieved(item) => Some(item),
            RetrievalOutcome::Failed(_) => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.outcome {
            RetrievalOutcome::Retrieved(_) => None,
            RetrievalOutcome::Failed(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_display() {
        let id = Identifier::new(IdentifierKind::Pmcid, "PMC1234567");
        assert_eq!(id.to_string(), "[PMCID] PMC1234567");

        let id = Identifier::new(IdentifierKind::Undefined, "hello world");
        assert_eq!(id.to_string(), "[Undefined] hello world");
        assert!(!id.kind().is_defined());
    }

    #[test]
    fn test_payload_only_present_when_ok() {
        let id = Identifier::new(IdentifierKind::Doi, "10.1000/xyz123");

        let ok = RetrievalResult::retrieved(id.clone(), CslItem::default());
        assert_eq!(ok.status(), RetrievalStatus::Ok);
        assert!(ok.payload().is_some());
        assert!(ok.failure_reason().is_none());

        let failed = RetrievalResult::failed(id, "not found");
        assert_eq!(failed.status(), RetrievalStatus::Failed);
        assert!(failed.payload().is_none());
        assert_eq!(failed.failure_reason(), Some("not found"));
        assert_eq!(failed.kind(), IdentifierKind::Doi);
    }
}
