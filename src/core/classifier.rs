use crate::domain::model::{Identifier, IdentifierKind};
use regex::Regex;
use std::sync::LazyLock;

/// 明確前綴，優先於樣式推斷
const PREFIXES: [(&str, IdentifierKind); 5] = [
    ("url:", IdentifierKind::Url),
    ("doi:", IdentifierKind::Doi),
    ("pmcid:", IdentifierKind::Pmcid),
    ("pmid:", IdentifierKind::Pmid),
    ("isbn:", IdentifierKind::Isbn),
];

// 順序即優先權: DOI, URL, PMCID, PMID, ISBN
static PATTERNS: LazyLock<Vec<(IdentifierKind, Regex)>> = LazyLock::new(|| {
    [
        (
            IdentifierKind::Doi,
            r"^((https?://)?(dx\.)?doi\.org/)?10\.[0-9]{4,9}/[-._;()/:a-zA-Z0-9]+$",
        ),
        (
            IdentifierKind::Url,
            r"^https?://[a-zA-Z0-9\-._~:/?#\[\]@!$&'()*+,;=]+$",
        ),
        (IdentifierKind::Pmcid, r"^PMC[0-9]+$"),
        (IdentifierKind::Pmid, r"^[0-9]{7,10}$"),
        (IdentifierKind::Isbn, r"^97[89][0-9]{9}[0-9X]$"),
    ]
    .into_iter()
    .map(|(kind, pattern)| (kind, Regex::new(pattern).expect("identifier pattern is valid")))
    .collect()
});

/// 將原始字串分類為識別碼；永不失敗，無法判斷時回傳 Undefined
pub fn classify(raw: &str) -> Identifier {
    let trimmed = raw.trim();

    for (prefix, kind) in PREFIXES {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            return Identifier::new(kind, rest.trim());
        }
    }

    let kind = PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(trimmed))
        .map(|(kind, _)| *kind)
        .unwrap_or(IdentifierKind::Undefined);

    tracing::debug!("Classified '{}' as {}", trimmed, kind);
    Identifier::new(kind, trimmed)
}

pub fn classify_all<S: AsRef<str>>(raw: &[S]) -> Vec<Identifier> {
    raw.iter().map(|s| classify(s.as_ref())).collect()
}

/// 分成 (已定義, 未定義)，保持原順序
pub fn partition_defined(identifiers: Vec<Identifier>) -> (Vec<Identifier>, Vec<Identifier>) {
    identifiers
        .into_iter()
        .partition(|identifier| identifier.kind().is_defined())
}
