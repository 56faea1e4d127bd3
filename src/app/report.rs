use crate::domain::model::{Identifier, RetrievalResult};
use std::fmt;

/// 一次執行的文字輸出，依結果分段
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub undefined: Vec<Identifier>,
    pub requested: Vec<Identifier>,
    pub failed: Vec<RetrievalResult>,
    pub references: Option<String>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.undefined.is_empty() && self.requested.is_empty()
    }
}

fn write_section<'a, I>(f: &mut fmt::Formatter<'_>, heading: &str, entries: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a Identifier>,
{
    writeln!(f, "{}", heading)?;
    for identifier in entries {
        writeln!(f, "{}", identifier)?;
    }
    writeln!(f)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.undefined.is_empty() {
            write_section(
                f,
                "Unable to determine the type of these identifiers:",
                &self.undefined,
            )?;
        }

        if self.requested.is_empty() {
            return Ok(());
        }

        write_section(
            f,
            "Retrieving data for these identifiers:",
            &self.requested,
        )?;

        if !self.failed.is_empty() {
            write_section(
                f,
                "Failed to retrieve content from these identifiers:",
                self.failed.iter().map(|result| &result.identifier),
            )?;
        }

        if let Some(references) = &self.references {
            writeln!(f, "References:")?;
            writeln!(f, "{}", references.trim_end())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::IdentifierKind;

    #[test]
    fn test_empty_report_renders_nothing() {
        let report = Report::default();
        assert!(report.is_empty());
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn test_undefined_only() {
        let report = Report {
            undefined: vec![Identifier::new(IdentifierKind::Undefined, "hello world")],
            ..Default::default()
        };

        assert_eq!(
            report.to_string(),
            "Unable to determine the type of these identifiers:\n[Undefined] hello world\n\n"
        );
    }

    #[test]
    fn test_full_layout() {
        let pmid = Identifier::new(IdentifierKind::Pmid, "1234567");
        let url = Identifier::new(IdentifierKind::Url, "ftp://bad");
        let report = Report {
            undefined: vec![Identifier::new(IdentifierKind::Undefined, "not-an-id")],
            requested: vec![pmid, url.clone()],
            failed: vec![RetrievalResult::failed(url, "Unsupported URL scheme: ftp")],
            references: Some("Doe, J. (2020). Title.\n".to_string()),
        };

        let expected = "\
Unable to determine the type of these identifiers:
[Undefined] not-an-id

Retrieving data for these identifiers:
[PMID] 1234567
[URL] ftp://bad

Failed to retrieve content from these identifiers:
[URL] ftp://bad

References:
Doe, J. (2020). Title.
";
        assert_eq!(report.to_string(), expected);
    }
}
