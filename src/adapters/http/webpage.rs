use super::ensure_success;
use crate::domain::csl::{CslDate, CslItem, CslName, StringOrNumber, TextValue};
use crate::domain::model::IdentifierKind;
use crate::utils::error::{BibError, Result};
use crate::utils::validation::parse_http_url;
use chrono::{Datelike, Local, NaiveDate};
use regex::{Captures, Regex};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::LazyLock;
use url::Url;

static META_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\s[^>]*>").expect("meta pattern is valid"));
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)([a-zA-Z_:.\-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("attribute pattern is valid")
});
static TITLE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title pattern is valid"));
static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("entity pattern is valid")
});
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})(?:[-/]([0-9]{1,2})(?:[-/]([0-9]{1,2}))?)?")
        .expect("date pattern is valid")
});

pub(super) async fn fetch(client: &Client, url: &str) -> Result<CslItem> {
    let parsed = parse_http_url(url.trim()).map_err(|reason| BibError::InvalidIdentifier {
        kind: IdentifierKind::Url.to_string(),
        value: url.to_string(),
        reason,
    })?;

    tracing::debug!("Fetching web page {}", parsed);
    let response = client.get(parsed.clone()).send().await?;
    let html = ensure_success(response)?.text().await?;

    Ok(scrape_webpage(&html, &parsed, Local::now().date_naive()))
}

/// meta 標籤：name/property 轉小寫後對應到 content (可重複)
fn collect_meta(html: &str) -> HashMap<String, Vec<String>> {
    let mut meta: HashMap<String, Vec<String>> = HashMap::new();

    for tag in META_TAG.find_iter(html) {
        let mut key = None;
        let mut content = None;
        for caps in ATTRIBUTE.captures_iter(tag.as_str()) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match caps[1].to_ascii_lowercase().as_str() {
                "name" | "property" => key = Some(value.trim().to_ascii_lowercase()),
                "content" => content = Some(clean_text(value)),
                _ => {}
            }
        }
        if let (Some(key), Some(content)) = (key, content) {
            if !content.is_empty() {
                meta.entry(key).or_default().push(content);
            }
        }
    }

    meta
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16).ok())
                    .unwrap_or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn clean_text(text: &str) -> String {
    decode_entities(text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_date(text: &str) -> Option<CslDate> {
    let caps = DATE.captures(text.trim())?;
    let year: i32 = caps[1].parse().ok()?;
    let month: Option<u32> = caps.get(2).and_then(|m| m.as_str().parse().ok());
    let day: Option<u32> = caps.get(3).and_then(|m| m.as_str().parse().ok());

    match (month, day) {
        (Some(m), Some(d)) if NaiveDate::from_ymd_opt(year, m, d).is_some() => {
            Some(CslDate::from_parts(year, Some(m), Some(d)))
        }
        (Some(m), _) if (1..=12).contains(&m) => Some(CslDate::from_parts(year, Some(m), None)),
        _ => Some(CslDate::from_parts(year, None, None)),
    }
}

/// 由 HTML 的 meta 標籤與 <title> 組出 CSL 紀錄
pub fn scrape_webpage(html: &str, url: &Url, accessed: NaiveDate) -> CslItem {
    let meta = collect_meta(html);
    let first = |keys: &[&str]| -> Option<String> {
        keys.iter()
            .find_map(|key| meta.get(*key).and_then(|values| values.first()).cloned())
    };
    let all = |keys: &[&str]| -> Vec<String> {
        keys.iter()
            .find_map(|key| meta.get(*key).filter(|values| !values.is_empty()))
            .cloned()
            .unwrap_or_default()
    };

    let title = first(&["citation_title", "dc.title", "og:title", "twitter:title"]).or_else(|| {
        TITLE_TAG
            .captures(html)
            .map(|caps| clean_text(&caps[1]))
            .filter(|title| !title.is_empty())
    });

    let journal = first(&["citation_journal_title"]);
    let item_type = if journal.is_some() {
        "article-journal"
    } else {
        "webpage"
    };
    let container = journal
        .or_else(|| first(&["og:site_name", "citation_conference_title"]))
        .or_else(|| url.host_str().map(|host| host.trim_start_matches("www.").to_string()));

    let authors = all(&["citation_author", "dc.creator", "author"])
        .iter()
        .map(|name| CslName::from_full_name(name))
        .collect();

    let issued = first(&[
        "citation_publication_date",
        "citation_date",
        "citation_online_date",
        "dc.date",
        "article:published_time",
    ])
    .and_then(|date| parse_date(&date));

    let page = match (
        first(&["citation_firstpage"]),
        first(&["citation_lastpage"]),
    ) {
        (Some(first_page), Some(last_page)) => Some(format!("{}-{}", first_page, last_page)),
        (first_page, _) => first_page,
    };

    CslItem {
        id: Some(StringOrNumber::String(url.to_string())),
        item_type: Some(item_type.to_string()),
        title: title.map(TextValue::One),
        container_title: container.map(TextValue::One),
        author: authors,
        issued,
        accessed: Some(CslDate::from_parts(
            accessed.year(),
            Some(accessed.month()),
            Some(accessed.day()),
        )),
        volume: first(&["citation_volume"]).map(StringOrNumber::String),
        issue: first(&["citation_issue"]).map(StringOrNumber::String),
        page: page.map(StringOrNumber::String),
        publisher: first(&["citation_publisher", "dc.publisher"]),
        doi: first(&["citation_doi"]).map(|doi| super::normalize_doi(&doi).to_string()),
        url: Some(url.to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accessed() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_scrape_scholarly_meta() {
        let html = r#"<html><head>
            <title>Ignored title</title>
            <meta name="citation_title" content="Deep &amp; Wide Networks">
            <meta name="citation_author" content="Lovelace, Ada">
            <meta name="citation_author" content="Charles Babbage">
            <meta name="citation_journal_title" content="Journal of Engines">
            <meta name="citation_publication_date" content="2021/07/15">
            <meta name="citation_volume" content="4">
            <meta name="citation_issue" content="2">
            <meta name="citation_firstpage" content="10">
            <meta name="citation_lastpage" content="20">
            <meta name="citation_doi" content="doi.org/10.1000/engines.4">
        </head></html>"#;
        let url = Url::parse("https://journal.example.org/article/4").unwrap();

        let item = scrape_webpage(html, &url, accessed());

        assert_eq!(item.item_type(), "article-journal");
        assert_eq!(item.title_text(), Some("Deep & Wide Networks"));
        assert_eq!(
            item.author,
            vec![
                CslName::personal("Lovelace", "Ada"),
                CslName::personal("Babbage", "Charles")
            ]
        );
        assert_eq!(item.container_title_text(), Some("Journal of Engines"));
        let issued = item.issued.unwrap();
        assert_eq!((issued.year(), issued.month(), issued.day()), (Some(2021), Some(7), Some(15)));
        assert_eq!(item.page.unwrap().to_string(), "10-20");
        assert_eq!(item.doi.as_deref(), Some("10.1000/engines.4"));
        assert_eq!(item.accessed.unwrap().day(), Some(9));
    }

    #[test]
    fn test_scrape_open_graph_with_single_quotes() {
        let html = "<head><meta property='og:title' content='Release notes'>\
                    <meta content=\"Example Blog\" property=\"og:site_name\" />\
                    <meta property=\"article:published_time\" content=\"2023-11-02T08:00:00Z\"></head>";
        let url = Url::parse("https://blog.example.com/notes").unwrap();

        let item = scrape_webpage(html, &url, accessed());

        assert_eq!(item.item_type(), "webpage");
        assert_eq!(item.title_text(), Some("Release notes"));
        assert_eq!(item.container_title_text(), Some("Example Blog"));
        assert_eq!(item.issued.unwrap().month(), Some(11));
        assert_eq!(item.url.as_deref(), Some("https://blog.example.com/notes"));
    }

    #[test]
    fn test_scrape_falls_back_to_title_tag_and_host() {
        let html = "<html><head><TITLE>\n  Plain   page &#8211; home &#x263A;\n</TITLE></head></html>";
        let url = Url::parse("https://www.example.com/").unwrap();

        let item = scrape_webpage(html, &url, accessed());

        assert_eq!(item.title_text(), Some("Plain page \u{2013} home \u{263A}"));
        assert_eq!(item.container_title_text(), Some("example.com"));
        assert!(item.author.is_empty());
        assert!(item.issued.is_none());
    }

    #[test]
    fn test_page_without_title() {
        let item = scrape_webpage("<p>nothing here</p>", &Url::parse("http://a.test").unwrap(), accessed());
        assert!(item.title_text().is_none());
    }

    #[test]
    fn test_parse_date_shapes() {
        assert_eq!(parse_date("2020").unwrap().month(), None);
        assert_eq!(parse_date("2020-13-01").unwrap().month(), None);
        assert_eq!(parse_date("2020-02-30").unwrap().month(), Some(2));
        assert_eq!(parse_date("2020-02-30").unwrap().day(), None);
        assert!(parse_date("yesterday").is_none());
    }

    #[test]
    fn test_decode_unknown_entity_is_kept() {
        assert_eq!(decode_entities("a &bogus; b &lt;c&gt;"), "a &bogus; b <c>");
    }
}
