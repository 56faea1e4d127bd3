use super::{ensure_success, require_value};
use crate::domain::csl::{CslDate, CslItem, CslName, StringOrNumber, TextValue};
use crate::domain::model::IdentifierKind;
use crate::utils::error::{BibError, Result};
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{4})\b").expect("year pattern is valid"));

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OpenLibraryBook {
    title: Option<String>,
    subtitle: Option<String>,
    #[serde(default)]
    authors: Vec<Named>,
    #[serde(default)]
    publishers: Vec<Named>,
    #[serde(default)]
    publish_places: Vec<Named>,
    publish_date: Option<String>,
    url: Option<String>,
    number_of_pages: Option<u64>,
}

pub(super) async fn fetch(client: &Client, base: &str, isbn: &str) -> Result<CslItem> {
    let isbn = isbn.trim();
    require_value(IdentifierKind::Isbn, isbn)?;

    let bibkey = format!("ISBN:{}", isbn);
    let url = format!("{}/api/books", base.trim_end_matches('/'));
    tracing::debug!("Looking up {} via {}", bibkey, url);

    let response = client
        .get(&url)
        .query(&[
            ("bibkeys", bibkey.as_str()),
            ("format", "json"),
            ("jscmd", "data"),
        ])
        .send()
        .await?;
    let mut books: HashMap<String, OpenLibraryBook> = ensure_success(response)?.json().await?;

    // 查無資料時回傳空物件 {}
    let book = books.remove(&bibkey).ok_or_else(|| BibError::NotFound {
        kind: IdentifierKind::Isbn.to_string(),
        value: isbn.to_string(),
    })?;

    Ok(book_to_csl(book, isbn))
}

fn book_to_csl(book: OpenLibraryBook, isbn: &str) -> CslItem {
    let title = match (book.title, book.subtitle) {
        (Some(title), Some(subtitle)) if !subtitle.trim().is_empty() => {
            Some(format!("{}: {}", title.trim(), subtitle.trim()))
        }
        (title, _) => title,
    };

    let issued = book
        .publish_date
        .as_deref()
        .and_then(|date| YEAR.captures(date))
        .and_then(|caps| caps[1].parse().ok())
        .map(|year| CslDate::from_parts(year, None, None));

    let mut item = CslItem {
        id: Some(StringOrNumber::String(format!("isbn:{}", isbn))),
        item_type: Some("book".to_string()),
        title: title.map(TextValue::One),
        author: book
            .authors
            .iter()
            .map(|author| CslName::from_full_name(&author.name))
            .collect(),
        issued,
        publisher: book.publishers.into_iter().next().map(|p| p.name),
        publisher_place: book.publish_places.into_iter().next().map(|p| p.name),
        isbn: Some(TextValue::from(isbn)),
        url: book.url,
        ..Default::default()
    };
    if let Some(pages) = book.number_of_pages {
        item.extra
            .insert("number-of-pages".to_string(), pages.to_string().into());
    }
    item
}
