// APA 第七版純文字參考文獻 (en-US)

use crate::config::RenderConfig;
use crate::domain::csl::{CslDate, CslItem, CslName};
use crate::domain::ports::BibliographyRenderer;
use crate::utils::error::{BibError, Result};
use serde_json::Value;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// APA 最多列出 20 位作者
const MAX_LISTED_AUTHORS: usize = 20;

#[derive(Debug, Clone, Copy, Default)]
pub struct ApaRenderer;

impl ApaRenderer {
    pub fn supports(config: &RenderConfig) -> Result<()> {
        if !config.style.eq_ignore_ascii_case("apa") {
            return Err(BibError::UnsupportedStyle {
                style: config.style.clone(),
            });
        }
        if !matches!(config.locale.to_ascii_lowercase().as_str(), "en-us" | "en") {
            return Err(BibError::UnsupportedLocale {
                locale: config.locale.clone(),
            });
        }
        Ok(())
    }
}

impl BibliographyRenderer for ApaRenderer {
    fn render(&self, items: &[CslItem], config: &RenderConfig) -> Result<String> {
        Self::supports(config)?;

        let mut entries: Vec<(String, Option<i32>, String)> = items
            .iter()
            .map(|item| {
                let (lead, rest) = format_entry(item);
                let year = item.issued.as_ref().and_then(CslDate::year);
                let text = format!("{} {}", lead, rest).trim().to_string();
                (lead.to_lowercase(), year, text)
            })
            .collect();

        // 依作者位置文字排序，再依年份 (n.d. 在前)
        entries.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        tracing::debug!("Rendered {} APA entries", entries.len());

        Ok(entries
            .into_iter()
            .map(|(_, _, text)| text)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

fn is_periodical(item_type: &str) -> bool {
    matches!(
        item_type,
        "article-journal" | "article-magazine" | "article-newspaper" | "article"
    )
}

fn uses_full_date(item_type: &str) -> bool {
    matches!(
        item_type,
        "webpage" | "post" | "post-weblog" | "article-magazine" | "article-newspaper"
    )
}

/// 回傳 (作者位置, 其餘部分)
fn format_entry(item: &CslItem) -> (String, String) {
    let item_type = item.item_type();
    let date = format_date(item);
    let title = item.title_text().map(|t| title_with_edition(t, item));

    let mut rest = Vec::new();
    let lead = match format_contributors(item) {
        Some(contributors) => {
            rest.push(format!("({}).", date));
            if let Some(title) = title {
                rest.push(terminate(&title));
            }
            contributors
        }
        None => {
            rest.push(format!("({}).", date));
            terminate(title.as_deref().unwrap_or("[Untitled]"))
        }
    };

    if let Some(source) = format_source(item, item_type) {
        rest.push(source);
    }
    if let Some(link) = format_link(item, item_type) {
        rest.push(link);
    }

    (lead, rest.join(" "))
}

fn format_contributors(item: &CslItem) -> Option<String> {
    if let Some(authors) = format_name_list(&item.author) {
        return Some(terminate(&authors));
    }
    if is_periodical(item.item_type()) {
        return None;
    }
    format_editors(&item.editor).map(|editors| format!("{}.", editors))
}

/// "Doe, J. (Ed.)"；沒有可用的姓名時回傳 None
fn format_editors(editors: &[CslName]) -> Option<String> {
    let listed = editors.iter().filter_map(format_name).count();
    let names = format_name_list(editors)?;
    let role = if listed == 1 { "Ed." } else { "Eds." };
    Some(format!("{} ({})", names, role))
}

/// 全部姓名都無法格式化時回傳 None
fn format_name_list(names: &[CslName]) -> Option<String> {
    let formatted: Vec<String> = names.iter().filter_map(format_name).collect();
    let list = match formatted.as_slice() {
        [] => return None,
        [only] => only.clone(),
        [first, second] => format!("{}, & {}", first, second),
        all if all.len() <= MAX_LISTED_AUTHORS => match all.split_last() {
            Some((last, init)) => format!("{}, & {}", init.join(", "), last),
            None => String::new(),
        },
        all => {
            let head = all[..MAX_LISTED_AUTHORS - 1].join(", ");
            let last = all.last().cloned().unwrap_or_default();
            format!("{}, . . . {}", head, last)
        }
    };
    Some(list)
}

fn extra_str<'a>(name: &'a CslName, key: &str) -> Option<&'a str> {
    name.extra
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn format_name(name: &CslName) -> Option<String> {
    if let Some(literal) = name.literal.as_deref().filter(|l| !l.trim().is_empty()) {
        return Some(literal.trim().to_string());
    }

    let family = name.family.as_deref().map(str::trim).filter(|f| !f.is_empty());
    let given = name
        .given
        .as_deref()
        .map(initials)
        .filter(|i| !i.is_empty());

    let mut formatted = match (family, given) {
        (Some(family), Some(given)) => {
            let family = match extra_str(name, "non-dropping-particle") {
                Some(particle) => format!("{} {}", particle, family),
                None => family.to_string(),
            };
            format!("{}, {}", family, given)
        }
        (Some(family), None) => family.to_string(),
        (None, Some(given)) => given,
        (None, None) => return None,
    };

    if let Some(suffix) = extra_str(name, "suffix") {
        formatted.push_str(", ");
        formatted.push_str(suffix);
    }
    Some(formatted)
}

/// "Mary Jane" → "M. J."，"Jean-Paul" → "J.-P."
fn initials(given: &str) -> String {
    given
        .split_whitespace()
        .filter_map(|word| {
            let parts: Vec<String> = word
                .split('-')
                .filter_map(|part| part.chars().find(|c| c.is_alphabetic()))
                .map(|c| format!("{}.", c.to_uppercase()))
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("-"))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_date(item: &CslItem) -> String {
    let Some(issued) = item.issued.as_ref() else {
        return "n.d.".to_string();
    };
    let Some(year) = issued.year() else {
        return issued
            .literal
            .clone()
            .unwrap_or_else(|| "n.d.".to_string());
    };

    if !uses_full_date(item.item_type()) {
        return year.to_string();
    }
    match (issued.month(), issued.day()) {
        (Some(month), Some(day)) => format!("{}, {} {}", year, month_name(month), day),
        (Some(month), None) => format!("{}, {}", year, month_name(month)),
        _ => year.to_string(),
    }
}

fn month_name(month: u32) -> &'static str {
    MONTHS
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or_default()
}

fn title_with_edition(title: &str, item: &CslItem) -> String {
    let title = title.trim();
    match item.edition.as_ref().map(|e| e.to_string()) {
        Some(edition) if edition.trim() != "1" && !edition.trim().is_empty() => {
            let edition = edition.trim();
            let label = match edition.parse::<u32>() {
                Ok(n) => format!("{} ed.", ordinal(n)),
                Err(_) => edition.to_string(),
            };
            format!("{} ({})", title.trim_end_matches('.'), label)
        }
        _ => title.to_string(),
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// 句尾補上句點 (問號、驚嘆號除外)
fn terminate(text: &str) -> String {
    let text = text.trim();
    if text.ends_with(['.', '?', '!']) {
        text.to_string()
    } else {
        format!("{}.", text)
    }
}

fn page_range(page: &str) -> String {
    page.trim().replace("--", "\u{2013}").replace('-', "\u{2013}")
}

fn format_source(item: &CslItem, item_type: &str) -> Option<String> {
    let container = item.container_title_text();
    let publisher = item.publisher.as_deref().map(str::trim).filter(|p| !p.is_empty());

    if is_periodical(item_type) {
        let mut source = container?.to_string();
        if let Some(volume) = &item.volume {
            source.push_str(&format!(", {}", volume));
            if let Some(issue) = &item.issue {
                source.push_str(&format!("({})", issue));
            }
        } else if let Some(issue) = &item.issue {
            source.push_str(&format!(", ({})", issue));
        }
        if let Some(page) = &item.page {
            source.push_str(&format!(", {}", page_range(&page.to_string())));
        }
        return Some(terminate(&source));
    }

    match item_type {
        "book" | "report" | "thesis" => publisher.map(terminate),
        "chapter" | "paper-conference" => {
            let mut source = String::from("In ");
            if let Some(editors) = format_editors(&item.editor) {
                source.push_str(&format!("{}, ", editors));
            }
            source.push_str(container.unwrap_or("[Untitled]"));
            if let Some(page) = &item.page {
                source.push_str(&format!(" (pp. {})", page_range(&page.to_string())));
            }
            let mut source = terminate(&source);
            if let Some(publisher) = publisher {
                source.push(' ');
                source.push_str(&terminate(publisher));
            }
            Some(source)
        }
        _ => container.or(publisher).map(terminate),
    }
}

fn format_link(item: &CslItem, item_type: &str) -> Option<String> {
    if let Some(doi) = item.doi.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        return Some(format!("https://doi.org/{}", doi));
    }
    let url = item.url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;

    // 無發布日期的網頁需註明取用日期
    if uses_full_date(item_type) && item.issued.is_none() {
        if let Some(accessed) = item.accessed.as_ref() {
            if let (Some(year), Some(month), Some(day)) =
                (accessed.year(), accessed.month(), accessed.day())
            {
                return Some(format!(
                    "Retrieved {} {}, {}, from {}",
                    month_name(month),
                    day,
                    year,
                    url
                ));
            }
        }
    }
    Some(url.to_string())
}
