// CSL-JSON 紀錄：渲染用到的欄位有型別，其餘保留在 extra

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// 有的服務送字串，有的送陣列
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    One(String),
    Many(Vec<String>),
}

impl TextValue {
    pub fn first(&self) -> Option<&str> {
        match self {
            TextValue::One(s) => Some(s.as_str()),
            TextValue::Many(items) => items.first().map(String::as_str),
        }
        .map(str::trim)
        .filter(|s| !s.is_empty())
    }
}

impl From<&str> for TextValue {
    fn from(value: &str) -> Self {
        TextValue::One(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StringOrNumber {
    Number(i64),
    String(String),
}

impl fmt::Display for StringOrNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringOrNumber::Number(n) => write!(f, "{}", n),
            StringOrNumber::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for StringOrNumber {
    fn from(value: &str) -> Self {
        StringOrNumber::String(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CslName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub given: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CslName {
    pub fn personal(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: Some(family.into()),
            given: Some(given.into()),
            ..Default::default()
        }
    }

    pub fn literal(name: impl Into<String>) -> Self {
        Self {
            literal: Some(name.into()),
            ..Default::default()
        }
    }

    /// 將 "Given Family" 形式的全名拆成姓與名；單字名保留為 literal
    pub fn from_full_name(name: &str) -> Self {
        let name = name.trim();
        if let Some((family, given)) = name.split_once(',') {
            return Self::personal(family.trim(), given.trim());
        }
        match name.rsplit_once(char::is_whitespace) {
            Some((given, family)) => Self::personal(family.trim(), given.trim()),
            None => Self::literal(name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CslDate {
    #[serde(rename = "date-parts", skip_serializing_if = "Vec::is_empty")]
    pub date_parts: Vec<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CslDate {
    pub fn from_parts(year: i32, month: Option<u32>, day: Option<u32>) -> Self {
        let mut parts = vec![Value::from(year)];
        if let Some(month) = month {
            parts.push(Value::from(month));
            if let Some(day) = day {
                parts.push(Value::from(day));
            }
        }
        Self {
            date_parts: vec![parts],
            ..Default::default()
        }
    }

    fn part(&self, index: usize) -> Option<i64> {
        let value = self.date_parts.first()?.get(index)?;
        match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn year(&self) -> Option<i32> {
        self.part(0)
            .and_then(|y| i32::try_from(y).ok())
            .or_else(|| self.raw.as_deref().and_then(leading_year))
    }

    pub fn month(&self) -> Option<u32> {
        self.part(1)
            .and_then(|m| u32::try_from(m).ok())
            .filter(|m| (1..=12).contains(m))
    }

    pub fn day(&self) -> Option<u32> {
        self.part(2)
            .and_then(|d| u32::try_from(d).ok())
            .filter(|d| (1..=31).contains(d))
    }
}

fn leading_year(raw: &str) -> Option<i32> {
    raw.get(..4).and_then(|y| y.parse().ok())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CslItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<StringOrNumber>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<TextValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_title: Option<TextValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub author: Vec<CslName>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub editor: Vec<CslName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued: Option<CslDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessed: Option<CslDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<StringOrNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<StringOrNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<StringOrNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<StringOrNumber>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher_place: Option<String>,
    #[serde(rename = "DOI", skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(rename = "URL", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "ISBN", skip_serializing_if = "Option::is_none")]
    pub isbn: Option<TextValue>,
    #[serde(rename = "PMID", skip_serializing_if = "Option::is_none")]
    pub pmid: Option<String>,
    #[serde(rename = "PMCID", skip_serializing_if = "Option::is_none")]
    pub pmcid: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CslItem {
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().and_then(TextValue::first)
    }

    pub fn container_title_text(&self) -> Option<&str> {
        self.container_title.as_ref().and_then(TextValue::first)
    }

    pub fn item_type(&self) -> &str {
        self.item_type.as_deref().unwrap_or("document")
    }
}
