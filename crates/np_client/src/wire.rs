//! Backend document formats and their normalization.
//!
//! The backend may send plain JSON or MongoDB extended JSON (`{"$oid": ..}`,
//! `{"$date": ..}`). Everything is unwrapped here so the rest of the portal
//! only sees `np_core::Article`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use np_core::{Article, ArticlePage, Result};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct WireArticle {
    #[serde(rename = "_id", alias = "id", deserialize_with = "deserialize_id")]
    id: String,
    title: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_label")]
    source: Option<String>,
    #[serde(default, deserialize_with = "deserialize_label")]
    category: Option<String>,
    #[serde(default, alias = "publicationDate", deserialize_with = "deserialize_date")]
    publication_date: Option<DateTime<Utc>>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl From<WireArticle> for Article {
    fn from(wire: WireArticle) -> Self {
        let blank_to_none = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Article {
            id: wire.id,
            title: wire.title,
            summary: wire.summary,
            text: wire.text,
            source: wire.source,
            category: wire.category,
            publication_date: wire.publication_date,
            image: blank_to_none(wire.image),
            url: blank_to_none(wire.url),
        }
    }
}

/// `GET /api/articles` answers either with a bare array or a page object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArticlesPayload {
    List(Vec<WireArticle>),
    Paged {
        articles: Vec<WireArticle>,
        #[serde(default)]
        total: Option<usize>,
    },
}

pub(crate) fn parse<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}

pub fn parse_article(body: &str) -> Result<Article> {
    parse::<WireArticle>(body).map(Article::from)
}

pub fn parse_articles(body: &str) -> Result<Vec<Article>> {
    let wire: Vec<WireArticle> = parse(body)?;
    Ok(wire.into_iter().map(Article::from).collect())
}

pub fn parse_article_page(body: &str) -> Result<ArticlePage> {
    let page = match parse::<ArticlesPayload>(body)? {
        ArticlesPayload::List(articles) => ArticlePage {
            articles: articles.into_iter().map(Article::from).collect(),
            total: None,
        },
        ArticlesPayload::Paged { articles, total } => ArticlePage {
            articles: articles.into_iter().map(Article::from).collect(),
            total,
        },
    };
    Ok(page)
}

/// Unwraps an id given as a string, a number or `{"$oid": "..."}`.
pub fn normalize_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("$oid").and_then(normalize_id),
        _ => None,
    }
}

/// Parses a plain or extended-JSON date. Returns `None` for anything that
/// does not look like a date.
pub fn normalize_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_date_str(s.trim()),
        Value::Number(n) => n.as_i64().and_then(from_millis),
        Value::Object(map) => {
            if let Some(inner) = map.get("$date") {
                normalize_date(inner)
            } else if let Some(Value::String(millis)) = map.get("$numberLong") {
                millis.parse().ok().and_then(from_millis)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    normalize_id(&value).ok_or_else(|| D::Error::custom(format!("unsupported article id: {}", value)))
}

fn deserialize_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let date = value.as_ref().and_then(normalize_date);
    if date.is_none() {
        if let Some(raw) = value.filter(|v| !v.is_null()) {
            tracing::debug!("Ignoring unparseable publication date: {}", raw);
        }
    }
    Ok(date)
}

/// Labels are usually strings; `{"$oid"}` references and numbers are kept as text.
fn deserialize_label<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(normalize_id)
        .filter(|label| !label.trim().is_empty()))
}
