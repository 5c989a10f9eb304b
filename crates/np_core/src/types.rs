use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An article as seen by the portal after normalization at the API boundary.
///
/// The portal never owns articles: every navigation fetches them again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: Option<String>,
    pub text: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub publication_date: Option<DateTime<Utc>>,
    pub image: Option<String>,
    pub url: Option<String>,
}

impl Article {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: None,
            text: None,
            source: None,
            category: None,
            publication_date: None,
            image: None,
            url: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.publication_date = Some(date);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Body to display: `text`, then `summary`, skipping blank values.
    pub fn body(&self) -> Option<&str> {
        non_blank(self.text.as_deref()).or_else(|| non_blank(self.summary.as_deref()))
    }

    pub fn summary_text(&self) -> Option<&str> {
        non_blank(self.summary.as_deref())
    }

    pub fn known_category(&self) -> Option<Category> {
        self.category.as_deref().and_then(|c| c.parse().ok())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// The closed set of categories the portal knows labels for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Culture,
    Sports,
    Tech,
    Holidays,
    Education,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Culture,
        Category::Sports,
        Category::Tech,
        Category::Holidays,
        Category::Education,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Category::Culture => "culture",
            Category::Sports => "sports",
            Category::Tech => "tech",
            Category::Holidays => "holidays",
            Category::Education => "education",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Culture => "Культура",
            Category::Sports => "Спорт",
            Category::Tech => "Технологии",
            Category::Holidays => "Праздники",
            Category::Education => "Образование",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Kinds of sources the backend groups articles by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    News,
    Social,
    Stat,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::News, SourceKind::Social, SourceKind::Stat];

    pub fn key(&self) -> &'static str {
        match self {
            SourceKind::News => "news",
            SourceKind::Social => "social",
            SourceKind::Stat => "stat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::News => "Новостные сайты",
            SourceKind::Social => "Социальные сети",
            SourceKind::Stat => "Google search",
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SourceKind::ALL
            .into_iter()
            .find(|k| k.key() == s)
            .ok_or_else(|| format!("Unknown source: {}", s))
    }
}
