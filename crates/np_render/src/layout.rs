use crate::date::Masthead;
use crate::html::{escape, Fragment};
use crate::labels::{category_label, source_label};
use np_core::{Category, NavigationState, PageKind, SourceKind};

/// Category and source keys listed in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub categories: Vec<String>,
    pub sources: Vec<String>,
}

impl Default for Menu {
    /// The keys the portal has labels for.
    fn default() -> Self {
        Self {
            categories: Category::ALL.iter().map(|c| c.key().to_string()).collect(),
            sources: SourceKind::ALL.iter().map(|s| s.key().to_string()).collect(),
        }
    }
}

pub fn page_title(state: &NavigationState) -> String {
    let key = state.key().unwrap_or_default();
    match state.page() {
        PageKind::Main => "Новости".to_string(),
        PageKind::Category => format!("Новости: {}", category_label(key)),
        PageKind::Source => format!("Источник: {}", source_label(key)),
        PageKind::Article => "Статья".to_string(),
        PageKind::Search => format!("Поиск: {}", state.query().unwrap_or_default()),
    }
}

fn nav_links(class: &str, keys: &[String], page: PageKind, label: fn(&str) -> &str) -> String {
    let mut html = format!(r#"<nav class="{}">"#, class);
    for key in keys {
        let state = match page {
            PageKind::Source => NavigationState::source(key.as_str()),
            _ => NavigationState::category(key.as_str()),
        };
        html.push_str(&format!(
            r#"<a href="{}" data-page="{}" data-type="{}">{}</a>"#,
            escape(&state.to_query()),
            page,
            escape(key),
            escape(label(key))
        ));
    }
    html.push_str("</nav>");
    html
}

/// Full portal page around `content`, which lands in `#dynamic-content`.
pub fn render_document(state: &NavigationState, menu: &Menu, masthead: &Masthead, content: &Fragment) -> String {
    let query = match state.page() {
        PageKind::Search => state.query().unwrap_or_default(),
        _ => "",
    };
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="ru"><head><meta charset="utf-8"><title>{title}</title>"#,
            r#"<link rel="stylesheet" href="/static/style.css"></head><body>"#,
            r#"<header class="site-header">"#,
            r#"<div id="current-date"><div class="date-weekday">{weekday}</div><div class="date-day">{day}</div>"#,
            r#"<div class="date-month">{month}</div><div class="date-year">{year}</div></div>"#,
            r#"<a class="logo" href="?page=main" data-page="main">Новости</a>"#,
            "{categories}{sources}",
            r#"<form class="search" action="/" method="get"><input type="hidden" name="page" value="search">"#,
            r#"<input class="search-input" type="search" name="query" value="{query}" placeholder="Поиск новостей">"#,
            r#"<button class="search-button" type="submit">Найти</button></form>"#,
            "</header>",
            r#"<main id="dynamic-content">{content}</main>"#,
            "</body></html>\n"
        ),
        title = escape(&page_title(state)),
        weekday = masthead.weekday,
        day = masthead.day,
        month = masthead.month,
        year = masthead.year,
        categories = nav_links("categories", &menu.categories, PageKind::Category, category_label),
        sources = nav_links("sources", &menu.sources, PageKind::Source, source_label),
        query = escape(query),
        content = content,
    )
}
