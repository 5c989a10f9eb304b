use crate::body;
use crate::date::{format_long, format_short};
use crate::html::{escape, safe_url, Fragment};
use crate::labels::{
    category_label, source_label, DIGEST_TITLE, LATEST_TITLE, NO_SUMMARY, NO_TEXT, PLACEHOLDER_IMAGE,
    UNKNOWN_SOURCE, UNTITLED,
};
use crate::pagination::{PageItem, Pagination};
use np_core::{Article, ArticlePage, Category, NavigationState, NewsFilter, PageKind, SourceKind};

/// Articles featured at the head of listing pages.
pub const DIGEST_SIZE: usize = 3;

/// A paginated article list with its digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub state: NavigationState,
    pub digest: Vec<Article>,
    pub items: Vec<Article>,
    pub pagination: Pagination,
    pub page_size: usize,
    /// Matching articles overall, when known.
    pub total: Option<usize>,
}

impl Listing {
    /// Cuts the page for `state` out of a list fetched in full. The digest is
    /// the head of the full list, whichever page is shown.
    pub fn windowed(state: NavigationState, all: Vec<Article>, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let pagination = Pagination::for_total(state.page_number(page_size), all.len(), page_size);
        let digest = all.iter().take(DIGEST_SIZE).cloned().collect();
        let total = Some(all.len());
        let items = all
            .into_iter()
            .skip((pagination.current - 1) * page_size)
            .take(page_size)
            .collect();
        Self {
            state,
            digest,
            items,
            pagination,
            page_size,
            total,
        }
    }

    /// A page the backend already cut, with the digest fetched separately.
    pub fn server_page(state: NavigationState, digest: Vec<Article>, page: ArticlePage, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let current = state.page_number(page_size);
        let pagination = match page.total {
            Some(total) => Pagination::for_total(current, total, page_size),
            None => Pagination::open_ended(current, page.articles.len(), page_size),
        };
        Self {
            state,
            digest: digest.into_iter().take(DIGEST_SIZE).collect(),
            items: page.articles,
            pagination,
            page_size,
            total: page.total,
        }
    }

    fn page_href(&self, number: usize) -> String {
        let offset = (number.max(1) - 1) * self.page_size;
        self.state.clone().with_offset(offset).to_query()
    }
}

/// Everything a page needs, already fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    Main(Listing),
    Category(Listing),
    Source(Listing),
    Article(Article),
    Search { query: String, results: Vec<Article> },
}

impl PageView {
    pub fn kind(&self) -> PageKind {
        match self {
            PageView::Main(_) => PageKind::Main,
            PageView::Category(_) => PageKind::Category,
            PageView::Source(_) => PageKind::Source,
            PageView::Article(_) => PageKind::Article,
            PageView::Search { .. } => PageKind::Search,
        }
    }
}

/// Renders a page into the fragment swapped into the content container.
/// Pure: the same view always yields the same bytes.
pub fn render(view: &PageView) -> Fragment {
    let html = match view {
        PageView::Main(listing) => render_main(listing),
        PageView::Category(listing) => {
            let label = category_label(listing.state.key().unwrap_or_default());
            render_listing(listing, format!("Новости: {}", label), None)
        }
        PageView::Source(listing) => {
            let label = source_label(listing.state.key().unwrap_or_default());
            render_listing(listing, format!("Источник: {}", label), None)
        }
        PageView::Article(article) => render_article(article),
        PageView::Search { query, results } => render_search(query, results),
    };
    Fragment::new(html)
}

pub(crate) fn article_href(id: &str) -> String {
    NavigationState::article(id).to_query()
}

fn title_of(article: &Article) -> &str {
    if article.title.trim().is_empty() {
        UNTITLED
    } else {
        &article.title
    }
}

fn article_link(article: &Article, class: &str) -> String {
    format!(
        r#"<a href="{href}" class="{class}" data-page="article" data-type="{id}">{title}</a>"#,
        href = escape(&article_href(&article.id)),
        class = class,
        id = escape(&article.id),
        title = escape(title_of(article)),
    )
}

fn image_src(article: &Article) -> &str {
    article.image.as_deref().and_then(safe_url).unwrap_or(PLACEHOLDER_IMAGE)
}

fn render_digest(digest: &[Article]) -> String {
    let mut html = format!(r#"<section class="digest"><h2>{}</h2><ul>"#, DIGEST_TITLE);
    for article in digest.iter().take(DIGEST_SIZE) {
        html.push_str("<li>");
        html.push_str(&article_link(article, "digest-link"));
        html.push_str("</li>");
    }
    html.push_str("</ul></section>");
    html
}

fn render_news_item(article: &Article) -> String {
    format!(
        concat!(
            r#"<article class="news-item" data-id="{id}">"#,
            r#"<img src="{image}" alt="{alt}">"#,
            r#"<div class="news-text">{link}"#,
            r#"<p class="news-summary">{summary}</p>"#,
            r#"<small class="news-date">Дата публикации: {date}</small>"#,
            r#"<small class="news-source">Источник: {source}</small>"#,
            "</div></article>"
        ),
        id = escape(&article.id),
        image = escape(image_src(article)),
        alt = escape(title_of(article)),
        link = article_link(article, "news-title"),
        summary = escape(article.summary_text().unwrap_or(NO_SUMMARY)),
        date = format_short(article.publication_date.as_ref()),
        source = escape(article.source.as_deref().unwrap_or(UNKNOWN_SOURCE)),
    )
}

fn render_pagination(listing: &Listing) -> String {
    let items = listing.pagination.items();
    if items.is_empty() {
        return String::new();
    }
    let mut html = String::from(r#"<nav class="pagination">"#);
    for item in items {
        let control = match item {
            PageItem::Previous(n) => format!(
                r#"<a class="page-btn page-prev" href="{}" data-page-number="{}">← Назад</a>"#,
                escape(&listing.page_href(n)),
                n
            ),
            PageItem::Next(n) => format!(
                r#"<a class="page-btn page-next" href="{}" data-page-number="{}">Вперед →</a>"#,
                escape(&listing.page_href(n)),
                n
            ),
            PageItem::Page(n) => format!(
                r#"<a class="page-btn" href="{}" data-page-number="{}">{}</a>"#,
                escape(&listing.page_href(n)),
                n,
                n
            ),
            PageItem::Current(n) => format!(r#"<span class="current-page">{}</span>"#, n),
            PageItem::Ellipsis => r#"<span class="page-dots">...</span>"#.to_string(),
        };
        html.push_str(&control);
    }
    html.push_str("</nav>");
    html
}

/// Heading of a filtered main page, e.g. "Новости: Спорт".
pub fn filter_heading(filter: &NewsFilter) -> String {
    let labels: Vec<&str> = [
        filter.category.as_deref().map(category_label),
        filter.source.as_deref().map(source_label),
    ]
    .into_iter()
    .flatten()
    .collect();
    if labels.is_empty() {
        "Все новости".to_string()
    } else {
        format!("Новости: {}", labels.join(", "))
    }
}

fn filter_options(selected: Option<&str>, known: &[(&str, &str)]) -> String {
    let mut html = String::new();
    let mut matched = selected.is_none();
    for (key, label) in known {
        let is_selected = selected == Some(*key);
        matched |= is_selected;
        html.push_str(&format!(
            r#"<option value="{}"{}>{}</option>"#,
            key,
            if is_selected { " selected" } else { "" },
            label
        ));
    }
    if let (Some(key), false) = (selected, matched) {
        let key = escape(key);
        html.push_str(&format!(r#"<option value="{key}" selected>{key}</option>"#));
    }
    html
}

fn render_filters(filter: &NewsFilter) -> String {
    let categories: Vec<(&str, &str)> = Category::ALL.iter().map(|c| (c.key(), c.label())).collect();
    let sources: Vec<(&str, &str)> = SourceKind::ALL.iter().map(|s| (s.key(), s.label())).collect();
    let reset = if filter.is_empty() {
        ""
    } else {
        r#"<a class="filter-reset" href="?page=main" data-page="main">Сбросить</a>"#
    };
    format!(
        concat!(
            r#"<form class="news-filters" action="/" method="get"><input type="hidden" name="page" value="main">"#,
            r#"<select class="news-filter" name="category"><option value="">Все категории</option>{categories}</select>"#,
            r#"<select class="news-filter" name="source"><option value="">Все источники</option>{sources}</select>"#,
            r#"<button class="filter-btn" type="submit">Применить</button>{reset}</form>"#
        ),
        categories = filter_options(filter.category.as_deref(), &categories),
        sources = filter_options(filter.source.as_deref(), &sources),
        reset = reset,
    )
}

fn render_main(listing: &Listing) -> String {
    let filter = listing.state.filter();
    let mut html = render_filters(filter);
    if filter.is_empty() {
        html.push_str(&render_listing(listing, LATEST_TITLE.to_string(), None));
    } else {
        let count = listing.total.unwrap_or(listing.items.len());
        html.push_str(&render_listing(listing, filter_heading(filter), Some(count)));
    }
    html
}

fn render_listing(listing: &Listing, heading: String, count: Option<usize>) -> String {
    let mut html = render_digest(&listing.digest);
    html.push_str(&format!(r#"<section class="latest-news"><h2>{}</h2>"#, escape(&heading)));
    if let Some(count) = count {
        html.push_str(&format!(r#"<div class="news-count">Найдено: {} новостей</div>"#, count));
    }
    html.push_str(r#"<div class="news-list">"#);
    if listing.items.is_empty() {
        html.push_str(r#"<p class="empty">Новостей пока нет</p>"#);
    }
    for article in &listing.items {
        html.push_str(&render_news_item(article));
    }
    html.push_str("</div>");
    html.push_str(&render_pagination(listing));
    html.push_str("</section>");
    html
}

fn render_article(article: &Article) -> String {
    let paragraphs = article.body().map(body::paragraphs).unwrap_or_default();
    let content = if paragraphs.is_empty() {
        format!(r#"<p class="placeholder">{}</p>"#, NO_TEXT)
    } else {
        paragraphs
            .iter()
            .map(|p| format!("<p>{}</p>", escape(p)))
            .collect::<String>()
    };
    let source = article
        .source
        .as_deref()
        .map(|s| format!(r#"<span class="article-source">Источник: {}</span>"#, escape(s)))
        .unwrap_or_default();
    let origin = article
        .url
        .as_deref()
        .and_then(safe_url)
        .map(|url| {
            format!(
                r#"<a class="article-origin" href="{}" target="_blank" rel="noopener">Читать в источнике</a>"#,
                escape(url)
            )
        })
        .unwrap_or_default();

    format!(
        concat!(
            r#"<article class="news-article" data-id="{id}">"#,
            r#"<div class="article-text"><h2 class="headline">{title}</h2>"#,
            r#"<div class="article-meta"><span class="article-date">{date}</span>{source}</div>"#,
            r#"<div class="article-content">{content}</div>{origin}</div>"#,
            r#"<div class="article-image"><img src="{image}" alt="Фотография новости"></div>"#,
            "</article>"
        ),
        id = escape(&article.id),
        title = escape(title_of(article)),
        date = format_long(article.publication_date.as_ref()),
        source = source,
        content = content,
        origin = origin,
        image = escape(image_src(article)),
    )
}

fn render_search(query: &str, results: &[Article]) -> String {
    let query = escape(query);
    let mut html = format!(
        r#"<div class="search-results"><h2 class="search-title">Результаты поиска: "{}"</h2><div class="results-count">Найдено статей: {}</div>"#,
        query,
        results.len()
    );
    if results.is_empty() {
        html.push_str(&format!(
            concat!(
                r#"<div class="no-results"><p>По запросу "{}" ничего не найдено.</p>"#,
                "<p>Попробуйте изменить формулировку запроса.</p>",
                r#"<a class="back-link" href="?page=main" data-action="back">Вернуться назад</a></div>"#
            ),
            query
        ));
    } else {
        html.push_str(r#"<div class="results-list">"#);
        for article in results {
            html.push_str(&format!(
                concat!(
                    r#"<div class="search-item">"#,
                    r#"<div class="search-item-header">{link}<span class="search-item-date">{date}</span></div>"#,
                    r#"<p class="search-item-desc">{summary}</p>"#,
                    r#"<div class="search-item-footer"><span class="search-item-source">{source}</span></div>"#,
                    "</div>"
                ),
                link = article_link(article, "search-item-title"),
                date = format_short(article.publication_date.as_ref()),
                summary = escape(article.summary_text().unwrap_or(NO_SUMMARY)),
                source = escape(article.source.as_deref().unwrap_or(UNKNOWN_SOURCE)),
            ));
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use scraper::{Html, Selector};

    fn select(fragment: &Fragment, selector: &str) -> Vec<String> {
        let document = Html::parse_fragment(fragment.as_str());
        let selector = Selector::parse(selector).unwrap();
        document
            .select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .collect()
    }

    fn articles(n: usize) -> Vec<Article> {
        (1..=n).map(|i| Article::new(i.to_string(), format!("Новость {}", i))).collect()
    }

    #[test]
    fn test_digest_takes_first_three_in_order() {
        for n in [0, 1, 2, 3, 7] {
            let listing = Listing::windowed(NavigationState::main(), articles(n), 5);
            let fragment = render(&PageView::Main(listing));
            let digest = select(&fragment, "section.digest li a");
            let expected: Vec<String> = (1..=n.min(3)).map(|i| format!("Новость {}", i)).collect();
            assert_eq!(digest, expected, "list of {}", n);
        }
    }

    #[test]
    fn test_server_page_digest_and_open_ended_pagination() {
        let page = ArticlePage::from(articles(5));
        let listing = Listing::server_page(NavigationState::main().with_offset(5), articles(10), page, 5);
        assert_eq!(listing.digest.len(), 3);
        assert_eq!(listing.pagination, Pagination::new(2, 3));

        let fragment = render(&PageView::Main(listing));
        assert_eq!(select(&fragment, ".latest-news h2"), ["Последние новости"]);
        assert_eq!(select(&fragment, ".news-item").len(), 5);
        assert_eq!(select(&fragment, ".pagination .current-page"), ["2"]);
        assert_eq!(select(&fragment, ".pagination .page-next"), ["Вперед →"]);
    }

    #[test]
    fn test_windowed_pages_and_links() {
        let state = NavigationState::category("tech").with_offset(30);
        let listing = Listing::windowed(state, articles(60), 5);
        assert_eq!(listing.pagination, Pagination::new(7, 12));
        assert_eq!(listing.items.first().map(|a| a.id.as_str()), Some("31"));

        let fragment = render(&PageView::Category(listing));
        let buttons = select(&fragment, ".pagination .page-btn:not(.page-prev):not(.page-next), .pagination .current-page, .pagination .page-dots");
        assert_eq!(buttons, ["1", "...", "5", "6", "7", "8", "9", "...", "12"]);

        let document = Html::parse_fragment(fragment.as_str());
        let last = Selector::parse(r#".pagination a[data-page-number="12"]"#).unwrap();
        let href = document.select(&last).next().unwrap().value().attr("href").unwrap();
        assert_eq!(href, "?page=category&type=tech&offset=55");
    }

    #[test]
    fn test_category_example_page() {
        let article = Article::new("1", "AI breakthrough").with_date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let listing = Listing::windowed(NavigationState::category("tech"), vec![article], 5);
        let fragment = render(&PageView::Category(listing));

        assert_eq!(select(&fragment, "section.digest a"), ["AI breakthrough"]);
        assert_eq!(select(&fragment, ".latest-news h2"), ["Новости: Технологии"]);
        assert_eq!(select(&fragment, ".news-date"), ["Дата публикации: 01.01.2024"]);
        assert!(select(&fragment, ".pagination").is_empty());
    }

    #[test]
    fn test_unknown_labels_render_verbatim() {
        let listing = Listing::windowed(NavigationState::source("telegram"), articles(1), 5);
        let fragment = render(&PageView::Source(listing));
        assert_eq!(select(&fragment, ".latest-news h2"), ["Источник: telegram"]);

        let listing = Listing::windowed(NavigationState::category("weather"), Vec::new(), 5);
        let fragment = render(&PageView::Category(listing));
        assert_eq!(select(&fragment, ".latest-news h2"), ["Новости: weather"]);
        assert_eq!(select(&fragment, ".news-list .empty"), ["Новостей пока нет"]);
    }

    #[test]
    fn test_missing_fields_use_placeholders() {
        let bare = Article::new("x", "Голая новость");
        let listing = Listing::windowed(NavigationState::main(), vec![bare.clone()], 5);
        let fragment = render(&PageView::Main(listing));
        assert_eq!(select(&fragment, ".news-summary"), ["Нет описания"]);
        assert_eq!(select(&fragment, ".news-date"), ["Дата публикации: Дата неизвестна"]);
        assert_eq!(select(&fragment, ".news-source"), ["Источник: неизвестен"]);
        assert!(fragment.as_str().contains(r#"src="/static/placeholder.jpg""#));

        let fragment = render(&PageView::Article(bare));
        assert_eq!(select(&fragment, ".article-content"), ["Содержание отсутствует"]);
        assert_eq!(select(&fragment, ".article-date"), ["Дата неизвестна"]);
        assert!(select(&fragment, ".article-source").is_empty());
        for literal in ["undefined", "null", "None"] {
            assert!(!fragment.as_str().contains(literal));
        }
    }

    #[test]
    fn test_article_body_fallbacks() {
        let with_summary = Article::new("1", "t").with_summary("Кратко");
        let fragment = render(&PageView::Article(with_summary));
        assert_eq!(select(&fragment, ".article-content p"), ["Кратко"]);

        let with_html = Article::new("2", "t")
            .with_text("<p>Первый</p><p>Второй</p>")
            .with_source("news")
            .with_date(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let fragment = render(&PageView::Article(with_html));
        assert_eq!(select(&fragment, ".article-content p"), ["Первый", "Второй"]);
        assert_eq!(select(&fragment, ".article-date"), ["понедельник, 1 января 2024 г."]);
        assert_eq!(select(&fragment, ".article-source"), ["Источник: news"]);
    }

    #[test]
    fn test_article_render_is_pure() {
        let article = Article::new("1", "Title <script>").with_text("Body").with_image("/img/1.jpg");
        let view = PageView::Article(article);
        assert_eq!(render(&view), render(&view));
        assert!(render(&view).as_str().contains("Title &lt;script&gt;"));
    }

    #[test]
    fn test_search_results_and_empty_state() {
        let results = vec![Article::new("1", "Матч").with_source("news").with_summary("Итоги")];
        let fragment = render(&PageView::Search { query: "матч".into(), results });
        assert_eq!(select(&fragment, ".search-title"), [r#"Результаты поиска: "матч""#]);
        assert_eq!(select(&fragment, ".results-count"), ["Найдено статей: 1"]);
        assert_eq!(select(&fragment, ".search-item-title"), ["Матч"]);
        assert_eq!(select(&fragment, ".search-item-desc"), ["Итоги"]);
        assert_eq!(select(&fragment, ".search-item-date"), ["Дата неизвестна"]);
        assert!(select(&fragment, ".no-results").is_empty());

        let fragment = render(&PageView::Search { query: "<b>".into(), results: Vec::new() });
        assert_eq!(select(&fragment, ".results-count"), ["Найдено статей: 0"]);
        assert_eq!(select(&fragment, ".no-results p").first().map(String::as_str), Some(r#"По запросу "<b>" ничего не найдено."#));
        assert!(select(&fragment, ".results-list").is_empty());
    }

    #[test]
    fn test_article_links_carry_navigation_annotations() {
        let listing = Listing::windowed(NavigationState::main(), vec![Article::new("a&b", "t")], 5);
        let fragment = render(&PageView::Main(listing));
        let document = Html::parse_fragment(fragment.as_str());
        let selector = Selector::parse("a.news-title").unwrap();
        let link = document.select(&selector).next().unwrap();
        assert_eq!(link.value().attr("data-page"), Some("article"));
        assert_eq!(link.value().attr("data-type"), Some("a&b"));
        assert_eq!(link.value().attr("href"), Some("?page=article&type=a%26b"));
    }

    #[test]
    fn test_unsafe_article_urls_are_dropped() {
        let mut article = Article::new("1", "t").with_image("javascript:alert(2)");
        article.url = Some("javascript:alert(document.cookie)".to_string());
        let fragment = render(&PageView::Article(article));
        assert!(!fragment.as_str().contains("javascript:"));
        assert!(select(&fragment, ".article-origin").is_empty());
        assert!(fragment.as_str().contains(r#"src="/static/placeholder.jpg""#));

        let mut article = Article::new("2", "t").with_image("https://cdn.news.example/a.jpg");
        article.url = Some("https://news.example/a".to_string());
        let fragment = render(&PageView::Article(article.clone()));
        assert_eq!(select(&fragment, ".article-origin"), ["Читать в источнике"]);
        assert!(fragment.as_str().contains(r#"src="https://cdn.news.example/a.jpg""#));

        article.image = Some("data:image/svg+xml,<svg onload=alert(1)>".to_string());
        let listing = Listing::windowed(NavigationState::main(), vec![article], 5);
        let fragment = render(&PageView::Main(listing));
        assert!(!fragment.as_str().contains("data:image"));
    }

    #[test]
    fn test_filtered_main_page_heading_and_count() {
        let state = NavigationState::main().with_filter(NewsFilter::category("sports"));
        let page = ArticlePage {
            articles: articles(5),
            total: Some(12),
        };
        let listing = Listing::server_page(state, articles(3), page, 5);
        let fragment = render(&PageView::Main(listing));
        assert_eq!(select(&fragment, ".latest-news h2"), ["Новости: Спорт"]);
        assert_eq!(select(&fragment, ".news-count"), ["Найдено: 12 новостей"]);
        assert_eq!(select(&fragment, ".filter-reset"), ["Сбросить"]);
        assert_eq!(select(&fragment, r#"select[name="category"] option[selected]"#), ["Спорт"]);

        let document = Html::parse_fragment(fragment.as_str());
        let next = Selector::parse(".pagination .page-next").unwrap();
        let href = document.select(&next).next().unwrap().value().attr("href").unwrap();
        assert_eq!(href, "?page=main&category=sports&offset=5");

        let plain = render(&PageView::Main(Listing::windowed(NavigationState::main(), articles(2), 5)));
        assert_eq!(select(&plain, ".latest-news h2"), ["Последние новости"]);
        assert!(select(&plain, ".news-count").is_empty());
        assert!(select(&plain, ".filter-reset").is_empty());
        assert_eq!(select(&plain, "form.news-filters select").len(), 2);
    }

    #[test]
    fn test_filter_heading() {
        assert_eq!(filter_heading(&NewsFilter::default()), "Все новости");
        assert_eq!(filter_heading(&NewsFilter::source("social")), "Новости: Социальные сети");
        assert_eq!(
            filter_heading(&NewsFilter::new(Some("tech"), Some("news"))),
            "Новости: Технологии, Новостные сайты"
        );
    }
}
