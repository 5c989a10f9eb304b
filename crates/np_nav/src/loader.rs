use np_core::{validate_query, ArticleFilter, ArticlePage, Error, NavigationState, NewsApi, PageKind, Result};
use np_render::{Listing, Menu, PageView};
use tracing::{debug, warn};

/// Articles per listing page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 5;

fn required_key(state: &NavigationState) -> Result<&str> {
    state
        .key()
        .ok_or_else(|| Error::InvalidUrl(format!("{} has no type", state.to_query())))
}

/// Offset of the last page when `offset` points past the articles the
/// backend reported.
fn last_page_offset(page: &ArticlePage, offset: usize, page_size: usize) -> Option<usize> {
    let total = page.total?;
    let last = total.saturating_sub(1) / page_size * page_size;
    (page.articles.is_empty() && offset > last).then_some(last)
}

/// Header menu from the backend, or the known keys when it is down or has
/// nothing to list.
pub async fn load_menu(api: &dyn NewsApi) -> Menu {
    let fallback = Menu::default();
    match tokio::try_join!(api.fetch_categories(), api.fetch_sources()) {
        Ok((categories, sources)) => Menu {
            categories: if categories.is_empty() { fallback.categories } else { categories },
            sources: if sources.is_empty() { fallback.sources } else { sources },
        },
        Err(e) => {
            warn!("Could not fetch menu, using defaults: {}", e);
            fallback
        }
    }
}

/// Fetches everything the page for `state` shows.
///
/// The main page takes its digest from the top articles and its list from a
/// server-side page; category and source pages fetch their whole list and
/// window it locally.
pub async fn load_page(api: &dyn NewsApi, state: &NavigationState, page_size: usize) -> Result<PageView> {
    debug!("Loading {}", state);
    let page_size = page_size.max(1);
    match state.page() {
        PageKind::Main => {
            let filter = ArticleFilter::page(page_size, state.offset()).with_filter(state.filter());
            let (top, mut page) = tokio::try_join!(api.fetch_top_articles(), api.fetch_articles(&filter))?;
            let mut state = state.clone();
            if let Some(last) = last_page_offset(&page, state.offset(), page_size) {
                debug!("Offset {} is past the end, showing offset {}", state.offset(), last);
                page = api.fetch_articles(&ArticleFilter { offset: Some(last), ..filter }).await?;
                state = state.with_offset(last);
            }
            Ok(PageView::Main(Listing::server_page(state, top, page, page_size)))
        }
        PageKind::Category => {
            let all = api.fetch_category(required_key(state)?).await?;
            Ok(PageView::Category(Listing::windowed(state.clone(), all, page_size)))
        }
        PageKind::Source => {
            let all = api.fetch_source(required_key(state)?).await?;
            Ok(PageView::Source(Listing::windowed(state.clone(), all, page_size)))
        }
        PageKind::Article => {
            let article = api.fetch_article_by_id(required_key(state)?).await?;
            Ok(PageView::Article(article))
        }
        PageKind::Search => {
            let query = validate_query(state.query().unwrap_or_default())?;
            let results = api.search_articles(query).await?;
            Ok(PageView::Search {
                query: query.to_string(),
                results,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use np_client::MemoryNewsApi;
    use np_core::{Article, NewsFilter};
    use np_render::render;

    fn api() -> MemoryNewsApi {
        let articles = (1..=8)
            .map(|i| {
                Article::new(i.to_string(), format!("Новость {}", i))
                    .with_category(if i % 2 == 0 { "tech" } else { "culture" })
                    .with_source("news")
            })
            .collect();
        MemoryNewsApi::new(articles)
    }

    #[tokio::test]
    async fn test_main_page_uses_server_pages() {
        let view = load_page(&api(), &NavigationState::main().with_offset(5), 5).await.unwrap();
        match view {
            PageView::Main(listing) => {
                assert_eq!(listing.digest.len(), 3);
                assert_eq!(listing.items.len(), 3);
                assert_eq!((listing.pagination.current, listing.pagination.total_pages), (2, 2));
            }
            other => panic!("unexpected view {:?}", other.kind()),
        }
    }

    #[tokio::test]
    async fn test_main_offset_past_the_end_shows_last_page() {
        let view = load_page(&api(), &NavigationState::from_query("?page=main&offset=100"), 5).await.unwrap();
        let PageView::Main(listing) = view else {
            panic!("expected the main page");
        };
        assert_eq!((listing.pagination.current, listing.pagination.total_pages), (2, 2));
        assert_eq!(listing.items.len(), 3);
        assert_eq!(listing.state.offset(), 5);
        assert!(!render(&PageView::Main(listing)).as_str().contains("Новостей пока нет"));
    }

    #[tokio::test]
    async fn test_main_page_applies_filter() {
        let state = NavigationState::main().with_filter(NewsFilter::category("tech"));
        let PageView::Main(listing) = load_page(&api(), &state, 3).await.unwrap() else {
            panic!("expected the main page");
        };
        assert_eq!(listing.total, Some(4));
        assert_eq!(listing.items.len(), 3);
        assert!(listing.items.iter().all(|a| a.category.as_deref() == Some("tech")));
    }

    #[tokio::test]
    async fn test_menu_falls_back_when_empty() {
        let menu = load_menu(&MemoryNewsApi::default()).await;
        assert_eq!(menu, Menu::default());

        let menu = load_menu(&api()).await;
        assert_eq!(menu.categories, ["culture", "tech"]);
        assert_eq!(menu.sources, ["news"]);
    }

    #[tokio::test]
    async fn test_category_page_windows_locally() {
        let view = load_page(&api(), &NavigationState::category("tech"), 3).await.unwrap();
        match view {
            PageView::Category(listing) => {
                assert_eq!(listing.items.len(), 3);
                assert_eq!(listing.pagination.total_pages, 2);
                assert!(listing.items.iter().all(|a| a.category.as_deref() == Some("tech")));
            }
            other => panic!("unexpected view {:?}", other.kind()),
        }
    }

    #[tokio::test]
    async fn test_article_and_search_pages() {
        let view = load_page(&api(), &NavigationState::article("4"), 5).await.unwrap();
        assert_eq!(view, PageView::Article(api().fetch_article_by_id("4").await.unwrap()));

        let view = load_page(&api(), &NavigationState::search(" новость 7 "), 5).await.unwrap();
        match view {
            PageView::Search { query, results } => {
                assert_eq!(query, "новость 7");
                assert_eq!(results.len(), 1);
            }
            other => panic!("unexpected view {:?}", other.kind()),
        }

        let missing = load_page(&api(), &NavigationState::article("99"), 5).await;
        assert!(matches!(missing, Err(Error::NotFound(_))));
    }
}
