use crate::container::ContentContainer;
use crate::event::Event;
use crate::history::SessionHistory;
use crate::loader::{load_page, DEFAULT_PAGE_SIZE};
use np_core::{validate_query, Error, NavigationState, NewsApi, NewsFilter, PageKind, Result};
use np_render::{render, render_error, render_loading, Fragment, PageView};
use np_storage::{SearchSession, SearchSessionStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// How a transition ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The page was rendered into the container.
    Rendered,
    /// The page could not be loaded and an error was shown instead.
    Failed,
    /// A later transition started before this one finished; its response
    /// was dropped.
    Superseded,
    /// Nothing to do, e.g. `back` on the first history entry.
    Ignored,
}

/// Where a transition goes, resolved against the shared state under the
/// same lock that starts the transition.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Push(NavigationState),
    Replace(NavigationState),
    Back,
    Forward,
    Reload,
    /// 1-based page of the current listing.
    Page(usize),
}

/// Whether a search page may be served from the stored session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchSource {
    Session,
    Fetch,
}

struct Loaded {
    view: PageView,
    fresh_search: Option<SearchSession>,
}

#[derive(Debug, Default)]
struct Shared {
    current: NavigationState,
    history: SessionHistory,
    generation: u64,
}

/// Drives page transitions: updates history, shows a loading indicator,
/// fetches and renders, and only lets the most recent transition write to
/// the container.
pub struct NavigationController {
    api: Arc<dyn NewsApi>,
    sessions: Arc<dyn SearchSessionStore>,
    container: Arc<dyn ContentContainer>,
    page_size: usize,
    shared: RwLock<Shared>,
}

impl NavigationController {
    pub fn new(
        api: Arc<dyn NewsApi>,
        sessions: Arc<dyn SearchSessionStore>,
        container: Arc<dyn ContentContainer>,
    ) -> Self {
        Self {
            api,
            sessions,
            container,
            page_size: DEFAULT_PAGE_SIZE,
            shared: RwLock::new(Shared::default()),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub async fn current_state(&self) -> NavigationState {
        self.shared.read().await.current.clone()
    }

    pub async fn current_url(&self) -> String {
        self.current_state().await.to_query()
    }

    pub async fn history(&self) -> SessionHistory {
        self.shared.read().await.history.clone()
    }

    /// Renders the page described by the initial location, replacing the
    /// first history entry.
    pub async fn start(&self, location: &str) -> NavigationOutcome {
        let state = NavigationState::from_query(location);
        info!("Starting at {}", state);
        self.transition(Step::Replace(state), SearchSource::Session).await
    }

    /// Follows a link annotated with a page and optional type.
    pub async fn navigate(&self, page: PageKind, key: Option<&str>) -> NavigationOutcome {
        if page == PageKind::Search {
            warn!("Search links need a query, ignoring");
            return NavigationOutcome::Ignored;
        }
        match NavigationState::for_page(page, key, None) {
            Some(state) => self.transition(Step::Push(state), SearchSource::Session).await,
            None => {
                warn!("Link to {} has no type, ignoring", page);
                NavigationOutcome::Ignored
            }
        }
    }

    pub async fn open_article(&self, id: &str) -> NavigationOutcome {
        self.navigate(PageKind::Article, Some(id)).await
    }

    /// Runs a new search. A blank query shows an error and leaves the
    /// navigation state untouched.
    pub async fn submit_search(&self, query: &str) -> NavigationOutcome {
        match validate_query(query) {
            Ok(query) => {
                self.transition(Step::Push(NavigationState::search(query)), SearchSource::Fetch)
                    .await
            }
            Err(err) => self.show_error(err).await,
        }
    }

    /// Moves the current listing to the 1-based page `number`.
    pub async fn go_to_page(&self, number: usize) -> NavigationOutcome {
        self.transition(Step::Page(number), SearchSource::Session).await
    }

    /// Shows the main page narrowed to `filter`, from its first page.
    pub async fn apply_filter(&self, filter: NewsFilter) -> NavigationOutcome {
        let target = NavigationState::main().with_filter(filter);
        self.transition(Step::Push(target), SearchSource::Session).await
    }

    pub async fn reset_filter(&self) -> NavigationOutcome {
        self.apply_filter(NewsFilter::default()).await
    }

    pub async fn back(&self) -> NavigationOutcome {
        self.transition(Step::Back, SearchSource::Session).await
    }

    pub async fn forward(&self) -> NavigationOutcome {
        self.transition(Step::Forward, SearchSource::Session).await
    }

    /// Loads the current page again, bypassing the stored search session.
    pub async fn reload(&self) -> NavigationOutcome {
        self.transition(Step::Reload, SearchSource::Fetch).await
    }

    pub async fn dispatch(&self, event: Event) -> NavigationOutcome {
        debug!("Dispatching {:?}", event);
        match event {
            Event::Link { page, key } => self.navigate(page, key.as_deref()).await,
            Event::OpenArticle(id) => self.open_article(&id).await,
            Event::Search(query) => self.submit_search(&query).await,
            Event::GoToPage(number) => self.go_to_page(number).await,
            Event::Filter(filter) => self.apply_filter(filter).await,
            Event::Back => self.back().await,
            Event::Forward => self.forward().await,
            Event::Reload => self.reload().await,
        }
    }

    /// Target of `step`, moving the history cursor on the way. `None` when
    /// there is nowhere to go.
    fn resolve(&self, shared: &mut Shared, step: Step) -> Option<NavigationState> {
        match step {
            Step::Push(target) => {
                shared.history.push(target.clone());
                Some(target)
            }
            Step::Replace(target) => {
                shared.history.replace(target.clone());
                Some(target)
            }
            Step::Back => shared.history.back().cloned(),
            Step::Forward => shared.history.forward().cloned(),
            Step::Reload => Some(shared.current.clone()),
            Step::Page(number) => {
                if !shared.current.page().is_listing() {
                    return None;
                }
                let offset = number.checked_sub(1)?.checked_mul(self.page_size)?;
                let target = shared.current.clone().with_offset(offset);
                shared.history.push(target.clone());
                Some(target)
            }
        }
    }

    async fn transition(&self, step: Step, search: SearchSource) -> NavigationOutcome {
        let (target, ticket) = {
            let mut shared = self.shared.write().await;
            let Some(target) = self.resolve(&mut shared, step) else {
                return NavigationOutcome::Ignored;
            };
            shared.generation += 1;
            shared.current = target.clone();
            debug!("Navigating to {} (generation {})", target, shared.generation);
            self.swap(render_loading(&target)).await;
            (target, shared.generation)
        };

        let loaded = self.load(&target, search).await;

        let shared = self.shared.write().await;
        if shared.generation != ticket {
            debug!("Discarding stale response for {} (generation {})", target, ticket);
            return NavigationOutcome::Superseded;
        }
        match loaded {
            Ok(Loaded { view, fresh_search }) => {
                if let Some(session) = fresh_search {
                    if let Err(e) = self.sessions.save(session).await {
                        warn!("Could not save search session: {}", e);
                    }
                }
                self.swap(render(&view)).await;
                NavigationOutcome::Rendered
            }
            Err(err) => {
                warn!("Failed to load {}: {}", target, err);
                self.swap(render_error(&target, &err)).await;
                NavigationOutcome::Failed
            }
        }
    }

    async fn load(&self, target: &NavigationState, search: SearchSource) -> Result<Loaded> {
        if target.page() == PageKind::Search && search == SearchSource::Session {
            if let Some(session) = self.stored_session(target).await {
                debug!("Showing stored results for {:?}", session.query);
                return Ok(Loaded {
                    view: PageView::Search {
                        query: session.query,
                        results: session.results,
                    },
                    fresh_search: None,
                });
            }
        }

        let view = load_page(self.api.as_ref(), target, self.page_size).await?;
        let fresh_search = match &view {
            PageView::Search { query, results } => Some(SearchSession::new(query.clone(), results.clone())),
            _ => None,
        };
        Ok(Loaded { view, fresh_search })
    }

    async fn stored_session(&self, target: &NavigationState) -> Option<SearchSession> {
        let query = validate_query(target.query()?).ok()?;
        match self.sessions.load().await {
            Ok(Some(session)) if session.query == query => Some(session),
            Ok(_) => None,
            Err(e) => {
                warn!("Could not read search session: {}", e);
                None
            }
        }
    }

    /// Shows an error for the current state without navigating. Any
    /// transition still in flight is superseded.
    async fn show_error(&self, err: Error) -> NavigationOutcome {
        let mut shared = self.shared.write().await;
        shared.generation += 1;
        warn!("{}", err);
        self.swap(render_error(&shared.current, &err)).await;
        NavigationOutcome::Failed
    }

    async fn swap(&self, fragment: Fragment) {
        if let Err(e) = self.container.swap(fragment).await {
            warn!("Could not update content: {}", e);
        }
    }
}
