use crate::html::{escape, Fragment};
use np_core::{Error, ErrorKind, NavigationState, PageKind};

/// Placeholder shown while a page is being fetched.
pub fn render_loading(state: &NavigationState) -> Fragment {
    let html = match state.page() {
        PageKind::Search => format!(
            r#"<div class="search-loading"><div class="spinner"></div><p>Ищем новости по запросу: "{}"</p></div>"#,
            escape(state.query().unwrap_or_default())
        ),
        PageKind::Article => r#"<div class="loading-spinner">Загрузка статьи...</div>"#.to_string(),
        _ => r#"<div class="loading-spinner">Загрузка новостей...</div>"#.to_string(),
    };
    Fragment::new(html)
}

fn error_title(page: PageKind, err: &Error) -> &'static str {
    if err.kind() == ErrorKind::InvalidQuery {
        return "Ошибка при поиске";
    }
    match page {
        PageKind::Main => "Ошибка при загрузке новостей",
        PageKind::Category => "Ошибка при загрузке категории",
        PageKind::Source => "Ошибка при загрузке источника",
        PageKind::Article => "Ошибка при загрузке статьи",
        PageKind::Search => "Ошибка при поиске",
    }
}

fn error_message(page: PageKind, err: &Error) -> String {
    match err.kind() {
        ErrorKind::InvalidQuery => "Введите поисковый запрос".to_string(),
        ErrorKind::NotFound if page == PageKind::Article => "Статья не найдена".to_string(),
        ErrorKind::NotFound => "Страница не найдена".to_string(),
        _ => err.to_string(),
    }
}

fn kind_name(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Network => "network",
        ErrorKind::NotFound => "not-found",
        ErrorKind::Parse => "parse",
        ErrorKind::InvalidQuery => "invalid-query",
        ErrorKind::Other => "other",
    }
}

/// In-place error shown when loading `state` failed. Retryable failures
/// offer to load the same URL again, the rest offer to go back.
pub fn render_error(state: &NavigationState, err: &Error) -> Fragment {
    let action = if err.is_retryable() {
        format!(
            r#"<a class="retry-link" href="{}" data-action="retry">Попробовать снова</a>"#,
            escape(&state.to_query())
        )
    } else {
        r#"<a class="back-link" href="?page=main" data-action="back">Вернуться назад</a>"#.to_string()
    };
    Fragment::new(format!(
        r#"<div class="error-message" data-error="{}"><h2>{}</h2><p>{}</p>{}</div>"#,
        kind_name(err.kind()),
        error_title(state.page(), err),
        escape(&error_message(state.page(), err)),
        action
    ))
}
