use np_core::{Category, SourceKind};

pub const NO_SUMMARY: &str = "Нет описания";
pub const NO_TEXT: &str = "Содержание отсутствует";
pub const DATE_UNKNOWN: &str = "Дата неизвестна";
pub const UNKNOWN_SOURCE: &str = "неизвестен";
pub const UNTITLED: &str = "Без заголовка";
pub const PLACEHOLDER_IMAGE: &str = "/static/placeholder.jpg";

pub const DIGEST_TITLE: &str = "Новости дня";
pub const LATEST_TITLE: &str = "Последние новости";

/// Display label for a category key; unknown keys are shown as they are.
pub fn category_label(key: &str) -> &str {
    match key.parse::<Category>() {
        Ok(category) => category.label(),
        Err(_) => key,
    }
}

/// Display label for a source key; unknown keys are shown as they are.
pub fn source_label(key: &str) -> &str {
    match key.parse::<SourceKind>() {
        Ok(kind) => kind.label(),
        Err(_) => key,
    }
}
