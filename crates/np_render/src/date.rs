use crate::labels::DATE_UNKNOWN;
use chrono::{DateTime, Datelike, FixedOffset, Utc, Weekday};

const MONTHS_GENITIVE: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня",
    "июля", "августа", "сентября", "октября", "ноября", "декабря",
];

const MONTHS_NOMINATIVE: [&str; 12] = [
    "январь", "февраль", "март", "апрель", "май", "июнь",
    "июль", "август", "сентябрь", "октябрь", "ноябрь", "декабрь",
];

/// Moscow time, which the portal's masthead uses.
const MSK_OFFSET_SECS: i32 = 3 * 3600;

fn weekday_long(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "понедельник",
        Weekday::Tue => "вторник",
        Weekday::Wed => "среда",
        Weekday::Thu => "четверг",
        Weekday::Fri => "пятница",
        Weekday::Sat => "суббота",
        Weekday::Sun => "воскресенье",
    }
}

fn weekday_short(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Пн",
        Weekday::Tue => "Вт",
        Weekday::Wed => "Ср",
        Weekday::Thu => "Чт",
        Weekday::Fri => "Пт",
        Weekday::Sat => "Сб",
        Weekday::Sun => "Вс",
    }
}

/// `01.01.2024`, as used in lists and search results.
pub fn format_short(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format("%d.%m.%Y").to_string(),
        None => DATE_UNKNOWN.to_string(),
    }
}

/// `понедельник, 1 января 2024 г.`, as used on the article page.
pub fn format_long(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(date) => format!(
            "{}, {} {} {} г.",
            weekday_long(date.weekday()),
            date.day(),
            MONTHS_GENITIVE[date.month0() as usize],
            date.year()
        ),
        None => DATE_UNKNOWN.to_string(),
    }
}

/// Date shown in the masthead, split into its display blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masthead {
    pub weekday: &'static str,
    pub day: u32,
    pub month: &'static str,
    pub year: i32,
}

impl Masthead {
    pub fn for_instant(now: DateTime<Utc>) -> Self {
        let local = match FixedOffset::east_opt(MSK_OFFSET_SECS) {
            Some(offset) => now.with_timezone(&offset).date_naive(),
            None => now.date_naive(),
        };
        Self {
            weekday: weekday_short(local.weekday()),
            day: local.day(),
            month: MONTHS_NOMINATIVE[local.month0() as usize],
            year: local.year(),
        }
    }

    pub fn today() -> Self {
        Self::for_instant(Utc::now())
    }
}
