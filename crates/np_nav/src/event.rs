use np_core::{NewsFilter, PageKind};
use std::str::FromStr;

/// A user action that may start a page transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A menu or list link annotated with a page and an optional type.
    Link { page: PageKind, key: Option<String> },
    OpenArticle(String),
    Search(String),
    /// 1-based page number within the current listing.
    GoToPage(usize),
    /// Narrow the main page; an empty filter shows all news again.
    Filter(NewsFilter),
    Back,
    Forward,
    Reload,
}

impl Event {
    /// Builds the event for an element carrying `data-page`/`data-type`
    /// annotations.
    pub fn from_link(page: &str, key: Option<&str>) -> Result<Self, String> {
        let page = page.parse::<PageKind>()?;
        let key = key.map(str::trim).filter(|k| !k.is_empty()).map(str::to_string);
        Ok(match (page, key) {
            (PageKind::Article, Some(id)) => Event::OpenArticle(id),
            (PageKind::Search, Some(query)) => Event::Search(query),
            (page, key) => Event::Link { page, key },
        })
    }
}

/// Parses the commands typed into the terminal browser, e.g. `category tech`
/// or `search выборы`.
impl FromStr for Event {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (command, rest) = match s.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (s, ""),
        };
        let argument = |what: &str| {
            if rest.is_empty() {
                Err(format!("{} needs {}", command, what))
            } else {
                Ok(rest.to_string())
            }
        };

        match command {
            "main" | "home" => Ok(Event::Link {
                page: PageKind::Main,
                key: None,
            }),
            "category" => Ok(Event::Link {
                page: PageKind::Category,
                key: Some(argument("a category key")?),
            }),
            "source" => Ok(Event::Link {
                page: PageKind::Source,
                key: Some(argument("a source key")?),
            }),
            "article" | "open" => argument("an article id").map(Event::OpenArticle),
            "search" => argument("a query").map(Event::Search),
            "page" => {
                let number = argument("a page number")?;
                match number.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(Event::GoToPage(n)),
                    _ => Err(format!("invalid page number: {}", number)),
                }
            }
            "filter" => parse_filter(rest).map(Event::Filter),
            "back" => Ok(Event::Back),
            "forward" => Ok(Event::Forward),
            "reload" | "retry" => Ok(Event::Reload),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}

/// `category=<key> source=<key>` in any order; blank or `reset` clears.
fn parse_filter(args: &str) -> Result<NewsFilter, String> {
    let mut filter = NewsFilter::default();
    if args == "reset" {
        return Ok(filter);
    }
    for pair in args.split_whitespace() {
        match pair.split_once('=') {
            Some(("category", key)) if !key.is_empty() => filter.category = Some(key.to_string()),
            Some(("source", key)) if !key.is_empty() => filter.source = Some(key.to_string()),
            _ => return Err(format!("invalid filter: {}", pair)),
        }
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("category tech".parse(), Ok(Event::Link { page: PageKind::Category, key: Some("tech".into()) }));
        assert_eq!("  search  новые законы ".parse(), Ok(Event::Search("новые законы".into())));
        assert_eq!("open 65a1".parse(), Ok(Event::OpenArticle("65a1".into())));
        assert_eq!("page 3".parse(), Ok(Event::GoToPage(3)));
        assert_eq!("back".parse(), Ok(Event::Back));
        assert_eq!("main".parse(), Ok(Event::Link { page: PageKind::Main, key: None }));
    }

    #[test]
    fn test_parse_filter_commands() {
        assert_eq!(
            "filter source=social category=tech".parse(),
            Ok(Event::Filter(NewsFilter::new(Some("tech"), Some("social"))))
        );
        assert_eq!("filter category=sports".parse(), Ok(Event::Filter(NewsFilter::category("sports"))));
        assert_eq!("filter".parse(), Ok(Event::Filter(NewsFilter::default())));
        assert_eq!("filter reset".parse(), Ok(Event::Filter(NewsFilter::default())));
        assert!("filter tech".parse::<Event>().is_err());
        assert!("filter category=".parse::<Event>().is_err());
        assert!("filter weather=rain".parse::<Event>().is_err());
    }

    #[test]
    fn test_parse_rejects_bad_commands() {
        assert!("search".parse::<Event>().is_err());
        assert!("page 0".parse::<Event>().is_err());
        assert!("page two".parse::<Event>().is_err());
        assert!("weather".parse::<Event>().is_err());
        assert!("".parse::<Event>().is_err());
    }

    #[test]
    fn test_from_link_annotations() {
        assert_eq!(Event::from_link("article", Some("7")), Ok(Event::OpenArticle("7".into())));
        assert_eq!(
            Event::from_link("source", Some("social")),
            Ok(Event::Link { page: PageKind::Source, key: Some("social".into()) })
        );
        assert_eq!(Event::from_link("category", Some(" ")), Ok(Event::Link { page: PageKind::Category, key: None }));
        assert!(Event::from_link("weather", None).is_err());
    }
}
