use scraper::{Html, Selector};

/// Splits an article body into paragraphs of plain text.
///
/// Bodies stored as HTML keep the text of their `<p>` elements (or all of
/// their text when there are none); plain bodies split on blank lines.
pub fn paragraphs(body: &str) -> Vec<String> {
    if looks_like_html(body) {
        html_paragraphs(body)
    } else {
        split_plain(body)
    }
}

fn looks_like_html(body: &str) -> bool {
    body.contains('<') && body.contains('>')
}

fn html_paragraphs(body: &str) -> Vec<String> {
    let document = Html::parse_fragment(body);
    let from_paragraphs: Vec<String> = match Selector::parse("p") {
        Ok(selector) => document
            .select(&selector)
            .map(|p| collapse(&p.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .collect(),
        Err(e) => {
            tracing::warn!("Invalid paragraph selector: {:?}", e);
            Vec::new()
        }
    };
    if !from_paragraphs.is_empty() {
        return from_paragraphs;
    }
    split_plain(&document.root_element().text().collect::<Vec<_>>().join("\n"))
}

fn split_plain(body: &str) -> Vec<String> {
    body.replace("\r\n", "\n")
        .split("\n\n")
        .map(collapse)
        .filter(|s| !s.is_empty())
        .collect()
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let body = "Первый абзац\nпродолжение.\r\n\r\nВторой абзац.\n\n\n  ";
        assert_eq!(paragraphs(body), ["Первый абзац продолжение.", "Второй абзац."]);
    }

    #[test]
    fn test_html_paragraphs() {
        let body = "<div><p>One <b>bold</b> line</p><script>x</script><p> </p><p>Two</p></div>";
        assert_eq!(paragraphs(body), ["One bold line", "Two"]);
    }

    #[test]
    fn test_html_without_paragraphs() {
        assert_eq!(paragraphs("<div>Only <i>inline</i> text</div>"), ["Only inline text"]);
    }

    #[test]
    fn test_comparison_signs_are_not_html() {
        assert_eq!(paragraphs("2 < 3"), ["2 < 3"]);
    }
}
