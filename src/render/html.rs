// Escaping helpers and the page shell
use std::borrow::Cow;
use std::fmt::Write;

/// Escapes element content.
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

/// Escapes a value placed inside a double-quoted attribute.
pub fn attr(value: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value)
}

/// Percent-encodes one path segment (RFC 3986 unreserved bytes pass).
pub fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{:02X}", byte);
        }
    }
    out
}

pub fn detail_href(id: &str) -> String {
    format!("/equipment/{}", encode_segment(id))
}

pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n</head>\n<body>\n<div class=\"equipment-section\">\n<div class=\"container\">\n{}\n</div>\n</div>\n</body>\n</html>\n",
        escape(title),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
        assert_eq!(escape("Оборудование"), "Оборудование");
    }

    #[test]
    fn attribute_values_escape_quotes() {
        assert_eq!(attr("a\"b<c>&"), "a&quot;b&lt;c&gt;&amp;");
        assert_eq!(attr("https://h/a.jpg?x=1"), "https://h/a.jpg?x=1");
    }

    #[test]
    fn encodes_path_segments() {
        assert_eq!(detail_href("5"), "/equipment/5");
        assert_eq!(detail_href("a/b c"), "/equipment/a%2Fb%20c");
        assert_eq!(encode_segment("ж"), "%D0%B6");
    }

    #[test]
    fn page_escapes_title() {
        let html = page("<T>", "<p>body</p>");
        assert!(html.contains("<title>&lt;T&gt;</title>"));
        assert!(html.contains("<p>body</p>"));
    }
}
