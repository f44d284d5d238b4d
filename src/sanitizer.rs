// Allow-list HTML sanitizer for backend-supplied descriptions
use crate::render::html::{attr, escape};
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Formatting tags kept as-is (attributes dropped).
const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "hr", "b", "strong", "i", "em", "u", "s", "sub", "sup", "span", "div", "blockquote", "ul", "ol",
    "li", "h2", "h3", "h4", "h5", "h6", "table", "thead", "tbody", "tr", "th", "td", "a",
];

/// Dropped together with their content.
const DROPPED_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "noscript", "template", "svg", "math", "form", "textarea",
    "select", "head", "title",
];

const VOID_TAGS: &[&str] = &["br", "hr"];

/// Re-serializes an HTML fragment keeping only allow-listed tags.
///
/// Unknown tags are unwrapped (their children survive), text is escaped and
/// the only attribute that can survive is an `http(s)` or site-relative
/// `href` on links.
pub fn sanitize_html(fragment: &str) -> String {
    let document = Html::parse_fragment(fragment);
    let mut out = String::with_capacity(fragment.len());
    write_children(document.root_element(), &mut out);
    out
}

fn write_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    write_element(child, out);
                }
            }
            _ => {}
        }
    }
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    if DROPPED_TAGS.contains(&name) {
        return;
    }
    if !ALLOWED_TAGS.contains(&name) {
        write_children(element, out);
        return;
    }

    out.push('<');
    out.push_str(name);
    if name == "a" {
        if let Some(href) = element.value().attr("href").filter(|href| is_safe_href(href)) {
            out.push_str(" href=\"");
            out.push_str(&attr(href));
            out.push_str("\" rel=\"noopener noreferrer\"");
        }
    }
    out.push('>');

    if VOID_TAGS.contains(&name) {
        return;
    }
    write_children(element, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn is_safe_href(href: &str) -> bool {
    let href = href.trim();
    // Browsers read `\` as `/` and drop tabs and newlines, so `/\host` or
    // `/<tab>/host` would leave the site.
    if href.contains('\\') || href.chars().any(|c| c.is_ascii_control()) {
        return false;
    }
    href.starts_with("https://")
        || href.starts_with("http://")
        || (href.starts_with('/') && !href.starts_with("//"))
}
