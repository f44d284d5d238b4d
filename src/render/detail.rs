use crate::config::MarkupPolicy;
use crate::model::EquipmentDetail;
use crate::normalizer::strip_markup;
use crate::render::html::{attr, escape, page};
use crate::sanitizer::sanitize_html;
use crate::views::{DetailState, DetailView};
use std::fmt::Write;

pub fn render(view: &DetailView) -> String {
    match view.state() {
        DetailState::Loading => page("Загрузка…", "<div class=\"loading\">Загрузка…</div>"),
        DetailState::Failed(failure) => {
            let body = format!(
                "<div class=\"error-banner\">{}</div>\n<a class=\"view-all-button\" href=\"/\">Назад</a>",
                escape(failure.message())
            );
            page(failure.message(), &body)
        }
        DetailState::Found(detail) => page(&detail.title, &found_body(detail, view.config().markup_policy)),
    }
}

fn found_body(detail: &EquipmentDetail, policy: MarkupPolicy) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h2 class=\"section-title\">{}</h2>", escape(&detail.title));
    let _ = write!(
        body,
        "<div class=\"equipment-card\" style=\"overflow: hidden\">\
<div class=\"equipment-image\" style=\"aspect-ratio: 16 / 9\"><img src=\"{}\" alt=\"{}\"></div>\
<div class=\"equipment-content\">",
        attr(&detail.image),
        attr(&detail.title)
    );
    if !detail.summary.is_empty() {
        let _ = write!(body, "<p class=\"equipment-description\">{}</p>", escape(&detail.summary));
    }
    if !detail.full_description.is_empty() {
        let _ = write!(
            body,
            "<div class=\"equipment-full-description\">{}</div>",
            full_description(&detail.full_description, policy)
        );
    }
    body.push_str("</div></div>\n<a class=\"view-all-button\" href=\"/\">Назад к оборудованию</a>");
    body
}

/// The one place backend markup can reach the page.
fn full_description(markup: &str, policy: MarkupPolicy) -> String {
    match policy {
        MarkupPolicy::Sanitize => sanitize_html(markup),
        MarkupPolicy::Trusted => markup.to_string(),
        MarkupPolicy::PlainText => format!("<p>{}</p>", escape(&strip_markup(markup))),
    }
}
