use crate::model::EquipmentCard;
use crate::render::html::{attr, detail_href, escape, page};
use crate::views::{CatalogState, CatalogView};
use std::fmt::Write;

const SECTION_TITLE: &str = "ОБОРУДОВАНИЕ";

/// Renders whatever state the view is in. The server only calls this after
/// `settle`, so the skeleton grid is never sent to a browser.
pub fn render(view: &CatalogView) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h2 class=\"section-title\">{}</h2>", SECTION_TITLE);

    if let Some(error) = view.error_banner() {
        let _ = writeln!(body, "<div class=\"error-banner\">{}</div>", escape(error));
    }

    body.push_str("<div class=\"equipment-grid\">\n");
    match view.state() {
        CatalogState::Loading => {
            for _ in 0..view.config().skeleton_count {
                body.push_str(SKELETON_CARD);
            }
        }
        CatalogState::Loaded(_) | CatalogState::Fallback { .. } => {
            for card in view.visible_cards() {
                write_card(&mut body, card);
            }
        }
    }
    body.push_str("</div>\n");

    if view.can_expand() {
        let (href, label) = if view.show_all() {
            ("/", "СКРЫТЬ")
        } else {
            ("/?all=true", "СМОТРЕТЬ ВСЕ")
        };
        let _ = writeln!(body, "<a class=\"view-all-button\" href=\"{}\">{}</a>", href, label);
    }

    page(SECTION_TITLE, &body)
}

const SKELETON_CARD: &str = "<div class=\"equipment-card is-skeleton\">\
<div class=\"equipment-image skeleton-block\"></div>\
<div class=\"equipment-content\">\
<div class=\"skeleton-line skeleton-title\"></div>\
<div class=\"skeleton-line\"></div>\
<div class=\"skeleton-line short\"></div>\
<div class=\"skeleton-btn\"></div>\
</div></div>\n";

fn write_card(body: &mut String, card: &EquipmentCard) {
    let title = attr(&card.title);
    let _ = write!(
        body,
        "<a class=\"equipment-card\" href=\"{}\">\
<div class=\"equipment-image\"><img src=\"{}\" alt=\"{}\" title=\"{}\"></div>\
<div class=\"equipment-content\"><h3 class=\"equipment-title\">{}</h3>",
        attr(&detail_href(card.id.as_str())),
        attr(&card.image),
        title,
        title,
        escape(&card.title)
    );
    if !card.description.is_empty() {
        let _ = write!(body, "<p class=\"equipment-description\">{}</p>", escape(&card.description));
    }
    body.push_str("<button class=\"request-button\" type=\"button\">ОСТАВИТЬ ЗАЯВКУ</button></div></a>\n");
}
