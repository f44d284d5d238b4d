// Raw backend records → display records
use crate::config::StorefrontConfig;
use crate::model::{EquipmentCard, EquipmentDetail, EquipmentId, RawEquipmentRecord, RawField};
use serde_json::Value;

const TITLE_KEYS: &[&str] = &["title", "name", "label"];
const SUMMARY_KEYS: &[&str] = &["description", "short_description"];
const FULL_DESCRIPTION_KEYS: &[&str] = &["full_description", "description_full", "description"];
const IMAGE_KEYS: &[&str] = &["image_card", "image", "img", "cover"];

/// Turns whatever the backend put in an image field into an absolute URL.
///
/// Never fails and never returns an empty string: unusable input resolves to
/// `placeholder`. `origin` must not end with a slash.
pub fn normalize_image_url(raw: RawField<'_>, placeholder: &str, origin: &str) -> String {
    let Some(url) = raw.text() else {
        return placeholder.to_string();
    };

    if url.starts_with("http://") || url.starts_with("https://") {
        url
    } else if url.starts_with("//") {
        format!("https:{}", url)
    } else if url.starts_with('/') {
        format!("{}{}", origin, url)
    } else if url.starts_with("storage/") {
        format!("{}/{}", origin, url)
    } else {
        format!("{}/{}", origin, strip_relative_prefix(&url))
    }
}

/// Drops leading `./`, `../` and similar dot runs.
fn strip_relative_prefix(path: &str) -> &str {
    let mut rest = path;
    while rest.starts_with('.') {
        rest = rest.trim_start_matches('.');
        rest = rest.strip_prefix('/').unwrap_or(rest);
    }
    rest
}

/// Removes every `<...>` run and trims the result.
///
/// This is a cosmetic pass for teaser text, not a sanitizer: an unterminated
/// `<` is left in place and the output must still be escaped when rendered.
pub fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// First key whose value is truthy, or `Absent`.
fn first_present<'a>(record: &'a RawEquipmentRecord, keys: &[&str]) -> RawField<'a> {
    keys.iter()
        .map(|key| record.field(key))
        .find(|field| field.is_truthy())
        .unwrap_or(RawField::Absent)
}

fn first_text(record: &RawEquipmentRecord, keys: &[&str]) -> Option<String> {
    first_present(record, keys).text()
}

fn image_field(record: &RawEquipmentRecord) -> RawField<'_> {
    let direct = first_present(record, IMAGE_KEYS);
    if direct.is_truthy() {
        return direct;
    }
    match record.field("images").value() {
        Some(Value::Array(images)) => match images.first() {
            Some(Value::Null) | None => RawField::Absent,
            Some(first) => RawField::Present(first),
        },
        _ => RawField::Absent,
    }
}

fn title(record: &RawEquipmentRecord, config: &StorefrontConfig) -> String {
    first_text(record, TITLE_KEYS).unwrap_or_else(|| config.title_placeholder.clone())
}

/// Maps a listing record. `fallback_index` becomes the id when the record has
/// none.
pub fn map_card(record: &RawEquipmentRecord, fallback_index: usize, config: &StorefrontConfig) -> EquipmentCard {
    EquipmentCard {
        id: EquipmentId::from_raw(record.field("id")).unwrap_or_else(|| EquipmentId::from_index(fallback_index)),
        title: title(record, config),
        description: first_text(record, SUMMARY_KEYS)
            .map(|text| strip_markup(&text))
            .unwrap_or_default(),
        image: normalize_image_url(image_field(record), &config.card_placeholder, config.origin()),
    }
}

pub fn map_detail(record: &RawEquipmentRecord, config: &StorefrontConfig) -> EquipmentDetail {
    EquipmentDetail {
        id: EquipmentId::from_raw(record.field("id")),
        title: title(record, config),
        summary: first_text(record, SUMMARY_KEYS)
            .map(|text| strip_markup(&text))
            .unwrap_or_default(),
        full_description: first_text(record, FULL_DESCRIPTION_KEYS).unwrap_or_default(),
        image: normalize_image_url(image_field(record), &config.detail_placeholder, config.origin()),
    }
}

pub fn normalize_cards(records: &[RawEquipmentRecord], config: &StorefrontConfig) -> Vec<EquipmentCard> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| map_card(record, index, config))
        .collect()
}

/// Linear search over the mapped collection; first id match wins.
pub fn find_detail(records: &[RawEquipmentRecord], route_id: &str, config: &StorefrontConfig) -> Option<EquipmentDetail> {
    records
        .iter()
        .map(|record| map_detail(record, config))
        .find(|detail| detail.id.as_ref().is_some_and(|id| id.matches(route_id)))
}
