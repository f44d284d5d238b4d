use crate::model::{ConfigError, EquipmentCard, EquipmentId};
use serde::Deserialize;
use std::fs;

/// Entry of the built-in catalog shown when the backend has nothing to offer.
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackEquipment {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// How the HTML-bearing full description reaches the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupPolicy {
    /// Allow-listed tags only.
    #[default]
    Sanitize,
    /// Verbatim. Only for backends whose content is already sanitized.
    Trusted,
    /// Tags stripped, text escaped.
    PlainText,
}

/// Everything the views need besides the data source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub site_origin: String,
    pub collection_path: String,
    pub card_placeholder: String,
    pub detail_placeholder: String,
    pub title_placeholder: String,
    pub grid_limit: usize,
    pub skeleton_count: usize,
    pub markup_policy: MarkupPolicy,
    pub fallback: Vec<FallbackEquipment>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            site_origin: "https://recensa.ru".into(),
            collection_path: "/api/equipments/".into(),
            card_placeholder: "https://via.placeholder.com/640x400/efefef/aaaaaa?text=Equipment".into(),
            detail_placeholder: "https://via.placeholder.com/1200x700/efefef/aaaaaa?text=Equipment".into(),
            title_placeholder: "Оборудование".into(),
            grid_limit: 6,
            skeleton_count: 6,
            markup_policy: MarkupPolicy::default(),
            fallback: default_fallback(),
        }
    }
}

impl StorefrontConfig {
    /// Origin without a trailing slash, ready for path concatenation.
    pub fn origin(&self) -> &str {
        self.site_origin.trim_end_matches('/')
    }

    pub fn fallback_cards(&self) -> Vec<EquipmentCard> {
        self.fallback
            .iter()
            .map(|entry| EquipmentCard {
                id: EquipmentId::new(entry.id.clone()),
                title: entry.title.clone(),
                description: entry.description.clone(),
                image: self.card_placeholder.clone(),
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("site_origin", &self.site_origin),
            ("card_placeholder", &self.card_placeholder),
            ("detail_placeholder", &self.detail_placeholder),
        ] {
            if !is_absolute(value) {
                return Err(ConfigError::NotAbsolute { field, value: value.clone() });
            }
        }
        if self.grid_limit == 0 {
            return Err(ConfigError::Zero("grid_limit"));
        }
        if self.title_placeholder.is_empty() {
            return Err(ConfigError::Empty("title_placeholder"));
        }
        for item in &self.fallback {
            if item.id.trim().is_empty() {
                return Err(ConfigError::Empty("fallback.id"));
            }
            if item.title.trim().is_empty() {
                return Err(ConfigError::Empty("fallback.title"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_base_url: String,
    pub storefront: StorefrontConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".into(),
            api_base_url: "http://127.0.0.1:8000".into(),
            storefront: StorefrontConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn collection_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.storefront.collection_path.trim_start_matches('/')
        )
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    if !is_absolute(&config.api_base_url) {
        return Err(ConfigError::NotAbsolute {
            field: "api_base_url",
            value: config.api_base_url,
        });
    }
    config.storefront.validate()?;
    Ok(config)
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn default_fallback() -> Vec<FallbackEquipment> {
    [
        ("1", "СЕРИЯ RPOOL", "Бассейновое от 1000 м3/ч до 32 000 м3/ч"),
        ("2", "СЕРИЯ RCDUCT", "Канальное от 100 м3/ч до 10 000 м³/ч"),
        ("3", "СМЕСИТЕЛЬНЫЕ УЗЛЫ", "Водяные узлы для систем вентиляции и кондиционирования"),
        ("4", "СЕРИЯ RCLEAN", "Медицинское гигиеническое исполнение"),
        ("5", "СЕРИЯ RCROOF", "Крышное оборудование для больших помещений"),
        ("6", "СЕРИЯ RCN", "Общепромышленное от 1000 м3/ч до 100000 м3/ч"),
    ]
    .into_iter()
    .map(|(id, title, description)| FallbackEquipment {
        id: id.into(),
        title: title.into(),
        description: description.into(),
    })
    .collect()
}
