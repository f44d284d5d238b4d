mod config;
mod model;
mod normalizer;
mod render;
mod sanitizer;
mod server;
mod source;
mod views;

use config::{load_config, AppConfig};
use model::ConfigError;
use server::AppState;
use source::HttpEquipmentSource;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::var("STOREFRONT_CONFIG").unwrap_or_else(|_| "config.json".into());
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Config {} not found, using built-in defaults", config_path);
            AppConfig::default()
        }
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };

    let source = match HttpEquipmentSource::new(config.collection_url()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to create HTTP client: {}", e);
            return;
        }
    };
    info!("Equipment collection endpoint: {}", source.url());

    let state = AppState {
        source: Arc::new(source),
        storefront: Arc::new(config.storefront.clone()),
    };

    if let Err(e) = server::serve(&config.bind_addr, state).await {
        error!("Server error: {}", e);
    }
}
