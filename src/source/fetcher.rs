use crate::model::{FetchError, RawEquipmentRecord};
use crate::source::EquipmentSource;

use reqwest::Client;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

/// Reads the collection endpoint over HTTP.
pub struct HttpEquipmentSource {
    client: Client,
    url: String,
}

impl HttpEquipmentSource {
    pub fn new(url: impl Into<String>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("EquipmentStorefront/0.1")
            .build()
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        Ok(Self { client, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl EquipmentSource for HttpEquipmentSource {
    async fn fetch_collection(&self) -> Result<Vec<RawEquipmentRecord>, FetchError> {
        debug!("GET {}", self.url);
        let response = self.client.get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchError::HttpError(e.to_string()))?;

        // Error bodies are not inspected.
        if !response.status().is_success() {
            return Err(FetchError::InvalidStatus(response.status().as_u16()));
        }

        let body: Value = response.json()
            .await
            .map_err(|e| FetchError::MalformedBody(e.to_string()))?;

        RawEquipmentRecord::collection_from_value(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    async fn spawn_backend(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api/equipments/", addr)
    }

    #[tokio::test]
    async fn fetches_array_body() {
        let app = Router::new().route(
            "/api/equipments/",
            get(|| async { axum::Json(serde_json::json!([{ "id": 1, "title": "Pump" }, { "id": 2 }])) }),
        );
        let source = HttpEquipmentSource::new(spawn_backend(app).await).unwrap();
        let records = source.fetch_collection().await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let app = Router::new().route(
            "/api/equipments/",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "[]") }),
        );
        let source = HttpEquipmentSource::new(spawn_backend(app).await).unwrap();
        let err = source.fetch_collection().await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidStatus(500)));
    }

    #[tokio::test]
    async fn malformed_and_non_array_bodies_are_errors() {
        let app = Router::new()
            .route("/api/equipments/", get(|| async { "not json" }))
            .route("/object/", get(|| async { axum::Json(serde_json::json!({ "items": [] })) }));
        let url = spawn_backend(app).await;

        let source = HttpEquipmentSource::new(url.clone()).unwrap();
        assert!(matches!(source.fetch_collection().await, Err(FetchError::MalformedBody(_))));

        let source = HttpEquipmentSource::new(url.replace("/api/equipments/", "/object/")).unwrap();
        assert!(matches!(source.fetch_collection().await, Err(FetchError::NotAnArray("object"))));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let source = HttpEquipmentSource::new(format!("http://{}/api/equipments/", addr)).unwrap();
        assert!(matches!(source.fetch_collection().await, Err(FetchError::HttpError(_))));
    }
}
