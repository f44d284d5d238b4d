use crate::config::StorefrontConfig;
use crate::render;
use crate::source::EquipmentSource;
use crate::views::{CatalogView, DetailFailure, DetailState, DetailView};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Shared by every request; each request still mounts its own view.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn EquipmentSource>,
    pub storefront: Arc<StorefrontConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogQuery {
    all: Option<String>,
}

impl CatalogQuery {
    /// `true` and `1` expand the grid; any other value is ignored.
    fn show_all(&self) -> bool {
        matches!(self.all.as_deref(), Some("true") | Some("1"))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(catalog_page))
        .route("/equipment/:id", get(detail_page))
        .with_state(state)
}

/// Each request is one mount. If the client goes away the handler future is
/// dropped together with the view, which aborts the backend request.
async fn catalog_page(State(state): State<AppState>, Query(query): Query<CatalogQuery>) -> Html<String> {
    let mut view = CatalogView::mount(state.source.clone(), state.storefront.clone());
    view.set_show_all(query.show_all());
    view.settle().await;
    let html = render::catalog::render(&view);
    view.unmount();
    Html(html)
}

async fn detail_page(State(state): State<AppState>, Path(id): Path<String>) -> (StatusCode, Html<String>) {
    let mut view = DetailView::mount(state.source.clone(), state.storefront.clone(), id);
    view.settle().await;
    let status = match view.state() {
        DetailState::Failed(DetailFailure::NotFound) => StatusCode::NOT_FOUND,
        DetailState::Failed(DetailFailure::LoadFailed) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    info!("Equipment page '{}' rendered with {}", view.route_id(), status);
    let html = render::detail::render(&view);
    view.unmount();
    (status, Html(html))
}

pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Storefront listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::testing::{numbered_records, FailingSource, StaticSource};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::json;
    use tower::ServiceExt;

    fn state(source: Arc<dyn EquipmentSource>) -> AppState {
        AppState {
            source,
            storefront: Arc::new(StorefrontConfig::default()),
        }
    }

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn count_cards(html: &str) -> usize {
        html.matches("<a class=\"equipment-card\"").count()
    }

    #[tokio::test]
    async fn catalog_respects_show_all_query() {
        let app = router(state(StaticSource::new(numbered_records(8))));
        let (status, html) = get_page(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(count_cards(&html), 6);
        assert!(!html.contains("is-skeleton"));

        let (_, html) = get_page(app, "/?all=true").await;
        assert_eq!(count_cards(&html), 8);
    }

    #[tokio::test]
    async fn catalog_accepts_any_all_value() {
        let app = router(state(StaticSource::new(numbered_records(8))));
        for (uri, expected) in [("/?all=1", 8), ("/?all=", 6), ("/?all=yes", 6), ("/?all=false", 6)] {
            let (status, html) = get_page(app.clone(), uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(count_cards(&html), expected, "{uri}");
        }
    }

    #[tokio::test]
    async fn catalog_falls_back_on_backend_failure() {
        let app = router(state(Arc::new(FailingSource)));
        let (status, html) = get_page(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(count_cards(&html), 6);
    }

    #[tokio::test]
    async fn detail_statuses_follow_outcome() {
        let app = router(state(StaticSource::new(json!([{ "id": 5, "title": "Five" }]))));
        let (status, html) = get_page(app.clone(), "/equipment/5").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Five"));

        let (status, html) = get_page(app, "/equipment/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(html.contains("Товар не найден"));

        let app = router(state(Arc::new(FailingSource)));
        let (status, html) = get_page(app, "/equipment/5").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(html.contains("Не удалось загрузить товар"));
    }

    #[tokio::test]
    async fn detail_id_is_percent_decoded() {
        let app = router(state(StaticSource::new(json!([{ "id": "a b", "title": "Spaced" }]))));
        let (status, html) = get_page(app, "/equipment/a%20b").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Spaced"));
    }
}
