use crate::config::StorefrontConfig;
use crate::model::{EquipmentDetail, FetchError, RawEquipmentRecord};
use crate::normalizer::find_detail;
use crate::source::EquipmentSource;
use crate::views::ViewTask;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFailure {
    NotFound,
    LoadFailed,
}

impl DetailFailure {
    pub fn message(self) -> &'static str {
        match self {
            DetailFailure::NotFound => "Товар не найден",
            DetailFailure::LoadFailed => "Не удалось загрузить товар",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Found(EquipmentDetail),
    Failed(DetailFailure),
}

type Outcome = Result<Vec<RawEquipmentRecord>, FetchError>;

/// Single-item page keyed by the identifier from the URL.
///
/// There is no fallback data here: every failure ends in `Failed`. A new
/// identifier means a new mount; the old view is unmounted, which aborts its
/// fetch.
pub struct DetailView {
    config: Arc<StorefrontConfig>,
    route_id: String,
    state: DetailState,
    task: Option<ViewTask<Outcome>>,
}

impl DetailView {
    pub fn mount(source: Arc<dyn EquipmentSource>, config: Arc<StorefrontConfig>, route_id: impl Into<String>) -> Self {
        let route_id = route_id.into();
        info!("Loading equipment '{}'", route_id);
        let task = ViewTask::spawn(async move { source.fetch_collection().await });
        Self {
            config,
            route_id,
            state: DetailState::Loading,
            task: Some(task),
        }
    }

    pub async fn settle(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        let outcome = task.finish().await.unwrap_or(Err(FetchError::Interrupted));
        self.apply(outcome);
    }

    fn apply(&mut self, outcome: Outcome) {
        self.state = match outcome {
            Ok(records) => match find_detail(&records, &self.route_id, &self.config) {
                Some(detail) => DetailState::Found(detail),
                None => {
                    warn!("Equipment '{}' not found among {} records", self.route_id, records.len());
                    DetailState::Failed(DetailFailure::NotFound)
                }
            },
            Err(e) => {
                error!("Error fetching equipment '{}': {}", self.route_id, e);
                DetailState::Failed(DetailFailure::LoadFailed)
            }
        };
    }

    pub fn unmount(self) {
        if self.task.is_some() {
            info!("Detail view for '{}' unmounted before its fetch resolved", self.route_id);
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }
}
