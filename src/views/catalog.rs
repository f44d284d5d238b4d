use crate::config::StorefrontConfig;
use crate::model::{EquipmentCard, FetchError, RawEquipmentRecord};
use crate::normalizer::normalize_cards;
use crate::source::EquipmentSource;
use crate::views::ViewTask;
use std::sync::Arc;
use tracing::{error, info};

pub const LOAD_ERROR_MESSAGE: &str = "Не удалось загрузить оборудование";

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogState {
    Loading,
    /// Server cards, or the fallback set when the server returned none.
    Loaded(Vec<EquipmentCard>),
    /// The fetch failed; `cards` is the fallback set.
    Fallback { cards: Vec<EquipmentCard>, error: String },
}

type Outcome = Result<Vec<RawEquipmentRecord>, FetchError>;

/// Listing page: one fetch per mount, a limited grid with a show-all toggle.
pub struct CatalogView {
    config: Arc<StorefrontConfig>,
    state: CatalogState,
    show_all: bool,
    task: Option<ViewTask<Outcome>>,
}

impl CatalogView {
    /// Starts the collection fetch right away.
    pub fn mount(source: Arc<dyn EquipmentSource>, config: Arc<StorefrontConfig>) -> Self {
        info!("Mounting catalog view");
        let task = ViewTask::spawn(async move { source.fetch_collection().await });
        Self {
            config,
            state: CatalogState::Loading,
            show_all: false,
            task: Some(task),
        }
    }

    /// Waits for the pending fetch, if any, and applies its result.
    pub async fn settle(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        let outcome = task.finish().await.unwrap_or(Err(FetchError::Interrupted));
        self.apply(outcome);
    }

    fn apply(&mut self, outcome: Outcome) {
        self.state = match outcome {
            Ok(records) => {
                let cards = normalize_cards(&records, &self.config);
                if cards.is_empty() {
                    info!("Catalog is empty, using {} fallback items", self.config.fallback.len());
                    CatalogState::Loaded(self.config.fallback_cards())
                } else {
                    info!("Catalog loaded: {} items", cards.len());
                    CatalogState::Loaded(cards)
                }
            }
            Err(e) => {
                error!("Error fetching equipments: {}", e);
                CatalogState::Fallback {
                    cards: self.config.fallback_cards(),
                    error: LOAD_ERROR_MESSAGE.to_string(),
                }
            }
        };
    }

    /// Drops the view. A fetch still in flight is aborted and its result
    /// never reaches any state.
    pub fn unmount(self) {
        if self.task.is_some() {
            info!("Catalog view unmounted before its fetch resolved");
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, CatalogState::Loading)
    }

    /// Every card of the resolved collection; empty while loading.
    pub fn cards(&self) -> &[EquipmentCard] {
        match &self.state {
            CatalogState::Loading => &[],
            CatalogState::Loaded(cards) | CatalogState::Fallback { cards, .. } => cards.as_slice(),
        }
    }

    pub fn visible_cards(&self) -> &[EquipmentCard] {
        let cards = self.cards();
        if self.show_all {
            cards
        } else {
            &cards[..cards.len().min(self.config.grid_limit)]
        }
    }

    pub fn can_expand(&self) -> bool {
        !self.is_loading() && self.cards().len() > self.config.grid_limit
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
    }

    /// Only shown when the fetch failed and there is nothing to display.
    /// A non-empty fallback set keeps it hidden.
    pub fn error_banner(&self) -> Option<&str> {
        match &self.state {
            CatalogState::Fallback { cards, error } if cards.is_empty() => Some(error.as_str()),
            _ => None,
        }
    }
}
