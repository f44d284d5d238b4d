use crate::model::{FetchError, RawEquipmentRecord};

/// Backend that serves the whole equipment collection in one response.
#[async_trait::async_trait]
pub trait EquipmentSource: Send + Sync {
    async fn fetch_collection(&self) -> Result<Vec<RawEquipmentRecord>, FetchError>;
}
