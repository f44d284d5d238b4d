// In-memory sources for view and router tests
use crate::model::{FetchError, RawEquipmentRecord};
use crate::source::EquipmentSource;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Always answers with the same JSON body.
pub struct StaticSource {
    body: Value,
}

impl StaticSource {
    pub fn new(body: Value) -> Arc<Self> {
        Arc::new(Self { body })
    }
}

#[async_trait::async_trait]
impl EquipmentSource for StaticSource {
    async fn fetch_collection(&self) -> Result<Vec<RawEquipmentRecord>, FetchError> {
        RawEquipmentRecord::collection_from_value(self.body.clone())
    }
}

/// Always fails with a 500.
pub struct FailingSource;

#[async_trait::async_trait]
impl EquipmentSource for FailingSource {
    async fn fetch_collection(&self) -> Result<Vec<RawEquipmentRecord>, FetchError> {
        Err(FetchError::InvalidStatus(500))
    }
}

/// Holds every fetch until `release` is called and counts completions.
pub struct GatedSource {
    body: Value,
    gate: Notify,
    completed: AtomicUsize,
}

impl GatedSource {
    pub fn new(body: Value) -> Arc<Self> {
        Arc::new(Self {
            body,
            gate: Notify::new(),
            completed: AtomicUsize::new(0),
        })
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EquipmentSource for GatedSource {
    async fn fetch_collection(&self) -> Result<Vec<RawEquipmentRecord>, FetchError> {
        self.gate.notified().await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        RawEquipmentRecord::collection_from_value(self.body.clone())
    }
}

/// `count` records with ids `1..=count`.
pub fn numbered_records(count: usize) -> Value {
    Value::Array(
        (1..=count)
            .map(|i| serde_json::json!({ "id": i, "title": format!("Unit {}", i) }))
            .collect(),
    )
}
