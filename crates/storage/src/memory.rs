use std::collections::HashMap;

use async_trait::async_trait;
use shared::presets::{NewPreset, PresetKind, PresetRecord};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{assign, IdSequence, PresetError, PresetStore};

/// Process-local store. Used by tests and as the editor's fallback when the
/// on-disk database cannot be opened.
#[derive(Debug, Default)]
pub struct MemoryPresetStore {
    records: RwLock<HashMap<PresetKind, Vec<PresetRecord>>>,
    ids: IdSequence,
}

impl MemoryPresetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PresetStore for MemoryPresetStore {
    async fn list(&self, kind: PresetKind) -> Result<Vec<PresetRecord>, PresetError> {
        let records = self.records.read().await;
        Ok(records.get(&kind).cloned().unwrap_or_default())
    }

    async fn add(&self, preset: NewPreset) -> Result<PresetRecord, PresetError> {
        let record = assign(preset, &self.ids)?;
        let mut records = self.records.write().await;
        records.entry(record.kind()).or_default().push(record.clone());
        debug!(kind = %record.kind(), id = record.id(), "stored preset in memory");
        Ok(record)
    }

    async fn remove(&self, kind: PresetKind, id: &str) -> Result<bool, PresetError> {
        let mut records = self.records.write().await;
        let Some(collection) = records.get_mut(&kind) else {
            return Ok(false);
        };
        let before = collection.len();
        collection.retain(|record| record.id() != id);
        Ok(collection.len() != before)
    }
}
