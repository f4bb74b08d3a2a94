//! Local persistence for webhook, role and embed presets.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Local, Utc};
use shared::{
    error::PresetValidationError,
    presets::{NewPreset, PresetKind, PresetRecord},
};
use thiserror::Error;

mod memory;
mod sqlite;

pub use memory::MemoryPresetStore;
pub use sqlite::SqlitePresetStore;

#[derive(Debug, Error)]
pub enum PresetError {
    #[error(transparent)]
    Invalid(#[from] PresetValidationError),
    #[error("preset database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to encode preset: {0}")]
    Encode(#[from] serde_json::Error),
}

/// The three preset collections. Each is an ordered list of records keyed by id.
#[async_trait]
pub trait PresetStore: Send + Sync {
    /// Records of `kind` in insertion order. Records that cannot be decoded are skipped.
    async fn list(&self, kind: PresetKind) -> Result<Vec<PresetRecord>, PresetError>;

    /// Validates and appends a record, assigning its id. The collection is
    /// taken from the variant of `preset`.
    async fn add(&self, preset: NewPreset) -> Result<PresetRecord, PresetError>;

    /// Removes the record with `id`; `Ok(false)` when no such record exists.
    async fn remove(&self, kind: PresetKind, id: &str) -> Result<bool, PresetError>;
}

/// Issues record ids from the wall clock in milliseconds, never repeating one.
#[derive(Debug, Default)]
pub(crate) struct IdSequence {
    last: Mutex<i64>,
}

impl IdSequence {
    pub(crate) fn next(&self) -> String {
        self.next_after(Utc::now().timestamp_millis())
    }

    fn next_after(&self, now_millis: i64) -> String {
        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let id = now_millis.max(*last + 1);
        *last = id;
        id.to_string()
    }
}

/// Validates `preset` and turns it into a record with a fresh id.
pub(crate) fn assign(preset: NewPreset, ids: &IdSequence) -> Result<PresetRecord, PresetError> {
    preset.validate()?;
    let created_at = Local::now().format("%Y-%m-%d").to_string();
    Ok(preset.into_record(ids.next(), created_at))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_bump_when_the_clock_repeats() {
        let ids = IdSequence::default();
        assert_eq!(ids.next_after(1_700_000_000_000), "1700000000000");
        assert_eq!(ids.next_after(1_700_000_000_000), "1700000000001");
        assert_eq!(ids.next_after(1_699_999_999_999), "1700000000002");
        assert_eq!(ids.next_after(1_700_000_000_500), "1700000000500");
    }

    #[test]
    fn assign_rejects_invalid_presets() {
        let ids = IdSequence::default();
        let err = assign(
            NewPreset::Webhook {
                name: String::new(),
                url: "https://example.com".into(),
            },
            &ids,
        )
        .expect_err("blank name");
        assert!(matches!(err, PresetError::Invalid(_)));
    }
}
