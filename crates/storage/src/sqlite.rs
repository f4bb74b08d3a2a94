use std::{fs, path::Path, str::FromStr};

use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::presets::{NewPreset, PresetKind, PresetRecord};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use tracing::{debug, info, warn};

use crate::{assign, IdSequence, PresetError, PresetStore};

const MEMORY_URL: &str = "sqlite::memory:";

#[derive(Debug)]
pub struct SqlitePresetStore {
    pool: Pool<Sqlite>,
    ids: IdSequence,
}

impl SqlitePresetStore {
    pub async fn open(database_url: &str) -> Result<Self> {
        let location = Location::parse(database_url);
        location.create_parent_dir()?;
        let database_url = location.url();

        let connect_options = SqliteConnectOptions::from_str(&database_url)
            .with_context(|| format!("invalid database url '{database_url}'"))?
            .create_if_missing(true);
        // Every connection to an in-memory database sees its own empty database.
        let max_connections = if location.is_memory() { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open preset database '{database_url}'"))?;

        let store = Self {
            pool,
            ids: IdSequence::default(),
        };
        store.ensure_presets_table().await?;
        debug!(%database_url, "preset store ready");
        Ok(store)
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    async fn ensure_presets_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS presets (
                kind       TEXT NOT NULL,
                id         TEXT NOT NULL,
                name       TEXT NOT NULL,
                data_json  TEXT NOT NULL,
                position   INTEGER NOT NULL,
                PRIMARY KEY (kind, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure presets table exists")?;
        Ok(())
    }
}

#[async_trait]
impl PresetStore for SqlitePresetStore {
    async fn list(&self, kind: PresetKind) -> Result<Vec<PresetRecord>, PresetError> {
        let rows = sqlx::query("SELECT id, data_json FROM presets WHERE kind = ? ORDER BY position")
            .bind(kind.storage_key())
            .fetch_all(&self.pool)
            .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.try_get("id")?;
            let data_json: String = row.try_get("data_json")?;
            match serde_json::from_str::<PresetRecord>(&data_json) {
                Ok(record) if record.kind() == kind => records.push(record),
                Ok(record) => {
                    warn!(kind = %kind, %id, found = %record.kind(), "skipping preset stored under the wrong kind");
                }
                Err(err) => {
                    warn!(kind = %kind, %id, error = %err, "skipping unreadable preset");
                }
            }
        }
        Ok(records)
    }

    async fn add(&self, preset: NewPreset) -> Result<PresetRecord, PresetError> {
        let record = assign(preset, &self.ids)?;
        let data_json = serde_json::to_string(&record)?;

        sqlx::query(
            "INSERT INTO presets (kind, id, name, data_json, position)
             SELECT ?, ?, ?, ?, COALESCE(MAX(position), 0) + 1 FROM presets WHERE kind = ?",
        )
        .bind(record.kind().storage_key())
        .bind(record.id())
        .bind(record.name())
        .bind(&data_json)
        .bind(record.kind().storage_key())
        .execute(&self.pool)
        .await?;

        info!(kind = %record.kind(), id = record.id(), name = record.name(), "saved preset");
        Ok(record)
    }

    async fn remove(&self, kind: PresetKind, id: &str) -> Result<bool, PresetError> {
        let result = sqlx::query("DELETE FROM presets WHERE kind = ? AND id = ?")
            .bind(kind.storage_key())
            .bind(id)
            .execute(&self.pool)
            .await?;
        let removed = result.rows_affected() > 0;
        if removed {
            info!(kind = %kind, %id, "removed preset");
        }
        Ok(removed)
    }
}

/// A configured database location. Plain paths and `sqlite:` shorthands are
/// file databases; an empty location is an in-memory one.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    Memory,
    File { path: String, options: String },
    Url(String),
}

impl Location {
    fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == MEMORY_URL {
            return Self::Memory;
        }
        if raw.starts_with(MEMORY_URL) {
            return Self::Url(raw.to_string());
        }

        let path = match raw.strip_prefix("sqlite://").or_else(|| raw.strip_prefix("sqlite:")) {
            Some(path) => path,
            None if raw.contains("://") => return Self::Url(raw.to_string()),
            None => raw,
        };
        let (path, options) = match path.split_once('?') {
            Some((path, query)) => (path, format!("?{query}")),
            None => (path, String::new()),
        };
        Self::File {
            path: path.replace('\\', "/"),
            options,
        }
    }

    fn url(&self) -> String {
        match self {
            Self::Memory => MEMORY_URL.to_string(),
            Self::File { path, options } => format!("sqlite://{path}{options}"),
            Self::Url(url) => url.clone(),
        }
    }

    fn is_memory(&self) -> bool {
        match self {
            Self::Memory => true,
            Self::Url(url) => url.starts_with(MEMORY_URL),
            Self::File { .. } => false,
        }
    }

    fn create_parent_dir(&self) -> Result<()> {
        let Self::File { path, .. } = self else {
            return Ok(());
        };
        let Some(parent) = Path::new(path).parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(parent).with_context(|| {
            format!(
                "failed to create directory '{}' for the preset database",
                parent.display()
            )
        })
    }
}

#[cfg(test)]
#[path = "tests/sqlite_tests.rs"]
mod tests;
