use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shared::{
    domain::{ButtonSpec, EmbedCard, WebhookIdentity},
    form::FormState,
};

/// A message written by hand in TOML or JSON. Missing sections take the
/// editor's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Draft {
    pub identity: WebhookIdentity,
    pub content: String,
    pub embed: EmbedCard,
    pub buttons: Vec<ButtonSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftFormat {
    Toml,
    Json,
}

impl DraftFormat {
    fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DraftFormat::Json,
            _ => DraftFormat::Toml,
        }
    }
}

impl Draft {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read draft '{}'", path.display()))?;
        Self::parse(&raw, DraftFormat::for_path(path))
            .with_context(|| format!("failed to parse draft '{}'", path.display()))
    }

    pub fn parse(raw: &str, format: DraftFormat) -> Result<Self> {
        let draft: Draft = match format {
            DraftFormat::Toml => toml::from_str(raw)?,
            DraftFormat::Json => serde_json::from_str(raw)?,
        };
        Ok(draft)
    }

    pub fn into_form(self) -> Result<FormState> {
        let form = FormState::new(self.identity, self.content, self.embed, self.buttons)?;
        Ok(form)
    }
}
