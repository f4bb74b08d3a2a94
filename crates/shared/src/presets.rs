use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{domain::EmbedCard, error::PresetValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetKind {
    Webhooks,
    Roles,
    Embeds,
}

impl PresetKind {
    pub const ALL: [PresetKind; 3] = [PresetKind::Webhooks, PresetKind::Roles, PresetKind::Embeds];

    /// Key of the collection in the backing store.
    pub fn storage_key(self) -> &'static str {
        match self {
            PresetKind::Webhooks => "webhooks",
            PresetKind::Roles => "roles",
            PresetKind::Embeds => "saved_embeds",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "webhook" | "webhooks" => Some(PresetKind::Webhooks),
            "role" | "roles" => Some(PresetKind::Roles),
            "embed" | "embeds" | "saved_embeds" => Some(PresetKind::Embeds),
            _ => None,
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PresetKind::Webhooks => "webhook",
            PresetKind::Roles => "role",
            PresetKind::Embeds => "embed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPreset {
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePreset {
    pub id: String,
    pub name: String,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedTemplate {
    pub id: String,
    pub name: String,
    pub data: EmbedCard,
    pub created_at: String,
}

/// Example role formats offered next to the role form.
pub const ROLE_FORMAT_EXAMPLES: [(&str, &str); 2] =
    [("Mention", "<@&ROLE_ID>"), ("Custom text", "@Role Name")];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresetRecord {
    Webhook(WebhookPreset),
    Role(RolePreset),
    Embed(EmbedTemplate),
}

impl PresetRecord {
    pub fn kind(&self) -> PresetKind {
        match self {
            PresetRecord::Webhook(_) => PresetKind::Webhooks,
            PresetRecord::Role(_) => PresetKind::Roles,
            PresetRecord::Embed(_) => PresetKind::Embeds,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            PresetRecord::Webhook(preset) => &preset.id,
            PresetRecord::Role(preset) => &preset.id,
            PresetRecord::Embed(template) => &template.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PresetRecord::Webhook(preset) => &preset.name,
            PresetRecord::Role(preset) => &preset.name,
            PresetRecord::Embed(template) => &template.name,
        }
    }
}

/// A record before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewPreset {
    Webhook { name: String, url: String },
    Role { name: String, format: String },
    Embed { name: String, data: EmbedCard },
}

impl NewPreset {
    pub fn kind(&self) -> PresetKind {
        match self {
            NewPreset::Webhook { .. } => PresetKind::Webhooks,
            NewPreset::Role { .. } => PresetKind::Roles,
            NewPreset::Embed { .. } => PresetKind::Embeds,
        }
    }

    pub fn validate(&self) -> Result<(), PresetValidationError> {
        let name = match self {
            NewPreset::Webhook { name, .. }
            | NewPreset::Role { name, .. }
            | NewPreset::Embed { name, .. } => name,
        };
        if name.trim().is_empty() {
            return Err(PresetValidationError::MissingName { kind: self.kind() });
        }
        match self {
            NewPreset::Webhook { url, .. } if url.trim().is_empty() => {
                Err(PresetValidationError::MissingUrl)
            }
            NewPreset::Role { format, .. } if format.trim().is_empty() => {
                Err(PresetValidationError::MissingFormat)
            }
            _ => Ok(()),
        }
    }

    pub fn into_record(self, id: String, created_at: String) -> PresetRecord {
        match self {
            NewPreset::Webhook { name, url } => {
                PresetRecord::Webhook(WebhookPreset { id, name, url })
            }
            NewPreset::Role { name, format } => PresetRecord::Role(RolePreset { id, name, format }),
            NewPreset::Embed { name, data } => PresetRecord::Embed(EmbedTemplate {
                id,
                name,
                data,
                created_at,
            }),
        }
    }
}
