use serde::{Deserialize, Serialize};

use crate::error::UnknownButtonStyle;

/// Border colour a fresh embed starts with.
pub const DEFAULT_EMBED_COLOR: &str = "#5865F2";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookIdentity {
    pub endpoint_url: String,
    pub display_name: String,
    pub avatar_url: String,
}

impl WebhookIdentity {
    pub fn has_endpoint(&self) -> bool {
        !self.endpoint_url.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedFooter {
    pub text: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedAuthor {
    pub name: String,
    pub icon_url: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline,
        }
    }

    /// A field only reaches the payload and the preview when both halves are filled in.
    pub fn is_renderable(&self) -> bool {
        !self.name.is_empty() && !self.value.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedCard {
    pub title: String,
    pub description: String,
    /// `#RRGGBB`, the leading `#` is optional.
    pub color: String,
    pub footer: EmbedFooter,
    pub thumbnail_url: String,
    pub image_url: String,
    pub author: EmbedAuthor,
    pub fields: Vec<EmbedField>,
    pub include_timestamp: bool,
}

impl Default for EmbedCard {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            color: DEFAULT_EMBED_COLOR.to_string(),
            footer: EmbedFooter::default(),
            thumbnail_url: String::new(),
            image_url: String::new(),
            author: EmbedAuthor::default(),
            fields: Vec::new(),
            include_timestamp: false,
        }
    }
}

impl EmbedCard {
    /// An embed with every attribute cleared, including the colour.
    pub fn blank() -> Self {
        Self {
            color: String::new(),
            ..Self::default()
        }
    }

    pub fn renderable_fields(&self) -> impl Iterator<Item = &EmbedField> {
        self.fields.iter().filter(|field| field.is_renderable())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ButtonStyle {
    Primary = 1,
    Secondary = 2,
    Success = 3,
    Danger = 4,
    Link = 5,
}

impl ButtonStyle {
    pub const ALL: [ButtonStyle; 5] = [
        ButtonStyle::Primary,
        ButtonStyle::Secondary,
        ButtonStyle::Success,
        ButtonStyle::Danger,
        ButtonStyle::Link,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ButtonStyle::Primary => "Blue (Primary)",
            ButtonStyle::Secondary => "Grey (Secondary)",
            ButtonStyle::Success => "Green (Success)",
            ButtonStyle::Danger => "Red (Danger)",
            ButtonStyle::Link => "Link",
        }
    }

    pub fn is_link(self) -> bool {
        self == ButtonStyle::Link
    }
}

impl From<ButtonStyle> for u8 {
    fn from(value: ButtonStyle) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for ButtonStyle {
    type Error = UnknownButtonStyle;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ButtonStyle::Primary),
            2 => Ok(ButtonStyle::Secondary),
            3 => Ok(ButtonStyle::Success),
            4 => Ok(ButtonStyle::Danger),
            5 => Ok(ButtonStyle::Link),
            other => Err(UnknownButtonStyle(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSpec {
    pub label: String,
    pub style: ButtonStyle,
    /// Navigation target; only meaningful for [`ButtonStyle::Link`].
    #[serde(default)]
    pub url: String,
    /// Interaction id; only meaningful for the non-link styles.
    #[serde(default)]
    pub custom_id: String,
}

impl ButtonSpec {
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style: ButtonStyle::Link,
            url: url.into(),
            custom_id: String::new(),
        }
    }

    pub fn action(label: impl Into<String>, style: ButtonStyle, custom_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            style,
            url: String::new(),
            custom_id: custom_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPreset {
    Custom,
    Positive,
    Rebalance,
    Disabled,
}

impl ButtonPreset {
    pub const ALL: [ButtonPreset; 4] = [
        ButtonPreset::Custom,
        ButtonPreset::Positive,
        ButtonPreset::Rebalance,
        ButtonPreset::Disabled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ButtonPreset::Custom => "Custom button",
            ButtonPreset::Positive => "Positive update",
            ButtonPreset::Rebalance => "Rebalance update",
            ButtonPreset::Disabled => "Disabled update",
        }
    }

    // Presets keep a url even on non-link styles; the payload only emits it for links.
    pub fn button(self) -> ButtonSpec {
        let (label, style, url) = match self {
            ButtonPreset::Custom => ("New Button", ButtonStyle::Link, "https://example.com"),
            ButtonPreset::Positive => (
                "Positive Update",
                ButtonStyle::Success,
                "https://example.com/positive",
            ),
            ButtonPreset::Rebalance => (
                "Rebalance Update",
                ButtonStyle::Primary,
                "https://example.com/rebalance",
            ),
            ButtonPreset::Disabled => (
                "Disabled Update",
                ButtonStyle::Danger,
                "https://example.com/disabled",
            ),
        };
        ButtonSpec {
            label: label.to_string(),
            style,
            url: url.to_string(),
            custom_id: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    pub name: &'static str,
    pub hex: &'static str,
}

pub const COLOR_PRESETS: [ColorPreset; 6] = [
    ColorPreset {
        name: "Green",
        hex: "#00b894",
    },
    ColorPreset {
        name: "Red",
        hex: "#d63031",
    },
    ColorPreset {
        name: "Yellow",
        hex: "#fdcb6e",
    },
    ColorPreset {
        name: "Blue",
        hex: "#0984e3",
    },
    ColorPreset {
        name: "Purple",
        hex: "#6c5ce7",
    },
    ColorPreset {
        name: "Pink",
        hex: "#e84393",
    },
];
