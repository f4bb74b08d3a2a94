//! Read-only description of how the platform will display a message.
//!
//! The renderer decides *what* appears; hosts (the egui editor, the CLI) only
//! decide how to paint it. Embed parts are taken from the same inclusion rules
//! as the payload builder.

use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use shared::{
    domain::{ButtonSpec, ButtonStyle, EmbedCard, WebhookIdentity},
    form::FormState,
};

use crate::{
    color::Rgb,
    markdown::{format, MarkedUpText},
    payload::MAX_BUTTONS_PER_ROW,
    visibility::{non_empty_owned, EmbedParts},
};

pub const DEFAULT_DISPLAY_NAME: &str = "Webhook";
pub const BOT_BADGE: &str = "BOT";
/// Placeholder avatar letter when the display name is empty.
pub const DEFAULT_AVATAR_INITIAL: char = 'B';
pub const FOOTER_SEPARATOR: &str = " • ";

/// Left border used when the embed has no valid colour.
pub const NEUTRAL_BORDER: Rgb = Rgb(0x1E, 0x1F, 0x22);
pub const EMBED_BACKGROUND: Rgb = Rgb(0x2B, 0x2D, 0x31);
pub const MESSAGE_BACKGROUND: Rgb = Rgb(0x31, 0x33, 0x38);
pub const BOT_BADGE_FILL: Rgb = Rgb(0x58, 0x65, 0xF2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPreview {
    pub header: MessageHeader,
    pub content: Option<MarkedUpText>,
    pub embed: Option<EmbedPreview>,
    pub buttons: Vec<ButtonPreview>,
}

impl RenderedPreview {
    /// No content, no embed and no buttons.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.embed.is_none() && self.buttons.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub display_name: String,
    pub avatar: Avatar,
    pub badge: &'static str,
    pub sent_label: String,
}

/// Remote avatar image with the letter shown while it loads or when it fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub image_url: Option<String>,
    pub initial: char,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedPreview {
    pub accent: Rgb,
    pub author: Option<AuthorLine>,
    pub title: Option<MarkedUpText>,
    pub description: Option<MarkedUpText>,
    pub fields: Vec<FieldCell>,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub footer: Option<FooterLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorLine {
    pub name: String,
    pub icon_url: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    Half,
    Full,
}

impl FieldWidth {
    pub fn fraction(self) -> f32 {
        match self {
            FieldWidth::Half => 0.5,
            FieldWidth::Full => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCell {
    pub name: MarkedUpText,
    pub value: MarkedUpText,
    pub width: FieldWidth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLine {
    pub icon_url: Option<String>,
    pub text: Option<String>,
    pub timestamp: Option<String>,
}

impl fmt::Display for FooterLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [self.text.as_deref(), self.timestamp.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        f.write_str(&parts.join(FOOTER_SEPARATOR))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAppearance {
    Solid { fill: Rgb },
    Outline { text: Rgb, border: Rgb },
}

impl ButtonAppearance {
    pub fn for_style(style: ButtonStyle) -> Self {
        match style {
            ButtonStyle::Primary => ButtonAppearance::Solid {
                fill: Rgb(0x58, 0x65, 0xF2),
            },
            ButtonStyle::Secondary => ButtonAppearance::Solid {
                fill: Rgb(0x4E, 0x50, 0x58),
            },
            ButtonStyle::Success => ButtonAppearance::Solid {
                fill: Rgb(0x24, 0x80, 0x46),
            },
            ButtonStyle::Danger => ButtonAppearance::Solid {
                fill: Rgb(0xDA, 0x37, 0x3C),
            },
            ButtonStyle::Link => ButtonAppearance::Outline {
                text: Rgb(0x00, 0xA8, 0xFC),
                border: Rgb(0x4E, 0x50, 0x58),
            },
        }
    }
}

/// A button as painted. Preview buttons have no action; `hint` is the link
/// target or interaction id, for a tooltip only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonPreview {
    pub label: String,
    pub style: ButtonStyle,
    pub appearance: ButtonAppearance,
    pub hint: Option<String>,
}

pub fn render(
    identity: &WebhookIdentity,
    content: &str,
    embed: &EmbedCard,
    buttons: &[ButtonSpec],
) -> RenderedPreview {
    render_at(identity, content, embed, buttons, &Local::now())
}

pub fn render_form(form: &FormState) -> RenderedPreview {
    render(form.identity(), form.content(), form.embed(), form.buttons())
}

/// Renders with the viewer's clock and zone taken from `now`.
pub fn render_at<Tz>(
    identity: &WebhookIdentity,
    content: &str,
    embed: &EmbedCard,
    buttons: &[ButtonSpec],
    now: &DateTime<Tz>,
) -> RenderedPreview
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    RenderedPreview {
        header: header(identity, now),
        content: format(content),
        embed: embed_preview(embed, now),
        buttons: buttons
            .iter()
            .take(MAX_BUTTONS_PER_ROW)
            .map(button_preview)
            .collect(),
    }
}

fn header<Tz>(identity: &WebhookIdentity, now: &DateTime<Tz>) -> MessageHeader
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let display_name = if identity.display_name.is_empty() {
        DEFAULT_DISPLAY_NAME.to_string()
    } else {
        identity.display_name.clone()
    };
    let initial = identity
        .display_name
        .chars()
        .next()
        .and_then(|first| first.to_uppercase().next())
        .unwrap_or(DEFAULT_AVATAR_INITIAL);

    MessageHeader {
        display_name,
        avatar: Avatar {
            image_url: non_empty_owned(&identity.avatar_url),
            initial,
        },
        badge: BOT_BADGE,
        sent_label: format!("Today at {}", now.format("%H:%M")),
    }
}

fn embed_preview<Tz>(embed: &EmbedCard, now: &DateTime<Tz>) -> Option<EmbedPreview>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let parts = EmbedParts::of(embed);
    if parts.is_empty() {
        return None;
    }

    let fields = parts
        .fields
        .iter()
        .map(|field| FieldCell {
            name: format(&field.name).unwrap_or_default(),
            value: format(&field.value).unwrap_or_default(),
            width: if field.inline {
                FieldWidth::Half
            } else {
                FieldWidth::Full
            },
        })
        .collect();

    let timestamp = parts
        .timestamp
        .then(|| now.format("%d/%m/%Y %H:%M").to_string());
    let footer = if parts.footer.is_some() || timestamp.is_some() {
        Some(FooterLine {
            icon_url: parts
                .footer
                .as_ref()
                .and_then(|footer| footer.icon_url)
                .map(str::to_string),
            text: parts.footer.as_ref().map(|footer| footer.text.to_string()),
            timestamp,
        })
    } else {
        None
    };

    Some(EmbedPreview {
        accent: parts.color.map_or(NEUTRAL_BORDER, Rgb::from_u32),
        author: parts.author.map(|author| AuthorLine {
            name: author.name.to_string(),
            icon_url: author.icon_url.map(str::to_string),
            url: author.url.map(str::to_string),
        }),
        title: parts.title.and_then(format),
        description: parts.description.and_then(format),
        fields,
        image_url: parts.image_url.map(str::to_string),
        thumbnail_url: parts.thumbnail_url.map(str::to_string),
        footer,
    })
}

fn button_preview(button: &ButtonSpec) -> ButtonPreview {
    let hint = if button.style.is_link() {
        non_empty_owned(&button.url)
    } else {
        non_empty_owned(&button.custom_id)
    };
    ButtonPreview {
        label: button.label.clone(),
        style: button.style,
        appearance: ButtonAppearance::for_style(button.style),
        hint,
    }
}

#[cfg(test)]
#[path = "tests/preview_tests.rs"]
mod tests;
