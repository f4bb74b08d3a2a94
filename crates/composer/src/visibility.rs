use shared::domain::{EmbedCard, EmbedField};

use crate::color::parse_hex_color;

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

pub(crate) struct FooterParts<'a> {
    pub text: &'a str,
    pub icon_url: Option<&'a str>,
}

pub(crate) struct AuthorParts<'a> {
    pub name: &'a str,
    pub icon_url: Option<&'a str>,
    pub url: Option<&'a str>,
}

/// The parts of an embed that survive the omission rules. Both the payload
/// builder and the preview renderer read from this, never from the raw card.
pub(crate) struct EmbedParts<'a> {
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    pub color: Option<u32>,
    pub footer: Option<FooterParts<'a>>,
    pub thumbnail_url: Option<&'a str>,
    pub image_url: Option<&'a str>,
    pub author: Option<AuthorParts<'a>>,
    pub fields: Vec<&'a EmbedField>,
    pub timestamp: bool,
}

impl<'a> EmbedParts<'a> {
    pub fn of(embed: &'a EmbedCard) -> Self {
        Self {
            title: non_empty(&embed.title),
            description: non_empty(&embed.description),
            color: parse_hex_color(&embed.color),
            footer: non_empty(&embed.footer.text).map(|text| FooterParts {
                text,
                icon_url: non_empty(&embed.footer.icon_url),
            }),
            thumbnail_url: non_empty(&embed.thumbnail_url),
            image_url: non_empty(&embed.image_url),
            author: non_empty(&embed.author.name).map(|name| AuthorParts {
                name,
                icon_url: non_empty(&embed.author.icon_url),
                url: non_empty(&embed.author.url),
            }),
            fields: embed.renderable_fields().collect(),
            timestamp: embed.include_timestamp,
        }
    }

    /// True when nothing would contribute to the embed object.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.color.is_none()
            && self.footer.is_none()
            && self.thumbnail_url.is_none()
            && self.image_url.is_none()
            && self.author.is_none()
            && self.fields.is_empty()
            && !self.timestamp
    }
}

pub(crate) fn non_empty_owned(value: &str) -> Option<String> {
    non_empty(value).map(str::to_string)
}
