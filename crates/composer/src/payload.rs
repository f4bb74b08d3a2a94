use chrono::{DateTime, Utc};
use shared::{
    domain::{ButtonSpec, EmbedCard, WebhookIdentity},
    form::FormState,
    protocol::{
        ActionRow, ButtonComponent, EmbedAuthorObject, EmbedFieldObject, EmbedFooterObject,
        EmbedMedia, EmbedObject, OutboundPayload, WireTimestamp, BUTTON_COMPONENT_TYPE,
    },
};
use tracing::warn;

use crate::visibility::{non_empty_owned, EmbedParts};

/// Platform limit for buttons in a single action row.
pub const MAX_BUTTONS_PER_ROW: usize = 5;

/// Builds the webhook body, stamping the embed timestamp (when requested) with the current time.
pub fn build(
    identity: &WebhookIdentity,
    content: &str,
    embed: &EmbedCard,
    buttons: &[ButtonSpec],
) -> OutboundPayload {
    build_at(identity, content, embed, buttons, Utc::now())
}

pub fn build_form(form: &FormState) -> OutboundPayload {
    build(form.identity(), form.content(), form.embed(), form.buttons())
}

/// Same as [`build`] with an explicit clock. Never fails: inputs that cannot be
/// represented are left out of the payload.
pub fn build_at(
    identity: &WebhookIdentity,
    content: &str,
    embed: &EmbedCard,
    buttons: &[ButtonSpec],
    now: DateTime<Utc>,
) -> OutboundPayload {
    OutboundPayload {
        content: non_empty_owned(content),
        username: non_empty_owned(&identity.display_name),
        avatar_url: non_empty_owned(&identity.avatar_url),
        embeds: embed_object(embed, now).map(|embed| vec![embed]),
        components: action_row(buttons).map(|row| vec![row]),
    }
}

fn embed_object(embed: &EmbedCard, now: DateTime<Utc>) -> Option<EmbedObject> {
    let parts = EmbedParts::of(embed);
    if parts.is_empty() {
        return None;
    }

    let fields: Vec<EmbedFieldObject> = parts
        .fields
        .iter()
        .map(|field| EmbedFieldObject {
            name: field.name.clone(),
            value: field.value.clone(),
            inline: field.inline,
        })
        .collect();

    Some(EmbedObject {
        title: parts.title.map(str::to_string),
        description: parts.description.map(str::to_string),
        color: parts.color,
        footer: parts.footer.map(|footer| EmbedFooterObject {
            text: footer.text.to_string(),
            icon_url: footer.icon_url.map(str::to_string),
        }),
        thumbnail: parts.thumbnail_url.map(media),
        image: parts.image_url.map(media),
        author: parts.author.map(|author| EmbedAuthorObject {
            name: author.name.to_string(),
            icon_url: author.icon_url.map(str::to_string),
            url: author.url.map(str::to_string),
        }),
        fields: (!fields.is_empty()).then_some(fields),
        timestamp: parts.timestamp.then_some(WireTimestamp(now)),
    })
}

fn media(url: &str) -> EmbedMedia {
    EmbedMedia {
        url: url.to_string(),
    }
}

fn action_row(buttons: &[ButtonSpec]) -> Option<ActionRow> {
    if buttons.is_empty() {
        return None;
    }
    if buttons.len() > MAX_BUTTONS_PER_ROW {
        warn!(
            given = buttons.len(),
            kept = MAX_BUTTONS_PER_ROW,
            "dropping buttons beyond the action row limit"
        );
    }

    let components = buttons
        .iter()
        .take(MAX_BUTTONS_PER_ROW)
        .map(button_component)
        .collect();
    Some(ActionRow::new(components))
}

fn button_component(button: &ButtonSpec) -> ButtonComponent {
    let (url, custom_id) = if button.style.is_link() {
        (non_empty_owned(&button.url), None)
    } else {
        (None, non_empty_owned(&button.custom_id))
    };
    ButtonComponent {
        component_type: BUTTON_COMPONENT_TYPE,
        style: button.style,
        label: button.label.clone(),
        url,
        custom_id,
    }
}

#[cfg(test)]
#[path = "tests/payload_tests.rs"]
mod tests;
