use chrono::TimeZone;
use serde_json::json;
use shared::domain::{ButtonPreset, ButtonStyle, EmbedAuthor, EmbedField, EmbedFooter};

use super::*;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
}

fn identity(name: &str, avatar: &str) -> WebhookIdentity {
    WebhookIdentity {
        endpoint_url: "https://discord.example/api/webhooks/1/abc".into(),
        display_name: name.into(),
        avatar_url: avatar.into(),
    }
}

#[test]
fn empty_form_builds_empty_object() {
    let payload = build_at(
        &WebhookIdentity::default(),
        "",
        &EmbedCard::blank(),
        &[],
        fixed_now(),
    );
    assert_eq!(payload.to_json().unwrap(), "{}");
}

#[test]
fn identity_and_content_are_included_only_when_set() {
    let payload = build_at(&identity("Deploy Bot", ""), "hello", &EmbedCard::blank(), &[], fixed_now());
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({"content": "hello", "username": "Deploy Bot"})
    );
}

#[test]
fn hex_color_is_encoded_as_decimal_with_or_without_hash() {
    for raw in ["#5865F2", "5865F2"] {
        let embed = EmbedCard {
            title: "t".into(),
            color: raw.into(),
            ..EmbedCard::blank()
        };
        let payload = build_at(&WebhookIdentity::default(), "", &embed, &[], fixed_now());
        assert_eq!(payload.embed().unwrap().color, Some(5_793_266));
    }
}

#[test]
fn invalid_color_is_left_out_without_dropping_the_embed() {
    let embed = EmbedCard {
        title: "Release".into(),
        color: "#XYZ".into(),
        ..EmbedCard::blank()
    };
    let payload = build_at(&WebhookIdentity::default(), "", &embed, &[], fixed_now());
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value, json!({"embeds": [{"title": "Release"}]}));
}

#[test]
fn invalid_color_alone_does_not_produce_an_embed() {
    let embed = EmbedCard {
        color: "nope".into(),
        ..EmbedCard::blank()
    };
    let payload = build_at(&WebhookIdentity::default(), "", &embed, &[], fixed_now());
    assert!(payload.embeds.is_none());
}

#[test]
fn only_renderable_fields_are_kept() {
    let embed = EmbedCard {
        fields: vec![EmbedField::new("A", "", false), EmbedField::new("B", "V", true)],
        ..EmbedCard::blank()
    };
    let payload = build_at(&WebhookIdentity::default(), "", &embed, &[], fixed_now());
    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(
        value["embeds"][0]["fields"],
        json!([{"name": "B", "value": "V", "inline": true}])
    );
}

#[test]
fn embed_with_only_unrenderable_fields_is_omitted() {
    let embed = EmbedCard {
        fields: vec![EmbedField::new("", "value only", false)],
        ..EmbedCard::blank()
    };
    let payload = build_at(&WebhookIdentity::default(), "text", &embed, &[], fixed_now());
    assert!(payload.embeds.is_none());
    assert!(!payload.to_json().unwrap().contains("embeds"));
}

#[test]
fn footer_icon_without_text_is_dropped() {
    let embed = EmbedCard {
        title: "t".into(),
        footer: EmbedFooter {
            text: String::new(),
            icon_url: "https://cdn.example/icon.png".into(),
        },
        ..EmbedCard::blank()
    };
    let payload = build_at(&WebhookIdentity::default(), "", &embed, &[], fixed_now());
    assert!(payload.embed().unwrap().footer.is_none());
}

#[test]
fn author_links_are_included_independently() {
    let embed = EmbedCard {
        author: EmbedAuthor {
            name: "Ops".into(),
            icon_url: String::new(),
            url: "https://status.example".into(),
        },
        ..EmbedCard::blank()
    };
    let payload = build_at(&WebhookIdentity::default(), "", &embed, &[], fixed_now());
    assert_eq!(
        serde_json::to_value(payload.embed().unwrap()).unwrap(),
        json!({"author": {"name": "Ops", "url": "https://status.example"}})
    );
}

#[test]
fn full_embed_matches_wire_schema() {
    let embed = EmbedCard {
        title: "Deploy finished".into(),
        description: "All **green**".into(),
        color: "#00b894".into(),
        footer: EmbedFooter {
            text: "ci".into(),
            icon_url: "https://cdn.example/ci.png".into(),
        },
        thumbnail_url: "https://cdn.example/thumb.png".into(),
        image_url: "https://cdn.example/image.png".into(),
        author: EmbedAuthor {
            name: "Pipeline".into(),
            icon_url: "https://cdn.example/author.png".into(),
            url: String::new(),
        },
        fields: vec![EmbedField::new("Env", "prod", true)],
        include_timestamp: true,
    };
    let payload = build_at(&identity("", "https://cdn.example/avatar.png"), "", &embed, &[], fixed_now());
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({
            "avatar_url": "https://cdn.example/avatar.png",
            "embeds": [{
                "title": "Deploy finished",
                "description": "All **green**",
                "color": 0x00b894,
                "footer": {"text": "ci", "icon_url": "https://cdn.example/ci.png"},
                "thumbnail": {"url": "https://cdn.example/thumb.png"},
                "image": {"url": "https://cdn.example/image.png"},
                "author": {"name": "Pipeline", "icon_url": "https://cdn.example/author.png"},
                "fields": [{"name": "Env", "value": "prod", "inline": true}],
                "timestamp": "2024-05-01T12:30:00.000Z"
            }]
        })
    );
}

#[test]
fn timestamp_flag_alone_produces_an_embed() {
    let embed = EmbedCard {
        include_timestamp: true,
        ..EmbedCard::blank()
    };
    let payload = build_at(&WebhookIdentity::default(), "", &embed, &[], fixed_now());
    assert_eq!(
        payload.embed().unwrap().timestamp,
        Some(WireTimestamp(fixed_now()))
    );
}

#[test]
fn repeated_builds_only_differ_in_timestamp() {
    let embed = EmbedCard {
        title: "same".into(),
        include_timestamp: true,
        ..EmbedCard::default()
    };
    let buttons = [ButtonPreset::Custom.button()];
    let first = build_at(&identity("a", ""), "x", &embed, &buttons, fixed_now());
    let later = fixed_now() + chrono::Duration::seconds(90);
    let mut second = build_at(&identity("a", ""), "x", &embed, &buttons, later);
    assert_ne!(first, second);

    second.embeds.as_mut().unwrap()[0].timestamp = Some(WireTimestamp(fixed_now()));
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn five_buttons_make_one_row_in_input_order() {
    let buttons: Vec<ButtonSpec> = (0..5)
        .map(|index| ButtonSpec::action(format!("b{index}"), ButtonStyle::Secondary, format!("id-{index}")))
        .collect();
    let payload = build_at(&WebhookIdentity::default(), "", &EmbedCard::blank(), &buttons, fixed_now());
    let rows = payload.components.unwrap();
    assert_eq!(rows.len(), 1);
    let labels: Vec<&str> = rows[0].components.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["b0", "b1", "b2", "b3", "b4"]);
}

#[test]
fn buttons_beyond_the_row_limit_are_dropped() {
    let buttons = vec![ButtonPreset::Custom.button(); 7];
    let payload = build_at(&WebhookIdentity::default(), "", &EmbedCard::blank(), &buttons, fixed_now());
    assert_eq!(payload.components.unwrap()[0].components.len(), MAX_BUTTONS_PER_ROW);
}

#[test]
fn link_buttons_carry_url_and_others_custom_id() {
    let buttons = [
        ButtonSpec::link("Docs", "https://docs.rs"),
        ButtonSpec::action("Approve", ButtonStyle::Success, "approve"),
        ButtonPreset::Positive.button(),
    ];
    let payload = build_at(&WebhookIdentity::default(), "", &EmbedCard::blank(), &buttons, fixed_now());
    assert_eq!(
        serde_json::to_value(&payload).unwrap(),
        json!({
            "components": [{
                "type": 1,
                "components": [
                    {"type": 2, "style": 5, "label": "Docs", "url": "https://docs.rs"},
                    {"type": 2, "style": 3, "label": "Approve", "custom_id": "approve"},
                    {"type": 2, "style": 3, "label": "Positive Update"}
                ]
            }]
        })
    );
}

#[test]
fn build_form_reads_current_form_values() {
    let mut form = FormState::default();
    form.set_content("from form");
    form.set_embed(EmbedCard::blank());
    let payload = build_form(&form);
    assert_eq!(payload.content.as_deref(), Some("from form"));
    assert!(payload.embeds.is_none());
}
