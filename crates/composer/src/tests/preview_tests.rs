use chrono::{FixedOffset, Utc};
use shared::domain::{ButtonPreset, EmbedAuthor, EmbedField, EmbedFooter};

use super::*;
use crate::{markdown::SpanStyle, payload::build_at};

fn viewer_now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2024, 5, 1, 9, 5, 0)
        .unwrap()
}

fn render_embed(embed: &EmbedCard) -> RenderedPreview {
    render_at(&WebhookIdentity::default(), "", embed, &[], &viewer_now())
}

#[test]
fn blank_form_renders_empty_state_with_default_identity() {
    let preview = render_embed(&EmbedCard::blank());
    assert!(preview.is_empty());
    assert_eq!(preview.header.display_name, "Webhook");
    assert_eq!(preview.header.avatar.initial, 'B');
    assert_eq!(preview.header.avatar.image_url, None);
    assert_eq!(preview.header.badge, "BOT");
    assert_eq!(preview.header.sent_label, "Today at 09:05");
}

#[test]
fn avatar_initial_comes_from_display_name() {
    let identity = WebhookIdentity {
        display_name: "élan bot".into(),
        avatar_url: "https://cdn.example/a.png".into(),
        ..WebhookIdentity::default()
    };
    let preview = render_at(&identity, "", &EmbedCard::blank(), &[], &viewer_now());
    assert_eq!(preview.header.display_name, "élan bot");
    assert_eq!(preview.header.avatar.initial, 'É');
    assert_eq!(
        preview.header.avatar.image_url.as_deref(),
        Some("https://cdn.example/a.png")
    );
}

#[test]
fn content_is_formatted() {
    let preview = render_at(
        &WebhookIdentity::default(),
        "**hi** and *there*",
        &EmbedCard::blank(),
        &[],
        &viewer_now(),
    );
    let content = preview.content.as_ref().expect("content");
    let styles: Vec<SpanStyle> = content.spans().map(|span| span.style).collect();
    assert!(styles[0].bold);
    assert!(styles[1].is_plain());
    assert!(styles[2].italic);
    assert!(!preview.is_empty());
}

#[test]
fn invalid_color_falls_back_to_neutral_border() {
    let embed = EmbedCard {
        title: "t".into(),
        color: "#12".into(),
        ..EmbedCard::blank()
    };
    assert_eq!(render_embed(&embed).embed.unwrap().accent, NEUTRAL_BORDER);

    let embed = EmbedCard {
        title: "t".into(),
        ..EmbedCard::default()
    };
    assert_eq!(render_embed(&embed).embed.unwrap().accent, Rgb(0x58, 0x65, 0xF2));
}

#[test]
fn color_only_embed_is_still_shown() {
    let preview = render_embed(&EmbedCard::default());
    let embed = preview.embed.expect("embed");
    assert!(embed.title.is_none());
    assert!(embed.footer.is_none());
}

#[test]
fn fields_keep_order_and_width() {
    let embed = EmbedCard {
        fields: vec![
            EmbedField::new("A", "", false),
            EmbedField::new("B", "V", true),
            EmbedField::new("C", "W", false),
        ],
        ..EmbedCard::blank()
    };
    let fields = render_embed(&embed).embed.unwrap().fields;
    let summary: Vec<(String, FieldWidth)> = fields
        .iter()
        .map(|cell| (cell.name.plain_text(), cell.width))
        .collect();
    assert_eq!(
        summary,
        [("B".to_string(), FieldWidth::Half), ("C".to_string(), FieldWidth::Full)]
    );
}

#[test]
fn footer_joins_text_and_viewer_local_time() {
    let embed = EmbedCard {
        footer: EmbedFooter {
            text: "ci".into(),
            icon_url: "https://cdn.example/ci.png".into(),
        },
        include_timestamp: true,
        ..EmbedCard::blank()
    };
    let footer = render_embed(&embed).embed.unwrap().footer.unwrap();
    assert_eq!(footer.to_string(), "ci • 01/05/2024 09:05");
    assert_eq!(footer.icon_url.as_deref(), Some("https://cdn.example/ci.png"));
}

#[test]
fn timestamp_only_footer_has_no_icon() {
    let embed = EmbedCard {
        footer: EmbedFooter {
            text: String::new(),
            icon_url: "https://cdn.example/ci.png".into(),
        },
        include_timestamp: true,
        ..EmbedCard::blank()
    };
    let footer = render_embed(&embed).embed.unwrap().footer.unwrap();
    assert_eq!(footer.to_string(), "01/05/2024 09:05");
    assert_eq!(footer.icon_url, None);
}

#[test]
fn buttons_map_styles_to_appearances_and_stay_inert() {
    let buttons: Vec<ButtonSpec> = ButtonPreset::ALL.iter().map(|preset| preset.button()).collect();
    let preview = render_at(
        &WebhookIdentity::default(),
        "",
        &EmbedCard::blank(),
        &buttons,
        &viewer_now(),
    );
    let labels: Vec<&str> = preview.buttons.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(
        labels,
        ["New Button", "Positive Update", "Rebalance Update", "Disabled Update"]
    );
    assert!(matches!(
        preview.buttons[0].appearance,
        ButtonAppearance::Outline { .. }
    ));
    assert_eq!(preview.buttons[0].hint.as_deref(), Some("https://example.com"));
    for button in &preview.buttons[1..] {
        assert!(matches!(button.appearance, ButtonAppearance::Solid { .. }));
        assert_eq!(button.hint, None);
    }
}

fn parity_cases() -> Vec<EmbedCard> {
    let full = EmbedCard {
        title: "Title".into(),
        description: "Body".into(),
        color: "#d63031".into(),
        footer: EmbedFooter {
            text: "foot".into(),
            icon_url: "https://cdn.example/f.png".into(),
        },
        thumbnail_url: "https://cdn.example/t.png".into(),
        image_url: "https://cdn.example/i.png".into(),
        author: EmbedAuthor {
            name: "Author".into(),
            icon_url: "https://cdn.example/a.png".into(),
            url: "https://author.example".into(),
        },
        fields: vec![EmbedField::new("k", "v", true), EmbedField::new("", "x", false)],
        include_timestamp: true,
    };

    let mut cases = vec![EmbedCard::blank(), EmbedCard::default(), full.clone()];
    cases.push(EmbedCard {
        color: "zzzzzz".into(),
        ..full.clone()
    });
    cases.push(EmbedCard {
        footer: EmbedFooter {
            text: String::new(),
            icon_url: "https://cdn.example/f.png".into(),
        },
        ..EmbedCard::blank()
    });
    cases.push(EmbedCard {
        author: EmbedAuthor {
            name: String::new(),
            icon_url: "https://cdn.example/a.png".into(),
            url: String::new(),
        },
        image_url: "https://cdn.example/i.png".into(),
        ..EmbedCard::blank()
    });
    cases.push(EmbedCard {
        fields: vec![EmbedField::new("only name", "", true)],
        ..EmbedCard::blank()
    });
    cases.push(EmbedCard {
        include_timestamp: true,
        ..EmbedCard::blank()
    });
    cases.push(EmbedCard {
        title: "\u{E000}".into(),
        fields: vec![EmbedField::new("\u{E001}", "v", false)],
        ..EmbedCard::blank()
    });
    cases
}

#[test]
fn preview_and_payload_agree_on_every_embed_part() {
    let now = Utc::now();
    for card in parity_cases() {
        let payload = build_at(&WebhookIdentity::default(), "", &card, &[], now);
        let preview = render_at(&WebhookIdentity::default(), "", &card, &[], &now);

        let built = payload.embed();
        let shown = preview.embed.as_ref();
        assert_eq!(built.is_some(), shown.is_some(), "embed presence for {card:?}");
        let (Some(built), Some(shown)) = (built, shown) else {
            continue;
        };

        assert_eq!(built.title.is_some(), shown.title.is_some(), "title");
        assert_eq!(built.description.is_some(), shown.description.is_some(), "description");
        assert_eq!(built.thumbnail.is_some(), shown.thumbnail_url.is_some(), "thumbnail");
        assert_eq!(built.image.is_some(), shown.image_url.is_some(), "image");
        assert_eq!(built.author.is_some(), shown.author.is_some(), "author");
        assert_eq!(
            built.author.as_ref().and_then(|a| a.icon_url.clone()),
            shown.author.as_ref().and_then(|a| a.icon_url.clone()),
            "author icon"
        );
        assert_eq!(
            built.fields.as_ref().map_or(0, Vec::len),
            shown.fields.len(),
            "fields"
        );
        assert_eq!(
            built.footer.as_ref().map(|f| f.text.clone()),
            shown.footer.as_ref().and_then(|f| f.text.clone()),
            "footer text"
        );
        assert_eq!(
            built.footer.as_ref().and_then(|f| f.icon_url.clone()),
            shown.footer.as_ref().and_then(|f| f.icon_url.clone()),
            "footer icon"
        );
        assert_eq!(
            built.timestamp.is_some(),
            shown.footer.as_ref().is_some_and(|f| f.timestamp.is_some()),
            "timestamp"
        );
        assert_eq!(
            built.color.map_or(NEUTRAL_BORDER, Rgb::from_u32),
            shown.accent,
            "color"
        );
    }
}

#[test]
fn preview_caps_buttons_like_the_payload() {
    let buttons = vec![ButtonPreset::Rebalance.button(); 6];
    let preview = render_at(
        &WebhookIdentity::default(),
        "",
        &EmbedCard::blank(),
        &buttons,
        &viewer_now(),
    );
    assert_eq!(preview.buttons.len(), MAX_BUTTONS_PER_ROW);
}

#[test]
fn private_use_characters_render_like_any_other_text() {
    let card = EmbedCard {
        title: "\u{E000}".into(),
        fields: vec![EmbedField::new("\u{E001}", "v", false)],
        ..EmbedCard::blank()
    };
    let now = Utc::now();
    let payload = build_at(&WebhookIdentity::default(), "\u{E002}", &card, &[], now);
    let preview = render_at(&WebhookIdentity::default(), "\u{E002}", &card, &[], &now);

    assert_eq!(payload.content.as_deref(), Some("\u{E002}"));
    assert_eq!(
        preview.content.as_ref().map(MarkedUpText::plain_text).as_deref(),
        Some("\u{E002}")
    );

    let embed = preview.embed.as_ref().expect("embed");
    assert_eq!(
        embed.title.as_ref().map(MarkedUpText::plain_text).as_deref(),
        Some("\u{E000}")
    );
    assert_eq!(embed.fields.len(), 1);
    assert_eq!(embed.fields[0].name.plain_text(), "\u{E001}");
    assert_eq!(embed.fields[0].value.plain_text(), "v");
}
