//! Paints a [`RenderedPreview`] the way the chat client lays out a webhook message.
//!
//! The preview always uses the client's dark palette, whatever the editor theme.

use composer::{
    preview::{
        Avatar, ButtonAppearance, ButtonPreview, EmbedPreview, FieldCell, FieldWidth, MessageHeader,
        BOT_BADGE_FILL, EMBED_BACKGROUND, MESSAGE_BACKGROUND,
    },
    MarkedUpText, RenderedPreview, SpanStyle,
};
use eframe::egui;

use crate::media::{ImageSlot, RemoteImages};
use crate::ui::theme::color32;

const TEXT: egui::Color32 = egui::Color32::from_rgb(0xDB, 0xDE, 0xE1);
const STRONG_TEXT: egui::Color32 = egui::Color32::from_rgb(0xF2, 0xF3, 0xF5);
const MUTED_TEXT: egui::Color32 = egui::Color32::from_rgb(0x94, 0x9B, 0xA4);

const AVATAR_SIZE: f32 = 40.0;
const ICON_SIZE: f32 = 20.0;
const THUMBNAIL_EDGE: f32 = 80.0;
const EMBED_MAX_WIDTH: f32 = 520.0;
const ACCENT_BAR_WIDTH: f32 = 4.0;

pub fn show_message(ui: &mut egui::Ui, preview: &RenderedPreview, images: &mut RemoteImages) {
    egui::Frame::NONE
        .fill(color32(MESSAGE_BACKGROUND))
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(16, 12))
        .show(ui, |ui| {
            ui.horizontal_top(|ui| {
                show_avatar(ui, &preview.header.avatar, images);
                ui.vertical(|ui| {
                    show_header(ui, &preview.header);
                    if preview.is_empty() {
                        ui.label(
                            egui::RichText::new("Nothing to send yet")
                                .italics()
                                .color(MUTED_TEXT),
                        );
                    }
                    if let Some(content) = &preview.content {
                        ui.label(marked_up_job(content, 15.0, TEXT));
                    }
                    if let Some(embed) = &preview.embed {
                        ui.add_space(4.0);
                        show_embed(ui, embed, images);
                    }
                    if !preview.buttons.is_empty() {
                        ui.add_space(4.0);
                        show_buttons(ui, &preview.buttons);
                    }
                });
            });
        });
}

fn show_avatar(ui: &mut egui::Ui, avatar: &Avatar, images: &mut RemoteImages) {
    let size = egui::vec2(AVATAR_SIZE, AVATAR_SIZE);
    if let Some(url) = &avatar.image_url {
        if let ImageSlot::Ready(texture) = images.slot(url) {
            ui.add(
                egui::Image::from_texture(texture)
                    .fit_to_exact_size(size)
                    .corner_radius(AVATAR_SIZE / 2.0),
            );
            return;
        }
    }

    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    let painter = ui.painter();
    painter.circle_filled(rect.center(), AVATAR_SIZE / 2.0, color32(BOT_BADGE_FILL));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        avatar.initial,
        egui::FontId::proportional(18.0),
        egui::Color32::WHITE,
    );
}

fn show_header(ui: &mut egui::Ui, header: &MessageHeader) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(&header.display_name)
                .size(15.0)
                .strong()
                .color(STRONG_TEXT),
        );
        egui::Frame::NONE
            .fill(color32(BOT_BADGE_FILL))
            .corner_radius(3.0)
            .inner_margin(egui::Margin::symmetric(4, 1))
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new(header.badge)
                        .size(10.0)
                        .strong()
                        .color(egui::Color32::WHITE),
                );
            });
        ui.label(
            egui::RichText::new(&header.sent_label)
                .size(11.0)
                .color(MUTED_TEXT),
        );
    });
}

fn show_embed(ui: &mut egui::Ui, embed: &EmbedPreview, images: &mut RemoteImages) {
    let frame = egui::Frame::NONE
        .fill(color32(EMBED_BACKGROUND))
        .corner_radius(4.0)
        .inner_margin(egui::Margin {
            left: 16,
            right: 16,
            top: 12,
            bottom: 12,
        })
        .show(ui, |ui| {
            ui.set_max_width(EMBED_MAX_WIDTH);
            ui.horizontal_top(|ui| {
                ui.vertical(|ui| show_embed_body(ui, embed, images));
                if let Some(url) = &embed.thumbnail_url {
                    show_remote_image(ui, images, url, egui::vec2(THUMBNAIL_EDGE, THUMBNAIL_EDGE));
                }
            });
        });

    let rect = frame.response.rect;
    let bar = egui::Rect::from_min_max(
        rect.left_top(),
        egui::pos2(rect.left() + ACCENT_BAR_WIDTH, rect.bottom()),
    );
    ui.painter().rect_filled(
        bar,
        egui::CornerRadius {
            nw: 4,
            sw: 4,
            ne: 0,
            se: 0,
        },
        color32(embed.accent),
    );
}

fn show_embed_body(ui: &mut egui::Ui, embed: &EmbedPreview, images: &mut RemoteImages) {
    if let Some(author) = &embed.author {
        ui.horizontal(|ui| {
            if let Some(url) = &author.icon_url {
                show_icon(ui, images, url);
            }
            let name = egui::RichText::new(&author.name)
                .size(13.0)
                .strong()
                .color(STRONG_TEXT);
            match &author.url {
                Some(url) => {
                    ui.hyperlink_to(name, url);
                }
                None => {
                    ui.label(name);
                }
            }
        });
    }
    if let Some(title) = &embed.title {
        ui.label(marked_up_job(title, 16.0, STRONG_TEXT));
    }
    if let Some(description) = &embed.description {
        ui.label(marked_up_job(description, 14.0, TEXT));
    }

    for row in field_rows(&embed.fields) {
        ui.add_space(4.0);
        if let [single] = row.as_slice() {
            if single.width == FieldWidth::Full {
                show_field(ui, single);
                continue;
            }
        }
        ui.columns(2, |columns| {
            for (column, field) in columns.iter_mut().zip(row) {
                show_field(column, field);
            }
        });
    }

    if let Some(url) = &embed.image_url {
        ui.add_space(6.0);
        show_remote_image(ui, images, url, egui::vec2(EMBED_MAX_WIDTH - 32.0, 300.0));
    }

    if let Some(footer) = &embed.footer {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if let Some(url) = &footer.icon_url {
                show_icon(ui, images, url);
            }
            ui.label(egui::RichText::new(footer.to_string()).size(12.0).color(MUTED_TEXT));
        });
    }
}

fn show_field(ui: &mut egui::Ui, field: &FieldCell) {
    ui.vertical(|ui| {
        ui.label(marked_up_job(&field.name, 13.0, STRONG_TEXT));
        ui.label(marked_up_job(&field.value, 13.0, TEXT));
    });
}

/// Groups fields into display rows: consecutive half-width fields pair up,
/// a full-width field always sits alone.
pub fn field_rows(fields: &[FieldCell]) -> Vec<Vec<&FieldCell>> {
    let mut rows: Vec<Vec<&FieldCell>> = Vec::new();
    let mut pending: Vec<&FieldCell> = Vec::new();
    for field in fields {
        match field.width {
            FieldWidth::Half => {
                pending.push(field);
                if pending.len() == 2 {
                    rows.push(std::mem::take(&mut pending));
                }
            }
            FieldWidth::Full => {
                if !pending.is_empty() {
                    rows.push(std::mem::take(&mut pending));
                }
                rows.push(vec![field]);
            }
        }
    }
    if !pending.is_empty() {
        rows.push(pending);
    }
    rows
}

fn show_icon(ui: &mut egui::Ui, images: &mut RemoteImages, url: &str) {
    if let ImageSlot::Ready(texture) = images.slot(url) {
        ui.add(
            egui::Image::from_texture(texture)
                .fit_to_exact_size(egui::vec2(ICON_SIZE, ICON_SIZE))
                .corner_radius(ICON_SIZE / 2.0),
        );
    }
}

fn show_remote_image(ui: &mut egui::Ui, images: &mut RemoteImages, url: &str, max: egui::Vec2) {
    match images.slot(url) {
        ImageSlot::Ready(texture) => {
            ui.add(egui::Image::from_texture(texture).max_size(max).corner_radius(4.0));
        }
        ImageSlot::Pending => {
            ui.spinner();
        }
        ImageSlot::Broken => {}
    }
}

fn show_buttons(ui: &mut egui::Ui, buttons: &[ButtonPreview]) {
    ui.horizontal_wrapped(|ui| {
        for button in buttons {
            let (text_color, fill, stroke, label) = match button.appearance {
                ButtonAppearance::Solid { fill } => (
                    egui::Color32::WHITE,
                    color32(fill),
                    egui::Stroke::NONE,
                    button.label.clone(),
                ),
                ButtonAppearance::Outline { text, border } => (
                    color32(text),
                    egui::Color32::TRANSPARENT,
                    egui::Stroke::new(1.0, color32(border)),
                    format!("{} ↗", button.label),
                ),
            };
            let response = ui.add(
                egui::Button::new(egui::RichText::new(label).color(text_color))
                    .fill(fill)
                    .stroke(stroke)
                    .corner_radius(3.0)
                    .min_size(egui::vec2(60.0, 32.0))
                    .sense(egui::Sense::hover()),
            );
            if let Some(hint) = &button.hint {
                response.on_hover_text(hint);
            }
        }
    });
}

pub fn marked_up_job(text: &MarkedUpText, size: f32, color: egui::Color32) -> egui::text::LayoutJob {
    let font = egui::FontId::proportional(size);
    let mut job = egui::text::LayoutJob::default();
    for (index, line) in text.lines().iter().enumerate() {
        if index > 0 {
            job.append("\n", 0.0, span_format(SpanStyle::PLAIN, &font, color));
        }
        for span in line {
            job.append(&span.text, 0.0, span_format(span.style, &font, color));
        }
    }
    job
}

fn span_format(style: SpanStyle, font: &egui::FontId, color: egui::Color32) -> egui::TextFormat {
    let decoration = |on: bool| {
        if on {
            egui::Stroke::new(1.0, color)
        } else {
            egui::Stroke::NONE
        }
    };
    egui::TextFormat {
        font_id: font.clone(),
        // Default fonts carry no bold face.
        color: if style.bold { STRONG_TEXT } else { color },
        italics: style.italic,
        underline: decoration(style.underline),
        strikethrough: decoration(style.strikethrough),
        ..Default::default()
    }
}
