//! Editor panels on the left side of the window.
//!
//! Each section edits a clone of its part of the form and writes it back only
//! when something changed, so the form always holds whole values.

use chrono::Local;
use composer::{
    insert_snippet, preview::DEFAULT_DISPLAY_NAME, timestamp, wrap_selection, Delimiter, Selection,
    TimestampStyle,
};
use eframe::egui;
use shared::{
    domain::{ButtonPreset, ButtonStyle, COLOR_PRESETS},
    form::MAX_BUTTONS,
    presets::{NewPreset, PresetKind, ROLE_FORMAT_EXAMPLES},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};
use crate::ui::app::WebhookStudioApp;

const CONTENT_EDITOR_ID: &str = "content_editor";
const DESCRIPTION_EDITOR_ID: &str = "description_editor";

fn labeled_singleline(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) {
    ui.label(label);
    ui.add(
        egui::TextEdit::singleline(value)
            .id_salt(label)
            .hint_text(hint)
            .desired_width(f32::INFINITY),
    );
}

/// Selection last reported by the text edit with `id`; the end of the text
/// when the edit has never been focused.
fn editor_selection(ctx: &egui::Context, id: egui::Id) -> Selection {
    egui::TextEdit::load_state(ctx, id)
        .and_then(|state| state.cursor.char_range())
        .map(|range| Selection::new(range.primary.index, range.secondary.index))
        .unwrap_or_else(|| Selection::caret(usize::MAX))
}

fn set_editor_selection(ctx: &egui::Context, id: egui::Id, selection: Selection) {
    let mut state = egui::TextEdit::load_state(ctx, id).unwrap_or_default();
    state
        .cursor
        .set_char_range(Some(egui::text::CCursorRange::two(
            egui::text::CCursor::new(selection.start),
            egui::text::CCursor::new(selection.end),
        )));
    state.store(ctx, id);
    ctx.memory_mut(|memory| memory.request_focus(id));
}

/// Bold / italic / underline / strikethrough buttons for the editor with `id`.
fn formatting_toolbar(ui: &mut egui::Ui, id: egui::Id, text: &mut String) {
    ui.horizontal(|ui| {
        for delimiter in Delimiter::ALL {
            let button = ui
                .button(egui::RichText::new(delimiter.glyph()).monospace())
                .on_hover_text(delimiter.label());
            if button.clicked() {
                let wrapped = wrap_selection(text, editor_selection(ui.ctx(), id), delimiter);
                *text = wrapped.text;
                set_editor_selection(ui.ctx(), id, wrapped.selection);
            }
        }
    });
}

fn insert_at_cursor(ctx: &egui::Context, id: egui::Id, text: &mut String, snippet: &str) {
    let inserted = insert_snippet(text, editor_selection(ctx, id), snippet);
    *text = inserted.text;
    set_editor_selection(ctx, id, inserted.selection);
}

impl WebhookStudioApp {
    pub(crate) fn show_editor(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .id_salt("editor_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.show_webhook_section(ui);
                self.show_content_section(ui);
                self.show_embed_section(ui);
                self.show_buttons_section(ui);
                self.show_timestamp_section(ui);
                self.show_saved_embeds_section(ui);
                self.show_roles_section(ui);
            });
    }

    fn show_webhook_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Webhook")
            .default_open(true)
            .show(ui, |ui| {
                let mut identity = self.form.identity().clone();
                let mut remove: Option<String> = None;

                for preset in &self.presets.webhooks {
                    ui.horizontal(|ui| {
                        let selected = identity.endpoint_url == preset.url;
                        if ui
                            .selectable_label(selected, &preset.name)
                            .on_hover_text(&preset.url)
                            .clicked()
                        {
                            identity.endpoint_url = preset.url.clone();
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Delete").clicked() {
                                remove = Some(preset.id.clone());
                            }
                        });
                    });
                }

                labeled_singleline(
                    ui,
                    "Webhook URL",
                    &mut identity.endpoint_url,
                    "https://discord.com/api/webhooks/...",
                );
                labeled_singleline(ui, "Display name", &mut identity.display_name, DEFAULT_DISPLAY_NAME);
                labeled_singleline(ui, "Avatar URL", &mut identity.avatar_url, "https://...");

                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.drafts.webhook_name)
                            .id_salt("webhook_preset_name")
                            .hint_text("Name for this webhook")
                            .desired_width(180.0),
                    );
                    if ui.button("Save webhook").clicked() {
                        let preset = NewPreset::Webhook {
                            name: self.drafts.webhook_name.trim().to_string(),
                            url: identity.endpoint_url.trim().to_string(),
                        };
                        if self.save_preset(preset) {
                            self.drafts.webhook_name.clear();
                        }
                    }
                });

                if identity != *self.form.identity() {
                    self.form.set_identity(identity);
                }
                if let Some(id) = remove {
                    self.queue(BackendCommand::RemovePreset {
                        kind: PresetKind::Webhooks,
                        id,
                    });
                }
            });
    }

    fn show_content_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Message content")
            .default_open(true)
            .show(ui, |ui| {
                let id = egui::Id::new(CONTENT_EDITOR_ID);
                let mut content = self.form.content().to_string();
                formatting_toolbar(ui, id, &mut content);
                ui.add(
                    egui::TextEdit::multiline(&mut content)
                        .id(id)
                        .hint_text("Plain text sent above the embed")
                        .desired_rows(4)
                        .desired_width(f32::INFINITY),
                );
                if content != self.form.content() {
                    self.form.set_content(content);
                }
            });
    }

    fn show_embed_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Embed")
            .default_open(true)
            .show(ui, |ui| {
                let mut embed = self.form.embed().clone();

                labeled_singleline(ui, "Title", &mut embed.title, "Embed title");

                ui.label("Description");
                let id = egui::Id::new(DESCRIPTION_EDITOR_ID);
                formatting_toolbar(ui, id, &mut embed.description);
                ui.add(
                    egui::TextEdit::multiline(&mut embed.description)
                        .id(id)
                        .hint_text("Supports **bold**, *italic*, __underline__ and ~~strikethrough~~")
                        .desired_rows(4)
                        .desired_width(f32::INFINITY),
                );

                ui.label("Colour");
                ui.horizontal_wrapped(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut embed.color)
                            .id_salt("embed_color")
                            .hint_text("#5865F2")
                            .desired_width(90.0),
                    );
                    for preset in COLOR_PRESETS {
                        let swatch = composer::Rgb::parse(preset.hex)
                            .map(crate::ui::theme::color32)
                            .unwrap_or(egui::Color32::GRAY);
                        let button = egui::Button::new("")
                            .fill(swatch)
                            .min_size(egui::vec2(22.0, 22.0));
                        if ui.add(button).on_hover_text(preset.name).clicked() {
                            embed.color = preset.hex.to_string();
                        }
                    }
                });

                ui.checkbox(&mut embed.include_timestamp, "Include current time");

                ui.separator();
                ui.label(egui::RichText::new("Fields").strong());
                let mut remove: Option<usize> = None;
                for (index, field) in embed.fields.iter_mut().enumerate() {
                    egui::Frame::NONE
                        .fill(ui.visuals().faint_bg_color)
                        .corner_radius(6.0)
                        .inner_margin(egui::Margin::symmetric(8, 6))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.add(
                                    egui::TextEdit::singleline(&mut field.name)
                                        .id_salt(("field_name", index))
                                        .hint_text("Name")
                                        .desired_width(140.0),
                                );
                                ui.checkbox(&mut field.inline, "Inline");
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.small_button("Remove").clicked() {
                                            remove = Some(index);
                                        }
                                    },
                                );
                            });
                            ui.add(
                                egui::TextEdit::multiline(&mut field.value)
                                    .id_salt(("field_value", index))
                                    .hint_text("Value")
                                    .desired_rows(2)
                                    .desired_width(f32::INFINITY),
                            );
                        });
                }
                let add_field = ui.button("Add field").clicked();

                ui.separator();
                egui::CollapsingHeader::new("Advanced")
                    .id_salt("embed_advanced")
                    .default_open(false)
                    .show(ui, |ui| {
                        labeled_singleline(ui, "Author name", &mut embed.author.name, "");
                        labeled_singleline(ui, "Author icon URL", &mut embed.author.icon_url, "https://...");
                        labeled_singleline(ui, "Author link", &mut embed.author.url, "https://...");
                        labeled_singleline(ui, "Thumbnail URL", &mut embed.thumbnail_url, "https://...");
                        labeled_singleline(ui, "Image URL", &mut embed.image_url, "https://...");
                        labeled_singleline(ui, "Footer text", &mut embed.footer.text, "");
                        labeled_singleline(ui, "Footer icon URL", &mut embed.footer.icon_url, "https://...");
                    });

                if embed != *self.form.embed() {
                    self.form.set_embed(embed);
                }
                if let Some(index) = remove {
                    if let Err(err) = self.form.remove_field(index) {
                        tracing::warn!("{err}");
                    }
                }
                if add_field {
                    self.form.add_field();
                }
            });
    }

    fn show_buttons_section(&mut self, ui: &mut egui::Ui) {
        let title = format!("Buttons ({}/{MAX_BUTTONS})", self.form.buttons().len());
        egui::CollapsingHeader::new(title)
            .id_salt("buttons_section")
            .default_open(false)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    egui::ComboBox::from_id_salt("button_preset_picker")
                        .selected_text(self.drafts.button_preset.label())
                        .show_ui(ui, |ui| {
                            for preset in ButtonPreset::ALL {
                                ui.selectable_value(&mut self.drafts.button_preset, preset, preset.label());
                            }
                        });
                    let add = ui.add_enabled(self.form.can_add_button(), egui::Button::new("Add button"));
                    if add.clicked() {
                        if let Err(err) = self.form.add_button(self.drafts.button_preset.button()) {
                            self.show_error(&UiError::from_message(UiErrorContext::General, err.to_string()));
                        }
                    }
                });
                if !self.form.can_add_button() {
                    ui.label(
                        egui::RichText::new(format!("A message holds at most {MAX_BUTTONS} buttons."))
                            .small()
                            .weak(),
                    );
                }

                let mut buttons = self.form.buttons().to_vec();
                let mut remove: Option<usize> = None;
                for (index, button) in buttons.iter_mut().enumerate() {
                    egui::Frame::NONE
                        .fill(ui.visuals().faint_bg_color)
                        .corner_radius(6.0)
                        .inner_margin(egui::Margin::symmetric(8, 6))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.add(
                                    egui::TextEdit::singleline(&mut button.label)
                                        .id_salt(("button_label", index))
                                        .hint_text("Label")
                                        .desired_width(140.0),
                                );
                                egui::ComboBox::from_id_salt(("button_style", index))
                                    .selected_text(button.style.label())
                                    .show_ui(ui, |ui| {
                                        for style in ButtonStyle::ALL {
                                            ui.selectable_value(&mut button.style, style, style.label());
                                        }
                                    });
                                if ui.small_button("Remove").clicked() {
                                    remove = Some(index);
                                }
                            });
                            if button.style.is_link() {
                                ui.add(
                                    egui::TextEdit::singleline(&mut button.url)
                                        .id_salt(("button_url", index))
                                        .hint_text("https://...")
                                        .desired_width(f32::INFINITY),
                                );
                            } else {
                                ui.add(
                                    egui::TextEdit::singleline(&mut button.custom_id)
                                        .id_salt(("button_custom_id", index))
                                        .hint_text("custom_id")
                                        .desired_width(f32::INFINITY),
                                );
                            }
                        });
                }

                if let Some(index) = remove {
                    if let Err(err) = self.form.remove_button(index) {
                        tracing::warn!("{err}");
                    }
                } else if buttons.as_slice() != self.form.buttons() {
                    if let Err(err) = self.form.set_buttons(buttons) {
                        self.show_error(&UiError::from_message(UiErrorContext::General, err.to_string()));
                    }
                }
            });
    }

    fn show_timestamp_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Timestamps")
            .default_open(false)
            .show(ui, |ui| {
                ui.label(
                    egui::RichText::new("Dynamic timestamps adapt to each reader's time zone.")
                        .small()
                        .weak(),
                );
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.drafts.timestamp_date)
                            .id_salt("timestamp_date")
                            .hint_text("YYYY-MM-DD")
                            .desired_width(110.0),
                    );
                    ui.add(
                        egui::TextEdit::singleline(&mut self.drafts.timestamp_time)
                            .id_salt("timestamp_time")
                            .hint_text(timestamp::DEFAULT_TIME)
                            .desired_width(70.0),
                    );
                    egui::ComboBox::from_id_salt("timestamp_style")
                        .selected_text(self.drafts.timestamp_style.label())
                        .show_ui(ui, |ui| {
                            for style in TimestampStyle::ALL {
                                ui.selectable_value(
                                    &mut self.drafts.timestamp_style,
                                    style,
                                    format!("{} ({})", style.label(), style.example()),
                                );
                            }
                        });
                });

                let generated = timestamp::generate(
                    &self.drafts.timestamp_date,
                    &self.drafts.timestamp_time,
                    self.drafts.timestamp_style,
                    &Local,
                );
                match generated {
                    Ok(Some(token)) => {
                        let token_text = token.to_string();
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(&token_text).monospace().strong());
                            if let Some(rendered) = token.preview(&Local, &Local::now()) {
                                ui.label(egui::RichText::new(format!("→ {rendered}")).weak());
                            }
                        });
                        ui.horizontal(|ui| {
                            if ui.button("Copy").clicked() {
                                self.copy_to_clipboard(&token_text, "Timestamp copied");
                            }
                            if ui.button("Insert into content").clicked() {
                                let mut content = self.form.content().to_string();
                                insert_at_cursor(
                                    ui.ctx(),
                                    egui::Id::new(CONTENT_EDITOR_ID),
                                    &mut content,
                                    &token_text,
                                );
                                self.form.set_content(content);
                            }
                        });
                    }
                    Ok(None) => {
                        ui.label(egui::RichText::new("Pick a date to generate a token.").weak());
                    }
                    Err(err) => {
                        let color = ui.visuals().error_fg_color;
                        ui.colored_label(color, err.to_string());
                    }
                }
            });
    }

    fn show_saved_embeds_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Saved embeds")
            .default_open(false)
            .show(ui, |ui| {
                let mut load = None;
                let mut remove: Option<String> = None;
                if self.presets.embeds.is_empty() {
                    ui.label(egui::RichText::new("No saved embeds yet.").weak());
                }
                for template in &self.presets.embeds {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&template.name).strong());
                        ui.label(egui::RichText::new(&template.created_at).small().weak());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Delete").clicked() {
                                remove = Some(template.id.clone());
                            }
                            if ui.small_button("Load").clicked() {
                                load = Some(template.data.clone());
                            }
                        });
                    });
                }

                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.drafts.embed_name)
                            .id_salt("embed_preset_name")
                            .hint_text("Name for the current embed")
                            .desired_width(180.0),
                    );
                    if ui.button("Save embed").clicked() {
                        let preset = NewPreset::Embed {
                            name: self.drafts.embed_name.trim().to_string(),
                            data: self.form.embed().clone(),
                        };
                        if self.save_preset(preset) {
                            self.drafts.embed_name.clear();
                        }
                    }
                });

                if let Some(embed) = load {
                    self.form.set_embed(embed);
                }
                if let Some(id) = remove {
                    self.queue(BackendCommand::RemovePreset {
                        kind: PresetKind::Embeds,
                        id,
                    });
                }
            });
    }

    fn show_roles_section(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Roles")
            .default_open(false)
            .show(ui, |ui| {
                let mut copy: Option<String> = None;
                let mut insert: Option<String> = None;
                let mut remove: Option<String> = None;
                for role in &self.presets.roles {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(&role.name).strong());
                        ui.label(egui::RichText::new(&role.format).monospace().weak());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button("Delete").clicked() {
                                remove = Some(role.id.clone());
                            }
                            if ui.small_button("Insert").clicked() {
                                insert = Some(role.format.clone());
                            }
                            if ui.small_button("Copy").clicked() {
                                copy = Some(role.format.clone());
                            }
                        });
                    });
                }

                ui.add(
                    egui::TextEdit::singleline(&mut self.drafts.role_name)
                        .id_salt("role_preset_name")
                        .hint_text("Role name")
                        .desired_width(f32::INFINITY),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut self.drafts.role_format)
                        .id_salt("role_preset_format")
                        .hint_text(ROLE_FORMAT_EXAMPLES[0].1)
                        .desired_width(f32::INFINITY),
                );
                ui.horizontal_wrapped(|ui| {
                    for (name, example) in ROLE_FORMAT_EXAMPLES {
                        ui.label(egui::RichText::new(format!("{name}: {example}")).small().weak());
                    }
                });
                if ui.button("Save role").clicked() {
                    let preset = NewPreset::Role {
                        name: self.drafts.role_name.trim().to_string(),
                        format: self.drafts.role_format.trim().to_string(),
                    };
                    if self.save_preset(preset) {
                        self.drafts.role_name.clear();
                        self.drafts.role_format.clear();
                    }
                }

                if let Some(format) = copy {
                    self.copy_to_clipboard(&format, "Role format copied");
                }
                if let Some(format) = insert {
                    let mut content = self.form.content().to_string();
                    insert_at_cursor(ui.ctx(), egui::Id::new(CONTENT_EDITOR_ID), &mut content, &format);
                    self.form.set_content(content);
                }
                if let Some(id) = remove {
                    self.queue(BackendCommand::RemovePreset {
                        kind: PresetKind::Roles,
                        id,
                    });
                }
            });
    }

    /// Validates locally so an incomplete preset never reaches the store.
    fn save_preset(&mut self, preset: NewPreset) -> bool {
        if let Err(err) = preset.validate() {
            self.show_error(&UiError::from_message(UiErrorContext::Presets, err.to_string()));
            return false;
        }
        self.queue(BackendCommand::AddPreset(preset))
    }
}
