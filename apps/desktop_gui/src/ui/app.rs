use std::time::{Duration, Instant};

use client_core::{NoticeKind, SubmitError, SubmitSession};
use composer::TimestampStyle;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{ButtonPreset, WebhookIdentity},
    form::FormState,
    presets::{EmbedTemplate, PresetKind, PresetRecord, RolePreset, WebhookPreset},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::media::RemoteImages;
use crate::ui::preview;
use crate::ui::theme::{
    scaled_text_styles, visuals_for_theme, PersistedSettings, ThemePreset, ThemeSettings,
    MAX_EDITOR_PANEL_WIDTH, MIN_EDITOR_PANEL_WIDTH, SETTINGS_STORAGE_KEY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

/// Saved presets as last reported by the backend worker.
#[derive(Debug, Default)]
pub struct PresetLists {
    pub webhooks: Vec<WebhookPreset>,
    pub roles: Vec<RolePreset>,
    pub embeds: Vec<EmbedTemplate>,
}

impl PresetLists {
    pub fn replace(&mut self, kind: PresetKind, records: Vec<PresetRecord>) {
        match kind {
            PresetKind::Webhooks => {
                self.webhooks = records
                    .into_iter()
                    .filter_map(|record| match record {
                        PresetRecord::Webhook(preset) => Some(preset),
                        _ => None,
                    })
                    .collect();
            }
            PresetKind::Roles => {
                self.roles = records
                    .into_iter()
                    .filter_map(|record| match record {
                        PresetRecord::Role(preset) => Some(preset),
                        _ => None,
                    })
                    .collect();
            }
            PresetKind::Embeds => {
                self.embeds = records
                    .into_iter()
                    .filter_map(|record| match record {
                        PresetRecord::Embed(template) => Some(template),
                        _ => None,
                    })
                    .collect();
            }
        }
    }
}

/// Scratch inputs of the editor panels that are not part of the message.
#[derive(Debug)]
pub(crate) struct EditorDrafts {
    pub webhook_name: String,
    pub role_name: String,
    pub role_format: String,
    pub embed_name: String,
    pub button_preset: ButtonPreset,
    pub timestamp_date: String,
    pub timestamp_time: String,
    pub timestamp_style: TimestampStyle,
}

impl Default for EditorDrafts {
    fn default() -> Self {
        Self {
            webhook_name: String::new(),
            role_name: String::new(),
            role_format: String::new(),
            embed_name: String::new(),
            button_preset: ButtonPreset::Custom,
            timestamp_date: String::new(),
            timestamp_time: composer::timestamp::DEFAULT_TIME.to_string(),
            timestamp_style: TimestampStyle::default(),
        }
    }
}

pub struct WebhookStudioApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    pub(crate) form: FormState,
    session: SubmitSession,
    pub(crate) presets: PresetLists,
    images: RemoteImages,
    pub(crate) drafts: EditorDrafts,
    status_banner: Option<StatusBanner>,
    theme: ThemeSettings,
    applied_theme: Option<ThemeSettings>,
    editor_panel_width: f32,
    settings_open: bool,
}

impl WebhookStudioApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        persisted: Option<PersistedSettings>,
        default_webhook_url: Option<String>,
    ) -> Self {
        let (theme, editor_panel_width, last_endpoint_url) =
            persisted.unwrap_or_default().into_runtime();
        let endpoint_url = if last_endpoint_url.trim().is_empty() {
            default_webhook_url.unwrap_or_default()
        } else {
            last_endpoint_url
        };

        let mut form = FormState::default();
        form.set_identity(WebhookIdentity {
            endpoint_url,
            ..WebhookIdentity::default()
        });

        Self {
            cmd_tx,
            ui_rx,
            form,
            session: SubmitSession::new(),
            presets: PresetLists::default(),
            images: RemoteImages::default(),
            drafts: EditorDrafts::default(),
            status_banner: None,
            theme,
            applied_theme: None,
            editor_panel_width,
            settings_open: false,
        }
    }

    pub(crate) fn queue(&mut self, cmd: BackendCommand) -> bool {
        match dispatch_backend_command(&self.cmd_tx, cmd) {
            Ok(()) => true,
            Err(err) => {
                self.show_error(&err);
                false
            }
        }
    }

    pub(crate) fn show_error(&mut self, err: &UiError) {
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Error,
            message: format!(
                "{} error ({}): {}",
                err_label(err.category()),
                err.context().label(),
                err.message()
            ),
        });
    }

    pub(crate) fn show_info(&mut self, message: impl Into<String>) {
        self.status_banner = Some(StatusBanner {
            severity: StatusBannerSeverity::Info,
            message: message.into(),
        });
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => self.show_info(message),
                UiEvent::Error(err) => self.show_error(&err),
                UiEvent::SendFinished(result) => {
                    self.session.finish(result, Instant::now());
                }
                UiEvent::PresetsLoaded { kind, records } => self.presets.replace(kind, records),
                UiEvent::ImageLoaded { url, image } => self.images.insert(ctx, url, image),
                UiEvent::ImageFailed { url, reason } => {
                    tracing::debug!(%url, %reason, "hiding broken preview image");
                    self.images.mark_broken(url);
                }
            }
        }
    }

    fn submit(&mut self) {
        match self.session.begin(&self.form, Instant::now()) {
            Ok(ticket) => {
                tracing::info!(endpoint = %ticket.endpoint_url, "submitting message");
                if !self.queue(BackendCommand::Send(ticket)) {
                    self.session.abandon(Instant::now());
                }
            }
            // The session has already posted its notice.
            Err(SubmitError::MissingEndpoint) => {}
            Err(SubmitError::AlreadyInFlight) => {
                tracing::debug!("submit ignored while a send is in flight");
            }
        }
    }

    fn request_wanted_images(&mut self) {
        let mut wanted = self.images.take_wanted().into_iter();
        while let Some(url) = wanted.next() {
            if !self.queue(BackendCommand::FetchImage { url: url.clone() }) {
                // Retried next frame.
                self.images.forget(&url);
                wanted.for_each(|rest| self.images.forget(&rest));
                break;
            }
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.theme) {
            return;
        }

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals_for_theme(self.theme);
        style.text_styles = scaled_text_styles(self.theme.text_scale);
        style.visuals.widgets.inactive.bg_stroke =
            egui::Stroke::new(1.0, style.visuals.widgets.noninteractive.bg_stroke.color);
        style.visuals.widgets.active.bg_stroke =
            egui::Stroke::new(1.2, style.visuals.selection.bg_fill.gamma_multiply(0.9));

        if self.theme.compact_density {
            style.spacing.item_spacing = egui::vec2(6.0, 4.0);
            style.spacing.button_padding = egui::vec2(8.0, 5.0);
        } else {
            style.spacing.item_spacing = egui::vec2(8.0, 6.0);
            style.spacing.button_padding = egui::vec2(10.0, 6.0);
        }
        ctx.set_style(style);
        self.applied_theme = Some(self.theme);
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("app_top_bar")
            .resizable(false)
            .frame(
                egui::Frame::new()
                    .fill(ctx.style().visuals.extreme_bg_color)
                    .inner_margin(egui::Margin::symmetric(10, 6)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Webhook Studio");
                    if ui.button("Settings").clicked() {
                        self.settings_open = !self.settings_open;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let in_flight = self.session.is_in_flight();
                        let label = if in_flight { "Sending..." } else { "Send" };
                        let send = ui.add_enabled(
                            !in_flight,
                            egui::Button::new(egui::RichText::new(label).strong())
                                .fill(self.theme.accent_color)
                                .min_size(egui::vec2(90.0, 28.0)),
                        );
                        if send.clicked() {
                            self.submit();
                        }
                        if in_flight {
                            ui.spinner();
                        }
                        self.show_notice(ui);
                    });
                });
            });
    }

    fn show_notice(&self, ui: &mut egui::Ui) {
        let Some(notice) = self.session.notice() else {
            return;
        };
        let (fill, stroke) = match notice.kind {
            NoticeKind::Success => (
                egui::Color32::from_rgb(36, 94, 62),
                egui::Color32::from_rgb(74, 160, 110),
            ),
            NoticeKind::Error => (
                egui::Color32::from_rgb(111, 53, 53),
                egui::Color32::from_rgb(175, 96, 96),
            ),
        };
        egui::Frame::NONE
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, stroke))
            .corner_radius(6.0)
            .inner_margin(egui::Margin::symmetric(8, 3))
            .show(ui, |ui| {
                ui.label(egui::RichText::new(notice.message).color(egui::Color32::WHITE));
            });
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            let (fill, stroke) = match banner.severity {
                StatusBannerSeverity::Error => (
                    egui::Color32::from_rgb(111, 53, 53),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)),
                ),
                StatusBannerSeverity::Info => (
                    egui::Color32::from_rgb(44, 62, 94),
                    egui::Stroke::new(1.0, egui::Color32::from_rgb(88, 116, 170)),
                ),
            };

            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(10, 8))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(&banner.message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.status_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(6.0);
        }
    }

    fn show_settings_window(&mut self, ctx: &egui::Context) {
        if !self.settings_open {
            return;
        }

        let mut open = self.settings_open;
        let mut theme = self.theme;
        egui::Window::new("Settings")
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .frame(
                egui::Frame::NONE
                    .fill(ctx.style().visuals.window_fill)
                    .stroke(egui::Stroke::new(1.0, ctx.style().visuals.window_stroke().color))
                    .corner_radius(egui::CornerRadius::same(theme.panel_rounding))
                    .inner_margin(egui::Margin::symmetric(12, 10)),
            )
            .show(ctx, |ui| {
                egui::ComboBox::from_id_salt("theme_preset_picker")
                    .selected_text(theme.preset.label())
                    .show_ui(ui, |ui| {
                        for preset in ThemePreset::ALL {
                            ui.selectable_value(&mut theme.preset, preset, preset.label());
                        }
                    });
                ui.horizontal(|ui| {
                    ui.label("Accent");
                    ui.color_edit_button_srgba(&mut theme.accent_color);
                });
                ui.add(egui::Slider::new(&mut theme.panel_rounding, 0..=16).text("Corner rounding"));
                ui.add(egui::Slider::new(&mut theme.text_scale, 0.8..=1.4).text("Text scale"));
                ui.checkbox(&mut theme.compact_density, "Compact spacing");
                if ui.button("Reset to defaults").clicked() {
                    theme = ThemeSettings::default();
                }
            });
        self.settings_open = open;
        self.theme = theme;
    }

    fn show_preview_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_status_banner(ui);
            egui::ScrollArea::vertical()
                .id_salt("preview_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("Preview").strong());
                    let rendered = composer::render_form_preview(&self.form);
                    preview::show_message(ui, &rendered, &mut self.images);

                    ui.add_space(12.0);
                    egui::CollapsingHeader::new("Payload JSON")
                        .id_salt("payload_json")
                        .default_open(false)
                        .show(ui, |ui| self.show_payload_json(ui));
                });
        });
    }

    fn show_payload_json(&mut self, ui: &mut egui::Ui) {
        let payload = composer::build_form_payload(&self.form);
        match payload.to_json_pretty() {
            Ok(json) => {
                if ui.button("Copy JSON").clicked() {
                    self.copy_to_clipboard(&json, "Payload copied");
                }
                ui.add(egui::Label::new(egui::RichText::new(json).monospace()).wrap());
            }
            Err(err) => {
                ui.label(format!("payload could not be serialised: {err}"));
            }
        }
    }

    pub(crate) fn copy_to_clipboard(&mut self, text: &str, done: &str) {
        let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
        match result {
            Ok(()) => self.show_info(done),
            Err(err) => {
                tracing::warn!("clipboard unavailable: {err}");
                self.show_error(&UiError::from_message(
                    UiErrorContext::General,
                    format!("could not copy to the clipboard: {err}"),
                ));
            }
        }
    }
}

impl eframe::App for WebhookStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);
        self.apply_theme_if_needed(ctx);
        self.session.clear_expired(Instant::now());

        self.show_top_bar(ctx);
        let editor = egui::SidePanel::left("editor_panel")
            .resizable(true)
            .default_width(self.editor_panel_width)
            .width_range(MIN_EDITOR_PANEL_WIDTH..=MAX_EDITOR_PANEL_WIDTH)
            .show(ctx, |ui| self.show_editor(ui));
        self.editor_panel_width = editor.response.rect.width();
        self.show_preview_panel(ctx);
        self.show_settings_window(ctx);
        self.request_wanted_images();

        let repaint_after = self
            .session
            .notice()
            .map(|notice| notice.remaining(Instant::now()))
            .unwrap_or(Duration::from_millis(100))
            .min(Duration::from_millis(100));
        ctx.request_repaint_after(repaint_after);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings = PersistedSettings::from_runtime(
            self.theme,
            self.editor_panel_width,
            self.form.identity().endpoint_url.clone(),
        );
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}
