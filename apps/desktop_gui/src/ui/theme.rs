//! Editor themes and the appearance settings persisted through eframe storage.

use std::collections::BTreeMap;

use composer::Rgb;
use eframe::egui;
use serde::{Deserialize, Serialize};

pub const SETTINGS_STORAGE_KEY: &str = "webhook_studio.settings";

pub const DEFAULT_EDITOR_PANEL_WIDTH: f32 = 460.0;
pub const MIN_EDITOR_PANEL_WIDTH: f32 = 360.0;
pub const MAX_EDITOR_PANEL_WIDTH: f32 = 760.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemePreset {
    DiscordDark,
    DiscordLegacy,
    AtomOneDark,
    EguiLight,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 4] = [
        ThemePreset::DiscordDark,
        ThemePreset::DiscordLegacy,
        ThemePreset::AtomOneDark,
        ThemePreset::EguiLight,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ThemePreset::DiscordDark => "Discord (Dark)",
            ThemePreset::DiscordLegacy => "Discord (Legacy)",
            ThemePreset::AtomOneDark => "Atom One Dark",
            ThemePreset::EguiLight => "Egui Light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSettings {
    pub preset: ThemePreset,
    pub accent_color: egui::Color32,
    pub panel_rounding: u8,
    pub text_scale: f32,
    pub compact_density: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            preset: ThemePreset::DiscordDark,
            accent_color: egui::Color32::from_rgb(88, 101, 242),
            panel_rounding: 8,
            text_scale: 1.0,
            compact_density: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedSettings {
    pub theme_preset: ThemePreset,
    pub accent_color: [u8; 4],
    pub panel_rounding: u8,
    pub text_scale: f32,
    pub compact_density: bool,
    pub editor_panel_width: f32,
    /// Endpoint typed in the last session.
    pub last_endpoint_url: String,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self::from_runtime(ThemeSettings::default(), DEFAULT_EDITOR_PANEL_WIDTH, String::new())
    }
}

impl PersistedSettings {
    pub fn into_runtime(self) -> (ThemeSettings, f32, String) {
        let [r, g, b, a] = self.accent_color;
        (
            ThemeSettings {
                preset: self.theme_preset,
                accent_color: egui::Color32::from_rgba_unmultiplied(r, g, b, a),
                panel_rounding: self.panel_rounding.min(16),
                text_scale: self.text_scale.clamp(0.8, 1.4),
                compact_density: self.compact_density,
            },
            self.editor_panel_width
                .clamp(MIN_EDITOR_PANEL_WIDTH, MAX_EDITOR_PANEL_WIDTH),
            self.last_endpoint_url,
        )
    }

    pub fn from_runtime(theme: ThemeSettings, editor_panel_width: f32, last_endpoint_url: String) -> Self {
        Self {
            theme_preset: theme.preset,
            accent_color: theme.accent_color.to_array(),
            panel_rounding: theme.panel_rounding,
            text_scale: theme.text_scale,
            compact_density: theme.compact_density,
            editor_panel_width: editor_panel_width.clamp(MIN_EDITOR_PANEL_WIDTH, MAX_EDITOR_PANEL_WIDTH),
            last_endpoint_url,
        }
    }
}

pub fn color32(rgb: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

pub fn visuals_for_theme(theme: ThemeSettings) -> egui::Visuals {
    let mut visuals = match theme.preset {
        ThemePreset::DiscordDark => {
            let mut v = egui::Visuals::dark();
            v.override_text_color = Some(egui::Color32::from_rgb(251, 251, 251));
            v.window_fill = egui::Color32::from_rgb(26, 26, 30);
            v.panel_fill = egui::Color32::from_rgb(26, 26, 30);
            v.extreme_bg_color = egui::Color32::from_rgb(18, 18, 20);
            v.faint_bg_color = egui::Color32::from_rgb(29, 29, 30);
            v
        }
        ThemePreset::DiscordLegacy => {
            let mut v = egui::Visuals::dark();
            v.override_text_color = Some(egui::Color32::from_rgb(220, 221, 222));
            v.window_fill = egui::Color32::from_rgb(54, 57, 63);
            v.panel_fill = egui::Color32::from_rgb(47, 49, 54);
            v.extreme_bg_color = egui::Color32::from_rgb(32, 34, 37);
            v.faint_bg_color = egui::Color32::from_rgb(64, 68, 75);
            v
        }
        ThemePreset::AtomOneDark => {
            let mut v = egui::Visuals::dark();
            v.override_text_color = Some(egui::Color32::from_rgb(171, 178, 191));
            v.window_fill = egui::Color32::from_rgb(40, 44, 52);
            v.panel_fill = egui::Color32::from_rgb(33, 37, 43);
            v.extreme_bg_color = egui::Color32::from_rgb(24, 26, 31);
            v.faint_bg_color = egui::Color32::from_rgb(52, 57, 66);
            v
        }
        ThemePreset::EguiLight => egui::Visuals::light(),
    };

    visuals.hyperlink_color = theme.accent_color;
    visuals.selection.bg_fill = theme.accent_color;
    visuals.widgets.active.bg_fill = theme.accent_color;
    visuals.widgets.hovered.bg_fill = theme.accent_color.gamma_multiply(0.85);

    let radius = egui::CornerRadius::same(theme.panel_rounding);
    visuals.widgets.noninteractive.corner_radius = radius;
    visuals.widgets.inactive.corner_radius = radius;
    visuals.widgets.hovered.corner_radius = radius;
    visuals.widgets.active.corner_radius = radius;
    visuals.widgets.open.corner_radius = radius;

    visuals
}

pub fn scaled_text_styles(text_scale: f32) -> BTreeMap<egui::TextStyle, egui::FontId> {
    let mut styles = egui::Style::default().text_styles;
    for font in styles.values_mut() {
        font.size *= text_scale;
    }
    styles
}
