//! UI theme constants, light/dark palettes and emoji lookups

use egui::{Color32, CornerRadius, Stroke, Vec2};

pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);
pub const WARNING: Color32 = Color32::from_rgb(234, 179, 8);

pub const PANEL_ROUNDING: CornerRadius = CornerRadius::same(6);
pub const BUBBLE_ROUNDING: CornerRadius = CornerRadius::same(12);
pub const PANEL_PADDING: Vec2 = Vec2::new(12.0, 8.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Label for the button that switches away from this mode
    pub fn toggle_label(self) -> &'static str {
        match self {
            ThemeMode::Light => "🌙 Dark",
            ThemeMode::Dark => "☀ Light",
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }
}

pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_surface: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub accent: Color32,
    pub user_bubble: Color32,
    pub user_text: Color32,
    pub code_bg: Color32,
    pub code_fg: Color32,
}

pub const LIGHT: Palette = Palette {
    bg_primary: Color32::from_rgb(250, 250, 252),
    bg_secondary: Color32::from_rgb(241, 242, 246),
    bg_surface: Color32::from_rgb(228, 229, 235),
    text_primary: Color32::from_rgb(24, 24, 27),
    text_secondary: Color32::from_rgb(100, 100, 110),
    accent: Color32::from_rgb(99, 102, 241),
    user_bubble: Color32::from_rgb(99, 102, 241),
    user_text: Color32::WHITE,
    code_bg: Color32::from_rgb(30, 30, 36),
    code_fg: Color32::from_rgb(220, 220, 228),
};

pub const DARK: Palette = Palette {
    bg_primary: Color32::from_rgb(24, 24, 27),
    bg_secondary: Color32::from_rgb(39, 39, 42),
    bg_surface: Color32::from_rgb(52, 52, 56),
    text_primary: Color32::from_rgb(228, 228, 231),
    text_secondary: Color32::from_rgb(161, 161, 170),
    accent: Color32::from_rgb(129, 140, 248),
    user_bubble: Color32::from_rgb(79, 70, 229),
    user_text: Color32::WHITE,
    code_bg: Color32::from_rgb(15, 15, 18),
    code_fg: Color32::from_rgb(180, 230, 180),
};

/// Apply the palette for `mode` to an egui context
pub fn apply_theme(ctx: &egui::Context, mode: ThemeMode) {
    let palette = mode.palette();
    let mut style = (*ctx.style()).clone();

    style.visuals.dark_mode = mode == ThemeMode::Dark;
    style.visuals.panel_fill = palette.bg_primary;
    style.visuals.window_fill = palette.bg_secondary;
    style.visuals.extreme_bg_color = palette.bg_secondary;
    style.visuals.override_text_color = Some(palette.text_primary);

    style.visuals.widgets.inactive.bg_fill = palette.bg_surface;
    style.visuals.widgets.inactive.weak_bg_fill = palette.bg_surface;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, palette.text_secondary);
    style.visuals.widgets.hovered.bg_fill = palette.bg_surface;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, palette.text_primary);
    style.visuals.widgets.active.bg_fill = palette.accent;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, palette.text_primary);

    style.visuals.selection.bg_fill = palette.accent.linear_multiply(0.4);
    style.visuals.selection.stroke = Stroke::new(1.0, palette.accent);

    style.spacing.item_spacing = Vec2::new(8.0, 6.0);

    ctx.set_style(style);
}

// ─── Subject & Language Badges ───────────────────────────────

pub fn subject_icon(subject: &str) -> &'static str {
    match subject {
        "programming" => "💻",
        "mathematics" => "📊",
        "science" => "🔬",
        "literature" => "📖",
        "history" => "🏛",
        _ => "🎯",
    }
}

pub fn subject_color(subject: &str) -> Color32 {
    match subject {
        "programming" => Color32::from_rgb(0, 123, 255),
        "mathematics" => Color32::from_rgb(40, 167, 69),
        "science" => Color32::from_rgb(220, 53, 69),
        "literature" => Color32::from_rgb(111, 66, 193),
        "history" => Color32::from_rgb(253, 126, 20),
        _ => Color32::from_rgb(108, 117, 125),
    }
}

/// Flag for an ISO 639-1 code as reported by the backend
pub fn language_flag(code: &str) -> &'static str {
    match code {
        "en" => "🇺🇸",
        "bn" => "🇧🇩",
        "hi" | "te" | "mr" | "ta" | "gu" | "kn" | "ml" | "pa" | "or" => "🇮🇳",
        _ => "🌐",
    }
}
