// crates/vidcore-ui/src/theme.rs
use egui::style::{Selection, WidgetVisuals};
use egui::{Color32, Context, Stroke, Style, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────
pub const ACCENT:        Color32 = Color32::from_rgb( 25, 118, 210);
pub const ACCENT_DIM:    Color32 = Color32::from_rgb( 17,  82, 147);
pub const ACCENT_HOVER:  Color32 = Color32::from_rgb( 66, 150, 235);
pub const DANGER:        Color32 = Color32::from_rgb(211,  47,  47);

pub const DARK_BG_0:     Color32 = Color32::from_rgb( 12,  14,  18);
pub const DARK_BG_1:     Color32 = Color32::from_rgb( 18,  21,  27);
pub const DARK_BG_2:     Color32 = Color32::from_rgb( 26,  30,  38);
pub const DARK_BG_3:     Color32 = Color32::from_rgb( 36,  41,  52);
pub const DARK_BG_4:     Color32 = Color32::from_rgb( 48,  54,  68);

pub const DARK_TEXT:     Color32 = Color32::from_rgb(225, 228, 235);
pub const DARK_TEXT_DIM: Color32 = Color32::from_rgb(128, 134, 150);
pub const DARK_BORDER:   Color32 = Color32::from_rgb( 56,  62,  78);

/// Dark visuals with the blue accent. Called once at startup; the app pins
/// the theme preference so an OS light/dark switch does not undo it.
pub fn configure_style(ctx: &Context) {
    let mut style = Style::default();
    style.spacing.item_spacing     = egui::vec2(8.0, 6.0);
    style.spacing.window_margin    = egui::Margin::same(12);
    style.spacing.button_padding   = egui::vec2(12.0, 5.0);
    style.spacing.scroll.bar_width = 8.0;

    let mut v = Visuals::dark();
    v.panel_fill       = DARK_BG_1;
    v.window_fill      = DARK_BG_2;
    v.faint_bg_color   = DARK_BG_2;
    v.extreme_bg_color = DARK_BG_0;
    v.window_stroke    = Stroke::new(1.0, DARK_BORDER);
    v.hyperlink_color  = ACCENT_HOVER;
    v.selection = Selection { bg_fill: ACCENT, stroke: Stroke::new(1.0, Color32::WHITE) };

    paint(&mut v.widgets.noninteractive, DARK_BG_2,  DARK_BORDER, (1.0, DARK_TEXT_DIM));
    paint(&mut v.widgets.inactive,       DARK_BG_3,  DARK_BORDER, (1.0, DARK_TEXT));
    paint(&mut v.widgets.hovered,        DARK_BG_4,  ACCENT_DIM,  (1.5, ACCENT_HOVER));
    paint(&mut v.widgets.active,         ACCENT_DIM, ACCENT,      (2.0, Color32::WHITE));
    v.widgets.open = v.widgets.hovered;

    v.override_text_color = Some(DARK_TEXT);
    style.visuals = v;
    ctx.set_style_of(egui::Theme::Dark, style);
}

fn paint(w: &mut WidgetVisuals, fill: Color32, border: Color32, (fg_width, fg): (f32, Color32)) {
    w.bg_fill       = fill;
    w.weak_bg_fill  = fill;
    w.bg_stroke     = Stroke::new(1.0, border);
    w.fg_stroke     = Stroke::new(fg_width, fg);
    w.corner_radius = egui::CornerRadius::same(6);
}

/// Rounded panel used for the header, upload and library sections.
pub fn section_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(DARK_BG_2)
        .stroke(Stroke::new(1.0, DARK_BORDER))
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::same(16))
}
