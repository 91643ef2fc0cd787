//! Centralized theme constants for Resource Calendar
//! All colors, sizes, and styling should reference these constants

use crate::constants::{EVENT_LIGHTNESS, EVENT_SATURATION};
use crate::model::EventColor;
use egui::Color32;

// =============================================================================
// COLORS - Backgrounds
// =============================================================================
pub const BG_BASE: Color32 = Color32::from_rgb(0x09, 0x09, 0x0b); // zinc-950
pub const BG_ELEVATED: Color32 = Color32::from_rgb(0x18, 0x18, 0x1b); // zinc-900
pub const BG_SURFACE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800
pub const BG_HOVER: Color32 = Color32::from_rgb(0x0f, 0x1a, 0x19); // subtle teal hover

// =============================================================================
// COLORS - Accent (Teal)
// =============================================================================
pub const ACCENT: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf); // teal-400

// =============================================================================
// COLORS - Text
// =============================================================================
pub const TEXT_PRIMARY: Color32 = Color32::WHITE;
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xe4, 0xe4, 0xe7); // zinc-200
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0xa1, 0xa1, 0xaa); // zinc-400
pub const TEXT_DIM: Color32 = Color32::from_rgb(0x71, 0x71, 0x7a); // zinc-500
pub const TEXT_ON_EVENT: Color32 = Color32::from_rgb(0x18, 0x18, 0x1b); // dark text on pastel chips
pub const TEXT_ON_ACCENT: Color32 = Color32::from_rgb(0x04, 0x2f, 0x2e); // teal-950

// =============================================================================
// COLORS - Borders
// =============================================================================
pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(0x27, 0x27, 0x2a); // zinc-800 - faint gray for outlines
pub const BORDER_DEFAULT: Color32 = Color32::from_rgb(0x3f, 0x3f, 0x46); // zinc-700

// =============================================================================
// COLORS - Status
// =============================================================================
pub const STATUS_ERROR: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71); // red-400

// =============================================================================
// COLORS - Calendar grid
// =============================================================================
pub const GRID_LINE: Color32 = Color32::from_rgb(0x1f, 0x1f, 0x23);
pub const CELL_WEEKEND: Color32 = Color32::from_rgb(0x0e, 0x0e, 0x11);
pub const CELL_TODAY: Color32 = Color32::from_rgb(0x0f, 0x2a, 0x27); // teal-tinted
pub const CELL_SELECTING: Color32 = Color32::from_rgba_premultiplied(0x0e, 0x42, 0x3b, 80); // teal-400 @ 31%
pub const CELL_DROP_TARGET: Color32 = Color32::from_rgb(0x11, 0x5e, 0x59); // teal-800

// =============================================================================
// COLORS - Buttons
// =============================================================================
pub const BTN_DEFAULT: Color32 = Color32::from_rgb(0x3f, 0x3f, 0x46); // zinc-700
pub const BTN_ACCENT: Color32 = Color32::from_rgb(0x2d, 0xd4, 0xbf); // teal-400
pub const BTN_DANGER: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26); // red-600

// =============================================================================
// COLORS - Events
// =============================================================================

/// Chip fill for an event, `hsl(hue, 70%, 70%)`
pub fn event_fill(color: EventColor) -> Color32 {
    hsl_to_color32(color.hue(), EVENT_SATURATION / 100.0, EVENT_LIGHTNESS / 100.0)
}

/// HSL with hue in degrees, saturation and lightness in 0..=1
pub fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(channel(r), channel(g), channel(b))
}

// =============================================================================
// TYPOGRAPHY - Font Sizes
// =============================================================================
pub const FONT_TITLE: f32 = 18.0;
pub const FONT_HEADING: f32 = 16.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_LABEL: f32 = 13.0;
pub const FONT_SMALL: f32 = 11.0;
pub const FONT_CAPTION: f32 = 10.0;

// =============================================================================
// DIMENSIONS - Grid
// =============================================================================
pub const RESOURCE_COLUMN_WIDTH: f32 = 150.0;
pub const DAY_HEADER_HEIGHT: f32 = 40.0;
pub const CHIP_HEIGHT: f32 = 20.0;
pub const CHIP_GAP: f32 = 3.0;
pub const CELL_PADDING: f32 = 4.0;

// =============================================================================
// DIMENSIONS - Components
// =============================================================================
pub const BUTTON_HEIGHT: f32 = 28.0;
pub const NAV_BUTTON_SIZE: f32 = 28.0;
pub const MENU_WIDTH: f32 = 170.0;
pub const MENU_ROW_HEIGHT: f32 = 24.0;
pub const SWITCH_SIZE: egui::Vec2 = egui::vec2(30.0, 16.0);

// =============================================================================
// CORNER RADIUS
// =============================================================================
pub const RADIUS_SMALL: f32 = 2.0;
pub const RADIUS_DEFAULT: f32 = 4.0;
pub const RADIUS_MEDIUM: f32 = 6.0;
pub const RADIUS_LARGE: f32 = 8.0;

// =============================================================================
// STROKE WIDTHS
// =============================================================================
pub const STROKE_DEFAULT: f32 = 1.0;
pub const STROKE_MEDIUM: f32 = 1.5;

// =============================================================================
// SPACING
// =============================================================================
pub const SPACING_SM: f32 = 4.0;
pub const SPACING_MD: f32 = 8.0;
pub const SPACING_LG: f32 = 12.0;
pub const SPACING_XL: f32 = 16.0;

// =============================================================================
// HELPER - Global visuals
// =============================================================================

fn widget(fill: Color32, stroke: Color32, text: Color32) -> egui::style::WidgetVisuals {
    egui::style::WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: egui::Stroke::new(STROKE_DEFAULT, stroke),
        fg_stroke: egui::Stroke::new(STROKE_DEFAULT, text),
        corner_radius: RADIUS_DEFAULT.into(),
        expansion: 0.0,
    }
}

/// Dark board look. Stock widgets (sliders, separators, menus) reuse the
/// grid colours so dialogs sit on the same palette as the calendar.
pub fn apply_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BG_BASE;
    visuals.window_fill = BG_ELEVATED;
    visuals.window_stroke = egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE);
    visuals.window_corner_radius = egui::CornerRadius::same(RADIUS_LARGE as u8);
    visuals.menu_corner_radius = egui::CornerRadius::same(RADIUS_MEDIUM as u8);
    // Slider rails and text fields
    visuals.extreme_bg_color = GRID_LINE;
    visuals.faint_bg_color = CELL_WEEKEND;
    visuals.hyperlink_color = ACCENT;
    visuals.error_fg_color = STATUS_ERROR;
    visuals.selection = egui::style::Selection {
        bg_fill: CELL_DROP_TARGET,
        stroke: egui::Stroke::new(STROKE_DEFAULT, ACCENT),
    };
    visuals.slider_trailing_fill = true;
    visuals.interact_cursor = Some(egui::CursorIcon::PointingHand);
    visuals.popup_shadow = egui::epaint::Shadow {
        offset: [0, 3],
        blur: 10,
        spread: 0,
        color: Color32::from_black_alpha(90),
    };

    let widgets = &mut visuals.widgets;
    widgets.noninteractive = widget(BG_ELEVATED, GRID_LINE, TEXT_SECONDARY);
    widgets.inactive = widget(BG_SURFACE, BORDER_SUBTLE, TEXT_SECONDARY);
    widgets.hovered = widget(BG_HOVER, ACCENT, TEXT_PRIMARY);
    widgets.active = egui::style::WidgetVisuals {
        expansion: -1.0,
        ..widget(CELL_DROP_TARGET, ACCENT, TEXT_PRIMARY)
    };
    widgets.open = widget(BG_SURFACE, BORDER_DEFAULT, TEXT_PRIMARY);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.interaction.selectable_labels = false;
        style.spacing.item_spacing = egui::vec2(SPACING_MD, 6.0);
        style.spacing.button_padding = egui::vec2(SPACING_LG, 5.0);
        style.spacing.menu_margin = egui::Margin::same(SPACING_SM as i8);
        style.spacing.slider_width = 160.0;
        // Solid bars: the grid scrolls both ways and floating bars hide the last column
        style.spacing.scroll = egui::style::ScrollStyle {
            bar_width: 8.0,
            ..egui::style::ScrollStyle::solid()
        };
    });
}

// =============================================================================
// HELPER - Frames
// =============================================================================
pub fn header_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .inner_margin(egui::Margin::symmetric(SPACING_LG as i8, SPACING_MD as i8))
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_SUBTLE))
}

pub fn modal_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(BG_ELEVATED)
        .stroke(egui::Stroke::new(STROKE_DEFAULT, BORDER_DEFAULT))
        .corner_radius(RADIUS_LARGE)
        .inner_margin(SPACING_XL + SPACING_SM)
}

// =============================================================================
// HELPER - Buttons and rows
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Plain,
    /// Add Resource
    Primary,
    /// Confirming a delete
    Danger,
}

impl ButtonKind {
    fn colors(self) -> (Color32, Color32) {
        match self {
            ButtonKind::Plain => (BTN_DEFAULT, TEXT_PRIMARY),
            ButtonKind::Primary => (BTN_ACCENT, TEXT_ON_ACCENT),
            ButtonKind::Danger => (BTN_DANGER, TEXT_PRIMARY),
        }
    }
}

pub fn button(kind: ButtonKind, text: impl Into<String>) -> egui::Button<'static> {
    let (fill, text_color) = kind.colors();
    egui::Button::new(egui::RichText::new(text).color(text_color))
        .fill(fill)
        .min_size(egui::vec2(0.0, BUTTON_HEIGHT))
        .corner_radius(RADIUS_DEFAULT)
}

/// Background for a hand-painted control: brighter while hovered, a little
/// less while pressed
pub fn interactive_fill(response: &egui::Response, base: Color32) -> Color32 {
    let lift = if response.is_pointer_button_down_on() {
        0.06
    } else if response.hovered() {
        0.12
    } else {
        0.0
    };
    base.lerp_to_gamma(Color32::WHITE, lift)
}

/// Full-width row of a chip's right-click menu, icon drawn in `tint`
pub fn menu_item(ui: &mut egui::Ui, icon: &str, label: &str, tint: Color32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), MENU_ROW_HEIGHT),
        egui::Sense::click(),
    );
    let label_color = if response.hovered() {
        ui.painter().rect_filled(rect, RADIUS_SMALL, tint.gamma_multiply(0.15));
        tint
    } else {
        TEXT_SECONDARY
    };
    let font = egui::FontId::proportional(FONT_LABEL);
    let icon_pos = rect.left_center() + egui::vec2(SPACING_MD, 0.0);
    let painter = ui.painter();
    painter.text(icon_pos, egui::Align2::LEFT_CENTER, icon, font.clone(), tint);
    painter.text(
        icon_pos + egui::vec2(FONT_LABEL + SPACING_MD, 0.0),
        egui::Align2::LEFT_CENTER,
        label,
        font,
        label_color,
    );
    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}

/// Labelled on/off switch for the settings dialog. Returns true when flipped.
pub fn switch_row(ui: &mut egui::Ui, on: &mut bool, label: &str) -> bool {
    let (row, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), MENU_ROW_HEIGHT),
        egui::Sense::click(),
    );
    if response.clicked() {
        *on = !*on;
    }
    let t = ui.ctx().animate_bool(response.id, *on);

    let track = egui::Rect::from_center_size(
        egui::pos2(row.left() + SWITCH_SIZE.x / 2.0, row.center().y),
        SWITCH_SIZE,
    );
    let radius = SWITCH_SIZE.y / 2.0;
    let knob_x = egui::lerp((track.left() + radius)..=(track.right() - radius), t);
    let painter = ui.painter();
    painter.rect_filled(track, radius, BORDER_DEFAULT.lerp_to_gamma(ACCENT, t));
    painter.circle_filled(egui::pos2(knob_x, track.center().y), radius - 2.0, TEXT_PRIMARY);
    painter.text(
        egui::pos2(track.right() + SPACING_MD, row.center().y),
        egui::Align2::LEFT_CENTER,
        label,
        egui::FontId::proportional(FONT_BODY),
        TEXT_PRIMARY,
    );
    response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsl_to_color32(0.0, 1.0, 0.5), Color32::from_rgb(255, 0, 0));
        assert_eq!(hsl_to_color32(120.0, 1.0, 0.5), Color32::from_rgb(0, 255, 0));
        assert_eq!(hsl_to_color32(240.0, 1.0, 0.5), Color32::from_rgb(0, 0, 255));
        assert_eq!(hsl_to_color32(360.0, 1.0, 0.5), Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn hsl_greys_ignore_hue() {
        assert_eq!(hsl_to_color32(200.0, 0.0, 0.5), Color32::from_rgb(128, 128, 128));
        assert_eq!(hsl_to_color32(10.0, 0.7, 1.0), Color32::WHITE);
    }

    #[test]
    fn button_kinds_keep_text_readable() {
        assert_eq!(ButtonKind::Primary.colors(), (BTN_ACCENT, TEXT_ON_ACCENT));
        assert_eq!(ButtonKind::Danger.colors().0, BTN_DANGER);
        assert_ne!(ButtonKind::Plain.colors().0, ButtonKind::Plain.colors().1);
    }

    #[test]
    fn event_fill_is_pastel() {
        // hsl(0, 70%, 70%) = rgb(232, 125, 125)
        let fill = event_fill(EventColor::from_hue(0.0));
        assert_eq!(fill, Color32::from_rgb(232, 125, 125));
    }
}
