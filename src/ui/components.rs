//! Reusable UI components
//!
//! Standalone painting helpers shared by the grid, header, and modals.

use crate::model::Event;
use crate::theme;
use eframe::egui;

/// How an event chip should be drawn this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ChipStyle {
    pub hovered: bool,
    /// Drawn at its old spot while being moved
    pub faded: bool,
    pub show_delete: bool,
    pub delete_hovered: bool,
}

/// Square hit area for the ✖ at the right end of a chip
pub fn chip_delete_rect(chip: egui::Rect) -> egui::Rect {
    let side = chip.height();
    egui::Rect::from_min_max(egui::pos2(chip.right() - side, chip.top()), chip.max)
}

/// Paint one event: pastel fill in its colour, name on the left, optional delete cross
pub fn paint_event_chip(painter: &egui::Painter, rect: egui::Rect, event: &Event, style: ChipStyle) {
    let mut fill = theme::event_fill(event.color);
    if style.faded {
        fill = fill.gamma_multiply(0.35);
    }
    painter.rect_filled(rect, theme::RADIUS_DEFAULT, fill);
    if style.hovered {
        painter.rect_stroke(
            rect,
            theme::RADIUS_DEFAULT,
            egui::Stroke::new(theme::STROKE_MEDIUM, theme::TEXT_PRIMARY),
            egui::StrokeKind::Inside,
        );
    }

    let text_color = if style.faded {
        theme::TEXT_ON_EVENT.gamma_multiply(0.5)
    } else {
        theme::TEXT_ON_EVENT
    };
    painter.text(
        rect.left_center() + egui::vec2(theme::SPACING_SM + 2.0, 0.0),
        egui::Align2::LEFT_CENTER,
        &event.name,
        egui::FontId::proportional(theme::FONT_SMALL),
        text_color,
    );

    if style.show_delete {
        let delete = chip_delete_rect(rect);
        if style.delete_hovered {
            painter.rect_filled(delete.shrink(2.0), theme::RADIUS_SMALL, fill.gamma_multiply(0.7));
        }
        let color = if style.delete_hovered {
            theme::BTN_DANGER
        } else {
            theme::TEXT_ON_EVENT
        };
        painter.text(
            delete.center(),
            egui::Align2::CENTER_CENTER,
            egui_phosphor::regular::X,
            egui::FontId::proportional(theme::FONT_SMALL),
            color,
        );
    }
}

/// Borderless square icon button (month navigation, settings, modal close)
pub fn icon_button(ui: &mut egui::Ui, icon: &str, hover_color: egui::Color32) -> egui::Response {
    let size = theme::NAV_BUTTON_SIZE;
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
    let color = if response.hovered() {
        let fill = theme::interactive_fill(&response, theme::BG_SURFACE);
        ui.painter().rect_filled(rect, theme::RADIUS_DEFAULT, fill);
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        hover_color
    } else {
        theme::TEXT_MUTED
    };
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(theme::FONT_HEADING),
        color,
    );
    response
}
