//! Context menu for event chips

use super::App;
use crate::theme;
use eframe::egui;

impl App {
    /// Right-click menu for one event. Returns true if Delete was chosen.
    pub(crate) fn event_context_menu(&self, ui: &mut egui::Ui, event_name: &str) -> bool {
        ui.set_width(theme::MENU_WIDTH);
        ui.spacing_mut().item_spacing.y = 2.0;

        ui.add(
            egui::Label::new(
                egui::RichText::new(event_name)
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            )
            .truncate(),
        );
        ui.separator();

        // Ellipsis when a confirmation dialog follows
        let label = if self.confirm_delete { "Delete…" } else { "Delete" };
        let chosen = theme::menu_item(ui, egui_phosphor::regular::TRASH, label, theme::STATUS_ERROR).clicked();
        if chosen {
            ui.close_menu();
        }
        chosen
    }
}
