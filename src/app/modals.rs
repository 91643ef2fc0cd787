//! Modal dialogs (delete confirmation, settings)

use super::App;
use crate::settings::{CELL_WIDTH_RANGE, ROW_HEIGHT_RANGE};
use crate::theme::{self, ButtonKind};
use crate::ui::components::icon_button;
use eframe::egui;
use tracing::warn;

impl App {
    // ========================================================================
    // DELETE CONFIRMATION
    // ========================================================================

    pub(crate) fn render_delete_modal(&mut self, ctx: &egui::Context) {
        let Some(event_id) = self.pending_delete.clone() else {
            return;
        };
        // Gone already (e.g. deleted from another path); nothing to confirm
        let Some(event_name) = self.schedule.find_event(&event_id).map(|e| e.name.clone()) else {
            self.pending_delete = None;
            return;
        };

        let mut confirmed = false;
        let mut cancelled = false;
        let modal = egui::Modal::new(egui::Id::new("delete_event_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(300.0);
                ui.horizontal(|ui| {
                    ui.colored_label(theme::STATUS_ERROR, egui_phosphor::regular::TRASH);
                    ui.add(egui::Label::new(
                        egui::RichText::new("Delete event?").size(theme::FONT_HEADING).strong(),
                    ).selectable(false));
                });
                ui.add_space(theme::SPACING_SM);
                ui.label(
                    egui::RichText::new(format!("Are you sure you want to delete \"{}\"?", event_name))
                        .color(theme::TEXT_MUTED),
                );
                ui.add_space(theme::SPACING_LG);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(theme::button(ButtonKind::Danger, "Delete")).clicked() {
                        confirmed = true;
                    }
                    if ui.add(theme::button(ButtonKind::Plain, "Cancel")).clicked() {
                        cancelled = true;
                    }
                });
                if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirmed = true;
                }
            });

        if confirmed {
            self.pending_delete = None;
            self.delete_event(&event_id);
        } else if cancelled || modal.should_close() {
            self.pending_delete = None;
        }
    }

    // ========================================================================
    // SETTINGS
    // ========================================================================

    pub(crate) fn render_settings_modal(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }

        let modal_response = egui::Modal::new(egui::Id::new("settings_modal"))
            .backdrop_color(egui::Color32::from_black_alpha(120))
            .frame(theme::modal_frame())
            .show(ctx, |ui| {
                ui.set_width(320.0);

                // Title bar with close button
                ui.horizontal(|ui| {
                    ui.add(egui::Label::new(
                        egui::RichText::new("Settings").size(theme::FONT_HEADING).strong(),
                    ).selectable(false));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if icon_button(ui, egui_phosphor::regular::X, theme::STATUS_ERROR).clicked() {
                            self.show_settings = false;
                        }
                    });
                });
                ui.add_space(theme::SPACING_SM);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                let mut changed = false;

                // — Grid —
                ui.add(egui::Label::new(
                    egui::RichText::new("Grid").size(theme::FONT_LABEL).color(theme::ACCENT),
                ).selectable(false));
                ui.add_space(2.0);
                changed |= ui
                    .add(egui::Slider::new(&mut self.cell_width, CELL_WIDTH_RANGE).text("Day width"))
                    .changed();
                changed |= ui
                    .add(egui::Slider::new(&mut self.row_height, ROW_HEIGHT_RANGE).text("Row height"))
                    .changed();
                changed |= theme::switch_row(ui, &mut self.highlight_today, "Highlight today");

                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                // — Events —
                ui.add(egui::Label::new(
                    egui::RichText::new("Events").size(theme::FONT_LABEL).color(theme::ACCENT),
                ).selectable(false));
                ui.add_space(2.0);
                changed |= theme::switch_row(ui, &mut self.confirm_delete, "Confirm before deleting");

                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                // — Data —
                ui.add(egui::Label::new(
                    egui::RichText::new("Data").size(theme::FONT_LABEL).color(theme::ACCENT),
                ).selectable(false));
                ui.add_space(2.0);
                ui.label(
                    egui::RichText::new(self.data_dir.to_string_lossy())
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
                if ui
                    .add(theme::button(ButtonKind::Plain, format!("{}  Open Data Folder", egui_phosphor::regular::FOLDER_OPEN)))
                    .clicked()
                {
                    if let Err(e) = open::that(&self.data_dir) {
                        warn!(error = %e, path = %self.data_dir.display(), "Failed to open data folder");
                    }
                }

                if changed {
                    self.save_settings();
                }
            });

        if modal_response.should_close() {
            self.show_settings = false;
        }
    }
}
