//! Top bar: month navigation, counts, settings, Add Resource

use super::App;
use crate::theme::{self, ButtonKind};
use crate::ui::components::icon_button;
use eframe::egui;

impl App {
    pub(crate) fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("calendar_header")
            .frame(theme::header_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.set_height(theme::BUTTON_HEIGHT + theme::SPACING_SM);

                    if icon_button(ui, egui_phosphor::regular::CARET_LEFT, theme::ACCENT)
                        .on_hover_text("Previous month (←)")
                        .clicked()
                    {
                        self.shift_month(-1);
                    }
                    ui.add_sized(
                        [170.0, theme::BUTTON_HEIGHT],
                        egui::Label::new(
                            egui::RichText::new(self.month.title())
                                .size(theme::FONT_TITLE)
                                .strong()
                                .color(theme::TEXT_PRIMARY),
                        )
                        .selectable(false),
                    );
                    if icon_button(ui, egui_phosphor::regular::CARET_RIGHT, theme::ACCENT)
                        .on_hover_text("Next month (→)")
                        .clicked()
                    {
                        self.shift_month(1);
                    }

                    ui.add_space(theme::SPACING_MD);
                    if ui.add(theme::button(ButtonKind::Plain, "Today")).clicked() {
                        self.go_to_today();
                    }

                    ui.add_space(theme::SPACING_LG);
                    ui.label(
                        egui::RichText::new(format!(
                            "{} resources  •  {} events",
                            self.schedule.resources().len(),
                            self.schedule.events().len()
                        ))
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_DIM),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(theme::button(ButtonKind::Primary, format!(
                                "{}  Add Resource",
                                egui_phosphor::regular::PLUS
                            )))
                            .clicked()
                        {
                            self.add_resource();
                        }
                        if icon_button(ui, egui_phosphor::regular::GEAR_SIX, theme::TEXT_PRIMARY)
                            .on_hover_text("Settings")
                            .clicked()
                        {
                            self.show_settings = true;
                        }
                    });
                });
            });
    }
}
