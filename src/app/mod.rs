//! App module - contains the main application state and logic

mod context_menu;
mod grid;
mod header;
mod modals;
mod toast;

use crate::calendar::MonthView;
use crate::db::Database;
use crate::schedule::Schedule;
use crate::settings::Settings;
use crate::theme;
use chrono::{Local, NaiveDate};
use eframe::egui;
use grid::GridDrag;
use std::path::PathBuf;
use tracing::{debug, error, info};

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) db: Database,
    pub(crate) schedule: Schedule,
    pub(crate) month: MonthView,
    pub(crate) today: NaiveDate,
    // Grid interaction
    pub(crate) drag: Option<GridDrag>,
    pub(crate) pending_delete: Option<String>,
    // Settings
    pub(crate) show_settings: bool,
    pub(crate) cell_width: f32,
    pub(crate) row_height: f32,
    pub(crate) confirm_delete: bool,
    pub(crate) highlight_today: bool,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    pub(crate) central_panel_rect: Option<egui::Rect>,
    // Window
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, db: Database, settings: Settings, data_dir: PathBuf) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Apply theme from theme.rs
        theme::apply_visuals(&cc.egui_ctx);

        let schedule = db.load_schedule();
        let today = Local::now().date_naive();

        Self {
            db,
            schedule,
            month: MonthView::containing(today),
            today,
            drag: None,
            pending_delete: None,
            show_settings: false,
            cell_width: settings.cell_width,
            row_height: settings.row_height,
            confirm_delete: settings.confirm_delete,
            highlight_today: settings.highlight_today,
            toast_message: None,
            toast_start: None,
            central_panel_rect: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            cell_width: self.cell_width,
            row_height: self.row_height,
            confirm_delete: self.confirm_delete,
            highlight_today: self.highlight_today,
        };
        settings.save(&self.data_dir);
    }

    /// Write resources and events after every change
    fn persist(&mut self) {
        if let Err(e) = self.db.save_schedule(&self.schedule) {
            error!(error = %e, "Failed to save schedule");
            self.show_toast("Could not save changes");
        }
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    pub(crate) fn shift_month(&mut self, delta: i32) {
        self.month = self.month.shifted(delta);
        self.drag = None;
        debug!(month = %self.month.title(), "Month changed");
    }

    pub(crate) fn go_to_today(&mut self) {
        self.today = Local::now().date_naive();
        self.month = MonthView::containing(self.today);
        self.drag = None;
    }

    // ========================================================================
    // SCHEDULE ACTIONS
    // ========================================================================

    pub(crate) fn add_resource(&mut self) {
        let index = self.schedule.add_resource();
        self.persist();
        info!(index, "Resource added");
    }

    /// Create one event per day between the two day indices for `row`
    pub(crate) fn create_events(&mut self, start_day: usize, end_day: usize, row: usize) {
        let created = self
            .schedule
            .add_events(self.month.days(), start_day, end_day, row);
        if created > 0 {
            self.persist();
        }
    }

    /// Drop target: the cell's date and row become the event's
    pub(crate) fn move_event(&mut self, event_id: &str, row: usize, day: usize) {
        let Some(date) = self.month.day(day) else {
            return;
        };
        if self.schedule.move_event(event_id, date, row) {
            self.persist();
        }
    }

    /// Delete straight away or ask first, depending on settings
    pub(crate) fn request_delete(&mut self, event_id: String) {
        if self.confirm_delete {
            self.pending_delete = Some(event_id);
        } else {
            self.delete_event(&event_id);
        }
    }

    pub(crate) fn delete_event(&mut self, event_id: &str) {
        if let Some(event) = self.schedule.delete_event(event_id) {
            self.persist();
            info!(event = %event.id, "Event deleted");
        }
    }
}
