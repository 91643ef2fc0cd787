//! Calendar grid: geometry, painting, and the create / move drag gestures

use super::App;
use crate::model::Event;
use crate::theme;
use crate::ui::components;
use chrono::{Datelike, NaiveDate, Weekday};
use eframe::egui;
use tracing::debug;

/// Drag gesture in progress on the grid
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum GridDrag {
    /// Pressed on an empty cell; releasing creates events for the covered days
    Create { row: usize, start_day: usize },
    /// Picked up an event; releasing over a cell reschedules it there
    Move { event_id: String, grab_offset: egui::Vec2 },
}

/// What a chip asked for this frame, applied once the grid is drawn
enum ChipAction {
    StartMove { event_id: String, grab_offset: egui::Vec2 },
    Delete(String),
}

/// Screen geometry of the grid for one frame: a resource label column and a
/// day header row, then one row per resource and one column per day.
#[derive(Debug, Clone)]
pub(crate) struct GridLayout {
    origin: egui::Pos2,
    cell_width: f32,
    /// Top of each row relative to the first row, plus the bottom of the last
    row_offsets: Vec<f32>,
    day_count: usize,
}

impl GridLayout {
    pub fn new(origin: egui::Pos2, cell_width: f32, row_heights: &[f32], day_count: usize) -> Self {
        let mut row_offsets = Vec::with_capacity(row_heights.len() + 1);
        let mut y = 0.0;
        row_offsets.push(y);
        for h in row_heights {
            y += h;
            row_offsets.push(y);
        }
        Self {
            origin,
            cell_width,
            row_offsets,
            day_count,
        }
    }

    /// Total size for a grid with these rows and `day_count` columns
    pub fn content_size(cell_width: f32, row_heights: &[f32], day_count: usize) -> egui::Vec2 {
        egui::vec2(
            theme::RESOURCE_COLUMN_WIDTH + cell_width * day_count as f32,
            theme::DAY_HEADER_HEIGHT + row_heights.iter().sum::<f32>(),
        )
    }

    pub fn row_count(&self) -> usize {
        self.row_offsets.len() - 1
    }

    fn days_left(&self) -> f32 {
        self.origin.x + theme::RESOURCE_COLUMN_WIDTH
    }

    fn rows_top(&self) -> f32 {
        self.origin.y + theme::DAY_HEADER_HEIGHT
    }

    fn row_span(&self, row: usize) -> (f32, f32) {
        let top = self.rows_top() + self.row_offsets[row];
        let bottom = self.rows_top() + self.row_offsets[row + 1];
        (top, bottom)
    }

    pub fn day_header_rect(&self, day: usize) -> egui::Rect {
        let left = self.days_left() + self.cell_width * day as f32;
        egui::Rect::from_min_size(
            egui::pos2(left, self.origin.y),
            egui::vec2(self.cell_width, theme::DAY_HEADER_HEIGHT),
        )
    }

    pub fn label_rect(&self, row: usize) -> egui::Rect {
        let (top, bottom) = self.row_span(row);
        egui::Rect::from_min_max(
            egui::pos2(self.origin.x, top),
            egui::pos2(self.days_left(), bottom),
        )
    }

    pub fn cell_rect(&self, row: usize, day: usize) -> egui::Rect {
        let (top, bottom) = self.row_span(row);
        let left = self.days_left() + self.cell_width * day as f32;
        egui::Rect::from_min_max(
            egui::pos2(left, top),
            egui::pos2(left + self.cell_width, bottom),
        )
    }

    /// `(row, day)` of the cell under `pos`
    pub fn cell_at(&self, pos: egui::Pos2) -> Option<(usize, usize)> {
        let x = pos.x - self.days_left();
        let y = pos.y - self.rows_top();
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let day = (x / self.cell_width) as usize;
        if day >= self.day_count {
            return None;
        }
        let row = self.row_offsets.windows(2).position(|w| y >= w[0] && y < w[1])?;
        Some((row, day))
    }

    /// Rect of the `slot`th chip stacked inside a cell
    pub fn chip_rect(cell: egui::Rect, slot: usize) -> egui::Rect {
        let top = cell.top() + theme::CELL_PADDING + slot as f32 * (theme::CHIP_HEIGHT + theme::CHIP_GAP);
        egui::Rect::from_min_max(
            egui::pos2(cell.left() + theme::CELL_PADDING, top),
            egui::pos2(cell.right() - theme::CELL_PADDING, top + theme::CHIP_HEIGHT),
        )
    }
}

/// Height a row needs to fit `chips` stacked events
pub(crate) fn row_height_for(chips: usize, min_height: f32) -> f32 {
    if chips == 0 {
        return min_height;
    }
    let needed = theme::CELL_PADDING * 2.0
        + chips as f32 * theme::CHIP_HEIGHT
        + (chips - 1) as f32 * theme::CHIP_GAP;
    needed.max(min_height)
}

/// Only the button that started a gesture ends it
fn gesture_released(input: &egui::InputState) -> bool {
    input.pointer.primary_released()
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

impl App {
    /// Each row grows to fit its busiest day
    fn row_heights(&self) -> Vec<f32> {
        (0..self.schedule.resources().len())
            .map(|row| {
                let busiest = self
                    .month
                    .days()
                    .iter()
                    .map(|date| self.schedule.events_on(*date, row).count())
                    .max()
                    .unwrap_or(0);
                row_height_for(busiest, self.row_height)
            })
            .collect()
    }

    pub(crate) fn render_grid(&mut self, ui: &mut egui::Ui) {
        let row_heights = self.row_heights();
        let day_count = self.month.days().len();
        let size = GridLayout::content_size(self.cell_width, &row_heights, day_count);

        egui::ScrollArea::both()
            .auto_shrink([false, false])
            .drag_to_scroll(false)
            .show(ui, |ui| {
                let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
                let layout = GridLayout::new(rect.min, self.cell_width, &row_heights, day_count);
                let pointer = ui.ctx().input(|i| i.pointer.latest_pos());
                let clip = ui.clip_rect();
                let hovered_cell = pointer
                    .filter(|p| clip.contains(*p))
                    .and_then(|p| layout.cell_at(p));

                self.paint_headers(ui, &layout);
                self.paint_cells(ui, &layout, hovered_cell);
                self.interact_cells(ui, &layout);
                let actions = self.render_chips(ui, &layout);
                self.apply_chip_actions(actions);
                self.paint_drag_ghost(ui.ctx(), pointer);
                self.finish_drag(ui.ctx(), hovered_cell);
            });
    }

    fn paint_headers(&self, ui: &egui::Ui, layout: &GridLayout) {
        let painter = ui.painter();

        for (day, date) in self.month.days().iter().enumerate() {
            let rect = layout.day_header_rect(day);
            if !ui.is_rect_visible(rect) {
                continue;
            }
            let is_today = self.highlight_today && *date == self.today;
            let (number_color, weekday_color) = if is_today {
                (theme::ACCENT, theme::ACCENT)
            } else if is_weekend(*date) {
                (theme::TEXT_MUTED, theme::TEXT_DIM)
            } else {
                (theme::TEXT_PRIMARY, theme::TEXT_DIM)
            };
            painter.text(
                rect.center() - egui::vec2(0.0, 7.0),
                egui::Align2::CENTER_CENTER,
                date.format("%-d").to_string(),
                egui::FontId::proportional(theme::FONT_LABEL),
                number_color,
            );
            painter.text(
                rect.center() + egui::vec2(0.0, 9.0),
                egui::Align2::CENTER_CENTER,
                date.format("%a").to_string(),
                egui::FontId::proportional(theme::FONT_CAPTION),
                weekday_color,
            );
        }

        for (row, name) in self.schedule.resources().iter().enumerate() {
            let rect = layout.label_rect(row);
            if !ui.is_rect_visible(rect) {
                continue;
            }
            painter.rect_filled(rect, 0.0, theme::BG_ELEVATED);
            painter.line_segment(
                [rect.left_bottom(), rect.right_bottom()],
                egui::Stroke::new(theme::STROKE_DEFAULT, theme::GRID_LINE),
            );
            painter.with_clip_rect(rect.intersect(ui.clip_rect())).text(
                rect.left_center() + egui::vec2(theme::SPACING_LG, 0.0),
                egui::Align2::LEFT_CENTER,
                name,
                egui::FontId::proportional(theme::FONT_BODY),
                theme::TEXT_SECONDARY,
            );
        }
    }

    /// Day range the current create gesture would cover, as (row, first, last)
    fn selection_preview(&self, hovered_cell: Option<(usize, usize)>) -> Option<(usize, usize, usize)> {
        match &self.drag {
            Some(GridDrag::Create { row, start_day }) => {
                let (row, day) = hovered_cell.unwrap_or((*row, *start_day));
                Some((row, (*start_day).min(day), (*start_day).max(day)))
            }
            _ => None,
        }
    }

    fn paint_cells(&self, ui: &egui::Ui, layout: &GridLayout, hovered_cell: Option<(usize, usize)>) {
        let painter = ui.painter();
        let selection = self.selection_preview(hovered_cell);
        let drop_target = match self.drag {
            Some(GridDrag::Move { .. }) => hovered_cell,
            _ => None,
        };
        let grid = egui::Stroke::new(theme::STROKE_DEFAULT, theme::GRID_LINE);

        for row in 0..layout.row_count() {
            for (day, date) in self.month.days().iter().enumerate() {
                let rect = layout.cell_rect(row, day);
                if !ui.is_rect_visible(rect) {
                    continue;
                }
                let fill = if drop_target == Some((row, day)) {
                    theme::CELL_DROP_TARGET
                } else if self.highlight_today && *date == self.today {
                    theme::CELL_TODAY
                } else if is_weekend(*date) {
                    theme::CELL_WEEKEND
                } else {
                    theme::BG_BASE
                };
                painter.rect_filled(rect, 0.0, fill);

                if let Some((sel_row, first, last)) = selection {
                    if sel_row == row && (first..=last).contains(&day) {
                        painter.rect_filled(rect, 0.0, theme::CELL_SELECTING);
                    }
                }

                painter.line_segment([rect.right_top(), rect.right_bottom()], grid);
                painter.line_segment([rect.left_bottom(), rect.right_bottom()], grid);
            }
        }
    }

    fn interact_cells(&mut self, ui: &egui::Ui, layout: &GridLayout) {
        for row in 0..layout.row_count() {
            for day in 0..self.month.days().len() {
                let rect = layout.cell_rect(row, day);
                if !ui.is_rect_visible(rect) {
                    continue;
                }
                let response = ui.interact(
                    rect,
                    egui::Id::new(("calendar_cell", row, day)),
                    egui::Sense::click_and_drag(),
                );
                if response.drag_started() && self.drag.is_none() {
                    self.drag = Some(GridDrag::Create { row, start_day: day });
                } else if response.clicked() && self.drag.is_none() {
                    // Press and release on one cell: a one-day range
                    self.create_events(day, day, row);
                }
            }
        }
    }

    fn render_chips(&self, ui: &mut egui::Ui, layout: &GridLayout) -> Vec<ChipAction> {
        let mut actions = Vec::new();
        let dragged_id = match &self.drag {
            Some(GridDrag::Move { event_id, .. }) => Some(event_id.as_str()),
            _ => None,
        };

        for row in 0..layout.row_count() {
            for (day, date) in self.month.days().iter().enumerate() {
                let cell = layout.cell_rect(row, day);
                if !ui.is_rect_visible(cell) {
                    continue;
                }
                for (slot, event) in self.schedule.events_on(*date, row).enumerate() {
                    let chip = GridLayout::chip_rect(cell, slot);
                    if ui.is_rect_visible(chip) {
                        self.render_chip(ui, chip, event, dragged_id, &mut actions);
                    }
                }
            }
        }
        actions
    }

    fn render_chip(
        &self,
        ui: &mut egui::Ui,
        chip: egui::Rect,
        event: &Event,
        dragged_id: Option<&str>,
        actions: &mut Vec<ChipAction>,
    ) {
        let response = ui.interact(
            chip,
            egui::Id::new(("event_chip", &event.id)),
            egui::Sense::click_and_drag(),
        );
        let delete_rect = components::chip_delete_rect(chip);
        let delete_response = ui.interact(
            delete_rect,
            egui::Id::new(("event_chip_delete", &event.id)),
            egui::Sense::click(),
        );

        let being_dragged = dragged_id == Some(event.id.as_str());
        let show_delete = self.drag.is_none() && (response.hovered() || delete_response.hovered());
        components::paint_event_chip(
            &ui.painter().with_clip_rect(chip.intersect(ui.clip_rect())),
            chip,
            event,
            components::ChipStyle {
                hovered: response.hovered() && self.drag.is_none(),
                faded: being_dragged,
                show_delete,
                delete_hovered: delete_response.hovered(),
            },
        );

        if response.hovered() && self.drag.is_none() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }
        if show_delete && delete_response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        if delete_response.clicked() {
            actions.push(ChipAction::Delete(event.id.clone()));
        } else if response.drag_started() && self.drag.is_none() {
            let grab_offset = response
                .interact_pointer_pos()
                .map(|p| p - chip.min)
                .unwrap_or_default();
            actions.push(ChipAction::StartMove {
                event_id: event.id.clone(),
                grab_offset,
            });
        }

        response.context_menu(|ui| {
            if self.event_context_menu(ui, &event.name) {
                actions.push(ChipAction::Delete(event.id.clone()));
            }
        });
    }

    fn apply_chip_actions(&mut self, actions: Vec<ChipAction>) {
        for action in actions {
            match action {
                ChipAction::StartMove { event_id, grab_offset } => {
                    self.drag = Some(GridDrag::Move { event_id, grab_offset });
                }
                ChipAction::Delete(event_id) => self.request_delete(event_id),
            }
        }
    }

    /// Floating copy of the event under the pointer while it is being moved
    fn paint_drag_ghost(&self, ctx: &egui::Context, pointer: Option<egui::Pos2>) {
        let (Some(GridDrag::Move { event_id, grab_offset }), Some(pointer)) = (&self.drag, pointer) else {
            return;
        };
        let Some(event) = self.schedule.find_event(event_id) else {
            return;
        };
        ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
        let size = egui::vec2(self.cell_width - theme::CELL_PADDING * 2.0, theme::CHIP_HEIGHT);
        let rect = egui::Rect::from_min_size(pointer - *grab_offset, size);
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Tooltip,
            egui::Id::new("event_drag_ghost"),
        ));
        components::paint_event_chip(
            &painter,
            rect,
            event,
            components::ChipStyle {
                hovered: true,
                ..Default::default()
            },
        );
    }

    /// Resolve the gesture once the primary button is released
    fn finish_drag(&mut self, ctx: &egui::Context, hovered_cell: Option<(usize, usize)>) {
        if self.drag.is_none() || !ctx.input(gesture_released) {
            return;
        }
        let Some(drag) = self.drag.take() else {
            return;
        };
        match (drag, hovered_cell) {
            (GridDrag::Create { start_day, .. }, Some((row, day))) => {
                // Like the single-cell click, the row under the release wins
                self.create_events(start_day, day, row);
            }
            (GridDrag::Move { event_id, .. }, Some((row, day))) => {
                self.move_event(&event_id, row, day);
            }
            (_, None) => {
                debug!("Drag released outside the grid, ignored");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> GridLayout {
        // Three rows (44, 80, 44) by 31 days, 50px cells, grid at (10, 20)
        GridLayout::new(egui::pos2(10.0, 20.0), 50.0, &[44.0, 80.0, 44.0], 31)
    }

    fn days_left() -> f32 {
        10.0 + theme::RESOURCE_COLUMN_WIDTH
    }

    fn rows_top() -> f32 {
        20.0 + theme::DAY_HEADER_HEIGHT
    }

    #[test]
    fn pointer_maps_to_row_and_day() {
        let grid = layout();
        assert_eq!(grid.cell_at(egui::pos2(days_left() + 1.0, rows_top() + 1.0)), Some((0, 0)));
        assert_eq!(grid.cell_at(egui::pos2(days_left() + 125.0, rows_top() + 50.0)), Some((1, 2)));
        assert_eq!(grid.cell_at(egui::pos2(days_left() + 50.0 * 30.0 + 49.0, rows_top() + 124.0)), Some((2, 30)));
    }

    #[test]
    fn pointer_outside_cells_maps_to_nothing() {
        let grid = layout();
        // Resource label column
        assert_eq!(grid.cell_at(egui::pos2(days_left() - 1.0, rows_top() + 5.0)), None);
        // Day header row
        assert_eq!(grid.cell_at(egui::pos2(days_left() + 5.0, rows_top() - 1.0)), None);
        // Past the last day
        assert_eq!(grid.cell_at(egui::pos2(days_left() + 50.0 * 31.0, rows_top() + 5.0)), None);
        // Below the last row
        assert_eq!(grid.cell_at(egui::pos2(days_left() + 5.0, rows_top() + 168.0)), None);
    }

    #[test]
    fn cell_rects_follow_row_heights() {
        let grid = layout();
        let cell = grid.cell_rect(1, 3);
        assert_eq!(cell.min, egui::pos2(days_left() + 150.0, rows_top() + 44.0));
        assert_eq!(cell.size(), egui::vec2(50.0, 80.0));
        assert_eq!(grid.cell_at(cell.center()), Some((1, 3)));
        assert_eq!(grid.label_rect(2).height(), 44.0);
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn content_size_covers_labels_and_header() {
        let size = GridLayout::content_size(50.0, &[44.0, 80.0], 28);
        assert_eq!(size.x, theme::RESOURCE_COLUMN_WIDTH + 1400.0);
        assert_eq!(size.y, theme::DAY_HEADER_HEIGHT + 124.0);
    }

    #[test]
    fn rows_grow_to_fit_stacked_chips() {
        assert_eq!(row_height_for(0, 44.0), 44.0);
        assert_eq!(row_height_for(1, 44.0), 44.0);
        let three = theme::CELL_PADDING * 2.0 + theme::CHIP_HEIGHT * 3.0 + theme::CHIP_GAP * 2.0;
        assert_eq!(row_height_for(3, 44.0), three.max(44.0));
    }

    #[test]
    fn chips_stack_inside_their_cell() {
        let cell = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(60.0, 100.0));
        let first = GridLayout::chip_rect(cell, 0);
        let second = GridLayout::chip_rect(cell, 1);
        assert!(cell.contains_rect(first));
        assert!(second.top() > first.bottom());
        assert_eq!(first.width(), 60.0 - theme::CELL_PADDING * 2.0);
    }

    fn released_with(button: egui::PointerButton) -> bool {
        let ctx = egui::Context::default();
        let pos = egui::pos2(200.0, 100.0);
        let press = |pressed| egui::Event::PointerButton {
            pos,
            button,
            pressed,
            modifiers: egui::Modifiers::NONE,
        };
        let _ = ctx.run(
            egui::RawInput {
                events: vec![egui::Event::PointerMoved(pos), press(true)],
                ..Default::default()
            },
            |_| {},
        );
        let mut released = false;
        let _ = ctx.run(
            egui::RawInput {
                events: vec![press(false)],
                ..Default::default()
            },
            |ctx| released = ctx.input(gesture_released),
        );
        released
    }

    #[test]
    fn only_primary_release_ends_a_gesture() {
        assert!(released_with(egui::PointerButton::Primary));
        assert!(!released_with(egui::PointerButton::Secondary));
        assert!(!released_with(egui::PointerButton::Middle));
    }
}
