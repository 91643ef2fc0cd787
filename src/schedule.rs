//! In-memory resources and events plus the mutations the grid performs on them

use crate::constants::DEFAULT_RESOURCE_COUNT;
use crate::model::{Event, EventColor};
use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Schedule {
    resources: Vec<String>,
    events: Vec<Event>,
    /// Number given to the next created event
    next_number: u64,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(default_resources(), Vec::new())
    }
}

/// `Resource 1` .. `Resource 9`
pub fn default_resources() -> Vec<String> {
    (1..=DEFAULT_RESOURCE_COUNT)
        .map(|n| format!("Resource {}", n))
        .collect()
}

impl Schedule {
    pub fn new(resources: Vec<String>, events: Vec<Event>) -> Self {
        // Start past both the count and the highest stored id so deleted
        // numbers are never handed out twice.
        let highest = events.iter().filter_map(Event::number).max().unwrap_or(0);
        let next_number = highest.max(events.len() as u64) + 1;
        Self {
            resources,
            events,
            next_number,
        }
    }

    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[cfg(test)]
    pub fn next_number(&self) -> u64 {
        self.next_number
    }

    pub fn find_event(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events booked on `date` for the resource at `resource_index`
    pub fn events_on(&self, date: NaiveDate, resource_index: usize) -> impl Iterator<Item = &Event> {
        self.events
            .iter()
            .filter(move |e| e.date == date && e.resource_index == resource_index)
    }

    /// Append `Resource {n}`; returns its index
    pub fn add_resource(&mut self) -> usize {
        let label = format!("Resource {}", self.resources.len() + 1);
        debug!(resource = %label, "Resource added");
        self.resources.push(label);
        self.resources.len() - 1
    }

    /// One event per day for `days[start_day..=end_day]` (order of the two
    /// indices doesn't matter). Each gets its own colour. Returns how many
    /// were created.
    pub fn add_events(
        &mut self,
        days: &[NaiveDate],
        start_day: usize,
        end_day: usize,
        resource_index: usize,
    ) -> usize {
        self.add_events_with(days, start_day, end_day, resource_index, EventColor::random)
    }

    pub fn add_events_with(
        &mut self,
        days: &[NaiveDate],
        start_day: usize,
        end_day: usize,
        resource_index: usize,
        mut color: impl FnMut() -> EventColor,
    ) -> usize {
        let Some(last) = days.len().checked_sub(1) else {
            return 0;
        };
        let (start, end) = (start_day.min(end_day), start_day.max(end_day));
        if start > last {
            return 0;
        }
        let end = end.min(last);

        for (offset, date) in days[start..=end].iter().enumerate() {
            let number = self.next_number + offset as u64;
            self.events
                .push(Event::numbered(number, *date, resource_index, color()));
        }
        let created = end - start + 1;
        self.next_number += created as u64;
        debug!(created, resource_index, start, end, "Events created");
        created
    }

    /// Reschedule an event onto `date` for `resource_index`. Returns false if
    /// no event has that id.
    pub fn move_event(&mut self, id: &str, date: NaiveDate, resource_index: usize) -> bool {
        match self.events.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.date = date;
                event.resource_index = resource_index;
                debug!(event = %id, %date, resource_index, "Event moved");
                true
            }
            None => false,
        }
    }

    pub fn delete_event(&mut self, id: &str) -> Option<Event> {
        let pos = self.events.iter().position(|e| e.id == id)?;
        let removed = self.events.remove(pos);
        debug!(event = %id, "Event deleted");
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthView;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march() -> MonthView {
        MonthView::containing(ymd(2025, 3, 1))
    }

    fn fixed() -> EventColor {
        EventColor::from_hue(42.0)
    }

    #[test]
    fn default_has_nine_resources_and_no_events() {
        let schedule = Schedule::default();
        assert_eq!(schedule.resources().len(), 9);
        assert_eq!(schedule.resources()[0], "Resource 1");
        assert_eq!(schedule.resources()[8], "Resource 9");
        assert!(schedule.events().is_empty());
        assert_eq!(schedule.next_number(), 1);
    }

    #[test]
    fn add_resource_numbers_by_position() {
        let mut schedule = Schedule::new(vec!["Crane".into()], Vec::new());
        assert_eq!(schedule.add_resource(), 1);
        assert_eq!(schedule.resources(), ["Crane", "Resource 2"]);
    }

    #[test]
    fn drag_range_creates_one_event_per_day() {
        let month = march();
        let mut schedule = Schedule::default();

        let created = schedule.add_events_with(month.days(), 4, 6, 2, fixed);
        assert_eq!(created, 3);

        let ids: Vec<&str> = schedule.events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["event-1", "event-2", "event-3"]);
        let dates: Vec<NaiveDate> = schedule.events().iter().map(|e| e.date).collect();
        assert_eq!(dates, [ymd(2025, 3, 5), ymd(2025, 3, 6), ymd(2025, 3, 7)]);
        assert!(schedule.events().iter().all(|e| e.resource_index == 2));
        assert_eq!(schedule.next_number(), 4);
    }

    #[test]
    fn reversed_range_is_ordered() {
        let month = march();
        let mut schedule = Schedule::default();
        schedule.add_events_with(month.days(), 9, 7, 0, fixed);

        let first = &schedule.events()[0];
        assert_eq!(first.name, "Event 1");
        assert_eq!(first.date, ymd(2025, 3, 8));
        assert_eq!(schedule.events()[2].date, ymd(2025, 3, 10));
    }

    #[test]
    fn single_click_creates_single_event() {
        let month = march();
        let mut schedule = Schedule::default();
        assert_eq!(schedule.add_events_with(month.days(), 0, 0, 1, fixed), 1);
        assert_eq!(schedule.events()[0].date, ymd(2025, 3, 1));
    }

    #[test]
    fn range_is_clamped_to_month() {
        let month = march();
        let mut schedule = Schedule::default();
        assert_eq!(schedule.add_events_with(month.days(), 29, 40, 0, fixed), 2);
        assert_eq!(schedule.add_events_with(month.days(), 31, 35, 0, fixed), 0);
        assert_eq!(schedule.add_events_with(&[], 0, 3, 0, fixed), 0);
        assert_eq!(schedule.next_number(), 3);
    }

    #[test]
    fn numbering_continues_across_ranges() {
        let month = march();
        let mut schedule = Schedule::default();
        schedule.add_events_with(month.days(), 0, 1, 0, fixed);
        schedule.add_events_with(month.days(), 10, 10, 3, fixed);
        assert_eq!(schedule.events()[2].id, "event-3");
    }

    #[test]
    fn move_updates_date_and_resource() {
        let month = march();
        let mut schedule = Schedule::default();
        schedule.add_events_with(month.days(), 0, 0, 0, fixed);

        assert!(schedule.move_event("event-1", ymd(2025, 3, 20), 4));
        let moved = schedule.find_event("event-1").unwrap();
        assert_eq!(moved.date, ymd(2025, 3, 20));
        assert_eq!(moved.resource_index, 4);
        assert_eq!(schedule.events_on(ymd(2025, 3, 20), 4).count(), 1);
        assert_eq!(schedule.events_on(ymd(2025, 3, 1), 0).count(), 0);

        assert!(!schedule.move_event("event-99", ymd(2025, 3, 2), 0));
    }

    #[test]
    fn delete_removes_only_the_match() {
        let month = march();
        let mut schedule = Schedule::default();
        schedule.add_events_with(month.days(), 0, 2, 0, fixed);

        let removed = schedule.delete_event("event-2").unwrap();
        assert_eq!(removed.date, ymd(2025, 3, 2));
        let ids: Vec<&str> = schedule.events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["event-1", "event-3"]);
        assert!(schedule.delete_event("event-2").is_none());
    }

    #[test]
    fn counter_skips_ids_left_behind_by_deletes() {
        // After deleting event-1 of three, the count alone would re-issue event-3.
        let stored = vec![
            Event::numbered(2, ymd(2025, 3, 2), 0, fixed()),
            Event::numbered(3, ymd(2025, 3, 3), 0, fixed()),
        ];
        let mut schedule = Schedule::new(default_resources(), stored);
        assert_eq!(schedule.next_number(), 4);

        schedule.add_events_with(march().days(), 5, 5, 0, fixed);
        let ids: Vec<&str> = schedule.events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["event-2", "event-3", "event-4"]);
    }

    #[test]
    fn counter_falls_back_to_count_for_foreign_ids() {
        let mut foreign = Event::numbered(1, ymd(2025, 3, 2), 0, fixed());
        foreign.id = "imported".into();
        let schedule = Schedule::new(default_resources(), vec![foreign.clone(), foreign]);
        assert_eq!(schedule.next_number(), 3);
    }

    #[test]
    fn oversized_stored_id_does_not_overflow_counter() {
        let mut stored = Event::numbered(1, ymd(2025, 3, 2), 0, fixed());
        stored.id = format!("event-{}", u64::MAX);
        let mut schedule = Schedule::new(default_resources(), vec![stored]);
        assert_eq!(schedule.next_number(), 2);

        schedule.add_events_with(march().days(), 0, 1, 0, fixed);
        assert_eq!(schedule.events()[2].id, "event-3");

        let top = Event::numbered(u64::from(u32::MAX), ymd(2025, 3, 2), 0, fixed());
        let schedule = Schedule::new(default_resources(), vec![top]);
        assert_eq!(schedule.next_number(), u64::from(u32::MAX) + 1);
    }
}
