//! Local storage for Resource Calendar
//! A SQLite key-value table holding the resource list and the event list as JSON blobs

use crate::constants::{EVENTS_KEY, RESOURCES_KEY};
use crate::error::{StoreError, StoreResult};
use crate::model::Event;
use crate::schedule::{default_resources, Schedule};
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        debug!(path = %path.display(), "Database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Self {
            conn: Connection::open_in_memory()?,
        };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Raw value stored under `key`
    pub fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn load_json<T: DeserializeOwned>(&self, key: &'static str) -> StoreResult<Option<T>> {
        match self.get_item(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Json { key, source }),
            None => Ok(None),
        }
    }

    fn save_json<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Json { key, source })?;
        self.set_item(key, &raw)
    }

    pub fn load_resources(&self) -> StoreResult<Option<Vec<String>>> {
        self.load_json(RESOURCES_KEY)
    }

    /// Decoded record by record: an unreadable event is logged and skipped,
    /// the rest of the list still loads.
    pub fn load_events(&self) -> StoreResult<Option<Vec<Event>>> {
        let Some(records) = self.load_json::<Vec<serde_json::Value>>(EVENTS_KEY)? else {
            return Ok(None);
        };
        let events = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Event>(record) {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!(index, error = %e, "Skipping unreadable stored event");
                    None
                }
            })
            .collect();
        Ok(Some(events))
    }

    /// Write both blobs in one transaction
    pub fn save_schedule(&self, schedule: &Schedule) -> StoreResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        self.save_json(RESOURCES_KEY, schedule.resources())?;
        self.save_json(EVENTS_KEY, schedule.events())?;
        tx.commit()?;
        Ok(())
    }

    /// Read the stored schedule. Missing or unreadable blobs fall back to
    /// defaults independently of each other.
    pub fn load_schedule(&self) -> Schedule {
        let resources = match self.load_resources() {
            Ok(Some(resources)) => resources,
            Ok(None) => {
                debug!("No stored resources, using defaults");
                default_resources()
            }
            Err(e) => {
                warn!(error = %e, "Failed to load resources, using defaults");
                default_resources()
            }
        };
        let events = match self.load_events() {
            Ok(events) => events.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Failed to load events, starting empty");
                Vec::new()
            }
        };
        info!(resources = resources.len(), events = events.len(), "Schedule loaded");
        Schedule::new(resources, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::MonthView;
    use crate::model::EventColor;
    use chrono::NaiveDate;

    fn march() -> MonthView {
        MonthView::containing(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    }

    #[test]
    fn empty_store_yields_defaults() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_item(RESOURCES_KEY).unwrap().is_none());

        let schedule = db.load_schedule();
        assert_eq!(schedule.resources(), default_resources().as_slice());
        assert!(schedule.events().is_empty());
    }

    #[test]
    fn set_item_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.set_item("k", "one").unwrap();
        db.set_item("k", "two").unwrap();
        assert_eq!(db.get_item("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn saved_schedule_reloads() {
        let db = Database::open_in_memory().unwrap();
        let mut schedule = Schedule::default();
        schedule.add_resource();
        schedule.add_events_with(march().days(), 2, 4, 9, || EventColor::from_hue(90.0));
        schedule.delete_event("event-1");
        db.save_schedule(&schedule).unwrap();

        let reloaded = db.load_schedule();
        assert_eq!(reloaded.resources().len(), 10);
        assert_eq!(reloaded.events(), schedule.events());
        assert_eq!(reloaded.next_number(), 4);
    }

    #[test]
    fn blobs_use_the_plain_json_layout() {
        let db = Database::open_in_memory().unwrap();
        let mut schedule = Schedule::new(vec!["Van".into()], Vec::new());
        schedule.add_events_with(march().days(), 0, 0, 0, || EventColor::from_hue(0.0));
        db.save_schedule(&schedule).unwrap();

        assert_eq!(db.get_item(RESOURCES_KEY).unwrap().as_deref(), Some(r#"["Van"]"#));
        let events = db.get_item(EVENTS_KEY).unwrap().unwrap();
        assert_eq!(
            events,
            r#"[{"id":"event-1","name":"Event 1","date":"2025-03-01","resourceIndex":0,"color":"hsl(0, 70%, 70%)"}]"#
        );
    }

    #[test]
    fn malformed_blobs_fall_back_independently() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(RESOURCES_KEY, r#"["Forklift"]"#).unwrap();
        db.set_item(EVENTS_KEY, "{not json").unwrap();

        assert!(matches!(
            db.load_events(),
            Err(StoreError::Json { key: EVENTS_KEY, .. })
        ));
        let schedule = db.load_schedule();
        assert_eq!(schedule.resources(), ["Forklift"]);
        assert!(schedule.events().is_empty());
    }

    #[test]
    fn one_bad_event_does_not_drop_the_others() {
        let db = Database::open_in_memory().unwrap();
        db.set_item(
            EVENTS_KEY,
            r#"[
                {"id":"event-1","name":"Event 1","date":"2025-03-01","resourceIndex":0,"color":"hsl(10, 70%, 70%)"},
                {"id":"event-2","name":"Event 2","date":"2025-03-02","resourceIndex":1,"color":"hsl(20, 70%, 70%)"},
                {"id":"event-3","name":"Event 3","date":null,"resourceIndex":2,"color":"hsl(30, 70%, 70%)"}
            ]"#,
        )
        .unwrap();

        let mut schedule = db.load_schedule();
        let ids: Vec<&str> = schedule.events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["event-1", "event-2"]);

        schedule.add_events_with(march().days(), 5, 5, 0, || EventColor::from_hue(0.0));
        db.save_schedule(&schedule).unwrap();

        let reloaded = db.load_schedule();
        let ids: Vec<&str> = reloaded.events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["event-1", "event-2", "event-3"]);
    }

    #[test]
    fn reopening_file_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.db");
        {
            let db = Database::open(&path).unwrap();
            let mut schedule = Schedule::default();
            schedule.add_resource();
            db.save_schedule(&schedule).unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.load_schedule().resources().len(), 10);
    }
}
