//! Calendar data types and their persisted JSON shape

use crate::constants::{EVENT_LIGHTNESS, EVENT_SATURATION, FALLBACK_EVENT_HUE};
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const EVENT_ID_PREFIX: &str = "event-";

/// One booking of one resource on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(with = "storage_date")]
    pub date: NaiveDate,
    /// Position of the owning resource in the resource list
    pub resource_index: usize,
    #[serde(default)]
    pub color: EventColor,
}

impl Event {
    /// Build the `number`th event (`event-N` / `Event N`)
    pub fn numbered(number: u64, date: NaiveDate, resource_index: usize, color: EventColor) -> Self {
        Self {
            id: format!("{}{}", EVENT_ID_PREFIX, number),
            name: format!("Event {}", number),
            date,
            resource_index,
            color,
        }
    }

    /// Numeric suffix of an `event-N` id. Suffixes past `u32::MAX` are
    /// treated as foreign ids so the counter has headroom.
    pub fn number(&self) -> Option<u64> {
        let suffix: u32 = self.id.strip_prefix(EVENT_ID_PREFIX)?.parse().ok()?;
        Some(u64::from(suffix))
    }
}

/// Event background colour. Only the hue varies; saturation and lightness are fixed.
/// Stored as a CSS `hsl(...)` string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventColor {
    hue: f32,
}

impl Default for EventColor {
    fn default() -> Self {
        Self { hue: FALLBACK_EVENT_HUE }
    }
}

impl EventColor {
    pub fn from_hue(hue: f32) -> Self {
        Self { hue: hue.rem_euclid(360.0) }
    }

    /// Random hue in [0, 360)
    pub fn random() -> Self {
        Self::from_hue(rand::thread_rng().gen_range(0.0..360.0))
    }

    pub fn hue(&self) -> f32 {
        self.hue
    }

    pub fn to_css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.hue, EVENT_SATURATION, EVENT_LIGHTNESS)
    }

    /// Reads the hue out of `hsl(H, S%, L%)`. Saturation and lightness are ignored.
    pub fn parse_css(css: &str) -> Option<Self> {
        let inner = css.trim().strip_prefix("hsl(")?;
        let hue = inner.split(',').next()?.trim().parse::<f32>().ok()?;
        hue.is_finite().then(|| Self::from_hue(hue))
    }
}

impl Serialize for EventColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

impl<'de> Deserialize<'de> for EventColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let css = String::deserialize(deserializer)?;
        Ok(Self::parse_css(&css).unwrap_or_default())
    }
}

/// Dates are written as `YYYY-MM-DD`. Reads also accept full timestamps,
/// which older stores contain.
mod storage_date {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("unrecognised date: {}", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Local).date_naive());
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|ts| ts.date())
    }
}
