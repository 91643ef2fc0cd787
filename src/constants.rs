//! Application constants and configuration

pub const APP_NAME: &str = "Resource Calendar";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Storage keys, one JSON blob each
pub const RESOURCES_KEY: &str = "resources";
pub const EVENTS_KEY: &str = "events";

/// Number of resources seeded when nothing is stored yet
pub const DEFAULT_RESOURCE_COUNT: usize = 9;

/// Saturation / lightness shared by every event colour (percent)
pub const EVENT_SATURATION: f32 = 70.0;
pub const EVENT_LIGHTNESS: f32 = 70.0;

/// Hue used when a stored colour can't be read
pub const FALLBACK_EVENT_HUE: f32 = 210.0;
