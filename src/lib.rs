//! Climate Guard core
//!
//! Building blocks for a city climate dashboard: PM2.5 → US EPA AQI
//! conversion, environmental hazard detection, a carbon footprint
//! estimator, and a small preference store for the bits of state the
//! dashboard keeps between sessions.
//!
//! The AQI converter and hazard classifier are pure functions with no
//! shared state; they take already-parsed numeric readings and return
//! structured results. Fetching those readings from Open-Meteo lives
//! behind the `client` feature, and the JSON API surface behind `api`.

pub mod aqi;
pub mod footprint;
pub mod hazard;
pub mod prefs;
pub mod reading;

#[cfg(feature = "client")]
pub mod openmeteo;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use aqi::{pm25_to_aqi, AqiCategory, AqiResult};
pub use footprint::{estimate_footprint, ActivityInput, FootprintBand, FootprintLog};
pub use hazard::{detect_hazards, Hazard, HazardKind, HazardLevel};
pub use prefs::{JsonFileStore, MemoryStore, PreferenceStore, Preferences, Theme};
pub use reading::EnvironmentalReading;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
