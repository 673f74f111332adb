//! Carbon Footprint Estimation
//!
//! Daily CO₂ estimate from three activity inputs, banded into a
//! low/moderate/high rating with a one-line suggestion, plus the capped
//! newest-first record log the dashboard keeps locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Emission factor for road travel (kg CO₂ per km)
pub const TRAVEL_KG_PER_KM: f64 = 0.21;

/// Emission factor for electricity use (kg CO₂ per kWh)
pub const ELECTRICITY_KG_PER_KWH: f64 = 0.92;

/// Emission factor for household waste (kg CO₂ per kg)
pub const WASTE_KG_PER_KG: f64 = 1.5;

/// The log never holds more than this many records; older entries drop off.
pub const MAX_RECORDS: usize = 50;

/// One day's activity amounts, as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityInput {
    /// Distance travelled (km)
    pub travel_km: f64,

    /// Electricity used (kWh)
    pub electricity_kwh: f64,

    /// Waste produced (kg)
    pub waste_kg: f64,
}

/// Footprint rating band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootprintBand {
    /// Under 5 kg CO₂
    Low,

    /// 5 to under 15 kg CO₂
    Moderate,

    /// 15 kg CO₂ and up
    High,
}

impl FootprintBand {
    /// Classify a total estimate (kg CO₂).
    pub fn from_total(total_kg: f64) -> Self {
        if total_kg < 5.0 {
            FootprintBand::Low
        } else if total_kg < 15.0 {
            FootprintBand::Moderate
        } else {
            FootprintBand::High
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FootprintBand::Low => "Low",
            FootprintBand::Moderate => "Moderate",
            FootprintBand::High => "High",
        }
    }

    /// Suggestion line shown under the estimate.
    pub fn suggestion(&self) -> &'static str {
        match self {
            FootprintBand::Low => "Low footprint — keep it up.",
            FootprintBand::Moderate => "Moderate — some reductions possible.",
            FootprintBand::High => "High — consider strong reductions.",
        }
    }
}

/// A computed footprint estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintEstimate {
    /// Total estimate (kg CO₂)
    pub total_kg: f64,
    pub band: FootprintBand,
}

impl FootprintEstimate {
    /// Display string for the estimate, e.g. `12.34 kg CO₂ (est.)`.
    pub fn display(&self) -> String {
        format!("{:.2} kg CO₂ (est.)", self.total_kg)
    }
}

/// Estimate a day's footprint from activity amounts.
///
/// Linear combination of the three fixed emission factors; pure and
/// deterministic.
pub fn estimate_footprint(input: &ActivityInput) -> FootprintEstimate {
    let total_kg = input.travel_km * TRAVEL_KG_PER_KM
        + input.electricity_kwh * ELECTRICITY_KG_PER_KWH
        + input.waste_kg * WASTE_KG_PER_KG;
    FootprintEstimate {
        total_kg,
        band: FootprintBand::from_total(total_kg),
    }
}

/// One saved estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintRecord {
    pub recorded_at: DateTime<Utc>,

    /// Total estimate at the time of saving (kg CO₂)
    pub kg_co2: f64,
}

/// Newest-first list of saved estimates, capped at [`MAX_RECORDS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FootprintLog {
    records: Vec<FootprintRecord>,
}

impl FootprintLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save an estimate, timestamped now. Oldest entries drop off once
    /// the cap is reached.
    pub fn save(&mut self, kg_co2: f64) {
        self.push(FootprintRecord {
            recorded_at: Utc::now(),
            kg_co2,
        });
    }

    /// Insert a record at the front, enforcing the cap.
    pub fn push(&mut self, record: FootprintRecord) {
        self.records.insert(0, record);
        self.records.truncate(MAX_RECORDS);
    }

    /// Records, newest first.
    pub fn records(&self) -> &[FootprintRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
