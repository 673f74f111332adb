//! Environmental Hazard Detection
//!
//! Independent threshold rules over one [`EnvironmentalReading`]. Each
//! rule that fires produces one advisory; output order follows the
//! fixed check order (heat, cold, rain, PM2.5, UV), not severity.

use crate::reading::EnvironmentalReading;

/// Heatwave advisory at or above this temperature (°C)
pub const EXTREME_HEAT_C: f64 = 35.0;

/// Cold wave advisory at or below this temperature (°C)
pub const EXTREME_COLD_C: f64 = 0.0;

/// Flooding advisory at or above this much rain in the last hour (mm)
pub const HEAVY_RAIN_MM: f64 = 20.0;

/// Air quality advisory at or above this PM2.5 concentration (µg/m³)
pub const HIGH_PM25_UG_M3: f64 = 55.0;

/// Sunburn advisory at or above this UV index
pub const VERY_HIGH_UV: f64 = 8.0;

/// The kind of environmental risk an advisory describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HazardKind {
    ExtremeHeat,
    ExtremeCold,
    HeavyRain,
    HighPm25,
    VeryHighUv,
}

impl HazardKind {
    /// Display name as shown on the dashboard.
    pub fn display_name(&self) -> &'static str {
        match self {
            HazardKind::ExtremeHeat => "Extreme Heat",
            HazardKind::ExtremeCold => "Extreme Cold",
            HazardKind::HeavyRain => "Heavy Rain",
            HazardKind::HighPm25 => "High PM2.5",
            HazardKind::VeryHighUv => "Very High UV",
        }
    }

    /// One-sentence advice for this kind of hazard. Total over the enum,
    /// so there is no unrecognized-type fallback to defend against.
    pub fn advice(&self) -> &'static str {
        match self {
            HazardKind::ExtremeHeat => {
                "Stay hydrated, avoid outdoor exposure during peak heat."
            }
            HazardKind::ExtremeCold => {
                "Keep warm, check vulnerable people, avoid long exposure."
            }
            HazardKind::HeavyRain => "Avoid flood-prone areas and follow local warnings.",
            HazardKind::HighPm25 => {
                "Limit outdoor activity; use masks and indoor air filtration if possible."
            }
            HazardKind::VeryHighUv => {
                "Wear sunscreen and protective clothing; limit midday sun exposure."
            }
        }
    }
}

impl std::fmt::Display for HazardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Advisory severity. Only two levels exist; rules assign them fixedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HazardLevel {
    Medium,
    High,
}

impl HazardLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            HazardLevel::Medium => "Medium",
            HazardLevel::High => "High",
        }
    }
}

/// One detected environmental risk condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub kind: HazardKind,
    pub level: HazardLevel,
    pub message: String,
}

/// Treat non-finite values the same as missing ones.
fn known(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Evaluate every threshold rule against a reading.
///
/// Rules are independent and non-exclusive; a reading can trigger zero,
/// one, or several advisories. Missing fields skip their rule. Pure and
/// deterministic, never errors.
pub fn detect_hazards(reading: &EnvironmentalReading) -> Vec<Hazard> {
    let mut hazards = Vec::new();

    if let Some(t) = known(reading.temperature) {
        if t >= EXTREME_HEAT_C {
            hazards.push(Hazard {
                kind: HazardKind::ExtremeHeat,
                level: HazardLevel::High,
                message: format!("Temperature {}°C — heatwave risk.", t),
            });
        }
        if t <= EXTREME_COLD_C {
            hazards.push(Hazard {
                kind: HazardKind::ExtremeCold,
                level: HazardLevel::High,
                message: format!("Temperature {}°C — cold wave risk.", t),
            });
        }
    }

    if let Some(p) = known(reading.precipitation_last_hour) {
        if p >= HEAVY_RAIN_MM {
            hazards.push(Hazard {
                kind: HazardKind::HeavyRain,
                level: HazardLevel::Medium,
                message: format!("Rain {} mm last hour — flooding risk.", p),
            });
        }
    }

    if let Some(pm) = known(reading.pm25) {
        if pm >= HIGH_PM25_UG_M3 {
            hazards.push(Hazard {
                kind: HazardKind::HighPm25,
                level: HazardLevel::High,
                message: format!("PM2.5 {} µg/m³ — poor air quality.", pm),
            });
        }
    }

    if let Some(uv) = known(reading.uv_index) {
        if uv >= VERY_HIGH_UV {
            hazards.push(Hazard {
                kind: HazardKind::VeryHighUv,
                level: HazardLevel::Medium,
                message: format!("UV {} — sunburn risk.", uv),
            });
        }
    }

    hazards
}

/// Combined advice text for a set of advisories: the per-kind advice
/// sentences joined by spaces, or a no-action line when nothing fired.
pub fn advice_summary(hazards: &[Hazard]) -> String {
    if hazards.is_empty() {
        return "No action required.".to_string();
    }
    hazards
        .iter()
        .map(|h| h.kind.advice())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(
        temperature: Option<f64>,
        precipitation: Option<f64>,
        pm25: Option<f64>,
        uv_index: Option<f64>,
    ) -> EnvironmentalReading {
        EnvironmentalReading {
            temperature,
            precipitation_last_hour: precipitation,
            pm25,
            uv_index,
        }
    }

    #[test]
    fn test_single_heat_advisory() {
        let hazards = detect_hazards(&reading(Some(36.0), Some(0.0), Some(10.0), Some(2.0)));
        assert_eq!(hazards.len(), 1);
        assert_eq!(hazards[0].kind, HazardKind::ExtremeHeat);
        assert_eq!(hazards[0].level, HazardLevel::High);
        assert_eq!(hazards[0].message, "Temperature 36°C — heatwave risk.");
    }

    #[test]
    fn test_multiple_hazards_in_fixed_order() {
        let hazards = detect_hazards(&reading(Some(36.0), Some(25.0), Some(60.0), Some(9.0)));
        let kinds: Vec<_> = hazards.iter().map(|h| h.kind).collect();
        assert_eq!(
            kinds,
            vec![
                HazardKind::ExtremeHeat,
                HazardKind::HeavyRain,
                HazardKind::HighPm25,
                HazardKind::VeryHighUv,
            ]
        );
    }

    #[test]
    fn test_empty_reading_yields_no_hazards() {
        let hazards = detect_hazards(&EnvironmentalReading::default());
        assert!(hazards.is_empty());
        assert_eq!(advice_summary(&hazards), "No action required.");
    }

    #[test]
    fn test_thresholds_inclusive() {
        assert_eq!(
            detect_hazards(&reading(Some(35.0), None, None, None))[0].kind,
            HazardKind::ExtremeHeat
        );
        assert_eq!(
            detect_hazards(&reading(Some(0.0), None, None, None))[0].kind,
            HazardKind::ExtremeCold
        );
        assert_eq!(
            detect_hazards(&reading(None, Some(20.0), None, None))[0].kind,
            HazardKind::HeavyRain
        );
        assert_eq!(
            detect_hazards(&reading(None, None, Some(55.0), None))[0].kind,
            HazardKind::HighPm25
        );
        assert_eq!(
            detect_hazards(&reading(None, None, None, Some(8.0)))[0].kind,
            HazardKind::VeryHighUv
        );

        // Just inside the safe side of each threshold
        assert!(detect_hazards(&reading(Some(34.9), Some(19.9), Some(54.9), Some(7.9))).is_empty());
    }

    #[test]
    fn test_cold_message_and_level() {
        let hazards = detect_hazards(&reading(Some(-5.0), None, None, None));
        assert_eq!(hazards.len(), 1);
        assert_eq!(hazards[0].level, HazardLevel::High);
        assert_eq!(hazards[0].message, "Temperature -5°C — cold wave risk.");
    }

    #[test]
    fn test_non_finite_fields_are_skipped() {
        let hazards = detect_hazards(&reading(
            Some(f64::NAN),
            Some(f64::INFINITY),
            None,
            Some(9.0),
        ));
        assert_eq!(hazards.len(), 1);
        assert_eq!(hazards[0].kind, HazardKind::VeryHighUv);
    }

    #[test]
    fn test_rain_level_is_medium() {
        let hazards = detect_hazards(&reading(None, Some(30.0), None, None));
        assert_eq!(hazards[0].level, HazardLevel::Medium);
        assert_eq!(hazards[0].message, "Rain 30 mm last hour — flooding risk.");
    }

    #[test]
    fn test_advice_summary_joins_in_order() {
        let hazards = detect_hazards(&reading(Some(40.0), None, Some(80.0), None));
        let advice = advice_summary(&hazards);
        assert!(advice.starts_with("Stay hydrated"));
        assert!(advice.contains("indoor air filtration"));
    }

    #[test]
    fn test_idempotent() {
        let input = reading(Some(36.0), Some(25.0), Some(60.0), Some(9.0));
        assert_eq!(detect_hazards(&input), detect_hazards(&input));
    }
}
