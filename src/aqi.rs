//! PM2.5 → US EPA AQI Conversion
//!
//! Piecewise-linear interpolation over the fixed EPA breakpoint table
//! for PM2.5 (24-hour average, µg/m³). Each band maps a concentration
//! range linearly onto an AQI sub-range; the table covers 0.0-500.4.

/// AQI category label, including the two sentinel outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,

    /// No usable input (missing or non-numeric)
    Unknown,

    /// Numeric input outside the modeled 0.0-500.4 range
    OutOfRange,
}

impl AqiCategory {
    /// Display label, matching the EPA naming used on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitive => "Unhealthy for Sensitive",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
            AqiCategory::Unknown => "Unknown",
            AqiCategory::OutOfRange => "Out of range",
        }
    }

    /// One-line activity guidance shown next to the AQI value.
    pub fn guidance(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Air quality is good. Enjoy outdoor activities.",
            AqiCategory::Moderate => {
                "Sensitive groups should consider reducing prolonged outdoor exertion."
            }
            AqiCategory::UnhealthyForSensitive
            | AqiCategory::Unhealthy
            | AqiCategory::VeryUnhealthy => {
                "Reduce prolonged or heavy outdoor exertion. Consider masks or indoor activities."
            }
            _ => "High pollution — avoid outdoor exercise; use filtration if available.",
        }
    }
}

impl std::fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of converting one PM2.5 concentration.
///
/// `aqi` is `None` exactly when the category is a sentinel
/// ([`AqiCategory::Unknown`] or [`AqiCategory::OutOfRange`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AqiResult {
    pub aqi: Option<u16>,
    pub category: AqiCategory,
}

impl AqiResult {
    /// True when an index value was computed.
    pub fn is_known(&self) -> bool {
        self.aqi.is_some()
    }
}

/// One EPA breakpoint band: a concentration range mapped linearly onto
/// an AQI sub-range. Both ends are inclusive.
struct Breakpoint {
    conc_low: f64,
    conc_high: f64,
    index_low: u16,
    index_high: u16,
    category: AqiCategory,
}

/// EPA PM2.5 breakpoints, ascending. The last two bands both map to
/// Hazardous; that is the EPA convention, not a duplicate row.
const BREAKPOINTS: [Breakpoint; 7] = [
    Breakpoint { conc_low: 0.0, conc_high: 12.0, index_low: 0, index_high: 50, category: AqiCategory::Good },
    Breakpoint { conc_low: 12.1, conc_high: 35.4, index_low: 51, index_high: 100, category: AqiCategory::Moderate },
    Breakpoint { conc_low: 35.5, conc_high: 55.4, index_low: 101, index_high: 150, category: AqiCategory::UnhealthyForSensitive },
    Breakpoint { conc_low: 55.5, conc_high: 150.4, index_low: 151, index_high: 200, category: AqiCategory::Unhealthy },
    Breakpoint { conc_low: 150.5, conc_high: 250.4, index_low: 201, index_high: 300, category: AqiCategory::VeryUnhealthy },
    Breakpoint { conc_low: 250.5, conc_high: 350.4, index_low: 301, index_high: 400, category: AqiCategory::Hazardous },
    Breakpoint { conc_low: 350.5, conc_high: 500.4, index_low: 401, index_high: 500, category: AqiCategory::Hazardous },
];

/// Convert a PM2.5 concentration (µg/m³) to a US AQI value and category.
///
/// Missing or non-finite input yields `{None, Unknown}`; a numeric value
/// outside every band (negative, or above 500.4) yields
/// `{None, OutOfRange}`. Within a band the standard EPA interpolation
/// applies, rounded half-away-from-zero (`f64::round`). Deterministic,
/// no side effects.
pub fn pm25_to_aqi(pm25: Option<f64>) -> AqiResult {
    let value = match pm25 {
        Some(v) if v.is_finite() => v,
        _ => {
            return AqiResult {
                aqi: None,
                category: AqiCategory::Unknown,
            }
        }
    };

    for band in &BREAKPOINTS {
        if value >= band.conc_low && value <= band.conc_high {
            let slope = f64::from(band.index_high - band.index_low)
                / (band.conc_high - band.conc_low);
            let aqi = (slope * (value - band.conc_low) + f64::from(band.index_low)).round();
            return AqiResult {
                aqi: Some(aqi as u16),
                category: band.category,
            };
        }
    }

    AqiResult {
        aqi: None,
        category: AqiCategory::OutOfRange,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_values() {
        assert_eq!(
            pm25_to_aqi(Some(0.0)),
            AqiResult { aqi: Some(0), category: AqiCategory::Good }
        );
        assert_eq!(
            pm25_to_aqi(Some(35.4)),
            AqiResult { aqi: Some(100), category: AqiCategory::Moderate }
        );
        assert_eq!(
            pm25_to_aqi(Some(500.4)),
            AqiResult { aqi: Some(500), category: AqiCategory::Hazardous }
        );
    }

    #[test]
    fn test_band_boundaries_inclusive_both_sides() {
        // Each adjacent pair: upper bound of one band, lower bound of the next
        let cases = [
            (12.0, 50, AqiCategory::Good),
            (12.1, 51, AqiCategory::Moderate),
            (35.4, 100, AqiCategory::Moderate),
            (35.5, 101, AqiCategory::UnhealthyForSensitive),
            (55.4, 150, AqiCategory::UnhealthyForSensitive),
            (55.5, 151, AqiCategory::Unhealthy),
            (150.4, 200, AqiCategory::Unhealthy),
            (150.5, 201, AqiCategory::VeryUnhealthy),
            (250.4, 300, AqiCategory::VeryUnhealthy),
            (250.5, 301, AqiCategory::Hazardous),
            (350.4, 400, AqiCategory::Hazardous),
            (350.5, 401, AqiCategory::Hazardous),
        ];
        for (conc, expected_aqi, expected_cat) in cases {
            let result = pm25_to_aqi(Some(conc));
            assert_eq!(result.aqi, Some(expected_aqi), "concentration {}", conc);
            assert_eq!(result.category, expected_cat, "concentration {}", conc);
        }
    }

    #[test]
    fn test_missing_and_non_numeric() {
        assert_eq!(
            pm25_to_aqi(None),
            AqiResult { aqi: None, category: AqiCategory::Unknown }
        );
        assert_eq!(
            pm25_to_aqi(Some(f64::NAN)),
            AqiResult { aqi: None, category: AqiCategory::Unknown }
        );
        assert_eq!(
            pm25_to_aqi(Some(f64::INFINITY)),
            AqiResult { aqi: None, category: AqiCategory::Unknown }
        );
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            pm25_to_aqi(Some(500.5)),
            AqiResult { aqi: None, category: AqiCategory::OutOfRange }
        );
        assert_eq!(
            pm25_to_aqi(Some(-1.0)),
            AqiResult { aqi: None, category: AqiCategory::OutOfRange }
        );
    }

    #[test]
    fn test_monotonic_across_bands() {
        // Ascending probe points spanning every band boundary
        let probes = [
            0.0, 5.0, 12.0, 12.1, 20.0, 35.4, 35.5, 45.0, 55.4, 55.5, 100.0,
            150.4, 150.5, 200.0, 250.4, 250.5, 300.0, 350.4, 350.5, 450.0, 500.4,
        ];
        let mut last = 0u16;
        for conc in probes {
            let aqi = pm25_to_aqi(Some(conc)).aqi.expect("in-range probe");
            assert!(aqi >= last, "AQI decreased at concentration {}", conc);
            last = aqi;
        }
    }

    #[test]
    fn test_idempotent() {
        let a = pm25_to_aqi(Some(42.0));
        let b = pm25_to_aqi(Some(42.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(AqiCategory::UnhealthyForSensitive.label(), "Unhealthy for Sensitive");
        assert_eq!(AqiCategory::OutOfRange.label(), "Out of range");
        assert_eq!(pm25_to_aqi(Some(400.0)).category.label(), "Hazardous");
    }

    #[test]
    fn test_guidance_total() {
        // Every category yields a non-empty guidance line
        let all = [
            AqiCategory::Good,
            AqiCategory::Moderate,
            AqiCategory::UnhealthyForSensitive,
            AqiCategory::Unhealthy,
            AqiCategory::VeryUnhealthy,
            AqiCategory::Hazardous,
            AqiCategory::Unknown,
            AqiCategory::OutOfRange,
        ];
        for cat in all {
            assert!(!cat.guidance().is_empty());
        }
        assert!(AqiCategory::Good.guidance().starts_with("Air quality is good"));
    }
}
