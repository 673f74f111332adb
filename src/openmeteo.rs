//! Open-Meteo Client
//!
//! Fetch orchestration for the dashboard: geocode a city name, then
//! pull hourly weather and air quality for its coordinates, using
//! [`reqwest`]. Extraction of the "current hour" scalars into an
//! [`EnvironmentalReading`] is pure and unit-testable; only the fetches
//! touch the network.

use chrono::Timelike;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::reading::EnvironmentalReading;

/// Geocoding endpoint (city name → coordinates)
pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Hourly weather forecast endpoint
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Hourly air quality endpoint
pub const AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

/// Errors from the Open-Meteo layer.
#[derive(Debug, thiserror::Error)]
pub enum OpenMeteoError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Open-Meteo returned a non-2xx status code.
    #[error("Open-Meteo API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Geocoding returned no match for the requested name.
    #[error("city not found: {0}")]
    CityNotFound(String),
}

/// A geocoded place.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Display label, e.g. `Berlin, Germany`.
    pub fn label(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<Location>>,
}

/// Weather forecast payload (the fields the dashboard reads).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    pub current_weather: Option<CurrentWeather>,
    pub hourly: Option<HourlyWeather>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CurrentWeather {
    pub temperature: Option<f64>,
}

/// Hourly weather series. Open-Meteo emits null for gaps, hence the
/// nested options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HourlyWeather {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub uv_index: Vec<Option<f64>>,
}

/// Air quality payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AirQualityResponse {
    pub hourly: Option<HourlyAirQuality>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HourlyAirQuality {
    pub time: Vec<String>,
    pub pm2_5: Vec<Option<f64>>,
}

/// Combined weather + air quality for one location.
#[derive(Debug, Clone, Default)]
pub struct ClimateData {
    pub weather: ForecastResponse,
    pub air: AirQualityResponse,
}

fn first_value(series: &[Option<f64>]) -> Option<f64> {
    series.first().copied().flatten()
}

impl ClimateData {
    /// Extract the current-hour scalars into a reading.
    ///
    /// Temperature prefers the first hourly sample and falls back to
    /// `current_weather`. Missing precipitation reads as 0 mm, matching
    /// the dashboard display; PM2.5 and UV stay absent when the feeds
    /// have no sample.
    pub fn current_reading(&self) -> EnvironmentalReading {
        let hourly = self.weather.hourly.as_ref();

        let temperature = hourly
            .and_then(|h| first_value(&h.temperature_2m))
            .or_else(|| self.weather.current_weather.and_then(|c| c.temperature));
        let precipitation_last_hour = hourly
            .and_then(|h| first_value(&h.precipitation))
            .or(Some(0.0));
        let uv_index = hourly.and_then(|h| first_value(&h.uv_index));
        let pm25 = self
            .air
            .hourly
            .as_ref()
            .and_then(|h| first_value(&h.pm2_5));

        EnvironmentalReading {
            temperature,
            precipitation_last_hour,
            pm25,
            uv_index,
        }
    }

    /// PM2.5 chart series: up to `limit` leading samples as
    /// (hour label, value) pairs.
    pub fn pm25_series(&self, limit: usize) -> Vec<(String, Option<f64>)> {
        let Some(hourly) = self.air.hourly.as_ref() else {
            return Vec::new();
        };
        hourly
            .time
            .iter()
            .zip(hourly.pm2_5.iter())
            .take(limit)
            .map(|(time, pm)| {
                let label = hour_label(time).unwrap_or_else(|| time.clone());
                (label, *pm)
            })
            .collect()
    }
}

/// Chart axis label for an Open-Meteo hourly timestamp
/// (`2024-05-01T13:00` → `13:00`).
pub fn hour_label(timestamp: &str) -> Option<String> {
    let parsed = chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M").ok()?;
    Some(format!("{}:00", parsed.hour()))
}

/// HTTP client for the Open-Meteo public APIs.
pub struct OpenMeteoClient {
    client: reqwest::Client,
}

impl OpenMeteoClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Reuse an existing [`reqwest::Client`] (connection pooling).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Resolve a city name to its best-matching location.
    pub async fn geocode(&self, city: &str) -> Result<Location, OpenMeteoError> {
        let url = format!(
            "{}?name={}&count=1",
            GEOCODING_URL,
            urlencoding::encode(city)
        );
        tracing::debug!("geocoding '{}'", city);
        let geo: GeocodeResponse = self.fetch_json(&url).await?;
        geo.results
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| OpenMeteoError::CityNotFound(city.to_string()))
    }

    /// Fetch hourly weather and air quality for a coordinate pair.
    /// The two requests run concurrently.
    pub async fn fetch_climate(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<ClimateData, OpenMeteoError> {
        let weather_url = format!(
            "{}?latitude={}&longitude={}&current_weather=true&hourly=temperature_2m,precipitation,uv_index&timezone=auto",
            FORECAST_URL, latitude, longitude
        );
        let air_url = format!(
            "{}?latitude={}&longitude={}&hourly=pm2_5,pm10&timezone=auto",
            AIR_QUALITY_URL, latitude, longitude
        );

        tracing::debug!("fetching climate for {:.4},{:.4}", latitude, longitude);
        let (weather, air) = tokio::join!(
            self.fetch_json::<ForecastResponse>(&weather_url),
            self.fetch_json::<AirQualityResponse>(&air_url),
        );

        Ok(ClimateData {
            weather: weather?,
            air: air?,
        })
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, OpenMeteoError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenMeteoError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

impl Default for OpenMeteoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly_weather() -> HourlyWeather {
        HourlyWeather {
            time: vec!["2024-05-01T13:00".to_string(), "2024-05-01T14:00".to_string()],
            temperature_2m: vec![Some(21.5), Some(22.0)],
            precipitation: vec![Some(1.2), Some(0.0)],
            uv_index: vec![Some(4.5), Some(5.0)],
        }
    }

    #[test]
    fn test_current_reading_takes_first_hourly_samples() {
        let data = ClimateData {
            weather: ForecastResponse {
                current_weather: Some(CurrentWeather { temperature: Some(19.0) }),
                hourly: Some(hourly_weather()),
            },
            air: AirQualityResponse {
                hourly: Some(HourlyAirQuality {
                    time: vec!["2024-05-01T13:00".to_string()],
                    pm2_5: vec![Some(8.0)],
                }),
            },
        };
        let reading = data.current_reading();
        assert_eq!(reading.temperature, Some(21.5));
        assert_eq!(reading.precipitation_last_hour, Some(1.2));
        assert_eq!(reading.uv_index, Some(4.5));
        assert_eq!(reading.pm25, Some(8.0));
    }

    #[test]
    fn test_temperature_falls_back_to_current_weather() {
        let data = ClimateData {
            weather: ForecastResponse {
                current_weather: Some(CurrentWeather { temperature: Some(19.0) }),
                hourly: None,
            },
            air: AirQualityResponse::default(),
        };
        let reading = data.current_reading();
        assert_eq!(reading.temperature, Some(19.0));
        // No rain sample reads as 0 mm, as the dashboard displays it
        assert_eq!(reading.precipitation_last_hour, Some(0.0));
        assert_eq!(reading.pm25, None);
        assert_eq!(reading.uv_index, None);
    }

    #[test]
    fn test_pm25_series_labels_and_cap() {
        let air = AirQualityResponse {
            hourly: Some(HourlyAirQuality {
                time: (0..30).map(|h| format!("2024-05-01T{:02}:00", h % 24)).collect(),
                pm2_5: (0..30).map(|h| Some(h as f64)).collect(),
            }),
        };
        let data = ClimateData {
            weather: ForecastResponse::default(),
            air,
        };
        let series = data.pm25_series(24);
        assert_eq!(series.len(), 24);
        assert_eq!(series[0], ("0:00".to_string(), Some(0.0)));
        assert_eq!(series[13].0, "13:00");
    }

    #[test]
    fn test_hour_label() {
        assert_eq!(hour_label("2024-05-01T13:00").as_deref(), Some("13:00"));
        assert_eq!(hour_label("2024-05-01T05:00").as_deref(), Some("5:00"));
        assert_eq!(hour_label("not a timestamp"), None);
    }
}
