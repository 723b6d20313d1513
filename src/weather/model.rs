//! Weather data as returned by a WeatherAPI.com-compatible service.
//!
//! Only the fields the app displays are modelled; unknown fields are ignored
//! and missing ones fall back to defaults.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Offsets are rounded to this granularity; real zones use multiples of it.
const OFFSET_GRANULARITY_SECONDS: i64 = 15 * 60;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherData {
    pub location: Location,
    pub current: Current,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub tz_id: String,
    pub localtime_epoch: i64,
    /// Local wall-clock time, `YYYY-MM-DD HH:MM`
    pub localtime: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Current {
    pub last_updated: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub is_day: u8,
    pub condition: Condition,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub humidity: u32,
    pub feelslike_c: f64,
    pub uv: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: u32,
}

/// One entry of a city search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CitySearchResult {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl CitySearchResult {
    /// "Name, Region, Country" without empty parts
    pub fn label(&self) -> String {
        [&self.name, &self.region, &self.country]
            .into_iter()
            .filter(|part| !part.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Location the weather was resolved for
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub country: String,
}

impl From<&WeatherData> for ResolvedLocation {
    fn from(data: &WeatherData) -> Self {
        Self {
            latitude: data.location.lat,
            longitude: data.location.lon,
            city: data.location.name.clone(),
            country: data.location.country.clone(),
        }
    }
}

/// Error body the service sends with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub message: String,
}

impl WeatherData {
    /// Condition icon as an absolute URL. The service returns
    /// protocol-relative paths (`//cdn...`).
    pub fn icon_url(&self) -> Option<String> {
        let icon = self.current.condition.icon.trim();
        if icon.is_empty() {
            None
        } else if icon.starts_with("//") {
            Some(format!("https:{}", icon))
        } else {
            Some(icon.to_string())
        }
    }

    /// UTC offset of the location, derived from its local time and epoch.
    ///
    /// `localtime` is truncated to the minute, so the raw difference is
    /// rounded to the nearest quarter hour.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        let local = NaiveDateTime::parse_from_str(&self.location.localtime, "%Y-%m-%d %H:%M").ok()?;
        let utc = DateTime::from_timestamp(self.location.localtime_epoch, 0)?.naive_utc();
        let raw = (local - utc).num_seconds();
        let rounded = ((raw as f64) / OFFSET_GRANULARITY_SECONDS as f64).round() as i64
            * OFFSET_GRANULARITY_SECONDS;
        FixedOffset::east_opt(i32::try_from(rounded).ok()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_local(localtime: &str, epoch: i64) -> WeatherData {
        WeatherData {
            location: Location {
                localtime: localtime.to_string(),
                localtime_epoch: epoch,
                ..Location::default()
            },
            ..WeatherData::default()
        }
    }

    #[test]
    fn parses_service_payload_ignoring_unknown_fields() {
        let json = r#"{
            "location": {"name": "Oslo", "region": "Oslo", "country": "Norway",
                         "lat": 59.91, "lon": 10.75, "tz_id": "Europe/Oslo",
                         "localtime_epoch": 1700000000, "localtime": "2023-11-14 23:13"},
            "current": {"temp_c": -3.0, "is_day": 0, "pressure_mb": 1012.0,
                        "condition": {"text": "Clear", "icon": "//cdn.weatherapi.com/x.png", "code": 1000}}
        }"#;
        let data: WeatherData = serde_json::from_str(json).expect("payload should parse");
        assert_eq!(data.location.name, "Oslo");
        assert_eq!(data.current.condition.code, 1000);
        assert_eq!(data.current.humidity, 0);
        assert_eq!(
            data.icon_url().as_deref(),
            Some("https://cdn.weatherapi.com/x.png")
        );
    }

    #[test]
    fn utc_offset_rounds_truncated_minutes() {
        // 1700000000 = 2023-11-14 22:13:20 UTC
        let oslo = with_local("2023-11-14 23:13", 1_700_000_000);
        assert_eq!(oslo.utc_offset(), FixedOffset::east_opt(3600));

        let kolkata = with_local("2023-11-15 03:43", 1_700_000_000);
        assert_eq!(kolkata.utc_offset(), FixedOffset::east_opt(5 * 3600 + 1800));

        let new_york = with_local("2023-11-14 17:13", 1_700_000_000);
        assert_eq!(new_york.utc_offset(), FixedOffset::west_opt(5 * 3600));

        assert_eq!(with_local("", 0).utc_offset(), None);
    }

    #[test]
    fn label_skips_empty_parts() {
        let city = CitySearchResult {
            name: "Lima".into(),
            country: "Peru".into(),
            ..CitySearchResult::default()
        };
        assert_eq!(city.label(), "Lima, Peru");
    }
}
