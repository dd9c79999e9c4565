use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the `weather` array carried by both endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Primary label, e.g. "Clear", "Clouds", "Rain".
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunTimes {
    #[serde(default)]
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    /// hPa
    pub pressure: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// m/s with `units=metric`.
    pub speed: f64,
}

/// Current conditions, decoded as-is from the current-weather endpoint.
///
/// A snapshot is only ever replaced as a whole after a successful fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub name: String,
    pub sys: SunTimes,
    pub main: Readings,
    pub weather: Vec<Condition>,
    pub wind: Wind,
    /// Meters. Occasionally omitted by the API.
    #[serde(default)]
    pub visibility: Option<f64>,
}

impl WeatherSnapshot {
    /// The primary condition; the API lists the most relevant one first.
    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    pub fn sunrise(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sys.sunrise)
    }

    pub fn sunset(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.sys.sunset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempRange {
    pub temp_max: f64,
    pub temp_min: f64,
}

/// A single 3-hour step of the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: TempRange,
    pub weather: Vec<Condition>,
}

impl ForecastEntry {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        unix_to_utc(self.dt)
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

/// 5-day / 3-hour forecast, decoded as-is from the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastSnapshot {
    pub list: Vec<ForecastEntry>,
}

/// One reduced forecast entry per calendar date. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temp_max: f64,
    pub temp_min: f64,
    pub condition: String,
    pub icon: String,
}

/// Outcome of the last applied fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Connectivity {
    pub connected: bool,
    pub latency_ms: u64,
}

pub(crate) fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT_BODY: &str = r#"{
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
        "base": "stations",
        "main": {"temp": 14.62, "feels_like": 14.05, "temp_min": 13.1, "temp_max": 15.9,
                 "pressure": 1012, "humidity": 72},
        "visibility": 10000,
        "wind": {"speed": 5.14, "deg": 240},
        "dt": 1760700000,
        "sys": {"type": 2, "id": 2075535, "country": "GB", "sunrise": 1760681952, "sunset": 1760719702},
        "timezone": 3600,
        "name": "London",
        "cod": 200
    }"#;

    #[test]
    fn decodes_current_conditions_body() {
        let snap: WeatherSnapshot = serde_json::from_str(CURRENT_BODY).unwrap();

        assert_eq!(snap.name, "London");
        assert_eq!(snap.sys.country, "GB");
        assert_eq!(snap.main.pressure, 1012);
        assert_eq!(snap.main.humidity, 72);
        assert_eq!(snap.visibility, Some(10000.0));
        assert_eq!(snap.condition().map(|c| c.main.as_str()), Some("Clouds"));
        assert_eq!(snap.sunrise().unwrap().timestamp(), 1760681952);
    }

    #[test]
    fn missing_visibility_is_tolerated() {
        let body = CURRENT_BODY.replace("\"visibility\": 10000,", "");
        let snap: WeatherSnapshot = serde_json::from_str(&body).unwrap();
        assert_eq!(snap.visibility, None);
    }

    #[test]
    fn decodes_forecast_body() {
        let body = r#"{
            "cod": "200", "cnt": 2,
            "list": [
                {"dt": 1760702400, "main": {"temp": 14.0, "temp_min": 12.5, "temp_max": 14.8},
                 "weather": [{"main": "Rain", "description": "light rain", "icon": "10d"}]},
                {"dt": 1760713200, "main": {"temp": 12.0, "temp_min": 11.0, "temp_max": 12.2},
                 "weather": [{"main": "Clear", "description": "clear sky", "icon": "01n"}]}
            ],
            "city": {"name": "London", "country": "GB"}
        }"#;
        let forecast: ForecastSnapshot = serde_json::from_str(body).unwrap();

        assert_eq!(forecast.list.len(), 2);
        assert_eq!(forecast.list[0].main.temp_max, 14.8);
        assert_eq!(forecast.list[1].condition().unwrap().icon, "01n");
    }
}
