//! Display formatting and the view model rendered by front-ends.
//!
//! Nothing here decides anything beyond unit conversion and which panels are shown.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Timelike, Utc};
use serde::Serialize;

use crate::{
    forecast::daily_summaries_in,
    model::{WeatherSnapshot, unix_to_utc},
    state::DashboardState,
};

/// Icon family for a condition label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConditionIcon {
    Sun,
    Cloud,
    CloudRain,
    CloudSnow,
}

impl ConditionIcon {
    /// Unknown labels fall back to [`ConditionIcon::Cloud`].
    pub fn for_condition(label: &str) -> Self {
        match label.to_lowercase().as_str() {
            "clear" => ConditionIcon::Sun,
            "clouds" => ConditionIcon::Cloud,
            "rain" | "drizzle" => ConditionIcon::CloudRain,
            "snow" => ConditionIcon::CloudSnow,
            _ => ConditionIcon::Cloud,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ConditionIcon::Sun => "☀",
            ConditionIcon::Cloud => "☁",
            ConditionIcon::CloudRain => "🌧",
            ConditionIcon::CloudSnow => "❄",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        if (6..18).contains(&hour) { TimeOfDay::Day } else { TimeOfDay::Night }
    }

    pub fn now() -> Self {
        Self::from_hour(Local::now().hour())
    }
}

/// Rounds halves toward positive infinity, so `-2.5` becomes `-2`.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn round_temp(celsius: f64) -> i64 {
    round_half_up(celsius)
}

pub fn wind_kmh(mps: f64) -> i64 {
    round_half_up(mps * 3.6)
}

pub fn visibility_km(meters: f64) -> String {
    format!("{:.1}", meters / 1000.0)
}

/// `06:42 AM` style time of day.
pub fn clock_time<Tz: TimeZone>(time: DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.with_timezone(tz).format("%I:%M %p").to_string()
}

/// `Mon, Jan 5` style label for a forecast day.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a, %b %-d").to_string()
}

/// Upper-cases the first letter of every word.
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroView {
    pub location: String,
    pub description: String,
    pub icon: ConditionIcon,
    pub temperature: i64,
    pub feels_like: i64,
    pub humidity_pct: u8,
    pub wind_kmh: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectivityView {
    pub connected: bool,
    pub status: &'static str,
    pub latency: String,
    pub endpoint: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayView {
    pub label: String,
    pub icon: ConditionIcon,
    pub high: i64,
    pub low: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsView {
    pub pressure_hpa: u32,
    /// `None` when the API did not report visibility.
    pub visibility_km: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

/// Everything a front-end needs to draw the dashboard once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub theme: TimeOfDay,
    pub city: String,
    pub hero: Option<HeroView>,
    /// Shown instead of the hero card when there is no weather snapshot yet.
    pub placeholder: Option<&'static str>,
    pub connectivity: ConnectivityView,
    /// `None` until a forecast snapshot exists.
    pub forecast: Option<Vec<DayView>>,
    pub metrics: Option<MetricsView>,
}

impl DashboardView {
    /// Build the view for the local time zone and current time of day.
    pub fn build(state: &DashboardState, endpoint: &'static str) -> Self {
        Self::build_in(state, endpoint, &Local, TimeOfDay::now())
    }

    pub fn build_in<Tz: TimeZone>(
        state: &DashboardState,
        endpoint: &'static str,
        tz: &Tz,
        theme: TimeOfDay,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let hero = state.weather().map(hero_view);
        let placeholder = match (&hero, state.is_loading()) {
            (Some(_), _) => None,
            (None, true) => Some("Loading weather data..."),
            (None, false) => Some("Enter a city to see weather"),
        };

        let conn = state.connectivity();
        let connectivity = ConnectivityView {
            connected: conn.connected,
            status: if conn.connected { "Connected" } else { "Disconnected" },
            latency: format!("~{}ms", conn.latency_ms),
            endpoint,
        };

        let forecast = state.forecast().map(|f| {
            daily_summaries_in(&f.list, tz)
                .into_iter()
                .map(|day| DayView {
                    label: day_label(day.date),
                    icon: ConditionIcon::for_condition(&day.condition),
                    high: round_temp(day.temp_max),
                    low: round_temp(day.temp_min),
                })
                .collect::<Vec<_>>()
        });

        let metrics = state.weather().map(|w| MetricsView {
            pressure_hpa: w.main.pressure,
            visibility_km: w.visibility.map(visibility_km),
            sunrise: unix_to_utc(w.sys.sunrise).map(|t| clock_time(t, tz)),
            sunset: unix_to_utc(w.sys.sunset).map(|t| clock_time(t, tz)),
        });

        Self {
            theme,
            city: state.city().to_string(),
            hero,
            placeholder,
            connectivity,
            forecast,
            metrics,
        }
    }
}

fn hero_view(weather: &WeatherSnapshot) -> HeroView {
    let (label, description) = weather
        .condition()
        .map(|c| (c.main.as_str(), c.description.as_str()))
        .unwrap_or_default();

    HeroView {
        location: format!("{}, {}", weather.name, weather.sys.country),
        description: capitalize_words(description),
        icon: ConditionIcon::for_condition(label),
        temperature: round_temp(weather.main.temp),
        feels_like: round_temp(weather.main.feels_like),
        humidity_pct: weather.main.humidity,
        wind_kmh: wind_kmh(weather.wind.speed),
    }
}
