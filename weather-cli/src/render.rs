use std::{
    fmt::{self, Write as _},
    io::{self, Write as _},
};

use weather_core::{
    Dashboard, DashboardView, Notification, Notifier,
    display::TimeOfDay,
};

const RULE: &str = "────────────────────────────────────────────";

/// Prints notifications to stderr.
#[derive(Debug)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: &Notification) {
        eprintln!("[!] {}: {}", notification.title, notification.description);
    }
}

pub fn print(dashboard: &Dashboard) {
    let endpoint = dashboard.endpoint().unwrap_or("OpenWeather");
    let view = DashboardView::build(dashboard.state(), endpoint);
    print!("{}", render(&view));
    let _ = io::stdout().flush();
}

pub fn prompt(loading: bool) {
    print!("{}", prompt_text(loading));
    let _ = io::stdout().flush();
}

fn prompt_text(loading: bool) -> &'static str {
    if loading { "city (loading)> " } else { "city> " }
}

/// Lay the view out as plain text.
pub fn render(view: &DashboardView) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_view(&mut out, view);
    out
}

fn write_view(out: &mut String, view: &DashboardView) -> fmt::Result {
    let theme = match view.theme {
        TimeOfDay::Day => "☀ day",
        TimeOfDay::Night => "☾ night",
    };

    writeln!(out, "{RULE}")?;
    writeln!(out, " Nimbus Cloud WeatherHub                 {theme}")?;
    writeln!(out, "{RULE}")?;

    match (&view.hero, view.placeholder) {
        (Some(hero), _) => {
            writeln!(out, " {}", hero.location)?;
            writeln!(out, " {}", hero.description)?;
            writeln!(out, " {}  {}°   Feels like {}°", hero.icon.glyph(), hero.temperature, hero.feels_like)?;
            writeln!(out, " Humidity {}%   Wind Speed {} km/h", hero.humidity_pct, hero.wind_kmh)?;
        }
        (None, Some(placeholder)) => writeln!(out, " {placeholder}")?,
        (None, None) => {}
    }

    let conn = &view.connectivity;
    let dot = if conn.connected { "●" } else { "○" };
    writeln!(out, "{RULE}")?;
    writeln!(out, " API Connectivity Status")?;
    writeln!(out, "   Cloud Upstream  {dot} {}", conn.status)?;
    writeln!(out, "   Latency         {}", conn.latency)?;
    writeln!(out, "   Endpoint        {}", conn.endpoint)?;

    if let Some(days) = &view.forecast {
        writeln!(out, "{RULE}")?;
        writeln!(out, " 5-Day Forecast")?;
        for day in days {
            writeln!(
                out,
                "   {:<12} {}  {:>3}° / {:>3}°",
                day.label,
                day.icon.glyph(),
                day.high,
                day.low
            )?;
        }
    }

    if let Some(metrics) = &view.metrics {
        let na = "n/a";
        writeln!(out, "{RULE}")?;
        writeln!(out, "   Pressure    {} hPa", metrics.pressure_hpa)?;
        writeln!(out, "   Visibility  {} km", metrics.visibility_km.as_deref().unwrap_or(na))?;
        writeln!(
            out,
            "   Sun Times   ↑ {}  ↓ {}",
            metrics.sunrise.as_deref().unwrap_or(na),
            metrics.sunset.as_deref().unwrap_or(na)
        )?;
    }

    writeln!(out, "{RULE}")
}
