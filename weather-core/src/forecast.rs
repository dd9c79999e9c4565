//! Reduction of the 3-hour forecast list into one summary per calendar day.

use chrono::{Local, TimeZone};

use crate::model::{DailySummary, ForecastEntry};

/// Number of days shown in the forecast strip.
pub const FORECAST_DAYS: usize = 5;

/// Reduce forecast entries to daily summaries using the local time zone.
pub fn daily_summaries(entries: &[ForecastEntry]) -> Vec<DailySummary> {
    daily_summaries_in(entries, &Local)
}

/// Reduce forecast entries to at most [`FORECAST_DAYS`] summaries, keyed by the
/// calendar date of each entry in `tz`.
///
/// The first entry seen for a date defines that day's values. Later entries for the
/// same date are skipped even when their range is wider.
pub fn daily_summaries_in<Tz: TimeZone>(entries: &[ForecastEntry], tz: &Tz) -> Vec<DailySummary> {
    let mut days: Vec<DailySummary> = Vec::with_capacity(FORECAST_DAYS);

    for entry in entries {
        let Some(time) = entry.time() else {
            tracing::debug!(dt = entry.dt, "skipping forecast entry with out-of-range timestamp");
            continue;
        };
        let date = time.with_timezone(tz).date_naive();

        if days.iter().any(|d| d.date == date) {
            continue;
        }

        let (condition, icon) = entry
            .condition()
            .map(|c| (c.main.clone(), c.icon.clone()))
            .unwrap_or_default();

        days.push(DailySummary {
            date,
            temp_max: entry.main.temp_max,
            temp_min: entry.main.temp_min,
            condition,
            icon,
        });

        if days.len() == FORECAST_DAYS {
            break;
        }
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, TempRange};
    use chrono::{FixedOffset, NaiveDate, Utc};

    fn entry(dt: i64, max: f64, min: f64, label: &str) -> ForecastEntry {
        ForecastEntry {
            dt,
            main: TempRange { temp_max: max, temp_min: min },
            weather: vec![Condition {
                main: label.to_string(),
                description: String::new(),
                icon: String::new(),
            }],
        }
    }

    /// Midnight UTC on 2026-10-`day` plus `hour` hours.
    fn at(day: i64, hour: i64) -> i64 {
        1_790_812_800 + (day - 1) * 86_400 + hour * 3_600
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(daily_summaries_in(&[], &Utc).is_empty());
    }

    #[test]
    fn keeps_first_five_dates_in_order() {
        let entries = vec![
            entry(at(1, 0), 1.0, 0.0, "Clear"),
            entry(at(1, 3), 2.0, 0.0, "Clear"),
            entry(at(2, 0), 3.0, 0.0, "Rain"),
            entry(at(3, 0), 4.0, 0.0, "Snow"),
            entry(at(3, 3), 5.0, 0.0, "Snow"),
            entry(at(3, 6), 6.0, 0.0, "Snow"),
            entry(at(4, 0), 7.0, 0.0, "Clouds"),
            entry(at(5, 0), 8.0, 0.0, "Drizzle"),
            entry(at(6, 0), 9.0, 0.0, "Clear"),
        ];

        let days = daily_summaries_in(&entries, &Utc);

        let dates: Vec<_> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(1), date(2), date(3), date(4), date(5)]);
        assert_eq!(days[2].temp_max, 4.0);
        assert_eq!(days[4].condition, "Drizzle");
    }

    #[test]
    fn first_entry_wins_without_aggregation() {
        let entries = vec![entry(at(1, 0), 10.0, 2.0, "Clouds"), entry(at(1, 3), 15.0, -1.0, "Rain")];

        let days = daily_summaries_in(&entries, &Utc);

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].temp_max, 10.0);
        assert_eq!(days[0].temp_min, 2.0);
        assert_eq!(days[0].condition, "Clouds");
    }

    #[test]
    fn fewer_dates_than_horizon() {
        let entries = vec![entry(at(1, 0), 1.0, 0.0, "Clear"), entry(at(2, 0), 1.0, 0.0, "Clear")];
        assert_eq!(daily_summaries_in(&entries, &Utc).len(), 2);
    }

    #[test]
    fn date_key_follows_time_zone() {
        // 21:00 UTC on the 1st is already the 2nd at UTC+3.
        let entries = vec![entry(at(1, 21), 1.0, 0.0, "Clear"), entry(at(1, 22), 2.0, 0.0, "Rain")];
        let plus3 = FixedOffset::east_opt(3 * 3600).unwrap();

        let utc_days = daily_summaries_in(&entries, &Utc);
        let local_days = daily_summaries_in(&entries, &plus3);

        assert_eq!(utc_days.len(), 1);
        assert_eq!(local_days.len(), 1);
        assert_eq!(local_days[0].date, date(2));
    }

    #[test]
    fn entry_without_condition_gets_empty_label() {
        let mut e = entry(at(1, 0), 1.0, 0.0, "Clear");
        e.weather.clear();

        let days = daily_summaries_in(&[e], &Utc);
        assert_eq!(days[0].condition, "");
    }
}
