//! Derived projections of the API's day list.

use chrono::NaiveDate;

use crate::visualcrossing::DayRecord;

/// Number of entries the forecast panel shows.
pub const FORECAST_DAYS: usize = 5;

/// The record for the current calendar date, found by ISO-prefix match on
/// `datetime`.
pub fn today_view(days: &[DayRecord], today: NaiveDate) -> Option<&DayRecord> {
    let prefix = today.format("%Y-%m-%d").to_string();
    days.iter().find(|day| day.datetime.starts_with(&prefix))
}

/// The upcoming days, capped at [`FORECAST_DAYS`], in API order.
///
/// The cutoff is today's date rather than tomorrow's, so the first entry
/// usually duplicates the current-conditions record. Entries whose datetime
/// does not parse are dropped.
pub fn forecast_view(days: &[DayRecord], today: NaiveDate) -> Vec<&DayRecord> {
    days.iter()
        .filter(|day| matches!(day.date(), Some(date) if date >= today))
        .take(FORECAST_DAYS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(datetime: &str) -> DayRecord {
        DayRecord {
            datetime: datetime.to_string(),
            ..DayRecord::default()
        }
    }

    fn aug(day_of_month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day_of_month).unwrap()
    }

    #[test]
    fn today_view_matches_by_iso_prefix() {
        let days = vec![day("2026-08-05"), day("2026-08-06T00:00:00"), day("2026-08-07")];
        let hit = today_view(&days, aug(6)).expect("today present");
        assert_eq!(hit.datetime, "2026-08-06T00:00:00");
    }

    #[test]
    fn today_view_is_absent_when_no_day_matches() {
        let days = vec![day("2026-08-05"), day("2026-08-07")];
        assert!(today_view(&days, aug(6)).is_none());
    }

    #[test]
    fn forecast_includes_today_and_caps_at_five() {
        let days: Vec<DayRecord> = (4..=12).map(|d| day(&format!("2026-08-{d:02}"))).collect();
        let forecast = forecast_view(&days, aug(6));
        let dates: Vec<&str> = forecast.iter().map(|d| d.datetime.as_str()).collect();
        assert_eq!(
            dates,
            ["2026-08-06", "2026-08-07", "2026-08-08", "2026-08-09", "2026-08-10"]
        );
    }

    #[test]
    fn forecast_first_entry_duplicates_the_current_day() {
        let days = vec![day("2026-08-06"), day("2026-08-07")];
        let forecast = forecast_view(&days, aug(6));
        let current = today_view(&days, aug(6)).unwrap();
        assert_eq!(forecast[0].datetime, current.datetime);
    }

    #[test]
    fn unparseable_dates_are_dropped_from_the_forecast() {
        let days = vec![day("soon"), day("not-a-date-at-all"), day("2026-08-07")];
        let forecast = forecast_view(&days, aug(6));
        assert_eq!(forecast.len(), 1);
        assert_eq!(forecast[0].datetime, "2026-08-07");
    }
}
