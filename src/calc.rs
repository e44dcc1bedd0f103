use chrono::{Duration, NaiveDate};

use crate::model::RaceId;

// Race #300 ran Thursday, January 16, 2025; the series is weekly.
const ANCHOR_RACE: i32 = 300;

fn anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 16).unwrap()
}

/// Date of the given race under the weekly anchor arithmetic.
#[must_use]
pub fn race_to_date(race: RaceId) -> NaiveDate {
    anchor_date() + Duration::weeks(i64::from(race.0 - ANCHOR_RACE))
}

/// Most recent race number as of the given date (floors partial weeks).
#[must_use]
pub fn date_to_race(date: NaiveDate) -> RaceId {
    let days = (date - anchor_date()).num_days();
    let weeks = days.div_euclid(7);
    RaceId(ANCHOR_RACE + weeks as i32)
}

/// Percentile for a rank among `entries` finishers, to one decimal place.
/// `None` when there are no entries.
#[must_use]
pub fn percentile(rank: usize, entries: usize) -> Option<f64> {
    if entries == 0 {
        return None;
    }
    let raw = (1.0 - rank as f64 / entries as f64) * 100.0;
    Some((raw * 10.0).round() / 10.0)
}
