use serde::Serialize;

use crate::calc::percentile;
use crate::format::iso_8601;
use crate::model::{Event, EventStatus, RaceId, RaceResult, Team};

/// One derived-metrics row per race per tracked team, with the fields the
/// report renderer consumes.
#[derive(Serialize, Clone, Debug)]
pub struct RaceRow {
    pub race: RaceId,
    pub date: Option<String>,
    pub course: Option<String>,
    pub laps: u32,
    pub rank: i64,
    pub entries: usize,
    pub percentile: Option<f64>,
    pub riders: i64,
    pub team: String,
    pub distance_km: Option<f64>,
    pub time: String,
    pub speed: f64,
    pub avg_power: Option<f64>,
    pub coffee_class: String,
    pub coffee_rank: usize,
    pub coffee_entries: usize,
    pub coffee_percentile: Option<f64>,
    pub status: Option<EventStatus>,
}

#[must_use]
pub fn race_row(race: RaceId, event: &Event, result: &RaceResult, team: &Team) -> RaceRow {
    let coffee_rank = result.coffee_rank(team);
    let coffee_entries = result.coffee_class_entries(&team.coffee_class);

    RaceRow {
        race,
        date: event.race_date.map(iso_8601),
        course: event.course_name.clone(),
        laps: event.laps,
        rank: team.rank,
        entries: result.entries(),
        percentile: percentile(team.rank as usize, result.entries()),
        riders: team.rider_count,
        team: team.rider_initials_list("·"),
        distance_km: event.distance_km.map(|d| (d * 10.0).round() / 10.0),
        time: team.finish_time(),
        speed: team.average_speed(),
        avg_power: team.average_power(),
        coffee_class: team.coffee_class.clone(),
        coffee_rank,
        coffee_entries,
        coffee_percentile: percentile(coffee_rank, coffee_entries),
        status: event.status,
    }
}
