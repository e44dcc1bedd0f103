use serde::Deserialize;
use serde_json::Value;

use crate::error::ScrapeError;
use crate::model::{RaceResult, Rider, Team};

// The service keys rider and team fields with single letters. That shape is
// mapped onto the named model here and never leaves this module.

#[derive(Deserialize)]
struct RawRider {
    #[serde(rename = "aa")]
    team_rank: i64,
    #[serde(rename = "bb")]
    rider_rank: i64,
    #[serde(rename = "cc")]
    name: String,
    #[serde(rename = "dd")]
    position: Option<String>,
    #[serde(rename = "ee")]
    team_name: String,
    #[serde(rename = "ff")]
    wkg: Option<f64>,
    #[serde(rename = "gg")]
    power: Option<f64>,
    #[serde(rename = "ii")]
    completed_laps: i64,
    #[serde(rename = "jj")]
    total_time: f64,
    #[serde(rename = "kk")]
    time_gap: f64,
    #[serde(rename = "ll")]
    avg_speed: Option<f64>,
    #[serde(rename = "mm")]
    distance: f64,
}

#[derive(Deserialize)]
struct RawTeam {
    #[serde(rename = "a")]
    riders: Vec<RawRider>,
    #[serde(rename = "b")]
    rank: i64,
    #[serde(rename = "c")]
    total_distance: f64,
    #[serde(rename = "e")]
    total_power: f64,
    #[serde(rename = "f")]
    zone: Option<i64>,
    #[serde(rename = "g")]
    dropped_riders: i64,
    #[serde(rename = "h")]
    coffee_class: String,
    #[serde(rename = "i")]
    team_time: Option<f64>,
    #[serde(rename = "j")]
    lap_count: i64,
    #[serde(rename = "k")]
    avg_speed: Option<f64>,
    #[serde(rename = "l")]
    total_tss: f64,
    #[serde(rename = "m")]
    total_if: f64,
    #[serde(rename = "n")]
    total_np: f64,
    #[serde(rename = "o")]
    team_name: String,
    #[serde(rename = "q")]
    rider_count: i64,
    #[serde(rename = "r")]
    completed: i64,
    #[serde(rename = "z")]
    total_time_calc: f64,
}

#[derive(Deserialize)]
struct RawPayload {
    event: Option<String>,
    data: Option<Vec<Value>>,
    success: bool,
    loggedin: bool,
}

fn rider_from_raw(raw: RawRider) -> Rider {
    Rider {
        team_rank: raw.team_rank,
        rider_rank: raw.rider_rank,
        name: raw.name,
        position: raw.position,
        team_name: raw.team_name,
        wkg: raw.wkg,
        power: raw.power,
        completed_laps: raw.completed_laps,
        total_time: raw.total_time,
        time_gap: raw.time_gap,
        avg_speed: raw.avg_speed,
        distance: raw.distance,
    }
}

fn team_from_raw(raw: RawTeam) -> Team {
    Team {
        riders: raw.riders.into_iter().map(rider_from_raw).collect(),
        rank: raw.rank,
        total_distance: raw.total_distance,
        total_power: raw.total_power,
        zone: raw.zone,
        dropped_riders: raw.dropped_riders,
        coffee_class: raw.coffee_class,
        team_time: raw.team_time,
        lap_count: raw.lap_count,
        avg_speed: raw.avg_speed,
        total_tss: raw.total_tss,
        total_if: raw.total_if,
        total_np: raw.total_np,
        team_name: raw.team_name,
        rider_count: raw.rider_count,
        completed: raw.completed,
        total_time_calc: raw.total_time_calc,
    }
}

/// Normalizes a results payload. `Ok(None)` means the service reported no
/// team data for the race (future or cancelled) — a valid outcome, not an
/// error. Entries whose rider list is null signal a withdrawn team and are
/// dropped; the remainder keep their ranks unmodified.
///
/// # Errors
///
/// Will return `Err` if the payload is missing its required keys or is
/// otherwise structurally unparsable.
pub fn parse_result(payload: &Value) -> Result<Option<RaceResult>, ScrapeError> {
    // a nullable field is still a required key; only a present-but-null or
    // empty `data` means an absent result
    for key in ["event", "data", "success", "loggedin"] {
        if payload.get(key).is_none() {
            return Err(ScrapeError::Extraction(format!(
                "results payload missing key {key:?}"
            )));
        }
    }

    let raw: RawPayload = serde_json::from_value(payload.clone())
        .map_err(|e| ScrapeError::Extraction(format!("results payload: {e}")))?;

    let raw_teams = match raw.data {
        Some(teams) if !teams.is_empty() => teams,
        _ => return Ok(None),
    };

    let mut teams = Vec::with_capacity(raw_teams.len());
    for entry in raw_teams {
        // a null rider list is checked before the rest of the entry is
        // touched; withdrawn entries are not required to be well formed
        if entry.get("a").is_none_or(Value::is_null) {
            continue;
        }
        let team: RawTeam = serde_json::from_value(entry)
            .map_err(|e| ScrapeError::Extraction(format!("team entry: {e}")))?;
        teams.push(team_from_raw(team));
    }

    Ok(Some(RaceResult {
        event: raw.event,
        teams,
        success: raw.success,
        loggedin: raw.loggedin,
    }))
}
