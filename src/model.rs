use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::format::format_time;

static PIPE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\|.*").unwrap());
static BRACKETS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]").unwrap());
static PARENS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap());
static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Identifies one weekly scheduled race. Convertible to/from a calendar date
/// via the anchor arithmetic in [`crate::calc`].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RaceId(pub i32);

impl RaceId {
    #[must_use]
    pub fn date(self) -> NaiveDate {
        crate::calc::race_to_date(self)
    }

    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        crate::calc::date_to_race(date)
    }

    /// Most recent race as of the given day.
    #[must_use]
    pub fn latest(today: NaiveDate) -> Self {
        Self::from_date(today)
    }
}

impl std::fmt::Display for RaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two independently cached record kinds for a race.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    Event,
    Result,
}

impl SnapshotKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SnapshotKind::Event => "event",
            SnapshotKind::Result => "result",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventStatus {
    Finalised,
    Provisional,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Event {
    pub race_title: String,
    pub course_name: Option<String>,
    pub laps: u32,
    pub distance_km: Option<f64>,
    pub race_date: Option<NaiveDate>,
    pub status: Option<EventStatus>,
}

impl Event {
    /// An event is finalised when the service says so, or when the race date
    /// is more than a week past. A missing race date never finalises by age.
    #[must_use]
    pub fn is_finalised(&self, today: NaiveDate) -> bool {
        if self.status == Some(EventStatus::Finalised) {
            return true;
        }
        match self.race_date {
            Some(date) => date < today - chrono::Duration::days(7),
            None => false,
        }
    }

    /// Race date falls within the trailing window ending today.
    #[must_use]
    pub fn is_recent(&self, today: NaiveDate, window_days: i64) -> bool {
        match self.race_date {
            Some(date) => date >= today - chrono::Duration::days(window_days) && date <= today,
            None => false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Rider {
    pub team_rank: i64,
    /// 1-based finishing order within the team; unique per team.
    pub rider_rank: i64,
    pub name: String,
    pub position: Option<String>,
    pub team_name: String,
    pub wkg: Option<f64>,
    pub power: Option<f64>,
    pub completed_laps: i64,
    pub total_time: f64,
    pub time_gap: f64,
    pub avg_speed: Option<f64>,
    pub distance: f64,
}

impl Rider {
    /// Display initials derived from the raw rider name. Anything after a
    /// `|` and any `[..]`/`(..)` annotations are stripped first. A numeric
    /// first token is kept whole and combined with the next token's initial.
    #[must_use]
    pub fn initials(&self) -> String {
        let clean = PIPE_RE.replace_all(&self.name, "");
        let clean = BRACKETS_RE.replace_all(&clean, "");
        let clean = PARENS_RE.replace_all(&clean, "");
        let clean = SPACES_RE.replace_all(&clean, " ");
        let clean = clean.trim();

        let parts: Vec<&str> = clean.split(' ').filter(|p| !p.is_empty()).collect();

        if parts.len() > 1 && parts[0].chars().all(|c| c.is_ascii_digit()) {
            let second_initial = parts[1]
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_default();
            return format!("{}{}", parts[0], second_initial);
        }

        parts
            .iter()
            .take(2)
            .filter_map(|p| p.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Team {
    /// Not guaranteed sorted; sort by `rider_rank` when order matters.
    pub riders: Vec<Rider>,
    /// 1-based, unique within a result.
    pub rank: i64,
    pub total_distance: f64,
    pub total_power: f64,
    pub zone: Option<i64>,
    pub dropped_riders: i64,
    pub coffee_class: String,
    pub team_time: Option<f64>,
    pub lap_count: i64,
    pub avg_speed: Option<f64>,
    pub total_tss: f64,
    pub total_if: f64,
    pub total_np: f64,
    /// Unique within a result; used as the lookup key.
    pub team_name: String,
    /// The service's own count; may disagree with `riders.len()`.
    pub rider_count: i64,
    pub completed: i64,
    pub total_time_calc: f64,
}

impl Team {
    /// Average w/kg of the riders that count toward team power. Teams of 5+
    /// score on the first four finishers; smaller teams score on their top
    /// three. Riders without a wkg reading are ignored.
    #[must_use]
    pub fn average_power(&self) -> Option<f64> {
        let selected: Vec<f64> = if self.riders.len() >= 5 {
            self.riders
                .iter()
                .filter(|r| r.rider_rank <= 4)
                .filter_map(|r| r.wkg)
                .collect()
        } else {
            let mut sorted: Vec<&Rider> = self.riders.iter().collect();
            sorted.sort_by_key(|r| r.rider_rank);
            sorted.iter().take(3).filter_map(|r| r.wkg).collect()
        };

        if selected.is_empty() {
            return None;
        }
        let mean = selected.iter().sum::<f64>() / selected.len() as f64;
        Some((mean * 100.0).round() / 100.0)
    }

    #[must_use]
    pub fn average_speed(&self) -> f64 {
        match self.avg_speed {
            Some(speed) => (speed * 10.0).round() / 10.0,
            None => 0.0,
        }
    }

    #[must_use]
    pub fn finish_time(&self) -> String {
        format_time(self.team_time.unwrap_or(0.0))
    }

    /// Rider initials in finishing order, joined with the delimiter.
    #[must_use]
    pub fn rider_initials_list(&self, delimiter: &str) -> String {
        let mut sorted: Vec<&Rider> = self.riders.iter().collect();
        sorted.sort_by_key(|r| r.rider_rank);
        sorted
            .iter()
            .map(|r| r.initials())
            .collect::<Vec<_>>()
            .join(delimiter)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RaceResult {
    pub event: Option<String>,
    pub teams: Vec<Team>,
    pub success: bool,
    pub loggedin: bool,
}

impl RaceResult {
    #[must_use]
    pub fn entries(&self) -> usize {
        self.teams.len()
    }

    #[must_use]
    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.team_name == name)
    }

    #[must_use]
    pub fn coffee_class_entries(&self, coffee_class: &str) -> usize {
        self.teams
            .iter()
            .filter(|t| t.coffee_class == coffee_class)
            .count()
    }

    /// 1-based rank of the team among teams of its coffee class, by overall
    /// rank. Overall ranks are unique upstream; were the service ever to emit
    /// duplicates, equal ranks would tie here rather than being broken.
    #[must_use]
    pub fn coffee_rank(&self, team: &Team) -> usize {
        1 + self
            .teams
            .iter()
            .filter(|other| other.coffee_class == team.coffee_class && other.rank < team.rank)
            .count()
    }
}
