use chrono::NaiveDate;

use wtrl_ttt_scraper::calc::{date_to_race, percentile, race_to_date};
use wtrl_ttt_scraper::format::{format_percent, format_time, remove_ordinal_suffix, slugify};
use wtrl_ttt_scraper::model::{RaceId, RaceResult, Rider, Team};

fn rider(rank: i64, wkg: Option<f64>, name: &str) -> Rider {
    Rider {
        team_rank: 1,
        rider_rank: rank,
        name: name.to_string(),
        position: None,
        team_name: "Test Team".to_string(),
        wkg,
        power: wkg.map(|w| w * 75.0),
        completed_laps: 2,
        total_time: 3600.0,
        time_gap: 0.0,
        avg_speed: Some(40.0),
        distance: 40000.0,
    }
}

fn team(rank: i64, coffee_class: &str, riders: Vec<Rider>) -> Team {
    Team {
        rider_count: riders.len() as i64,
        riders,
        rank,
        total_distance: 40.0,
        total_power: 0.0,
        zone: None,
        dropped_riders: 0,
        coffee_class: coffee_class.to_string(),
        team_time: Some(3600.0),
        lap_count: 2,
        avg_speed: Some(40.0),
        total_tss: 0.0,
        total_if: 0.0,
        total_np: 0.0,
        team_name: format!("Team {rank}"),
        completed: 1,
        total_time_calc: 3600.0,
    }
}

fn result(teams: Vec<Team>) -> RaceResult {
    RaceResult {
        event: Some("Test Race".to_string()),
        teams,
        success: true,
        loggedin: true,
    }
}

#[test]
fn test_race_id_round_trips_through_date() {
    for id in [1, 150, 299, 300, 301, 420] {
        let race = RaceId(id);
        assert_eq!(date_to_race(race_to_date(race)), race, "race {id}");
    }

    // the anchor itself
    let anchor = NaiveDate::from_ymd_opt(2025, 1, 16).unwrap();
    assert_eq!(race_to_date(RaceId(300)), anchor);
    assert_eq!(date_to_race(anchor), RaceId(300));

    // partial weeks floor to the most recent race
    let mid_week = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
    assert_eq!(date_to_race(mid_week), RaceId(300));
}

#[test]
fn test_percentile_boundaries() {
    assert_eq!(percentile(1, 2), Some(50.0));
    assert_eq!(percentile(1, 100), Some(99.0));
    assert_eq!(percentile(50, 50), Some(0.0));
    assert_eq!(percentile(3, 7), Some(57.1));
    assert_eq!(percentile(1, 0), None);
}

#[test]
fn test_average_power_roster_size_rule() {
    // 6 riders: exactly ranks 1-4 count, the null wkg rider never does
    let six = team(
        1,
        "Espresso",
        vec![
            rider(3, Some(3.9), "C C"),
            rider(1, Some(4.1), "A A"),
            rider(2, Some(4.0), "B B"),
            rider(4, Some(3.8), "D D"),
            rider(5, Some(2.0), "E E"),
            rider(6, None, "F F"),
        ],
    );
    assert_eq!(six.average_power(), Some(3.95));

    // exactly 5 riders is already on the big-team side of the boundary
    let five = team(
        1,
        "Espresso",
        vec![
            rider(1, Some(4.0), "A A"),
            rider(2, Some(4.0), "B B"),
            rider(3, Some(4.0), "C C"),
            rider(4, Some(2.0), "D D"),
            rider(5, Some(9.9), "E E"),
        ],
    );
    assert_eq!(five.average_power(), Some(3.5));

    // 4 riders: small-team rule, only the top three count
    let four = team(
        1,
        "Espresso",
        vec![
            rider(1, Some(4.0), "A A"),
            rider(2, Some(3.0), "B B"),
            rider(3, Some(2.0), "C C"),
            rider(4, Some(9.9), "D D"),
        ],
    );
    assert_eq!(four.average_power(), Some(3.0));

    // 3 riders: all of them
    let three = team(
        1,
        "Espresso",
        vec![
            rider(1, Some(3.0), "A A"),
            rider(2, Some(3.5), "B B"),
            rider(3, Some(4.0), "C C"),
        ],
    );
    assert_eq!(three.average_power(), Some(3.5));

    let no_wkg = team(1, "Espresso", vec![rider(1, None, "A A")]);
    assert_eq!(no_wkg.average_power(), None);
}

#[test]
fn test_coffee_rank_within_class() {
    let teams = vec![
        team(1, "Espresso", vec![rider(1, Some(4.0), "A A")]),
        team(2, "Doppio", vec![rider(1, Some(3.8), "B B")]),
        team(3, "Espresso", vec![rider(1, Some(3.6), "C C")]),
        team(4, "Espresso", vec![rider(1, Some(3.4), "D D")]),
        team(5, "Doppio", vec![rider(1, Some(3.2), "E E")]),
    ];
    let result = result(teams);

    assert_eq!(result.coffee_rank(&result.teams[0]), 1);
    assert_eq!(result.coffee_rank(&result.teams[2]), 2);
    assert_eq!(result.coffee_rank(&result.teams[3]), 3);
    assert_eq!(result.coffee_rank(&result.teams[1]), 1);
    assert_eq!(result.coffee_rank(&result.teams[4]), 2);

    assert_eq!(result.coffee_class_entries("Espresso"), 3);
    assert_eq!(result.coffee_class_entries("Doppio"), 2);
    assert_eq!(result.coffee_class_entries("Ristretto"), 0);
}

#[test]
fn test_rider_initials() {
    let cases = [
        ("John [ZC] Smith | TeamX", "JS"),
        ("7 Smith", "7S"),
        ("Anna Larsson", "AL"),
        ("Pierre Dupont (FR)", "PD"),
        ("Madonna", "M"),
        ("  spaced   out  name ", "SO"),
        ("", ""),
    ];
    for (name, expected) in cases {
        assert_eq!(rider(1, None, name).initials(), expected, "name: {name:?}");
    }
}

#[test]
fn test_rider_initials_list_sorts_by_finishing_order() {
    let t = team(
        1,
        "Espresso",
        vec![
            rider(2, Some(4.0), "Bob Brown"),
            rider(1, Some(4.1), "Anna Larsson"),
            rider(3, Some(3.9), "Carl Clark"),
        ],
    );
    assert_eq!(t.rider_initials_list("·"), "AL·BB·CC");
}

#[test]
fn test_finish_time_formatting() {
    assert_eq!(format_time(3725.5), "1:02:05.50");
    assert_eq!(format_time(65.2), "01:05.20");
    assert_eq!(format_time(0.0), "00:00.00");
    assert_eq!(format_time(3600.0), "1:00:00.00");

    let mut t = team(1, "Espresso", vec![]);
    t.team_time = Some(3725.5);
    assert_eq!(t.finish_time(), "1:02:05.50");
    t.team_time = None;
    assert_eq!(t.finish_time(), "00:00.00");
}

#[test]
fn test_average_speed_rounding() {
    let mut t = team(1, "Espresso", vec![]);
    t.avg_speed = Some(41.2345);
    assert_eq!(t.average_speed(), 41.2);
    t.avg_speed = None;
    assert_eq!(t.average_speed(), 0.0);
}

#[test]
fn test_format_helpers() {
    assert_eq!(format_percent(85.7), "85.7%");
    assert_eq!(slugify("Coalition TTT #1"), "coalition_ttt_1");
    assert_eq!(
        remove_ordinal_suffix("Thursday 1st January 2025, 2nd wave, 3rd start, 4th row"),
        "Thursday 1 January 2025, 2 wave, 3 start, 4 row"
    );
}
