use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use wtrl_ttt_scraper::args;
use wtrl_ttt_scraper::config::Config;
use wtrl_ttt_scraper::error::ScrapeError;
use wtrl_ttt_scraper::format::slugify;
use wtrl_ttt_scraper::model::{Event, RaceId, RaceResult};
use wtrl_ttt_scraper::report::{race_row, RaceRow};
use wtrl_ttt_scraper::scrape::client::WtrlClient;
use wtrl_ttt_scraper::scrape::resolver::{should_refresh, FetchResolver};
use wtrl_ttt_scraper::scrape::session::SessionGate;
use wtrl_ttt_scraper::storage::FsSnapshotStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::args_checks();

    // a local secret config wins over the checked-in one
    let config_path = if Path::new("config.secret.json").is_file() {
        Path::new("config.secret.json").to_path_buf()
    } else {
        args.config.clone()
    };
    println!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path)?;

    println!("Generating results for the following teams:");
    for club in &config.clubs {
        println!("  {}", club.club_name);
        for team in &club.teams {
            println!("    - {}", team.team_name);
        }
    }

    let client = WtrlClient::new(&config)?;
    let store = FsSnapshotStore::new(&args.cache_dir)?;
    let resolver = FetchResolver::new(&client, &store);

    if !SessionGate::new(&client).check().await {
        eprintln!(
            "Session tokens rejected. Log in at https://www.wtrl.racing/login/ \
             and update the credentials in {}.",
            config_path.display()
        );
        std::process::exit(1);
    }

    let today = chrono::Local::now().date_naive();
    let latest = RaceId::latest(today);
    println!("Processing races {latest} down to {}", args.oldest_race);

    let mut rows: HashMap<(String, String), Vec<RaceRow>> = HashMap::new();
    let mut event_updates: Vec<RaceId> = vec![];
    let mut result_updates: Vec<RaceId> = vec![];
    let mut errors: Vec<RaceId> = vec![];

    for id in (args.oldest_race..=latest.0).rev() {
        let race = RaceId(id);
        let resolved = resolve_race(
            &resolver,
            race,
            args.force_refresh,
            today,
            config.recent_days,
        )
        .await;

        let (event, cached_event, result, cached_result) = match resolved {
            Ok(resolved) => resolved,
            Err(ScrapeError::Authentication(e)) => {
                eprintln!("Race {race}: {e}");
                errors.push(race);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if !cached_event {
            event_updates.push(race);
        }
        if !cached_result {
            result_updates.push(race);
        }

        if let Some(result) = &result {
            collect_rows(&config, race, &event, result, &mut rows);
        }

        // pace the remote service, but only when we actually hit it
        if !(cached_event || cached_result) {
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
    }

    print_updates("Events updated", &event_updates);
    print_updates("Results updated", &result_updates);
    if errors.is_empty() {
        println!("No errors encountered.");
    } else {
        print_updates("Errors", &errors);
    }

    for club in &config.clubs {
        let club_dir = club.results_dir(&args.results_dir);
        fs::create_dir_all(&club_dir)?;
        for team in &club.teams {
            let key = (club.club_name.clone(), team.team_name.clone());
            match rows.get(&key) {
                Some(team_rows) if !team_rows.is_empty() => {
                    let path = club_dir.join(format!("{}.json", slugify(&team.team_name)));
                    fs::write(&path, serde_json::to_string_pretty(team_rows)?)?;
                    println!("Wrote {}", path.display());
                }
                _ => println!("No results found for {}", team.team_name),
            }
        }
    }

    Ok(())
}

/// Resolves the event first, re-fetches it when the refresh policy says the
/// cached copy is stale, then resolves the result under the same policy.
async fn resolve_race(
    resolver: &FetchResolver<'_>,
    race: RaceId,
    force: bool,
    today: NaiveDate,
    window_days: i64,
) -> Result<(Event, bool, Option<RaceResult>, bool), ScrapeError> {
    let (mut event, mut cached_event) = resolver.resolve_event(race, force).await?;
    let refresh = should_refresh(&event, today, window_days);
    if refresh && cached_event {
        (event, cached_event) = resolver.resolve_event(race, true).await?;
    }
    let (result, cached_result) = resolver.resolve_result(race, force || refresh).await?;
    Ok((event, cached_event, result, cached_result))
}

fn collect_rows(
    config: &Config,
    race: RaceId,
    event: &Event,
    result: &RaceResult,
    rows: &mut HashMap<(String, String), Vec<RaceRow>>,
) {
    for club in &config.clubs {
        for team_config in &club.teams {
            // exact name first, then the configured aliases
            let team = result.team(&team_config.team_name).or_else(|| {
                team_config
                    .aliases
                    .iter()
                    .find_map(|alias| result.team(alias))
            });

            if let Some(team) = team {
                rows.entry((club.club_name.clone(), team_config.team_name.clone()))
                    .or_default()
                    .push(race_row(race, event, result, team));
            }
        }
    }
}

fn print_updates(label: &str, races: &[RaceId]) {
    if races.is_empty() {
        println!("{label}: none.");
    } else {
        let list: Vec<String> = races.iter().map(ToString::to_string).collect();
        println!("{label} ({}): {}", races.len(), list.join(", "));
    }
}
