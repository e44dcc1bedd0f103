use chrono::NaiveDate;
use regex::Regex;
use scraper::{Html, Selector};

use crate::error::ScrapeError;
use crate::format::remove_ordinal_suffix;
use crate::model::{Event, EventStatus};

// The race page is a rendered document, not a stable API. Only the title
// heading is required; every other field degrades to its undefined
// representation so one malformed region cannot block the rest.

fn heading_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn parse_course(text: &str) -> (Option<String>, u32, Option<f64>) {
    let name_re = Regex::new(r"^(.*?)-").unwrap();
    let laps_re = Regex::new(r"-\s*(\d+)\s*Laps").unwrap();
    let distance_re = Regex::new(r"\(([\d.]+)km\)").unwrap();

    let course_name = name_re
        .captures(text)
        .map(|c| c[1].trim().to_string())
        .filter(|n| !n.is_empty());
    let laps = laps_re
        .captures(text)
        .and_then(|c| c[1].parse().ok())
        .unwrap_or(1);
    let distance_km = distance_re.captures(text).and_then(|c| c[1].parse().ok());

    (course_name, laps, distance_km)
}

fn parse_race_date(text: &str) -> Option<NaiveDate> {
    let date_re = Regex::new(r"(\d+\s\w+\s\d{4})").unwrap();
    let clean = remove_ordinal_suffix(text);
    let captured = date_re.captures(&clean)?;
    NaiveDate::parse_from_str(&captured[1], "%d %B %Y").ok()
}

fn parse_status(text: &str) -> Option<EventStatus> {
    // the heading concatenates other text after the status word
    let status_re = Regex::new(r"^(Finalised|Provisional)").unwrap();
    match status_re.captures(text)?.get(1)?.as_str() {
        "Finalised" => Some(EventStatus::Finalised),
        "Provisional" => Some(EventStatus::Provisional),
        _ => None,
    }
}

/// Extracts an [`Event`] from the race page HTML.
///
/// # Errors
///
/// Will return `Err` only when the title heading is missing entirely; field
/// level parse failures yield `None` fields instead.
pub fn parse_event(html: &str) -> Result<Event, ScrapeError> {
    let document = Html::parse_document(html);

    let title_sel = Selector::parse("h3.text-center").unwrap();
    let course_sel = Selector::parse("h5.text-center[title]").unwrap();
    let date_sel = Selector::parse("h5.text-center").unwrap();
    let status_sel = Selector::parse("h4.text-center").unwrap();

    let race_title = heading_text(&document, &title_sel)
        .ok_or_else(|| ScrapeError::Extraction("race page has no title heading".into()))?;

    let course_text = heading_text(&document, &course_sel).unwrap_or_default();
    let (course_name, laps, distance_km) = parse_course(&course_text);

    // the race date heading is the last h5 on the page
    let race_date = document
        .select(&date_sel)
        .last()
        .map(|el| el.text().collect::<String>())
        .and_then(|text| parse_race_date(&text));

    let status = heading_text(&document, &status_sel).and_then(|text| parse_status(&text));

    Ok(Event {
        race_title,
        course_name,
        laps,
        distance_km,
        race_date,
        status,
    })
}
