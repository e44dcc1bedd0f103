use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static STRIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s]").unwrap());
static SPACES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static ORDINAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)(st|nd|rd|th)").unwrap());

/// Elapsed seconds as `H:MM:SS.ss` when an hour or more, else `MM:SS.ss`.
#[must_use]
pub fn format_time(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor() as i64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as i64;
    let remainder = seconds % 60.0;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{remainder:05.2}")
    } else {
        format!("{minutes:02}:{remainder:05.2}")
    }
}

#[must_use]
pub fn format_percent(percent: f64) -> String {
    format!("{percent:.1}%")
}

/// Lowercase, underscore-separated form of a name, for use in file paths.
#[must_use]
pub fn slugify(val: &str) -> String {
    let slug = STRIP_RE.replace_all(val, "");
    let slug = SPACES_RE.replace_all(slug.trim(), "_");
    slug.to_lowercase()
}

/// Sortable ISO 8601 rendering of a race date.
#[must_use]
pub fn iso_8601(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Strips English ordinal suffixes from day numbers ("16th" -> "16") so the
/// race-page date text can be parsed.
#[must_use]
pub fn remove_ordinal_suffix(text: &str) -> String {
    ORDINAL_RE.replace_all(text, "$1").into_owned()
}
