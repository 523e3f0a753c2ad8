//! Zone and date helpers backed by the IANA database in `chrono-tz`

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::debug;

/// Canonical name for the fallback zone
pub const UTC: &str = "UTC";

/// `YYYY-MM-DD`
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Spellings that all mean UTC
const UTC_ALIASES: &[&str] = &["z", "utc", "etc/utc", "gmt0", "zulu", "etc/zulu", "universal", "etc/universal"];

/// Trim and validate an IANA zone name
///
/// Missing, blank, or unknown zones become `"UTC"`. Known zones are returned in
/// their canonical spelling from the tz database.
pub fn normalize_timezone(raw: Option<&str>) -> String {
    debug!(?raw, "normalize_timezone: called");
    let candidate = raw.map(str::trim).filter(|s| !s.is_empty());

    let Some(candidate) = candidate else {
        debug!("normalize_timezone: missing or blank, using UTC");
        return UTC.to_string();
    };

    if UTC_ALIASES.contains(&candidate.to_ascii_lowercase().as_str()) {
        debug!(%candidate, "normalize_timezone: matched UTC alias");
        return UTC.to_string();
    }

    match parse_zone(candidate) {
        Some(tz) => {
            debug!(zone = %tz.name(), "normalize_timezone: valid zone");
            tz.name().to_string()
        }
        None => {
            debug!(%candidate, "normalize_timezone: unknown zone, using UTC");
            UTC.to_string()
        }
    }
}

/// True when `name` resolves to a zone in the tz database
pub fn is_valid_timezone(name: &str) -> bool {
    parse_zone(name).is_some()
}

/// Current calendar date in `tz` as `YYYY-MM-DD`
pub fn today_in_zone(tz: &str) -> String {
    today_in_zone_at(tz, Utc::now())
}

/// Calendar date of the instant `now` as seen in `tz`
///
/// Falls back to the UTC date when `tz` cannot be resolved.
pub fn today_in_zone_at(tz: &str, now: DateTime<Utc>) -> String {
    debug!(%tz, %now, "today_in_zone_at: called");
    let date = match parse_zone(tz) {
        Some(zone) => now.with_timezone(&zone).date_naive(),
        None => {
            debug!(%tz, "today_in_zone_at: unresolvable zone, using UTC date");
            now.date_naive()
        }
    };
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parse an ISO calendar date
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps; a timestamp keeps the date as
/// written in its own offset. The year must be exactly four digits and month and
/// day zero-padded.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if !raw.get(..10).is_some_and(has_calendar_shape) {
        return None;
    }
    NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Normalize `raw` to `YYYY-MM-DD`, or return `default` when it is missing or malformed
pub fn iso_date_or_default(raw: Option<&str>, default: &str) -> String {
    debug!(?raw, %default, "iso_date_or_default: called");
    match raw.and_then(parse_iso_date) {
        Some(date) => date.format(ISO_DATE_FORMAT).to_string(),
        None => {
            debug!("iso_date_or_default: using default");
            default.to_string()
        }
    }
}

/// `DDDD-DD-DD`
fn has_calendar_shape(date: &str) -> bool {
    date.bytes()
        .enumerate()
        .all(|(i, b)| if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() })
}

fn parse_zone(name: &str) -> Option<Tz> {
    name.trim().parse::<Tz>().ok()
}
