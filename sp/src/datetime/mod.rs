//! Timezone and date normalization
//!
//! Every function here is total: malformed input degrades to a safe default
//! (`"UTC"` for zones, a caller-chosen date for ISO dates) instead of failing.

mod normalize;

pub use normalize::{
    ISO_DATE_FORMAT, UTC, is_valid_timezone, iso_date_or_default, normalize_timezone, parse_iso_date, today_in_zone,
    today_in_zone_at,
};
