//! Resolve a raw parameter bag into a complete [`TemplateParam`]

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::raw::RawParams;
use crate::catalog::EnterpriseProfile;
use crate::datetime::{iso_date_or_default, normalize_timezone, today_in_zone_at};

/// Epoch; deliberately conservative until a real cutoff is configured
pub const DEFAULT_KNOWLEDGE_CUTOFF: &str = "1970-01-01";

pub const DEFAULT_LOCALE: &str = "en";

pub const DEFAULT_LANGUAGE: &str = "en";

pub const DEFAULT_MAX_WORDS: u32 = 120;

/// Fallback values applied when the caller omits a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResolverDefaults {
    pub knowledge_cutoff: String,
    /// Zone used when the caller gives none; `None` means UTC
    pub timezone: Option<String>,
    pub locale: String,
    pub default_language: String,
    pub max_words: u32,
}

impl Default for ResolverDefaults {
    fn default() -> Self {
        Self {
            knowledge_cutoff: DEFAULT_KNOWLEDGE_CUTOFF.to_string(),
            timezone: None,
            locale: DEFAULT_LOCALE.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            max_words: DEFAULT_MAX_WORDS,
        }
    }
}

/// Fully resolved parameters for one render call
///
/// `knowledge_cutoff` and `today` are always `YYYY-MM-DD`; `timezone` is always
/// a valid IANA name or `"UTC"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateParam {
    pub company: String,
    pub industry: String,
    pub business_area: Option<String>,
    pub product: Option<String>,
    pub service: Option<String>,
    pub jurisdiction: Option<String>,
    pub policy_url: Option<String>,
    pub knowledge_cutoff: String,
    pub today: String,
    pub timezone: String,
    pub locale: String,
    pub default_language: String,
    pub max_words: u32,
    pub extra: BTreeMap<String, Value>,
}

impl TemplateParam {
    /// Values visible to variant templates
    ///
    /// Extras go in first so a named field always wins over an extra of the same
    /// name. Absent optional fields and null or blank extras are left out, which
    /// makes a template that references them fall back to its literal text.
    pub fn template_data(&self) -> Value {
        let mut data: Map<String, Value> = self
            .extra
            .iter()
            .filter(|(_, value)| present_value(value))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let mut put = |key: &str, value: Option<&str>| {
            if let Some(value) = value {
                data.insert(key.to_string(), Value::String(value.to_string()));
            }
        };
        put("company", Some(self.company.as_str()));
        put("industry", Some(self.industry.as_str()));
        put("business_area", self.business_area.as_deref());
        put("product", self.product.as_deref());
        put("service", self.service.as_deref());
        put("jurisdiction", self.jurisdiction.as_deref());
        put("policy_url", self.policy_url.as_deref());
        put("knowledge_cutoff", Some(self.knowledge_cutoff.as_str()));
        put("today", Some(self.today.as_str()));
        put("timezone", Some(self.timezone.as_str()));
        put("locale", Some(self.locale.as_str()));
        put("default_language", Some(self.default_language.as_str()));
        data.insert("max_words".to_string(), Value::from(self.max_words));

        Value::Object(data)
    }
}

/// Resolve against the current clock
pub fn resolve(raw: &RawParams, profile: &EnterpriseProfile, defaults: &ResolverDefaults) -> TemplateParam {
    resolve_at(raw, profile, defaults, Utc::now())
}

/// Resolve with `now` as the clock instant used to derive a missing `today`
///
/// Never fails: every malformed field degrades to its default.
pub fn resolve_at(
    raw: &RawParams,
    profile: &EnterpriseProfile,
    defaults: &ResolverDefaults,
    now: DateTime<Utc>,
) -> TemplateParam {
    debug!(?raw, "resolve_at: called");

    // Timezone first: it decides what "today" means
    let timezone = normalize_timezone(present(&raw.timezone).or(defaults.timezone.as_deref()));
    let computed_today = today_in_zone_at(&timezone, now);

    let cutoff_default = iso_date_or_default(Some(&defaults.knowledge_cutoff), DEFAULT_KNOWLEDGE_CUTOFF);
    let knowledge_cutoff = iso_date_or_default(present(&raw.knowledge_cutoff), &cutoff_default);
    let today = iso_date_or_default(present(&raw.today), &computed_today);

    let max_words = match raw.max_words {
        Some(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        Some(n) => {
            debug!(%n, "resolve_at: non-positive max_words, using default");
            positive_or_default(defaults.max_words)
        }
        None => positive_or_default(defaults.max_words),
    };

    let resolved = TemplateParam {
        company: or_default(&raw.company, &profile.company),
        industry: or_default(&raw.industry, &profile.industry),
        business_area: present(&raw.business_area)
            .or(profile.business_area.as_deref().filter(|s| !s.trim().is_empty()))
            .map(str::to_string),
        product: owned(&raw.product),
        service: owned(&raw.service),
        jurisdiction: owned(&raw.jurisdiction),
        policy_url: owned(&raw.policy_url),
        knowledge_cutoff,
        today,
        timezone,
        locale: or_default(&raw.locale, &defaults.locale),
        default_language: or_default(&raw.default_language, &defaults.default_language),
        max_words,
        extra: raw.extra.clone(),
    };
    debug!(timezone = %resolved.timezone, today = %resolved.today, "resolve_at: resolved");
    resolved
}

/// A field counts as present when it is set and not blank
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Same rule for extras: null and blank strings count as absent
fn present_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

fn owned(value: &Option<String>) -> Option<String> {
    present(value).map(str::to_string)
}

fn or_default(value: &Option<String>, default: &str) -> String {
    present(value).unwrap_or(default).to_string()
}

fn positive_or_default(value: u32) -> u32 {
    if value > 0 { value } else { DEFAULT_MAX_WORDS }
}
