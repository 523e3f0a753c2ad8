//! Caller-supplied parameter bag

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Unresolved render parameters
///
/// Every field is optional; the resolver fills gaps from the catalog profile and
/// configured defaults. Keys that are not named fields are kept in `extra` and
/// are only visible to variant templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawParams {
    pub company: Option<String>,
    pub industry: Option<String>,
    pub business_area: Option<String>,
    pub product: Option<String>,
    pub service: Option<String>,
    pub jurisdiction: Option<String>,
    pub policy_url: Option<String>,
    pub knowledge_cutoff: Option<String>,
    pub today: Option<String>,
    pub timezone: Option<String>,
    pub locale: Option<String>,
    pub default_language: Option<String>,
    #[serde(default, deserialize_with = "lenient_max_words")]
    pub max_words: Option<i64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

macro_rules! text_setters {
    ($($field:ident),* $(,)?) => {
        $(
            pub fn $field(mut self, value: impl Into<String>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )*
    };
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    text_setters!(
        company,
        industry,
        business_area,
        product,
        service,
        jurisdiction,
        policy_url,
        knowledge_cutoff,
        today,
        timezone,
        locale,
        default_language,
    );

    pub fn max_words(mut self, value: i64) -> Self {
        self.max_words = Some(value);
        self
    }

    /// Add a value for variant templates only
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Set a parameter by name from its string form
    ///
    /// Named fields are routed to their slot; anything else becomes an extra.
    /// An unparseable `max_words` is dropped so the default applies.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        debug!(%key, "RawParams::set: called");
        let slot = match key {
            "company" => &mut self.company,
            "industry" => &mut self.industry,
            "business_area" => &mut self.business_area,
            "product" => &mut self.product,
            "service" => &mut self.service,
            "jurisdiction" => &mut self.jurisdiction,
            "policy_url" => &mut self.policy_url,
            "knowledge_cutoff" => &mut self.knowledge_cutoff,
            "today" => &mut self.today,
            "timezone" => &mut self.timezone,
            "locale" => &mut self.locale,
            "default_language" => &mut self.default_language,
            "max_words" => {
                self.max_words = parse_max_words(&value);
                return;
            }
            _ => {
                self.extra.insert(key.to_string(), Value::String(value));
                return;
            }
        };
        *slot = Some(value);
    }

    /// Build from `(name, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            params.set(key.as_ref(), value);
        }
        params
    }

    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn merge(mut self, other: RawParams) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field;
                    }
                )*
            };
        }
        take!(
            company,
            industry,
            business_area,
            product,
            service,
            jurisdiction,
            policy_url,
            knowledge_cutoff,
            today,
            timezone,
            locale,
            default_language,
            max_words
        );
        self.extra.extend(other.extra);
        self
    }
}

fn parse_max_words(value: &str) -> Option<i64> {
    let parsed = value.trim().parse().ok();
    if parsed.is_none() {
        debug!(%value, "parse_max_words: ignoring unparseable max_words");
    }
    parsed
}

/// Integers and numeric strings are kept; anything else becomes `None`
fn lenient_max_words<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => parse_max_words(&s),
        Some(Value::Number(n)) if n.is_i64() => n.as_i64(),
        Some(other) => {
            debug!(%other, "lenient_max_words: ignoring non-integer max_words");
            None
        }
    })
}
