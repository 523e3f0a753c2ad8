//! Catalog value types and their on-disk document form

use serde::{Deserialize, Serialize};

/// Fixed persona text for one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoleSpec {
    /// Job title, e.g. "Retirement Solutions Sales Advisor"
    pub title: String,
    /// Completes "your responsibility is ..."
    pub responsibility: String,
    /// Emitted verbatim after the intro sentence
    pub tasks_line: String,
}

/// A named text fragment appended to the base message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantTemplate {
    pub name: String,
    /// Handlebars source; authored with a leading space
    pub template: String,
}

impl VariantTemplate {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
        }
    }
}

/// Enterprise defaults used when the caller omits company details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EnterpriseProfile {
    pub company: String,
    pub industry: String,
    /// Free-form description appended to the intro sentence
    pub business_area: Option<String>,
}

impl Default for EnterpriseProfile {
    fn default() -> Self {
        Self {
            company: "Common Wealth".to_string(),
            industry: "Retirement Finance Service".to_string(),
            business_area: None,
        }
    }
}

/// One role as written in a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoleDocument {
    pub id: String,
    #[serde(flatten)]
    pub spec: RoleSpec,
    /// Variants only this role offers, alongside the base variants
    #[serde(default)]
    pub variants: Vec<VariantTemplate>,
}

/// Serialized catalog (YAML or JSON)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CatalogDocument {
    #[serde(default)]
    pub profile: EnterpriseProfile,
    #[serde(default)]
    pub base_variants: Vec<VariantTemplate>,
    #[serde(default)]
    pub roles: Vec<RoleDocument>,
}
