//! Dotted render keys: `role[.variant]*`

use std::fmt;
use std::str::FromStr;

use tracing::debug;

/// A parsed render key
///
/// Variant order is preserved and duplicates are kept; each occurrence is
/// applied once, in order. Empty segments (`sales..concise`, `sales.`) are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderKey {
    pub role: String,
    pub variants: Vec<String>,
}

impl RenderKey {
    pub fn parse(key: &str) -> Self {
        debug!(%key, "RenderKey::parse: called");
        let mut segments = key.trim().split('.').map(str::trim);
        let role = segments.next().unwrap_or_default().to_string();
        let variants = segments.filter(|s| !s.is_empty()).map(str::to_string).collect();
        Self { role, variants }
    }

    /// Key for a role with no variants
    pub fn role_only(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            variants: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variants.push(variant.into());
        self
    }
}

impl FromStr for RenderKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for RenderKey {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl fmt::Display for RenderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.role)?;
        for variant in &self.variants {
            write!(f, ".{}", variant)?;
        }
        Ok(())
    }
}
