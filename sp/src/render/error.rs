//! Render error types

use thiserror::Error;

/// Errors surfaced to the caller of a render
///
/// In the default lenient mode a catalog miss is the only possible error;
/// everything else degrades to a default or an empty contribution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Unknown role '{role}'")]
    CatalogMiss { role: String },

    #[error("Unknown variant '{variant}' for role '{role}'")]
    UnknownVariant { role: String, variant: String },
}

impl RenderError {
    /// Check if this is a catalog miss (unknown role)
    pub fn is_catalog_miss(&self) -> bool {
        matches!(self, RenderError::CatalogMiss { .. })
    }

    /// The role named by the failing key
    pub fn role(&self) -> &str {
        match self {
            RenderError::CatalogMiss { role } => role,
            RenderError::UnknownVariant { role, .. } => role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_catalog_miss() {
        let err = RenderError::CatalogMiss {
            role: "astronaut".to_string(),
        };
        assert!(err.is_catalog_miss());
        assert_eq!(err.role(), "astronaut");
        assert_eq!(err.to_string(), "Unknown role 'astronaut'");

        let err = RenderError::UnknownVariant {
            role: "sales".to_string(),
            variant: "nonexistent".to_string(),
        };
        assert!(!err.is_catalog_miss());
        assert_eq!(err.role(), "sales");
    }
}
