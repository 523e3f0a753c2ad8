//! Catalog construction and loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No embedded catalog named '{0}'")]
    UnknownEmbedded(String),

    #[error("Catalog defines no roles")]
    EmptyCatalog,

    #[error("Role '{0}' is defined more than once")]
    DuplicateRole(String),

    #[error("Invalid role '{id}': {reason}")]
    InvalidRole { id: String, reason: String },

    #[error("Invalid variant '{name}': {reason}")]
    InvalidVariant { name: String, reason: String },

    #[error("Variant '{name}' in {scope} collides with an existing variant of the same name")]
    VariantCollision { scope: String, name: String },
}

impl CatalogError {
    /// True when the error comes from the catalog contents rather than reading or parsing
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            CatalogError::Io { .. } | CatalogError::Yaml(_) | CatalogError::Json(_) | CatalogError::UnknownEmbedded(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_validation() {
        assert!(CatalogError::EmptyCatalog.is_validation());
        assert!(CatalogError::DuplicateRole("sales".to_string()).is_validation());

        let io = CatalogError::Io {
            path: PathBuf::from("missing.yml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(!io.is_validation());
        assert!(!CatalogError::UnknownEmbedded("legacy".to_string()).is_validation());
    }

    #[test]
    fn test_collision_message() {
        let err = CatalogError::VariantCollision {
            scope: "role 'sales'".to_string(),
            name: "concise".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Variant 'concise' in role 'sales' collides with an existing variant of the same name"
        );
    }
}
