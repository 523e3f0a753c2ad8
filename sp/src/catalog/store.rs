//! Read-only role and variant registry

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use super::embedded;
use super::error::CatalogError;
use super::types::{CatalogDocument, EnterpriseProfile, RoleDocument, RoleSpec, VariantTemplate};
use crate::render::RenderError;

#[derive(Debug, Clone)]
struct RoleEntry {
    id: String,
    spec: RoleSpec,
    extras: Vec<VariantTemplate>,
}

/// Immutable catalog of roles and variants
///
/// Built once (from the embedded default or a file) and shared behind an `Arc`.
/// Construction rejects duplicate roles and any variant name that appears twice
/// in a role's effective set, so lookups never have to pick a winner.
#[derive(Debug, Clone)]
pub struct Catalog {
    profile: EnterpriseProfile,
    base_variants: Vec<VariantTemplate>,
    roles: Vec<RoleEntry>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build and validate a catalog from its document form
    pub fn from_document(doc: CatalogDocument) -> Result<Self, CatalogError> {
        debug!(
            roles = doc.roles.len(),
            base_variants = doc.base_variants.len(),
            "Catalog::from_document: called"
        );
        if doc.roles.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut base_names = HashSet::new();
        for variant in &doc.base_variants {
            validate_variant_name(&variant.name)?;
            if !base_names.insert(variant.name.as_str()) {
                return Err(CatalogError::VariantCollision {
                    scope: "base variants".to_string(),
                    name: variant.name.clone(),
                });
            }
        }

        let mut roles = Vec::with_capacity(doc.roles.len());
        let mut index = HashMap::new();
        for RoleDocument { id, spec, variants } in doc.roles {
            validate_role(&id, &spec)?;
            if index.contains_key(&id) {
                return Err(CatalogError::DuplicateRole(id));
            }

            let mut seen: HashSet<&str> = base_names.clone();
            for variant in &variants {
                validate_variant_name(&variant.name)?;
                if !seen.insert(variant.name.as_str()) {
                    return Err(CatalogError::VariantCollision {
                        scope: format!("role '{}'", id),
                        name: variant.name.clone(),
                    });
                }
            }

            index.insert(id.clone(), roles.len());
            roles.push(RoleEntry {
                id,
                spec,
                extras: variants,
            });
        }

        debug!(roles = roles.len(), "Catalog::from_document: validated");
        Ok(Self {
            profile: doc.profile,
            base_variants: doc.base_variants,
            roles,
            index,
        })
    }

    /// Parse a YAML catalog
    pub fn from_yaml_str(source: &str) -> Result<Self, CatalogError> {
        debug!(len = source.len(), "Catalog::from_yaml_str: called");
        let doc: CatalogDocument = serde_yaml::from_str(source)?;
        Self::from_document(doc)
    }

    /// Parse a JSON catalog
    pub fn from_json_str(source: &str) -> Result<Self, CatalogError> {
        debug!(len = source.len(), "Catalog::from_json_str: called");
        let doc: CatalogDocument = serde_json::from_str(source)?;
        Self::from_document(doc)
    }

    /// Load a catalog file; `.json` is parsed as JSON, anything else as YAML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!(?path, "Catalog::from_file: called");
        let source = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let catalog = if is_json {
            Self::from_json_str(&source)?
        } else {
            Self::from_yaml_str(&source)?
        };
        info!("Loaded catalog from: {} ({} roles)", path.display(), catalog.roles.len());
        Ok(catalog)
    }

    /// The catalog compiled into the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        debug!("Catalog::builtin: called");
        Self::embedded(embedded::DEFAULT_NAME)
    }

    /// Parse a catalog compiled into the binary
    pub fn embedded(name: &str) -> Result<Self, CatalogError> {
        debug!(%name, "Catalog::embedded: called");
        let source = embedded::get_embedded(name).ok_or_else(|| CatalogError::UnknownEmbedded(name.to_string()))?;
        Self::from_yaml_str(source)
    }

    /// Load from `path` when given, otherwise use the built-in catalog
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("Catalog::load: no path, using builtin");
                Self::builtin()
            }
        }
    }

    /// Enterprise defaults for company, industry and business area
    pub fn profile(&self) -> &EnterpriseProfile {
        &self.profile
    }

    /// Role ids in declaration order
    pub fn roles(&self) -> Vec<&str> {
        self.roles.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn contains_role(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Look up a role; unknown ids are a catalog miss
    pub fn role(&self, id: &str) -> Result<&RoleSpec, RenderError> {
        self.entry(id).map(|entry| &entry.spec)
    }

    /// Base variants shared by every role
    pub fn base_variants(&self) -> &[VariantTemplate] {
        &self.base_variants
    }

    /// Effective variants for a role: base variants first, then the role's extras
    pub fn variants_for(&self, role: &str) -> Result<Vec<&VariantTemplate>, RenderError> {
        let entry = self.entry(role)?;
        Ok(self.base_variants.iter().chain(entry.extras.iter()).collect())
    }

    /// Find one variant in a role's effective set
    pub fn find_variant(&self, role: &str, name: &str) -> Option<&VariantTemplate> {
        let entry = self.entry(role).ok()?;
        self.base_variants
            .iter()
            .chain(entry.extras.iter())
            .find(|variant| variant.name == name)
    }

    /// Every `role.variant` key, role-major
    pub fn list_keys(&self) -> Vec<String> {
        debug!("Catalog::list_keys: called");
        self.roles
            .iter()
            .flat_map(|entry| {
                self.base_variants
                    .iter()
                    .chain(entry.extras.iter())
                    .map(move |variant| format!("{}.{}", entry.id, variant.name))
            })
            .collect()
    }

    /// Back to document form, e.g. for exporting the built-in catalog
    pub fn to_document(&self) -> CatalogDocument {
        CatalogDocument {
            profile: self.profile.clone(),
            base_variants: self.base_variants.clone(),
            roles: self
                .roles
                .iter()
                .map(|entry| RoleDocument {
                    id: entry.id.clone(),
                    spec: entry.spec.clone(),
                    variants: entry.extras.clone(),
                })
                .collect(),
        }
    }

    fn entry(&self, id: &str) -> Result<&RoleEntry, RenderError> {
        match self.index.get(id) {
            Some(&idx) => Ok(&self.roles[idx]),
            None => {
                debug!(%id, "Catalog::entry: unknown role");
                Err(RenderError::CatalogMiss { role: id.to_string() })
            }
        }
    }
}

fn validate_role(id: &str, spec: &RoleSpec) -> Result<(), CatalogError> {
    let reason = if id.trim().is_empty() {
        Some("id is empty")
    } else if id.contains('.') {
        Some("id must not contain '.'")
    } else if spec.title.trim().is_empty() {
        Some("title is empty")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CatalogError::InvalidRole {
            id: id.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

fn validate_variant_name(name: &str) -> Result<(), CatalogError> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name.contains('.') {
        Some("name must not contain '.'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CatalogError::InvalidVariant {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
