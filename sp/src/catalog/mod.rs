//! Role & Variant Catalog
//!
//! A catalog maps role ids to fixed persona text ([`RoleSpec`]) and holds the
//! variant fragments that can be composed onto any role's message.
//!
//! Catalog loading chain:
//! 1. Explicit catalog file (YAML, or JSON by `.json` extension)
//! 2. Embedded default compiled from `catalog/default.yml`
//!
//! Variant tiers:
//! - base variants apply to every role
//! - role extras apply only to their owning role and never share a name with a
//!   base variant (rejected at construction)

pub mod embedded;
mod error;
mod store;
mod types;

pub use error::CatalogError;
pub use store::Catalog;
pub use types::{CatalogDocument, EnterpriseProfile, RoleDocument, RoleSpec, VariantTemplate};
