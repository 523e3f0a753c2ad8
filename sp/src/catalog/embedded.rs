//! Embedded catalogs
//!
//! These are compiled into the binary from .yml files at build time.

use tracing::debug;

pub const DEFAULT_NAME: &str = "default";

/// Built-in enterprise catalog (five roles, shared base variants)
pub const DEFAULT: &str = include_str!("../../catalog/default.yml");

/// Get an embedded catalog source by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        DEFAULT_NAME => {
            debug!("get_embedded: matched default");
            Some(DEFAULT)
        }
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
