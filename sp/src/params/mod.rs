//! Parameter Resolver
//!
//! Merges explicit call-time arguments with the catalog's enterprise profile and
//! configured defaults. Resolution order:
//! 1. timezone (normalized, drives the default for `today`)
//! 2. knowledge cutoff and today (ISO dates, malformed input replaced)
//! 3. company, industry, business area (profile defaults)
//! 4. locale, default language, max words (configured defaults)
//! 5. extras passed through untouched

mod raw;
mod resolver;

pub use raw::RawParams;
pub use resolver::{
    DEFAULT_KNOWLEDGE_CUTOFF, DEFAULT_LANGUAGE, DEFAULT_LOCALE, DEFAULT_MAX_WORDS, ResolverDefaults, TemplateParam,
    resolve, resolve_at,
};
