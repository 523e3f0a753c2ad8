//! sysprompt - Role-based system message renderer
//!
//! sysprompt turns a dotted render key (`sales.no_hallucinations.concise`) and a
//! loose bag of parameters into one deterministic system message for a
//! downstream language-generation call.
//!
//! # Core Concepts
//!
//! - **Roles**: fixed personas (title, responsibility, tasks) from a catalog
//! - **Variants**: composable tail fragments, shared or role-specific
//! - **Soft Degradation**: bad dates, zones, or placeholders never fail a render
//! - **Injected Catalog**: the catalog is an immutable value, not ambient state
//!
//! # Modules
//!
//! - [`datetime`] - Timezone and ISO date normalization
//! - [`catalog`] - Role & variant registry, embedded and file-backed
//! - [`params`] - Parameter resolution with defaults
//! - [`render`] - System message assembly
//! - [`message`] - Message and chat-prompt wrappers
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```
//! use sysprompt::{RawParams, Renderer};
//!
//! let renderer = Renderer::builtin()?;
//! let params = renderer.resolve(
//!     &RawParams::new()
//!         .service("Accounts Payable")
//!         .knowledge_cutoff("2025-06-01")
//!         .today("2025-11-10")
//!         .timezone("America/Toronto")
//!         .jurisdiction("SOX/PCI"),
//! );
//! let text = renderer.render("sales.no_hallucinations", &params)?;
//! assert!(text.contains("Comply with SOX/PCI policies."));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod datetime;
pub mod message;
pub mod params;
pub mod render;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogDocument, CatalogError, EnterpriseProfile, RoleSpec, VariantTemplate};
pub use config::Config;
pub use message::{Message, PromptError, PromptOptions, PromptTemplate, PromptTurn, Role};
pub use params::{RawParams, ResolverDefaults, TemplateParam, resolve, resolve_at};
pub use render::{RenderError, RenderKey, RenderOptions, Renderer, VariantPolicy};
