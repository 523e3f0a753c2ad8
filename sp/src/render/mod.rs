//! Content Renderer
//!
//! Assembles a system message from a dotted key (`role` or
//! `role.variant[.variant...]`) and resolved parameters:
//!
//! ```text
//! intro (+ business area, + product | service)
//! tasks line
//! Knowledge cutoff=… Today=… <zone>.
//! compliance clause (omitted when neither jurisdiction nor policy URL is set)
//! variant tails, in key order
//! ```
//!
//! Variant templates use Handlebars syntax and are rendered all-or-nothing.

mod error;
mod format;
mod key;
mod renderer;
mod sentences;

pub use error::RenderError;
pub use format::SafeFormatter;
pub use key::RenderKey;
pub use renderer::{RenderOptions, Renderer, VariantPolicy};
pub use sentences::{article_for, compliance_sentence, intro_sentence, time_sentence};
