//! All-or-nothing placeholder substitution for variant templates

use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, warn};

/// Renders variant templates in Handlebars strict mode
///
/// A template either renders completely or is returned verbatim: a missing
/// variable or a syntax error never yields a half-substituted string.
pub struct SafeFormatter {
    hbs: Handlebars<'static>,
}

impl SafeFormatter {
    pub fn new() -> Self {
        debug!("SafeFormatter::new: called");
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        // Plain text prompts; HTML escaping would mangle quotes and URLs
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render `template`, reporting why it failed
    pub fn try_format<T: Serialize>(&self, template: &str, data: &T) -> Result<String, handlebars::RenderError> {
        self.hbs.render_template(template, data)
    }

    /// Render `template`, falling back to its literal text on any failure
    pub fn format<T: Serialize>(&self, template: &str, data: &T) -> String {
        match self.try_format(template, data) {
            Ok(rendered) => rendered,
            Err(e) => {
                warn!(error = %e, "SafeFormatter::format: using literal template");
                template.to_string()
            }
        }
    }
}

impl Default for SafeFormatter {
    fn default() -> Self {
        Self::new()
    }
}
