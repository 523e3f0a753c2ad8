//! Content renderer: key + parameters → system message text

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::RenderError;
use super::format::SafeFormatter;
use super::key::RenderKey;
use super::sentences::{compliance_sentence, intro_sentence, time_sentence};
use crate::catalog::Catalog;
use crate::message::{Message, PromptError, PromptOptions, PromptTemplate};
use crate::params::{RawParams, ResolverDefaults, TemplateParam, resolve};

/// What to do with a variant name the role does not define
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantPolicy {
    /// Contribute nothing
    #[default]
    Lenient,
    /// Fail the render with [`RenderError::UnknownVariant`]
    Strict,
}

/// Per-renderer behavior switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub variant_policy: VariantPolicy,
}

impl RenderOptions {
    pub fn strict() -> Self {
        Self {
            variant_policy: VariantPolicy::Strict,
        }
    }
}

/// Renders system messages from an injected catalog
///
/// Stateless between calls; safe to share across threads.
pub struct Renderer {
    catalog: Arc<Catalog>,
    defaults: ResolverDefaults,
    options: RenderOptions,
    formatter: SafeFormatter,
}

impl Renderer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        debug!("Renderer::new: called");
        Self {
            catalog,
            defaults: ResolverDefaults::default(),
            options: RenderOptions::default(),
            formatter: SafeFormatter::new(),
        }
    }

    /// Renderer over the embedded default catalog
    pub fn builtin() -> Result<Self, crate::catalog::CatalogError> {
        Ok(Self::new(Arc::new(Catalog::builtin()?)))
    }

    pub fn with_defaults(mut self, defaults: ResolverDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Resolve a raw parameter bag against this renderer's catalog profile and defaults
    pub fn resolve(&self, raw: &RawParams) -> TemplateParam {
        resolve(raw, self.catalog.profile(), &self.defaults)
    }

    /// Render the system message text for `key`
    ///
    /// Sentence order: intro, tasks, time boundary, compliance (when any),
    /// then variant tails in key order.
    pub fn render(&self, key: &str, params: &TemplateParam) -> Result<String, RenderError> {
        self.render_key(&RenderKey::parse(key), params)
    }

    /// Render an already parsed key
    pub fn render_key(&self, key: &RenderKey, params: &TemplateParam) -> Result<String, RenderError> {
        debug!(%key, "Renderer::render_key: called");
        let spec = self.catalog.role(&key.role)?;
        let tails = self.variant_tails(key, params)?;

        let mut parts = vec![
            intro_sentence(spec, params),
            spec.tasks_line.trim().to_string(),
            time_sentence(params),
        ];
        if let Some(compliance) = compliance_sentence(params.jurisdiction.as_deref(), params.policy_url.as_deref()) {
            parts.push(compliance);
        }

        let mut text = parts.join(" ");
        text.push_str(&tails);

        info!("Rendered system message for '{}' ({} chars)", key, text.len());
        Ok(text.trim().to_string())
    }

    /// Resolve then render
    pub fn render_raw(&self, key: &str, raw: &RawParams) -> Result<String, RenderError> {
        self.render(key, &self.resolve(raw))
    }

    /// Rendered text as a system-role message
    pub fn render_system_message(&self, key: &str, params: &TemplateParam) -> Result<Message, RenderError> {
        debug!(%key, "Renderer::render_system_message: called");
        self.render(key, params).map(Message::system)
    }

    /// Render `key` and wrap it into a chat prompt
    pub fn build_prompt_from_key(
        &self,
        key: &str,
        params: &TemplateParam,
        options: &PromptOptions,
    ) -> Result<PromptTemplate, PromptError> {
        debug!(%key, "Renderer::build_prompt_from_key: called");
        let system_text = self.render(key, params)?;
        Ok(PromptTemplate::build(system_text, options))
    }

    fn variant_tails(&self, key: &RenderKey, params: &TemplateParam) -> Result<String, RenderError> {
        let data = params.template_data();
        let mut tails = String::new();

        for name in &key.variants {
            match self.catalog.find_variant(&key.role, name) {
                Some(variant) => {
                    debug!(variant = %name, "Renderer::variant_tails: formatting");
                    tails.push_str(&self.formatter.format(&variant.template, &data));
                }
                None => match self.options.variant_policy {
                    VariantPolicy::Lenient => {
                        debug!(variant = %name, "Renderer::variant_tails: unknown variant, skipping");
                    }
                    VariantPolicy::Strict => {
                        return Err(RenderError::UnknownVariant {
                            role: key.role.clone(),
                            variant: name.clone(),
                        });
                    }
                },
            }
        }

        Ok(tails)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogDocument, EnterpriseProfile, RoleDocument, RoleSpec, VariantTemplate};
    use crate::params::resolve_at;
    use chrono::{TimeZone, Utc};

    fn renderer() -> Renderer {
        Renderer::builtin().unwrap()
    }

    fn fixed(renderer: &Renderer, raw: RawParams) -> TemplateParam {
        let now = Utc.with_ymd_and_hms(2025, 11, 10, 15, 0, 0).unwrap();
        resolve_at(&raw, renderer.catalog().profile(), &ResolverDefaults::default(), now)
    }

    fn example_params() -> RawParams {
        RawParams::new()
            .service("Accounts Payable")
            .knowledge_cutoff("2025-06-01")
            .today("2025-11-10")
            .timezone("America/Toronto")
            .jurisdiction("SOX/PCI")
    }

    #[test]
    fn test_reference_example() {
        let r = renderer();
        let text = r.render("sales.no_hallucinations", &fixed(&r, example_params())).unwrap();
        assert!(text.starts_with("You are a Retirement Solutions Sales Advisor at Common Wealth"));
        assert!(text.contains("Accounts Payable"));
        assert!(text.contains("You provide Accounts Payable services."));
        assert!(text.contains("Knowledge cutoff=2025-06-01"));
        assert!(text.contains("Today=2025-11-10 America/Toronto"));
        assert!(text.contains("Comply with SOX/PCI policies."));
        assert!(text.contains("I don't know"));
    }

    #[test]
    fn test_sentence_order() {
        let r = renderer();
        let text = r.render("sales.no_hallucinations", &fixed(&r, example_params())).unwrap();
        let intro = text.find("You are").unwrap();
        let tasks = text.find("Tasks:").unwrap();
        let time = text.find("Knowledge cutoff=").unwrap();
        let compliance = text.find("Comply with").unwrap();
        let tail = text.find("I don't know").unwrap();
        assert!(intro < tasks && tasks < time && time < compliance && compliance < tail);
        assert!(text.ends_with("rather than guessing."));
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_every_role_renders_title() {
        let r = renderer();
        let params = fixed(&r, RawParams::new());
        for role in r.catalog().roles() {
            let text = r.render(role, &params).unwrap();
            assert!(text.contains(&r.catalog().role(role).unwrap().title));
        }
    }

    #[test]
    fn test_unknown_role() {
        let r = renderer();
        let err = r.render("astronaut.concise", &fixed(&r, RawParams::new())).unwrap_err();
        assert_eq!(
            err,
            RenderError::CatalogMiss {
                role: "astronaut".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_variant_lenient() {
        let r = renderer();
        let params = fixed(&r, example_params());
        assert_eq!(
            r.render("sales.nonexistent", &params).unwrap(),
            r.render("sales", &params).unwrap()
        );
    }

    #[test]
    fn test_unknown_variant_strict() {
        let r = renderer().with_options(RenderOptions::strict());
        let params = fixed(&r, example_params());
        let err = r.render("sales.concise.nonexistent", &params).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnknownVariant {
                role: "sales".to_string(),
                variant: "nonexistent".to_string()
            }
        );
        assert!(r.render("sales.concise", &params).is_ok());
    }

    #[test]
    fn test_extra_variant_scoped_to_role() {
        let r = renderer();
        let params = fixed(&r, RawParams::new());
        let sales = r.render("sales.value_framing", &params).unwrap();
        assert!(sales.contains("digital-first pension platform"));
        assert_eq!(r.render("hr.value_framing", &params).unwrap(), r.render("hr", &params).unwrap());
    }

    #[test]
    fn test_multiple_variants_in_order() {
        let r = renderer();
        let params = fixed(&r, RawParams::new().max_words(80));
        let text = r.render("engineering.concise.cite", &params).unwrap();
        assert!(text.ends_with(
            "Keep the response concise (≤ 80 words). When referencing documents or data, cite them as [ref:ID] with source names."
        ));
    }

    #[test]
    fn test_duplicate_variant_applied_each_time() {
        let r = renderer();
        let params = fixed(&r, RawParams::new());
        let text = r.render("hr.tone_warm.tone_warm", &params).unwrap();
        assert_eq!(text.matches("Use a warm, professional, member-centric tone.").count(), 2);
    }

    #[test]
    fn test_variant_placeholders() {
        let r = renderer();
        let params = fixed(&r, RawParams::new().locale("fr-CA").default_language("fr"));
        let text = r.render("customer_support.multilingual", &params).unwrap();
        assert!(text.contains("Respond in the user's language (fr-CA) when possible; otherwise default to fr."));
    }

    #[test]
    fn test_variant_missing_placeholder_uses_literal() {
        let r = renderer();
        let params = fixed(&r, RawParams::new().product("CarePortal"));
        let text = r.render("sales.discovery_first", &params).unwrap();
        assert!(text.contains("before positioning {{product}} or {{service}}."));

        let params = fixed(&r, RawParams::new().product("CarePortal").service("Payroll"));
        let text = r.render("sales.discovery_first", &params).unwrap();
        assert!(text.contains("before positioning CarePortal or Payroll."));
    }

    const REFUND_TEMPLATE: &str = " Apply the refund policy at {{refund_policy_url}} exactly as written.";

    /// Built-in catalog plus a base variant that reads an extra
    fn refund_renderer() -> Renderer {
        let mut doc = Catalog::builtin().unwrap().to_document();
        doc.base_variants
            .push(VariantTemplate::new("refund_policy_strict", REFUND_TEMPLATE));
        Renderer::new(Arc::new(Catalog::from_document(doc).unwrap()))
    }

    #[test]
    fn test_extras_reach_templates() {
        let r = refund_renderer();
        let params = fixed(
            &r,
            RawParams::new().extra("refund_policy_url", "https://intra.acme/policies/refunds"),
        );
        let text = r.render("sales.refund_policy_strict", &params).unwrap();
        assert!(text.ends_with("Apply the refund policy at https://intra.acme/policies/refunds exactly as written."));
    }

    #[test]
    fn test_null_or_blank_extra_keeps_literal_template() {
        let r = refund_renderer();
        for value in [serde_json::Value::Null, serde_json::Value::from("   ")] {
            let params = fixed(&r, RawParams::new().extra("refund_policy_url", value));
            let text = r.render("sales.refund_policy_strict", &params).unwrap();
            assert!(text.ends_with(REFUND_TEMPLATE.trim()), "{text}");
            assert!(!text.contains("  "));
        }
    }

    #[test]
    fn test_builtin_refund_key_is_empty_tail() {
        let r = renderer();
        let params = fixed(&r, RawParams::new().extra("refund_policy_url", "https://intra.acme/policies/refunds"));
        assert_eq!(
            r.render("sales.refund_policy_strict.hipaa_minimum", &params).unwrap(),
            r.render("sales", &params).unwrap()
        );
    }

    #[test]
    fn test_compliance_omitted() {
        let r = renderer();
        let text = r.render("sales", &fixed(&r, RawParams::new())).unwrap();
        assert!(!text.contains("Comply"));
        assert!(!text.contains("Follow internal policies"));
        assert!(text.ends_with(" UTC."));
    }

    #[test]
    fn test_product_beats_service() {
        let r = renderer();
        let text = r
            .render("sales", &fixed(&r, RawParams::new().product("X").service("Y")))
            .unwrap();
        assert!(text.contains("work with the X product"));
        assert!(!text.contains("Y services"));
    }

    #[test]
    fn test_malformed_today_uses_zone_date() {
        let r = renderer();
        let params = fixed(&r, RawParams::new().today("not-a-date").timezone("Asia/Tokyo"));
        let text = r.render("hr", &params).unwrap();
        assert!(text.contains("Today=2025-11-11 Asia/Tokyo."));
    }

    #[test]
    fn test_render_is_deterministic() {
        let r = renderer();
        let params = fixed(&r, example_params());
        assert_eq!(
            r.render("sales.concise.cite", &params).unwrap(),
            r.render("sales.concise.cite", &params).unwrap()
        );
        assert_eq!(
            r.render_raw("sales.concise", &example_params()).unwrap(),
            r.render_raw("sales.concise", &example_params()).unwrap()
        );
    }

    #[test]
    fn test_render_system_message() {
        let r = renderer();
        let msg = r.render_system_message("hr", &fixed(&r, RawParams::new())).unwrap();
        assert_eq!(msg.role, crate::message::Role::System);
        assert!(msg.content.contains("People Operations Assistant"));
    }

    #[test]
    fn test_build_prompt_from_key() {
        let r = renderer();
        let params = fixed(&r, example_params());
        let prompt = r
            .build_prompt_from_key("sales.no_hallucinations", &params, &PromptOptions::default())
            .unwrap();
        assert_eq!(prompt.system_text, r.render("sales.no_hallucinations", &params).unwrap());
        assert_eq!(prompt.history_slot.as_deref(), Some("history"));
        assert_eq!(prompt.human_slot, "input");

        let err = r
            .build_prompt_from_key("pilot", &params, &PromptOptions::default())
            .unwrap_err();
        assert!(matches!(err, PromptError::Render(RenderError::CatalogMiss { .. })));
    }

    #[test]
    fn test_injected_catalog() {
        let doc = CatalogDocument {
            profile: EnterpriseProfile {
                company: "Acme Corp".to_string(),
                industry: "Cloud Hosting".to_string(),
                business_area: None,
            },
            base_variants: vec![VariantTemplate::new("concise", " Max {{max_words}} words.")],
            roles: vec![RoleDocument {
                id: "support".to_string(),
                spec: RoleSpec {
                    title: "Escalation Engineer".to_string(),
                    responsibility: "priority incidents".to_string(),
                    tasks_line: "Tasks: triage pages.".to_string(),
                },
                variants: vec![],
            }],
        };
        let r = Renderer::new(Arc::new(Catalog::from_document(doc).unwrap()));
        let text = r.render("support.concise", &fixed(&r, RawParams::new().max_words(30))).unwrap();
        assert_eq!(
            text,
            "You are an Escalation Engineer at Acme Corp in the Cloud Hosting industry; \
             your responsibility is priority incidents. Tasks: triage pages. \
             Knowledge cutoff=1970-01-01. Today=2025-11-10 UTC. Max 30 words."
        );
    }

    #[test]
    fn test_renderer_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Renderer>();
        assert_send_sync::<Catalog>();
    }
}
