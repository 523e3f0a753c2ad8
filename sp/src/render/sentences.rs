//! Fixed sentences of the system message

use crate::catalog::RoleSpec;
use crate::params::TemplateParam;

/// "an" before a vowel, "a" otherwise
pub fn article_for(phrase: &str) -> &'static str {
    match phrase.trim_start().chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Identity sentence, business area, then the product or service clause
///
/// Product takes precedence; the service clause only appears without a product.
pub fn intro_sentence(spec: &RoleSpec, params: &TemplateParam) -> String {
    let mut intro = format!(
        "You are {} {} at {} in the {} industry; your responsibility is {}.",
        article_for(&spec.title),
        spec.title,
        params.company,
        params.industry,
        spec.responsibility
    );

    if let Some(area) = &params.business_area {
        intro.push(' ');
        intro.push_str(area.trim());
    }

    if let Some(product) = &params.product {
        intro.push_str(&format!(" Now you work with the {} product.", product));
    } else if let Some(service) = &params.service {
        intro.push_str(&format!(" You provide {} services.", service));
    }

    intro
}

/// Knowledge boundary; always present
pub fn time_sentence(params: &TemplateParam) -> String {
    format!(
        "Knowledge cutoff={}. Today={} {}.",
        params.knowledge_cutoff, params.today, params.timezone
    )
}

/// Compliance clause, or `None` when neither jurisdiction nor policy URL is set
pub fn compliance_sentence(jurisdiction: Option<&str>, policy_url: Option<&str>) -> Option<String> {
    match (jurisdiction, policy_url) {
        (Some(j), Some(url)) => Some(format!("Comply with {} policies and {}.", j, url)),
        (Some(j), None) => Some(format!("Comply with {} policies.", j)),
        (None, Some(url)) => Some(format!("Follow internal policies: {}.", url)),
        (None, None) => None,
    }
}
