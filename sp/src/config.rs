//! sysprompt configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::message::PromptOptions;
use crate::params::ResolverDefaults;
use crate::render::{RenderOptions, Renderer, VariantPolicy};

/// Project-local config file name
pub const LOCAL_CONFIG: &str = ".sysprompt.yml";

/// Main sysprompt configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub log_level: Option<String>,

    /// Catalog file; the embedded catalog is used when unset
    pub catalog: Option<PathBuf>,

    /// Fail renders that name a variant the role does not define
    pub strict_variants: bool,

    /// Resolver fallbacks
    pub defaults: ResolverDefaults,

    /// Prompt layout used by `sp prompt`
    pub prompt: PromptOptions,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .sysprompt.yml
        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/sysprompt/sysprompt.yml
        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Errors are swallowed; the full load reports them later.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates = match config_path {
            Some(path) => vec![path.clone()],
            None => std::iter::once(PathBuf::from(LOCAL_CONFIG))
                .chain(Self::user_config_path())
                .collect(),
        };

        candidates
            .iter()
            .filter(|path| path.exists())
            .find_map(|path| Self::load_from_file(path).ok())
            .and_then(|config| config.log_level)
    }

    fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sysprompt").join("sysprompt.yml"))
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            variant_policy: if self.strict_variants {
                VariantPolicy::Strict
            } else {
                VariantPolicy::Lenient
            },
        }
    }

    /// Build a renderer from this config
    ///
    /// `catalog_override` takes precedence over the configured catalog path.
    pub fn renderer(&self, catalog_override: Option<&Path>) -> Result<Renderer> {
        let path = catalog_override.or(self.catalog.as_deref());
        let catalog = Catalog::load(path).context(match path {
            Some(p) => format!("Failed to load catalog from {}", p.display()),
            None => "Failed to load built-in catalog".to_string(),
        })?;

        Ok(Renderer::new(Arc::new(catalog))
            .with_defaults(self.defaults.clone())
            .with_options(self.render_options()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.catalog.is_none());
        assert!(!config.strict_variants);
        assert_eq!(config.defaults.max_words, 120);
        assert_eq!(config.defaults.knowledge_cutoff, "1970-01-01");
        assert!(config.prompt.include_history);
        assert_eq!(config.render_options().variant_policy, VariantPolicy::Lenient);
    }

    #[test]
    fn test_load_explicit_file() {
        let file = write_temp(
            "log-level: DEBUG\nstrict-variants: true\ndefaults:\n  knowledge-cutoff: 2025-06-01\n  timezone: America/Toronto\n  max-words: 60\nprompt:\n  human-slot: question\n  include-history: false\n",
        );
        let path = file.path().to_path_buf();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
        assert!(config.strict_variants);
        assert_eq!(config.defaults.knowledge_cutoff, "2025-06-01");
        assert_eq!(config.defaults.timezone.as_deref(), Some("America/Toronto"));
        assert_eq!(config.defaults.max_words, 60);
        assert_eq!(config.defaults.locale, "en");
        assert_eq!(config.prompt.human_slot, "question");
        assert!(!config.prompt.include_history);
        assert_eq!(config.prompt.history_slot, "history");
        assert_eq!(config.render_options().variant_policy, VariantPolicy::Strict);

        assert_eq!(Config::load_log_level(Some(&path)).as_deref(), Some("DEBUG"));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = PathBuf::from("/definitely/not/here/sysprompt.yml");
        assert!(Config::load(Some(&path)).is_err());
        assert!(Config::load_log_level(Some(&path)).is_none());
    }

    #[test]
    fn test_renderer_uses_config() {
        let config = Config {
            strict_variants: true,
            ..Default::default()
        };
        let renderer = config.renderer(None).unwrap();
        assert_eq!(renderer.options().variant_policy, VariantPolicy::Strict);
        assert!(renderer.catalog().contains_role("sales"));
    }

    #[test]
    fn test_renderer_bad_catalog_path() {
        let config = Config {
            catalog: Some(PathBuf::from("/definitely/not/here/catalog.yml")),
            ..Default::default()
        };
        let err = config.renderer(None).err().unwrap();
        assert!(err.to_string().contains("Failed to load catalog"));
    }
}
