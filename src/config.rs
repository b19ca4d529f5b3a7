use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::ImportError;

/// Top-level configuration for recipe import
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ImportConfig {
    /// Settings for detecting recipes in chat text
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Defaults applied when a draft becomes a stored recipe
    #[serde(default)]
    pub normalize: NormalizeConfig,
}

/// Configuration for the detection pass
#[derive(Debug, Deserialize, Clone)]
pub struct ExtractionConfig {
    /// Number of leading lines searched for a title when no heading is present
    #[serde(default = "default_title_scan_lines")]
    pub title_scan_lines: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            title_scan_lines: default_title_scan_lines(),
        }
    }
}

/// Configuration for normalization and backfill
#[derive(Debug, Deserialize, Clone)]
pub struct NormalizeConfig {
    /// Prep time in minutes when none was found
    #[serde(default = "default_prep_time")]
    pub default_prep_time: u32,
    /// Cook time in minutes when none was found
    #[serde(default = "default_cook_time")]
    pub default_cook_time: u32,
    /// Servings when none were found
    #[serde(default = "default_servings")]
    pub default_servings: u32,
    /// Characters of recipe text copied into the description
    #[serde(default = "default_description_max_chars")]
    pub description_max_chars: usize,
    /// Text placed before the copied recipe text
    #[serde(default)]
    pub description_prefix: String,
    /// Description used when the draft carries no text at all
    #[serde(default = "default_description")]
    pub default_description: String,
    /// Tags attached to every built recipe
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
    /// Cuisine attached to every built recipe
    #[serde(default)]
    pub cuisine: String,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            default_prep_time: default_prep_time(),
            default_cook_time: default_cook_time(),
            default_servings: default_servings(),
            description_max_chars: default_description_max_chars(),
            description_prefix: String::new(),
            default_description: default_description(),
            tags: default_tags(),
            cuisine: String::new(),
        }
    }
}

// Default value functions
fn default_title_scan_lines() -> usize {
    10
}

fn default_prep_time() -> u32 {
    15
}

fn default_cook_time() -> u32 {
    15
}

fn default_servings() -> u32 {
    2
}

fn default_description_max_chars() -> usize {
    300
}

fn default_description() -> String {
    "Added from AI recommendation".to_string()
}

fn default_tags() -> Vec<String> {
    vec!["ai-recommended".to_string()]
}

impl ImportConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_IMPORT__ prefix
    /// 2. recipe-import.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_IMPORT__NORMALIZE__DEFAULT_SERVINGS
    pub fn load() -> Result<Self, ImportError> {
        Ok(load_config()?)
    }
}

/// Load configuration from file and environment variables
///
/// See [`ImportConfig::load`] for the source priority.
pub fn load_config() -> Result<ImportConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-import").required(false))
        // Use double underscore for nested: RECIPE_IMPORT__NORMALIZE__DEFAULT_SERVINGS
        .add_source(
            Environment::with_prefix("RECIPE_IMPORT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_values() {
        assert_eq!(default_title_scan_lines(), 10);
        assert_eq!(default_prep_time(), 15);
        assert_eq!(default_cook_time(), 15);
        assert_eq!(default_servings(), 2);
        assert_eq!(default_description_max_chars(), 300);
        assert_eq!(default_tags(), vec!["ai-recommended".to_string()]);
    }

    #[test]
    fn test_normalize_config_default() {
        let normalize = NormalizeConfig::default();
        assert_eq!(normalize.default_prep_time, 15);
        assert_eq!(normalize.default_servings, 2);
        assert!(normalize.description_prefix.is_empty());
        assert_eq!(normalize.default_description, "Added from AI recommendation");
        assert!(normalize.cuisine.is_empty());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "[normalize]\ndefault_servings = 4\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: ImportConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.normalize.default_servings, 4);
        assert_eq!(config.normalize.default_prep_time, 15);
        assert_eq!(config.extraction.title_scan_lines, 10);
    }

    #[test]
    fn test_bad_value_is_an_import_error() {
        let err: ImportError = Config::builder()
            .add_source(File::from_str(
                "[normalize]\ndefault_servings = \"plenty\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .and_then(|settings| settings.try_deserialize::<ImportConfig>())
            .unwrap_err()
            .into();

        assert!(matches!(err, ImportError::ConfigError(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_load_config_without_file() {
        // Clear any environment variables that might interfere
        let keys_to_clear: Vec<String> = env::vars()
            .filter(|(k, _)| k.starts_with("RECIPE_IMPORT__"))
            .map(|(k, _)| k)
            .collect();

        for key in keys_to_clear {
            env::remove_var(&key);
        }

        let config = load_config().unwrap();
        assert_eq!(config.normalize.default_cook_time, 15);
        assert_eq!(config.extraction.title_scan_lines, 10);
    }
}
