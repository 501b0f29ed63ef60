use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::language::validate_language;
use crate::paths;
use crate::pipeline::DEFAULT_MAX_RETRIES;

/// Provider used when neither the CLI nor the config file names one.
pub const BUILTIN_PROVIDER: &str = "openai";
pub const BUILTIN_ENDPOINT: &str = "https://api.openai.com";
pub const BUILTIN_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const BUILTIN_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Default settings in the `[artinya]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtinyaConfig {
    /// Default provider name.
    pub provider: Option<String>,
    /// Default model name.
    pub model: Option<String>,
    /// Default source language (ISO 639-1 code).
    pub from: Option<String>,
    /// Default target language (ISO 639-1 code).
    pub to: Option<String>,
    /// Attempts per stage before a prompt is given up on.
    pub max_retries: Option<u32>,
    /// Run the describe stage before translating.
    pub describe: Option<bool>,
    /// Gate translations on the evaluate step.
    pub evaluate: Option<bool>,
}

/// Configuration for a completion provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// List of available models for this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// The hosted OpenAI endpoint, keyed from `OPENAI_API_KEY`.
    pub fn builtin() -> Self {
        Self {
            endpoint: BUILTIN_ENDPOINT.to_string(),
            api_key: None,
            api_key_env: Some(BUILTIN_API_KEY_ENV.to_string()),
            models: vec![BUILTIN_MODEL.to_string()],
        }
    }

    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/artinya/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub artinya: ArtinyaConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl ConfigFile {
    /// Looks up a provider, falling back to the built-in one by name.
    pub fn provider(&self, name: &str) -> Option<ProviderConfig> {
        self.providers.get(name).cloned().or_else(|| {
            (name == BUILTIN_PROVIDER).then(ProviderConfig::builtin)
        })
    }

    /// Configured provider names plus the built-in one, sorted.
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        if !self.providers.contains_key(BUILTIN_PROVIDER) {
            names.push(BUILTIN_PROVIDER.to_string());
        }
        names.sort();
        names
    }
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The selected provider name.
    pub provider_name: String,
    /// The API endpoint URL.
    pub endpoint: String,
    /// The model to use for every stage.
    pub model: String,
    /// The API key (if required).
    pub api_key: Option<String>,
    /// The source language code.
    pub source_language: String,
    /// The target language code.
    pub target_language: String,
    pub max_retries: u32,
    pub describe: bool,
    pub evaluate: bool,
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Source language code override.
    pub from: Option<String>,
    /// Target language code override.
    pub to: Option<String>,
    /// Provider name override.
    pub provider: Option<String>,
    /// Model name override.
    pub model: Option<String>,
    /// Retry bound override.
    pub max_retries: Option<u32>,
    /// Describe stage on/off override.
    pub describe: Option<bool>,
    /// Evaluate step on/off override.
    pub evaluate: Option<bool>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take
/// precedence over built-in defaults.
///
/// # Errors
///
/// Returns an error if the target language is missing, a language code is
/// invalid, the provider is unknown, no model can be chosen, the retry bound
/// is zero, or a required API key is not set.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<ResolvedConfig> {
    let defaults = &config_file.artinya;

    // Resolve provider
    let provider_name = options
        .provider
        .as_ref()
        .or(defaults.provider.as_ref())
        .cloned()
        .unwrap_or_else(|| BUILTIN_PROVIDER.to_string());

    let provider_config = config_file.provider(&provider_name).ok_or_else(|| {
        anyhow::anyhow!(
            "Provider '{provider_name}' not found\n\n\
             Available providers:\n  \
             - {}\n\n\
             Add providers to ~/.config/artinya/config.toml",
            config_file.provider_names().join("\n  - ")
        )
    })?;

    // Resolve model
    let model = options
        .model
        .as_ref()
        .or(defaults.model.as_ref())
        .or(provider_config.models.first())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'model'\n\n\
                 Please provide it via:\n  \
                 - CLI option: artinya --model <name>\n  \
                 - Config file: ~/.config/artinya/config.toml"
            )
        })?;

    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        tracing::warn!(
            "Model '{model}' is not in the configured models list for '{provider_name}' ({}), proceeding anyway",
            provider_config.models.join(", ")
        );
    }

    // Resolve languages
    let source_language = options
        .from
        .as_ref()
        .or(defaults.from.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_SOURCE_LANGUAGE.to_string());
    validate_language(&source_language)?;

    let target_language = options
        .to
        .as_ref()
        .or(defaults.to.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'to' (target language)\n\n\
                 Please provide it via:\n  \
                 - CLI option: artinya --to <lang>\n  \
                 - Config file: ~/.config/artinya/config.toml"
            )
        })?;
    validate_language(&target_language)?;

    let max_retries = options
        .max_retries
        .or(defaults.max_retries)
        .unwrap_or(DEFAULT_MAX_RETRIES);
    if max_retries == 0 {
        bail!("Invalid configuration: 'max_retries' must be at least 1");
    }

    // Get API key
    let api_key = provider_config.get_api_key();

    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/artinya/config.toml"
        );
    }

    Ok(ResolvedConfig {
        provider_name,
        endpoint: provider_config.endpoint,
        model,
        api_key,
        source_language,
        target_language,
        max_retries,
        describe: options.describe.or(defaults.describe).unwrap_or(true),
        evaluate: options.evaluate.or(defaults.evaluate).unwrap_or(true),
    })
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/artinya/config.toml`
    /// or `~/.config/artinya/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Uses an explicit config file instead of the XDG location.
    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Uses `path` when given, the XDG location otherwise.
    pub fn resolve(path: Option<PathBuf>) -> Result<Self> {
        path.map_or_else(Self::new, |p| Ok(Self::with_path(p)))
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(config_file)
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }

    /// Loads the config file, or an empty one if it does not exist yet.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}
