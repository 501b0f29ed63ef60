//! Configuration file management and provider settings.

mod manager;

pub use manager::{
    ArtinyaConfig, BUILTIN_API_KEY_ENV, BUILTIN_ENDPOINT, BUILTIN_MODEL, BUILTIN_PROVIDER,
    ConfigFile, ConfigManager, DEFAULT_SOURCE_LANGUAGE, ProviderConfig, ResolveOptions,
    ResolvedConfig, resolve_config,
};
