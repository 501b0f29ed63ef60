//! Subcommand implementations.

/// Configure command handler.
pub mod configure;

/// Provider listing command handler.
pub mod providers;

/// Describe/translate/evaluate run handler.
pub mod run;
