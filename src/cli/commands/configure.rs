//! Configure command handler for editing default settings.

use anyhow::{Result, bail};
use inquire::{Confirm, CustomType, Select, Text};

use crate::config::{
    ArtinyaConfig, BUILTIN_PROVIDER, ConfigFile, ConfigManager, DEFAULT_SOURCE_LANGUAGE,
};
use crate::language::SUPPORTED_LANGUAGES;
use crate::pipeline::DEFAULT_MAX_RETRIES;
use crate::ui::{Style, interactive};

/// Runs the configure command to edit default settings.
///
/// Walks through provider, model, languages, retry bound and stage toggles,
/// then writes the result back to the config file.
pub fn run_configure(manager: &ConfigManager) -> Result<()> {
    let mut config = manager.load_or_default()?;
    print_current_defaults(&config.artinya);

    let Some(defaults) = interactive(|| prompt_defaults(&config))? else {
        println!();
        println!("{}", Style::secondary("Cancelled, configuration unchanged."));
        return Ok(());
    };

    config.artinya = defaults;
    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn prompt_defaults(config: &ConfigFile) -> Result<ArtinyaConfig> {
    let defaults = &config.artinya;
    let provider_names = config.provider_names();
    let provider = select_provider(
        &provider_names,
        defaults.provider.as_deref().or(Some(BUILTIN_PROVIDER)),
    )?;

    let available_models = config
        .provider(&provider)
        .map(|p| p.models)
        .unwrap_or_default();
    let model = select_model(&available_models, defaults.model.as_deref())?;

    let from = select_language(
        "Default source language:",
        defaults.from.as_deref().or(Some(DEFAULT_SOURCE_LANGUAGE)),
    )?;
    let to = select_language("Default target language:", defaults.to.as_deref())?;

    let max_retries = CustomType::<u32>::new("Max attempts per stage:")
        .with_default(defaults.max_retries.unwrap_or(DEFAULT_MAX_RETRIES))
        .with_error_message("Please enter a whole number")
        .prompt()?;
    if max_retries == 0 {
        bail!("Max attempts must be at least 1");
    }

    let describe = Confirm::new("Describe texts before translating?")
        .with_default(defaults.describe.unwrap_or(true))
        .prompt()?;
    let evaluate = Confirm::new("Evaluate translations and retry rejected ones?")
        .with_default(defaults.evaluate.unwrap_or(true))
        .prompt()?;

    Ok(ArtinyaConfig {
        provider: Some(provider),
        model: Some(model),
        from: Some(from),
        to: Some(to),
        max_retries: Some(max_retries),
        describe: Some(describe),
        evaluate: Some(evaluate),
    })
}

fn print_current_defaults(defaults: &ArtinyaConfig) {
    let or_unset = |value: Option<String>| {
        value.map_or_else(|| Style::secondary("(not set)"), Style::value)
    };

    println!("{}", Style::header("Current defaults"));
    println!("  {}     {}", Style::label("provider"), or_unset(defaults.provider.clone()));
    println!("  {}        {}", Style::label("model"), or_unset(defaults.model.clone()));
    println!("  {}         {}", Style::label("from"), or_unset(defaults.from.clone()));
    println!("  {}           {}", Style::label("to"), or_unset(defaults.to.clone()));
    println!(
        "  {}  {}",
        Style::label("max_retries"),
        or_unset(defaults.max_retries.map(|n| n.to_string()))
    );
    println!(
        "  {}     {}",
        Style::label("describe"),
        or_unset(defaults.describe.map(|b| b.to_string()))
    );
    println!(
        "  {}     {}",
        Style::label("evaluate"),
        or_unset(defaults.evaluate.map(|b| b.to_string()))
    );
    println!();
}

fn select_provider(providers: &[String], default: Option<&str>) -> Result<String> {
    let default_index = default
        .and_then(|d| providers.iter().position(|p| p == d))
        .unwrap_or(0);

    let selection = Select::new("Default provider:", providers.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(selection)
}

fn select_model(available_models: &[String], default: Option<&str>) -> Result<String> {
    if available_models.is_empty() {
        let mut prompt = Text::new("Default model:").with_help_message("Enter the model name");

        if let Some(d) = default {
            prompt = prompt.with_default(d);
        }

        let model = prompt.prompt()?;

        if model.trim().is_empty() {
            bail!("Model name cannot be empty");
        }

        Ok(model.trim().to_string())
    } else {
        let default_index = default
            .and_then(|d| available_models.iter().position(|m| m == d))
            .unwrap_or(0);

        let selection = Select::new("Default model:", available_models.to_vec())
            .with_starting_cursor(default_index)
            .prompt()?;

        Ok(selection)
    }
}

fn language_options() -> Vec<String> {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, name)| format!("{code} - {name}"))
        .collect()
}

/// Extracts the code from a `"code - Name"` option.
fn option_code(selection: &str) -> &str {
    selection.split(" - ").next().unwrap_or(selection)
}

fn select_language(message: &str, default: Option<&str>) -> Result<String> {
    let default_index = default
        .and_then(|d| SUPPORTED_LANGUAGES.iter().position(|(code, _)| *code == d))
        .unwrap_or(0);

    let selection = Select::new(message, language_options())
        .with_starting_cursor(default_index)
        .prompt()?;

    Ok(option_code(&selection).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_options_round_trip_codes() {
        for (option, (code, _)) in language_options().iter().zip(SUPPORTED_LANGUAGES) {
            assert_eq!(option_code(option), *code);
        }
    }

    #[test]
    fn test_option_code_keeps_region_suffix() {
        assert_eq!(option_code("zh-TW - Chinese (Traditional)"), "zh-TW");
    }
}
