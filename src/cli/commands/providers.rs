//! Provider listing command handler.

use anyhow::{Result, bail};

use crate::config::{BUILTIN_PROVIDER, ConfigFile, ConfigManager, ProviderConfig};
use crate::ui::Style;

/// Prints providers to stdout.
///
/// With `specific_provider`, shows that provider's details. Otherwise lists
/// every configured provider together with the built-in one.
pub fn print_providers(manager: &ConfigManager, specific_provider: Option<&str>) -> Result<()> {
    let config = manager.load_or_default()?;
    let default_provider = config
        .artinya
        .provider
        .as_deref()
        .unwrap_or(BUILTIN_PROVIDER);

    if let Some(name) = specific_provider {
        let Some(provider) = config.provider(name) else {
            bail!(
                "Provider '{name}' not found\n\n\
                 Available providers: {}",
                config.provider_names().join(", ")
            );
        };
        print_provider_details(name, &provider, default_provider == name);
        return Ok(());
    }

    print_provider_list(&config, default_provider);
    Ok(())
}

fn default_suffix(is_default: bool) -> String {
    if is_default {
        format!(" {}", Style::default_marker())
    } else {
        String::new()
    }
}

fn print_provider_details(name: &str, provider: &ProviderConfig, is_default: bool) {
    println!(
        "{} {}{}",
        Style::header("Provider:"),
        Style::value(name),
        default_suffix(is_default)
    );
    println!("  {} {}", Style::label("endpoint"), provider.endpoint);
    if provider.requires_api_key() {
        let key_state = if provider.get_api_key().is_some() {
            Style::success("(set)")
        } else {
            Style::warning("(not set)")
        };
        let source = provider
            .api_key_env
            .as_deref()
            .map_or_else(String::new, |env| format!(" {}", Style::secondary(format!("from ${env}"))));
        println!("  {}  {key_state}{source}", Style::label("api_key"));
    }
    if provider.models.is_empty() {
        println!("  {}   {}", Style::label("models"), Style::secondary("(none configured)"));
    } else {
        println!("  {}", Style::label("models"));
        for model in &provider.models {
            println!("    - {}", Style::value(model));
        }
    }
}

fn print_provider_list(config: &ConfigFile, default_provider: &str) {
    println!("{}", Style::header("Providers"));
    println!();
    for name in config.provider_names() {
        let Some(provider) = config.provider(&name) else {
            continue;
        };
        let builtin = if config.providers.contains_key(&name) {
            String::new()
        } else {
            format!(" {}", Style::secondary("(built-in)"))
        };
        println!(
            "  {}{}{builtin}",
            Style::value(&name),
            default_suffix(default_provider == name)
        );
        println!("    {} {}", Style::label("endpoint:"), provider.endpoint);
        if !provider.models.is_empty() {
            println!("    {}   {}", Style::label("models:"), provider.models.join(", "));
        }
    }
}
