use colored::*;
use eyre::{Context, Result};
use std::fs;

use crate::agent::ActionKind;
use crate::cli::{ConfigAction, OutputFormat};
use crate::config::{Config, LogLevel};

pub fn run(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config),
        ConfigAction::Get { key } => get(&key, config),
        ConfigAction::Set { key, value } => set(&key, &value, config),
    }
}

fn show(format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Text => {
            println!("{}", "finagent Configuration".bold());
            println!();

            println!("  log_level: {}", config.log_level.as_filter());
            println!();

            println!("{}:", "paths".cyan());
            println!("  journal: {}", config.paths.journal.display());
            println!();

            println!("{}:", "store".cyan());
            println!("  seed_mock_data: {}", config.store.seed_mock_data);
            println!();

            println!("{}:", "handlers".cyan());
            println!("  disabled: {}", format_kinds(&config.handlers.disabled));
            println!();

            println!("{}:", "journal".cyan());
            println!("  enabled: {}", config.journal.enabled);
            println!("  sinks: {:?}", config.journal.sinks);
            println!("  include_payload: {}", config.journal.include_payload);
        }
    }

    Ok(())
}

fn format_kinds(kinds: &[ActionKind]) -> String {
    if kinds.is_empty() {
        "(none)".to_string()
    } else {
        kinds.iter().map(|k| k.tag()).collect::<Vec<_>>().join(", ")
    }
}

fn lookup(key: &str, config: &Config) -> Option<String> {
    match key {
        "log_level" | "log-level" => Some(config.log_level.as_filter().to_string()),
        "paths.journal" => Some(config.paths.journal.display().to_string()),
        "store.seed_mock_data" => Some(config.store.seed_mock_data.to_string()),
        "handlers.disabled" => Some(format_kinds(&config.handlers.disabled)),
        "journal.enabled" => Some(config.journal.enabled.to_string()),
        "journal.include_payload" => Some(config.journal.include_payload.to_string()),
        "journal.http_endpoint" => Some(config.journal.http_endpoint.clone().unwrap_or_default()),
        _ => None,
    }
}

fn get(key: &str, config: &Config) -> Result<()> {
    match lookup(key, config) {
        Some(v) => println!("{}", v),
        None => {
            eyre::bail!("Unknown config key: {}", key);
        }
    }

    Ok(())
}

fn apply(key: &str, value: &str, config: &mut Config) -> Result<()> {
    match key {
        "log_level" | "log-level" => {
            config.log_level = LogLevel::parse(value)
                .ok_or_else(|| eyre::eyre!("Invalid log level (trace, debug, info, warn, error, off)"))?;
        }
        "paths.journal" => config.paths.journal = value.into(),
        "store.seed_mock_data" => {
            config.store.seed_mock_data = value.parse().context("Invalid boolean value (use 'true' or 'false')")?;
        }
        "handlers.disabled" => {
            config.handlers.disabled = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| ActionKind::from_tag(s).ok_or_else(|| eyre::eyre!("Unknown action kind: {}", s)))
                .collect::<Result<Vec<_>>>()?;
        }
        "journal.enabled" => {
            config.journal.enabled = value.parse().context("Invalid boolean value (use 'true' or 'false')")?;
        }
        "journal.include_payload" => {
            config.journal.include_payload =
                value.parse().context("Invalid boolean value (use 'true' or 'false')")?;
        }
        "journal.http_endpoint" => {
            config.journal.http_endpoint = if value.is_empty() { None } else { Some(value.to_string()) };
        }
        _ => {
            eyre::bail!("Unknown config key: {}", key);
        }
    }

    Ok(())
}

fn set(key: &str, value: &str, config: &Config) -> Result<()> {
    println!("{} Setting {} = {}", "→".blue(), key.cyan(), value.green());

    let mut new_config = config.clone();
    apply(key, value, &mut new_config)?;

    let config_path = Config::finagent_dir().join("finagent.yaml");
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let yaml_str = serde_yaml::to_string(&new_config).context("Failed to serialize config")?;
    fs::write(&config_path, yaml_str).context("Failed to write config file")?;

    println!("  {} Saved to {}", "✓".green(), config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_keys() {
        let config = Config::default();
        assert_eq!(lookup("log_level", &config), Some("info".to_string()));
        assert_eq!(lookup("store.seed_mock_data", &config), Some("true".to_string()));
        assert_eq!(lookup("handlers.disabled", &config), Some("(none)".to_string()));
        assert_eq!(lookup("nope", &config), None);
    }

    #[test]
    fn test_apply_disabled_list() {
        let mut config = Config::default();
        apply("handlers.disabled", "add_budget, add_gold", &mut config).unwrap();
        assert_eq!(config.handlers.disabled, vec![ActionKind::AddBudget, ActionKind::AddGold]);

        apply("handlers.disabled", "", &mut config).unwrap();
        assert!(config.handlers.disabled.is_empty());
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut config = Config::default();
        assert!(apply("handlers.disabled", "sell_stock", &mut config).is_err());
        assert!(apply("handlers.disabled", "add-gold", &mut config).is_err());
        assert!(apply("store.seed_mock_data", "maybe", &mut config).is_err());
        assert!(apply("log_level", "loud", &mut config).is_err());
        assert!(apply("unknown.key", "1", &mut config).is_err());
    }

    #[test]
    fn test_apply_log_level() {
        let mut config = Config::default();
        apply("log_level", "debug", &mut config).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }
}
