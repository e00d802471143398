use colored::*;
use eyre::Result;
use serde::Serialize;

use super::bind_handlers;
use crate::agent::ActionKind;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::store::{Collection, Store};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HandlerStatus {
    kind: ActionKind,
    registered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    collection: Option<Collection>,
}

fn gather(config: &Config) -> Vec<HandlerStatus> {
    let mut store = Store::new();
    let mut spoken = Vec::new();
    let handlers = bind_handlers(&mut store, config, &mut spoken);

    ActionKind::ALL
        .into_iter()
        .map(|kind| HandlerStatus {
            kind,
            registered: handlers.handles(kind),
            collection: Collection::for_action(kind),
        })
        .collect()
}

pub fn run(format: OutputFormat, config: &Config) -> Result<()> {
    let statuses = gather(config);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&statuses)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&statuses)?),
        OutputFormat::Text => {
            println!("{}", "Registered action handlers:".bold());
            println!();
            for status in &statuses {
                let target = status
                    .collection
                    .map(|c| format!("→ {}", c).dimmed().to_string())
                    .unwrap_or_default();
                if status.registered {
                    println!("  {} {:18} {}", "✓".green(), status.kind.to_string(), target);
                } else {
                    println!(
                        "  {} {:18} {}",
                        "○".dimmed(),
                        status.kind.to_string(),
                        "(disabled)".dimmed()
                    );
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_registered_by_default() {
        let statuses = gather(&Config::default());
        assert_eq!(statuses.len(), ActionKind::ALL.len());
        assert!(statuses.iter().all(|s| s.registered));
    }

    #[test]
    fn test_disabled_kinds_reported() {
        let mut config = Config::default();
        config.handlers.disabled = vec![ActionKind::Speak, ActionKind::AddGold];

        let statuses = gather(&config);
        let disabled: Vec<_> = statuses.iter().filter(|s| !s.registered).map(|s| s.kind).collect();
        assert_eq!(disabled, vec![ActionKind::Speak, ActionKind::AddGold]);
    }
}
