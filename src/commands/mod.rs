pub mod ask;
pub mod completions;
pub mod config;
pub mod dispatch;
pub mod handlers;
pub mod list;
pub mod summary;

use eyre::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::agent::dispatch::{Handlers, dispatch};
use crate::agent::{ActionKind, AgentAction};
use crate::config::Config;
use crate::journal::JournalEmitter;
use crate::store::{Collection, Store};

/// What one dispatched action did
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<Collection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spoken: Vec<String>,
}

/// Fresh store for one run, seeded when configured
pub fn new_store(config: &Config) -> Store {
    let store = if config.store.seed_mock_data { Store::seeded() } else { Store::new() };
    log::debug!("Store starts with {} records", store.total_records());
    store
}

/// The handler table used by every command: store mutations, a `speak`
/// handler collecting message keys, minus the kinds disabled in config
pub fn bind_handlers<'a>(store: &'a mut Store, config: &Config, spoken: &'a mut Vec<String>) -> Handlers<'a> {
    let mut handlers = store.handlers().on_speak(move |p| spoken.push(p.message_key));

    for kind in ActionKind::ALL {
        if !config.is_enabled(kind) {
            log::debug!("Handler for {} disabled by config", kind);
            handlers.remove(kind);
        }
    }

    handlers
}

/// Parse actions from a single object, a JSON array, or JSON lines
pub fn parse_actions(input: &str) -> Result<Vec<AgentAction>> {
    let mut values = Vec::new();
    for value in serde_json::Deserializer::from_str(input).into_iter::<serde_json::Value>() {
        match value.context("Failed to parse action JSON")? {
            serde_json::Value::Array(items) => values.extend(items),
            other => values.push(other),
        }
    }

    values
        .iter()
        .enumerate()
        .map(|(i, value)| AgentAction::from_value(value).with_context(|| format!("Invalid action #{}", i + 1)))
        .collect()
}

pub fn read_actions_file(path: &Path) -> Result<Vec<AgentAction>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read actions from {}", path.display()))?;
    parse_actions(&content)
}

/// Dispatch `actions` in order, journaling each one
///
/// Stops at the first action that fails; earlier actions stay applied.
pub fn apply_actions(store: &mut Store, actions: Vec<AgentAction>, config: &Config) -> Result<Vec<Outcome>> {
    let emitter = JournalEmitter::new(config.journal.clone(), config.journal_dir());
    let mut outcomes = Vec::with_capacity(actions.len());

    for action in actions {
        let kind = action.kind();
        let journaled = action.clone();
        let mut spoken = Vec::new();

        {
            let mut handlers = bind_handlers(store, config, &mut spoken);
            dispatch(action, &mut handlers).with_context(|| format!("Failed to dispatch {} action", kind))?;
        }

        let collection = Collection::for_action(kind);
        let record_id = collection.and_then(|c| store.last_id(c)).cloned();
        emitter.emit(&journaled, record_id.as_ref());
        log::info!("Dispatched {} action", kind);

        outcomes.push(Outcome {
            kind,
            collection,
            record: collection.and_then(|c| store.last_record(c)),
            spoken,
        });
    }

    Ok(outcomes)
}

/// Store for read-only commands: seeded per config, then `actions` applied
pub fn load_store(actions: Option<&Path>, config: &Config) -> Result<Store> {
    let mut store = new_store(config);
    if let Some(path) = actions {
        let actions = read_actions_file(path)?;
        apply_actions(&mut store, actions, config)?;
    }
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JournalConfig;

    fn quiet_config() -> Config {
        let mut config = Config::default();
        config.store.seed_mock_data = false;
        config.journal = JournalConfig {
            enabled: false,
            ..JournalConfig::default()
        };
        config
    }

    #[test]
    fn test_parse_single_object() {
        let actions = parse_actions(r#"{"type": "add_budget", "payload": {"category": "Travel", "limit": 500}}"#)
            .unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].kind(), ActionKind::AddBudget);
    }

    #[test]
    fn test_parse_array_and_lines() {
        let input = r#"
[{"type": "speak", "payload": {"messageKey": "a"}}, {"type": "speak", "payload": {"messageKey": "b"}}]
{"type": "add_budget", "payload": {"category": "Food", "limit": 100}}
"#;
        let actions = parse_actions(input).unwrap();
        let kinds: Vec<_> = actions.iter().map(|a| a.kind()).collect();
        assert_eq!(kinds, vec![ActionKind::Speak, ActionKind::Speak, ActionKind::AddBudget]);
    }

    #[test]
    fn test_parse_unknown_kind_fails() {
        let err = parse_actions(r#"{"type": "sell_stock", "payload": {}}"#).unwrap_err();
        assert!(format!("{:?}", err).contains("unknown action kind: sell_stock"));
    }

    #[test]
    fn test_apply_collects_records_and_speech() {
        let config = quiet_config();
        let mut store = new_store(&config);
        let actions = parse_actions(
            r#"
{"type": "add_budget", "payload": {"category": "Travel", "limit": 500}}
{"type": "speak", "payload": {"messageKey": "agent.budget_added"}}
"#,
        )
        .unwrap();

        let outcomes = apply_actions(&mut store, actions, &config).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].collection, Some(Collection::Budgets));
        assert_eq!(outcomes[0].record.as_ref().unwrap()["spent"], 0.0);
        assert!(outcomes[0].spoken.is_empty());
        assert_eq!(outcomes[1].spoken, vec!["agent.budget_added".to_string()]);
        assert!(outcomes[1].record.is_none());
        assert_eq!(store.budgets.len(), 1);
    }

    #[test]
    fn test_disabled_kind_stops_the_run() {
        let mut config = quiet_config();
        config.handlers.disabled = vec![ActionKind::AddStock];
        let mut store = new_store(&config);
        let actions = parse_actions(
            r#"
{"type": "add_budget", "payload": {"category": "Travel", "limit": 500}}
{"type": "add_stock", "payload": {"name": "Infosys", "type": "Stock", "quantity": 1, "purchasePrice": 1, "currentPrice": 1, "ticker": "INFY", "sector": "Tech"}}
{"type": "add_budget", "payload": {"category": "Food", "limit": 200}}
"#,
        )
        .unwrap();

        let err = apply_actions(&mut store, actions, &config).unwrap_err();

        assert!(format!("{:?}", err).contains("unknown action kind: add_stock"));
        assert_eq!(store.budgets.len(), 1);
        assert!(store.stocks.is_empty());
    }

    #[test]
    fn test_seeded_store_when_configured() {
        let mut config = quiet_config();
        config.store.seed_mock_data = true;
        assert!(new_store(&config).total_records() > 0);
    }
}
