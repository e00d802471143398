use chrono::Local;
use colored::*;
use eyre::Result;
use serde::Serialize;

use super::{Outcome, apply_actions, new_store};
use crate::agent::AgentResponse;
use crate::agent::intent::interpret;
use crate::cli::OutputFormat;
use crate::config::Config;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AskResult {
    response: AgentResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<Outcome>,
}

pub fn run(text: &str, apply: bool, format: OutputFormat, config: &Config) -> Result<()> {
    let today = Local::now().date_naive();
    let response = interpret(text, today);

    let outcome = if apply {
        let mut store = new_store(config);
        apply_actions(&mut store, vec![response.action.clone()], config)?.pop()
    } else {
        None
    };

    let result = AskResult { response, outcome };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&result)?),
        OutputFormat::Text => print_text(&result),
    }

    Ok(())
}

fn print_text(result: &AskResult) {
    let response = &result.response;

    println!("{} {}", "Action:".dimmed(), response.action.kind().to_string().cyan());
    println!("{} {}", "Confirm:".dimmed(), response.confirmation_key);
    for (name, value) in &response.confirmation_params {
        println!("  {:12} {}", format!("{}:", name).dimmed(), value);
    }

    let payload = response.action.payload_value();
    if let Ok(pretty) = serde_json::to_string_pretty(&payload) {
        println!("{}", "Payload:".dimmed());
        for line in pretty.lines() {
            println!("  {}", line);
        }
    }

    if let Some(outcome) = &result.outcome {
        let id = outcome
            .record
            .as_ref()
            .and_then(|r| r.get("id"))
            .and_then(|v| v.as_str())
            .map(|id| format!(" [{}]", id))
            .unwrap_or_default();
        println!("{} Applied{}", "✓".green(), id.dimmed());
    }
}
