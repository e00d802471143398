use colored::*;
use eyre::{Context, Result};
use std::io::{self, Read};
use std::path::Path;

use super::{Outcome, apply_actions, new_store, parse_actions};
use crate::cli::OutputFormat;
use crate::config::Config;

pub fn run(payload: Option<&str>, file: Option<&Path>, format: OutputFormat, config: &Config) -> Result<()> {
    let input = match (payload, file) {
        (Some(p), _) => p.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read actions from {}", path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read actions from stdin")?;
            buffer
        }
    };

    let actions = parse_actions(&input)?;
    log::info!("Dispatching {} action(s)", actions.len());
    log::debug!("Actions: {:?}", actions);

    let mut store = new_store(config);
    let outcomes = apply_actions(&mut store, actions, config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcomes)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&outcomes)?),
        OutputFormat::Text => print_text(&outcomes),
    }

    Ok(())
}

fn print_text(outcomes: &[Outcome]) {
    if outcomes.is_empty() {
        println!("{}", "(no actions)".dimmed());
        return;
    }

    for outcome in outcomes {
        match (&outcome.collection, &outcome.record) {
            (Some(collection), Some(record)) => {
                let id = record.get("id").and_then(|v| v.as_str()).unwrap_or("?");
                println!(
                    "{} {} → {} {}",
                    "✓".green(),
                    outcome.kind.to_string().cyan(),
                    collection,
                    format!("[{}]", id).dimmed()
                );
            }
            _ => {
                println!("{} {}", "✓".green(), outcome.kind.to_string().cyan());
            }
        }

        for key in &outcome.spoken {
            println!("  {} {}", "💬".blue(), key);
        }
    }
}
