//! Journal emitter with multiple sink support

use chrono::{Local, Utc};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::agent::AgentAction;
use crate::config::{JournalConfig, JournalSink};
use crate::model::RecordId;

/// One dispatched action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEvent {
    /// Timestamp (UTC ISO 8601)
    pub timestamp: String,
    /// Local time for display
    pub local_time: String,
    /// Action tag
    pub action_type: String,
    /// Id of the record the action created, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// Action payload (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

impl JournalEvent {
    pub fn from_action(action: &AgentAction, record_id: Option<&RecordId>, include_payload: bool) -> Self {
        let now = Utc::now();
        let local = Local::now();

        Self {
            timestamp: now.to_rfc3339(),
            local_time: local.format("%Y-%m-%d %H:%M:%S").to_string(),
            action_type: action.kind().to_string(),
            record_id: record_id.map(|id| id.as_str().to_string()),
            payload: if include_payload { Some(action.payload_value()) } else { None },
        }
    }

    /// Format for console display
    pub fn format_display(&self) -> String {
        let action_colored = match self.action_type.as_str() {
            "speak" => self.action_type.cyan(),
            "add_transaction" => self.action_type.green(),
            "add_budget" => self.action_type.yellow(),
            _ => self.action_type.blue(),
        };

        let mut parts = vec![self.local_time.dimmed().to_string(), action_colored.to_string()];

        if let Some(ref id) = self.record_id {
            parts.push(format!("[{}]", &id[..8.min(id.len())]).dimmed().to_string());
        }

        parts.join(" ")
    }
}

/// Journal emitter that sends to multiple sinks
pub struct JournalEmitter {
    config: JournalConfig,
    journal_dir: PathBuf,
}

impl JournalEmitter {
    pub fn new(config: JournalConfig, journal_dir: PathBuf) -> Self {
        Self { config, journal_dir }
    }

    /// Emit an event to all configured sinks
    ///
    /// Sink failures are logged and otherwise ignored.
    pub fn emit(&self, action: &AgentAction, record_id: Option<&RecordId>) {
        if !self.config.enabled {
            return;
        }

        let event = JournalEvent::from_action(action, record_id, self.config.include_payload);

        for sink in &self.config.sinks {
            match sink {
                JournalSink::File => {
                    if let Err(e) = self.emit_to_file(&event) {
                        log::warn!("Failed to emit to file sink: {}", e);
                    }
                }
                JournalSink::Stderr => {
                    self.emit_to_stderr(&event);
                }
                JournalSink::Http => {
                    if let Err(e) = self.emit_to_http(&event) {
                        log::warn!("Failed to emit to HTTP sink: {}", e);
                    }
                }
            }
        }
    }

    /// Path of today's JSONL file
    pub fn file_path(&self) -> PathBuf {
        let now = Local::now();
        self.journal_dir
            .join(now.format("%Y-%m").to_string())
            .join(format!("{}.jsonl", now.format("%Y-%m-%d")))
    }

    fn emit_to_file(&self, event: &JournalEvent) -> std::io::Result<()> {
        let log_file = self.file_path();
        if let Some(parent) = log_file.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(log_file)?;

        let json = serde_json::to_string(event).map_err(std::io::Error::other)?;
        writeln!(file, "{}", json)?;

        Ok(())
    }

    fn emit_to_stderr(&self, event: &JournalEvent) {
        eprintln!("{}", event.format_display());
    }

    fn emit_to_http(&self, event: &JournalEvent) -> Result<(), String> {
        let endpoint = self
            .config
            .http_endpoint
            .as_ref()
            .ok_or_else(|| "HTTP endpoint not configured".to_string())?;

        let body = serde_json::to_string(event).map_err(|e| e.to_string())?;

        match ureq::post(endpoint)
            .header("Content-Type", "application/json")
            .send(body.as_bytes())
        {
            Ok(_) => Ok(()),
            Err(e) => Err(format!("HTTP request failed: {}", e)),
        }
    }
}
