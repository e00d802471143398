//! Agent actions
//!
//! An agent action is one requested mutation: a tag naming the kind of
//! record to create plus that record's draft as payload. Actions arrive as
//! JSON (`{"type": "add_budget", "payload": {...}}`), from the intent
//! interpreter, or are built directly in code, and are routed to handlers by
//! [`dispatch::dispatch`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod dispatch;
pub mod intent;

use crate::model::{
    NewBudget, NewEtf, NewFixedIncome, NewGold, NewMutualFund, NewRealEstate, NewStock, NewTransaction,
};

/// Action kinds, one per tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Speak,
    AddTransaction,
    AddStock,
    AddMutualFund,
    AddEtf,
    AddGold,
    AddRealEstate,
    AddFixedIncome,
    AddBudget,
}

impl ActionKind {
    pub const ALL: [ActionKind; 9] = [
        ActionKind::Speak,
        ActionKind::AddTransaction,
        ActionKind::AddStock,
        ActionKind::AddMutualFund,
        ActionKind::AddEtf,
        ActionKind::AddGold,
        ActionKind::AddRealEstate,
        ActionKind::AddFixedIncome,
        ActionKind::AddBudget,
    ];

    /// Wire tag for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            ActionKind::Speak => "speak",
            ActionKind::AddTransaction => "add_transaction",
            ActionKind::AddStock => "add_stock",
            ActionKind::AddMutualFund => "add_mutual_fund",
            ActionKind::AddEtf => "add_etf",
            ActionKind::AddGold => "add_gold",
            ActionKind::AddRealEstate => "add_real_estate",
            ActionKind::AddFixedIncome => "add_fixed_income",
            ActionKind::AddBudget => "add_budget",
        }
    }

    /// Parse an exact wire tag
    pub fn from_tag(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == s)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakPayload {
    pub message_key: String,
}

/// A requested mutation, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum AgentAction {
    Speak(SpeakPayload),
    AddTransaction(NewTransaction),
    AddStock(NewStock),
    AddMutualFund(NewMutualFund),
    AddEtf(NewEtf),
    AddGold(NewGold),
    AddRealEstate(NewRealEstate),
    AddFixedIncome(NewFixedIncome),
    AddBudget(NewBudget),
}

/// Errors raised while decoding or dispatching an action
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("unknown action kind: {0}")]
    UnknownActionKind(String),

    #[error("action has no \"type\" tag")]
    MissingType,

    #[error("malformed {kind} payload: {source}")]
    MalformedPayload {
        kind: ActionKind,
        #[source]
        source: serde_json::Error,
    },
}

impl AgentAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            AgentAction::Speak(_) => ActionKind::Speak,
            AgentAction::AddTransaction(_) => ActionKind::AddTransaction,
            AgentAction::AddStock(_) => ActionKind::AddStock,
            AgentAction::AddMutualFund(_) => ActionKind::AddMutualFund,
            AgentAction::AddEtf(_) => ActionKind::AddEtf,
            AgentAction::AddGold(_) => ActionKind::AddGold,
            AgentAction::AddRealEstate(_) => ActionKind::AddRealEstate,
            AgentAction::AddFixedIncome(_) => ActionKind::AddFixedIncome,
            AgentAction::AddBudget(_) => ActionKind::AddBudget,
        }
    }

    /// Decode a raw `{"type", "payload"}` object
    ///
    /// Tags outside the known set fail with [`ActionError::UnknownActionKind`]
    /// before the payload is looked at.
    pub fn from_value(value: &Value) -> Result<Self, ActionError> {
        let tag = value.get("type").and_then(|v| v.as_str()).ok_or(ActionError::MissingType)?;
        let kind = ActionKind::from_tag(tag).ok_or_else(|| ActionError::UnknownActionKind(tag.to_string()))?;
        let payload = value.get("payload").cloned().unwrap_or(Value::Null);

        Self::from_payload(kind, payload).map_err(|source| ActionError::MalformedPayload { kind, source })
    }

    fn from_payload(kind: ActionKind, payload: Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            ActionKind::Speak => AgentAction::Speak(serde_json::from_value(payload)?),
            ActionKind::AddTransaction => AgentAction::AddTransaction(serde_json::from_value(payload)?),
            ActionKind::AddStock => AgentAction::AddStock(serde_json::from_value(payload)?),
            ActionKind::AddMutualFund => AgentAction::AddMutualFund(serde_json::from_value(payload)?),
            ActionKind::AddEtf => AgentAction::AddEtf(serde_json::from_value(payload)?),
            ActionKind::AddGold => AgentAction::AddGold(serde_json::from_value(payload)?),
            ActionKind::AddRealEstate => AgentAction::AddRealEstate(serde_json::from_value(payload)?),
            ActionKind::AddFixedIncome => AgentAction::AddFixedIncome(serde_json::from_value(payload)?),
            ActionKind::AddBudget => AgentAction::AddBudget(serde_json::from_value(payload)?),
        })
    }

    /// The payload alone, as JSON
    pub fn payload_value(&self) -> Value {
        let result = match self {
            AgentAction::Speak(p) => serde_json::to_value(p),
            AgentAction::AddTransaction(p) => serde_json::to_value(p),
            AgentAction::AddStock(p) => serde_json::to_value(p),
            AgentAction::AddMutualFund(p) => serde_json::to_value(p),
            AgentAction::AddEtf(p) => serde_json::to_value(p),
            AgentAction::AddGold(p) => serde_json::to_value(p),
            AgentAction::AddRealEstate(p) => serde_json::to_value(p),
            AgentAction::AddFixedIncome(p) => serde_json::to_value(p),
            AgentAction::AddBudget(p) => serde_json::to_value(p),
        };
        result.unwrap_or(Value::Null)
    }
}

/// Value substituted into a confirmation message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfirmationParam {
    Number(f64),
    Text(String),
}

impl From<f64> for ConfirmationParam {
    fn from(n: f64) -> Self {
        ConfirmationParam::Number(n)
    }
}

impl From<&str> for ConfirmationParam {
    fn from(s: &str) -> Self {
        ConfirmationParam::Text(s.to_string())
    }
}

impl From<String> for ConfirmationParam {
    fn from(s: String) -> Self {
        ConfirmationParam::Text(s)
    }
}

impl std::fmt::Display for ConfirmationParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfirmationParam::Number(n) => write!(f, "{}", n),
            ConfirmationParam::Text(s) => write!(f, "{}", s),
        }
    }
}

/// What the agent proposes in reply to a user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub action: AgentAction,
    pub confirmation_key: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub confirmation_params: IndexMap<String, ConfirmationParam>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionType;

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in ActionKind::ALL {
            assert_eq!(ActionKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_from_tag_is_exact() {
        for tag in ["ADD_BUDGET", "Add-Budget", "add-mutual-fund", "AddBudget", "addbudget", "a_d_d_budget"] {
            assert_eq!(ActionKind::from_tag(tag), None, "{} should not parse", tag);
        }
        assert_eq!(ActionKind::from_tag("remove_budget"), None);
    }

    #[test]
    fn test_decode_rejects_non_wire_spellings() {
        for tag in ["ADD_BUDGET", "Add-Budget", "a_d_d_budget", "addbudget"] {
            let raw = serde_json::json!({"type": tag, "payload": {"category": "Travel", "limit": 500}});
            let err = AgentAction::from_value(&raw).unwrap_err();
            assert!(matches!(err, ActionError::UnknownActionKind(ref t) if t == tag));
            assert!(serde_json::from_value::<AgentAction>(raw).is_err());
        }
    }

    #[test]
    fn test_decode_add_transaction() {
        let raw = serde_json::json!({
            "type": "add_transaction",
            "payload": {
                "date": "2024-01-01",
                "description": "Coffee",
                "amount": 4.5,
                "type": "Expense",
                "category": "Food"
            }
        });

        let action = AgentAction::from_value(&raw).unwrap();
        match action {
            AgentAction::AddTransaction(tx) => {
                assert_eq!(tx.description, "Coffee");
                assert_eq!(tx.amount, 4.5);
                assert_eq!(tx.kind, TransactionType::Expense);
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_tag() {
        let raw = serde_json::json!({"type": "delete_stock", "payload": {}});
        let err = AgentAction::from_value(&raw).unwrap_err();
        assert!(matches!(err, ActionError::UnknownActionKind(ref tag) if tag == "delete_stock"));
    }

    #[test]
    fn test_decode_missing_type() {
        let raw = serde_json::json!({"payload": {}});
        assert!(matches!(AgentAction::from_value(&raw), Err(ActionError::MissingType)));
    }

    #[test]
    fn test_decode_malformed_payload() {
        let raw = serde_json::json!({"type": "add_budget", "payload": {"category": "Travel"}});
        let err = AgentAction::from_value(&raw).unwrap_err();
        assert!(matches!(
            err,
            ActionError::MalformedPayload {
                kind: ActionKind::AddBudget,
                ..
            }
        ));
    }

    #[test]
    fn test_serialized_action_matches_wire_shape() {
        let action = AgentAction::AddBudget(NewBudget {
            category: "Travel".to_string(),
            limit: 500.0,
        });
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "add_budget");
        assert_eq!(json["payload"]["category"], "Travel");

        let back = AgentAction::from_value(&json).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_payload_value_drops_tag() {
        let action = AgentAction::Speak(SpeakPayload {
            message_key: "agent.hello".to_string(),
        });
        assert_eq!(action.payload_value(), serde_json::json!({"messageKey": "agent.hello"}));
    }

    #[test]
    fn test_response_omits_empty_params() {
        let response = AgentResponse {
            action: AgentAction::Speak(SpeakPayload {
                message_key: "agent.unrecognized".to_string(),
            }),
            confirmation_key: "agent.unrecognized".to_string(),
            confirmation_params: IndexMap::new(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("confirmationParams").is_none());
        assert_eq!(json["confirmationKey"], "agent.unrecognized");
    }
}
