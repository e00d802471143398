use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Income => write!(f, "Income"),
            TransactionType::Expense => write!(f, "Expense"),
        }
    }
}

/// Transaction payload, as carried by `add_transaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// `YYYY-MM-DD`, kept verbatim
    pub date: String,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: RecordId,
    #[serde(flatten)]
    pub details: NewTransaction,
}

impl Transaction {
    pub fn new(details: NewTransaction) -> Self {
        Self {
            id: RecordId::generate(),
            details,
        }
    }

    pub fn is_income(&self) -> bool {
        self.details.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.details.kind == TransactionType::Expense
    }
}
