use serde::{Deserialize, Serialize};

use super::RecordId;

/// Budget payload, as carried by `add_budget`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    pub category: String,
    pub limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: RecordId,
    #[serde(flatten)]
    pub details: NewBudget,
    /// Always zero at creation, never recomputed
    pub spent: f64,
}

impl Budget {
    pub fn new(details: NewBudget) -> Self {
        Self {
            id: RecordId::generate(),
            details,
            spent: 0.0,
        }
    }

    pub fn remaining(&self) -> f64 {
        self.details.limit - self.spent
    }
}
