//! Finance records
//!
//! Every record is built from a draft (the payload an agent action carries)
//! plus the fields generated at creation: an `id`, and for investments and
//! budgets a derived `value` or `spent`. Generated fields are fixed once the
//! record exists.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod budget;
pub mod investment;
pub mod transaction;

pub use budget::{Budget, NewBudget};
pub use investment::{
    Etf, FixedIncomeInstrument, FixedIncomeInvestment, GoldForm, GoldInvestment, Holding, InvestmentBase,
    InvestmentType, MutualFund, MutualFundCategory, NewEtf, NewFixedIncome, NewGold, NewMutualFund, NewRealEstate,
    NewStock, PropertyType, RealEstateInvestment, Stock, Valuation,
};
pub use transaction::{NewTransaction, Transaction, TransactionType};

/// Unique record identifier, generated once at creation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = RecordId::generate();
        let b = RecordId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_is_uuid() {
        let id = RecordId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = RecordId::generate();
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json, serde_json::Value::String(id.to_string()));
    }
}
