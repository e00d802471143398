//! In-memory record store
//!
//! The store owns every collection. It is never shared: callers borrow it
//! mutably for the lifetime of a handler table built by [`Store::handlers`],
//! then read it back once the table is dropped.

use clap::ValueEnum;
use serde::Serialize;

use crate::agent::ActionKind;
use crate::agent::dispatch::Handlers;
use crate::model::{
    Budget, Etf, FixedIncomeInvestment, GoldInvestment, MutualFund, RealEstateInvestment, RecordId, Stock,
    Transaction,
};

/// Named collections of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Collection {
    Transactions,
    Stocks,
    MutualFunds,
    Etfs,
    Gold,
    RealEstate,
    FixedIncome,
    Budgets,
}

impl Collection {
    pub const ALL: [Collection; 8] = [
        Collection::Transactions,
        Collection::Stocks,
        Collection::MutualFunds,
        Collection::Etfs,
        Collection::Gold,
        Collection::RealEstate,
        Collection::FixedIncome,
        Collection::Budgets,
    ];

    /// Collection an action of `kind` appends to
    pub fn for_action(kind: ActionKind) -> Option<Self> {
        match kind {
            ActionKind::Speak => None,
            ActionKind::AddTransaction => Some(Collection::Transactions),
            ActionKind::AddStock => Some(Collection::Stocks),
            ActionKind::AddMutualFund => Some(Collection::MutualFunds),
            ActionKind::AddEtf => Some(Collection::Etfs),
            ActionKind::AddGold => Some(Collection::Gold),
            ActionKind::AddRealEstate => Some(Collection::RealEstate),
            ActionKind::AddFixedIncome => Some(Collection::FixedIncome),
            ActionKind::AddBudget => Some(Collection::Budgets),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Collection::Transactions => "Transactions",
            Collection::Stocks => "Stocks",
            Collection::MutualFunds => "Mutual Funds",
            Collection::Etfs => "ETFs",
            Collection::Gold => "Gold",
            Collection::RealEstate => "Real Estate",
            Collection::FixedIncome => "Fixed Income",
            Collection::Budgets => "Budgets",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub transactions: Vec<Transaction>,
    pub stocks: Vec<Stock>,
    pub mutual_funds: Vec<MutualFund>,
    pub etfs: Vec<Etf>,
    pub gold: Vec<GoldInvestment>,
    pub real_estate: Vec<RealEstateInvestment>,
    pub fixed_income: Vec<FixedIncomeInvestment>,
    pub budgets: Vec<Budget>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with demo records
    pub fn seeded() -> Self {
        crate::mock::seed()
    }

    /// Handler table whose add-handlers append to this store
    ///
    /// `speak` is left unregistered; it does not touch the store.
    pub fn handlers(&mut self) -> Handlers<'_> {
        let Store {
            transactions,
            stocks,
            mutual_funds,
            etfs,
            gold,
            real_estate,
            fixed_income,
            budgets,
        } = self;

        Handlers::new()
            .on_add_transaction(move |draft| transactions.push(Transaction::new(draft)))
            .on_add_stock(move |draft| stocks.push(Stock::new(draft)))
            .on_add_mutual_fund(move |draft| mutual_funds.push(MutualFund::new(draft)))
            .on_add_etf(move |draft| etfs.push(Etf::new(draft)))
            .on_add_gold(move |draft| gold.push(GoldInvestment::new(draft)))
            .on_add_real_estate(move |draft| real_estate.push(RealEstateInvestment::new(draft)))
            .on_add_fixed_income(move |draft| fixed_income.push(FixedIncomeInvestment::new(draft)))
            .on_add_budget(move |draft| budgets.push(Budget::new(draft)))
    }

    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::Transactions => self.transactions.len(),
            Collection::Stocks => self.stocks.len(),
            Collection::MutualFunds => self.mutual_funds.len(),
            Collection::Etfs => self.etfs.len(),
            Collection::Gold => self.gold.len(),
            Collection::RealEstate => self.real_estate.len(),
            Collection::FixedIncome => self.fixed_income.len(),
            Collection::Budgets => self.budgets.len(),
        }
    }

    pub fn total_records(&self) -> usize {
        Collection::ALL.iter().map(|c| self.len(*c)).sum()
    }

    /// Id of the most recently appended record in `collection`
    pub fn last_id(&self, collection: Collection) -> Option<&RecordId> {
        match collection {
            Collection::Transactions => self.transactions.last().map(|r| &r.id),
            Collection::Stocks => self.stocks.last().map(|r| &r.id),
            Collection::MutualFunds => self.mutual_funds.last().map(|r| &r.id),
            Collection::Etfs => self.etfs.last().map(|r| &r.id),
            Collection::Gold => self.gold.last().map(|r| &r.id),
            Collection::RealEstate => self.real_estate.last().map(|r| &r.id),
            Collection::FixedIncome => self.fixed_income.last().map(|r| &r.id),
            Collection::Budgets => self.budgets.last().map(|r| &r.id),
        }
    }

    /// Most recently appended record in `collection`, as JSON
    pub fn last_record(&self, collection: Collection) -> Option<serde_json::Value> {
        let result = match collection {
            Collection::Transactions => self.transactions.last().map(serde_json::to_value),
            Collection::Stocks => self.stocks.last().map(serde_json::to_value),
            Collection::MutualFunds => self.mutual_funds.last().map(serde_json::to_value),
            Collection::Etfs => self.etfs.last().map(serde_json::to_value),
            Collection::Gold => self.gold.last().map(serde_json::to_value),
            Collection::RealEstate => self.real_estate.last().map(serde_json::to_value),
            Collection::FixedIncome => self.fixed_income.last().map(serde_json::to_value),
            Collection::Budgets => self.budgets.last().map(serde_json::to_value),
        };
        result.and_then(|r| r.ok())
    }

    /// Every record in `collection`, as JSON
    pub fn records(&self, collection: Collection) -> serde_json::Result<Vec<serde_json::Value>> {
        fn to_values<T: Serialize>(items: &[T]) -> serde_json::Result<Vec<serde_json::Value>> {
            items.iter().map(serde_json::to_value).collect()
        }

        match collection {
            Collection::Transactions => to_values(&self.transactions),
            Collection::Stocks => to_values(&self.stocks),
            Collection::MutualFunds => to_values(&self.mutual_funds),
            Collection::Etfs => to_values(&self.etfs),
            Collection::Gold => to_values(&self.gold),
            Collection::RealEstate => to_values(&self.real_estate),
            Collection::FixedIncome => to_values(&self.fixed_income),
            Collection::Budgets => to_values(&self.budgets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::dispatch::dispatch;
    use crate::agent::{ActionError, AgentAction, SpeakPayload};
    use crate::model::{InvestmentBase, InvestmentType, NewBudget, NewStock, NewTransaction, TransactionType};

    fn travel_budget() -> AgentAction {
        AgentAction::AddBudget(NewBudget {
            category: "Travel".to_string(),
            limit: 500.0,
        })
    }

    #[test]
    fn test_add_budget_appends_unspent_record() {
        let mut store = Store::new();
        {
            let mut handlers = store.handlers();
            dispatch(travel_budget(), &mut handlers).unwrap();
        }

        assert_eq!(store.budgets.len(), 1);
        let budget = &store.budgets[0];
        assert_eq!(budget.details.category, "Travel");
        assert_eq!(budget.details.limit, 500.0);
        assert_eq!(budget.spent, 0.0);
        assert!(!budget.id.as_str().is_empty());
    }

    #[test]
    fn test_same_action_twice_yields_two_records() {
        let mut store = Store::new();
        {
            let mut handlers = store.handlers();
            dispatch(travel_budget(), &mut handlers).unwrap();
            dispatch(travel_budget(), &mut handlers).unwrap();
        }

        assert_eq!(store.budgets.len(), 2);
        assert_ne!(store.budgets[0].id, store.budgets[1].id);
        assert_eq!(store.budgets[0].details, store.budgets[1].details);
    }

    #[test]
    fn test_records_keep_insertion_order() {
        let mut store = Store::new();
        {
            let mut handlers = store.handlers();
            for (i, description) in ["Rent", "Groceries", "Fuel"].iter().enumerate() {
                let action = AgentAction::AddTransaction(NewTransaction {
                    date: format!("2024-02-0{}", i + 1),
                    description: description.to_string(),
                    amount: 10.0,
                    kind: TransactionType::Expense,
                    category: "Home".to_string(),
                });
                dispatch(action, &mut handlers).unwrap();
            }
        }

        let descriptions: Vec<_> = store.transactions.iter().map(|t| t.details.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Rent", "Groceries", "Fuel"]);
    }

    #[test]
    fn test_stock_value_derived_on_append() {
        let mut store = Store::new();
        {
            let mut handlers = store.handlers();
            let action = AgentAction::AddStock(NewStock {
                base: InvestmentBase {
                    name: "Infosys".to_string(),
                    kind: InvestmentType::Stock,
                    quantity: 4.0,
                    purchase_price: 1400.0,
                    current_price: 1500.0,
                },
                ticker: "INFY".to_string(),
                sector: "Technology".to_string(),
            });
            dispatch(action, &mut handlers).unwrap();
        }

        assert_eq!(store.stocks[0].value, 6000.0);
        assert_eq!(store.last_id(Collection::Stocks), Some(&store.stocks[0].id));
    }

    #[test]
    fn test_store_does_not_handle_speak() {
        let mut store = Store::new();
        let mut handlers = store.handlers();
        let action = AgentAction::Speak(SpeakPayload {
            message_key: "agent.hello".to_string(),
        });
        assert!(matches!(
            dispatch(action, &mut handlers),
            Err(ActionError::UnknownActionKind(_))
        ));
    }

    #[test]
    fn test_last_record_json() {
        let mut store = Store::new();
        assert!(store.last_record(Collection::Budgets).is_none());
        {
            let mut handlers = store.handlers();
            dispatch(travel_budget(), &mut handlers).unwrap();
        }
        let record = store.last_record(Collection::Budgets).unwrap();
        assert_eq!(record["category"], "Travel");
        assert_eq!(record["spent"], 0.0);
    }

    #[test]
    fn test_collection_for_action() {
        assert_eq!(Collection::for_action(ActionKind::Speak), None);
        assert_eq!(Collection::for_action(ActionKind::AddEtf), Some(Collection::Etfs));
        for kind in ActionKind::ALL.into_iter().filter(|k| *k != ActionKind::Speak) {
            assert!(Collection::for_action(kind).is_some());
        }
    }

    #[test]
    fn test_total_records() {
        let store = Store::new();
        assert_eq!(store.total_records(), 0);
        let seeded = Store::seeded();
        assert!(seeded.total_records() > 0);
    }
}
