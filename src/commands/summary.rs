//! Store summary
//!
//! Totals are plain sums over the stored records; investment values are the
//! snapshots taken when each holding was created.

use colored::*;
use eyre::Result;
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

use super::load_store;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::model::{Holding, Valuation};
use crate::store::Store;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub income: f64,
    pub expenses: f64,
    pub net_cash_flow: f64,
    /// Value per asset class, in a fixed class order
    pub holdings: IndexMap<&'static str, f64>,
    pub invested_value: f64,
    /// Expense totals per category, in first-seen order
    pub expenses_by_category: IndexMap<String, f64>,
    pub budgets: Vec<BudgetLine>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub category: String,
    pub limit: f64,
    pub spent: f64,
    pub remaining: f64,
}

fn class_total<T: Valuation>(holdings: &[Holding<T>]) -> (&'static str, f64) {
    (T::ASSET_CLASS, holdings.iter().map(|h| h.value).sum())
}

impl Summary {
    pub fn from_store(store: &Store) -> Self {
        let income: f64 = store
            .transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.details.amount)
            .sum();
        let expenses: f64 = store
            .transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.details.amount)
            .sum();

        let holdings: IndexMap<&'static str, f64> = [
            class_total(&store.stocks),
            class_total(&store.mutual_funds),
            class_total(&store.etfs),
            class_total(&store.gold),
            class_total(&store.real_estate),
            class_total(&store.fixed_income),
        ]
        .into_iter()
        .collect();
        let invested_value = holdings.values().sum();

        let mut expenses_by_category: IndexMap<String, f64> = IndexMap::new();
        for tx in store.transactions.iter().filter(|t| t.is_expense()) {
            *expenses_by_category.entry(tx.details.category.clone()).or_insert(0.0) += tx.details.amount;
        }

        let budgets = store
            .budgets
            .iter()
            .map(|b| BudgetLine {
                category: b.details.category.clone(),
                limit: b.details.limit,
                spent: b.spent,
                remaining: b.remaining(),
            })
            .collect();

        Self {
            income,
            expenses,
            net_cash_flow: income - expenses,
            holdings,
            invested_value,
            expenses_by_category,
            budgets,
        }
    }
}

pub fn run(actions: Option<&Path>, format: OutputFormat, config: &Config) -> Result<()> {
    let store = load_store(actions, config)?;
    let summary = Summary::from_store(&store);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&summary)?),
        OutputFormat::Text => print_text(&summary),
    }

    Ok(())
}

fn print_text(summary: &Summary) {
    println!("{}", "Summary".bold());
    println!();

    println!("{}:", "Cash flow".cyan());
    println!("  {:16} {:>14.2}", "Income", summary.income);
    println!("  {:16} {:>14.2}", "Expenses", summary.expenses);
    let net = format!("{:>14.2}", summary.net_cash_flow);
    let net = if summary.net_cash_flow < 0.0 { net.red() } else { net.green() };
    println!("  {:16} {}", "Net", net);
    println!();

    println!("{}:", "Holdings".cyan());
    for (class, value) in &summary.holdings {
        println!("  {:16} {:>14.2}", class, value);
    }
    println!("  {:16} {:>14.2}", "Total".bold(), summary.invested_value);
    println!();

    println!("{}:", "Expenses by category".cyan());
    if summary.expenses_by_category.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (category, total) in &summary.expenses_by_category {
        println!("  {:16} {:>14.2}", category, total);
    }
    println!();

    println!("{}:", "Budgets".cyan());
    if summary.budgets.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for line in &summary.budgets {
        println!(
            "  {:16} {:>10.2} of {:>10.2} {}",
            line.category,
            line.spent,
            line.limit,
            format!("({:.2} left)", line.remaining).dimmed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Budget, InvestmentBase, InvestmentType, NewBudget, NewRealEstate, NewStock, NewTransaction, PropertyType,
        RealEstateInvestment, Stock, Transaction, TransactionType,
    };

    fn tx(amount: f64, kind: TransactionType, category: &str) -> Transaction {
        Transaction::new(NewTransaction {
            date: "2024-03-01".to_string(),
            description: "x".to_string(),
            amount,
            kind,
            category: category.to_string(),
        })
    }

    #[test]
    fn test_empty_store() {
        let summary = Summary::from_store(&Store::new());
        assert_eq!(summary.income, 0.0);
        assert_eq!(summary.invested_value, 0.0);
        assert_eq!(summary.holdings.len(), 6);
        assert!(summary.expenses_by_category.is_empty());
    }

    #[test]
    fn test_cash_flow_and_categories() {
        let mut store = Store::new();
        store.transactions = vec![
            tx(1000.0, TransactionType::Income, "Salary"),
            tx(200.0, TransactionType::Expense, "Food"),
            tx(50.0, TransactionType::Expense, "Travel"),
            tx(25.0, TransactionType::Expense, "Food"),
        ];

        let summary = Summary::from_store(&store);
        assert_eq!(summary.income, 1000.0);
        assert_eq!(summary.expenses, 275.0);
        assert_eq!(summary.net_cash_flow, 725.0);
        let categories: Vec<_> = summary.expenses_by_category.iter().collect();
        assert_eq!(categories[0], (&"Food".to_string(), &225.0));
        assert_eq!(categories[1], (&"Travel".to_string(), &50.0));
    }

    #[test]
    fn test_holdings_use_snapshot_values() {
        let mut store = Store::new();
        store.stocks.push(Stock::new(NewStock {
            base: InvestmentBase {
                name: "Infosys".to_string(),
                kind: InvestmentType::Stock,
                quantity: 2.0,
                purchase_price: 100.0,
                current_price: 150.0,
            },
            ticker: "INFY".to_string(),
            sector: "Technology".to_string(),
        }));
        store.real_estate.push(RealEstateInvestment::new(NewRealEstate {
            base: InvestmentBase {
                name: "Flat".to_string(),
                kind: InvestmentType::RealEstate,
                quantity: 1.0,
                purchase_price: 1000.0,
                current_price: 1200.0,
            },
            location: "Pune".to_string(),
            property_type: PropertyType::Residential,
            rental_income_per_month: 10.0,
        }));
        store.stocks[0].details.base.current_price = 999.0;

        let summary = Summary::from_store(&store);
        assert_eq!(summary.holdings["Stocks"], 300.0);
        assert_eq!(summary.holdings["Real Estate"], 1200.0);
        assert_eq!(summary.invested_value, 1500.0);
    }

    #[test]
    fn test_budget_lines() {
        let mut store = Store::new();
        store.budgets.push(Budget::new(NewBudget {
            category: "Travel".to_string(),
            limit: 500.0,
        }));

        let summary = Summary::from_store(&store);
        assert_eq!(summary.budgets.len(), 1);
        assert_eq!(summary.budgets[0].spent, 0.0);
        assert_eq!(summary.budgets[0].remaining, 500.0);
    }
}
