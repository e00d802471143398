use colored::*;
use eyre::Result;
use std::path::Path;

use super::load_store;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::model::{Holding, Valuation};
use crate::store::{Collection, Store};

pub fn run(collection: Collection, actions: Option<&Path>, format: OutputFormat, config: &Config) -> Result<()> {
    let store = load_store(actions, config)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&store.records(collection)?)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&store.records(collection)?)?),
        OutputFormat::Text => print_text(collection, &store),
    }

    Ok(())
}

fn print_text(collection: Collection, store: &Store) {
    println!(
        "{} ({}):",
        collection.to_string().cyan(),
        format!("{} records", store.len(collection)).dimmed()
    );

    if store.len(collection) == 0 {
        println!("  {}", "(none)".dimmed());
        return;
    }

    match collection {
        Collection::Transactions => {
            for tx in &store.transactions {
                let amount = if tx.is_income() {
                    format!("+{:.2}", tx.details.amount).green()
                } else {
                    format!("-{:.2}", tx.details.amount).red()
                };
                println!(
                    "  {} {:28} {:>12} {}",
                    tx.details.date.dimmed(),
                    tx.details.description,
                    amount,
                    format!("[{}]", tx.details.category).dimmed()
                );
            }
        }
        Collection::Stocks => {
            for stock in &store.stocks {
                print_holding(stock, &format!("{} · {}", stock.details.ticker, stock.details.sector));
            }
        }
        Collection::MutualFunds => {
            for fund in &store.mutual_funds {
                print_holding(fund, &fund.details.fund_house);
            }
        }
        Collection::Etfs => {
            for etf in &store.etfs {
                print_holding(
                    etf,
                    &format!("{} · {} · TER {}%", etf.details.ticker, etf.details.issuer, etf.details.expense_ratio),
                );
            }
        }
        Collection::Gold => {
            for gold in &store.gold {
                print_holding(gold, &format!("{}g", gold.details.weight_in_grams));
            }
        }
        Collection::RealEstate => {
            for property in &store.real_estate {
                print_holding(
                    property,
                    &format!(
                        "{} · {:.0}/month",
                        property.details.location, property.details.rental_income_per_month
                    ),
                );
            }
        }
        Collection::FixedIncome => {
            for fi in &store.fixed_income {
                print_holding(
                    fi,
                    &format!("{}% · matures {}", fi.details.interest_rate, fi.details.maturity_date),
                );
            }
        }
        Collection::Budgets => {
            for budget in &store.budgets {
                println!(
                    "  {:20} {:>10.2} limit {:>10.2} spent",
                    budget.details.category,
                    budget.details.limit,
                    budget.spent
                );
            }
        }
    }
}

fn print_holding<T: Valuation>(holding: &Holding<T>, detail: &str) {
    let base = holding.base();
    println!(
        "  {:28} {:>10} × {:>10.2} = {:>14.2} {}",
        base.name,
        base.quantity,
        base.current_price,
        holding.value,
        detail.dimmed()
    );
}
