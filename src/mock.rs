//! Demo records for a fresh store

use crate::model::{
    Budget, Etf, FixedIncomeInstrument, FixedIncomeInvestment, GoldForm, GoldInvestment, InvestmentBase,
    InvestmentType, MutualFund, MutualFundCategory, NewBudget, NewEtf, NewFixedIncome, NewGold, NewMutualFund,
    NewRealEstate, NewStock, NewTransaction, PropertyType, RealEstateInvestment, Stock, Transaction, TransactionType,
};
use crate::store::Store;

fn base(name: &str, kind: InvestmentType, quantity: f64, purchase_price: f64, current_price: f64) -> InvestmentBase {
    InvestmentBase {
        name: name.to_string(),
        kind,
        quantity,
        purchase_price,
        current_price,
    }
}

fn transaction(date: &str, description: &str, amount: f64, kind: TransactionType, category: &str) -> Transaction {
    Transaction::new(NewTransaction {
        date: date.to_string(),
        description: description.to_string(),
        amount,
        kind,
        category: category.to_string(),
    })
}

fn budget(category: &str, limit: f64) -> Budget {
    Budget::new(NewBudget {
        category: category.to_string(),
        limit,
    })
}

pub fn seed() -> Store {
    use TransactionType::{Expense, Income};

    Store {
        transactions: vec![
            transaction("2024-07-01", "Salary", 120_000.0, Income, "Salary"),
            transaction("2024-07-02", "Rent", 35_000.0, Expense, "Housing"),
            transaction("2024-07-05", "Groceries", 6_200.0, Expense, "Food"),
            transaction("2024-07-09", "Electricity bill", 2_100.0, Expense, "Utilities"),
            transaction("2024-07-14", "Dinner out", 3_400.0, Expense, "Food"),
            transaction("2024-07-20", "Freelance project", 18_000.0, Income, "Freelance"),
            transaction("2024-07-22", "Flight tickets", 9_800.0, Expense, "Travel"),
        ],
        stocks: vec![
            Stock::new(NewStock {
                base: base("Reliance Industries", InvestmentType::Stock, 20.0, 2_450.0, 2_910.0),
                ticker: "RELIANCE".to_string(),
                sector: "Energy".to_string(),
            }),
            Stock::new(NewStock {
                base: base("Infosys", InvestmentType::Stock, 40.0, 1_380.0, 1_520.0),
                ticker: "INFY".to_string(),
                sector: "Technology".to_string(),
            }),
        ],
        mutual_funds: vec![
            MutualFund::new(NewMutualFund {
                base: base("Axis Bluechip Fund", InvestmentType::MutualFund, 850.0, 44.2, 52.7),
                fund_house: "Axis Mutual Fund".to_string(),
                category: MutualFundCategory::LargeCap,
            }),
            MutualFund::new(NewMutualFund {
                base: base("Mirae Asset Tax Saver", InvestmentType::MutualFund, 620.0, 31.5, 39.8),
                fund_house: "Mirae Asset".to_string(),
                category: MutualFundCategory::Elss,
            }),
        ],
        etfs: vec![Etf::new(NewEtf {
            base: base("Nippon India Nifty BeES", InvestmentType::Etf, 150.0, 228.0, 262.4),
            issuer: "Nippon India".to_string(),
            expense_ratio: 0.04,
            ticker: "NIFTYBEES".to_string(),
        })],
        gold: vec![GoldInvestment::new(NewGold {
            base: base("Sovereign Gold Bond 2023", InvestmentType::Gold, 10.0, 5_900.0, 7_150.0),
            form: GoldForm::SovereignGoldBond,
            weight_in_grams: 10.0,
        })],
        real_estate: vec![RealEstateInvestment::new(NewRealEstate {
            base: base("2BHK Apartment", InvestmentType::RealEstate, 1.0, 6_500_000.0, 7_800_000.0),
            location: "Pune".to_string(),
            property_type: PropertyType::Residential,
            rental_income_per_month: 22_000.0,
        })],
        fixed_income: vec![
            FixedIncomeInvestment::new(NewFixedIncome {
                base: base("SBI Fixed Deposit", InvestmentType::FixedIncome, 1.0, 200_000.0, 200_000.0),
                instrument: FixedIncomeInstrument::FixedDeposit,
                interest_rate: 6.8,
                maturity_date: "2026-03-31".to_string(),
            }),
            FixedIncomeInvestment::new(NewFixedIncome {
                base: base("Public Provident Fund", InvestmentType::FixedIncome, 1.0, 450_000.0, 450_000.0),
                instrument: FixedIncomeInstrument::Ppf,
                interest_rate: 7.1,
                maturity_date: "2034-04-01".to_string(),
            }),
        ],
        budgets: vec![
            budget("Food", 12_000.0),
            budget("Utilities", 4_000.0),
            budget("Travel", 15_000.0),
        ],
    }
}
