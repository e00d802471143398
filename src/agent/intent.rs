//! Rule-based intent interpretation
//!
//! Turns a short English sentence into an [`AgentResponse`]: the action to
//! dispatch plus a confirmation message key and its parameters. Sentences
//! that match no rule become a `speak` action with `agent.unrecognized`.
//!
//! Recognised forms (case-insensitive, optional currency prefix):
//! - `spent 250 on lunch [for food]`
//! - `earned 5000 [from freelance work]`
//! - `bought 10 shares of INFY at 1500`
//! - `bought 5 grams of gold at 6200`
//! - `set a budget of 500 for travel` / `budget 500 for travel`

use chrono::NaiveDate;
use indexmap::IndexMap;
use lazy_regex::regex_captures;

use super::{AgentAction, AgentResponse, ConfirmationParam, SpeakPayload};
use crate::model::{
    GoldForm, InvestmentBase, InvestmentType, NewBudget, NewGold, NewStock, NewTransaction, TransactionType,
};

pub const UNRECOGNIZED_KEY: &str = "agent.unrecognized";
const DEFAULT_EXPENSE_CATEGORY: &str = "General";
const INCOME_CATEGORY: &str = "Income";
const UNKNOWN_SECTOR: &str = "Unknown";

/// Interpret `text`, dating any transaction `today`
pub fn interpret(text: &str, today: NaiveDate) -> AgentResponse {
    let text = text.trim();
    log::debug!("Interpreting: {}", text);

    let response = expense(text, today)
        .or_else(|| income(text, today))
        .or_else(|| stock(text))
        .or_else(|| gold(text))
        .or_else(|| budget(text));

    match response {
        Some(response) => {
            log::info!("Interpreted as {} action", response.action.kind());
            response
        }
        None => {
            log::info!("No intent matched, replying with {}", UNRECOGNIZED_KEY);
            unrecognized()
        }
    }
}

fn unrecognized() -> AgentResponse {
    AgentResponse {
        action: AgentAction::Speak(SpeakPayload {
            message_key: UNRECOGNIZED_KEY.to_string(),
        }),
        confirmation_key: UNRECOGNIZED_KEY.to_string(),
        confirmation_params: IndexMap::new(),
    }
}

fn expense(text: &str, today: NaiveDate) -> Option<AgentResponse> {
    let (_, amount, description, category) = regex_captures!(
        r"^(?:i\s+)?spent\s+(?:rs\.?\s*|₹|\$)?([0-9][0-9,]*(?:\.[0-9]+)?)\s+on\s+(.+?)(?:\s+for\s+(.+?))?\s*\.?$"i,
        text
    )?;
    let amount = parse_amount(amount)?;
    let category = if category.is_empty() { DEFAULT_EXPENSE_CATEGORY.to_string() } else { title_case(category) };

    Some(transaction_response(
        NewTransaction {
            date: today.format("%Y-%m-%d").to_string(),
            description: capitalize(description),
            amount,
            kind: TransactionType::Expense,
            category,
        },
        "agent.confirm.add_expense",
    ))
}

fn income(text: &str, today: NaiveDate) -> Option<AgentResponse> {
    let (_, amount, source) = regex_captures!(
        r"^(?:i\s+)?(?:earned|received|got paid)\s+(?:rs\.?\s*|₹|\$)?([0-9][0-9,]*(?:\.[0-9]+)?)(?:\s+from\s+(.+?))?\s*\.?$"i,
        text
    )?;
    let amount = parse_amount(amount)?;
    let description = if source.is_empty() { INCOME_CATEGORY.to_string() } else { capitalize(source) };

    Some(transaction_response(
        NewTransaction {
            date: today.format("%Y-%m-%d").to_string(),
            description,
            amount,
            kind: TransactionType::Income,
            category: INCOME_CATEGORY.to_string(),
        },
        "agent.confirm.add_income",
    ))
}

fn transaction_response(tx: NewTransaction, key: &str) -> AgentResponse {
    let mut params = IndexMap::new();
    params.insert("amount".to_string(), ConfirmationParam::from(tx.amount));
    params.insert("description".to_string(), ConfirmationParam::from(tx.description.as_str()));
    params.insert("category".to_string(), ConfirmationParam::from(tx.category.as_str()));

    AgentResponse {
        action: AgentAction::AddTransaction(tx),
        confirmation_key: key.to_string(),
        confirmation_params: params,
    }
}

fn stock(text: &str) -> Option<AgentResponse> {
    let (_, quantity, ticker, price) = regex_captures!(
        r"^(?:i\s+)?bought\s+([0-9]+(?:\.[0-9]+)?)\s+shares?\s+of\s+([a-z][a-z0-9.&-]*)\s+at\s+(?:rs\.?\s*|₹|\$)?([0-9][0-9,]*(?:\.[0-9]+)?)\s*\.?$"i,
        text
    )?;
    let quantity = parse_amount(quantity)?;
    let price = parse_amount(price)?;
    let ticker = ticker.to_uppercase();

    let mut params = IndexMap::new();
    params.insert("quantity".to_string(), ConfirmationParam::from(quantity));
    params.insert("ticker".to_string(), ConfirmationParam::from(ticker.as_str()));
    params.insert("price".to_string(), ConfirmationParam::from(price));

    Some(AgentResponse {
        action: AgentAction::AddStock(NewStock {
            base: InvestmentBase {
                name: ticker.clone(),
                kind: InvestmentType::Stock,
                quantity,
                purchase_price: price,
                current_price: price,
            },
            ticker,
            sector: UNKNOWN_SECTOR.to_string(),
        }),
        confirmation_key: "agent.confirm.add_stock".to_string(),
        confirmation_params: params,
    })
}

fn gold(text: &str) -> Option<AgentResponse> {
    let (_, grams, price) = regex_captures!(
        r"^(?:i\s+)?bought\s+([0-9]+(?:\.[0-9]+)?)\s*(?:g|gm|grams?)\s+of\s+gold\s+at\s+(?:rs\.?\s*|₹|\$)?([0-9][0-9,]*(?:\.[0-9]+)?)(?:\s*(?:per|/)\s*(?:g|gm|gram))?\s*\.?$"i,
        text
    )?;
    let grams = parse_amount(grams)?;
    let price = parse_amount(price)?;

    let mut params = IndexMap::new();
    params.insert("grams".to_string(), ConfirmationParam::from(grams));
    params.insert("price".to_string(), ConfirmationParam::from(price));

    Some(AgentResponse {
        action: AgentAction::AddGold(NewGold {
            base: InvestmentBase {
                name: "Digital Gold".to_string(),
                kind: InvestmentType::Gold,
                quantity: grams,
                purchase_price: price,
                current_price: price,
            },
            form: GoldForm::DigitalGold,
            weight_in_grams: grams,
        }),
        confirmation_key: "agent.confirm.add_gold".to_string(),
        confirmation_params: params,
    })
}

fn budget(text: &str) -> Option<AgentResponse> {
    let (_, limit, category) = regex_captures!(
        r"^(?:set\s+(?:a\s+|my\s+)?)?budget\s+(?:of\s+)?(?:rs\.?\s*|₹|\$)?([0-9][0-9,]*(?:\.[0-9]+)?)\s+for\s+(.+?)\s*\.?$"i,
        text
    )?;
    let limit = parse_amount(limit)?;
    let category = title_case(category);

    let mut params = IndexMap::new();
    params.insert("limit".to_string(), ConfirmationParam::from(limit));
    params.insert("category".to_string(), ConfirmationParam::from(category.as_str()));

    Some(AgentResponse {
        action: AgentAction::AddBudget(NewBudget { category, limit }),
        confirmation_key: "agent.confirm.add_budget".to_string(),
        confirmation_params: params,
    })
}

/// Parse `1,200.50` style amounts
fn parse_amount(s: &str) -> Option<f64> {
    s.replace(',', "").parse().ok()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn title_case(s: &str) -> String {
    s.split_whitespace().map(capitalize).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_expense_with_category() {
        let response = interpret("I spent 4.50 on coffee for food", today());
        match response.action {
            AgentAction::AddTransaction(tx) => {
                assert_eq!(tx.date, "2024-01-01");
                assert_eq!(tx.description, "Coffee");
                assert_eq!(tx.amount, 4.5);
                assert_eq!(tx.kind, TransactionType::Expense);
                assert_eq!(tx.category, "Food");
            }
            other => panic!("unexpected action: {:?}", other),
        }
        assert_eq!(response.confirmation_key, "agent.confirm.add_expense");
        assert_eq!(response.confirmation_params["amount"], ConfirmationParam::Number(4.5));
    }

    #[test]
    fn test_expense_defaults_category() {
        let response = interpret("spent ₹1,200 on groceries.", today());
        match response.action {
            AgentAction::AddTransaction(tx) => {
                assert_eq!(tx.amount, 1200.0);
                assert_eq!(tx.description, "Groceries");
                assert_eq!(tx.category, DEFAULT_EXPENSE_CATEGORY);
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_income() {
        let response = interpret("Received 18000 from freelance project", today());
        match response.action {
            AgentAction::AddTransaction(tx) => {
                assert_eq!(tx.kind, TransactionType::Income);
                assert_eq!(tx.amount, 18000.0);
                assert_eq!(tx.description, "Freelance project");
                assert_eq!(tx.category, INCOME_CATEGORY);
            }
            other => panic!("unexpected action: {:?}", other),
        }
        assert_eq!(response.confirmation_key, "agent.confirm.add_income");
    }

    #[test]
    fn test_stock_purchase() {
        let response = interpret("bought 10 shares of infy at 1500", today());
        match response.action {
            AgentAction::AddStock(stock) => {
                assert_eq!(stock.ticker, "INFY");
                assert_eq!(stock.base.quantity, 10.0);
                assert_eq!(stock.base.purchase_price, 1500.0);
                assert_eq!(stock.base.current_price, 1500.0);
                assert_eq!(stock.base.kind, InvestmentType::Stock);
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_gold_purchase() {
        let response = interpret("Bought 5 grams of gold at 6200 per gram", today());
        match response.action {
            AgentAction::AddGold(gold) => {
                assert_eq!(gold.weight_in_grams, 5.0);
                assert_eq!(gold.base.quantity, 5.0);
                assert_eq!(gold.base.current_price, 6200.0);
                assert_eq!(gold.form, GoldForm::DigitalGold);
            }
            other => panic!("unexpected action: {:?}", other),
        }
    }

    #[test]
    fn test_budget() {
        let response = interpret("Set a budget of 500 for travel", today());
        assert_eq!(
            response.action,
            AgentAction::AddBudget(NewBudget {
                category: "Travel".to_string(),
                limit: 500.0,
            })
        );
        assert_eq!(response.confirmation_key, "agent.confirm.add_budget");
    }

    #[test]
    fn test_short_budget_form() {
        let response = interpret("budget 2,000 for eating out", today());
        assert_eq!(
            response.action,
            AgentAction::AddBudget(NewBudget {
                category: "Eating Out".to_string(),
                limit: 2000.0,
            })
        );
    }

    #[test]
    fn test_unrecognized_speaks() {
        let response = interpret("what's my net worth?", today());
        assert_eq!(
            response.action,
            AgentAction::Speak(SpeakPayload {
                message_key: UNRECOGNIZED_KEY.to_string(),
            })
        );
        assert!(response.confirmation_params.is_empty());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,250.75"), Some(1250.75));
        assert_eq!(parse_amount("abc"), None);
    }
}
