//! Investment records
//!
//! All six investment kinds share [`InvestmentBase`] and differ only in their
//! extra fields and in how the initial `value` is derived.

use serde::{Deserialize, Serialize};

use super::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentType {
    Stock,
    #[serde(rename = "Mutual Fund")]
    MutualFund,
    #[serde(rename = "ETF")]
    Etf,
    Gold,
    #[serde(rename = "Real Estate")]
    RealEstate,
    Bond,
    #[serde(rename = "Fixed Income")]
    FixedIncome,
}

/// Fields every investment carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentBase {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InvestmentType,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
}

impl InvestmentBase {
    pub fn market_value(&self) -> f64 {
        self.quantity * self.current_price
    }
}

/// How an investment draft derives its `value` at creation
pub trait Valuation {
    /// Asset class label used when grouping holdings
    const ASSET_CLASS: &'static str;

    fn base(&self) -> &InvestmentBase;

    fn initial_value(&self) -> f64 {
        self.base().market_value()
    }
}

/// A stored investment: the draft plus its id and snapshot value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding<T> {
    pub id: RecordId,
    #[serde(flatten)]
    pub details: T,
    pub value: f64,
}

impl<T: Valuation> Holding<T> {
    pub fn new(details: T) -> Self {
        let value = details.initial_value();
        Self {
            id: RecordId::generate(),
            details,
            value,
        }
    }

    pub fn base(&self) -> &InvestmentBase {
        self.details.base()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStock {
    #[serde(flatten)]
    pub base: InvestmentBase,
    pub ticker: String,
    pub sector: String,
}

impl Valuation for NewStock {
    const ASSET_CLASS: &'static str = "Stocks";

    fn base(&self) -> &InvestmentBase {
        &self.base
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutualFundCategory {
    #[serde(rename = "Large Cap")]
    LargeCap,
    #[serde(rename = "Mid Cap")]
    MidCap,
    #[serde(rename = "Small Cap")]
    SmallCap,
    #[serde(rename = "ELSS")]
    Elss,
    Debt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMutualFund {
    #[serde(flatten)]
    pub base: InvestmentBase,
    pub fund_house: String,
    pub category: MutualFundCategory,
}

impl Valuation for NewMutualFund {
    const ASSET_CLASS: &'static str = "Mutual Funds";

    fn base(&self) -> &InvestmentBase {
        &self.base
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEtf {
    #[serde(flatten)]
    pub base: InvestmentBase,
    pub issuer: String,
    pub expense_ratio: f64,
    pub ticker: String,
}

impl Valuation for NewEtf {
    const ASSET_CLASS: &'static str = "ETFs";

    fn base(&self) -> &InvestmentBase {
        &self.base
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoldForm {
    #[serde(rename = "Digital Gold")]
    DigitalGold,
    #[serde(rename = "Sovereign Gold Bond")]
    SovereignGoldBond,
    #[serde(rename = "Gold ETF")]
    GoldEtf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGold {
    #[serde(flatten)]
    pub base: InvestmentBase,
    pub form: GoldForm,
    pub weight_in_grams: f64,
}

impl Valuation for NewGold {
    const ASSET_CLASS: &'static str = "Gold";

    fn base(&self) -> &InvestmentBase {
        &self.base
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Residential,
    Commercial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRealEstate {
    #[serde(flatten)]
    pub base: InvestmentBase,
    pub location: String,
    pub property_type: PropertyType,
    pub rental_income_per_month: f64,
}

impl Valuation for NewRealEstate {
    const ASSET_CLASS: &'static str = "Real Estate";

    fn base(&self) -> &InvestmentBase {
        &self.base
    }

    // A property is valued at its current price regardless of quantity.
    fn initial_value(&self) -> f64 {
        self.base.current_price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixedIncomeInstrument {
    #[serde(rename = "Fixed Deposit")]
    FixedDeposit,
    Bond,
    #[serde(rename = "PPF")]
    Ppf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFixedIncome {
    #[serde(flatten)]
    pub base: InvestmentBase,
    pub instrument: FixedIncomeInstrument,
    pub interest_rate: f64,
    pub maturity_date: String,
}

impl Valuation for NewFixedIncome {
    const ASSET_CLASS: &'static str = "Fixed Income";

    fn base(&self) -> &InvestmentBase {
        &self.base
    }

    // Principal, not market price.
    fn initial_value(&self) -> f64 {
        self.base.purchase_price
    }
}

pub type Stock = Holding<NewStock>;
pub type MutualFund = Holding<NewMutualFund>;
pub type Etf = Holding<NewEtf>;
pub type GoldInvestment = Holding<NewGold>;
pub type RealEstateInvestment = Holding<NewRealEstate>;
pub type FixedIncomeInvestment = Holding<NewFixedIncome>;
