//! Action dispatching
//!
//! A [`Handlers`] table holds at most one callback per action kind. Dispatch
//! hands the action's payload, unchanged, to the callback for its kind. A
//! kind with no callback is an error, never a silent no-op.

use super::{ActionError, ActionKind, AgentAction, SpeakPayload};
use crate::model::{
    NewBudget, NewEtf, NewFixedIncome, NewGold, NewMutualFund, NewRealEstate, NewStock, NewTransaction,
};

type Handler<'a, P> = Box<dyn FnMut(P) + 'a>;

/// Mutation callbacks, one slot per action kind
#[derive(Default)]
pub struct Handlers<'a> {
    speak: Option<Handler<'a, SpeakPayload>>,
    add_transaction: Option<Handler<'a, NewTransaction>>,
    add_stock: Option<Handler<'a, NewStock>>,
    add_mutual_fund: Option<Handler<'a, NewMutualFund>>,
    add_etf: Option<Handler<'a, NewEtf>>,
    add_gold: Option<Handler<'a, NewGold>>,
    add_real_estate: Option<Handler<'a, NewRealEstate>>,
    add_fixed_income: Option<Handler<'a, NewFixedIncome>>,
    add_budget: Option<Handler<'a, NewBudget>>,
}

impl<'a> Handlers<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_speak(mut self, f: impl FnMut(SpeakPayload) + 'a) -> Self {
        self.speak = Some(Box::new(f));
        self
    }

    pub fn on_add_transaction(mut self, f: impl FnMut(NewTransaction) + 'a) -> Self {
        self.add_transaction = Some(Box::new(f));
        self
    }

    pub fn on_add_stock(mut self, f: impl FnMut(NewStock) + 'a) -> Self {
        self.add_stock = Some(Box::new(f));
        self
    }

    pub fn on_add_mutual_fund(mut self, f: impl FnMut(NewMutualFund) + 'a) -> Self {
        self.add_mutual_fund = Some(Box::new(f));
        self
    }

    pub fn on_add_etf(mut self, f: impl FnMut(NewEtf) + 'a) -> Self {
        self.add_etf = Some(Box::new(f));
        self
    }

    pub fn on_add_gold(mut self, f: impl FnMut(NewGold) + 'a) -> Self {
        self.add_gold = Some(Box::new(f));
        self
    }

    pub fn on_add_real_estate(mut self, f: impl FnMut(NewRealEstate) + 'a) -> Self {
        self.add_real_estate = Some(Box::new(f));
        self
    }

    pub fn on_add_fixed_income(mut self, f: impl FnMut(NewFixedIncome) + 'a) -> Self {
        self.add_fixed_income = Some(Box::new(f));
        self
    }

    pub fn on_add_budget(mut self, f: impl FnMut(NewBudget) + 'a) -> Self {
        self.add_budget = Some(Box::new(f));
        self
    }

    /// Unregister the handler for `kind`, if any
    pub fn remove(&mut self, kind: ActionKind) {
        match kind {
            ActionKind::Speak => self.speak = None,
            ActionKind::AddTransaction => self.add_transaction = None,
            ActionKind::AddStock => self.add_stock = None,
            ActionKind::AddMutualFund => self.add_mutual_fund = None,
            ActionKind::AddEtf => self.add_etf = None,
            ActionKind::AddGold => self.add_gold = None,
            ActionKind::AddRealEstate => self.add_real_estate = None,
            ActionKind::AddFixedIncome => self.add_fixed_income = None,
            ActionKind::AddBudget => self.add_budget = None,
        }
    }

    pub fn handles(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Speak => self.speak.is_some(),
            ActionKind::AddTransaction => self.add_transaction.is_some(),
            ActionKind::AddStock => self.add_stock.is_some(),
            ActionKind::AddMutualFund => self.add_mutual_fund.is_some(),
            ActionKind::AddEtf => self.add_etf.is_some(),
            ActionKind::AddGold => self.add_gold.is_some(),
            ActionKind::AddRealEstate => self.add_real_estate.is_some(),
            ActionKind::AddFixedIncome => self.add_fixed_income.is_some(),
            ActionKind::AddBudget => self.add_budget.is_some(),
        }
    }

    /// Kinds with a registered handler, in declaration order
    pub fn registered(&self) -> Vec<ActionKind> {
        ActionKind::ALL.into_iter().filter(|kind| self.handles(*kind)).collect()
    }
}

impl std::fmt::Debug for Handlers<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handlers").field("registered", &self.registered()).finish()
    }
}

fn invoke<P>(slot: &mut Option<Handler<'_, P>>, payload: P) -> bool {
    match slot {
        Some(handler) => {
            handler(payload);
            true
        }
        None => false,
    }
}

/// Route `action` to the handler registered for its kind
///
/// Returns the kind that was handled. Fails with
/// [`ActionError::UnknownActionKind`] when no handler is registered for the
/// action's kind; in that case no handler runs.
pub fn dispatch(action: AgentAction, handlers: &mut Handlers<'_>) -> Result<ActionKind, ActionError> {
    let kind = action.kind();
    log::debug!("Dispatching {} action", kind);

    let handled = match action {
        AgentAction::Speak(p) => invoke(&mut handlers.speak, p),
        AgentAction::AddTransaction(p) => invoke(&mut handlers.add_transaction, p),
        AgentAction::AddStock(p) => invoke(&mut handlers.add_stock, p),
        AgentAction::AddMutualFund(p) => invoke(&mut handlers.add_mutual_fund, p),
        AgentAction::AddEtf(p) => invoke(&mut handlers.add_etf, p),
        AgentAction::AddGold(p) => invoke(&mut handlers.add_gold, p),
        AgentAction::AddRealEstate(p) => invoke(&mut handlers.add_real_estate, p),
        AgentAction::AddFixedIncome(p) => invoke(&mut handlers.add_fixed_income, p),
        AgentAction::AddBudget(p) => invoke(&mut handlers.add_budget, p),
    };

    if !handled {
        log::warn!("No handler registered for {} action", kind);
        return Err(ActionError::UnknownActionKind(kind.to_string()));
    }

    Ok(kind)
}
