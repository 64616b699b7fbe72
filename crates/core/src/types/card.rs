//! Registered payment cards.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::CardId;

/// A stored-value card registered to the signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Card {
    pub id: Option<CardId>,
    /// Card number as the provider returns it (usually masked).
    pub number: Option<String>,
    pub nickname: Option<String>,
    /// Current balance in the card's currency.
    pub balance: Option<Decimal>,
}

impl Card {
    /// Whether the card can cover `amount`. Unknown balances never can.
    #[must_use]
    pub fn covers(&self, amount: Decimal) -> bool {
        self.balance.is_some_and(|balance| balance >= amount)
    }
}
