// Player Domain Model

use super::CreditCard;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Player ID (assigned by storage on insert)
pub type PlayerId = i64;

/// Player aggregate root
///
/// A player owns its credit cards. The `credit_cards` collection is not a
/// column: services load and persist it alongside the player row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: Option<PlayerId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub join_date: NaiveDate,

    #[serde(default)]
    pub credit_cards: Vec<CreditCard>,
}

impl Player {
    /// Create an unsaved player with no credit cards
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        join_date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            join_date,
            credit_cards: Vec::new(),
        }
    }

    /// Builder-style helper for attaching a card before create
    pub fn with_credit_card(mut self, card: CreditCard) -> Self {
        self.credit_cards.push(card);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
