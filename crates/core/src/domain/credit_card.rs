// Credit Card Domain Model

use super::PlayerId;
use serde::{Deserialize, Serialize};

/// Credit card ID (assigned by storage on insert)
pub type CreditCardId = i64;

/// Credit card owned by exactly one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    pub id: Option<CreditCardId>,
    pub player_id: Option<PlayerId>, // Owner, non-null once persisted
    pub cc_name: String,
    pub cc_number: String,
    pub exp_date: String, // e.g. "12/28"
    pub security_code: i32,
}

impl CreditCard {
    /// Create an unsaved, unowned card
    pub fn new(
        cc_name: impl Into<String>,
        cc_number: impl Into<String>,
        exp_date: impl Into<String>,
        security_code: i32,
    ) -> Self {
        Self {
            id: None,
            player_id: None,
            cc_name: cc_name.into(),
            cc_number: cc_number.into(),
            exp_date: exp_date.into(),
            security_code,
        }
    }
}
