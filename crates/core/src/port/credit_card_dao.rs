// Credit Card DAO Port (Interface)

use crate::domain::{CreditCard, CreditCardId, PlayerId};
use crate::error::Result;
use async_trait::async_trait;

/// Data access for the `creditcard` table, bound to a caller-supplied connection
#[async_trait]
pub trait CreditCardDao: Send {
    /// Insert a card for `player_id` and copy the generated ID onto it
    ///
    /// # Errors
    /// - AppError::Precondition if the card already has an ID or `player_id` is None
    async fn create(&mut self, card: CreditCard, player_id: Option<PlayerId>)
        -> Result<CreditCard>;

    /// Find card by ID (None when no row matches)
    async fn retrieve(&mut self, id: Option<CreditCardId>) -> Result<Option<CreditCard>>;

    /// All cards owned by a player (possibly empty)
    async fn retrieve_for_player(&mut self, player_id: Option<PlayerId>)
        -> Result<Vec<CreditCard>>;

    /// Update card, returning affected rows
    async fn update(&mut self, card: &CreditCard) -> Result<u64>;

    /// Delete one card, returning affected rows
    async fn delete(&mut self, id: Option<CreditCardId>) -> Result<u64>;

    /// Delete every card owned by a player, returning affected rows
    async fn delete_for_player(&mut self, player_id: Option<PlayerId>) -> Result<u64>;

    /// Count all cards
    async fn count(&mut self) -> Result<i64>;
}
