// Player DAO Port (Interface)

use crate::domain::{Player, PlayerId};
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Data access for the `player` table, bound to a caller-supplied connection
///
/// Only the player row is read or written; the owned credit cards are the
/// service layer's concern.
#[async_trait]
pub trait PlayerDao: Send {
    /// Insert a player and copy the generated ID onto it
    ///
    /// # Errors
    /// - AppError::Precondition if the player already has an ID
    async fn create(&mut self, player: Player) -> Result<Player>;

    /// Find player by ID (None when no row matches)
    async fn retrieve(&mut self, id: Option<PlayerId>) -> Result<Option<Player>>;

    /// Players who joined within `[start, end]`
    async fn retrieve_by_join_date(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Player>>;

    /// Update player, returning affected rows (0 if the ID does not exist)
    async fn update(&mut self, player: &Player) -> Result<u64>;

    /// Delete player row, returning affected rows
    async fn delete(&mut self, id: Option<PlayerId>) -> Result<u64>;

    /// Count all players
    async fn count(&mut self) -> Result<i64>;
}
