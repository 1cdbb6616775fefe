// Games Played DAO Port (Interface)

use crate::domain::{GameId, GamesPlayed, GamesPlayedId, PlayerId};
use crate::error::Result;
use async_trait::async_trait;

/// Data access for the `gamesplayed` table, bound to a caller-supplied connection
///
/// Player and game references are required to be present but are never
/// checked against the `player` or `game` tables.
#[async_trait]
pub trait GamesPlayedDao: Send {
    /// # Errors
    /// - AppError::Precondition if the record has an ID, or lacks a player or game ID
    async fn create(&mut self, record: GamesPlayed) -> Result<GamesPlayed>;

    async fn retrieve(&mut self, id: Option<GamesPlayedId>) -> Result<Option<GamesPlayed>>;

    async fn retrieve_by_player_and_game(
        &mut self,
        player_id: Option<PlayerId>,
        game_id: Option<GameId>,
    ) -> Result<Vec<GamesPlayed>>;

    async fn retrieve_by_player(&mut self, player_id: Option<PlayerId>)
        -> Result<Vec<GamesPlayed>>;

    async fn retrieve_by_game(&mut self, game_id: Option<GameId>) -> Result<Vec<GamesPlayed>>;

    async fn update(&mut self, record: &GamesPlayed) -> Result<u64>;

    async fn delete(&mut self, id: Option<GamesPlayedId>) -> Result<u64>;

    async fn count(&mut self) -> Result<i64>;
}
