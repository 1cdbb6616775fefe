// Game DAO Port (Interface)

use crate::domain::{Game, GameId};
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Data access for the `game` table, bound to a caller-supplied connection
#[async_trait]
pub trait GameDao: Send {
    async fn create(&mut self, game: Game) -> Result<Game>;

    async fn retrieve(&mut self, id: Option<GameId>) -> Result<Option<Game>>;

    /// Games whose title matches a `LIKE` pattern (`%` and `_` wildcards)
    async fn retrieve_by_title(&mut self, pattern: &str) -> Result<Vec<Game>>;

    /// Games released within `[start, end]`
    async fn retrieve_by_release_date(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Game>>;

    async fn update(&mut self, game: &Game) -> Result<u64>;

    async fn delete(&mut self, id: Option<GameId>) -> Result<u64>;

    async fn count(&mut self) -> Result<i64>;
}
