// Game Service - single-table operations under the unit of work contract

use super::unit_of_work::finish;
use crate::domain::{Game, GameId};
use crate::error::Result;
use crate::port::TransactionProvider;
use chrono::NaiveDate;
use std::sync::Arc;

/// Game service
///
/// Each call is one DAO call, still wrapped in begin / commit-or-rollback.
pub struct GameService {
    provider: Arc<dyn TransactionProvider>,
}

impl GameService {
    pub fn new(provider: Arc<dyn TransactionProvider>) -> Self {
        Self { provider }
    }

    pub async fn create(&self, game: Game) -> Result<Game> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games().create(game).await;
        finish(uow, outcome).await
    }

    pub async fn retrieve(&self, id: GameId) -> Result<Option<Game>> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games().retrieve(Some(id)).await;
        finish(uow, outcome).await
    }

    /// Games whose title matches a `LIKE` pattern, e.g. `"%Quest%"`
    pub async fn retrieve_by_title(&self, pattern: &str) -> Result<Vec<Game>> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games().retrieve_by_title(pattern).await;
        finish(uow, outcome).await
    }

    pub async fn retrieve_by_release_date(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Game>> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games().retrieve_by_release_date(start, end).await;
        finish(uow, outcome).await
    }

    pub async fn update(&self, game: &Game) -> Result<u64> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games().update(game).await;
        finish(uow, outcome).await
    }

    pub async fn delete(&self, id: GameId) -> Result<u64> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games().delete(Some(id)).await;
        finish(uow, outcome).await
    }

    pub async fn count(&self) -> Result<i64> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games().count().await;
        finish(uow, outcome).await
    }
}
