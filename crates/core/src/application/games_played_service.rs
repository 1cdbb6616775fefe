// Games Played Service - play records under the unit of work contract

use super::unit_of_work::finish;
use crate::domain::{GameId, GamesPlayed, GamesPlayedId, PlayerId};
use crate::error::Result;
use crate::port::TransactionProvider;
use std::sync::Arc;

/// Play record service
///
/// Player and game IDs are stored as given; whether they reference existing
/// rows is not checked here.
pub struct GamesPlayedService {
    provider: Arc<dyn TransactionProvider>,
}

impl GamesPlayedService {
    pub fn new(provider: Arc<dyn TransactionProvider>) -> Self {
        Self { provider }
    }

    pub async fn create(&self, record: GamesPlayed) -> Result<GamesPlayed> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games_played().create(record).await;
        finish(uow, outcome).await
    }

    pub async fn retrieve(&self, id: GamesPlayedId) -> Result<Option<GamesPlayed>> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games_played().retrieve(Some(id)).await;
        finish(uow, outcome).await
    }

    pub async fn retrieve_by_player_and_game(
        &self,
        player_id: PlayerId,
        game_id: GameId,
    ) -> Result<Vec<GamesPlayed>> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow
            .games_played()
            .retrieve_by_player_and_game(Some(player_id), Some(game_id))
            .await;
        finish(uow, outcome).await
    }

    pub async fn retrieve_by_player(&self, player_id: PlayerId) -> Result<Vec<GamesPlayed>> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games_played().retrieve_by_player(Some(player_id)).await;
        finish(uow, outcome).await
    }

    pub async fn retrieve_by_game(&self, game_id: GameId) -> Result<Vec<GamesPlayed>> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games_played().retrieve_by_game(Some(game_id)).await;
        finish(uow, outcome).await
    }

    pub async fn update(&self, record: &GamesPlayed) -> Result<u64> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games_played().update(record).await;
        finish(uow, outcome).await
    }

    pub async fn delete(&self, id: GamesPlayedId) -> Result<u64> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games_played().delete(Some(id)).await;
        finish(uow, outcome).await
    }

    pub async fn count(&self) -> Result<i64> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.games_played().count().await;
        finish(uow, outcome).await
    }
}
