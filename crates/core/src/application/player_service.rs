// Player Service - Player + CreditCard aggregate in one unit of work

use super::unit_of_work::finish;
use crate::domain::{Player, PlayerId};
use crate::error::{AppError, Result};
use crate::port::{TransactionProvider, UnitOfWork};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

/// Player aggregate service
///
/// Every operation runs in exactly one unit of work: begin, the DAO calls in
/// order, then commit on success or rollback on the first error. Credit
/// cards are always written after, and removed before, their player row.
pub struct PlayerService {
    provider: Arc<dyn TransactionProvider>,
}

impl PlayerService {
    pub fn new(provider: Arc<dyn TransactionProvider>) -> Self {
        Self { provider }
    }

    /// Insert a player and all of its credit cards atomically
    ///
    /// # Errors
    /// - AppError::BusinessRule if the player carries no credit card (no connection is taken)
    /// - AppError::Precondition if the player or a card already has an ID
    pub async fn create(&self, player: Player) -> Result<Player> {
        ensure_has_credit_cards(&player)?;

        let mut uow = self.provider.begin().await?;
        let outcome = insert_aggregate(uow.as_mut(), player).await;
        let player = finish(uow, outcome).await?;

        info!(
            player_id = ?player.id,
            cards = player.credit_cards.len(),
            "Player created"
        );
        Ok(player)
    }

    /// Load a player with its credit cards
    ///
    /// Returns `None` both when no player row exists and when the row exists
    /// but owns no credit card: a player without cards is not a complete
    /// aggregate and is reported as not found.
    pub async fn retrieve(&self, id: PlayerId) -> Result<Option<Player>> {
        let mut uow = self.provider.begin().await?;
        let outcome = load_aggregate(uow.as_mut(), id).await;
        finish(uow, outcome).await
    }

    /// Players who joined within `[start, end]` (player rows only, no cards)
    pub async fn retrieve_by_join_date(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Player>> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.players().retrieve_by_join_date(start, end).await;
        finish(uow, outcome).await
    }

    /// Update the player row and replace its credit cards
    ///
    /// All cards currently owned by the player are deleted and every card in
    /// `player.credit_cards` is inserted as new (any ID it carries is
    /// cleared). Cards left out of the call are gone afterwards.
    ///
    /// Returns the affected player rows: 0 when the ID does not exist, in
    /// which case no card is inserted.
    ///
    /// # Errors
    /// - AppError::BusinessRule if the player carries no credit card
    /// - AppError::Precondition if the player has no ID
    pub async fn update(&self, player: Player) -> Result<u64> {
        ensure_has_credit_cards(&player)?;

        let mut uow = self.provider.begin().await?;
        let outcome = replace_aggregate(uow.as_mut(), player).await;
        finish(uow, outcome).await
    }

    /// Delete a player's credit cards, then the player row
    ///
    /// Returns the affected player rows.
    pub async fn delete(&self, id: PlayerId) -> Result<u64> {
        let mut uow = self.provider.begin().await?;
        let outcome = delete_aggregate(uow.as_mut(), id).await;
        let deleted = finish(uow, outcome).await?;

        info!(player_id = id, deleted, "Player deleted");
        Ok(deleted)
    }

    pub async fn count(&self) -> Result<i64> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.players().count().await;
        finish(uow, outcome).await
    }

    /// Credit card rows across all players
    pub async fn count_all_credit_cards(&self) -> Result<i64> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow.credit_cards().count().await;
        finish(uow, outcome).await
    }

    /// Number of credit cards currently owned by a player
    pub async fn count_credit_cards(&self, id: PlayerId) -> Result<usize> {
        let mut uow = self.provider.begin().await?;
        let outcome = uow
            .credit_cards()
            .retrieve_for_player(Some(id))
            .await
            .map(|cards| cards.len());
        finish(uow, outcome).await
    }
}

fn ensure_has_credit_cards(player: &Player) -> Result<()> {
    if player.credit_cards.is_empty() {
        return Err(AppError::BusinessRule(
            "Player must have at least one CreditCard".to_string(),
        ));
    }
    Ok(())
}

async fn insert_aggregate(uow: &mut dyn UnitOfWork, mut player: Player) -> Result<Player> {
    let cards = std::mem::take(&mut player.credit_cards);
    let mut player = uow.players().create(player).await?;
    debug!(player_id = ?player.id, "Player row inserted");

    for mut card in cards {
        card.player_id = player.id;
        let card = uow.credit_cards().create(card, player.id).await?;
        player.credit_cards.push(card);
    }

    Ok(player)
}

async fn load_aggregate(uow: &mut dyn UnitOfWork, id: PlayerId) -> Result<Option<Player>> {
    let Some(mut player) = uow.players().retrieve(Some(id)).await? else {
        return Ok(None);
    };

    let cards = uow.credit_cards().retrieve_for_player(Some(id)).await?;
    if cards.is_empty() {
        debug!(player_id = id, "Player has no credit cards, reporting not found");
        return Ok(None);
    }

    player.credit_cards = cards;
    Ok(Some(player))
}

async fn replace_aggregate(uow: &mut dyn UnitOfWork, mut player: Player) -> Result<u64> {
    let owner = player.id;
    let removed = uow.credit_cards().delete_for_player(owner).await?;
    let updated = uow.players().update(&player).await?;

    if updated == 0 {
        debug!(player_id = ?owner, "No player row updated, skipping card insert");
        return Ok(0);
    }

    let cards = std::mem::take(&mut player.credit_cards);
    let inserted = cards.len();
    for mut card in cards {
        card.id = None;
        card.player_id = owner;
        uow.credit_cards().create(card, owner).await?;
    }

    debug!(player_id = ?owner, removed, inserted, "Credit cards replaced");
    Ok(updated)
}

async fn delete_aggregate(uow: &mut dyn UnitOfWork, id: PlayerId) -> Result<u64> {
    let removed = uow.credit_cards().delete_for_player(Some(id)).await?;
    debug!(player_id = id, removed, "Credit cards deleted");
    uow.players().delete(Some(id)).await
}
