//! Shared wiring for the end-to-end tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use gamedb_core::application::{GameService, GamesPlayedService, PlayerService};
use gamedb_core::domain::{CreditCard, Player};
use gamedb_core::port::TransactionProvider;
use gamedb_infra_sqlite::{create_pool, run_migrations, DatabaseConfig, SqliteTransactionProvider};
use sqlx::SqlitePool;

pub struct Store {
    pub pool: SqlitePool,
    pub players: PlayerService,
    pub games: GameService,
    pub played: GamesPlayedService,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        let provider: Arc<dyn TransactionProvider> =
            Arc::new(SqliteTransactionProvider::new(pool.clone()));
        Self {
            pool,
            players: PlayerService::new(provider.clone()),
            games: GameService::new(provider.clone()),
            played: GamesPlayedService::new(provider),
        }
    }

    /// Row count straight from SQLite, bypassing the services
    pub async fn rows(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }

    /// Make every credit card insert named FAULT abort inside SQLite
    pub async fn fail_card_inserts_named_fault(&self) {
        sqlx::query(
            "CREATE TRIGGER fault_on_card BEFORE INSERT ON creditcard \
             WHEN NEW.cc_name = 'FAULT' \
             BEGIN SELECT RAISE(ABORT, 'simulated storage fault'); END",
        )
        .execute(&self.pool)
        .await
        .unwrap();
    }

    /// Make every player delete abort inside SQLite
    pub async fn fail_player_deletes(&self) {
        sqlx::query(
            "CREATE TRIGGER fault_on_player_delete BEFORE DELETE ON player \
             BEGIN SELECT RAISE(ABORT, 'simulated storage fault'); END",
        )
        .execute(&self.pool)
        .await
        .unwrap();
    }
}

pub async fn memory_store() -> Store {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();
    Store::new(pool)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn card(name: &str) -> CreditCard {
    CreditCard::new(name, "4111111111111111", "12/28", 123)
}

pub fn player_with_cards(first: &str, cards: &[&str]) -> Player {
    cards.iter().fold(
        Player::new(
            first,
            "Player",
            format!("{}@example.com", first.to_lowercase()),
            date(2023, 5, 17),
        ),
        |player, name| player.with_credit_card(card(name)),
    )
}
