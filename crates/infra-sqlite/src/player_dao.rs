// SQLite PlayerDao Implementation

use crate::map_sqlx_error;
use async_trait::async_trait;
use chrono::NaiveDate;
use gamedb_core::domain::{Player, PlayerId};
use gamedb_core::error::Result;
use gamedb_core::port::guard::{ensure_unsaved, expect_count, require_key};
use gamedb_core::port::PlayerDao;
use sqlx::SqliteConnection;
use tracing::debug;

const SELECT_COLUMNS: &str = "SELECT id, first_name, last_name, email, join_date FROM player";

/// PlayerDao over a borrowed connection (usually an open transaction)
pub struct SqlitePlayerDao<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqlitePlayerDao<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl PlayerDao for SqlitePlayerDao<'_> {
    async fn create(&mut self, mut player: Player) -> Result<Player> {
        ensure_unsaved(player.id, "Player")?;

        let result = sqlx::query(
            "INSERT INTO player (first_name, last_name, email, join_date) VALUES (?, ?, ?, ?)",
        )
        .bind(&player.first_name)
        .bind(&player.last_name)
        .bind(&player.email)
        .bind(player.join_date)
        .execute(&mut *self.conn)
        .await
        .map_err(map_sqlx_error)?;

        // Copy the generated key onto the entity
        player.id = Some(result.last_insert_rowid());
        debug!(player_id = ?player.id, "Inserted player");
        Ok(player)
    }

    async fn retrieve(&mut self, id: Option<PlayerId>) -> Result<Option<Player>> {
        let id = require_key(id, "Player", "retrieve")?;

        let row = sqlx::query_as::<_, PlayerRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PlayerRow::into_player))
    }

    async fn retrieve_by_join_date(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Player>> {
        let rows: Vec<PlayerRow> = sqlx::query_as(&format!(
            "{} WHERE join_date BETWEEN ? AND ? ORDER BY join_date ASC, id ASC",
            SELECT_COLUMNS
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PlayerRow::into_player).collect())
    }

    async fn update(&mut self, player: &Player) -> Result<u64> {
        let id = require_key(player.id, "Player", "update")?;

        let result = sqlx::query(
            r#"
            UPDATE player
            SET first_name = ?, last_name = ?, email = ?, join_date = ?
            WHERE id = ?
            "#,
        )
        .bind(&player.first_name)
        .bind(&player.last_name)
        .bind(&player.email)
        .bind(player.join_date)
        .bind(id)
        .execute(&mut *self.conn)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn delete(&mut self, id: Option<PlayerId>) -> Result<u64> {
        let id = require_key(id, "Player", "delete")?;

        let result = sqlx::query("DELETE FROM player WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn count(&mut self) -> Result<i64> {
        let count: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) FROM player")
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        expect_count(count, "player")
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct PlayerRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    join_date: NaiveDate,
}

impl PlayerRow {
    fn into_player(self) -> Player {
        Player {
            id: Some(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            join_date: self.join_date,
            credit_cards: Vec::new(),
        }
    }
}
