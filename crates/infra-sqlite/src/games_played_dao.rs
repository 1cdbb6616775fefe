// SQLite GamesPlayedDao Implementation

use crate::map_sqlx_error;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gamedb_core::domain::{GameId, GamesPlayed, GamesPlayedId, PlayerId};
use gamedb_core::error::Result;
use gamedb_core::port::guard::{ensure_unsaved, expect_count, require_key, require_reference};
use gamedb_core::port::GamesPlayedDao;
use sqlx::SqliteConnection;

const SELECT_COLUMNS: &str =
    "SELECT id, player_id, game_id, time_finished, score FROM gamesplayed";

/// GamesPlayedDao over a borrowed connection (usually an open transaction)
pub struct SqliteGamesPlayedDao<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteGamesPlayedDao<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    async fn fetch_where(&mut self, clause: &str, keys: &[i64]) -> Result<Vec<GamesPlayed>> {
        let sql = format!("{} WHERE {} ORDER BY time_finished ASC, id ASC", SELECT_COLUMNS, clause);
        let mut query = sqlx::query_as::<_, GamesPlayedRow>(&sql);
        for key in keys {
            query = query.bind(*key);
        }

        let rows = query
            .fetch_all(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(GamesPlayedRow::into_record).collect())
    }
}

#[async_trait]
impl GamesPlayedDao for SqliteGamesPlayedDao<'_> {
    async fn create(&mut self, mut record: GamesPlayed) -> Result<GamesPlayed> {
        ensure_unsaved(record.id, "GamesPlayed")?;
        let player_id = require_reference(record.player_id, "GamesPlayed", "player ID", "insert")?;
        let game_id = require_reference(record.game_id, "GamesPlayed", "game ID", "insert")?;

        let result = sqlx::query(
            "INSERT INTO gamesplayed (player_id, game_id, time_finished, score) VALUES (?, ?, ?, ?)",
        )
        .bind(player_id)
        .bind(game_id)
        .bind(record.time_finished)
        .bind(record.score)
        .execute(&mut *self.conn)
        .await
        .map_err(map_sqlx_error)?;

        record.id = Some(result.last_insert_rowid());
        Ok(record)
    }

    async fn retrieve(&mut self, id: Option<GamesPlayedId>) -> Result<Option<GamesPlayed>> {
        let id = require_key(id, "GamesPlayed", "retrieve")?;
        Ok(self.fetch_where("id = ?", &[id]).await?.into_iter().next())
    }

    async fn retrieve_by_player_and_game(
        &mut self,
        player_id: Option<PlayerId>,
        game_id: Option<GameId>,
    ) -> Result<Vec<GamesPlayed>> {
        let player_id = require_reference(player_id, "GamesPlayed", "player ID", "retrieve")?;
        let game_id = require_reference(game_id, "GamesPlayed", "game ID", "retrieve")?;
        self.fetch_where("player_id = ? AND game_id = ?", &[player_id, game_id])
            .await
    }

    async fn retrieve_by_player(
        &mut self,
        player_id: Option<PlayerId>,
    ) -> Result<Vec<GamesPlayed>> {
        let player_id = require_reference(player_id, "GamesPlayed", "player ID", "retrieve")?;
        self.fetch_where("player_id = ?", &[player_id]).await
    }

    async fn retrieve_by_game(&mut self, game_id: Option<GameId>) -> Result<Vec<GamesPlayed>> {
        let game_id = require_reference(game_id, "GamesPlayed", "game ID", "retrieve")?;
        self.fetch_where("game_id = ?", &[game_id]).await
    }

    async fn update(&mut self, record: &GamesPlayed) -> Result<u64> {
        let id = require_key(record.id, "GamesPlayed", "update")?;
        let player_id = require_reference(record.player_id, "GamesPlayed", "player ID", "update")?;
        let game_id = require_reference(record.game_id, "GamesPlayed", "game ID", "update")?;

        let result = sqlx::query(
            r#"
            UPDATE gamesplayed
            SET player_id = ?, game_id = ?, time_finished = ?, score = ?
            WHERE id = ?
            "#,
        )
        .bind(player_id)
        .bind(game_id)
        .bind(record.time_finished)
        .bind(record.score)
        .bind(id)
        .execute(&mut *self.conn)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn delete(&mut self, id: Option<GamesPlayedId>) -> Result<u64> {
        let id = require_key(id, "GamesPlayed", "delete")?;

        let result = sqlx::query("DELETE FROM gamesplayed WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn count(&mut self) -> Result<i64> {
        let count: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) FROM gamesplayed")
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        expect_count(count, "gamesplayed")
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct GamesPlayedRow {
    id: i64,
    player_id: i64,
    game_id: i64,
    time_finished: DateTime<Utc>,
    score: i32,
}

impl GamesPlayedRow {
    fn into_record(self) -> GamesPlayed {
        GamesPlayed {
            id: Some(self.id),
            player_id: Some(self.player_id),
            game_id: Some(self.game_id),
            time_finished: self.time_finished,
            score: self.score,
        }
    }
}
