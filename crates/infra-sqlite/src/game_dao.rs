// SQLite GameDao Implementation

use crate::map_sqlx_error;
use async_trait::async_trait;
use chrono::NaiveDate;
use gamedb_core::domain::{Game, GameId};
use gamedb_core::error::Result;
use gamedb_core::port::guard::{ensure_unsaved, expect_count, require_key};
use gamedb_core::port::GameDao;
use sqlx::SqliteConnection;

const SELECT_COLUMNS: &str = "SELECT id, title, description, release_date, version FROM game";

/// GameDao over a borrowed connection (usually an open transaction)
pub struct SqliteGameDao<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteGameDao<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl GameDao for SqliteGameDao<'_> {
    async fn create(&mut self, mut game: Game) -> Result<Game> {
        ensure_unsaved(game.id, "Game")?;

        let result = sqlx::query(
            "INSERT INTO game (title, description, release_date, version) VALUES (?, ?, ?, ?)",
        )
        .bind(&game.title)
        .bind(&game.description)
        .bind(game.release_date)
        .bind(&game.version)
        .execute(&mut *self.conn)
        .await
        .map_err(map_sqlx_error)?;

        game.id = Some(result.last_insert_rowid());
        Ok(game)
    }

    async fn retrieve(&mut self, id: Option<GameId>) -> Result<Option<Game>> {
        let id = require_key(id, "Game", "retrieve")?;

        let row = sqlx::query_as::<_, GameRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(GameRow::into_game))
    }

    async fn retrieve_by_title(&mut self, pattern: &str) -> Result<Vec<Game>> {
        let rows: Vec<GameRow> =
            sqlx::query_as(&format!("{} WHERE title LIKE ? ORDER BY title ASC", SELECT_COLUMNS))
                .bind(pattern)
                .fetch_all(&mut *self.conn)
                .await
                .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(GameRow::into_game).collect())
    }

    async fn retrieve_by_release_date(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Game>> {
        let rows: Vec<GameRow> = sqlx::query_as(&format!(
            "{} WHERE release_date BETWEEN ? AND ? ORDER BY release_date ASC, id ASC",
            SELECT_COLUMNS
        ))
        .bind(start)
        .bind(end)
        .fetch_all(&mut *self.conn)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(GameRow::into_game).collect())
    }

    async fn update(&mut self, game: &Game) -> Result<u64> {
        let id = require_key(game.id, "Game", "update")?;

        let result = sqlx::query(
            r#"
            UPDATE game
            SET title = ?, description = ?, release_date = ?, version = ?
            WHERE id = ?
            "#,
        )
        .bind(&game.title)
        .bind(&game.description)
        .bind(game.release_date)
        .bind(&game.version)
        .bind(id)
        .execute(&mut *self.conn)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn delete(&mut self, id: Option<GameId>) -> Result<u64> {
        let id = require_key(id, "Game", "delete")?;

        let result = sqlx::query("DELETE FROM game WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn count(&mut self) -> Result<i64> {
        let count: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) FROM game")
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        expect_count(count, "game")
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct GameRow {
    id: i64,
    title: String,
    description: String,
    release_date: NaiveDate,
    version: String,
}

impl GameRow {
    fn into_game(self) -> Game {
        Game {
            id: Some(self.id),
            title: self.title,
            description: self.description,
            release_date: self.release_date,
            version: self.version,
        }
    }
}
