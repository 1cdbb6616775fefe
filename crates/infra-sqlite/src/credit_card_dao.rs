// SQLite CreditCardDao Implementation

use crate::map_sqlx_error;
use async_trait::async_trait;
use gamedb_core::domain::{CreditCard, CreditCardId, PlayerId};
use gamedb_core::error::Result;
use gamedb_core::port::guard::{ensure_unsaved, expect_count, require_key, require_reference};
use gamedb_core::port::CreditCardDao;
use sqlx::SqliteConnection;
use tracing::debug;

const SELECT_COLUMNS: &str =
    "SELECT id, player_id, cc_name, cc_number, exp_date, security_code FROM creditcard";

/// CreditCardDao over a borrowed connection (usually an open transaction)
pub struct SqliteCreditCardDao<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteCreditCardDao<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl CreditCardDao for SqliteCreditCardDao<'_> {
    async fn create(
        &mut self,
        mut card: CreditCard,
        player_id: Option<PlayerId>,
    ) -> Result<CreditCard> {
        ensure_unsaved(card.id, "CreditCard")?;
        let owner = require_reference(player_id, "CreditCard", "player ID", "insert")?;

        let result = sqlx::query(
            r#"
            INSERT INTO creditcard (player_id, cc_name, cc_number, exp_date, security_code)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(owner)
        .bind(&card.cc_name)
        .bind(&card.cc_number)
        .bind(&card.exp_date)
        .bind(card.security_code)
        .execute(&mut *self.conn)
        .await
        .map_err(map_sqlx_error)?;

        card.id = Some(result.last_insert_rowid());
        card.player_id = Some(owner);
        debug!(card_id = ?card.id, player_id = owner, "Inserted credit card");
        Ok(card)
    }

    async fn retrieve(&mut self, id: Option<CreditCardId>) -> Result<Option<CreditCard>> {
        let id = require_key(id, "CreditCard", "retrieve")?;

        let row = sqlx::query_as::<_, CreditCardRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(CreditCardRow::into_credit_card))
    }

    async fn retrieve_for_player(
        &mut self,
        player_id: Option<PlayerId>,
    ) -> Result<Vec<CreditCard>> {
        let owner = require_reference(player_id, "CreditCard", "player ID", "retrieve")?;

        let rows: Vec<CreditCardRow> =
            sqlx::query_as(&format!("{} WHERE player_id = ? ORDER BY id ASC", SELECT_COLUMNS))
                .bind(owner)
                .fetch_all(&mut *self.conn)
                .await
                .map_err(map_sqlx_error)?;

        Ok(rows
            .into_iter()
            .map(CreditCardRow::into_credit_card)
            .collect())
    }

    async fn update(&mut self, card: &CreditCard) -> Result<u64> {
        let id = require_key(card.id, "CreditCard", "update")?;
        let owner = require_reference(card.player_id, "CreditCard", "player ID", "update")?;

        let result = sqlx::query(
            r#"
            UPDATE creditcard
            SET player_id = ?, cc_name = ?, cc_number = ?, exp_date = ?, security_code = ?
            WHERE id = ?
            "#,
        )
        .bind(owner)
        .bind(&card.cc_name)
        .bind(&card.cc_number)
        .bind(&card.exp_date)
        .bind(card.security_code)
        .bind(id)
        .execute(&mut *self.conn)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn delete(&mut self, id: Option<CreditCardId>) -> Result<u64> {
        let id = require_key(id, "CreditCard", "delete")?;

        let result = sqlx::query("DELETE FROM creditcard WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn delete_for_player(&mut self, player_id: Option<PlayerId>) -> Result<u64> {
        let owner = require_reference(player_id, "CreditCard", "player ID", "delete")?;

        let result = sqlx::query("DELETE FROM creditcard WHERE player_id = ?")
            .bind(owner)
            .execute(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn count(&mut self) -> Result<i64> {
        let count: Option<i64> = sqlx::query_scalar("SELECT COUNT(*) FROM creditcard")
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(map_sqlx_error)?;

        expect_count(count, "creditcard")
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
struct CreditCardRow {
    id: i64,
    player_id: i64,
    cc_name: String,
    cc_number: String,
    exp_date: String,
    security_code: i32,
}

impl CreditCardRow {
    fn into_credit_card(self) -> CreditCard {
        CreditCard {
            id: Some(self.id),
            player_id: Some(self.player_id),
            cc_name: self.cc_name,
            cc_number: self.cc_number,
            exp_date: self.exp_date,
            security_code: self.security_code,
        }
    }
}
