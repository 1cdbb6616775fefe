// SQLite Transaction Implementation

use crate::{
    map_sqlx_error, SqliteCreditCardDao, SqliteGameDao, SqliteGamesPlayedDao, SqlitePlayerDao,
};
use async_trait::async_trait;
use gamedb_core::error::Result;
use gamedb_core::port::{
    CreditCardDao, GameDao, GamesPlayedDao, PlayerDao, Transaction, TransactionProvider,
    UnitOfWork,
};
use sqlx::{Sqlite, SqlitePool, Transaction as SqlxTransaction};
use tracing::debug;

/// One pooled connection with an open transaction on it
///
/// Dropping this without commit rolls back and returns the connection to
/// the pool in autocommit mode.
pub struct SqliteUnitOfWork {
    tx: SqlxTransaction<'static, Sqlite>,
}

impl SqliteUnitOfWork {
    pub fn new(tx: SqlxTransaction<'static, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)
    }
}

impl UnitOfWork for SqliteUnitOfWork {
    fn players(&mut self) -> Box<dyn PlayerDao + '_> {
        Box::new(SqlitePlayerDao::new(&mut *self.tx))
    }

    fn credit_cards(&mut self) -> Box<dyn CreditCardDao + '_> {
        Box::new(SqliteCreditCardDao::new(&mut *self.tx))
    }

    fn games(&mut self) -> Box<dyn GameDao + '_> {
        Box::new(SqliteGameDao::new(&mut *self.tx))
    }

    fn games_played(&mut self) -> Box<dyn GamesPlayedDao + '_> {
        Box::new(SqliteGamesPlayedDao::new(&mut *self.tx))
    }
}

/// Hands out SQLite units of work backed by a connection pool
#[derive(Clone)]
pub struct SqliteTransactionProvider {
    pool: SqlitePool,
}

impl SqliteTransactionProvider {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TransactionProvider for SqliteTransactionProvider {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        debug!("Transaction started");
        Ok(Box::new(SqliteUnitOfWork::new(tx)))
    }
}
