// Transaction port for atomic multi-table operations

use super::{CreditCardDao, GameDao, GamesPlayedDao, PlayerDao};
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
///
/// Both methods consume the handle, so a finished transaction cannot be
/// reused. Dropping a handle without calling either rolls it back and
/// returns the connection to its provider.
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// One open transaction on one exclusively owned connection
///
/// The DAO views borrow the connection for as long as they live; none of
/// them can begin, commit or roll back on their own.
pub trait UnitOfWork: Transaction {
    fn players(&mut self) -> Box<dyn PlayerDao + '_>;

    fn credit_cards(&mut self) -> Box<dyn CreditCardDao + '_>;

    fn games(&mut self) -> Box<dyn GameDao + '_>;

    fn games_played(&mut self) -> Box<dyn GamesPlayedDao + '_>;
}

/// Connection provider: yields a transaction-capable connection on demand
#[async_trait]
pub trait TransactionProvider: Send + Sync {
    /// Acquire a connection and begin a transaction on it
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>>;
}
