// GameDB Infrastructure - SQLite Adapter
// Implements: TransactionProvider, UnitOfWork and the four entity DAOs

mod connection;
mod credit_card_dao;
mod error;
mod game_dao;
mod games_played_dao;
mod migration;
mod player_dao;
mod transaction;


pub use connection::{create_pool, DatabaseConfig};
pub use credit_card_dao::SqliteCreditCardDao;
pub use error::map_sqlx_error;
pub use game_dao::SqliteGameDao;
pub use games_played_dao::SqliteGamesPlayedDao;
pub use migration::run_migrations;
pub use player_dao::SqlitePlayerDao;
pub use transaction::{SqliteTransactionProvider, SqliteUnitOfWork};

// Note: sqlx::Error conversion goes through map_sqlx_error
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
