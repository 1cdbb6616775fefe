// Port Layer - Interfaces for storage

pub mod credit_card_dao;
pub mod game_dao;
pub mod games_played_dao;
pub mod guard;
pub mod player_dao;
pub mod transaction;

// Re-exports
pub use credit_card_dao::CreditCardDao;
pub use game_dao::GameDao;
pub use games_played_dao::GamesPlayedDao;
pub use player_dao::PlayerDao;
pub use transaction::{Transaction, TransactionProvider, UnitOfWork};
