// Domain Layer - Plain records persisted by the data-access ports

pub mod credit_card;
pub mod game;
pub mod games_played;
pub mod player;

// Re-exports
pub use credit_card::{CreditCard, CreditCardId};
pub use game::{Game, GameId};
pub use games_played::{GamesPlayed, GamesPlayedId};
pub use player::{Player, PlayerId};
