// Application Layer - Transaction-coordinating services

pub mod game_service;
pub mod games_played_service;
pub mod player_service;
pub mod unit_of_work;

#[cfg(test)]
mod fake_store;

// Re-exports
pub use game_service::GameService;
pub use games_played_service::GamesPlayedService;
pub use player_service::PlayerService;
pub use unit_of_work::finish;
