// Games Played Domain Model

use super::{GameId, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Play record ID (assigned by storage on insert)
pub type GamesPlayedId = i64;

/// One finished play of a game by a player
///
/// `player_id` and `game_id` are logical references only; nothing checks
/// that the rows they point at exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamesPlayed {
    pub id: Option<GamesPlayedId>,
    pub player_id: Option<PlayerId>,
    pub game_id: Option<GameId>,
    pub time_finished: DateTime<Utc>,
    pub score: i32,
}

impl GamesPlayed {
    pub fn new(
        player_id: PlayerId,
        game_id: GameId,
        time_finished: DateTime<Utc>,
        score: i32,
    ) -> Self {
        Self {
            id: None,
            player_id: Some(player_id),
            game_id: Some(game_id),
            time_finished,
            score,
        }
    }
}
