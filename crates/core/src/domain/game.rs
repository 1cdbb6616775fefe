// Game Domain Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Game ID (assigned by storage on insert)
pub type GameId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: Option<GameId>,
    pub title: String,
    pub description: String,
    pub release_date: NaiveDate,
    pub version: String,
}

impl Game {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        release_date: NaiveDate,
        version: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            release_date,
            version: version.into(),
        }
    }
}
