//! In-memory TransactionProvider for service tests
//!
//! Each unit of work edits a private copy of the committed tables; commit
//! publishes the copy, rollback (or drop) discards it. Every DAO call,
//! begin, commit and rollback is journaled so tests can assert ordering,
//! and a storage fault can be injected on the n-th call of an operation.

use crate::domain::{
    CreditCard, CreditCardId, Game, GameId, GamesPlayed, GamesPlayedId, Player, PlayerId,
};
use crate::error::{AppError, Result};
use crate::port::guard::{ensure_unsaved, expect_count, require_key, require_reference};
use crate::port::{
    CreditCardDao, GameDao, GamesPlayedDao, PlayerDao, Transaction, TransactionProvider,
    UnitOfWork,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Begin,
    Call(&'static str),
    Commit,
    Rollback,
}

#[derive(Debug, Clone, Default)]
struct Tables {
    next_id: i64,
    players: BTreeMap<PlayerId, Player>,
    credit_cards: BTreeMap<CreditCardId, CreditCard>,
    games: BTreeMap<GameId, Game>,
    games_played: BTreeMap<GamesPlayedId, GamesPlayed>,
}

#[derive(Default)]
struct Shared {
    committed: Tables,
    events: Vec<Event>,
    calls: HashMap<&'static str, usize>,
    fault: Option<(&'static str, usize)>,
    fail_commit: bool,
    fail_rollback: bool,
}

#[derive(Clone, Default)]
pub struct FakeProvider {
    shared: Arc<Mutex<Shared>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `nth` (1-based) call of `op` with a storage error
    pub fn fail_on(&self, op: &'static str, nth: usize) {
        self.shared.lock().unwrap().fault = Some((op, nth));
    }

    pub fn fail_commit(&self) {
        self.shared.lock().unwrap().fail_commit = true;
    }

    pub fn fail_rollback(&self) {
        self.shared.lock().unwrap().fail_rollback = true;
    }

    pub fn events(&self) -> Vec<Event> {
        self.shared.lock().unwrap().events.clone()
    }

    /// DAO calls only, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Call(op) => Some(op),
                _ => None,
            })
            .collect()
    }

    pub fn clear_events(&self) {
        let mut shared = self.shared.lock().unwrap();
        shared.events.clear();
        shared.calls.clear();
    }

    pub fn committed_players(&self) -> Vec<Player> {
        let shared = self.shared.lock().unwrap();
        shared.committed.players.values().cloned().collect()
    }

    pub fn committed_credit_cards(&self) -> Vec<CreditCard> {
        let shared = self.shared.lock().unwrap();
        shared.committed.credit_cards.values().cloned().collect()
    }
}

#[async_trait]
impl TransactionProvider for FakeProvider {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>> {
        let mut shared = self.shared.lock().unwrap();
        shared.events.push(Event::Begin);
        Ok(Box::new(FakeUnitOfWork {
            working: shared.committed.clone(),
            shared: Arc::clone(&self.shared),
        }))
    }
}

struct FakeUnitOfWork {
    working: Tables,
    shared: Arc<Mutex<Shared>>,
}

impl FakeUnitOfWork {
    /// Journal a statement and apply any injected fault
    fn execute(&mut self, op: &'static str) -> Result<()> {
        let mut shared = self.shared.lock().unwrap();
        shared.events.push(Event::Call(op));
        let count = shared.calls.entry(op).or_insert(0);
        *count += 1;
        let count = *count;
        match shared.fault {
            Some((fault_op, nth)) if fault_op == op && nth == count => {
                Err(AppError::Storage(format!("injected fault on {}", op)))
            }
            _ => Ok(()),
        }
    }

    fn next_id(&mut self) -> i64 {
        self.working.next_id += 1;
        self.working.next_id
    }
}

#[async_trait]
impl Transaction for FakeUnitOfWork {
    async fn commit(self: Box<Self>) -> Result<()> {
        let mut shared = self.shared.lock().unwrap();
        if shared.fail_commit {
            return Err(AppError::Storage("injected commit failure".into()));
        }
        shared.events.push(Event::Commit);
        shared.committed = self.working.clone();
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        let mut shared = self.shared.lock().unwrap();
        shared.events.push(Event::Rollback);
        if shared.fail_rollback {
            return Err(AppError::Storage("injected rollback failure".into()));
        }
        Ok(())
    }
}

impl UnitOfWork for FakeUnitOfWork {
    fn players(&mut self) -> Box<dyn PlayerDao + '_> {
        Box::new(Players(self))
    }

    fn credit_cards(&mut self) -> Box<dyn CreditCardDao + '_> {
        Box::new(CreditCards(self))
    }

    fn games(&mut self) -> Box<dyn GameDao + '_> {
        Box::new(Games(self))
    }

    fn games_played(&mut self) -> Box<dyn GamesPlayedDao + '_> {
        Box::new(Plays(self))
    }
}

struct Players<'a>(&'a mut FakeUnitOfWork);
struct CreditCards<'a>(&'a mut FakeUnitOfWork);
struct Games<'a>(&'a mut FakeUnitOfWork);
struct Plays<'a>(&'a mut FakeUnitOfWork);

#[async_trait]
impl PlayerDao for Players<'_> {
    async fn create(&mut self, mut player: Player) -> Result<Player> {
        ensure_unsaved(player.id, "Player")?;
        self.0.execute("players.create")?;
        let id = self.0.next_id();
        player.id = Some(id);
        let mut row = player.clone();
        row.credit_cards.clear();
        self.0.working.players.insert(id, row);
        Ok(player)
    }

    async fn retrieve(&mut self, id: Option<PlayerId>) -> Result<Option<Player>> {
        let id = require_key(id, "Player", "retrieve")?;
        self.0.execute("players.retrieve")?;
        Ok(self.0.working.players.get(&id).cloned())
    }

    async fn retrieve_by_join_date(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Player>> {
        self.0.execute("players.retrieve_by_join_date")?;
        Ok(self
            .0
            .working
            .players
            .values()
            .filter(|p| p.join_date >= start && p.join_date <= end)
            .cloned()
            .collect())
    }

    async fn update(&mut self, player: &Player) -> Result<u64> {
        let id = require_key(player.id, "Player", "update")?;
        self.0.execute("players.update")?;
        match self.0.working.players.get_mut(&id) {
            Some(row) => {
                *row = Player {
                    credit_cards: Vec::new(),
                    ..player.clone()
                };
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&mut self, id: Option<PlayerId>) -> Result<u64> {
        let id = require_key(id, "Player", "delete")?;
        self.0.execute("players.delete")?;
        Ok(self.0.working.players.remove(&id).map_or(0, |_| 1))
    }

    async fn count(&mut self) -> Result<i64> {
        self.0.execute("players.count")?;
        expect_count(Some(self.0.working.players.len() as i64), "player")
    }
}

#[async_trait]
impl CreditCardDao for CreditCards<'_> {
    async fn create(
        &mut self,
        mut card: CreditCard,
        player_id: Option<PlayerId>,
    ) -> Result<CreditCard> {
        ensure_unsaved(card.id, "CreditCard")?;
        let owner = require_reference(player_id, "CreditCard", "player ID", "insert")?;
        self.0.execute("credit_cards.create")?;
        let id = self.0.next_id();
        card.id = Some(id);
        card.player_id = Some(owner);
        self.0.working.credit_cards.insert(id, card.clone());
        Ok(card)
    }

    async fn retrieve(&mut self, id: Option<CreditCardId>) -> Result<Option<CreditCard>> {
        let id = require_key(id, "CreditCard", "retrieve")?;
        self.0.execute("credit_cards.retrieve")?;
        Ok(self.0.working.credit_cards.get(&id).cloned())
    }

    async fn retrieve_for_player(
        &mut self,
        player_id: Option<PlayerId>,
    ) -> Result<Vec<CreditCard>> {
        let owner = require_reference(player_id, "CreditCard", "player ID", "retrieve")?;
        self.0.execute("credit_cards.retrieve_for_player")?;
        Ok(self
            .0
            .working
            .credit_cards
            .values()
            .filter(|c| c.player_id == Some(owner))
            .cloned()
            .collect())
    }

    async fn update(&mut self, card: &CreditCard) -> Result<u64> {
        let id = require_key(card.id, "CreditCard", "update")?;
        self.0.execute("credit_cards.update")?;
        match self.0.working.credit_cards.get_mut(&id) {
            Some(row) => {
                *row = card.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&mut self, id: Option<CreditCardId>) -> Result<u64> {
        let id = require_key(id, "CreditCard", "delete")?;
        self.0.execute("credit_cards.delete")?;
        Ok(self.0.working.credit_cards.remove(&id).map_or(0, |_| 1))
    }

    async fn delete_for_player(&mut self, player_id: Option<PlayerId>) -> Result<u64> {
        let owner = require_reference(player_id, "CreditCard", "player ID", "delete")?;
        self.0.execute("credit_cards.delete_for_player")?;
        let before = self.0.working.credit_cards.len();
        self.0
            .working
            .credit_cards
            .retain(|_, c| c.player_id != Some(owner));
        Ok((before - self.0.working.credit_cards.len()) as u64)
    }

    async fn count(&mut self) -> Result<i64> {
        self.0.execute("credit_cards.count")?;
        Ok(self.0.working.credit_cards.len() as i64)
    }
}

#[async_trait]
impl GameDao for Games<'_> {
    async fn create(&mut self, mut game: Game) -> Result<Game> {
        ensure_unsaved(game.id, "Game")?;
        self.0.execute("games.create")?;
        let id = self.0.next_id();
        game.id = Some(id);
        self.0.working.games.insert(id, game.clone());
        Ok(game)
    }

    async fn retrieve(&mut self, id: Option<GameId>) -> Result<Option<Game>> {
        let id = require_key(id, "Game", "retrieve")?;
        self.0.execute("games.retrieve")?;
        Ok(self.0.working.games.get(&id).cloned())
    }

    async fn retrieve_by_title(&mut self, pattern: &str) -> Result<Vec<Game>> {
        self.0.execute("games.retrieve_by_title")?;
        // Only the `%` wildcard is honoured here
        let needle = pattern.trim_matches('%').to_lowercase();
        Ok(self
            .0
            .working
            .games
            .values()
            .filter(|g| g.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn retrieve_by_release_date(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Game>> {
        self.0.execute("games.retrieve_by_release_date")?;
        Ok(self
            .0
            .working
            .games
            .values()
            .filter(|g| g.release_date >= start && g.release_date <= end)
            .cloned()
            .collect())
    }

    async fn update(&mut self, game: &Game) -> Result<u64> {
        let id = require_key(game.id, "Game", "update")?;
        self.0.execute("games.update")?;
        match self.0.working.games.get_mut(&id) {
            Some(row) => {
                *row = game.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&mut self, id: Option<GameId>) -> Result<u64> {
        let id = require_key(id, "Game", "delete")?;
        self.0.execute("games.delete")?;
        Ok(self.0.working.games.remove(&id).map_or(0, |_| 1))
    }

    async fn count(&mut self) -> Result<i64> {
        self.0.execute("games.count")?;
        Ok(self.0.working.games.len() as i64)
    }
}

#[async_trait]
impl GamesPlayedDao for Plays<'_> {
    async fn create(&mut self, mut record: GamesPlayed) -> Result<GamesPlayed> {
        ensure_unsaved(record.id, "GamesPlayed")?;
        require_reference(record.player_id, "GamesPlayed", "player ID", "insert")?;
        require_reference(record.game_id, "GamesPlayed", "game ID", "insert")?;
        self.0.execute("games_played.create")?;
        let id = self.0.next_id();
        record.id = Some(id);
        self.0.working.games_played.insert(id, record.clone());
        Ok(record)
    }

    async fn retrieve(&mut self, id: Option<GamesPlayedId>) -> Result<Option<GamesPlayed>> {
        let id = require_key(id, "GamesPlayed", "retrieve")?;
        self.0.execute("games_played.retrieve")?;
        Ok(self.0.working.games_played.get(&id).cloned())
    }

    async fn retrieve_by_player_and_game(
        &mut self,
        player_id: Option<PlayerId>,
        game_id: Option<GameId>,
    ) -> Result<Vec<GamesPlayed>> {
        let player_id = require_reference(player_id, "GamesPlayed", "player ID", "retrieve")?;
        let game_id = require_reference(game_id, "GamesPlayed", "game ID", "retrieve")?;
        self.0.execute("games_played.retrieve_by_player_and_game")?;
        Ok(self
            .0
            .working
            .games_played
            .values()
            .filter(|r| r.player_id == Some(player_id) && r.game_id == Some(game_id))
            .cloned()
            .collect())
    }

    async fn retrieve_by_player(
        &mut self,
        player_id: Option<PlayerId>,
    ) -> Result<Vec<GamesPlayed>> {
        let player_id = require_reference(player_id, "GamesPlayed", "player ID", "retrieve")?;
        self.0.execute("games_played.retrieve_by_player")?;
        Ok(self
            .0
            .working
            .games_played
            .values()
            .filter(|r| r.player_id == Some(player_id))
            .cloned()
            .collect())
    }

    async fn retrieve_by_game(&mut self, game_id: Option<GameId>) -> Result<Vec<GamesPlayed>> {
        let game_id = require_reference(game_id, "GamesPlayed", "game ID", "retrieve")?;
        self.0.execute("games_played.retrieve_by_game")?;
        Ok(self
            .0
            .working
            .games_played
            .values()
            .filter(|r| r.game_id == Some(game_id))
            .cloned()
            .collect())
    }

    async fn update(&mut self, record: &GamesPlayed) -> Result<u64> {
        let id = require_key(record.id, "GamesPlayed", "update")?;
        self.0.execute("games_played.update")?;
        match self.0.working.games_played.get_mut(&id) {
            Some(row) => {
                *row = record.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&mut self, id: Option<GamesPlayedId>) -> Result<u64> {
        let id = require_key(id, "GamesPlayed", "delete")?;
        self.0.execute("games_played.delete")?;
        Ok(self.0.working.games_played.remove(&id).map_or(0, |_| 1))
    }

    async fn count(&mut self) -> Result<i64> {
        self.0.execute("games_played.count")?;
        Ok(self.0.working.games_played.len() as i64)
    }
}
