//! GameDB CLI - Command-line front end for players, games and play records

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use gamedb_core::application::{GameService, GamesPlayedService, PlayerService};
use gamedb_core::domain::{CreditCard, Game, GamesPlayed, Player};
use gamedb_core::port::TransactionProvider;
use gamedb_infra_sqlite::{create_pool, run_migrations, DatabaseConfig, SqliteTransactionProvider};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tabled::{Table, Tabled};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "gamedb=info";

#[derive(Parser)]
#[command(name = "gamedb")]
#[command(about = "GameDB player and game store", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database URL (overrides GAMEDB_DB_URL)
    #[arg(long)]
    db_url: Option<String>,

    /// Maximum pooled connections (overrides GAMEDB_DB_MAX_CONNECTIONS)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_connections: Option<u32>,

    /// SQLite busy timeout in seconds (overrides GAMEDB_DB_BUSY_TIMEOUT_SECS)
    #[arg(long)]
    busy_timeout_secs: Option<u64>,

    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,
}

impl Cli {
    /// Environment settings with any command-line flags applied on top
    fn database_config(&self) -> Result<DatabaseConfig> {
        let base = DatabaseConfig::from_env().context("Invalid database settings")?;
        Ok(self.apply_overrides(base))
    }

    fn apply_overrides(&self, mut config: DatabaseConfig) -> DatabaseConfig {
        if let Some(url) = &self.db_url {
            config.url = url.clone();
        }
        if let Some(max_connections) = self.max_connections {
            config.max_connections = max_connections;
        }
        if let Some(secs) = self.busy_timeout_secs {
            config.busy_timeout = Duration::from_secs(secs);
        }
        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create the schema if it does not exist yet
    Init,

    /// Show row counts for every table
    Stats,

    /// Manage players and their credit cards
    #[command(subcommand)]
    Player(PlayerCommand),

    /// Manage the game catalogue
    #[command(subcommand)]
    Game(GameCommand),

    /// Record and list finished games
    #[command(subcommand)]
    Played(PlayedCommand),
}

#[derive(Subcommand)]
enum PlayerCommand {
    /// Add a player together with at least one credit card
    Add {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        /// Join date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        join_date: Option<NaiveDate>,

        /// Credit card as NAME,NUMBER,EXPIRY,CODE (repeatable)
        #[arg(long = "card", value_parser = parse_card, required = true)]
        cards: Vec<CreditCard>,
    },

    /// Show a player with their credit cards
    Show { id: i64 },

    /// Delete a player and all of their credit cards
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum GameCommand {
    /// Add a game
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Release date (YYYY-MM-DD)
        #[arg(long)]
        release_date: NaiveDate,

        #[arg(long, default_value = "1.0")]
        version: String,
    },

    /// Find games whose title matches a LIKE pattern (e.g. "%Quest%")
    Find { pattern: String },
}

#[derive(Subcommand)]
enum PlayedCommand {
    /// Record a finished game for a player
    Record {
        #[arg(long)]
        player: i64,

        #[arg(long)]
        game: i64,

        #[arg(long)]
        score: i32,

        /// Finish time (RFC 3339), defaults to now
        #[arg(long)]
        finished_at: Option<DateTime<Utc>>,
    },

    /// List play records for a player, optionally narrowed to one game
    List {
        #[arg(long)]
        player: i64,

        #[arg(long)]
        game: Option<i64>,
    },
}

/// Parse `NAME,NUMBER,EXPIRY,CODE` into an unsaved card
fn parse_card(raw: &str) -> std::result::Result<CreditCard, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [name, number, expiry, code] => {
            let code: i32 = code
                .parse()
                .map_err(|_| format!("security code is not a number: {}", code))?;
            Ok(CreditCard::new(*name, *number, *expiry, code))
        }
        _ => Err(format!(
            "expected NAME,NUMBER,EXPIRY,CODE but got {} field(s)",
            parts.len()
        )),
    }
}

#[derive(Tabled)]
struct PlayerRow {
    id: String,
    name: String,
    email: String,
    joined: NaiveDate,
    cards: usize,
}

impl From<&Player> for PlayerRow {
    fn from(player: &Player) -> Self {
        Self {
            id: display_id(player.id),
            name: format!("{} {}", player.first_name, player.last_name),
            email: player.email.clone(),
            joined: player.join_date,
            cards: player.credit_cards.len(),
        }
    }
}

#[derive(Tabled)]
struct CardRow {
    id: String,
    name: String,
    number: String,
    expires: String,
}

impl From<&CreditCard> for CardRow {
    fn from(card: &CreditCard) -> Self {
        Self {
            id: display_id(card.id),
            name: card.cc_name.clone(),
            number: mask_number(&card.cc_number),
            expires: card.exp_date.clone(),
        }
    }
}

#[derive(Tabled)]
struct GameRow {
    id: String,
    title: String,
    released: NaiveDate,
    version: String,
}

impl From<&Game> for GameRow {
    fn from(game: &Game) -> Self {
        Self {
            id: display_id(game.id),
            title: game.title.clone(),
            released: game.release_date,
            version: game.version.clone(),
        }
    }
}

#[derive(Tabled)]
struct PlayedRow {
    id: String,
    player: String,
    game: String,
    finished: String,
    score: i32,
}

impl From<&GamesPlayed> for PlayedRow {
    fn from(record: &GamesPlayed) -> Self {
        Self {
            id: display_id(record.id),
            player: display_id(record.player_id),
            game: display_id(record.game_id),
            finished: record.time_finished.format("%Y-%m-%d %H:%M:%S").to_string(),
            score: record.score,
        }
    }
}

/// JSON view of a player: card numbers masked, security codes left out
#[derive(Serialize)]
struct PlayerJson {
    id: Option<i64>,
    first_name: String,
    last_name: String,
    email: String,
    join_date: NaiveDate,
    credit_cards: Vec<CardJson>,
}

#[derive(Serialize)]
struct CardJson {
    id: Option<i64>,
    player_id: Option<i64>,
    cc_name: String,
    cc_number: String,
    exp_date: String,
}

impl From<&Player> for PlayerJson {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            first_name: player.first_name.clone(),
            last_name: player.last_name.clone(),
            email: player.email.clone(),
            join_date: player.join_date,
            credit_cards: player.credit_cards.iter().map(CardJson::from).collect(),
        }
    }
}

impl From<&CreditCard> for CardJson {
    fn from(card: &CreditCard) -> Self {
        Self {
            id: card.id,
            player_id: card.player_id,
            cc_name: card.cc_name.clone(),
            cc_number: mask_number(&card.cc_number),
            exp_date: card.exp_date.clone(),
        }
    }
}

#[derive(Serialize, Tabled)]
struct StatsRow {
    table: &'static str,
    rows: i64,
}

fn display_id(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Keep only the last four digits visible
fn mask_number(number: &str) -> String {
    let visible: String = number
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", visible)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn init_logging() -> Result<()> {
    let log_format = std::env::var("GAMEDB_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("Failed to create env filter")?;

    // Logs go to stderr so tables and JSON on stdout stay clean
    match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let config = cli.database_config()?;

    let pool = create_pool(&config)
        .await
        .with_context(|| format!("Failed to open {}", config.url))?;

    // Every command can run against a fresh file
    run_migrations(&pool).await.context("Schema setup failed")?;
    info!(url = %config.url, "Database ready");

    let provider: Arc<dyn TransactionProvider> = Arc::new(SqliteTransactionProvider::new(pool));
    let players = PlayerService::new(provider.clone());
    let games = GameService::new(provider.clone());
    let played = GamesPlayedService::new(provider);

    match cli.command {
        Commands::Init => {
            println!("{}", format!("✓ Schema ready at {}", config.url).green().bold());
        }

        Commands::Stats => {
            let stats = vec![
                StatsRow {
                    table: "player",
                    rows: players.count().await?,
                },
                StatsRow {
                    table: "creditcard",
                    rows: players.count_all_credit_cards().await?,
                },
                StatsRow {
                    table: "game",
                    rows: games.count().await?,
                },
                StatsRow {
                    table: "gamesplayed",
                    rows: played.count().await?,
                },
            ];

            if cli.json {
                print_json(&stats)?;
            } else {
                println!("{}", "GameDB Statistics".cyan().bold());
                println!();
                println!("{}", Table::new(stats));
            }
        }

        Commands::Player(PlayerCommand::Add {
            first_name,
            last_name,
            email,
            join_date,
            cards,
        }) => {
            let join_date = join_date.unwrap_or_else(|| Utc::now().date_naive());
            let player = cards.into_iter().fold(
                Player::new(first_name, last_name, email, join_date),
                Player::with_credit_card,
            );

            let saved = players.create(player).await?;

            if cli.json {
                print_json(&PlayerJson::from(&saved))?;
            } else {
                println!("{}", "✓ Player added".green().bold());
                println!();
                println!("{}", Table::new([PlayerRow::from(&saved)]));
            }
        }

        Commands::Player(PlayerCommand::Show { id }) => match players.retrieve(id).await? {
            Some(player) if cli.json => print_json(&PlayerJson::from(&player))?,
            Some(player) => {
                println!("{}", Table::new([PlayerRow::from(&player)]));
                println!();
                println!("{}", "Credit cards".cyan().bold());
                println!(
                    "{}",
                    Table::new(player.credit_cards.iter().map(CardRow::from))
                );
            }
            None => println!("{}", format!("Player {} not found", id).yellow()),
        },

        Commands::Player(PlayerCommand::Delete { id }) => {
            let deleted = players.delete(id).await?;
            if deleted == 0 {
                println!("{}", format!("Player {} not found", id).yellow());
            } else {
                println!("{}", format!("✓ Player {} deleted", id).green().bold());
            }
        }

        Commands::Game(GameCommand::Add {
            title,
            description,
            release_date,
            version,
        }) => {
            let saved = games
                .create(Game::new(title, description, release_date, version))
                .await?;

            if cli.json {
                print_json(&saved)?;
            } else {
                println!("{}", "✓ Game added".green().bold());
                println!();
                println!("{}", Table::new([GameRow::from(&saved)]));
            }
        }

        Commands::Game(GameCommand::Find { pattern }) => {
            let found = games.retrieve_by_title(&pattern).await?;

            if cli.json {
                print_json(&found)?;
            } else if found.is_empty() {
                println!("{}", format!("No games match {}", pattern).yellow());
            } else {
                println!("{}", Table::new(found.iter().map(GameRow::from)));
            }
        }

        Commands::Played(PlayedCommand::Record {
            player,
            game,
            score,
            finished_at,
        }) => {
            let finished_at = finished_at.unwrap_or_else(Utc::now);
            let saved = played
                .create(GamesPlayed::new(player, game, finished_at, score))
                .await?;

            if cli.json {
                print_json(&saved)?;
            } else {
                println!("{}", "✓ Game recorded".green().bold());
                println!();
                println!("{}", Table::new([PlayedRow::from(&saved)]));
            }
        }

        Commands::Played(PlayedCommand::List { player, game }) => {
            let records = match game {
                Some(game) => played.retrieve_by_player_and_game(player, game).await?,
                None => played.retrieve_by_player(player).await?,
            };

            if cli.json {
                print_json(&records)?;
            } else if records.is_empty() {
                println!("{}", "No games recorded".yellow());
            } else {
                println!("{}", Table::new(records.iter().map(PlayedRow::from)));
            }
        }
    }

    Ok(())
}
