//! Overlay configuration
//!
//! Loaded from environment variables. `main` loads a `.env` file first, so
//! every value can also come from there.

use std::env;
use std::path::PathBuf;

use questlens_domain::{GameClassId, SupportedGames};

use super::process_watch::{GameCatalog, GameDefinition, MAX_POLL_MS, MIN_POLL_MS};
use crate::ports::outbound::storage_keys;

pub const ENV_SUPABASE_URL: &str = "QUESTLENS_SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "QUESTLENS_SUPABASE_ANON_KEY";
pub const ENV_VERSION_KEY: &str = "QUESTLENS_VERSION_KEY";
pub const ENV_GAMES: &str = "QUESTLENS_GAMES";
pub const ENV_SUPPORTED_GAMES: &str = "QUESTLENS_SUPPORTED_GAMES";
pub const ENV_POLL_MS: &str = "QUESTLENS_POLL_MS";
pub const ENV_STORAGE_PATH: &str = "QUESTLENS_STORAGE_PATH";

pub const DEFAULT_POLL_MS: u64 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} is invalid: {message}")]
    Invalid { var: &'static str, message: String },
}

impl ConfigError {
    fn invalid(var: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            message: message.into(),
        }
    }
}

/// Overlay configuration loaded from environment
#[derive(Debug, Clone)]
pub struct OverlayConfig {
    /// Supabase project URL
    pub supabase_url: String,
    /// Public anon key sent with every request
    pub supabase_anon_key: String,
    /// `app_metadata` key holding the dataset version
    pub version_key: String,
    /// Executables that identify each game
    pub games: GameCatalog,
    /// Games the overlay shows for
    pub supported_games: SupportedGames,
    /// Process scan interval, already clamped
    pub poll_ms: u64,
    /// Storage file override
    pub storage_path: Option<PathBuf>,
}

impl OverlayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let games = match var(ENV_GAMES) {
            Some(raw) => parse_games(&raw)?,
            None => GameCatalog::default(),
        };

        let supported_games = match var(ENV_SUPPORTED_GAMES) {
            Some(raw) => SupportedGames::new(parse_class_ids(ENV_SUPPORTED_GAMES, &raw)?),
            None => SupportedGames::new(games.class_ids()),
        };

        let poll_ms = match var(ENV_POLL_MS) {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| ConfigError::invalid(ENV_POLL_MS, e.to_string()))?,
            None => DEFAULT_POLL_MS,
        }
        .clamp(MIN_POLL_MS, MAX_POLL_MS);

        Ok(Self {
            supabase_url: var(ENV_SUPABASE_URL).ok_or(ConfigError::Missing(ENV_SUPABASE_URL))?,
            supabase_anon_key: var(ENV_SUPABASE_ANON_KEY)
                .ok_or(ConfigError::Missing(ENV_SUPABASE_ANON_KEY))?,
            version_key: var(ENV_VERSION_KEY)
                .unwrap_or_else(|| storage_keys::DATA_VERSION.to_string()),
            games,
            supported_games,
            poll_ms,
            storage_path: var(ENV_STORAGE_PATH).map(PathBuf::from),
        })
    }
}

/// `<classId>=<exe>|<exe>;<classId>=<exe>`
fn parse_games(raw: &str) -> Result<GameCatalog, ConfigError> {
    let mut games = Vec::new();
    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let (id, executables) = entry
            .split_once('=')
            .ok_or_else(|| ConfigError::invalid(ENV_GAMES, format!("expected id=exe, got {entry}")))?;

        let class_id: GameClassId = id
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid(ENV_GAMES, format!("bad class id {id}")))?;

        let definition = GameDefinition::new(class_id, executables.split('|'));
        if definition.executables.is_empty() {
            return Err(ConfigError::invalid(
                ENV_GAMES,
                format!("no executables for {class_id}"),
            ));
        }
        games.push(definition);
    }
    Ok(GameCatalog::new(games))
}

fn parse_class_ids(var: &'static str, raw: &str) -> Result<Vec<GameClassId>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<GameClassId>()
                .map_err(|_| ConfigError::invalid(var, format!("bad class id {id}")))
        })
        .collect()
}
