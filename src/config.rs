//! Server configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::db::Database;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// What the update handler does with a note's creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CreatedAtPolicy {
    /// Keep the time the note was first created.
    #[default]
    Preserve,
    /// Stamp the current time on every update.
    Restamp,
}

impl FromStr for CreatedAtPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "restamp" => Ok(Self::Restamp),
            other => Err(anyhow::anyhow!(
                "Unknown created-at policy '{}', expected 'preserve' or 'restamp'",
                other
            )),
        }
    }
}

/// Where the note database lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// `keepnote.db` in the platform data directory.
    #[default]
    Default,
    File(PathBuf),
    /// Throwaway in-memory database, lost on shutdown.
    Memory,
}

impl DatabaseLocation {
    /// Open the database and apply pending migrations.
    pub fn open(&self) -> Result<Database> {
        let db = match self {
            Self::Default => Database::open_default()?,
            Self::File(path) => Database::open(path.clone())?,
            Self::Memory => Database::open_memory()?,
        };
        db.migrate()?;
        Ok(db)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind (from KEEPNOTE_HOST)
    pub host: String,
    /// Port to bind (from KEEPNOTE_PORT)
    pub port: u16,
    /// Database file (from KEEPNOTE_DB_PATH)
    pub database: DatabaseLocation,
    /// Creation-time handling on update (from KEEPNOTE_CREATED_AT_POLICY)
    pub created_at_policy: CreatedAtPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DatabaseLocation::Default,
            created_at_policy: CreatedAtPolicy::Preserve,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables. Unset variables take
    /// their defaults; malformed ones are an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("KEEPNOTE_HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("KEEPNOTE_PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid KEEPNOTE_PORT '{}'", port))?;
        }

        if let Some(path) = lookup("KEEPNOTE_DB_PATH") {
            config.database = if path == ":memory:" {
                DatabaseLocation::Memory
            } else {
                DatabaseLocation::File(PathBuf::from(path))
            };
        }

        if let Some(policy) = lookup("KEEPNOTE_CREATED_AT_POLICY") {
            config.created_at_policy = policy.parse()?;
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
