//! Roster CLI configuration
//!
//! Sources, highest priority first:
//! 1. Command-line flags (with `ROSTER_DATABASE_URL` / `ROSTER_BIND` fallbacks)
//! 2. `.env` in the current directory, then `~/.roster/.env`
//! 3. `~/.roster/config.toml`
//! 4. Built-in defaults

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use roster_server::http::ServerConfig;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://roster.db";

const DATABASE_URL_VAR: &str = "ROSTER_DATABASE_URL";
const BIND_VAR: &str = "ROSTER_BIND";

/// Settings read from `~/.roster/config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RosterConfig {
    pub database_url: Option<String>,
    pub bind: Option<SocketAddr>,
    pub cors_permissive: Option<bool>,
}

impl RosterConfig {
    /// Load the config file, or defaults when it does not exist
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No home directory, using default configuration");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// `~/.roster/config.toml`
    pub fn config_path() -> Option<PathBuf> {
        config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Resolve the database URL: flag or env, then file, then default
    pub fn database_url(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.database_url.clone())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
    }

    /// Resolve the bind address: flag or env, then file, then default
    pub fn bind_addr(&self, flag: Option<SocketAddr>) -> SocketAddr {
        flag.or(self.bind)
            .unwrap_or_else(|| ServerConfig::default().bind_addr)
    }
}

/// `~/.roster`
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".roster"))
}

/// Load `.env` files from the current directory and `~/.roster`.
///
/// Runs before tracing is installed, so the loaded paths are returned and
/// logged later by [`log_dotenv_sources`]. Variables already set are never
/// overwritten.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() && dotenvy::from_path(&env_file).is_ok() {
            loaded_from.push(env_file);
        }
    }

    loaded_from
}

pub fn log_dotenv_sources(sources: &[PathBuf]) {
    if sources.is_empty() {
        debug!("No .env files found (current dir or ~/.roster)");
    } else {
        let paths: Vec<_> = sources.iter().map(|p| p.display().to_string()).collect();
        info!("Loaded environment from: {}", paths.join(", "));
    }
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Show the effective configuration after env and defaults are applied
    Show,
}

/// Effective settings as `serve` would see them without flags
#[derive(Debug, Serialize)]
struct EffectiveConfig {
    database_url: String,
    bind: String,
    cors_permissive: bool,
}

pub fn run_config(args: ConfigArgs, file_config: &RosterConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(file_config),
    }
}

fn run_path() -> Result<()> {
    let path = RosterConfig::config_path().context("Could not determine home directory")?;
    println!("{}", path.display());
    Ok(())
}

fn run_show(file_config: &RosterConfig) -> Result<()> {
    let bind = match std::env::var(BIND_VAR) {
        Ok(raw) => Some(
            raw.parse::<SocketAddr>()
                .with_context(|| format!("{BIND_VAR} is not a socket address: {raw}"))?,
        ),
        Err(_) => None,
    };

    let effective = EffectiveConfig {
        database_url: file_config.database_url(std::env::var(DATABASE_URL_VAR).ok()),
        bind: file_config.bind_addr(bind).to_string(),
        cors_permissive: file_config.cors_permissive.unwrap_or(false),
    };

    let toml_str =
        toml::to_string_pretty(&effective).context("Failed to serialize configuration")?;
    print!("{toml_str}");
    Ok(())
}
