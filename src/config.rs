use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8001";
pub const DEFAULT_REPO_URL: &str = "https://github.com/chandrasmailbox/conductor-todo";
const DEFAULT_TICK_RATE_MS: u64 = 100;

pub const SERVICE_URL_ENV: &str = "CONDUCTOR_SERVICE_URL";
pub const DEFAULT_REPO_ENV: &str = "CONDUCTOR_DEFAULT_REPO";

/// Command line arguments
#[derive(Debug, Default, Parser)]
#[command(name = "conductor-dash", version, about = "Terminal dashboard for Conductor project progress")]
pub struct Cli {
    /// Repository to analyze on startup (URL or owner/repo)
    pub repo_url: Option<String>,

    /// Base URL of the analysis service
    #[arg(long)]
    pub service_url: Option<String>,

    /// Path to a config file (defaults to ~/.conductor-dash/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Event polling interval in milliseconds
    #[arg(long)]
    pub tick_rate: Option<u64>,

    /// Do not analyze any repository on startup
    #[arg(long)]
    pub no_auto_load: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_service_url")]
    pub service_url: String,
    /// Repository analyzed on startup; `None` waits for input
    #[serde(default = "default_repo_url")]
    pub default_repo_url: Option<String>,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_service_url() -> String {
    DEFAULT_SERVICE_URL.to_string()
}

fn default_repo_url() -> Option<String> {
    Some(DEFAULT_REPO_URL.to_string())
}

fn default_tick_rate_ms() -> u64 {
    DEFAULT_TICK_RATE_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            default_repo_url: default_repo_url(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

/// Environment overrides read at startup
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    pub service_url: Option<String>,
    pub default_repo_url: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            service_url: non_blank(env::var(SERVICE_URL_ENV).ok()),
            default_repo_url: non_blank(env::var(DEFAULT_REPO_ENV).ok()),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".conductor-dash"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load a config file. A missing file is `Ok(None)`; an unreadable one is an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Option<Config>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(Some(config))
    }

    /// Resolve the effective config: CLI > environment > file > defaults
    pub fn resolve(cli: &Cli) -> anyhow::Result<Config> {
        let path = cli.config.clone().or_else(Self::config_path);
        let file = match path {
            Some(ref p) => Self::load_from(p)?,
            None => None,
        };
        Ok(Self::merge(file, EnvOverrides::from_env(), cli))
    }

    /// Layer overrides on top of the file config (or defaults)
    pub fn merge(file: Option<Config>, env: EnvOverrides, cli: &Cli) -> Config {
        let mut config = file.unwrap_or_default();

        if let Some(url) = env.service_url {
            config.service_url = url;
        }
        if let Some(repo) = env.default_repo_url {
            config.default_repo_url = Some(repo);
        }

        if let Some(url) = non_blank(cli.service_url.clone()) {
            config.service_url = url;
        }
        if let Some(repo) = non_blank(cli.repo_url.clone()) {
            config.default_repo_url = Some(repo);
        }
        if let Some(tick) = cli.tick_rate {
            config.tick_rate_ms = tick;
        }
        if cli.no_auto_load {
            config.default_repo_url = None;
        }

        config.tick_rate_ms = config.tick_rate_ms.max(10);
        config
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
