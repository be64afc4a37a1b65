// Relay configuration.
// Resolves the Steam API key, endpoint bases, per-resource cache TTLs, and logging setup.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use tracing::level_filters::LevelFilter;

use crate::error::{Result, SteamError};

pub const DEFAULT_API_BASE: &str = "https://api.steampowered.com";
pub const DEFAULT_STORE_BASE: &str = "https://store.steampowered.com";
pub const DEFAULT_HEADER_IMAGE_TEMPLATE: &str =
    "https://cdn.akamai.steamstatic.com/steam/apps/{app_id}/header.jpg";
pub const DEFAULT_USER_AGENT: &str = concat!("steam-relay/", env!("CARGO_PKG_VERSION"));

/// Default TTL for owned-games libraries: 1 hour.
pub const DEFAULT_LIBRARY_TTL: Duration = Duration::from_secs(60 * 60);
/// Default TTL for profile summaries: 30 minutes.
pub const DEFAULT_PROFILE_TTL: Duration = Duration::from_secs(30 * 60);
/// Default TTL for "no such profile" answers: 10 minutes.
pub const DEFAULT_NOT_FOUND_TTL: Duration = Duration::from_secs(10 * 60);
/// Default TTL for scraped store metadata: 24 hours.
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const KEY_FILE_NAME: &str = "steam.key";

/// Upstream locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Base URL of the Steam Web API.
    pub api_base: String,
    /// Base URL of the storefront serving `/app/{id}` pages.
    pub store_base: String,
    /// Header image URL with an `{app_id}` placeholder.
    pub header_image_template: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            store_base: DEFAULT_STORE_BASE.to_string(),
            header_image_template: DEFAULT_HEADER_IMAGE_TEMPLATE.to_string(),
        }
    }
}

impl Endpoints {
    pub fn header_image_url(&self, app_id: &str) -> String {
        self.header_image_template.replace("{app_id}", app_id)
    }

    pub fn app_page_url(&self, app_id: &str) -> String {
        format!("{}/app/{}/", self.store_base.trim_end_matches('/'), app_id)
    }
}

/// Per-resource cache lifetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub library_ttl: Duration,
    pub profile_ttl: Duration,
    /// Lifetime of negative profile entries, so new accounts eventually resolve.
    pub not_found_ttl: Duration,
    pub catalog_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            library_ttl: DEFAULT_LIBRARY_TTL,
            profile_ttl: DEFAULT_PROFILE_TTL,
            not_found_ttl: DEFAULT_NOT_FOUND_TTL,
            catalog_ttl: DEFAULT_CATALOG_TTL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: LevelFilter,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub endpoints: Endpoints,
    pub cache: CacheConfig,
    pub request_timeout: Duration,
    pub user_agent: String,
    pub logging: LoggingConfig,
}

impl Config {
    /// Configuration with defaults for everything but the API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoints: Endpoints::default(),
            cache: CacheConfig::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// The API key comes from `STEAM_API_KEY`, then the file named by
    /// `STEAM_KEY_FILE`, then `steam.key` in the platform config directory,
    /// then `./steam.key`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = match lookup("STEAM_API_KEY").filter(|key| !key.trim().is_empty()) {
            Some(key) => key.trim().to_string(),
            None => {
                let explicit = lookup("STEAM_KEY_FILE").map(PathBuf::from);
                resolve_key_file(explicit)?
            }
        };

        let mut config = Self::new(api_key);

        if let Some(ttl) = duration_var(&lookup, "STEAM_RELAY_LIBRARY_TTL_SECS")? {
            config.cache.library_ttl = ttl;
        }
        if let Some(ttl) = duration_var(&lookup, "STEAM_RELAY_PROFILE_TTL_SECS")? {
            config.cache.profile_ttl = ttl;
        }
        if let Some(ttl) = duration_var(&lookup, "STEAM_RELAY_NOT_FOUND_TTL_SECS")? {
            config.cache.not_found_ttl = ttl;
        }
        if let Some(ttl) = duration_var(&lookup, "STEAM_RELAY_CATALOG_TTL_SECS")? {
            config.cache.catalog_ttl = ttl;
        }
        if let Some(timeout) = duration_var(&lookup, "STEAM_RELAY_TIMEOUT_SECS")? {
            config.request_timeout = timeout;
        }
        if let Some(base) = lookup("STEAM_RELAY_API_BASE") {
            config.endpoints.api_base = base;
        }
        if let Some(base) = lookup("STEAM_RELAY_STORE_BASE") {
            config.endpoints.store_base = base;
        }
        if let Some(level) = lookup("STEAM_RELAY_LOG_LEVEL") {
            config.logging.level = level
                .parse()
                .map_err(|_| SteamError::Config(format!("invalid log level {level:?}")))?;
        }
        if let Some(format) = lookup("STEAM_RELAY_LOG_FORMAT") {
            config.logging.format = match format.to_ascii_lowercase().as_str() {
                "compact" => LogFormat::Compact,
                "json" => LogFormat::Json,
                other => {
                    return Err(SteamError::Config(format!("invalid log format {other:?}")));
                }
            };
        }

        Ok(config)
    }
}

/// Platform config directory for the relay (~/.config/steam-relay on Linux).
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "steam-relay").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Read an API key from the first line of a key file.
pub fn read_key_file(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path)?;
    let key = contents.lines().next().unwrap_or_default().trim();
    if key.is_empty() {
        return Err(SteamError::MissingApiKey);
    }
    Ok(key.to_string())
}

fn resolve_key_file(explicit: Option<PathBuf>) -> Result<String> {
    if let Some(path) = explicit {
        return read_key_file(&path);
    }

    let candidates = config_dir()
        .map(|dir| dir.join(KEY_FILE_NAME))
        .into_iter()
        .chain(std::iter::once(PathBuf::from(KEY_FILE_NAME)));

    for path in candidates {
        if path.exists() {
            return read_key_file(&path);
        }
    }
    Err(SteamError::MissingApiKey)
}

fn duration_var<F>(lookup: &F, name: &str) -> Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| SteamError::Config(format!("{name} must be whole seconds, got {raw:?}")))
        })
        .transpose()
}
