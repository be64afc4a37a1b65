// Error types for steam-relay.
// Separates upstream transport failures from cacheable "known absent" outcomes.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SteamError {
    #[error("Steam request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Steam returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Game library for {steam_id} is private or empty")]
    PrivateOrEmpty { steam_id: String },

    #[error("No Steam profile found for {steam_id}")]
    NotFound { steam_id: String },

    #[error("A user with vanity URL {vanity} was not found ({message})")]
    VanityNotFound { vanity: String, message: String },

    #[error("Failed to scrape store page for app {app_id}: {reason}")]
    Scrape { app_id: String, reason: String },

    #[error("Invalid Steam id {steam_id:?}: {reason}")]
    InvalidSteamId { steam_id: String, reason: String },

    #[error("Invalid app id {0:?}: must be numeric")]
    InvalidAppId(String),

    #[error("Missing Steam API key: set STEAM_API_KEY or provide a steam.key file")]
    MissingApiKey,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stable classification of a [`SteamError`], for callers that map failures
/// to their own response payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Transport or non-success status from an upstream call. Never cached.
    UpstreamUnavailable,
    /// Library exists but cannot be read or holds no games. Cached.
    EntityPrivateOrEmpty,
    /// Requested id does not resolve upstream. Cached.
    EntityNotFound,
    /// Store page could not be parsed into a catalog entry. Never cached.
    ScrapeFailure,
    /// Caller supplied a malformed identifier.
    InvalidInput,
    /// The relay itself is misconfigured.
    Configuration,
}

impl SteamError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SteamError::Http(_) | SteamError::Status { .. } | SteamError::Json(_) => {
                ErrorKind::UpstreamUnavailable
            }
            SteamError::PrivateOrEmpty { .. } => ErrorKind::EntityPrivateOrEmpty,
            SteamError::NotFound { .. } | SteamError::VanityNotFound { .. } => {
                ErrorKind::EntityNotFound
            }
            SteamError::Scrape { .. } => ErrorKind::ScrapeFailure,
            SteamError::InvalidSteamId { .. } | SteamError::InvalidAppId(_) => {
                ErrorKind::InvalidInput
            }
            SteamError::MissingApiKey | SteamError::Config(_) | SteamError::Io(_) => {
                ErrorKind::Configuration
            }
        }
    }

    /// Whether this outcome is a definitive answer worth remembering.
    pub fn is_cacheable(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::EntityPrivateOrEmpty | ErrorKind::EntityNotFound
        )
    }

    pub(crate) fn scrape(app_id: &str, reason: impl Into<String>) -> Self {
        SteamError::Scrape {
            app_id: app_id.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SteamError>;
