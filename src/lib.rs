// steam-relay: cached access to Steam profiles, game libraries, and store metadata.
// Batches profile lookups, remembers negative answers, and scrapes store pages past the age gate.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod library;
pub mod model;
pub mod profiles;
pub mod service;
pub mod steam;
pub mod steam_id;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{Cached, ExpiringCache};
pub use catalog::CatalogScraper;
pub use config::Config;
pub use error::{ErrorKind, Result, SteamError};
pub use library::GameLibraryClient;
pub use model::{CatalogEntry, Friend, GameLibrary, OwnedGame, Profile};
pub use profiles::ProfileBatchClient;
pub use service::{Caches, SteamService};
