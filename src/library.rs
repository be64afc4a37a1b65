// Game library client.
// Memoizes owned-games lookups, including the "private or empty" answer.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::cache::{Cached, ExpiringCache};
use crate::error::{Result, SteamError};
use crate::model::{GameLibrary, OwnedGame};
use crate::steam::SteamApi;

pub type LibraryCache = ExpiringCache<Cached<GameLibrary>>;

pub struct GameLibraryClient {
    api: Arc<dyn SteamApi>,
    cache: Arc<LibraryCache>,
}

impl GameLibraryClient {
    pub fn new(api: Arc<dyn SteamApi>, cache: Arc<LibraryCache>) -> Self {
        Self { api, cache }
    }

    /// Fetch a user's owned games.
    ///
    /// A private profile or an empty library yields
    /// [`SteamError::PrivateOrEmpty`], which is cached like a success.
    /// Transport failures are returned as-is and not cached.
    #[instrument(skip(self))]
    pub async fn get_library(&self, steam_id: &str) -> Result<GameLibrary> {
        if let Some(entry) = self.cache.get(steam_id) {
            debug!("library cache hit");
            return into_result(steam_id, entry);
        }

        let owned = self.api.owned_games(steam_id).await?;
        let entry = match owned.games {
            Some(games) if !games.is_empty() => Cached::Present(GameLibrary {
                owner_id: steam_id.to_string(),
                game_count: owned.game_count.unwrap_or(games.len() as u32),
                games: games.into_iter().map(OwnedGame::from).collect(),
            }),
            _ => Cached::Absent,
        };

        match &entry {
            Cached::Present(library) => info!(games = library.game_count, "fetched library"),
            Cached::Absent => info!("library is private or empty"),
        }
        self.cache.set(steam_id, entry.clone());

        into_result(steam_id, entry)
    }
}

fn into_result(steam_id: &str, entry: Cached<GameLibrary>) -> Result<GameLibrary> {
    match entry {
        Cached::Present(library) => Ok(library),
        Cached::Absent => Err(SteamError::PrivateOrEmpty {
            steam_id: steam_id.to_string(),
        }),
    }
}
