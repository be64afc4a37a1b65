// Relay service facade.
// Owns the cache instances and wires them into the client components.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::cache::Cached;
use crate::catalog::{CatalogCache, CatalogScraper};
use crate::config::{CacheConfig, Config};
use crate::error::{Result, SteamError};
use crate::library::{GameLibraryClient, LibraryCache};
use crate::model::{CatalogEntry, Friend, GameLibrary, Profile};
use crate::profiles::{ProfileBatchClient, ProfileCache};
use crate::steam::{SteamApi, SteamClient, Storefront};

/// The relay's cache instances, one per resource type.
///
/// Created once at startup and handed to the clients; tests build fresh ones.
#[derive(Clone)]
pub struct Caches {
    pub libraries: Arc<LibraryCache>,
    pub profiles: Arc<ProfileCache>,
    pub catalog: Arc<CatalogCache>,
}

impl Caches {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            libraries: Arc::new(LibraryCache::new("libraries", config.library_ttl)),
            profiles: Arc::new(ProfileCache::new("profiles", config.profile_ttl)),
            catalog: Arc::new(CatalogCache::new("catalog", config.catalog_ttl)),
        }
    }

    /// Drop expired entries from every instance. Returns the total removed.
    pub fn purge_expired(&self) -> usize {
        self.libraries.purge_expired() + self.profiles.purge_expired() + self.catalog.purge_expired()
    }
}

/// Consumer-facing entry point.
pub struct SteamService {
    api: Arc<dyn SteamApi>,
    caches: Caches,
    profiles: ProfileBatchClient,
    libraries: GameLibraryClient,
    catalog: CatalogScraper,
}

impl SteamService {
    /// Build a service talking to the real Steam endpoints.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Arc::new(SteamClient::new(config)?);
        let caches = Caches::new(&config.cache);
        Ok(Self::new(
            Arc::clone(&client) as Arc<dyn SteamApi>,
            client as Arc<dyn Storefront>,
            caches,
            config,
        ))
    }

    /// Build a service from explicit upstreams and caches.
    pub fn new(
        api: Arc<dyn SteamApi>,
        storefront: Arc<dyn Storefront>,
        caches: Caches,
        config: &Config,
    ) -> Self {
        let profiles = ProfileBatchClient::new(
            Arc::clone(&api),
            Arc::clone(&caches.profiles),
            config.cache.not_found_ttl,
        );
        let libraries = GameLibraryClient::new(Arc::clone(&api), Arc::clone(&caches.libraries));
        let catalog = CatalogScraper::new(
            storefront,
            Arc::clone(&caches.catalog),
            config.endpoints.clone(),
        );

        Self {
            api,
            caches,
            profiles,
            libraries,
            catalog,
        }
    }

    pub fn caches(&self) -> &Caches {
        &self.caches
    }

    pub async fn get_profiles<I, S>(&self, steam_ids: I) -> Result<BTreeMap<String, Cached<Profile>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.profiles.get_profiles(steam_ids).await
    }

    pub async fn get_profile(&self, steam_id: &str) -> Result<Profile> {
        self.profiles.get_profile(steam_id).await
    }

    pub async fn get_library(&self, steam_id: &str) -> Result<GameLibrary> {
        self.libraries.get_library(steam_id).await
    }

    pub async fn get_catalog_entry(&self, app_id: &str) -> Result<CatalogEntry> {
        self.catalog.get_catalog_entry(app_id).await
    }

    /// Resolve a vanity URL name to a Steam id. Not cached.
    #[instrument(skip(self))]
    pub async fn resolve_vanity_url(&self, vanity: &str) -> Result<String> {
        let resolution = self.api.resolve_vanity_url(vanity).await?;
        match resolution.steam_id {
            Some(steam_id) if resolution.success == 1 => {
                info!(steam_id = %steam_id, "resolved vanity url");
                Ok(steam_id)
            }
            _ => Err(SteamError::VanityNotFound {
                vanity: vanity.to_string(),
                message: resolution
                    .message
                    .unwrap_or_else(|| format!("status {}", resolution.success)),
            }),
        }
    }

    /// Fetch a user's friends. Not cached.
    #[instrument(skip(self))]
    pub async fn friend_list(&self, steam_id: &str) -> Result<Vec<Friend>> {
        let friends = self.api.friend_list(steam_id).await?;
        info!(friends = friends.len(), "fetched friend list");
        Ok(friends.into_iter().map(Friend::from).collect())
    }
}
