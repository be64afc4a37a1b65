// Profile batch client.
// Reconciles multi-id profile requests against the cache with one upstream call for the misses.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument};

use crate::cache::{Cached, ExpiringCache};
use crate::error::{Result, SteamError};
use crate::model::Profile;
use crate::steam::SteamApi;

/// Upper bound on ids per `GetPlayerSummaries` request.
pub const MAX_IDS_PER_CALL: usize = 100;

pub type ProfileCache = ExpiringCache<Cached<Profile>>;

/// Fetches profile summaries for one or many users.
///
/// Every requested id ends up with a cache entry: a `Present` profile, or
/// `Absent` when upstream silently dropped the id from its response.
pub struct ProfileBatchClient {
    api: Arc<dyn SteamApi>,
    cache: Arc<ProfileCache>,
    not_found_ttl: Duration,
}

impl ProfileBatchClient {
    pub fn new(api: Arc<dyn SteamApi>, cache: Arc<ProfileCache>, not_found_ttl: Duration) -> Self {
        Self {
            api,
            cache,
            not_found_ttl,
        }
    }

    /// Fetch profiles for a set of ids. Duplicate ids are collapsed.
    ///
    /// Ids without a profile map to [`Cached::Absent`] rather than being left
    /// out. Upstream failures propagate and leave the failed ids uncached.
    #[instrument(skip_all, fields(requested = tracing::field::Empty))]
    pub async fn get_profiles<I, S>(&self, steam_ids: I) -> Result<BTreeMap<String, Cached<Profile>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: BTreeSet<String> = steam_ids
            .into_iter()
            .map(|id| id.as_ref().to_string())
            .collect();
        tracing::Span::current().record("requested", requested.len());

        let mut resolved = BTreeMap::new();
        let mut missing = Vec::new();
        for steam_id in requested {
            match self.cache.get(&steam_id) {
                Some(entry) => {
                    resolved.insert(steam_id, entry);
                }
                None => missing.push(steam_id),
            }
        }
        debug!(
            hits = resolved.len(),
            misses = missing.len(),
            "partitioned profile request"
        );

        if !missing.is_empty() {
            resolved.extend(self.backfill(&missing).await?);
        }

        Ok(resolved)
    }

    /// Fetch one profile through the same batch path.
    pub async fn get_profile(&self, steam_id: &str) -> Result<Profile> {
        let mut profiles = self.get_profiles([steam_id]).await?;
        match profiles.remove(steam_id) {
            Some(Cached::Present(profile)) => Ok(profile),
            Some(Cached::Absent) | None => Err(SteamError::NotFound {
                steam_id: steam_id.to_string(),
            }),
        }
    }

    /// Fetch the missing ids and store an entry, positive or negative, for each.
    async fn backfill(&self, missing: &[String]) -> Result<Vec<(String, Cached<Profile>)>> {
        let mut stored = Vec::with_capacity(missing.len());

        for chunk in missing.chunks(MAX_IDS_PER_CALL) {
            let summaries = self.api.player_summaries(chunk).await?;

            let mut found: HashMap<String, Profile> = summaries
                .into_iter()
                .map(Profile::from)
                .map(|profile| (profile.steam_id.clone(), profile))
                .collect();
            info!(
                requested = chunk.len(),
                returned = found.len(),
                "fetched player summaries"
            );

            for steam_id in chunk {
                let entry = match found.remove(steam_id) {
                    Some(profile) => {
                        let entry = Cached::Present(profile);
                        self.cache.set(steam_id.clone(), entry.clone());
                        entry
                    }
                    None => {
                        debug!(steam_id = %steam_id, "no profile upstream, caching absence");
                        self.cache
                            .set_with_ttl(steam_id.clone(), Cached::Absent, self.not_found_ttl);
                        Cached::Absent
                    }
                };
                stored.push((steam_id.clone(), entry));
            }
        }

        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::FakeSteamApi;

    const A: &str = "76561197960000001";
    const B: &str = "76561197960000002";
    const C: &str = "76561197960000003";

    fn client(api: &Arc<FakeSteamApi>) -> (ProfileBatchClient, Arc<ProfileCache>) {
        let cache = Arc::new(ProfileCache::new("profiles", Duration::from_secs(600)));
        let client = ProfileBatchClient::new(
            Arc::clone(api) as Arc<dyn SteamApi>,
            Arc::clone(&cache),
            Duration::from_secs(60),
        );
        (client, cache)
    }

    #[tokio::test]
    async fn test_second_lookup_is_memoized() {
        let api = Arc::new(FakeSteamApi::new().with_player(A, "alpha"));
        let (client, _) = client(&api);

        let first = client.get_profile(A).await.unwrap();
        let second = client.get_profile(A).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(api.summary_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_batch_requests_only_missing_ids_in_one_call() {
        let api = Arc::new(
            FakeSteamApi::new()
                .with_player(A, "alpha")
                .with_player(B, "bravo")
                .with_player(C, "charlie"),
        );
        let (client, _) = client(&api);
        client.get_profile(A).await.unwrap();

        let profiles = client.get_profiles([A, B, C]).await.unwrap();

        let calls = api.summary_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], vec![B.to_string(), C.to_string()]);
        assert_eq!(profiles.len(), 3);
        assert!(profiles.values().all(Cached::is_present));
    }

    #[tokio::test]
    async fn test_omitted_id_is_negatively_cached() {
        let api = Arc::new(FakeSteamApi::new().with_player(A, "alpha"));
        let (client, _) = client(&api);

        let profiles = client.get_profiles([A, B]).await.unwrap();
        assert_eq!(profiles[B], Cached::Absent);

        let again = client.get_profiles([B]).await.unwrap();
        assert_eq!(again[B], Cached::Absent);
        assert_eq!(api.summary_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_every_requested_id_has_an_entry() {
        let api = Arc::new(FakeSteamApi::new().with_player(B, "bravo"));
        let (client, cache) = client(&api);

        let profiles = client.get_profiles([A, B, C, A]).await.unwrap();

        assert_eq!(profiles.len(), 3);
        for id in [A, B, C] {
            assert!(cache.contains(id), "missing cache entry for {id}");
            assert!(profiles.contains_key(id));
        }
    }

    #[tokio::test]
    async fn test_single_lookup_of_unknown_id_is_not_found() {
        let api = Arc::new(FakeSteamApi::new());
        let (client, _) = client(&api);

        let err = client.get_profile(A).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntityNotFound);

        let err = client.get_profile(A).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EntityNotFound);
        assert_eq!(api.summary_calls().len(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_cached() {
        let api = Arc::new(FakeSteamApi::new().with_player(A, "alpha"));
        let (client, cache) = client(&api);
        api.fail_with(503);

        let err = client.get_profiles([A]).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UpstreamUnavailable);
        assert!(cache.is_empty());

        api.recover();
        let profile = client.get_profile(A).await.unwrap();
        assert_eq!(profile.persona_name, "alpha");
        assert_eq!(api.summary_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_negative_entry_expires_and_is_retried() {
        let api = Arc::new(FakeSteamApi::new());
        let (client, cache) = client(&api);
        client.get_profiles([A]).await.unwrap();

        cache.backdate(A, chrono::Duration::seconds(120));
        client.get_profiles([A]).await.unwrap();

        assert_eq!(api.summary_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_request_makes_no_call() {
        let api = Arc::new(FakeSteamApi::new());
        let (client, _) = client(&api);

        let profiles = client.get_profiles(Vec::<String>::new()).await.unwrap();

        assert!(profiles.is_empty());
        assert!(api.summary_calls().is_empty());
    }

    #[tokio::test]
    async fn test_large_miss_sets_are_chunked() {
        let api = Arc::new(FakeSteamApi::new());
        let (client, _) = client(&api);
        let ids: Vec<String> = (0..150).map(|i| format!("7656119800000{:04}", i)).collect();

        let profiles = client.get_profiles(&ids).await.unwrap();

        let calls = api.summary_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].len(), MAX_IDS_PER_CALL);
        assert_eq!(calls[1].len(), 50);
        assert_eq!(profiles.len(), 150);
    }

    #[tokio::test]
    async fn test_concurrent_batches_share_cache() {
        let api = Arc::new(
            FakeSteamApi::new()
                .with_player(A, "alpha")
                .with_player(B, "bravo"),
        );
        let (client, cache) = client(&api);
        let client = Arc::new(client);

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let client = Arc::clone(&client);
                tokio::spawn(async move { client.get_profiles([A, B, C]).await })
            })
            .collect();
        for task in tasks {
            let profiles = task.await.unwrap().unwrap();
            assert_eq!(profiles.len(), 3);
        }

        assert_eq!(cache.len(), 3);
        assert_eq!(client.get_profile(B).await.unwrap().persona_name, "bravo");
    }
}
