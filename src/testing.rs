// Test doubles for the upstream traits.
// Record every call so tests can assert exactly how often upstream was hit.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Result, SteamError};
use crate::steam::types::{FriendRecord, OwnedGameRecord, OwnedGames, PlayerSummary, VanityResolution};
use crate::steam::upstream::{SteamApi, StorePage, Storefront};

pub(crate) fn player(steam_id: &str, name: &str) -> PlayerSummary {
    PlayerSummary {
        steam_id: steam_id.to_string(),
        persona_name: name.to_string(),
        avatar_full: format!("https://avatars.example/{steam_id}_full.jpg"),
        avatar_medium: format!("https://avatars.example/{steam_id}_medium.jpg"),
        real_name: None,
    }
}

fn records(games: &[(u64, u64)]) -> Vec<OwnedGameRecord> {
    games
        .iter()
        .map(|&(appid, playtime_forever)| OwnedGameRecord {
            appid,
            playtime_forever,
        })
        .collect()
}

#[derive(Default)]
pub(crate) struct FakeSteamApi {
    players: Mutex<HashMap<String, PlayerSummary>>,
    libraries: Mutex<HashMap<String, OwnedGames>>,
    vanities: Mutex<HashMap<String, String>>,
    friends: Mutex<HashMap<String, Vec<FriendRecord>>>,
    failure: Mutex<Option<u16>>,
    summary_calls: Mutex<Vec<Vec<String>>>,
    owned_calls: Mutex<Vec<String>>,
}

impl FakeSteamApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player(self, steam_id: &str, name: &str) -> Self {
        self.players
            .lock()
            .unwrap()
            .insert(steam_id.to_string(), player(steam_id, name));
        self
    }

    pub fn with_library(self, steam_id: &str, games: &[(u64, u64)]) -> Self {
        let games = records(games);
        self.insert_library(
            steam_id,
            OwnedGames {
                game_count: Some(games.len() as u32),
                games: Some(games),
            },
        )
    }

    /// A library whose payload omits `game_count`.
    pub fn with_uncounted_library(self, steam_id: &str, games: &[(u64, u64)]) -> Self {
        self.insert_library(
            steam_id,
            OwnedGames {
                game_count: None,
                games: Some(records(games)),
            },
        )
    }

    fn insert_library(self, steam_id: &str, owned: OwnedGames) -> Self {
        self.libraries
            .lock()
            .unwrap()
            .insert(steam_id.to_string(), owned);
        self
    }

    pub fn with_private_library(self, steam_id: &str) -> Self {
        self.libraries
            .lock()
            .unwrap()
            .insert(steam_id.to_string(), OwnedGames::default());
        self
    }

    pub fn with_vanity(self, vanity: &str, steam_id: &str) -> Self {
        self.vanities
            .lock()
            .unwrap()
            .insert(vanity.to_string(), steam_id.to_string());
        self
    }

    pub fn with_friends(self, steam_id: &str, friends: Vec<FriendRecord>) -> Self {
        self.friends
            .lock()
            .unwrap()
            .insert(steam_id.to_string(), friends);
        self
    }

    /// Make every subsequent call fail with the given HTTP status.
    pub fn fail_with(&self, status: u16) {
        *self.failure.lock().unwrap() = Some(status);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn summary_calls(&self) -> Vec<Vec<String>> {
        self.summary_calls.lock().unwrap().clone()
    }

    pub fn owned_calls(&self) -> Vec<String> {
        self.owned_calls.lock().unwrap().clone()
    }

    fn check_failure(&self, url: &str) -> Result<()> {
        match *self.failure.lock().unwrap() {
            Some(status) => Err(SteamError::Status {
                status,
                url: url.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SteamApi for FakeSteamApi {
    async fn player_summaries(&self, steam_ids: &[String]) -> Result<Vec<PlayerSummary>> {
        self.summary_calls.lock().unwrap().push(steam_ids.to_vec());
        self.check_failure("fake://GetPlayerSummaries")?;
        let players = self.players.lock().unwrap();
        Ok(steam_ids
            .iter()
            .filter_map(|id| players.get(id).cloned())
            .collect())
    }

    async fn owned_games(&self, steam_id: &str) -> Result<OwnedGames> {
        self.owned_calls.lock().unwrap().push(steam_id.to_string());
        self.check_failure("fake://GetOwnedGames")?;
        Ok(self
            .libraries
            .lock()
            .unwrap()
            .get(steam_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn resolve_vanity_url(&self, vanity: &str) -> Result<VanityResolution> {
        self.check_failure("fake://ResolveVanityURL")?;
        Ok(match self.vanities.lock().unwrap().get(vanity) {
            Some(steam_id) => VanityResolution {
                success: 1,
                steam_id: Some(steam_id.clone()),
                message: None,
            },
            None => VanityResolution {
                success: 42,
                steam_id: None,
                message: Some("No match".to_string()),
            },
        })
    }

    async fn friend_list(&self, steam_id: &str) -> Result<Vec<FriendRecord>> {
        self.check_failure("fake://GetFriendList")?;
        match self.friends.lock().unwrap().get(steam_id) {
            Some(friends) => Ok(friends.clone()),
            None => Err(SteamError::Status {
                status: 401,
                url: "fake://GetFriendList".to_string(),
            }),
        }
    }
}

/// A storefront that replays queued responses in order.
#[derive(Default)]
pub(crate) struct FakeStorefront {
    responses: Mutex<VecDeque<std::result::Result<StorePage, u16>>>,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeStorefront {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a page served directly, without redirects.
    pub fn then_page(self, body: &str) -> Self {
        self.push(Ok(StorePage {
            body: body.to_string(),
            final_url: "https://store.example/app/".to_string(),
            redirected: false,
            session_id: None,
        }))
    }

    /// Queue a content page reached through a redirect to `final_url`.
    pub fn then_redirected_page(self, body: &str, final_url: &str) -> Self {
        self.push(Ok(StorePage {
            body: body.to_string(),
            final_url: final_url.to_string(),
            redirected: true,
            session_id: None,
        }))
    }

    /// Queue an age-gate interstitial reached through a redirect.
    pub fn then_age_gate(self, session_id: Option<&str>) -> Self {
        self.push(Ok(StorePage {
            body: "<html><head><title>Site Error</title></head><body>\
                   <div class=\"agegate_birthday_selector\">Please enter your birth date</div>\
                   </body></html>"
                .to_string(),
            final_url: "https://store.example/agecheck/app/".to_string(),
            redirected: true,
            session_id: session_id.map(str::to_string),
        }))
    }

    pub fn then_status(self, status: u16) -> Self {
        self.push(Err(status))
    }

    fn push(self, response: std::result::Result<StorePage, u16>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storefront for FakeStorefront {
    async fn fetch_app_page(&self, app_id: &str, cookie: Option<&str>) -> Result<StorePage> {
        self.calls
            .lock()
            .unwrap()
            .push((app_id.to_string(), cookie.map(str::to_string)));
        let next = self.responses.lock().unwrap().pop_front().unwrap_or(Err(404));
        next.map_err(|status| SteamError::Status {
            status,
            url: format!("https://store.example/app/{app_id}/"),
        })
    }
}
