// Steam Web API response types.
// Defines structs for deserializing the JSON envelopes the relay consumes.

use serde::{Deserialize, Serialize};

/// Player summary as returned by `ISteamUser/GetPlayerSummaries`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    #[serde(rename = "steamid")]
    pub steam_id: String,
    #[serde(rename = "personaname", default)]
    pub persona_name: String,
    #[serde(rename = "avatarfull", default)]
    pub avatar_full: String,
    #[serde(rename = "avatarmedium", default)]
    pub avatar_medium: String,
    #[serde(rename = "realname", default)]
    pub real_name: Option<String>,
}

/// Response wrapper for player summaries.
#[derive(Debug, Deserialize)]
pub(crate) struct PlayerSummariesEnvelope {
    pub response: PlayerSummariesResponse,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayerSummariesResponse {
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
}

/// One owned game from `IPlayerService/GetOwnedGames`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedGameRecord {
    pub appid: u64,
    #[serde(default)]
    pub playtime_forever: u64,
}

/// Owned-games payload. `games` is missing for private profiles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedGames {
    #[serde(default)]
    pub game_count: Option<u32>,
    #[serde(default)]
    pub games: Option<Vec<OwnedGameRecord>>,
}

/// Response wrapper for owned games.
#[derive(Debug, Deserialize)]
pub(crate) struct OwnedGamesEnvelope {
    #[serde(default)]
    pub response: OwnedGames,
}

/// Result of `ISteamUser/ResolveVanityURL`. `success == 1` means resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VanityResolution {
    pub success: i32,
    #[serde(rename = "steamid", default)]
    pub steam_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VanityEnvelope {
    pub response: VanityResolution,
}

/// One friend entry from `ISteamUser/GetFriendList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRecord {
    #[serde(rename = "steamid")]
    pub steam_id: String,
    #[serde(default)]
    pub relationship: String,
    /// Unix timestamp (seconds).
    #[serde(default)]
    pub friend_since: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FriendListEnvelope {
    #[serde(rename = "friendslist")]
    pub friends_list: FriendList,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FriendList {
    #[serde(default)]
    pub friends: Vec<FriendRecord>,
}
