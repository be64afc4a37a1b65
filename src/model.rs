// Boundary records handed to consumers.
// Upstream payloads are normalized into these as soon as they arrive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::steam::types::{FriendRecord, OwnedGameRecord, PlayerSummary};

/// A user's public profile summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub steam_id: String,
    pub persona_name: String,
    pub avatar_full_url: String,
    pub avatar_medium_url: String,
    /// `None` when the user has not published a real name. Serialized as
    /// `null`, never omitted.
    pub real_name: Option<String>,
}

impl From<PlayerSummary> for Profile {
    fn from(summary: PlayerSummary) -> Self {
        let real_name = summary
            .real_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        Self {
            steam_id: summary.steam_id,
            persona_name: summary.persona_name,
            avatar_full_url: summary.avatar_full,
            avatar_medium_url: summary.avatar_medium,
            real_name,
        }
    }
}

/// One entry in a user's library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedGame {
    pub app_id: String,
    pub lifetime_playtime_minutes: u64,
}

impl From<OwnedGameRecord> for OwnedGame {
    fn from(record: OwnedGameRecord) -> Self {
        Self {
            app_id: record.appid.to_string(),
            lifetime_playtime_minutes: record.playtime_forever,
        }
    }
}

/// A user's owned-games library, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLibrary {
    pub owner_id: String,
    /// Upstream `game_count`, or the number of listed games when it is missing.
    pub game_count: u32,
    pub games: Vec<OwnedGame>,
}

/// Store metadata for one app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub app_id: String,
    pub title: String,
    pub header_image_url: String,
    pub is_multiplayer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub steam_id: String,
    /// `None` when upstream reports no (or an invalid) timestamp.
    pub since: Option<DateTime<Utc>>,
}

impl From<FriendRecord> for Friend {
    fn from(record: FriendRecord) -> Self {
        let since = (record.friend_since > 0)
            .then(|| DateTime::from_timestamp(record.friend_since, 0))
            .flatten();
        Self {
            steam_id: record.steam_id,
            since,
        }
    }
}
