// Steam Web API endpoint functions.
// Implements the typed API calls on top of the shared HTTP client.

use async_trait::async_trait;

use crate::error::Result;

use super::client::{SteamClient, redact};
use super::types::{
    FriendListEnvelope, FriendRecord, OwnedGames, OwnedGamesEnvelope, PlayerSummariesEnvelope,
    PlayerSummary, VanityEnvelope, VanityResolution,
};
use super::upstream::SteamApi;

const PLAYER_SUMMARIES: &str = "/ISteamUser/GetPlayerSummaries/v0002/";
const OWNED_GAMES: &str = "/IPlayerService/GetOwnedGames/v0001/";
const RESOLVE_VANITY_URL: &str = "/ISteamUser/ResolveVanityURL/v0001/";
const FRIEND_LIST: &str = "/ISteamUser/GetFriendList/v0001/";

#[async_trait]
impl SteamApi for SteamClient {
    async fn player_summaries(&self, steam_ids: &[String]) -> Result<Vec<PlayerSummary>> {
        if steam_ids.is_empty() {
            return Ok(Vec::new());
        }
        let joined = steam_ids.join(",");
        let response = self
            .get_api(PLAYER_SUMMARIES, &[("steamids", joined.as_str())])
            .await?;
        let envelope: PlayerSummariesEnvelope = response.json().await.map_err(redact)?;
        Ok(envelope.response.players)
    }

    async fn owned_games(&self, steam_id: &str) -> Result<OwnedGames> {
        let response = self.get_api(OWNED_GAMES, &[("steamid", steam_id)]).await?;
        let envelope: OwnedGamesEnvelope = response.json().await.map_err(redact)?;
        Ok(envelope.response)
    }

    async fn resolve_vanity_url(&self, vanity: &str) -> Result<VanityResolution> {
        let response = self
            .get_api(RESOLVE_VANITY_URL, &[("vanityurl", vanity)])
            .await?;
        let envelope: VanityEnvelope = response.json().await.map_err(redact)?;
        Ok(envelope.response)
    }

    async fn friend_list(&self, steam_id: &str) -> Result<Vec<FriendRecord>> {
        let response = self
            .get_api(
                FRIEND_LIST,
                &[("steamid", steam_id), ("relationship", "friend")],
            )
            .await?;
        let envelope: FriendListEnvelope = response.json().await.map_err(redact)?;
        Ok(envelope.friends_list.friends)
    }
}
