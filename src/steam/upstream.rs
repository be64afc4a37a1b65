// Upstream seams.
// Client components depend on these traits so tests can substitute fakes.

use async_trait::async_trait;

use crate::error::Result;

use super::types::{FriendRecord, OwnedGames, PlayerSummary, VanityResolution};

/// The rate-limited Steam Web API.
#[async_trait]
pub trait SteamApi: Send + Sync {
    /// Fetch summaries for all `steam_ids` in one request. Unknown ids are
    /// silently left out of the result.
    async fn player_summaries(&self, steam_ids: &[String]) -> Result<Vec<PlayerSummary>>;

    /// Fetch the owned-games library for one user.
    async fn owned_games(&self, steam_id: &str) -> Result<OwnedGames>;

    /// Resolve a vanity URL name to a numeric account id.
    async fn resolve_vanity_url(&self, vanity: &str) -> Result<VanityResolution>;

    /// Fetch the friend list for one user.
    async fn friend_list(&self, steam_id: &str) -> Result<Vec<FriendRecord>>;
}

/// One fetched storefront page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePage {
    pub body: String,
    /// URL the response was finally served from.
    pub final_url: String,
    /// True when at least one redirect was followed to reach `final_url`.
    pub redirected: bool,
    /// `sessionid` cookie set by the response, if any.
    pub session_id: Option<String>,
}

const AGE_CHECK_PATH: &str = "/agecheck/";

impl StorePage {
    /// True when the page is the age-verification interstitial rather than
    /// content. Canonical slug redirects (`/app/440/` to `/app/440/Team_Fortress_2/`)
    /// are content.
    pub fn is_age_check(&self) -> bool {
        self.final_url.contains(AGE_CHECK_PATH)
    }
}

/// The HTML storefront.
#[async_trait]
pub trait Storefront: Send + Sync {
    /// Fetch the store page for `app_id`, optionally sending a `Cookie` header.
    async fn fetch_app_page(&self, app_id: &str, cookie: Option<&str>) -> Result<StorePage>;
}
