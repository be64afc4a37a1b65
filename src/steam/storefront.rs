// Storefront page fetching.
// Follows redirects, records whether any happened, and captures the session cookie.

use async_trait::async_trait;
use reqwest::Response;
use reqwest::header::COOKIE;

use crate::error::Result;

use super::client::{SteamClient, check_response, redact};
use super::upstream::{StorePage, Storefront};

const SESSION_COOKIE: &str = "sessionid";

#[async_trait]
impl Storefront for SteamClient {
    async fn fetch_app_page(&self, app_id: &str, cookie: Option<&str>) -> Result<StorePage> {
        let url = self.endpoints().app_page_url(app_id);

        let mut request = self.http().get(&url);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        let response = request.send().await.map_err(redact)?;
        let response = check_response(response, &url)?;

        let final_url = response.url().to_string();
        let redirected = !same_location(&final_url, &url);
        let session_id = session_cookie(&response);
        let body = response.text().await.map_err(redact)?;

        Ok(StorePage {
            body,
            final_url,
            redirected,
            session_id,
        })
    }
}

fn same_location(a: &str, b: &str) -> bool {
    a.trim_end_matches('/') == b.trim_end_matches('/')
}

/// The `sessionid` value among the cookies set by `response`.
fn session_cookie(response: &Response) -> Option<String> {
    response
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
