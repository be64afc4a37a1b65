// Steam HTTP client.
// Handles the API key, default headers, timeouts, and response status checking.

use std::time::Duration;

use reqwest::{
    Client, Response,
    header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::config::{Config, Endpoints};
use crate::error::{Result, SteamError};

/// Steam Web API and storefront client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct SteamClient {
    client: Client,
    api_key: String,
    endpoints: Endpoints,
}

impl SteamClient {
    /// Create a client from relay configuration.
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(SteamError::MissingApiKey);
        }
        Self::build(
            &config.api_key,
            config.endpoints.clone(),
            config.request_timeout,
            &config.user_agent,
        )
    }

    fn build(
        api_key: &str,
        endpoints: Endpoints,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| SteamError::Config(format!("invalid user agent: {e}")))?,
        );
        // The storefront localizes titles; pin English so suffix stripping works.
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.8"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(SteamError::Http)?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    /// Make a keyed GET request to the Steam Web API.
    pub(crate) async fn get_api(&self, path: &str, params: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}{}", self.endpoints.api_base.trim_end_matches('/'), path);
        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("format", "json")])
            .query(params)
            .send()
            .await
            .map_err(redact)?;

        check_response(response, &url)
    }
}

/// Strip the request URL (which carries the API key) from a transport error.
pub(crate) fn redact(err: reqwest::Error) -> SteamError {
    SteamError::Http(err.without_url())
}

/// Convert a non-success status into an error. `url` is reported instead of
/// the response URL so the API key never ends up in an error message.
pub(crate) fn check_response(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(SteamError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}
