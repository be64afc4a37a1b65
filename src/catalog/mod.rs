// Catalog scraper.
// Fetches store pages, steps around the age gate once, and caches the extracted metadata.

mod age_gate;
mod extract;

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::cache::ExpiringCache;
use crate::config::Endpoints;
use crate::error::{Result, SteamError};
use crate::model::CatalogEntry;
use crate::steam::{StorePage, Storefront};
use crate::steam_id::validate_app_id;

pub type CatalogCache = ExpiringCache<CatalogEntry>;

/// Scrapes catalog metadata from the storefront.
///
/// Only complete entries are cached. Scrape failures are returned and the next
/// call tries again from scratch.
pub struct CatalogScraper {
    storefront: Arc<dyn Storefront>,
    cache: Arc<CatalogCache>,
    endpoints: Endpoints,
}

impl CatalogScraper {
    pub fn new(storefront: Arc<dyn Storefront>, cache: Arc<CatalogCache>, endpoints: Endpoints) -> Self {
        Self {
            storefront,
            cache,
            endpoints,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_catalog_entry(&self, app_id: &str) -> Result<CatalogEntry> {
        validate_app_id(app_id)?;

        if let Some(entry) = self.cache.get(app_id) {
            debug!("catalog cache hit");
            return Ok(entry);
        }

        let page = self.fetch_content_page(app_id).await?;
        let extracted = extract::extract(&page.body).map_err(|err| SteamError::scrape(app_id, err))?;

        let title = extracted
            .title
            .clone()
            .ok_or_else(|| SteamError::scrape(app_id, "no heading or page title found"))?;
        if extracted.categories.is_empty() {
            debug!("no category data on store page, assuming not multiplayer");
        }

        let entry = CatalogEntry {
            app_id: app_id.to_string(),
            title,
            header_image_url: self.endpoints.header_image_url(app_id),
            is_multiplayer: extracted.is_multiplayer(),
        };
        info!(title = %entry.title, multiplayer = entry.is_multiplayer, "scraped catalog entry");

        self.cache.set(app_id, entry.clone());
        Ok(entry)
    }

    /// Fetch the real store page, bypassing at most one age-gate redirect.
    async fn fetch_content_page(&self, app_id: &str) -> Result<StorePage> {
        let page = self.storefront.fetch_app_page(app_id, None).await?;
        if !page.redirected {
            return Ok(page);
        }

        info!(redirected_to = %page.final_url, "age gate detected, retrying with birth date cookies");
        if page.session_id.is_none() {
            debug!("age gate response carried no session id");
        }
        let cookie = age_gate::bypass_cookie(page.session_id.as_deref());

        let retry = self.storefront.fetch_app_page(app_id, Some(&cookie)).await?;
        if retry.is_age_check() {
            warn!(redirected_to = %retry.final_url, "age gate bypass was not accepted");
            return Err(SteamError::scrape(
                app_id,
                format!("still at {} after age gate bypass", retry.final_url),
            ));
        }
        Ok(retry)
    }
}
