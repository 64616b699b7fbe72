//! Store locator operations.

use brewpass_core::Store;
use chrono::Datelike;
use tracing::{debug, instrument};

use crate::client::BrewpassClient;
use crate::conversions::stores::{LocatorResponse, NearbyStoresResponse};
use crate::error::ClientError;

const NEARBY_STORES_PATH: &str = "stores/nearby";

impl BrewpassClient {
    /// Stores near a coordinate.
    ///
    /// # Arguments
    ///
    /// * `lat`, `lng` - Query point
    /// * `limit` - Maximum number of stores to return
    /// * `radius` - Search radius, in the provider's unit
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotAuthenticated` without a token, or
    /// `ClientError::Api` if the provider rejects the request.
    #[instrument(skip(self))]
    pub async fn nearby_stores(
        &self,
        lat: f64,
        lng: f64,
        limit: u32,
        radius: u32,
    ) -> Result<Vec<Store>, ClientError> {
        let latlng = format!("{lat},{lng}");
        let limit = limit.to_string();
        let radius = radius.to_string();
        let config = self.config();

        let response: NearbyStoresResponse = self
            .get(
                NEARBY_STORES_PATH,
                &[
                    ("latlng", latlng.as_str()),
                    ("limit", limit.as_str()),
                    ("radius", radius.as_str()),
                    ("locale", config.locale.as_str()),
                    ("market", config.market.as_str()),
                ],
            )
            .await?;

        let stores = response.into_stores();
        debug!(count = stores.len(), "Nearby stores fetched");
        Ok(stores)
    }

    /// Stores near a free-text address, from the public locator.
    ///
    /// Needs no token. Each store also reports whether it takes mobile
    /// orders and its hours for today (local time).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` if the locator rejects the request.
    #[instrument(skip(self))]
    pub async fn stores_by_address(&self, address: &str) -> Result<Vec<Store>, ClientError> {
        let response: LocatorResponse = self
            .public_request(&self.config().locator_url, &[("place", address)])
            .await?;

        let today = chrono::Local::now().weekday();
        let stores = response.into_stores(today);
        debug!(count = stores.len(), "Stores located by address");
        Ok(stores)
    }
}
