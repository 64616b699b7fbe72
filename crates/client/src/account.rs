//! Account operations: registered cards and rewards.

use brewpass_core::Card;
use tracing::{debug, instrument};

use crate::client::BrewpassClient;
use crate::conversions::cards::cards_from_value;
use crate::error::ClientError;

const CARDS_PATH: &str = "me/cards";
const REWARDS_PATH: &str = "me/rewards";

impl BrewpassClient {
    /// Payment cards registered to the signed-in account.
    ///
    /// A payload that is not a JSON array yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotAuthenticated` without a token, or
    /// `ClientError::Api` if the provider rejects the request.
    #[instrument(skip(self))]
    pub async fn cards(&self) -> Result<Vec<Card>, ClientError> {
        let payload: serde_json::Value = self.get(CARDS_PATH, &[]).await?;
        let cards = cards_from_value(payload);
        debug!(count = cards.len(), "Cards fetched");
        Ok(cards)
    }

    /// Loyalty summary, as the provider returns it.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotAuthenticated` without a token, or
    /// `ClientError::Api` if the provider rejects the request.
    #[instrument(skip(self))]
    pub async fn rewards(&self) -> Result<serde_json::Value, ClientError> {
        let locale = self.config().locale.as_str();
        self.get(REWARDS_PATH, &[("locale", locale)]).await
    }
}
