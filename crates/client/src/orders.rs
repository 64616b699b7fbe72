//! Ordering operations: history, pricing and submission.
//!
//! Pricing and submission are linked only by the values the caller carries:
//! the [`PricedOrder`] returned by [`BrewpassClient::price_order`] must be
//! passed unmodified to [`BrewpassClient::place_order`].

use brewpass_core::{Cart, CardId, PastOrder, PricedOrder, StoreNumber};
use tracing::{debug, info, instrument};

use crate::client::BrewpassClient;
use crate::conversions::orders::{OrderHistoryResponse, PriceOrderResponse, SubmitOrderBody};
use crate::error::ClientError;

const ORDER_HISTORY_PATH: &str = "me/orders";

fn price_order_path(store_number: &StoreNumber) -> [&str; 4] {
    ["me", "stores", store_number.as_str(), "priceOrder"]
}

fn submit_order_path(priced: &PricedOrder) -> [&str; 6] {
    [
        "me",
        "stores",
        priced.store_number.as_str(),
        "orderToken",
        priced.order_token.as_str(),
        "submitOrder",
    ]
}

impl BrewpassClient {
    /// Basket of the account's most recent order, or `None` without history.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotAuthenticated` without a token, or
    /// `ClientError::Api` if the provider rejects the request.
    #[instrument(skip(self))]
    pub async fn last_order(&self) -> Result<Option<PastOrder>, ClientError> {
        let config = self.config();
        let response: OrderHistoryResponse = self
            .get(
                ORDER_HISTORY_PATH,
                &[
                    ("limit", "1"),
                    ("market", config.market.as_str()),
                    ("locale", config.locale.as_str()),
                ],
            )
            .await?;

        let order = response.into_last_order();
        debug!(found = order.is_some(), "Order history fetched");
        Ok(order)
    }

    /// Build a reorder cart from a past order. Pure; see [`Cart::from_order`].
    #[must_use]
    pub fn order_to_cart(order: &PastOrder) -> Cart {
        Cart::from_order(order)
    }

    /// Submit a cart for pricing at a store.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotAuthenticated` without a token,
    /// `ClientError::Api` if the provider rejects the cart, or
    /// `ClientError::Decode` if the quote lacks a token, signature or total.
    #[instrument(skip(self, cart), fields(store_number = %store_number, items = cart.items.len()))]
    pub async fn price_order(
        &self,
        store_number: &StoreNumber,
        cart: &Cart,
    ) -> Result<PricedOrder, ClientError> {
        let response: PriceOrderResponse = self.post(&price_order_path(store_number), cart).await?;
        let priced = response.into_priced_order(store_number);
        debug!(total = %priced.total, "Order priced");
        Ok(priced)
    }

    /// Submit a priced order, paying the quoted total with a registered card.
    ///
    /// Returns the provider's confirmation payload unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotAuthenticated` without a token, or
    /// `ClientError::Api` if the provider rejects the submission.
    #[instrument(skip(self, priced), fields(store_number = %priced.store_number, card_id = %card_id))]
    pub async fn place_order(
        &self,
        priced: &PricedOrder,
        card_id: &CardId,
    ) -> Result<serde_json::Value, ClientError> {
        let body = SubmitOrderBody {
            signature: &priced.signature,
            tenders: vec![priced.tender(card_id.clone())],
        };

        let confirmation = self.post(&submit_order_path(priced), &body).await?;
        info!(total = %priced.total, "Order submitted");
        Ok(confirmation)
    }
}
