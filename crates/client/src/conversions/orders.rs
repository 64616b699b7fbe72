//! Order history, pricing and submission payloads.

use brewpass_core::{OrderId, OrderItem, PastOrder, PricedOrder, StoreNumber, Tender};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::{lenient_quantity, lenient_string, required_decimal};

/// Response of the order history endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderHistoryResponse {
    #[serde(default)]
    order_history_items: Option<Vec<RawHistoryItem>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawHistoryItem {
    #[serde(default)]
    basket: Option<RawBasket>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBasket {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default)]
    preparation: Option<String>,
    #[serde(default)]
    items: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBasketItem {
    #[serde(default, deserialize_with = "lenient_quantity")]
    quantity: Option<u32>,
    #[serde(default)]
    commerce: Option<RawCommerce>,
    #[serde(default)]
    product: Option<RawProduct>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCommerce {
    #[serde(default, deserialize_with = "lenient_string")]
    sku: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawProduct {
    #[serde(default)]
    name: Option<String>,
}

impl OrderHistoryResponse {
    /// Basket of the first (most recent) order, if there is one.
    pub(crate) fn into_last_order(self) -> Option<PastOrder> {
        let basket = self
            .order_history_items
            .unwrap_or_default()
            .into_iter()
            .next()?
            .basket?;

        let items = basket
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| {
                let item = match serde_json::from_value::<RawBasketItem>(entry) {
                    Ok(item) => item,
                    Err(e) => {
                        warn!(error = %e, "Skipping malformed order item");
                        return None;
                    }
                };
                let Some(sku) = item.commerce.and_then(|commerce| commerce.sku) else {
                    warn!("Skipping order item without sku");
                    return None;
                };
                Some(OrderItem {
                    sku,
                    quantity: item.quantity.unwrap_or(1),
                    name: item.product.and_then(|product| product.name),
                })
            })
            .collect();

        Some(PastOrder {
            id: basket.id.map(OrderId::from),
            preparation: basket.preparation,
            items,
        })
    }
}

/// Response of the pricing endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PriceOrderResponse {
    order_token: String,
    signature: String,
    summary: RawSummary,
    #[serde(default)]
    store: Option<RawPricedStore>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSummary {
    #[serde(deserialize_with = "required_decimal")]
    total_amount: Decimal,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPricedStore {
    #[serde(default, deserialize_with = "lenient_string")]
    store_number: Option<String>,
}

impl PriceOrderResponse {
    /// The priced order. Falls back to the requested store number when the
    /// response does not echo one.
    pub(crate) fn into_priced_order(self, requested: &StoreNumber) -> PricedOrder {
        let store_number = self
            .store
            .and_then(|store| store.store_number)
            .map_or_else(|| requested.clone(), StoreNumber::from);

        PricedOrder {
            order_token: self.order_token,
            total: self.summary.total_amount,
            store_number,
            signature: self.signature,
        }
    }
}

/// Request body of the order submission endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct SubmitOrderBody<'a> {
    pub signature: &'a str,
    pub tenders: Vec<Tender>,
}
