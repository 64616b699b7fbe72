//! Order history, carts, pricing and tenders.
//!
//! The ordering flow is: take a [`PastOrder`] (usually the account's most
//! recent one), turn it into a [`Cart`] with [`Cart::from_order`], have the
//! provider price it into a [`PricedOrder`], then submit that priced order
//! together with a [`Tender`].
//!
//! `Cart` and `Tender` serialize directly into the provider's request shapes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::id::{CardId, OrderId, StoreNumber};

/// One line of a previously placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub sku: String,
    pub quantity: u32,
    /// Product display name, when the history payload includes it.
    pub name: Option<String>,
}

/// The basket of a previously placed order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PastOrder {
    pub id: Option<OrderId>,
    /// Preparation mode of the order (e.g. `"InStore"`), reused as the
    /// delivery type when reordering.
    pub preparation: Option<String>,
    pub items: Vec<OrderItem>,
}

/// A cart line: product sku and quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CartItem {
    pub sku: String,
    pub quantity: u32,
}

/// An unsubmitted cart, ready to be priced at a store.
///
/// Serializes to the pricing request body:
///
/// ```json
/// {
///   "cart": { "items": [{ "commerce": { "sku": "..." }, "quantity": 1 }], "offers": [] },
///   "delivery": { "deliveryType": "InStore" }
/// }
/// ```
///
/// The `delivery` object is omitted when the delivery type is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub delivery_type: Option<String>,
}

impl Cart {
    /// Build a reorder cart from a past order.
    ///
    /// Pure: the same order always yields the same cart. Item order and
    /// quantities are kept as they appear in the order; display names are
    /// dropped because the pricing endpoint only takes skus.
    #[must_use]
    pub fn from_order(order: &PastOrder) -> Self {
        Self {
            items: order
                .items
                .iter()
                .map(|item| CartItem {
                    sku: item.sku.clone(),
                    quantity: item.quantity,
                })
                .collect(),
            delivery_type: order.preparation.clone(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

impl From<&PastOrder> for Cart {
    fn from(order: &PastOrder) -> Self {
        Self::from_order(order)
    }
}

// Wire shape of the pricing request body.

#[derive(Serialize)]
struct CartBody<'a> {
    cart: CartLines<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery: Option<Delivery<'a>>,
}

#[derive(Serialize)]
struct CartLines<'a> {
    items: Vec<CartLine<'a>>,
    offers: Vec<String>,
}

#[derive(Serialize)]
struct CartLine<'a> {
    commerce: Commerce<'a>,
    quantity: u32,
}

#[derive(Serialize)]
struct Commerce<'a> {
    sku: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Delivery<'a> {
    delivery_type: &'a str,
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CartBody {
            cart: CartLines {
                items: self
                    .items
                    .iter()
                    .map(|item| CartLine {
                        commerce: Commerce { sku: &item.sku },
                        quantity: item.quantity,
                    })
                    .collect(),
                offers: Vec::new(),
            },
            delivery: self
                .delivery_type
                .as_deref()
                .map(|delivery_type| Delivery { delivery_type }),
        }
        .serialize(serializer)
    }
}

/// A cart the provider has quoted.
///
/// `order_token` and `signature` are opaque and must be submitted exactly as
/// received; the provider keeps no session linking pricing to submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedOrder {
    pub order_token: String,
    pub total: Decimal,
    pub store_number: StoreNumber,
    pub signature: String,
}

impl PricedOrder {
    /// Tender charging the full quoted total to a stored-value card.
    #[must_use]
    pub fn tender(&self, card_id: CardId) -> Tender {
        Tender {
            card_id,
            amount: self.total,
            kind: TenderKind::StoredValueCard,
        }
    }
}

/// Kind of payment instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TenderKind {
    /// A registered stored-value card.
    #[default]
    #[serde(rename = "SVC")]
    StoredValueCard,
}

/// A payment instrument and the amount to charge to it.
///
/// The provider takes `amountToCharge` as a JSON number, so the amount goes
/// through `f64` on the way out. Amounts with up to 15 significant digits
/// print with the same digits they were quoted with; trailing zeros after
/// the point are dropped (`10.00` is sent as `10.0`). Longer amounts are
/// rounded to the nearest `f64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tender {
    #[serde(rename = "id")]
    pub card_id: CardId,
    #[serde(rename = "amountToCharge", with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TenderKind,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tender_amount_keeps_quoted_digits() {
        for (quoted, sent) in [
            (Decimal::new(1345, 2), "13.45"),
            (Decimal::new(1, 1), "0.1"),
            (Decimal::new(123_456_789, 2), "1234567.89"),
            (Decimal::new(1000, 2), "10.0"),
        ] {
            let tender = Tender {
                card_id: CardId::new("C1"),
                amount: quoted,
                kind: TenderKind::StoredValueCard,
            };
            let json = serde_json::to_string(&tender).unwrap();
            assert!(
                json.contains(&format!("\"amountToCharge\":{sent},")),
                "{json}"
            );
        }
    }

    fn sample_order() -> PastOrder {
        PastOrder {
            id: Some(OrderId::new("o-1")),
            preparation: Some("InStore".to_string()),
            items: vec![
                OrderItem {
                    sku: "11035660".to_string(),
                    quantity: 1,
                    name: Some("Caffè Latte".to_string()),
                },
                OrderItem {
                    sku: "11035661".to_string(),
                    quantity: 2,
                    name: None,
                },
            ],
        }
    }

    #[test]
    fn test_from_order_keeps_items_and_preparation() {
        let cart = Cart::from_order(&sample_order());

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].sku, "11035660");
        assert_eq!(cart.items[1].quantity, 2);
        assert_eq!(cart.delivery_type.as_deref(), Some("InStore"));
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_from_order_is_deterministic() {
        let order = sample_order();
        assert_eq!(Cart::from_order(&order), Cart::from_order(&order));
        assert_eq!(Cart::from(&order), Cart::from_order(&order));
    }

    #[test]
    fn test_cart_serializes_to_pricing_body() {
        let cart = Cart::from_order(&sample_order());
        let body = serde_json::to_value(&cart).unwrap();

        assert_eq!(
            body,
            json!({
                "cart": {
                    "items": [
                        { "commerce": { "sku": "11035660" }, "quantity": 1 },
                        { "commerce": { "sku": "11035661" }, "quantity": 2 }
                    ],
                    "offers": []
                },
                "delivery": { "deliveryType": "InStore" }
            })
        );
    }

    #[test]
    fn test_cart_without_delivery_type_omits_delivery() {
        let cart = Cart::from_order(&PastOrder::default());
        let body = serde_json::to_value(&cart).unwrap();

        assert!(cart.is_empty());
        assert_eq!(body, json!({ "cart": { "items": [], "offers": [] } }));
    }

    #[test]
    fn test_tender_from_priced_order() {
        let priced = PricedOrder {
            order_token: "tok".to_string(),
            total: Decimal::new(675, 2),
            store_number: StoreNumber::new("123-456"),
            signature: "sig".to_string(),
        };

        let tender = priced.tender(CardId::new("card-9"));
        assert_eq!(tender.amount, priced.total);

        let body = serde_json::to_value(&tender).unwrap();
        assert_eq!(
            body,
            json!({ "id": "card-9", "amountToCharge": 6.75, "type": "SVC" })
        );
    }
}
