//! Registered card payloads.

use brewpass_core::{Card, CardId};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::{lenient_decimal, lenient_string};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCard {
    #[serde(default, deserialize_with = "lenient_string")]
    card_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    card_number: Option<String>,
    #[serde(default)]
    nickname: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    balance: Option<Decimal>,
}

/// Map the cards payload. Anything but a JSON array yields no cards, and
/// entries that are not objects are skipped.
pub(crate) fn cards_from_value(value: Value) -> Vec<Card> {
    let Value::Array(entries) = value else {
        warn!("Cards payload is not an array, returning no cards");
        return Vec::new();
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<RawCard>(entry) {
            Ok(raw) => Some(Card {
                id: raw.card_id.map(CardId::from),
                number: raw.card_number,
                nickname: raw.nickname,
                balance: raw.balance,
            }),
            Err(e) => {
                warn!(error = %e, "Skipping malformed card entry");
                None
            }
        })
        .collect()
}
