//! Upstream JSON shapes and their conversion into `brewpass-core` records.
//!
//! The provider's payloads are loosely typed: identifiers arrive as strings
//! or numbers, amounts as numbers or strings, and nested objects may be
//! missing or `null`. The raw types here absorb that and the conversions
//! produce `None` for anything absent.

pub(crate) mod cards;
pub(crate) mod orders;
pub(crate) mod stores;

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

/// Parse a JSON number or numeric string as a decimal.
pub(crate) fn decimal_from_value(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Required decimal amount, number or string.
pub(crate) fn required_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    decimal_from_value(&value)
        .ok_or_else(|| D::Error::custom(format!("expected a decimal amount, got {value}")))
}

/// Optional decimal amount. Unparsable values become `None`.
pub(crate) fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

/// Optional identifier that may arrive as a string or a number.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    })
}

/// Optional count that may arrive as a number or a numeric string.
/// Negative, fractional or out-of-range values become `None`.
pub(crate) fn lenient_quantity<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Amounts {
        #[serde(deserialize_with = "required_decimal")]
        total: Decimal,
        #[serde(default, deserialize_with = "lenient_decimal")]
        balance: Option<Decimal>,
        #[serde(default, deserialize_with = "lenient_string")]
        id: Option<String>,
    }

    #[test]
    fn test_decimal_from_number_and_string() {
        assert_eq!(decimal_from_value(&json!(4.65)), Some(Decimal::new(465, 2)));
        assert_eq!(decimal_from_value(&json!("4.65")), Some(Decimal::new(465, 2)));
        assert_eq!(decimal_from_value(&json!(12)), Some(Decimal::new(12, 0)));
        assert_eq!(decimal_from_value(&json!(" 3.10 ")), Some(Decimal::new(310, 2)));
        assert_eq!(decimal_from_value(&json!(true)), None);
        assert_eq!(decimal_from_value(&json!("n/a")), None);
    }

    #[test]
    fn test_lenient_fields() {
        let amounts: Amounts =
            serde_json::from_value(json!({ "total": "9.00", "balance": "oops", "id": 42 }))
                .unwrap();
        assert_eq!(amounts.total, Decimal::new(900, 2));
        assert_eq!(amounts.balance, None);
        assert_eq!(amounts.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_missing_lenient_fields_default() {
        let amounts: Amounts = serde_json::from_value(json!({ "total": 1 })).unwrap();
        assert_eq!(amounts.balance, None);
        assert_eq!(amounts.id, None);
    }

    #[test]
    fn test_required_decimal_rejects_garbage() {
        let result = serde_json::from_value::<Amounts>(json!({ "total": null }));
        assert!(result.is_err());
    }
}
