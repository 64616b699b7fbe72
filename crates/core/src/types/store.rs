//! Store locator records.

use serde::{Deserialize, Serialize};

use super::id::{StoreId, StoreNumber};

/// A store as returned by the nearby and address locators.
///
/// Every field is optional. The upstream payloads are loosely shaped, and a
/// missing nested field maps to `None` instead of failing the whole lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Store {
    /// Upstream store identifier.
    pub id: Option<StoreId>,
    /// Display name.
    pub name: Option<String>,
    /// Store number used by the ordering endpoints.
    pub store_number: Option<StoreNumber>,
    /// Postal address.
    pub address: Option<StoreAddress>,
    /// Distance from the query point, in the unit the provider reports.
    pub distance: Option<f64>,
    /// Whether the store currently accepts mobile orders.
    ///
    /// Only the address locator reports this.
    pub mobile_ordering: Option<bool>,
    /// Today's operating hours as display text (e.g. "6:00 AM to 8:00 PM").
    ///
    /// Only the address locator reports this.
    pub hours_today: Option<String>,
}

impl Store {
    /// Single-line address for display, if any address lines are known.
    #[must_use]
    pub fn address_line(&self) -> Option<String> {
        self.address.as_ref().and_then(StoreAddress::single_line)
    }
}

/// Postal address of a store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl StoreAddress {
    /// Join the known parts with `", "`. Returns `None` when every part is missing.
    #[must_use]
    pub fn single_line(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.street.as_deref(),
            self.city.as_deref(),
            self.region.as_deref(),
            self.postal_code.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_skips_missing_parts() {
        let address = StoreAddress {
            street: Some("1 Main St".to_string()),
            city: Some("Langley".to_string()),
            region: None,
            postal_code: Some("V3A 1A1".to_string()),
            country: Some("CA".to_string()),
        };
        assert_eq!(
            address.single_line().as_deref(),
            Some("1 Main St, Langley, V3A 1A1")
        );
    }

    #[test]
    fn test_single_line_empty_address() {
        assert_eq!(StoreAddress::default().single_line(), None);
    }

    #[test]
    fn test_store_without_address() {
        let store = Store::default();
        assert_eq!(store.address_line(), None);
    }
}
