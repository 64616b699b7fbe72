//! Store locator payloads.

use brewpass_core::{Store, StoreAddress, StoreId, StoreNumber};
use chrono::Weekday;
use serde::Deserialize;

use super::lenient_string;

/// Mobile-ordering status code meaning the store takes orders right now.
const MOBILE_ORDERING_READY: &str = "READY";

/// Response of the authenticated nearby-stores endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NearbyStoresResponse {
    #[serde(default)]
    stores: Option<Vec<RawStoreResult>>,
}

impl NearbyStoresResponse {
    pub(crate) fn into_stores(self) -> Vec<Store> {
        self.stores
            .unwrap_or_default()
            .into_iter()
            .map(RawStoreResult::into_store)
            .collect()
    }
}

/// Response of the public locator: either a bare list or `{ "stores": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LocatorResponse {
    List(Vec<RawStoreResult>),
    Wrapped {
        #[serde(default)]
        stores: Option<Vec<RawStoreResult>>,
    },
}

impl LocatorResponse {
    pub(crate) fn into_stores(self, today: Weekday) -> Vec<Store> {
        let results = match self {
            Self::List(results) => results,
            Self::Wrapped { stores } => stores.unwrap_or_default(),
        };
        results
            .into_iter()
            .map(|result| result.into_located_store(today))
            .collect()
    }
}

/// One locator hit: the store plus its distance from the query point.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawStoreResult {
    #[serde(default)]
    distance: Option<f64>,
    #[serde(default)]
    store: Option<RawStore>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStore {
    #[serde(default, deserialize_with = "lenient_string")]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    store_number: Option<String>,
    #[serde(default)]
    address: Option<RawAddress>,
    #[serde(default)]
    mobile_ordering: Option<RawMobileOrdering>,
    #[serde(default)]
    schedule: Option<Vec<RawScheduleDay>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAddress {
    #[serde(default)]
    street_address_line1: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country_subdivision_code: Option<String>,
    #[serde(default)]
    postal_code: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawMobileOrdering {
    #[serde(default)]
    availability: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScheduleDay {
    #[serde(default)]
    day_name: Option<String>,
    #[serde(default)]
    hours: Option<String>,
}

impl RawStoreResult {
    /// Reduced record: id, name, number, address, distance.
    fn into_store(self) -> Store {
        let store = self.store.unwrap_or_default();
        Store {
            id: store.id.map(StoreId::from),
            name: store.name,
            store_number: store.store_number.map(StoreNumber::from),
            address: store.address.map(RawAddress::into_address),
            distance: self.distance,
            mobile_ordering: None,
            hours_today: None,
        }
    }

    /// Reduced record plus mobile-ordering flag and today's hours.
    fn into_located_store(mut self, today: Weekday) -> Store {
        let (mobile_ordering, schedule) = self.store.as_mut().map_or((None, None), |store| {
            (store.mobile_ordering.take(), store.schedule.take())
        });

        let mut located = self.into_store();
        located.mobile_ordering = mobile_ordering
            .and_then(|ordering| ordering.availability)
            .map(|code| code.eq_ignore_ascii_case(MOBILE_ORDERING_READY));
        located.hours_today = schedule.and_then(|days| hours_for(days, today));
        located
    }
}

impl RawAddress {
    fn into_address(self) -> StoreAddress {
        StoreAddress {
            street: self.street_address_line1,
            city: self.city,
            region: self.country_subdivision_code,
            postal_code: self.postal_code,
            country: self.country_code,
        }
    }
}

/// Hours of the schedule entry labelled "Today", else the one named after `today`.
fn hours_for(days: Vec<RawScheduleDay>, today: Weekday) -> Option<String> {
    let weekday = weekday_name(today);
    let mut by_weekday = None;

    for day in days {
        let Some(name) = day.day_name.as_deref() else {
            continue;
        };
        if name.eq_ignore_ascii_case("today") {
            return day.hours;
        }
        if by_weekday.is_none() && name.eq_ignore_ascii_case(weekday) {
            by_weekday = day.hours;
        }
    }

    by_weekday
}

const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nearby_maps_reduced_record() {
        let response: NearbyStoresResponse = serde_json::from_value(json!({
            "stores": [{
                "distance": 0.42,
                "store": {
                    "id": "1001",
                    "name": "Langley Town Centre",
                    "storeNumber": "12345-67890",
                    "address": {
                        "streetAddressLine1": "20202 66 Ave",
                        "city": "Langley",
                        "countrySubdivisionCode": "BC",
                        "postalCode": "V2Y 1P3",
                        "countryCode": "CA"
                    }
                }
            }]
        }))
        .unwrap();

        let stores = response.into_stores();
        assert_eq!(stores.len(), 1);
        let store = &stores[0];
        assert_eq!(store.id, Some(StoreId::new("1001")));
        assert_eq!(store.name.as_deref(), Some("Langley Town Centre"));
        assert_eq!(store.store_number, Some(StoreNumber::new("12345-67890")));
        assert_eq!(store.distance, Some(0.42));
        let address = store.address.as_ref().unwrap();
        assert_eq!(address.city.as_deref(), Some("Langley"));
        assert_eq!(address.region.as_deref(), Some("BC"));
        assert_eq!(store.mobile_ordering, None);
    }

    #[test]
    fn test_nearby_missing_nested_fields_become_none() {
        let response: NearbyStoresResponse = serde_json::from_value(json!({
            "stores": [
                { "distance": 1.5 },
                { "store": { "id": 7, "address": null } },
                {}
            ]
        }))
        .unwrap();

        let stores = response.into_stores();
        assert_eq!(stores.len(), 3);
        assert_eq!(stores[0].distance, Some(1.5));
        assert_eq!(stores[0].id, None);
        assert_eq!(stores[1].id, Some(StoreId::new("7")));
        assert_eq!(stores[1].address, None);
        assert_eq!(stores[2], Store::default());
    }

    #[test]
    fn test_nearby_without_stores_key() {
        let response: NearbyStoresResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_stores().is_empty());

        let response: NearbyStoresResponse =
            serde_json::from_value(json!({ "stores": null })).unwrap();
        assert!(response.into_stores().is_empty());
    }

    #[test]
    fn test_locator_derives_mobile_ordering_and_hours() {
        let response: LocatorResponse = serde_json::from_value(json!([{
            "distance": 2.0,
            "store": {
                "id": "55",
                "name": "Main Street",
                "storeNumber": "555-55",
                "mobileOrdering": { "availability": "READY" },
                "schedule": [
                    { "dayName": "Today", "hours": "6:00 AM to 8:00 PM" },
                    { "dayName": "Tomorrow", "hours": "7:00 AM to 7:00 PM" }
                ]
            }
        }, {
            "store": {
                "id": "56",
                "mobileOrdering": { "availability": "UNAVAILABLE" }
            }
        }]))
        .unwrap();

        let stores = response.into_stores(Weekday::Mon);
        assert_eq!(stores.len(), 2);
        assert_eq!(stores[0].mobile_ordering, Some(true));
        assert_eq!(stores[0].hours_today.as_deref(), Some("6:00 AM to 8:00 PM"));
        assert_eq!(stores[1].mobile_ordering, Some(false));
        assert_eq!(stores[1].hours_today, None);
    }

    #[test]
    fn test_locator_wrapped_response() {
        let response: LocatorResponse = serde_json::from_value(json!({
            "stores": [{ "store": { "name": "Wrapped" } }]
        }))
        .unwrap();
        let stores = response.into_stores(Weekday::Fri);
        assert_eq!(stores[0].name.as_deref(), Some("Wrapped"));
    }

    #[test]
    fn test_hours_fall_back_to_weekday_name() {
        let days = vec![
            RawScheduleDay {
                day_name: Some("Monday".to_string()),
                hours: Some("6-20".to_string()),
            },
            RawScheduleDay {
                day_name: Some("Tuesday".to_string()),
                hours: Some("7-19".to_string()),
            },
        ];
        assert_eq!(hours_for(days, Weekday::Tue).as_deref(), Some("7-19"));
    }

    #[test]
    fn test_hours_unknown_day() {
        let days = vec![RawScheduleDay {
            day_name: None,
            hours: Some("6-20".to_string()),
        }];
        assert_eq!(hours_for(days, Weekday::Sun), None);
    }
}
