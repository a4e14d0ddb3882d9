//! Listing payload model.
//!
//! Listings arrive as loosely typed JSON from the marketplace backend. This module
//! turns the raw JSON into a `ListingPayload` with the same lenient rules the
//! endpoint has always applied: scalars are stringified, falsy values (`null`,
//! `false`, zero, empty strings and containers) mean absent, a non-list `images`
//! value becomes an empty list, and only real JSON numbers count as a price.

use serde_json::{Map, Number, Value};
use std::fmt;

/// A listing submitted for publishing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPayload {
    /// Marketplace listing id; a positive value is required
    pub listing_id: i64,
    /// Listing title, trimmed; must be non-empty
    pub title: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub seller_name: Option<String>,
    /// Price in LKR as submitted, only set when the payload carried a JSON number
    pub price: Option<Number>,
    /// Link back to the listing on the marketplace
    pub source_listing_url: Option<String>,
    /// Image URLs in submission order
    pub images: Vec<String>,
    /// Free-form feature map; only an allow-list of keys is ever rendered
    pub details: Map<String, Value>,
}

/// Reasons a request body cannot become a `ListingPayload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    /// The body is not JSON, or is JSON but not an object
    InvalidJson,
    /// `listing_id` is not positive or `title` is blank
    MissingRequiredFields,
}

impl ListingError {
    /// Message returned to the caller in the `error` field.
    pub fn message(&self) -> &'static str {
        match self {
            ListingError::InvalidJson => "Invalid JSON",
            ListingError::MissingRequiredFields => "listing_id and title required",
        }
    }
}

impl fmt::Display for ListingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ListingError {}

impl ListingPayload {
    /// Parses and validates a raw request body.
    ///
    /// # Returns
    ///
    /// - `Ok(ListingPayload)`: If the body is a JSON object with a positive `listing_id` and a non-blank `title`
    /// - `Err(ListingError::InvalidJson)`: If the body is not a JSON object (`null` is treated as `{}`)
    /// - `Err(ListingError::MissingRequiredFields)`: If `listing_id` or `title` is missing or invalid
    pub fn from_json_bytes(body: &[u8]) -> Result<Self, ListingError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| ListingError::InvalidJson)?;
        Self::from_value(&value)
    }

    /// Builds a payload from an already parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, ListingError> {
        let empty = Map::new();
        let obj = match value {
            Value::Object(obj) => obj,
            Value::Null => &empty,
            _ => return Err(ListingError::InvalidJson),
        };

        let listing_id = obj.get("listing_id").map(coerce_listing_id).unwrap_or(0);
        let title = text_field(obj, "title").unwrap_or_default();
        if listing_id <= 0 || title.is_empty() {
            return Err(ListingError::MissingRequiredFields);
        }

        let images = match obj.get("images") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };

        let details = match obj.get("details") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };

        let source_listing_url = obj
            .get("source_listing_url")
            .filter(|v| !is_falsy(v))
            .and_then(scalar_to_string);

        let price = match obj.get("price") {
            Some(Value::Number(n)) => Some(n.clone()),
            _ => None,
        };

        Ok(ListingPayload {
            listing_id,
            title,
            category: text_field(obj, "category"),
            location: text_field(obj, "location"),
            phone: text_field(obj, "phone"),
            seller_name: text_field(obj, "seller_name"),
            price,
            source_listing_url,
            images,
            details,
        })
    }
}

/// Renders a JSON scalar the way it should appear in post text.
///
/// Strings are used verbatim, numbers use their JSON spelling, booleans read
/// `True`/`False`, and `null` is treated as absent. Arrays and objects fall back to
/// compact JSON.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        other => Some(other.to_string()),
    }
}

/// Values that count as "not provided" for text fields.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// A trimmed text field, absent when missing, falsy, or blank.
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .filter(|v| !is_falsy(v))
        .and_then(scalar_to_string)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Accepts integers, integral floats and numeric strings; everything else is 0.
fn coerce_listing_id(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_payload_parses() {
        let listing = ListingPayload::from_value(&json!({"listing_id": 7, "title": "  Car  "})).unwrap();
        assert_eq!(listing.listing_id, 7);
        assert_eq!(listing.title, "Car");
        assert!(listing.images.is_empty());
        assert!(listing.details.is_empty());
        assert_eq!(listing.price, None);
    }

    #[test]
    fn test_missing_or_invalid_required_fields_are_rejected() {
        let cases = [
            json!({"title": "Car"}),
            json!({"listing_id": 0, "title": "Car"}),
            json!({"listing_id": -3, "title": "Car"}),
            json!({"listing_id": "abc", "title": "Car"}),
            json!({"listing_id": 5}),
            json!({"listing_id": 5, "title": "   "}),
            json!({"listing_id": 5, "title": null}),
            Value::Null,
        ];
        for case in cases {
            assert_eq!(
                ListingPayload::from_value(&case),
                Err(ListingError::MissingRequiredFields),
                "payload {} should be rejected",
                case
            );
        }
    }

    #[test]
    fn test_non_object_bodies_are_invalid_json() {
        assert_eq!(
            ListingPayload::from_json_bytes(b"not json"),
            Err(ListingError::InvalidJson)
        );
        assert_eq!(
            ListingPayload::from_json_bytes(b"[1, 2, 3]"),
            Err(ListingError::InvalidJson)
        );
        assert_eq!(
            ListingPayload::from_json_bytes(b"null"),
            Err(ListingError::MissingRequiredFields)
        );
    }

    #[test]
    fn test_listing_id_accepts_numeric_strings() {
        let listing =
            ListingPayload::from_value(&json!({"listing_id": " 42 ", "title": "Bike"})).unwrap();
        assert_eq!(listing.listing_id, 42);
    }

    #[test]
    fn test_non_list_images_become_empty() {
        let listing = ListingPayload::from_value(
            &json!({"listing_id": 1, "title": "Bike", "images": "https://x/a.jpg"}),
        )
        .unwrap();
        assert!(listing.images.is_empty());
    }

    #[test]
    fn test_only_json_numbers_count_as_price() {
        let numeric =
            ListingPayload::from_value(&json!({"listing_id": 1, "title": "A", "price": 2500.75}))
                .unwrap();
        assert_eq!(numeric.price.and_then(|n| n.as_f64()), Some(2500.75));

        let text =
            ListingPayload::from_value(&json!({"listing_id": 1, "title": "A", "price": "2500"}))
                .unwrap();
        assert_eq!(text.price, None);

        let boolean =
            ListingPayload::from_value(&json!({"listing_id": 1, "title": "A", "price": true}))
                .unwrap();
        assert_eq!(boolean.price, None);
    }

    #[test]
    fn test_scalar_fields_are_stringified() {
        let listing = ListingPayload::from_value(
            &json!({"listing_id": 1, "title": 2020, "phone": 771234567, "category": ""}),
        )
        .unwrap();
        assert_eq!(listing.title, "2020");
        assert_eq!(listing.phone.as_deref(), Some("771234567"));
        assert_eq!(listing.category, None);
    }

    #[test]
    fn test_large_integer_price_is_kept_exactly() {
        let listing = ListingPayload::from_json_bytes(
            br#"{"listing_id": 1, "title": "A", "price": 9007199254740993}"#,
        )
        .unwrap();
        assert_eq!(listing.price.and_then(|n| n.as_i64()), Some(9007199254740993));
    }

    #[test]
    fn test_falsy_scalars_count_as_blank() {
        for title in [json!(0), json!(false), json!(0.0), json!([]), json!({})] {
            assert_eq!(
                ListingPayload::from_value(&json!({"listing_id": 1, "title": title.clone()})),
                Err(ListingError::MissingRequiredFields),
                "title {} should count as blank",
                title
            );
        }

        let listing = ListingPayload::from_value(&json!({
            "listing_id": 1,
            "title": true,
            "phone": 0,
            "seller_name": false,
            "source_listing_url": 0
        }))
        .unwrap();
        assert_eq!(listing.title, "True");
        assert_eq!(listing.phone, None);
        assert_eq!(listing.seller_name, None);
        assert_eq!(listing.source_listing_url, None);
    }

    #[test]
    fn test_booleans_render_capitalized() {
        assert_eq!(scalar_to_string(&json!(true)).as_deref(), Some("True"));
        assert_eq!(scalar_to_string(&json!(false)).as_deref(), Some("False"));
        assert_eq!(scalar_to_string(&json!(0)).as_deref(), Some("0"));
    }

    #[test]
    fn test_non_string_image_entries_are_dropped() {
        let listing = ListingPayload::from_value(
            &json!({"listing_id": 1, "title": "Bike", "images": ["https://a", 5, null]}),
        )
        .unwrap();
        assert_eq!(listing.images, vec!["https://a".to_string()]);
    }
}
