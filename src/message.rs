//! Post message formatting.
//!
//! Builds the plain-text body of a Facebook post from a listing: one emoji-prefixed
//! line per populated field in a fixed order, an optional details block drawn from
//! an allow-list of feature keys, and a trailing link back to the listing.

use serde_json::Number;

use crate::listing::{scalar_to_string, ListingPayload};

/// Detail keys rendered in the details block, in display order.
pub const FEATURE_KEYS: [&str; 10] = [
    "model_name",
    "manufacture_year",
    "sub_category",
    "employment_type",
    "company",
    "fuel_type",
    "transmission",
    "engine_capacity_cc",
    "colour",
    "mileage_km",
];

/// Builds the post message for a listing.
///
/// Absent optional fields produce no line at all. The price line is only emitted
/// when the listing carried a numeric price.
///
/// # Example
///
/// ```rust
/// use facebook_poster::{build_message, ListingPayload};
///
/// let listing = ListingPayload {
///     listing_id: 1,
///     title: "Car".to_string(),
///     price: Some(1_500_000.into()),
///     ..Default::default()
/// };
/// assert_eq!(build_message(&listing), "📣 Car\n💰 Price: LKR 1,500,000");
/// ```
pub fn build_message(listing: &ListingPayload) -> String {
    let mut lines = Vec::new();

    if !listing.title.is_empty() {
        lines.push(format!("📣 {}", listing.title));
    }
    if let Some(category) = &listing.category {
        lines.push(format!("🏷️ Category: {}", category));
    }
    if let Some(location) = &listing.location {
        lines.push(format!("📍 Location: {}", location));
    }
    if let Some(price) = format_price(listing.price.as_ref()) {
        lines.push(format!("💰 Price: LKR {}", price));
    }
    if let Some(phone) = &listing.phone {
        lines.push(format!("☎️ Contact: {}", phone));
    }
    if let Some(seller) = &listing.seller_name {
        lines.push(format!("👤 Seller: {}", seller));
    }

    let features: Vec<String> = FEATURE_KEYS
        .iter()
        .filter_map(|key| {
            let value = listing.details.get(*key).and_then(scalar_to_string)?;
            if value.trim().is_empty() {
                return None;
            }
            Some(format!("- {}: {}", feature_label(key), value))
        })
        .collect();
    if !features.is_empty() {
        lines.push("🔹 Details:".to_string());
        lines.extend(features);
    }

    if let Some(src) = &listing.source_listing_url {
        lines.push(format!("🔗 View more: {}", src));
    }

    lines.join("\n")
}

/// Formats a price as a whole number with thousands separators.
///
/// Integer prices are rendered exactly; fractional prices are truncated toward
/// zero. Returns `None` when there is no price, so callers can omit the price
/// entirely.
pub fn format_price(price: Option<&Number>) -> Option<String> {
    let price = price?;
    let digits = if let Some(n) = price.as_i64() {
        n.to_string()
    } else if let Some(n) = price.as_u64() {
        n.to_string()
    } else {
        let truncated = price.as_f64().filter(|f| f.is_finite())?.trunc();
        if truncated == 0.0 {
            "0".to_string()
        } else {
            format!("{:.0}", truncated)
        }
    };
    Some(group_thousands(&digits))
}

/// Inserts `,` between groups of three digits in an optionally signed integer string.
fn group_thousands(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let mut grouped = String::with_capacity(number.len() + digits.len() / 3);
    grouped.push_str(sign);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Turns a snake_case key into a title-cased label, e.g. `fuel_type` -> `Fuel Type`.
pub fn feature_label(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
