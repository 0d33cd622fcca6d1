//! Turns raw scraper fields into display-ready [`GameInfo`].

use crate::core::{GameInfo, RawAppData, FREE_PRICE, UNKNOWN_DEVELOPER, UNKNOWN_PRICE};

fn format_amount(amount: f64) -> String {
    format!("{}", amount)
}

/// Normalize raw scraper output into a [`GameInfo`].
///
/// Price resolution order: a pre-formatted price text wins (the literal
/// `"Free"` maps to the free marker), then a non-zero numeric price, else
/// the game is free of charge. A discount is only reported when an
/// original price exists, differs from the current price, and the current
/// price is non-zero; the percentage is the unclamped rounded formula.
pub fn normalize(raw: &RawAppData, store_url: &str) -> GameInfo {
    let price = match &raw.price_text {
        Some(text) if text == FREE_PRICE => FREE_PRICE.to_string(),
        Some(text) => text.clone(),
        None if raw.price != 0.0 => format_amount(raw.price),
        None => FREE_PRICE.to_string(),
    };

    let mut original_price = None;
    let mut discount_percent = 0i64;

    if let Some(orig) = raw.original_price {
        if orig != raw.price && raw.price != 0.0 {
            original_price = Some(
                raw.original_price_text
                    .clone()
                    .unwrap_or_else(|| format_amount(orig)),
            );
            if orig > 0.0 && raw.price > 0.0 {
                discount_percent = (((orig - raw.price) / orig) * 100.0).round() as i64;
            }
        }
    }

    GameInfo {
        title: raw.title.clone(),
        image_url: raw.icon.clone(),
        developer: raw.developer.clone(),
        rating: raw.score,
        review_count: raw.reviews,
        price,
        original_price,
        discount_percent,
        store_url: store_url.to_string(),
    }
}

/// Derive a human-readable title from a package id: dots become spaces,
/// a space is inserted before each capital, runs of spaces collapse.
pub fn humanize_package_id(package_id: &str) -> String {
    let mut expanded = String::with_capacity(package_id.len() + 8);
    for c in package_id.chars() {
        if c == '.' {
            expanded.push(' ');
        } else if c.is_ascii_uppercase() {
            expanded.push(' ');
            expanded.push(c);
        } else {
            expanded.push(c);
        }
    }
    expanded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Best-effort record returned when live lookup failed for non-rate-limit
/// reasons. Keeps the API contract non-failing: synthesized title, unknown
/// developer and price, zeroed rating and reviews.
pub fn fallback_info(package_id: &str, store_url: &str) -> GameInfo {
    GameInfo {
        title: humanize_package_id(package_id),
        image_url: format!("https://play.google.com/store/apps/details?id={}", package_id),
        developer: UNKNOWN_DEVELOPER.to_string(),
        rating: 0.0,
        review_count: 0,
        price: UNKNOWN_PRICE.to_string(),
        original_price: None,
        discount_percent: 0,
        store_url: store_url.to_string(),
    }
}
