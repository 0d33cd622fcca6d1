use serde::{Deserialize, Serialize};

/// Display price used when a game costs nothing
pub const FREE_PRICE: &str = "Free";

/// Display price used when the live price could not be determined
pub const UNKNOWN_PRICE: &str = "Unknown";

/// Developer name used in fallback records
pub const UNKNOWN_DEVELOPER: &str = "Unknown Developer";

/// Raw fields returned by the store-metadata scraper for one app page
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawAppData {
    /// App title as shown on the store page
    #[serde(default)]
    pub title: String,

    /// Icon image URL
    #[serde(default)]
    pub icon: String,

    /// Developer/studio name
    #[serde(default)]
    pub developer: String,

    /// Star rating (0.0-5.0)
    #[serde(default)]
    pub score: f64,

    /// Number of user reviews
    #[serde(default)]
    pub reviews: u64,

    /// Numeric price in the store currency
    #[serde(default)]
    pub price: f64,

    /// Pre-formatted price string ("Free", "$4.99", ...)
    #[serde(default)]
    pub price_text: Option<String>,

    /// Whether the store marks the app as free
    #[serde(default)]
    pub free: bool,

    /// Numeric pre-sale price, present only during a sale
    #[serde(default)]
    pub original_price: Option<f64>,

    /// Pre-formatted pre-sale price string
    #[serde(default)]
    pub original_price_text: Option<String>,

    /// Whether the store marks the app as on sale
    #[serde(default)]
    pub sale: bool,
}

/// Normalized, display-ready game metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    /// Game title
    pub title: String,

    /// Icon/cover image URL
    pub image_url: String,

    /// Developer/studio name
    pub developer: String,

    /// Star rating (0.0-5.0)
    pub rating: f64,

    /// Number of user reviews
    pub review_count: u64,

    /// Display price ("Free", "$4.99", ...)
    pub price: String,

    /// Pre-sale display price, present only when discounted
    pub original_price: Option<String>,

    /// Discount percentage computed from numeric prices
    pub discount_percent: i64,

    /// Store page URL the metadata was resolved from
    pub store_url: String,
}

impl GameInfo {
    /// Create a GameInfo with required fields, price defaulting to free
    pub fn new(
        title: impl Into<String>,
        image_url: impl Into<String>,
        store_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            image_url: image_url.into(),
            developer: String::new(),
            rating: 0.0,
            review_count: 0,
            price: FREE_PRICE.to_string(),
            original_price: None,
            discount_percent: 0,
            store_url: store_url.into(),
        }
    }

    /// Whether the game is free of charge
    pub fn is_free(&self) -> bool {
        self.price == FREE_PRICE
    }

    /// Whether the game is currently discounted
    pub fn is_discounted(&self) -> bool {
        self.original_price.is_some()
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_info_creation() {
        let info = GameInfo::new(
            "Super Game",
            "https://img.example/icon.png",
            "https://play.google.com/store/apps/details?id=com.example.supergame",
        );
        assert_eq!(info.title, "Super Game");
        assert!(info.is_free());
        assert!(!info.is_discounted());
        assert_eq!(info.discount_percent, 0);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let info = GameInfo::new("G", "i", "u");
        let json = info.to_json().unwrap();
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"reviewCount\""));
        assert!(json.contains("\"discountPercent\""));
        assert!(json.contains("\"storeUrl\""));
    }

    #[test]
    fn test_raw_app_data_partial_json() {
        // Scraper output often omits sale fields entirely
        let raw: RawAppData =
            serde_json::from_str(r#"{"title":"G","priceText":"$4.99","price":4.99}"#).unwrap();
        assert_eq!(raw.title, "G");
        assert_eq!(raw.price_text.as_deref(), Some("$4.99"));
        assert!(raw.original_price.is_none());
        assert!(!raw.sale);
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut info = GameInfo::new("CS2", "icon", "url");
        info.price = "$4.99".to_string();
        info.original_price = Some("$9.99".to_string());
        info.discount_percent = 50;

        let json = info.to_json().unwrap();
        let back = GameInfo::from_json(&json).unwrap();
        assert_eq!(info, back);
    }
}
