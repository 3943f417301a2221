use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sets required for a wholesale or pre-order when a product does not
/// carry its own threshold.
pub const DEFAULT_MINIMUM_SETS: u32 = 3;

/// A catalog product record. Catalog data is external and read-only; the
/// serialized form is the camelCase JSON the catalogs ship with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub original_price: f64,
    pub image: String,
    pub category: String,
    /// Non-empty, in display order.
    pub colors: Vec<String>,
    /// Non-empty, fixed per product (canonically S, M, L, XL).
    pub sizes: Vec<String>,
    pub description: String,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_sets: Option<u32>,
    /// Display-only; totals always derive from `price` and
    /// `original_price` directly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wholesale_discount: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_available: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_date: Option<String>,
}

impl Product {
    /// Sets required to place an order for this product.
    pub fn minimum_sets(&self) -> u32 {
        self.minimum_sets.unwrap_or(DEFAULT_MINIMUM_SETS)
    }

    /// Pieces in one set: one garment per size.
    pub fn pieces_per_set(&self) -> u32 {
        self.sizes.len() as u32
    }

    /// Per-piece saving against the pre-discount price.
    pub fn savings_per_piece(&self) -> f64 {
        self.original_price - self.price
    }

    /// Whole days from `today` until the launch date. `None` when the
    /// product has no launch date or the date does not parse.
    pub fn days_until_launch(&self, today: NaiveDate) -> Option<i64> {
        let launch = NaiveDate::parse_from_str(self.launch_date.as_deref()?, "%Y-%m-%d").ok()?;
        Some((launch - today).num_days())
    }
}
