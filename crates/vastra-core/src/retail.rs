use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::Product;

/// Quantity bounds for a single retail purchase.
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 10;

/// Cart or checkout requested before both a color and a size were picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("select both a color and a size first")]
pub struct SelectionIncomplete;

/// What a completed retail action hands to the cart or checkout. Like an
/// order summary, this is terminal output; no cart state lives here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetailSummary {
    pub product: Product,
    pub color: String,
    pub size: String,
    pub quantity: u32,
    pub total_price: f64,
}

/// Color, size and quantity picks for one retail detail screen, owned by
/// that screen and discarded when it is left.
#[derive(Debug, Clone)]
pub struct RetailDraft {
    product: Product,
    color: Option<String>,
    size: Option<String>,
    quantity: u32,
}

impl RetailDraft {
    /// Nothing picked yet, quantity 1.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            color: None,
            size: None,
            quantity: MIN_QUANTITY,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Pick a color.
    ///
    /// Panics when `color` is not one of the product's colors.
    pub fn select_color(&mut self, color: &str) {
        assert!(
            self.product.colors.iter().any(|c| c == color),
            "select_color requires a color of the draft's product"
        );
        self.color = Some(color.to_string());
    }

    /// Pick a size.
    ///
    /// Panics when `size` is not one of the product's sizes.
    pub fn select_size(&mut self, size: &str) {
        assert!(
            self.product.sizes.iter().any(|s| s == size),
            "select_size requires a size of the draft's product"
        );
        self.size = Some(size.to_string());
    }

    /// Step the quantity. A step landing outside [1, 10] is rejected and
    /// leaves the quantity unchanged; the UI offers ±1 steps.
    pub fn change_quantity(&mut self, delta: i32) {
        let next = i64::from(self.quantity) + i64::from(delta);
        if (i64::from(MIN_QUANTITY)..=i64::from(MAX_QUANTITY)).contains(&next) {
            self.quantity = next as u32;
            debug!(quantity = self.quantity, "changed quantity");
        }
    }

    /// Whether both a color and a size have been picked.
    pub fn is_complete(&self) -> bool {
        self.color.is_some() && self.size.is_some()
    }

    /// Hand the current selection to the cart.
    pub fn add_to_cart(&self) -> Result<RetailSummary, SelectionIncomplete> {
        let summary = self.summary()?;
        info!(
            product_id = self.product.id,
            quantity = summary.quantity,
            "added to cart"
        );
        Ok(summary)
    }

    /// Hand the current selection straight to checkout.
    pub fn buy_now(&self) -> Result<RetailSummary, SelectionIncomplete> {
        let summary = self.summary()?;
        info!(
            product_id = self.product.id,
            quantity = summary.quantity,
            "buying now"
        );
        Ok(summary)
    }

    fn summary(&self) -> Result<RetailSummary, SelectionIncomplete> {
        let (Some(color), Some(size)) = (&self.color, &self.size) else {
            return Err(SelectionIncomplete);
        };
        Ok(RetailSummary {
            product: self.product.clone(),
            color: color.clone(),
            size: size.clone(),
            quantity: self.quantity,
            total_price: f64::from(self.quantity) * self.product.price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linen_shirt() -> Product {
        Product {
            id: 12,
            name: "Linen Shirt".into(),
            price: 1499.0,
            original_price: 2299.0,
            image: "/images/linen-shirt.jpg".into(),
            category: "Shirts".into(),
            colors: vec!["Natural".into(), "Sage".into()],
            sizes: vec!["S".into(), "M".into(), "L".into(), "XL".into()],
            description: "A linen shirt.".into(),
            is_new: true,
            is_best_seller: false,
            minimum_sets: None,
            wholesale_discount: None,
            stock_available: None,
            inventory_status: None,
            launch_date: None,
            arrival_date: None,
        }
    }

    #[test]
    fn test_quantity_steps_stay_in_bounds() {
        let mut draft = RetailDraft::new(linen_shirt());
        assert_eq!(draft.quantity(), 1);

        draft.change_quantity(-1);
        assert_eq!(draft.quantity(), 1);

        for _ in 0..12 {
            draft.change_quantity(1);
        }
        assert_eq!(draft.quantity(), 10);

        draft.change_quantity(1);
        assert_eq!(draft.quantity(), 10);

        draft.change_quantity(-1);
        assert_eq!(draft.quantity(), 9);
    }

    #[test]
    fn test_out_of_range_step_is_rejected_not_clamped() {
        let mut draft = RetailDraft::new(linen_shirt());
        for _ in 0..8 {
            draft.change_quantity(1);
        }
        assert_eq!(draft.quantity(), 9);

        // A +2 from 9 would land at 11, so nothing moves.
        draft.change_quantity(2);
        assert_eq!(draft.quantity(), 9);
    }

    #[test]
    fn test_cart_requires_complete_selection() {
        let mut draft = RetailDraft::new(linen_shirt());
        assert_eq!(draft.add_to_cart().unwrap_err(), SelectionIncomplete);

        draft.select_color("Natural");
        assert!(!draft.is_complete());
        assert_eq!(draft.add_to_cart().unwrap_err(), SelectionIncomplete);

        draft.select_size("M");
        assert!(draft.is_complete());
        assert!(draft.add_to_cart().is_ok());
    }

    #[test]
    fn test_buy_now_totals() {
        let mut draft = RetailDraft::new(linen_shirt());
        draft.select_color("Sage");
        draft.select_size("L");
        draft.change_quantity(2);

        let summary = draft.buy_now().unwrap();
        assert_eq!(summary.color, "Sage");
        assert_eq!(summary.size, "L");
        assert_eq!(summary.quantity, 3);
        assert_eq!(summary.total_price, 4497.0);
        assert_eq!(summary.product.id, 12);
    }

    #[test]
    #[should_panic(expected = "requires a size of the draft's product")]
    fn test_select_unknown_size_panics() {
        let mut draft = RetailDraft::new(linen_shirt());
        draft.select_size("XXS");
    }
}
