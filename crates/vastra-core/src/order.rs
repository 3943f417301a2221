use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::Product;

/// One color row of a draft: how many sets of that color are selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSets {
    pub color: String,
    pub sets: u32,
}

/// Placing an order below the product's minimum. A user error, not a
/// defect; the message names the shortfall for display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("minimum {required} sets required, {selected} selected")]
pub struct BelowMinimum {
    pub required: u32,
    pub selected: u32,
}

/// One line of a placed order; only colors with sets > 0 appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub color: String,
    pub sets: u32,
    pub pieces: u32,
}

/// Terminal output of a placed order, handed to whatever fulfils it.
/// The calculator keeps no record of it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub product: Product,
    pub lines: Vec<OrderLine>,
    pub total_sets: u32,
    pub total_pieces: u32,
    pub total_price: f64,
    pub total_savings: f64,
}

/// Per-color set selection for one product, owned by one detail screen
/// and discarded when the screen is left.
///
/// Totals are derived on every call; the draft caches no numbers and no
/// eligibility flag. Eligibility follows from the totals alone: a draft
/// is placeable once the selected sets reach the product's minimum.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    product: Product,
    selections: Vec<ColorSets>,
}

impl OrderDraft {
    /// One zeroed selection per product color, in the product's order.
    pub fn new(product: Product) -> Self {
        let selections = product
            .colors
            .iter()
            .map(|color| ColorSets {
                color: color.clone(),
                sets: 0,
            })
            .collect();
        Self {
            product,
            selections,
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn selections(&self) -> &[ColorSets] {
        &self.selections
    }

    /// Selected sets for one color.
    ///
    /// Panics when `color` is not one of the product's colors.
    pub fn sets(&self, color: &str) -> u32 {
        self.selections
            .iter()
            .find(|s| s.color == color)
            .map(|s| s.sets)
            .expect("sets requires a color of the draft's product")
    }

    /// Step one color's count by `delta`, flooring at zero. The only
    /// mutator; the UI offers ±1 steps and no absolute-set operation.
    ///
    /// Panics when `color` is not one of the product's colors.
    pub fn change_sets(&mut self, color: &str, delta: i32) {
        let selection = self
            .selections
            .iter_mut()
            .find(|s| s.color == color)
            .expect("change_sets requires a color of the draft's product");
        let next = i64::from(selection.sets) + i64::from(delta);
        selection.sets = next.clamp(0, i64::from(u32::MAX)) as u32;
        debug!(color, delta, sets = selection.sets, "changed set count");
    }

    /// Sum of selected sets across all colors.
    pub fn total_sets(&self) -> u32 {
        self.selections.iter().map(|s| s.sets).sum()
    }

    /// Total garments: selected sets × pieces per set (one per size).
    pub fn total_pieces(&self) -> u32 {
        self.total_sets() * self.product.pieces_per_set()
    }

    /// Payable amount at the discounted unit price.
    pub fn total_price(&self) -> f64 {
        f64::from(self.total_pieces()) * self.product.price
    }

    /// Saving against the pre-discount price. The wholesale discount
    /// percent on the record never enters this figure; the discount is
    /// already baked into `price`.
    pub fn total_savings(&self) -> f64 {
        f64::from(self.total_pieces()) * self.product.savings_per_piece()
    }

    /// Sets required before this draft can be placed.
    pub fn minimum_sets(&self) -> u32 {
        self.product.minimum_sets()
    }

    /// Whether the draft meets the product's minimum-sets threshold.
    pub fn can_place_order(&self) -> bool {
        self.total_sets() >= self.product.minimum_sets()
    }

    /// Turn the draft into an order summary.
    ///
    /// Below the minimum nothing happens: the draft is unchanged and the
    /// returned error carries the required and selected counts.
    pub fn place_order(&self) -> Result<OrderSummary, BelowMinimum> {
        let total_sets = self.total_sets();
        let required = self.product.minimum_sets();
        if total_sets < required {
            info!(
                product_id = self.product.id,
                required,
                selected = total_sets,
                "order below minimum"
            );
            return Err(BelowMinimum {
                required,
                selected: total_sets,
            });
        }

        let pieces_per_set = self.product.pieces_per_set();
        let lines = self
            .selections
            .iter()
            .filter(|s| s.sets > 0)
            .map(|s| OrderLine {
                color: s.color.clone(),
                sets: s.sets,
                pieces: s.sets * pieces_per_set,
            })
            .collect();

        let summary = OrderSummary {
            product: self.product.clone(),
            lines,
            total_sets,
            total_pieces: self.total_pieces(),
            total_price: self.total_price(),
            total_savings: self.total_savings(),
        };
        info!(
            product_id = self.product.id,
            total_sets,
            total_pieces = summary.total_pieces,
            "order placed"
        );
        Ok(summary)
    }
}
