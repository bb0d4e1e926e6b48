//! # Product Type
//!
//! A product occupying one slot of the machine.
//!
//! Identity is the slot position, not a stable key: removing a product
//! compacts the slot array, so callers must not cache indices across
//! removals.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A product held in one slot: a price (possibly not yet assigned) and an
/// inventory count.
///
/// ## Price Lifecycle
/// A product can be stocked before its price is entered. Until the price is
/// set, the slot can be seen and restocked by maintenance but cannot be
/// sold; the purchase pipeline surfaces this as a technical error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Price per unit; `None` until maintenance assigns one.
    pub price: Option<Money>,

    /// Units available in the slot. Never negative.
    pub inventory: i64,
}

impl Product {
    /// Creates a product with the given price and starting inventory.
    pub fn new(price: Option<Money>, inventory: i64) -> Self {
        Product { price, inventory }
    }

    /// Whether maintenance has assigned a price yet.
    #[inline]
    pub fn is_priced(&self) -> bool {
        self.price.is_some()
    }

    /// Whether at least one unit can be dispensed.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.inventory >= 1
    }
}
