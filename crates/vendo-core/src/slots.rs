//! # Slot Ledger
//!
//! Owns the fixed-capacity array of product slots.
//!
//! ## Invariants
//! - `slots.len() <= capacity` always; capacity is fixed at construction
//! - A slot index is valid iff `index < slots.len()`
//! - Inventory counts never go negative
//!
//! ## Index Instability
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Removal compacts the array:                                            │
//! │                                                                         │
//! │    slots: [ A ][ B ][ C ][ D ]        remove_product(1)                 │
//! │              0    1    2    3   ──────────────────────►                 │
//! │    slots: [ A ][ C ][ D ]                                               │
//! │              0    1    2                                                │
//! │                                                                         │
//! │  C and D shift down. Callers must NOT cache indices across removals.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The ledger has no locking of its own. The machine layer serializes
//! access; on its own this type is a plain, fully testable value.

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::Product;
use crate::validation::{validate_capacity, validate_inventory, validate_price};

/// Fixed-capacity, compacting sequence of product slots.
#[derive(Debug, Clone, Serialize)]
pub struct SlotLedger {
    /// Maximum number of slots; fixed at construction, never changes.
    capacity: usize,

    /// Occupied slots, dense from index 0.
    slots: Vec<Product>,
}

impl SlotLedger {
    /// Creates an empty ledger with the given slot capacity.
    ///
    /// Fails with `InvalidCapacity` for a capacity below 1.
    pub fn new(capacity: usize) -> CoreResult<Self> {
        validate_capacity(capacity)?;
        Ok(SlotLedger {
            capacity,
            slots: Vec::with_capacity(capacity),
        })
    }

    /// Maximum number of product slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Read-only view of the occupied slots, for snapshots and logging.
    #[inline]
    pub fn products(&self) -> &[Product] {
        &self.slots
    }

    // =========================================================================
    // Maintenance Operations
    // =========================================================================

    /// Appends a product at the next free slot and returns its index.
    ///
    /// ## Errors
    /// - `CapacityExceeded` when every slot is occupied
    /// - `InvalidPrice` when a negative price is supplied
    /// - `InvalidInventorySize` when a negative inventory is supplied
    pub fn add_product(&mut self, price: Option<Money>, inventory: i64) -> CoreResult<usize> {
        if self.slots.len() + 1 > self.capacity {
            return Err(CoreError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        if let Some(price) = price {
            validate_price(price)?;
        }
        validate_inventory(inventory)?;

        self.slots.push(Product::new(price, inventory));
        Ok(self.slots.len() - 1)
    }

    /// Removes the product at the slot, shifting later slots down by one.
    ///
    /// Returns the removed product. Indices held by callers for later slots
    /// are invalidated.
    pub fn remove_product(&mut self, slot: usize) -> CoreResult<Product> {
        self.check_slot(slot)?;
        Ok(self.slots.remove(slot))
    }

    /// Assigns the price of the product at the slot.
    ///
    /// ## Errors
    /// - `InvalidSlot` on an out-of-range index
    /// - `InvalidPrice` on a negative price
    pub fn set_price(&mut self, slot: usize, price: Money) -> CoreResult<()> {
        self.check_slot(slot)?;
        validate_price(price)?;
        self.slots[slot].price = Some(price);
        Ok(())
    }

    /// Replaces the inventory count of the product at the slot.
    ///
    /// ## Errors (in check order)
    /// - `InvalidSlot` on an out-of-range index
    /// - `PriceNotSet` when the slot has no price yet - a slot must be
    ///   sellable before its stock level is managed
    /// - `InvalidInventorySize` on a negative count
    pub fn set_inventory(&mut self, slot: usize, inventory: i64) -> CoreResult<()> {
        self.check_slot(slot)?;
        if !self.slots[slot].is_priced() {
            return Err(CoreError::PriceNotSet { slot });
        }
        validate_inventory(inventory)?;
        self.slots[slot].inventory = inventory;
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Price of the product at the slot; `None` when not yet assigned.
    pub fn price(&self, slot: usize) -> CoreResult<Option<Money>> {
        self.check_slot(slot)?;
        Ok(self.slots[slot].price)
    }

    /// Inventory count of the product at the slot.
    pub fn inventory(&self, slot: usize) -> CoreResult<i64> {
        self.check_slot(slot)?;
        Ok(self.slots[slot].inventory)
    }

    /// The product at the slot.
    pub fn product(&self, slot: usize) -> CoreResult<&Product> {
        self.check_slot(slot)?;
        Ok(&self.slots[slot])
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn check_slot(&self, slot: usize) -> CoreResult<()> {
        // len() <= capacity holds, so one bound check covers both
        if slot >= self.slots.len() {
            return Err(CoreError::InvalidSlot {
                index: slot,
                occupied: self.slots.len(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
