//! # Vending Machine
//!
//! The transaction coordinator: composes the slot ledger and the coin
//! reserve under explicit mutual-exclusion boundaries.
//!
//! ## Locking Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      VendingMachine Locks                               │
//! │                                                                         │
//! │  purchase_gate: Mutex<()>     ◄── one purchase in flight, machine-wide  │
//! │  slots:  Mutex<SlotLedger>    ◄── serializes slot reads/writes          │
//! │  reserve: Mutex<CoinReserve>  ◄── serializes coin reads/writes          │
//! │                                                                         │
//! │  buy_product():   gate ──► slots/reserve per step (slots before        │
//! │                   reserve where both are held)                          │
//! │  maintenance op:  the ONE component lock it needs, nothing else         │
//! │                                                                         │
//! │  ACCEPTED TRADE-OFF: a maintenance write racing an in-flight purchase  │
//! │  is serialized only at individual component-operation granularity,     │
//! │  not across the whole transaction. This is documented behavior, not    │
//! │  snapshot isolation. Purchases themselves are fully serialized.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Not RwLock?
//! Every operation is short and most mutate state. A RwLock would add
//! complexity with minimal benefit.

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use vendo_core::{CoinLevel, CoinReserve, CoreResult, Money, Product, SlotLedger};

use crate::error::PurchaseError;

/// Point-in-time view of the whole machine, for logging and the CLI.
///
/// Taken under both component locks (slots before reserve), so the two
/// halves are mutually consistent at the moment of capture.
#[derive(Debug, Clone, Serialize)]
pub struct MachineSnapshot {
    pub slot_capacity: usize,
    pub products: Vec<Product>,
    pub coins: Vec<CoinLevel>,
}

/// A self-service dispenser: per-slot product inventory and price plus a
/// per-denomination coin float, with purchase transactions that validate
/// payment, decrement stock, and pay exact change from the machine's own
/// reserve.
///
/// The machine is the only writer of both components; no other path may
/// mutate the ledger or the reserve.
#[derive(Debug)]
pub struct VendingMachine {
    /// Serializes whole purchase transactions. Held for steps 1-9 of
    /// `buy_product`; never held by maintenance operations.
    purchase_gate: Mutex<()>,

    slots: Mutex<SlotLedger>,
    reserve: Mutex<CoinReserve>,
}

impl VendingMachine {
    /// Creates a machine with the given slot capacity and supported coin
    /// denominations. All coin counts start at zero.
    ///
    /// ## Errors
    /// Fails fast on construction input:
    /// - `InvalidCapacity` for a capacity below 1
    /// - `EmptyDenominationSet` / `InvalidDenomination` for a bad coin set
    pub fn new(slot_capacity: usize, denominations: &[Money]) -> CoreResult<Self> {
        let slots = SlotLedger::new(slot_capacity)?;
        let reserve = CoinReserve::new(denominations)?;
        info!(
            slot_capacity,
            denominations = %format_coins(denominations),
            "vending machine created"
        );
        Ok(VendingMachine {
            purchase_gate: Mutex::new(()),
            slots: Mutex::new(slots),
            reserve: Mutex::new(reserve),
        })
    }

    // =========================================================================
    // Maintenance Operations (per-component lock only)
    // =========================================================================

    /// Adds a product at the next free slot; returns its index.
    pub fn add_product(&self, price: Option<Money>, inventory: i64) -> CoreResult<usize> {
        let slot = self.lock_slots().add_product(price, inventory)?;
        info!(slot, price = ?price.map(|p| p.to_string()), inventory, "product added to slot");
        Ok(slot)
    }

    /// Removes the product at the slot. Later slots shift down by one;
    /// callers must not reuse indices cached before the removal.
    pub fn remove_product(&self, slot: usize) -> CoreResult<Product> {
        let removed = self.lock_slots().remove_product(slot)?;
        info!(slot, "product removed from slot; later indices shifted down");
        Ok(removed)
    }

    /// Assigns the price of the product at the slot.
    pub fn set_price(&self, slot: usize, price: Money) -> CoreResult<()> {
        self.lock_slots().set_price(slot, price)?;
        info!(slot, %price, "product price updated");
        Ok(())
    }

    /// Replaces the inventory count of the product at the slot.
    pub fn set_inventory(&self, slot: usize, inventory: i64) -> CoreResult<()> {
        self.lock_slots().set_inventory(slot, inventory)?;
        info!(slot, inventory, "product inventory updated");
        Ok(())
    }

    /// Inventory count of the product at the slot.
    pub fn inventory(&self, slot: usize) -> CoreResult<i64> {
        self.lock_slots().inventory(slot)
    }

    /// Replaces the available count of a supported coin denomination.
    pub fn set_coin_count(&self, coin: Money, count: u64) -> CoreResult<()> {
        self.lock_reserve().set_available_count(coin, count)?;
        info!(%coin, count, "available coin count updated");
        Ok(())
    }

    /// Available count of a supported coin denomination.
    pub fn coin_count(&self, coin: Money) -> CoreResult<u64> {
        self.lock_reserve().available_count(coin)
    }

    // =========================================================================
    // Consumer Operations
    // =========================================================================

    /// Price of the product at the slot; `None` when not yet assigned.
    pub fn price(&self, slot: usize) -> CoreResult<Option<Money>> {
        self.lock_slots().price(slot)
    }

    /// Executes a purchase: validates the tendered coins, charges the
    /// product price, and returns the change combination.
    ///
    /// ## Critical Section
    /// The whole pipeline runs under the machine-wide purchase gate - at
    /// most one purchase is in flight at a time - in strict order:
    ///
    /// 1. reject empty tender (`CoinsRequired`)
    /// 2. reject unsupported coins (`UnsupportedCoin`)
    /// 3. reject empty slots (`OutOfStock`; bad index → `InvalidSlot`)
    /// 4. unpriced slot → operator log + opaque `Technical`
    /// 5. reject underpayment (`InsufficientPayment`)
    /// 6. compute change from the reserve (`InsufficientReserve` /
    ///    `ChangeUnavailable`); exact payment means empty change
    /// 7. decrement inventory by one
    /// 8. rebalance coins (credit tender, debit change); a failure here
    ///    rolls the inventory decrement back before propagating
    /// 9. return the change combination
    ///
    /// Steps 1-6 mutate nothing; steps 7-8 commit as an atomic pair.
    pub fn buy_product(
        &self,
        slot: usize,
        tendered: &[Money],
    ) -> Result<Vec<Money>, PurchaseError> {
        let _gate = self
            .purchase_gate
            .lock()
            .expect("purchase gate mutex poisoned");

        // 1. Coins are required
        if tendered.is_empty() {
            warn!(slot, "purchase rejected: no coins tendered");
            return Err(PurchaseError::CoinsRequired);
        }

        // 2. Every tendered coin must be a supported denomination
        if !self.lock_reserve().are_supported(tendered)? {
            warn!(slot, tendered = %format_coins(tendered), "purchase rejected: unsupported coin tendered");
            return Err(PurchaseError::UnsupportedCoin);
        }

        // 3. The slot must hold stock
        let inventory = self.lock_slots().inventory(slot)?;
        if inventory < 1 {
            warn!(slot, "purchase rejected: out of stock");
            return Err(PurchaseError::OutOfStock { slot });
        }

        // 4. The slot must be priced (maintainer fault otherwise)
        let price = match self.lock_slots().price(slot)? {
            Some(price) => price,
            None => {
                return Err(vendo_core::CoreError::PriceNotSet { slot }.into());
            }
        };

        // 5. The tendered sum must cover the price
        let tendered_sum: Money = tendered.iter().sum();
        if tendered_sum < price {
            warn!(slot, %tendered_sum, %price, "purchase rejected: insufficient payment");
            return Err(PurchaseError::InsufficientPayment {
                tendered: tendered_sum,
                price,
            });
        }

        // 6. Compute change (read-only); exact payment needs none
        let change = if tendered_sum > price {
            self.lock_reserve()
                .change_combination(tendered_sum - price)?
        } else {
            Vec::new()
        };

        // 7 + 8. Commit: both component locks held, slots before reserve,
        // so the pair is atomic with respect to every other machine user
        let mut slots = self.lock_slots();
        let mut reserve = self.lock_reserve();

        slots.set_inventory(slot, inventory - 1)?;
        if let Err(cause) = reserve.apply_balance(tendered, &change) {
            // Roll the inventory decrement back before propagating. The
            // slots lock was never released, so this restore cannot fail
            // unless the ledger itself is broken.
            if let Err(restore) = slots.set_inventory(slot, inventory) {
                error!(slot, %cause, %restore, "purchase rollback failed");
                return Err(PurchaseError::Technical);
            }
            warn!(slot, %cause, "purchase aborted during coin rebalancing; inventory restored");
            return Err(cause.into());
        }

        info!(
            slot,
            %price,
            %tendered_sum,
            change = %format_coins(&change),
            "purchase complete"
        );
        debug!(slot, inventory = inventory - 1, "inventory after purchase");

        // 9. Hand the change to the buyer
        Ok(change)
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Captures a mutually consistent view of slots and reserve.
    pub fn snapshot(&self) -> MachineSnapshot {
        let slots = self.lock_slots();
        let reserve = self.lock_reserve();
        MachineSnapshot {
            slot_capacity: slots.capacity(),
            products: slots.products().to_vec(),
            coins: reserve.levels(),
        }
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn lock_slots(&self) -> MutexGuard<'_, SlotLedger> {
        self.slots.lock().expect("slot ledger mutex poisoned")
    }

    fn lock_reserve(&self) -> MutexGuard<'_, CoinReserve> {
        self.reserve.lock().expect("coin reserve mutex poisoned")
    }
}

/// Compact coin-list rendering for log lines, e.g. `[1.00, 0.20]`.
fn format_coins(coins: &[Money]) -> String {
    let rendered: Vec<String> = coins.iter().map(Money::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(cents: i64) -> Money {
        Money::from_cents(cents)
    }

    fn machine() -> VendingMachine {
        VendingMachine::new(10, &[coin(10), coin(20), coin(50), coin(100)]).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_construction_input() {
        assert!(VendingMachine::new(0, &[coin(10)]).is_err());
        assert!(VendingMachine::new(10, &[]).is_err());
    }

    #[test]
    fn test_maintenance_round_trip() {
        let machine = machine();
        let slot = machine.add_product(Some(coin(100)), 2).unwrap();

        assert_eq!(machine.price(slot).unwrap(), Some(coin(100)));
        assert_eq!(machine.inventory(slot).unwrap(), 2);

        machine.set_price(slot, coin(150)).unwrap();
        machine.set_inventory(slot, 5).unwrap();
        assert_eq!(machine.price(slot).unwrap(), Some(coin(150)));
        assert_eq!(machine.inventory(slot).unwrap(), 5);

        machine.set_coin_count(coin(50), 7).unwrap();
        assert_eq!(machine.coin_count(coin(50)).unwrap(), 7);
    }

    #[test]
    fn test_remove_product_shifts_indices() {
        let machine = machine();
        machine.add_product(Some(coin(100)), 1).unwrap();
        machine.add_product(Some(coin(200)), 2).unwrap();

        machine.remove_product(0).unwrap();
        assert_eq!(machine.price(0).unwrap(), Some(coin(200)));
        assert!(machine.price(1).is_err());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let machine = machine();
        machine.add_product(Some(coin(100)), 3).unwrap();
        machine.set_coin_count(coin(20), 4).unwrap();

        let snapshot = machine.snapshot();
        assert_eq!(snapshot.slot_capacity, 10);
        assert_eq!(snapshot.products.len(), 1);
        assert_eq!(snapshot.products[0].inventory, 3);
        let level = snapshot
            .coins
            .iter()
            .find(|level| level.denomination == coin(20))
            .unwrap();
        assert_eq!(level.count, 4);
    }
}
