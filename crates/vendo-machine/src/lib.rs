//! # vendo-machine: Transaction Coordinator for Vendo
//!
//! Wraps the pure bookkeeping of `vendo-core` in explicit mutual-exclusion
//! boundaries and exposes the two operation surfaces of the machine:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        VendingMachine                                   │
//! │                                                                         │
//! │  Maintainer surface                Consumer surface                     │
//! │  ──────────────────                ────────────────                     │
//! │  add_product / remove_product      price                                │
//! │  set_price / set_inventory         buy_product ──► change combination  │
//! │  inventory                                                              │
//! │  set_coin_count / coin_count                                            │
//! │                                                                         │
//! │  buy_product runs under a machine-wide purchase gate: validate ──►     │
//! │  compute change ──► commit inventory + coin rebalancing atomically.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Consumer-facing failures are typed ([`PurchaseError`]); maintainer data
//! faults (an unpriced slot) are logged in full for operators and surfaced
//! to buyers as an opaque technical error.

pub mod error;
pub mod machine;

pub use error::PurchaseError;
pub use machine::{MachineSnapshot, VendingMachine};
