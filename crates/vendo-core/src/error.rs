//! # Error Types
//!
//! Domain-specific error types for vendo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vendo-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Construction / input validation failures       │
//! │                                                                         │
//! │  vendo-machine errors (separate crate)                                 │
//! │  └── PurchaseError    - What the buyer sees (PriceNotSet hidden)       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → PurchaseError → Buyer             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (slot index, coin value, amounts)
//! 3. Errors are enum variants, never String
//! 4. Every failure is detected before any mutation and propagated
//!    synchronously; nothing is swallowed or retried internally

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations inside the slot ledger,
/// the coin reserve, or the purchase pipeline composed from them.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Slot index is out of range.
    ///
    /// ## When This Occurs
    /// - Index past the occupied slot range
    /// - Index cached across a product removal (removal compacts the slot
    ///   array, so later indices shift down)
    #[error("invalid product slot {index} ({occupied} slot(s) occupied)")]
    InvalidSlot { index: usize, occupied: usize },

    /// Every product slot is already occupied.
    #[error("all {capacity} product slot(s) are occupied")]
    CapacityExceeded { capacity: usize },

    /// Coin denomination was never registered with the reserve.
    ///
    /// The set of supported denominations is fixed at construction; only
    /// counts change afterwards.
    #[error("coin {coin} is not supported")]
    UnsupportedDenomination { coin: Money },

    /// Product inventory at the slot is exhausted.
    #[error("product at slot {slot} is out of stock")]
    OutOfStock { slot: usize },

    /// Product at the slot has no price assigned yet.
    ///
    /// ## Note
    /// This is a maintainer data-entry fault. The purchase layer hides it
    /// from the buyer behind an opaque technical error while logging the
    /// full detail for operators.
    #[error("price for product at slot {slot} is not set")]
    PriceNotSet { slot: usize },

    /// Tendered coins do not cover the product price.
    #[error("tendered {tendered} is less than product price {price}")]
    InsufficientPayment { tendered: Money, price: Money },

    /// The whole reserve is worth less than the requested change amount.
    #[error("insufficient coin reserve for change: requested {requested}, available {available}")]
    InsufficientReserve { requested: Money, available: Money },

    /// The reserve holds enough total value, but the greedy depletion could
    /// not represent the amount with the denominations that remain.
    #[error("available coin(s) cannot provide change ({remaining} remaining)")]
    ChangeUnavailable { remaining: Money },

    /// A debit would drive a denomination count below zero.
    ///
    /// The whole rebalancing operation is rolled back; no partial
    /// credit/debit application is ever left behind.
    #[error("coin count for {coin} cannot go negative")]
    NegativeBalance { coin: Money },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Construction and input validation errors.
///
/// These errors occur when maintainer or constructor input doesn't meet
/// requirements. Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Slot capacity below the minimum of one.
    /// No machine has zero product slots.
    #[error("invalid product slot capacity {given} (minimum 1)")]
    InvalidCapacity { given: usize },

    /// Constructor received no coin denominations.
    #[error("no coin denomination specified")]
    EmptyDenominationSet,

    /// Denomination must be a positive value.
    #[error("invalid coin denomination {value}")]
    InvalidDenomination { value: Money },

    /// Product price must be non-negative.
    #[error("invalid product price {value}")]
    InvalidPrice { value: Money },

    /// Inventory count must be non-negative.
    #[error("invalid inventory size {given}")]
    InvalidInventorySize { given: i64 },

    /// Change amount must be non-negative.
    #[error("invalid amount {value}")]
    InvalidAmount { value: Money },

    /// An operation that consumes coins received an empty coin list.
    #[error("coin list is required")]
    EmptyCoinInput,

    /// Textual amount could not be parsed as a two-decimal-place value.
    #[error("malformed amount '{input}'")]
    MalformedAmount { input: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
