//! # Purchase Error
//!
//! Consumer-facing error type for the buy pipeline.
//!
//! ## Information Hiding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Mapping at the Consumer Boundary               │
//! │                                                                         │
//! │  CoreError (internal)              PurchaseError (what the buyer sees)  │
//! │  ────────────────────              ───────────────────────────────────  │
//! │  InvalidSlot            ─────────► InvalidSlot                          │
//! │  OutOfStock             ─────────► OutOfStock                           │
//! │  InsufficientPayment    ─────────► InsufficientPayment                  │
//! │  InsufficientReserve    ─────────► InsufficientReserve                  │
//! │  ChangeUnavailable      ─────────► ChangeUnavailable                    │
//! │  UnsupportedDenomination ────────► UnsupportedCoin                      │
//! │  EmptyCoinInput         ─────────► CoinsRequired                        │
//! │                                                                         │
//! │  PriceNotSet            ──log──► Technical (cause hidden from buyer)    │
//! │  NegativeBalance, other ──log──► Technical                              │
//! │                                                                         │
//! │  A missing price is a maintainer data-entry fault. The buyer gets an   │
//! │  opaque technical error; the operator channel gets the full detail.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use tracing::error;
use vendo_core::{CoreError, Money, ValidationError};

/// Errors a buyer can receive from `buy_product`.
///
/// Variants carry only what a buyer may act on; internal faults collapse
/// into [`PurchaseError::Technical`].
#[derive(Debug, Error)]
pub enum PurchaseError {
    /// Purchase attempted with no coins tendered.
    #[error("coin(s) are required to buy a product")]
    CoinsRequired,

    /// At least one tendered coin is not a supported denomination.
    #[error("one or more tendered coins are not supported")]
    UnsupportedCoin,

    /// The selected slot does not exist.
    #[error("invalid product slot {index}")]
    InvalidSlot { index: usize },

    /// The selected product is sold out.
    #[error("product at slot {slot} is out of stock")]
    OutOfStock { slot: usize },

    /// The tendered sum does not cover the product price.
    #[error("tendered {tendered} is less than product price {price}")]
    InsufficientPayment { tendered: Money, price: Money },

    /// The machine's coin float cannot cover the change amount.
    #[error("machine cannot provide change of {requested}")]
    InsufficientReserve { requested: Money },

    /// The machine holds enough value but not in usable denominations.
    /// Tendering exact payment will succeed.
    #[error("available coin(s) cannot provide change")]
    ChangeUnavailable,

    /// An internal fault. The cause is logged for the operator and
    /// deliberately not exposed here.
    #[error("a technical error occurred, please contact the operator")]
    Technical,
}

impl From<CoreError> for PurchaseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidSlot { index, .. } => PurchaseError::InvalidSlot { index },
            CoreError::OutOfStock { slot } => PurchaseError::OutOfStock { slot },
            CoreError::InsufficientPayment { tendered, price } => {
                PurchaseError::InsufficientPayment { tendered, price }
            }
            CoreError::InsufficientReserve { requested, .. } => {
                PurchaseError::InsufficientReserve { requested }
            }
            CoreError::ChangeUnavailable { .. } => PurchaseError::ChangeUnavailable,
            CoreError::UnsupportedDenomination { .. } => PurchaseError::UnsupportedCoin,
            CoreError::Validation(ValidationError::EmptyCoinInput) => {
                PurchaseError::CoinsRequired
            }
            CoreError::PriceNotSet { slot } => {
                // Maintainer data-entry fault: full detail to the operator
                // channel, opaque error to the buyer
                error!(slot, "product price not set; surfacing technical error to buyer");
                PurchaseError::Technical
            }
            other => {
                error!(cause = %other, "internal fault during purchase; surfacing technical error");
                PurchaseError::Technical
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_not_set_is_hidden_from_buyer() {
        let err: PurchaseError = CoreError::PriceNotSet { slot: 3 }.into();
        assert!(matches!(err, PurchaseError::Technical));
        // The buyer-facing message must not leak the cause
        assert!(!err.to_string().contains("price"));
    }

    #[test]
    fn test_buyer_actionable_errors_pass_through() {
        let err: PurchaseError = CoreError::OutOfStock { slot: 1 }.into();
        assert!(matches!(err, PurchaseError::OutOfStock { slot: 1 }));

        let err: PurchaseError = CoreError::InsufficientPayment {
            tendered: Money::from_cents(50),
            price: Money::from_cents(100),
        }
        .into();
        assert!(matches!(err, PurchaseError::InsufficientPayment { .. }));
    }

    #[test]
    fn test_negative_balance_collapses_to_technical() {
        let err: PurchaseError = CoreError::NegativeBalance {
            coin: Money::from_cents(50),
        }
        .into();
        assert!(matches!(err, PurchaseError::Technical));
    }
}
