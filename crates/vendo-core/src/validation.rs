//! # Validation Module
//!
//! Input validation utilities for Vendo.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Boundary parsing (Money::parse)                              │
//! │  └── Rejects text that is not a two-decimal-place amount               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - domain range checks                            │
//! │  └── Capacity ≥ 1, denominations > 0, price ≥ 0, inventory ≥ 0         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Component invariants (slots / reserve)                       │
//! │  └── Index bounds, denomination registration, count underflow          │
//! │                                                                         │
//! │  Defense in depth: every mutation re-checks what it relies on          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

// =============================================================================
// Construction Validators
// =============================================================================

/// Validates the product slot capacity supplied at construction.
///
/// ## Rules
/// - Must be at least 1 - no machine has zero product slots
pub fn validate_capacity(capacity: usize) -> ValidationResult<()> {
    if capacity < 1 {
        return Err(ValidationError::InvalidCapacity { given: capacity });
    }

    Ok(())
}

/// Validates the denomination set supplied at construction.
///
/// ## Rules
/// - Must not be empty
/// - Every denomination must be positive
///
/// ## Example
/// ```rust
/// use vendo_core::money::Money;
/// use vendo_core::validation::validate_denominations;
///
/// assert!(validate_denominations(&[Money::from_cents(10)]).is_ok());
/// assert!(validate_denominations(&[]).is_err());
/// assert!(validate_denominations(&[Money::zero()]).is_err());
/// ```
pub fn validate_denominations(denominations: &[Money]) -> ValidationResult<()> {
    if denominations.is_empty() {
        return Err(ValidationError::EmptyDenominationSet);
    }

    for &value in denominations {
        if !value.is_positive() {
            return Err(ValidationError::InvalidDenomination { value });
        }
    }

    Ok(())
}

// =============================================================================
// Maintenance Input Validators
// =============================================================================

/// Validates a product price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (giveaway items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::InvalidPrice { value: price });
    }

    Ok(())
}

/// Validates an inventory count.
///
/// ## Rules
/// - Must be non-negative
pub fn validate_inventory(inventory: i64) -> ValidationResult<()> {
    if inventory < 0 {
        return Err(ValidationError::InvalidInventorySize { given: inventory });
    }

    Ok(())
}

/// Validates a change amount before the reserve computes a combination.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (exact payment, empty change)
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::InvalidAmount { value: amount });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_capacity() {
        assert!(validate_capacity(1).is_ok());
        assert!(validate_capacity(10).is_ok());
        assert!(validate_capacity(0).is_err());
    }

    #[test]
    fn test_validate_denominations() {
        assert!(validate_denominations(&[Money::from_cents(10), Money::from_cents(50)]).is_ok());
        assert!(validate_denominations(&[]).is_err());
        assert!(validate_denominations(&[Money::from_cents(-10)]).is_err());
        assert!(validate_denominations(&[Money::zero()]).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(100)).is_ok());
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_inventory() {
        assert!(validate_inventory(0).is_ok());
        assert!(validate_inventory(5).is_ok());
        assert!(validate_inventory(-1).is_err());
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Money::zero()).is_ok());
        assert!(validate_amount(Money::from_cents(120)).is_ok());
        assert!(validate_amount(Money::from_cents(-120)).is_err());
    }
}
