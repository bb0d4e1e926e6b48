//! # vendo-core: Pure Business Logic for Vendo
//!
//! This crate is the **heart** of Vendo, a self-service retail dispenser
//! engine. It contains all business logic as pure values with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Vendo Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (demo)                              │   │
//! │  │    seed machine ──► maintenance ops ──► purchases ──► report   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  vendo-machine (coordinator)                    │   │
//! │  │    purchase gate + per-component locks, error mapping          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vendo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   slots   │  │  reserve  │  │ validation│  │   │
//! │  │   │   Money   │  │ SlotLedger│  │CoinReserve│  │   rules   │  │   │
//! │  │   │  parsing  │  │  Product  │  │ change-   │  │  checks   │  │   │
//! │  │   │           │  │           │  │  making   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO NETWORK • PURE VALUES                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer-cents arithmetic (no floating point!)
//! - [`product`] - Product occupying one slot (price + inventory)
//! - [`slots`] - Slot Ledger: fixed-capacity compacting slot array
//! - [`reserve`] - Coin Reserve: denomination counts and change-making
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Values**: Every operation is deterministic - same state and
//!    input produce the same result
//! 2. **No I/O, No Locks**: Serialization of access lives in vendo-machine
//! 3. **Integer Money**: All monetary values are in cents (i64); two-decimal
//!    half-up rounding collapses to exact integer arithmetic
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use vendo_core::money::Money;
//! use vendo_core::reserve::CoinReserve;
//!
//! let mut reserve = CoinReserve::new(&[
//!     Money::from_cents(10),
//!     Money::from_cents(50),
//! ])
//! .unwrap();
//! reserve.set_available_count(Money::from_cents(10), 4).unwrap();
//! reserve.set_available_count(Money::from_cents(50), 1).unwrap();
//!
//! // 0.70 = 0.50 + 0.10 + 0.10, highest denomination first
//! let change = reserve.change_combination(Money::from_cents(70)).unwrap();
//! assert_eq!(change.len(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod product;
pub mod reserve;
pub mod slots;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vendo_core::Money` instead of
// `use vendo_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use money::Money;
pub use product::Product;
pub use reserve::{CoinLevel, CoinReserve};
pub use slots::SlotLedger;
