//! # Coin Reserve
//!
//! Owns the machine's own float of coins: a mapping from supported
//! denomination to available count.
//!
//! ## Invariants
//! - The set of supported denominations is fixed at construction; only
//!   counts change afterwards
//! - Counts never go negative (unsigned counts plus checked debits)
//! - `change_combination` is a read-only query; only `set_available_count`
//!   and `apply_balance` mutate
//!
//! ## Change-Making Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GREEDY DENOMINATION DEPLETION                                          │
//! │                                                                         │
//! │  remaining = amount                                                     │
//! │  loop:                                                                  │
//! │    for each denomination with count > 0, highest value first:           │
//! │      take = min(remaining / denom, count)                               │
//! │      append `take` coins, reduce remaining and the working count        │
//! │      remaining == 0? ──► done                                           │
//! │    pass added nothing? ──► ChangeUnavailable                            │
//! │                                                                         │
//! │  NOT globally optimal: reserve {0.40:3, 2.04:1, 0.10:2, 0.06:1} can     │
//! │  represent 3.20 as 0.40×8-style searches would find, but the greedy    │
//! │  pass commits to 2.04 first and dead-ends. Deliberately preserved       │
//! │  behavior; callers treat ChangeUnavailable as "use exact payment".     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! No locking of its own; the machine layer serializes access.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_amount, validate_denominations};

/// A denomination and its available count, for snapshots and logging.
///
/// The reserve's internal map is keyed by `Money`, which does not survive a
/// trip through JSON object keys; snapshot consumers get this pair instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CoinLevel {
    pub denomination: Money,
    pub count: u64,
}

/// The machine's float of coins available to give as change.
#[derive(Debug, Clone)]
pub struct CoinReserve {
    /// Denomination → available count. BTreeMap keeps denominations ordered
    /// by value, which the depletion loop walks in reverse.
    counts: BTreeMap<Money, u64>,
}

impl CoinReserve {
    /// Creates a reserve supporting exactly the given denominations, all
    /// with a starting count of zero.
    ///
    /// ## Errors
    /// - `EmptyDenominationSet` when no denomination is supplied
    /// - `InvalidDenomination` when any denomination is not positive
    pub fn new(denominations: &[Money]) -> Result<Self, ValidationError> {
        validate_denominations(denominations)?;
        let counts = denominations.iter().map(|&coin| (coin, 0)).collect();
        Ok(CoinReserve { counts })
    }

    /// The supported denominations, lowest value first.
    pub fn denominations(&self) -> impl Iterator<Item = Money> + '_ {
        self.counts.keys().copied()
    }

    /// Denomination/count pairs, lowest value first, for snapshots.
    pub fn levels(&self) -> Vec<CoinLevel> {
        self.counts
            .iter()
            .map(|(&denomination, &count)| CoinLevel {
                denomination,
                count,
            })
            .collect()
    }

    // =========================================================================
    // Maintenance Operations
    // =========================================================================

    /// Replaces the available count of a supported denomination.
    pub fn set_available_count(&mut self, coin: Money, count: u64) -> CoreResult<()> {
        match self.counts.get_mut(&coin) {
            Some(current) => {
                *current = count;
                Ok(())
            }
            None => Err(CoreError::UnsupportedDenomination { coin }),
        }
    }

    /// Available count of a supported denomination.
    pub fn available_count(&self, coin: Money) -> CoreResult<u64> {
        self.counts
            .get(&coin)
            .copied()
            .ok_or(CoreError::UnsupportedDenomination { coin })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Whether every coin in the list is a supported denomination.
    ///
    /// Fails with `EmptyCoinInput` on an empty list: support of nothing is
    /// a caller bug, not a yes/no answer.
    pub fn are_supported(&self, coins: &[Money]) -> CoreResult<bool> {
        if coins.is_empty() {
            return Err(ValidationError::EmptyCoinInput.into());
        }
        Ok(coins.iter().all(|coin| self.counts.contains_key(coin)))
    }

    /// Total value of the reserve: Σ denomination × count.
    pub fn total_value(&self) -> Money {
        self.counts
            .iter()
            .map(|(&coin, &count)| coin * count as i64)
            .sum()
    }

    /// Computes a change combination for `amount` without touching the live
    /// counts.
    ///
    /// ## Behavior
    /// - `amount == 0` → empty combination (exact payment)
    /// - `amount < 0` → `InvalidAmount`
    /// - `amount == total_value()` → drain: every unit of every non-zero
    ///   denomination, highest value first
    /// - `amount > total_value()` → `InsufficientReserve`
    /// - otherwise → greedy denomination depletion (see module docs);
    ///   `ChangeUnavailable` when a full pass over the remaining coins adds
    ///   nothing
    ///
    /// The returned combination lists coins highest denomination first and
    /// is deterministic for a fixed reserve state and amount.
    pub fn change_combination(&self, amount: Money) -> CoreResult<Vec<Money>> {
        validate_amount(amount)?;
        if amount.is_zero() {
            return Ok(Vec::new());
        }

        let total = self.total_value();
        match amount.cmp(&total) {
            Ordering::Equal => Ok(self.drain_combination()),
            Ordering::Greater => Err(CoreError::InsufficientReserve {
                requested: amount,
                available: total,
            }),
            Ordering::Less => self.greedy_combination(amount),
        }
    }

    // =========================================================================
    // Rebalancing
    // =========================================================================

    /// Applies a purchase's coin movement: one increment per credit coin
    /// (tendered by the buyer), one decrement per debit coin (paid out as
    /// change).
    ///
    /// ## Atomicity
    /// Copy-modify-commit: all deltas are applied to a clone of the counts,
    /// which replaces the live map only when every delta succeeded. On
    /// `UnsupportedDenomination` or `NegativeBalance` the live map is
    /// untouched - no partial application is ever observable.
    ///
    /// Credits are applied before debits, but the per-denomination deltas
    /// are independent, so ordering cannot change the committed counts.
    pub fn apply_balance(&mut self, credit: &[Money], debit: &[Money]) -> CoreResult<()> {
        let mut next = self.counts.clone();

        for &coin in credit {
            let count = next
                .get_mut(&coin)
                .ok_or(CoreError::UnsupportedDenomination { coin })?;
            *count += 1;
        }

        for &coin in debit {
            let count = next
                .get_mut(&coin)
                .ok_or(CoreError::UnsupportedDenomination { coin })?;
            *count = count
                .checked_sub(1)
                .ok_or(CoreError::NegativeBalance { coin })?;
        }

        self.counts = next;
        Ok(())
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// The degenerate "amount equals the whole reserve" case: hand out every
    /// unit of every denomination, highest value first.
    fn drain_combination(&self) -> Vec<Money> {
        let mut combination = Vec::new();
        for (&coin, &count) in self.counts.iter().rev() {
            for _ in 0..count {
                combination.push(coin);
            }
        }
        combination
    }

    /// Greedy denomination depletion over a working copy of the counts.
    fn greedy_combination(&self, amount: Money) -> CoreResult<Vec<Money>> {
        let mut working = self.counts.clone();
        let mut remaining = amount;
        let mut combination = Vec::new();

        while remaining.is_positive() {
            let size_before_pass = combination.len();

            // Highest denomination first; zero-count entries are skipped,
            // which is the "subset with count > 0" of the strategy
            for (&coin, count) in working.iter_mut().rev() {
                if *count == 0 || coin > remaining {
                    continue;
                }

                // How many of this denomination fit in the remaining amount?
                let take = ((remaining.cents() / coin.cents()) as u64).min(*count);
                if take == 0 {
                    continue;
                }

                for _ in 0..take {
                    combination.push(coin);
                }
                remaining -= coin * take as i64;
                *count -= take;

                if remaining.is_zero() {
                    return Ok(combination);
                }
            }

            // A full pass that adds no coin cannot make progress: the
            // remaining amount is not representable with what is left
            if combination.len() == size_before_pass {
                return Err(CoreError::ChangeUnavailable { remaining });
            }
        }

        Ok(combination)
    }
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

    /// Standard test reserve: 0.10, 0.20, 0.50, 1.00
    fn reserve() -> CoinReserve {
        CoinReserve::new(&[coin(10), coin(20), coin(50), coin(100)]).unwrap()
    }

    fn occurrences(combination: &[Money], value: Money) -> usize {
        combination.iter().filter(|&&c| c == value).count()
    }

    #[test]
    fn test_new_rejects_empty_denomination_set() {
        assert!(matches!(
            CoinReserve::new(&[]),
            Err(ValidationError::EmptyDenominationSet)
        ));
    }

    #[test]
    fn test_new_rejects_non_positive_denomination() {
        assert!(CoinReserve::new(&[coin(10), Money::zero()]).is_err());
        assert!(CoinReserve::new(&[coin(-10)]).is_err());
    }

    #[test]
    fn test_counts_start_at_zero() {
        let reserve = reserve();
        for denomination in [10, 20, 50, 100] {
            assert_eq!(reserve.available_count(coin(denomination)).unwrap(), 0);
        }
    }

    #[test]
    fn test_set_count_rejects_unsupported_coin() {
        let mut reserve = reserve();
        assert!(matches!(
            reserve.set_available_count(coin(30), 3),
            Err(CoreError::UnsupportedDenomination { .. })
        ));
        assert!(matches!(
            reserve.available_count(coin(30)),
            Err(CoreError::UnsupportedDenomination { .. })
        ));
    }

    #[test]
    fn test_set_and_get_count() {
        let mut reserve = reserve();
        reserve.set_available_count(coin(50), 3).unwrap();
        assert_eq!(reserve.available_count(coin(50)).unwrap(), 3);
    }

    #[test]
    fn test_are_supported() {
        let reserve = reserve();
        assert!(reserve
            .are_supported(&[coin(10), coin(100)])
            .unwrap());
        assert!(!reserve
            .are_supported(&[coin(120), coin(310), coin(100)])
            .unwrap());
        assert!(matches!(
            reserve.are_supported(&[]),
            Err(CoreError::Validation(ValidationError::EmptyCoinInput))
        ));
    }

    #[test]
    fn test_total_value() {
        let mut reserve = reserve();
        reserve.set_available_count(coin(10), 3).unwrap();
        reserve.set_available_count(coin(100), 2).unwrap();
        assert_eq!(reserve.total_value(), coin(230));
    }

    // -------------------------------------------------------------------------
    // change_combination
    // -------------------------------------------------------------------------

    #[test]
    fn test_change_zero_amount_is_empty() {
        let combination = reserve().change_combination(Money::zero()).unwrap();
        assert!(combination.is_empty());
    }

    #[test]
    fn test_change_negative_amount_is_rejected() {
        assert!(matches!(
            reserve().change_combination(coin(-100)),
            Err(CoreError::Validation(ValidationError::InvalidAmount { .. }))
        ));
    }

    #[test]
    fn test_change_amount_above_total_is_insufficient_reserve() {
        let mut reserve = reserve();
        reserve.set_available_count(coin(10), 1).unwrap();
        assert!(matches!(
            reserve.change_combination(coin(20)),
            Err(CoreError::InsufficientReserve { .. })
        ));
    }

    #[test]
    fn test_change_amount_equal_to_total_drains_reserve() {
        let mut reserve = reserve();
        reserve.set_available_count(coin(10), 1).unwrap();
        reserve.set_available_count(coin(100), 2).unwrap();
        reserve.set_available_count(coin(20), 3).unwrap();
        reserve.set_available_count(coin(50), 0).unwrap();

        // 0.10×1 + 1.00×2 + 0.20×3 = 2.70
        let combination = reserve.change_combination(coin(270)).unwrap();

        assert_eq!(occurrences(&combination, coin(10)), 1);
        assert_eq!(occurrences(&combination, coin(100)), 2);
        assert_eq!(occurrences(&combination, coin(20)), 3);
        assert_eq!(occurrences(&combination, coin(50)), 0);
        assert_eq!(combination.len(), 6);
    }

    #[test]
    fn test_change_prefers_highest_denomination() {
        // Reserve {1.60:4, 0.40:1, 1.00:0, 0.10:2}; change for 2.00
        let mut reserve =
            CoinReserve::new(&[coin(160), coin(40), coin(100), coin(10)]).unwrap();
        reserve.set_available_count(coin(160), 4).unwrap();
        reserve.set_available_count(coin(40), 1).unwrap();
        reserve.set_available_count(coin(10), 2).unwrap();

        let combination = reserve.change_combination(coin(200)).unwrap();
        assert_eq!(combination, vec![coin(160), coin(40)]);
    }

    #[test]
    fn test_change_falls_back_to_small_denominations() {
        // Same shape, but no 0.40 left: 2.00 = 1.60 + 0.10×4
        let mut reserve =
            CoinReserve::new(&[coin(160), coin(40), coin(100), coin(10)]).unwrap();
        reserve.set_available_count(coin(160), 4).unwrap();
        reserve.set_available_count(coin(10), 4).unwrap();

        let combination = reserve.change_combination(coin(200)).unwrap();
        assert_eq!(
            combination,
            vec![coin(160), coin(10), coin(10), coin(10), coin(10)]
        );
    }

    #[test]
    fn test_greedy_dead_end_is_change_unavailable() {
        // Reserve {0.10:2, 0.40:3, 2.04:1, 0.06:1} holds 3.50 in total, so
        // the total-sufficiency check passes for 3.20. Depletion then takes
        // 2.04, 0.40×2, 0.10×2 and 0.06, landing on 0.10 remaining with
        // only a 0.40 left - the next pass adds nothing and the query
        // reports ChangeUnavailable instead of InsufficientReserve.
        let mut reserve =
            CoinReserve::new(&[coin(10), coin(40), coin(204), coin(6)]).unwrap();
        reserve.set_available_count(coin(10), 2).unwrap();
        reserve.set_available_count(coin(40), 3).unwrap();
        reserve.set_available_count(coin(204), 1).unwrap();
        reserve.set_available_count(coin(6), 1).unwrap();

        assert!(matches!(
            reserve.change_combination(coin(320)),
            Err(CoreError::ChangeUnavailable { .. })
        ));
    }

    #[test]
    fn test_change_combination_is_deterministic_and_read_only() {
        let mut reserve = reserve();
        reserve.set_available_count(coin(10), 3).unwrap();
        reserve.set_available_count(coin(20), 2).unwrap();
        reserve.set_available_count(coin(50), 7).unwrap();
        reserve.set_available_count(coin(100), 1).unwrap();

        let first = reserve.change_combination(coin(120)).unwrap();
        for _ in 0..5 {
            assert_eq!(reserve.change_combination(coin(120)).unwrap(), first);
        }
        // The live counts were never touched by the query
        assert_eq!(reserve.available_count(coin(50)).unwrap(), 7);
        assert_eq!(reserve.total_value(), coin(520));
    }

    #[test]
    fn test_change_spans_multiple_passes() {
        // First pass: 0.50×2 leaves 0.20; second pass picks up 0.20
        let mut reserve = reserve();
        reserve.set_available_count(coin(50), 2).unwrap();
        reserve.set_available_count(coin(20), 1).unwrap();
        reserve.set_available_count(coin(10), 5).unwrap();

        let combination = reserve.change_combination(coin(120)).unwrap();
        let total: Money = combination.iter().sum();
        assert_eq!(total, coin(120));
    }

    // -------------------------------------------------------------------------
    // apply_balance
    // -------------------------------------------------------------------------

    #[test]
    fn test_apply_balance_credits_and_debits() {
        let mut reserve = reserve();
        reserve.set_available_count(coin(100), 3).unwrap();

        reserve
            .apply_balance(&[coin(50)], &[coin(100)])
            .unwrap();

        assert_eq!(reserve.available_count(coin(50)).unwrap(), 1);
        assert_eq!(reserve.available_count(coin(100)).unwrap(), 2);
    }

    #[test]
    fn test_apply_balance_rejects_unsupported_coin() {
        let mut reserve = reserve();
        assert!(matches!(
            reserve.apply_balance(&[coin(360)], &[coin(120)]),
            Err(CoreError::UnsupportedDenomination { .. })
        ));
    }

    #[test]
    fn test_apply_balance_rolls_back_on_negative_balance() {
        let mut reserve = reserve();
        reserve.set_available_count(coin(100), 0).unwrap();
        reserve.set_available_count(coin(50), 0).unwrap();

        // Debit of 0.50 would underflow; the credit of 1.00 must not stick
        let result = reserve.apply_balance(&[coin(100)], &[coin(50)]);
        assert!(matches!(result, Err(CoreError::NegativeBalance { .. })));

        assert_eq!(reserve.available_count(coin(100)).unwrap(), 0);
        assert_eq!(reserve.available_count(coin(50)).unwrap(), 0);
    }

    #[test]
    fn test_apply_balance_can_debit_a_coin_credited_in_the_same_call() {
        // Credits land before debits are checked, so paying a 1.00 coin
        // back out of the same purchase's tender balances to no-op
        let mut reserve = reserve();
        reserve
            .apply_balance(&[coin(100)], &[coin(100)])
            .unwrap();
        assert_eq!(reserve.available_count(coin(100)).unwrap(), 0);
    }
}
