//! Growth policies: how far a full array grows on append.
//!
//! An array asks its [`GrowthPolicy`] for a new capacity only when an
//! append finds every allocated slot live. Explicit `reserve` and `resize`
//! requests bypass the policy and allocate exactly what was asked for.
//!
//! - [`Doubling`]: the default. `0 → 1`, then `c → 2c`.
//! - [`ScaledGrowth`]: rational factor with a floor for the first allocation.
//! - [`GrowthFn`]: any `Fn(usize) -> usize` closure.

use std::error::Error;
use std::fmt;

/// Maps a full buffer's capacity to the capacity it should grow to.
///
/// Implementations should return a value strictly greater than `current`.
/// The storage layer clamps the answer to at least `current + 1`, so a
/// policy that fails to grow degrades to linear growth rather than stalling.
pub trait GrowthPolicy: Clone {
    /// Capacity to grow to when an append finds `current` slots all live.
    fn next_capacity(&self, current: usize) -> usize;
}

/// Doubling growth: `0 → 1`, otherwise `2 × current`.
///
/// Amortises append cost to O(1). Saturates at `usize::MAX`; the allocation
/// that follows then fails with a capacity overflow instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Doubling;

impl GrowthPolicy for Doubling {
    fn next_capacity(&self, current: usize) -> usize {
        if current == 0 {
            1
        } else {
            current.saturating_mul(2)
        }
    }
}

/// Geometric growth by `numerator / denominator` with a minimum first allocation.
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaledGrowth {
    numerator: u32,
    denominator: u32,
    min_non_zero: usize,
}

impl ScaledGrowth {
    /// Default factor numerator (1.5x growth).
    pub const DEFAULT_NUMERATOR: u32 = 3;

    /// Default factor denominator.
    pub const DEFAULT_DENOMINATOR: u32 = 2;

    /// Default capacity of the first allocation.
    pub const DEFAULT_MIN_NON_ZERO: usize = 4;

    /// Create a validated growth configuration.
    ///
    /// # Errors
    ///
    /// - [`GrowthConfigError::ZeroDenominator`] if `denominator == 0`
    /// - [`GrowthConfigError::NonGrowingFactor`] if the factor is `<= 1`
    /// - [`GrowthConfigError::ZeroMinimum`] if `min_non_zero == 0`
    pub fn new(
        numerator: u32,
        denominator: u32,
        min_non_zero: usize,
    ) -> Result<Self, GrowthConfigError> {
        if denominator == 0 {
            return Err(GrowthConfigError::ZeroDenominator);
        }
        if numerator <= denominator {
            return Err(GrowthConfigError::NonGrowingFactor {
                numerator,
                denominator,
            });
        }
        if min_non_zero == 0 {
            return Err(GrowthConfigError::ZeroMinimum);
        }
        Ok(Self {
            numerator,
            denominator,
            min_non_zero,
        })
    }

    /// Factor numerator.
    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    /// Factor denominator.
    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Capacity of the first allocation when growing from empty.
    pub fn min_non_zero(&self) -> usize {
        self.min_non_zero
    }
}

impl Default for ScaledGrowth {
    fn default() -> Self {
        Self {
            numerator: Self::DEFAULT_NUMERATOR,
            denominator: Self::DEFAULT_DENOMINATOR,
            min_non_zero: Self::DEFAULT_MIN_NON_ZERO,
        }
    }
}

impl GrowthPolicy for ScaledGrowth {
    fn next_capacity(&self, current: usize) -> usize {
        if current == 0 {
            return self.min_non_zero;
        }
        let scaled = current as u128 * u128::from(self.numerator) / u128::from(self.denominator);
        let scaled = usize::try_from(scaled).unwrap_or(usize::MAX);
        // Small capacities can round back down to `current` (e.g. 1 * 3 / 2).
        scaled.max(current.saturating_add(1))
    }
}

/// Adapts a closure into a [`GrowthPolicy`].
///
/// ```
/// use contig_core::{GrowthFn, GrowthPolicy};
///
/// let plus_eight = GrowthFn(|current: usize| current + 8);
/// assert_eq!(plus_eight.next_capacity(0), 8);
/// assert_eq!(plus_eight.next_capacity(8), 16);
/// ```
#[derive(Clone, Copy)]
pub struct GrowthFn<F>(pub F);

impl<F> fmt::Debug for GrowthFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GrowthFn(..)")
    }
}

impl<F> GrowthPolicy for GrowthFn<F>
where
    F: Fn(usize) -> usize + Clone,
{
    fn next_capacity(&self, current: usize) -> usize {
        (self.0)(current)
    }
}

/// Errors detected by [`ScaledGrowth::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrowthConfigError {
    /// The factor denominator is zero.
    ZeroDenominator,
    /// The factor does not exceed one, so appends would never grow.
    NonGrowingFactor {
        /// The configured numerator.
        numerator: u32,
        /// The configured denominator.
        denominator: u32,
    },
    /// The first allocation would hold no slots.
    ZeroMinimum,
}

impl fmt::Display for GrowthConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDenominator => write!(f, "growth factor denominator is zero"),
            Self::NonGrowingFactor {
                numerator,
                denominator,
            } => {
                write!(
                    f,
                    "growth factor {numerator}/{denominator} must be greater than one"
                )
            }
            Self::ZeroMinimum => write!(f, "minimum non-zero capacity must be at least one"),
        }
    }
}

impl Error for GrowthConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubling_starts_at_one() {
        assert_eq!(Doubling.next_capacity(0), 1);
        assert_eq!(Doubling.next_capacity(1), 2);
        assert_eq!(Doubling.next_capacity(48), 96);
    }

    #[test]
    fn doubling_saturates() {
        assert_eq!(Doubling.next_capacity(usize::MAX / 2 + 1), usize::MAX);
    }

    #[test]
    fn scaled_default_is_one_and_a_half() {
        let growth = ScaledGrowth::default();
        assert_eq!(growth.next_capacity(0), 4);
        assert_eq!(growth.next_capacity(4), 6);
        assert_eq!(growth.next_capacity(100), 150);
    }

    #[test]
    fn scaled_small_capacity_still_grows() {
        let growth = ScaledGrowth::new(5, 4, 1).unwrap();
        assert_eq!(growth.next_capacity(1), 2);
        assert_eq!(growth.next_capacity(2), 3);
    }

    #[test]
    fn scaled_rejects_zero_denominator() {
        assert_eq!(
            ScaledGrowth::new(3, 0, 4),
            Err(GrowthConfigError::ZeroDenominator)
        );
    }

    #[test]
    fn scaled_rejects_non_growing_factor() {
        assert_eq!(
            ScaledGrowth::new(2, 2, 4),
            Err(GrowthConfigError::NonGrowingFactor {
                numerator: 2,
                denominator: 2
            })
        );
    }

    #[test]
    fn scaled_rejects_zero_minimum() {
        assert_eq!(
            ScaledGrowth::new(3, 2, 0),
            Err(GrowthConfigError::ZeroMinimum)
        );
    }

    #[test]
    fn scaled_clamps_instead_of_overflowing() {
        let growth = ScaledGrowth::new(u32::MAX, 1, 1).unwrap();
        assert_eq!(growth.next_capacity(usize::MAX / 2), usize::MAX);
    }

    #[test]
    fn closure_policy_is_called() {
        let growth = GrowthFn(|c: usize| c + 3);
        assert_eq!(growth.next_capacity(0), 3);
        assert_eq!(growth.next_capacity(3), 6);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn doubling_at_least_doubles(current in 1usize..(usize::MAX / 2)) {
                prop_assert_eq!(Doubling.next_capacity(current), current * 2);
            }

            #[test]
            fn scaled_always_grows(
                numerator in 2u32..64,
                extra in 0u32..8,
                min_non_zero in 1usize..64,
                current in 0usize..1_000_000,
            ) {
                let denominator = numerator.saturating_sub(1 + extra % (numerator - 1)).max(1);
                let growth = ScaledGrowth::new(numerator, denominator, min_non_zero).unwrap();
                prop_assert!(growth.next_capacity(current) > current);
            }
        }
    }
}
