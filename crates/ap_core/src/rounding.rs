//! Integer-first ratio type and helpers.
//!
//! Quotients are never compared as floats: `a/b ? c/d` is decided by
//! cross-multiplying in `u128`, which cannot overflow for `u64` operands.

use core::cmp::Ordering;
use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::errors::CoreError;

/// Exact non-negative ratio `num / den` with `den > 0`.
///
/// Equality and ordering are by value, so `1/2 == 2/4`.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Ratio {
    pub(crate) num: u64,
    pub(crate) den: u64,
}

impl Ratio {
    pub const ZERO: Ratio = Ratio { num: 0, den: 1 };

    pub fn new(num: u64, den: u64) -> Result<Self, CoreError> {
        if den == 0 {
            return Err(CoreError::InvalidRatio);
        }
        Ok(Ratio { num, den })
    }

    /// `votes / (seats + 1)`; the divisor is always ≥ 1.
    #[inline]
    pub fn party_quotient(votes: u64, seats: u32) -> Self {
        Ratio { num: votes, den: u64::from(seats) + 1 }
    }

    #[inline]
    pub fn floor(&self) -> u64 {
        self.num / self.den
    }

    #[inline]
    pub fn numer(&self) -> u64 {
        self.num
    }

    #[inline]
    pub fn denom(&self) -> u64 {
        self.den
    }

    /// Fixed two-decimal rendering, rounding half up ("2.50", "833.33").
    pub fn to_fixed_2(&self) -> String {
        let scaled = u128::from(self.num) * 100;
        let den = u128::from(self.den);
        let mut hundredths = scaled / den;
        if (scaled % den) * 2 >= den {
            hundredths += 1;
        }
        format!("{}.{:02}", hundredths / 100, hundredths % 100)
    }
}

impl PartialEq for Ratio {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ratio {}

impl Ord for Ratio {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.num) * u128::from(other.den);
        let rhs = u128::from(other.num) * u128::from(self.den);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Ratio {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed_2())
    }
}

/// Ceiling division on `u128`; `den` must be non-zero.
#[inline]
pub fn ceil_div_u128(num: u128, den: u128) -> u128 {
    debug_assert!(den > 0, "ceil_div_u128 with zero denominator");
    num / den + u128::from(num % den != 0)
}

/// Narrow a `u128` to `u64`, saturating at `u64::MAX`.
#[inline]
pub fn saturate_u64(v: u128) -> u64 {
    u64::try_from(v).unwrap_or(u64::MAX)
}
