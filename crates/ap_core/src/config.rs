//! Election configuration: electoral quotient Q and total seats S.
//!
//! The two eligibility ratios are fixed: a party needs `0.8 × Q` total votes to
//! receive seats, a candidate needs `0.2 × Q` personal votes to qualify. Both
//! checks are cross-multiplied so no fraction of Q is ever materialized.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::errors::CoreError;
use crate::rounding::Ratio;

/// Party eligibility ratio, as `num/den` of Q (0.8).
pub const PARTY_RATIO: (u64, u64) = (4, 5);
/// Candidate eligibility ratio, as `num/den` of Q (0.2).
pub const CANDIDATE_RATIO: (u64, u64) = (1, 5);

/// Validated configuration: `quotient > 0`. Construct through `new`/`from_signed`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ElectionConfig {
    quotient: u64,
    seats: u32,
}

impl ElectionConfig {
    pub fn new(quotient: u64, seats: u32) -> Result<Self, CoreError> {
        if quotient == 0 {
            return Err(CoreError::InvalidQuotient(0));
        }
        Ok(ElectionConfig { quotient, seats })
    }

    /// Validate raw signed inputs as they arrive from a scenario file or flags.
    pub fn from_signed(quotient: i64, seats: i64) -> Result<Self, CoreError> {
        if quotient <= 0 {
            return Err(CoreError::InvalidQuotient(quotient));
        }
        if seats < 0 {
            return Err(CoreError::NegativeSeats(seats));
        }
        let seats = u32::try_from(seats).map_err(|_| CoreError::SeatsOutOfRange(seats))?;
        // quotient > 0 was checked above
        Self::new(quotient.unsigned_abs(), seats)
    }

    #[inline]
    pub fn quotient(&self) -> u64 {
        self.quotient
    }

    #[inline]
    pub fn seats(&self) -> u32 {
        self.seats
    }

    /// `votes ≥ 0.8 × Q` (inclusive).
    #[inline]
    pub fn party_eligible(&self, total_votes: u64) -> bool {
        meets_ratio(total_votes, self.quotient, PARTY_RATIO)
    }

    /// `votes ≥ 0.2 × Q` (inclusive).
    #[inline]
    pub fn candidate_qualifies(&self, votes: u64) -> bool {
        meets_ratio(votes, self.quotient, CANDIDATE_RATIO)
    }

    /// `floor(votes / Q)`, saturating at `u32::MAX`.
    #[inline]
    pub fn direct_seats(&self, total_votes: u64) -> u32 {
        u32::try_from(total_votes / self.quotient).unwrap_or(u32::MAX)
    }

    /// `votes / Q` as an exact ratio (the "projected elected" figure).
    #[inline]
    pub fn projection(&self, total_votes: u64) -> Ratio {
        Ratio { num: total_votes, den: self.quotient }
    }

    /// Party threshold `0.8 × Q` for display.
    pub fn party_threshold(&self) -> Ratio {
        threshold(self.quotient, PARTY_RATIO)
    }

    /// Candidate threshold `0.2 × Q` for display.
    pub fn candidate_threshold(&self) -> Ratio {
        threshold(self.quotient, CANDIDATE_RATIO)
    }
}

#[inline]
fn meets_ratio(votes: u64, quotient: u64, (num, den): (u64, u64)) -> bool {
    u128::from(votes) * u128::from(den) >= u128::from(quotient) * u128::from(num)
}

fn threshold(quotient: u64, (num, den): (u64, u64)) -> Ratio {
    // Q·num fits comfortably unless Q is near u64::MAX; fall back to the reduced form.
    match quotient.checked_mul(num) {
        Some(n) => Ratio { num: n, den },
        None => Ratio { num: quotient / den * num, den: 1 },
    }
}
