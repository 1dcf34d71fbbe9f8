//! Competitive risk: how many extra votes each rival needs to take a seat
//! away from a focus party.
//!
//! Two routes are measured per rival:
//! - reaching one direct seat: `max(0, ceil(Q − rivalVotes))`;
//! - overtaking the focus party's weakest remainder seat: only when the focus
//!   party won a remainder seat and the rival is eligible. The target is the
//!   focus quotient `focusVotes / (focusDirect + 1)`; the rival needs
//!   `ceil(target × (rivalDirect + 1) − rivalVotes)`, or 0 when its own
//!   quotient already exceeds the target.
//!
//! Rivals are ranked by the smaller of the two, ascending; ties keep input order.
//!
//! The focus summary also carries a seat margin read off the round history:
//! for the last remainder round the focus party won, how far it sits above that
//! round's runner-up; otherwise how far it falls short of the round it came
//! closest to winning.

use core::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::debug;

use ap_core::rounding::{ceil_div_u128, saturate_u64};
use ap_core::{ElectionConfig, PartyName, Ratio};

use crate::allocation::Allocation;
use crate::{AllocError, PartyVotes};

/// Extra votes needed, or no route at all. `Unreachable` orders after every count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Delta {
    Votes(u64),
    Unreachable,
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delta::Votes(v) => write!(f, "{v}"),
            Delta::Unreachable => f.write_str("unreachable"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RiskEntry {
    pub party: PartyName,
    pub votes: u64,
    pub eligible: bool,
    pub to_direct: Delta,
    pub to_overtake: Delta,
    pub minimum: Delta,
}

/// Current standing of the focus party.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FocusSummary {
    pub party: PartyName,
    pub votes: u64,
    pub eligible: bool,
    pub direct_seats: u32,
    pub remainder_seats: u32,
    pub total_seats: u32,
    pub conclusion: String,
    pub seat_margin: SeatMargin,
}

/// How firmly the focus party holds, or misses, a remainder seat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SeatMargin {
    /// Measured on the last remainder round the focus party won.
    Ahead {
        round: u32,
        /// That round's runner-up, if any other party was eligible.
        competitor: Option<PartyName>,
        /// Votes the focus party can lose and still reach the runner-up's quotient.
        margin: u64,
        /// Votes the runner-up must gain to pass the focus quotient outright.
        competitor_needs: u64,
        focus_quotient: Ratio,
        competitor_quotient: Ratio,
    },
    /// The focus party won no remainder round; measured on the round it was closest to.
    Behind {
        round: u32,
        /// Winner of that round.
        competitor: PartyName,
        /// Votes the focus party must gain to pass the winner's quotient outright.
        shortfall: u64,
        focus_quotient: Ratio,
        competitor_quotient: Ratio,
    },
    /// No remainder round to measure against (none ran, or the focus party is ineligible).
    Uncontested,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RiskReport {
    pub focus: FocusSummary,
    pub rivals: Vec<RiskEntry>,
}

/// Rank every party in `snapshot` other than `focus`.
///
/// `snapshot` carries all parties (eligible or not); direct seats are
/// `floor(votes / Q)` exactly as the allocator computes them.
pub fn rank_rivals(
    snapshot: &[PartyVotes],
    config: &ElectionConfig,
    focus: &PartyName,
    focus_remainder: u32,
) -> Result<Vec<RiskEntry>, AllocError> {
    let focus_votes = snapshot
        .iter()
        .find(|p| &p.party == focus)
        .map(|p| p.votes)
        .ok_or_else(|| AllocError::UnknownFocusParty(focus.to_string()))?;
    let focus_quotient = Ratio::party_quotient(focus_votes, config.direct_seats(focus_votes));

    let mut entries: Vec<RiskEntry> = snapshot
        .iter()
        .filter(|p| &p.party != focus)
        .map(|rival| {
            let eligible = config.party_eligible(rival.votes);
            let to_direct = Delta::Votes(config.quotient().saturating_sub(rival.votes));
            let to_overtake = if focus_remainder > 0 && eligible {
                overtake_delta(focus_quotient, rival.votes, config.direct_seats(rival.votes))
            } else {
                Delta::Unreachable
            };
            RiskEntry {
                party: rival.party.clone(),
                votes: rival.votes,
                eligible,
                to_direct,
                to_overtake,
                minimum: to_direct.min(to_overtake),
            }
        })
        .collect();

    entries.sort_by_key(|e| e.minimum);
    debug!(focus = %focus, rivals = entries.len(), "rivals ranked");
    Ok(entries)
}

fn overtake_delta(target: Ratio, rival_votes: u64, rival_direct: u32) -> Delta {
    if Ratio::party_quotient(rival_votes, rival_direct) > target {
        return Delta::Votes(0);
    }
    // ceil(target.num × (rd + 1) / target.den − rv), kept over the common denominator.
    let den = u128::from(target.denom());
    let needed = u128::from(target.numer()) * (u128::from(rival_direct) + 1);
    let have = u128::from(rival_votes) * den;
    Delta::Votes(saturate_u64(ceil_div_u128(needed.saturating_sub(have), den)))
}

/// `floor(q × divisor)`.
fn scaled_floor(q: Ratio, divisor: u32) -> u64 {
    saturate_u64(u128::from(q.numer()) * u128::from(divisor) / u128::from(q.denom()))
}

/// `ceil(q × divisor)`.
fn scaled_ceil(q: Ratio, divisor: u32) -> u64 {
    saturate_u64(ceil_div_u128(u128::from(q.numer()) * u128::from(divisor), u128::from(q.denom())))
}

/// Smallest gain that lifts `votes / divisor` strictly above `target`.
fn votes_to_pass(target: Ratio, divisor: u32, votes: u64) -> u64 {
    scaled_floor(target, divisor).saturating_add(1).saturating_sub(votes)
}

/// Seat margin of `focus` over the allocation's remainder rounds.
pub fn seat_margin(allocation: &Allocation, focus: &str) -> Result<SeatMargin, AllocError> {
    let fa = allocation
        .get(focus)
        .ok_or_else(|| AllocError::UnknownFocusParty(focus.to_string()))?;

    if let Some(won) = allocation.rounds.iter().rev().find(|r| r.party == fa.party) {
        let margin = match &won.runner_up {
            Some(ru) => {
                let ru_votes = allocation.get(ru.party.as_str()).map_or(0, |p| p.votes);
                SeatMargin::Ahead {
                    round: won.round,
                    competitor: Some(ru.party.clone()),
                    margin: fa.votes.saturating_sub(scaled_ceil(ru.quotient, won.divisor)),
                    competitor_needs: votes_to_pass(won.quotient, ru.divisor, ru_votes),
                    focus_quotient: won.quotient,
                    competitor_quotient: ru.quotient,
                }
            }
            None => SeatMargin::Ahead {
                round: won.round,
                competitor: None,
                margin: fa.votes,
                competitor_needs: 0,
                focus_quotient: won.quotient,
                competitor_quotient: Ratio::ZERO,
            },
        };
        return Ok(margin);
    }

    if !fa.eligible {
        return Ok(SeatMargin::Uncontested);
    }

    // Without a remainder win the focus divisor is fixed at direct + 1 in every round.
    let divisor = fa.direct_seats.saturating_add(1);
    let closest = allocation
        .rounds
        .iter()
        .map(|r| (r, votes_to_pass(r.quotient, divisor, fa.votes)))
        .min_by_key(|(_, shortfall)| *shortfall);

    Ok(match closest {
        Some((r, shortfall)) => SeatMargin::Behind {
            round: r.round,
            competitor: r.party.clone(),
            shortfall,
            focus_quotient: Ratio::party_quotient(fa.votes, fa.direct_seats),
            competitor_quotient: r.quotient,
        },
        None => SeatMargin::Uncontested,
    })
}

/// Summary plus rival ranking for `focus`, read off a finished allocation.
pub fn assess_focus(
    allocation: &Allocation,
    config: &ElectionConfig,
    focus: &str,
) -> Result<RiskReport, AllocError> {
    let fa = allocation
        .get(focus)
        .ok_or_else(|| AllocError::UnknownFocusParty(focus.to_string()))?;

    let conclusion = if fa.total_seats > 0 {
        format!(
            "{} elects {} candidate(s) ({} direct + {} remainder)",
            fa.party, fa.total_seats, fa.direct_seats, fa.remainder_seats
        )
    } else {
        format!("{} elects no one", fa.party)
    };

    let rivals = rank_rivals(&allocation.vote_snapshot(), config, &fa.party, fa.remainder_seats)?;
    let seat_margin = seat_margin(allocation, focus)?;

    Ok(RiskReport {
        focus: FocusSummary {
            party: fa.party.clone(),
            votes: fa.votes,
            eligible: fa.eligible,
            direct_seats: fa.direct_seats,
            remainder_seats: fa.remainder_seats,
            total_seats: fa.total_seats,
            conclusion,
            seat_margin,
        },
        rivals,
    })
}
