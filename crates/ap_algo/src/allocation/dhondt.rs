//! D’Hondt (highest averages) allocation over the eligible parties.
//!
//! Contract:
//! - Direct seats first: `floor(votes / Q)` per eligible party.
//! - Remaining `S − Σ direct` seats are awarded one per round to the max of
//!   `votes / (seats + 1)`, where `seats` counts direct plus remainder seats so far.
//! - Exact ties go to the party that comes first in the caller's slice.
//! - Each round also records the runner-up: the best of the other parties under
//!   the same tie rule.
//! - Pure integers; no division in comparisons (cross-multiply in u128).
//!
//! Oversubscription (`Σ direct > S`) is reported, not truncated: every party
//! keeps its direct seats and no remainder round runs.

#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::{debug, warn};

use ap_core::{ElectionConfig, PartyName, Ratio};

use crate::PartyVotes;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PartySeats {
    pub party: PartyName,
    pub votes: u64,
    pub direct_seats: u32,
    pub remainder_seats: u32,
}

impl PartySeats {
    #[inline]
    pub fn total_seats(&self) -> u32 {
        self.direct_seats.saturating_add(self.remainder_seats)
    }
}

/// One remainder ("sobra") round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RoundRecord {
    /// 1-based round index.
    pub round: u32,
    pub party: PartyName,
    /// Winning quotient `votes / divisor`.
    pub quotient: Ratio,
    /// Winner's seats before the round, plus one.
    pub divisor: u32,
    /// Cumulative seat filled by this round (`Σ direct + round`).
    pub seat_number: u32,
    /// Best of the other parties in this round; `None` with a single eligible party.
    pub runner_up: Option<RunnerUp>,
}

/// Party with the second-largest quotient in a round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RunnerUp {
    pub party: PartyName,
    pub quotient: Ratio,
    pub divisor: u32,
}

/// How the seat total relates to `S`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum SeatStatus {
    /// Exactly `S` seats were awarded.
    Complete,
    /// No eligible party could take the remaining seats.
    Unfilled { unfilled: u32 },
    /// Direct seats alone exceed `S` by `excess`.
    Oversubscribed { excess: u64 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DhondtOutcome {
    /// Same order as the input slice.
    pub seats: Vec<PartySeats>,
    pub rounds: Vec<RoundRecord>,
    pub direct_total: u64,
    pub status: SeatStatus,
}

/// Allocate `config.seats()` among `eligible` (already filtered, caller order).
///
/// *Notes*:
/// - Zero eligible parties is not an error: all seats are reported unfilled.
/// - The loop costs O(S × P).
pub fn allocate_dhondt(eligible: &[PartyVotes], config: &ElectionConfig) -> DhondtOutcome {
    let mut seats: Vec<PartySeats> = eligible
        .iter()
        .map(|pv| PartySeats {
            party: pv.party.clone(),
            votes: pv.votes,
            direct_seats: config.direct_seats(pv.votes),
            remainder_seats: 0,
        })
        .collect();

    let direct_total: u64 = seats.iter().map(|s| u64::from(s.direct_seats)).sum();
    let total = u64::from(config.seats());

    if direct_total > total {
        let excess = direct_total - total;
        warn!(direct_total, seats = total, excess, "direct seats exceed the seat total");
        return DhondtOutcome {
            seats,
            rounds: Vec::new(),
            direct_total,
            status: SeatStatus::Oversubscribed { excess },
        };
    }

    // Bounded by `config.seats()` here, so the narrowing is lossless.
    let distributed = direct_total as u32;
    let remaining = config.seats() - distributed;

    let mut rounds = Vec::new();
    for round in 1..=remaining {
        let Some(ix) = best_quotient(&seats, None) else {
            break;
        };
        let runner_up = best_quotient(&seats, Some(ix)).map(|j| {
            let r = &seats[j];
            RunnerUp {
                party: r.party.clone(),
                quotient: Ratio::party_quotient(r.votes, r.total_seats()),
                divisor: r.total_seats().saturating_add(1),
            }
        });

        let winner = &mut seats[ix];
        let divisor = winner.total_seats().saturating_add(1);
        let quotient = Ratio::party_quotient(winner.votes, winner.total_seats());
        winner.remainder_seats += 1;
        debug!(round, party = %winner.party, quotient = %quotient, "remainder seat awarded");
        rounds.push(RoundRecord {
            round,
            party: winner.party.clone(),
            quotient,
            divisor,
            seat_number: distributed + round,
            runner_up,
        });
    }

    let awarded = rounds.len() as u32;
    let status = if awarded == remaining {
        SeatStatus::Complete
    } else {
        let unfilled = remaining - awarded;
        warn!(unfilled, "no eligible party left to take remaining seats");
        SeatStatus::Unfilled { unfilled }
    };

    DhondtOutcome { seats, rounds, direct_total, status }
}

/// Index of the strictly largest `v/(s+1)`, leaving out `skip`; the earliest
/// index wins exact ties.
fn best_quotient(seats: &[PartySeats], skip: Option<usize>) -> Option<usize> {
    let mut best: Option<(usize, Ratio)> = None;
    for (ix, s) in seats.iter().enumerate() {
        if Some(ix) == skip {
            continue;
        }
        let q = Ratio::party_quotient(s.votes, s.total_seats());
        match best {
            Some((_, best_q)) if q <= best_q => {}
            _ => best = Some((ix, q)),
        }
    }
    best.map(|(ix, _)| ix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pv(name: &str, votes: u64) -> PartyVotes {
        PartyVotes { party: name.parse().unwrap(), votes }
    }

    fn cfg(q: u64, s: u32) -> ElectionConfig {
        ElectionConfig::new(q, s).unwrap()
    }

    #[test]
    fn remainder_rounds_follow_highest_average() {
        let out = allocate_dhondt(&[pv("A", 2500), pv("B", 1800)], &cfg(1000, 5));
        assert_eq!(out.direct_total, 3);
        assert_eq!(out.status, SeatStatus::Complete);

        let winners: Vec<(&str, u32)> = out.rounds.iter().map(|r| (r.party.as_str(), r.seat_number)).collect();
        assert_eq!(winners, [("B", 4), ("A", 5)]);
        assert_eq!(out.rounds[0].quotient, Ratio::new(900, 1).unwrap());
        assert_eq!(out.rounds[1].quotient, Ratio::new(2500, 3).unwrap());

        let totals: Vec<u32> = out.seats.iter().map(PartySeats::total_seats).collect();
        assert_eq!(totals, [3, 2]);
    }

    #[test]
    fn rounds_record_divisors_and_runner_up() {
        let out = allocate_dhondt(&[pv("A", 2500), pv("B", 1800), pv("D", 850)], &cfg(1000, 6));
        let got: Vec<(&str, u32, Option<(&str, u32)>)> = out
            .rounds
            .iter()
            .map(|r| {
                let ru = r.runner_up.as_ref().map(|ru| (ru.party.as_str(), ru.divisor));
                (r.party.as_str(), r.divisor, ru)
            })
            .collect();
        assert_eq!(
            got,
            [("B", 2, Some(("D", 1))), ("D", 1, Some(("A", 3))), ("A", 3, Some(("B", 3)))]
        );
        let last = out.rounds[2].runner_up.as_ref().unwrap();
        assert_eq!(last.quotient, Ratio::new(600, 1).unwrap());
    }

    #[test]
    fn single_party_rounds_have_no_runner_up() {
        let out = allocate_dhondt(&[pv("A", 900)], &cfg(1000, 2));
        assert_eq!(out.rounds.len(), 2);
        assert!(out.rounds.iter().all(|r| r.runner_up.is_none()));
        assert_eq!(out.rounds[1].divisor, 2);
    }

    #[test]
    fn tied_runner_up_is_first_in_caller_order() {
        let out = allocate_dhondt(&[pv("X", 500), pv("Y", 500), pv("Z", 500)], &cfg(1000, 1));
        assert_eq!(out.rounds[0].party.as_str(), "X");
        assert_eq!(out.rounds[0].runner_up.as_ref().map(|r| r.party.as_str()), Some("Y"));
    }

    #[test]
    fn exact_tie_goes_to_first_in_caller_order() {
        let out = allocate_dhondt(&[pv("X", 500), pv("Y", 500)], &cfg(1000, 1));
        assert_eq!(out.rounds[0].party.as_str(), "X");

        let out = allocate_dhondt(&[pv("Y", 500), pv("X", 500)], &cfg(1000, 1));
        assert_eq!(out.rounds[0].party.as_str(), "Y");
    }

    #[test]
    fn oversubscription_is_reported_not_truncated() {
        let out = allocate_dhondt(&[pv("A", 3000), pv("B", 2000)], &cfg(1000, 4));
        assert_eq!(out.status, SeatStatus::Oversubscribed { excess: 1 });
        assert!(out.rounds.is_empty());
        let totals: Vec<u32> = out.seats.iter().map(PartySeats::total_seats).collect();
        assert_eq!(totals, [3, 2]);
    }

    #[test]
    fn no_eligible_parties_leaves_seats_unfilled() {
        let out = allocate_dhondt(&[], &cfg(1000, 4));
        assert_eq!(out.status, SeatStatus::Unfilled { unfilled: 4 });
        assert!(out.rounds.is_empty());
        assert!(out.seats.is_empty());
    }

    #[test]
    fn zero_seats_is_trivially_complete() {
        let out = allocate_dhondt(&[pv("A", 900)], &cfg(1000, 0));
        assert_eq!(out.status, SeatStatus::Complete);
        assert_eq!(out.seats[0].total_seats(), 0);
    }
}
