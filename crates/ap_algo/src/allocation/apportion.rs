//! Full-roster apportionment: eligibility filter followed by D’Hondt, reported
//! for every party (ineligible parties appear with zero seats).

#[cfg(feature = "serde")]
use serde::Serialize;

use ap_core::{ElectionConfig, PartyName, Roster};

use super::dhondt::{allocate_dhondt, RoundRecord, SeatStatus};
use crate::eligibility::{eligible_snapshot, filter_eligibility};
use crate::PartyVotes;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PartyAllocation {
    pub party: PartyName,
    pub votes: u64,
    pub eligible: bool,
    pub direct_seats: u32,
    pub remainder_seats: u32,
    pub total_seats: u32,
}

/// Allocation result for a whole roster, parties in roster order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Allocation {
    pub parties: Vec<PartyAllocation>,
    pub rounds: Vec<RoundRecord>,
    /// Σ direct seats over eligible parties.
    pub direct_total: u64,
    /// `S`, echoed.
    pub seats: u32,
    pub status: SeatStatus,
}

impl Allocation {
    pub fn get(&self, party: &str) -> Option<&PartyAllocation> {
        self.parties.iter().find(|p| p.party == party)
    }

    /// Σ total seats over all parties.
    pub fn seats_awarded(&self) -> u64 {
        self.parties.iter().map(|p| u64::from(p.total_seats)).sum()
    }

    /// Every party's votes, in roster order.
    pub fn vote_snapshot(&self) -> Vec<PartyVotes> {
        self.parties
            .iter()
            .map(|p| PartyVotes { party: p.party.clone(), votes: p.votes })
            .collect()
    }
}

pub fn apportion(roster: &Roster, config: &ElectionConfig) -> Allocation {
    let rows = filter_eligibility(roster, config);
    let outcome = allocate_dhondt(&eligible_snapshot(&rows), config);

    // `outcome.seats` holds the eligible rows in the same relative order.
    let mut won = outcome.seats.into_iter();
    let parties = rows
        .into_iter()
        .map(|row| {
            let (direct_seats, remainder_seats) = if row.eligible {
                won.next().map_or((0, 0), |s| (s.direct_seats, s.remainder_seats))
            } else {
                (0, 0)
            };
            PartyAllocation {
                party: row.party,
                votes: row.total_votes,
                eligible: row.eligible,
                direct_seats,
                remainder_seats,
                total_seats: direct_seats.saturating_add(remainder_seats),
            }
        })
        .collect();

    Allocation {
        parties,
        rounds: outcome.rounds,
        direct_total: outcome.direct_total,
        seats: config.seats(),
        status: outcome.status,
    }
}
