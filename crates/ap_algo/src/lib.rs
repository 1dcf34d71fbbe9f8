// crates/ap_algo/src/lib.rs
//! Algorithm layer of the seat-apportionment engine.
//!
//! Every function here is pure and synchronous: identical inputs produce
//! identical outputs, and nothing is retained between calls. Party order in the
//! inputs is the caller's tie-break order and is preserved in every output.

#![forbid(unsafe_code)]

#[cfg(feature = "serde")]
use serde::Serialize;
use thiserror::Error;

// Core types re-exported for callers of the algorithm surface.
pub use ap_core::{ElectionConfig, Party, PartyName, Ratio, Roster};

// ----------------------------- Vote snapshot -----------------------------------------

/// Total votes of one party. Slices of these are kept in caller order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PartyVotes {
    pub party: PartyName,
    pub votes: u64,
}

impl PartyVotes {
    pub fn of(party: &Party) -> Self {
        PartyVotes { party: party.name.clone(), votes: party.total_votes() }
    }
}

/// Snapshot of every party's total votes, in roster order.
pub fn vote_snapshot(roster: &Roster) -> Vec<PartyVotes> {
    roster.iter().map(PartyVotes::of).collect()
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum AllocError {
    /// The requested focus party is not part of the vote snapshot.
    #[error("unknown focus party: {0}")]
    UnknownFocusParty(String),
}

// ----------------------------- Stages (public surface) -------------------------------

pub mod eligibility;

pub mod allocation {
    pub mod apportion;
    pub mod dhondt;

    pub use apportion::{apportion, Allocation, PartyAllocation};
    pub use dhondt::{allocate_dhondt, DhondtOutcome, PartySeats, RoundRecord, RunnerUp, SeatStatus};
}

pub mod ranking;
pub mod risk;
pub mod selection;
pub mod standings;

// Convenience re-exports (pipeline imports these from crate root)
pub use allocation::{allocate_dhondt, apportion, Allocation, PartyAllocation, RoundRecord, RunnerUp, SeatStatus};
pub use eligibility::{eligible_snapshot, filter_eligibility, EligibilityRow};
pub use ranking::{rank_expected_votes, ExpectedRank};
pub use risk::{assess_focus, rank_rivals, seat_margin, Delta, FocusSummary, RiskEntry, RiskReport, SeatMargin};
pub use selection::{elected_ledger, select_all, select_candidates, ElectedCandidate, ElectionKind, Selection};
pub use standings::{remainder_standings, RemainderStandings, StandingRow};
