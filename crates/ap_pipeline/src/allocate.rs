//! ALLOCATE stage: eligibility, D'Hondt seats, candidate selection and the
//! remainder standings table, all over the same roster snapshot.

use tracing::debug;

use ap_algo::{
    apportion, elected_ledger, remainder_standings, select_all, vote_snapshot, Allocation,
    ElectedCandidate, RemainderStandings, Selection,
};
use ap_core::{ElectionConfig, Roster};

/// Everything derived from seat allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocateOutput {
    pub allocation: Allocation,
    /// Parties with at least one seat, roster order.
    pub selections: Vec<Selection>,
    /// All elected candidates, party name then votes descending.
    pub ledger: Vec<ElectedCandidate>,
    pub standings: RemainderStandings,
}

pub fn allocate_stage(roster: &Roster, config: &ElectionConfig) -> AllocateOutput {
    let allocation = apportion(roster, config);
    let selections = select_all(roster, &allocation, config);
    let ledger = elected_ledger(&selections);
    let standings = remainder_standings(&vote_snapshot(roster), config);

    debug!(
        parties = roster.len(),
        rounds = allocation.rounds.len(),
        elected = ledger.len(),
        "allocate stage done"
    );

    AllocateOutput { allocation, selections, ledger, standings }
}
