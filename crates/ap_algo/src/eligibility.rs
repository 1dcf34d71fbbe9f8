//! Eligibility filter: a party may receive seats iff `totalVotes ≥ 0.8 × Q`.

#[cfg(feature = "serde")]
use serde::Serialize;

use ap_core::{ElectionConfig, PartyName, Roster};

use crate::PartyVotes;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EligibilityRow {
    pub party: PartyName,
    pub total_votes: u64,
    pub eligible: bool,
}

/// One row per party, in roster order.
pub fn filter_eligibility(roster: &Roster, config: &ElectionConfig) -> Vec<EligibilityRow> {
    roster
        .iter()
        .map(|p| {
            let total_votes = p.total_votes();
            EligibilityRow {
                party: p.name.clone(),
                total_votes,
                eligible: config.party_eligible(total_votes),
            }
        })
        .collect()
}

/// Eligible parties only, keeping the input order (the tie-break order).
pub fn eligible_snapshot(rows: &[EligibilityRow]) -> Vec<PartyVotes> {
    rows.iter()
        .filter(|r| r.eligible)
        .map(|r| PartyVotes { party: r.party.clone(), votes: r.total_votes })
        .collect()
}
