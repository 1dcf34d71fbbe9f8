//! Candidate selection: which named candidates fill a party's seats.
//!
//! Candidates meeting `0.2 × Q` personal votes fill seats first, then the
//! rest; both groups by votes descending with roster order kept on ties.
//! Position `i` (1-based) is a `Direct` seat iff `i ≤ floor(partyVotes / Q)`,
//! regardless of which group the candidate came from.

#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::{debug, warn};

use ap_core::{Candidate, ElectionConfig, Party, PartyName, Roster};

use crate::allocation::Allocation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ElectionKind {
    Direct,
    Remainder,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ElectedCandidate {
    pub party: PartyName,
    pub name: String,
    pub votes: u64,
    /// 1-based rank inside the party's elected set.
    pub position: u32,
    pub kind: ElectionKind,
    /// Candidate personally reached `0.2 × Q`.
    pub met_threshold: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Selection {
    pub party: PartyName,
    /// Seats the party won.
    pub seats: u32,
    pub elected: Vec<ElectedCandidate>,
    /// Seats left without a candidate because the list ran out.
    pub shortfall: u32,
}

impl Selection {
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.shortfall > 0
    }
}

pub fn select_candidates(party: &Party, seats: u32, config: &ElectionConfig) -> Selection {
    let direct = config.direct_seats(party.total_votes());

    let (mut qualifying, mut others): (Vec<&Candidate>, Vec<&Candidate>) = party
        .candidates
        .iter()
        .partition(|c| config.candidate_qualifies(c.votes));
    // `sort_by` is stable: equal votes keep roster order.
    qualifying.sort_by(|a, b| b.votes.cmp(&a.votes));
    others.sort_by(|a, b| b.votes.cmp(&a.votes));

    let elected: Vec<ElectedCandidate> = qualifying
        .into_iter()
        .map(|c| (c, true))
        .chain(others.into_iter().map(|c| (c, false)))
        .take(seats as usize)
        .zip(1u32..)
        .map(|((c, met_threshold), position)| ElectedCandidate {
            party: party.name.clone(),
            name: c.name.clone(),
            votes: c.votes,
            position,
            kind: if position <= direct { ElectionKind::Direct } else { ElectionKind::Remainder },
            met_threshold,
        })
        .collect();

    let shortfall = seats - elected.len() as u32;
    if shortfall > 0 {
        warn!(party = %party.name, seats, shortfall, "party won more seats than it has candidates");
    }
    debug!(party = %party.name, seats, filled = elected.len(), "candidates selected");

    Selection { party: party.name.clone(), seats, elected, shortfall }
}

/// Selections for every party that won at least one seat, in roster order.
pub fn select_all(roster: &Roster, allocation: &Allocation, config: &ElectionConfig) -> Vec<Selection> {
    roster
        .iter()
        .filter_map(|party| {
            let seats = allocation.get(party.name.as_str())?.total_seats;
            (seats > 0).then(|| select_candidates(party, seats, config))
        })
        .collect()
}

/// All elected candidates, by party name then votes descending.
pub fn elected_ledger(selections: &[Selection]) -> Vec<ElectedCandidate> {
    let mut out: Vec<ElectedCandidate> =
        selections.iter().flat_map(|s| s.elected.iter().cloned()).collect();
    out.sort_by(|a, b| a.party.cmp(&b.party).then_with(|| b.votes.cmp(&a.votes)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(name: &str, votes: &[(&str, u64)], legend: u64) -> Party {
        Party::new(
            name.parse().unwrap(),
            votes.iter().map(|(n, v)| Candidate::new(*n, *v)).collect(),
            legend,
        )
    }

    #[test]
    fn qualifying_candidates_come_first() {
        // Q = 100 → candidate bar is 20 votes; party total 300 → 3 direct positions.
        let p = party("P", &[("low", 10), ("a", 50), ("b", 15), ("c", 25)], 200);
        let cfg = ElectionConfig::new(100, 10).unwrap();
        let sel = select_candidates(&p, 4, &cfg);

        let got: Vec<(&str, bool, ElectionKind)> = sel
            .elected
            .iter()
            .map(|e| (e.name.as_str(), e.met_threshold, e.kind))
            .collect();
        assert_eq!(
            got,
            [
                ("a", true, ElectionKind::Direct),
                ("c", true, ElectionKind::Direct),
                ("b", false, ElectionKind::Direct),
                ("low", false, ElectionKind::Remainder),
            ]
        );
        assert_eq!(sel.shortfall, 0);
    }

    #[test]
    fn ties_keep_roster_order() {
        let p = party("P", &[("first", 30), ("second", 30), ("third", 30)], 0);
        let cfg = ElectionConfig::new(100, 10).unwrap();
        let sel = select_candidates(&p, 2, &cfg);
        let names: Vec<&str> = sel.elected.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }

    #[test]
    fn exhausted_list_reports_shortfall() {
        let p = party("P", &[("only", 5000)], 0);
        let cfg = ElectionConfig::new(1000, 10).unwrap();
        let sel = select_candidates(&p, 3, &cfg);
        assert_eq!(sel.elected.len(), 1);
        assert_eq!(sel.shortfall, 2);
        assert!(sel.is_exhausted());
        assert_eq!(sel.elected[0].position, 1);
    }

    #[test]
    fn ledger_orders_by_party_then_votes() {
        let cfg = ElectionConfig::new(100, 10).unwrap();
        let b = select_candidates(&party("B", &[("b1", 40), ("b2", 90)], 0), 2, &cfg);
        let a = select_candidates(&party("A", &[("a1", 60)], 0), 1, &cfg);
        let ledger = elected_ledger(&[b, a]);
        let names: Vec<&str> = ledger.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a1", "b2", "b1"]);
    }
}
