//! Remainder standings ("sobras" table): each party's division by Q and its
//! first remainder-round quotient, before any remainder seat is handed out.

#[cfg(feature = "serde")]
use serde::Serialize;

use ap_core::{ElectionConfig, PartyName, Ratio};

use crate::PartyVotes;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StandingRow {
    pub party: PartyName,
    pub votes: u64,
    pub direct_seats: u32,
    /// `votes / Q`.
    pub projection: Ratio,
    /// `projection` with two decimals, e.g. "2.50".
    pub projected_elected: String,
    pub eligible: bool,
    /// `votes / (direct + 1)` for eligible parties, zero otherwise.
    pub quotient: Ratio,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RemainderStandings {
    /// Input order.
    pub rows: Vec<StandingRow>,
    /// Eligible parties by quotient descending; ties keep input order.
    pub ranked: Vec<PartyName>,
    /// Largest quotient among eligible parties (zero if none).
    pub largest_quotient: Ratio,
}

pub fn remainder_standings(snapshot: &[PartyVotes], config: &ElectionConfig) -> RemainderStandings {
    let rows: Vec<StandingRow> = snapshot
        .iter()
        .map(|pv| {
            let direct_seats = config.direct_seats(pv.votes);
            let eligible = config.party_eligible(pv.votes);
            let projection = config.projection(pv.votes);
            StandingRow {
                party: pv.party.clone(),
                votes: pv.votes,
                direct_seats,
                projected_elected: projection.to_fixed_2(),
                projection,
                eligible,
                quotient: if eligible {
                    Ratio::party_quotient(pv.votes, direct_seats)
                } else {
                    Ratio::ZERO
                },
            }
        })
        .collect();

    let mut eligible: Vec<&StandingRow> = rows.iter().filter(|r| r.eligible).collect();
    eligible.sort_by(|a, b| b.quotient.cmp(&a.quotient));

    let largest_quotient = eligible.first().map_or(Ratio::ZERO, |r| r.quotient);
    let ranked = eligible.into_iter().map(|r| r.party.clone()).collect();

    RemainderStandings { rows, ranked, largest_quotient }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_eligible_by_first_quotient() {
        let snap = [
            PartyVotes { party: "A".parse().unwrap(), votes: 2500 },
            PartyVotes { party: "B".parse().unwrap(), votes: 1800 },
            PartyVotes { party: "C".parse().unwrap(), votes: 600 },
        ];
        let st = remainder_standings(&snap, &ElectionConfig::new(1000, 5).unwrap());

        let ranked: Vec<&str> = st.ranked.iter().map(PartyName::as_str).collect();
        assert_eq!(ranked, ["B", "A"]);
        assert_eq!(st.largest_quotient, Ratio::new(900, 1).unwrap());

        let c = &st.rows[2];
        assert!(!c.eligible);
        assert_eq!(c.quotient, Ratio::ZERO);
        assert_eq!(c.projected_elected, "0.60");
        assert_eq!(st.rows[0].projected_elected, "2.50");
    }
}
