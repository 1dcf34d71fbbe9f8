//! crates/ap_algo/tests/properties.rs
//! Property tests: seat totals, direct-seat exactness, round-history replay,
//! selection ordering and risk-delta exactness.

use proptest::prelude::*;

use ap_algo::allocation::Allocation;
use ap_algo::risk::rank_rivals;
use ap_algo::{apportion, select_candidates, vote_snapshot, Delta, SeatStatus};
use ap_core::{Candidate, ElectionConfig, Party, PartyName, Ratio, Roster};

fn roster_from(votes: &[u64]) -> Roster {
    Roster::new(
        votes
            .iter()
            .enumerate()
            .map(|(i, v)| Party::new(format!("P{i}").parse().unwrap(), vec![Candidate::new("c", *v)], 0))
            .collect(),
    )
    .unwrap()
}

fn eligible_count(alloc: &Allocation) -> usize {
    alloc.parties.iter().filter(|p| p.eligible).count()
}

proptest! {
    #[test]
    fn seat_total_never_exceeds_house(
        votes in prop::collection::vec(0u64..6_000, 0..7),
        q in 1u64..2_000,
        s in 0u32..25,
    ) {
        let cfg = ElectionConfig::new(q, s).unwrap();
        let alloc = apportion(&roster_from(&votes), &cfg);

        match alloc.status {
            SeatStatus::Oversubscribed { excess } => {
                prop_assert_eq!(alloc.seats_awarded(), u64::from(s) + excess);
                prop_assert!(alloc.rounds.is_empty());
            }
            SeatStatus::Complete => {
                prop_assert_eq!(alloc.seats_awarded(), u64::from(s));
            }
            SeatStatus::Unfilled { unfilled } => {
                prop_assert_eq!(eligible_count(&alloc), 0);
                prop_assert_eq!(u64::from(unfilled), u64::from(s));
            }
        }
    }

    #[test]
    fn direct_seats_are_exact_floor(
        votes in prop::collection::vec(0u64..6_000, 1..7),
        q in 1u64..2_000,
        s in 0u32..25,
    ) {
        let cfg = ElectionConfig::new(q, s).unwrap();
        let alloc = apportion(&roster_from(&votes), &cfg);
        for (p, v) in alloc.parties.iter().zip(&votes) {
            prop_assert_eq!(p.eligible, 5 * v >= 4 * q);
            if p.eligible {
                prop_assert_eq!(u64::from(p.direct_seats), v / q);
            } else {
                prop_assert_eq!(p.total_seats, 0);
            }
        }
    }

    #[test]
    fn round_history_replays(
        votes in prop::collection::vec(0u64..6_000, 1..7),
        q in 1u64..2_000,
        s in 0u32..25,
    ) {
        let cfg = ElectionConfig::new(q, s).unwrap();
        let alloc = apportion(&roster_from(&votes), &cfg);

        if eligible_count(&alloc) > 0 {
            let expected = u64::from(s).saturating_sub(alloc.direct_total);
            prop_assert_eq!(alloc.rounds.len() as u64, expected);
        }

        let mut held: Vec<u32> = alloc.parties.iter().map(|p| p.direct_seats).collect();
        for round in &alloc.rounds {
            let ix = alloc.parties.iter().position(|p| p.party == round.party).unwrap();
            prop_assert_eq!(round.quotient, Ratio::party_quotient(alloc.parties[ix].votes, held[ix]));
            prop_assert_eq!(round.divisor, held[ix] + 1);
            if let Some(ru) = &round.runner_up {
                let k = alloc.parties.iter().position(|p| p.party == ru.party).unwrap();
                prop_assert!(k != ix);
                prop_assert_eq!(ru.divisor, held[k] + 1);
                prop_assert!(ru.quotient <= round.quotient);
                for (j, p) in alloc.parties.iter().enumerate() {
                    if p.eligible && j != ix {
                        prop_assert!(Ratio::party_quotient(p.votes, held[j]) <= ru.quotient);
                    }
                }
            } else {
                prop_assert_eq!(eligible_count(&alloc), 1);
            }
            for (j, p) in alloc.parties.iter().enumerate() {
                if p.eligible {
                    let q_j = Ratio::party_quotient(p.votes, held[j]);
                    prop_assert!(q_j <= round.quotient);
                    // Earlier parties would have won an exact tie.
                    if j < ix {
                        prop_assert!(q_j < round.quotient);
                    }
                }
            }
            held[ix] += 1;
        }
    }

    #[test]
    fn apportion_is_deterministic(
        votes in prop::collection::vec(0u64..6_000, 0..7),
        q in 1u64..2_000,
        s in 0u32..25,
    ) {
        let cfg = ElectionConfig::new(q, s).unwrap();
        let r = roster_from(&votes);
        prop_assert_eq!(apportion(&r, &cfg), apportion(&r, &cfg));
    }

    #[test]
    fn selection_is_bounded_and_ordered(
        votes in prop::collection::vec(0u64..300, 0..10),
        seats in 0u32..12,
        q in 1u64..500,
    ) {
        let cfg = ElectionConfig::new(q, 20).unwrap();
        let party = Party::new(
            "P".parse().unwrap(),
            votes.iter().enumerate().map(|(i, v)| Candidate::new(format!("c{i}"), *v)).collect(),
            0,
        );
        let sel = select_candidates(&party, seats, &cfg);

        prop_assert!(sel.elected.len() as u32 <= seats);
        prop_assert_eq!(sel.elected.len(), votes.len().min(seats as usize));
        prop_assert_eq!(sel.shortfall, seats - sel.elected.len() as u32);
        // Once a non-qualifying candidate appears, no qualifying one follows.
        let flags: Vec<bool> = sel.elected.iter().map(|e| e.met_threshold).collect();
        prop_assert!(flags.windows(2).all(|w| w[0] || !w[1]));
    }

    #[test]
    fn overtake_delta_is_the_exact_ceiling(
        votes in prop::collection::vec(0u64..6_000, 2..6),
        q in 1u64..2_000,
    ) {
        let cfg = ElectionConfig::new(q, 10).unwrap();
        let focus: PartyName = "P0".parse().unwrap();
        let focus_votes = votes[0];
        let target = Ratio::party_quotient(focus_votes, cfg.direct_seats(focus_votes));

        let rivals = rank_rivals(&vote_snapshot(&roster_from(&votes)), &cfg, &focus, 1).unwrap();
        prop_assert_eq!(rivals.len(), votes.len() - 1);
        prop_assert!(rivals.windows(2).all(|w| w[0].minimum <= w[1].minimum));

        for r in &rivals {
            prop_assert_eq!(r.to_direct, Delta::Votes(q.saturating_sub(r.votes)));
            let den = u64::from(cfg.direct_seats(r.votes)) + 1;
            match r.to_overtake {
                Delta::Unreachable => prop_assert!(!r.eligible),
                Delta::Votes(0) => {
                    prop_assert!(Ratio::new(r.votes, den).unwrap() >= target);
                }
                Delta::Votes(d) => {
                    prop_assert!(Ratio::new(r.votes + d, den).unwrap() >= target);
                    prop_assert!(Ratio::new(r.votes + d - 1, den).unwrap() < target);
                }
            }
        }
    }
}
