//! Where an expected personal vote count would place among every candidate of
//! every party: one plus the number of candidates strictly above it.

#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::debug;

use ap_core::Roster;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ExpectedRank {
    pub expected_votes: u64,
    /// 1-based; equal vote counts do not push the position down.
    pub position: u32,
    /// Candidates compared against (the excluded candidate is not counted).
    pub total_candidates: u32,
}

/// Rank `expected_votes` against the whole roster.
///
/// `exclude` names the candidate the expectation belongs to, matched trimmed
/// and ASCII case-insensitively in every party. Zero expected votes gives `None`.
pub fn rank_expected_votes(roster: &Roster, expected_votes: u64, exclude: Option<&str>) -> Option<ExpectedRank> {
    if expected_votes == 0 {
        return None;
    }
    let exclude = exclude.map(str::trim).filter(|n| !n.is_empty());

    let (above, total) = roster
        .iter()
        .flat_map(|p| p.candidates.iter())
        .filter(|c| exclude.map_or(true, |x| !c.name.trim().eq_ignore_ascii_case(x)))
        .fold((0u32, 0u32), |(above, total), c| {
            (above.saturating_add(u32::from(c.votes > expected_votes)), total.saturating_add(1))
        });

    debug!(expected_votes, position = above + 1, total, "expected votes ranked");
    Some(ExpectedRank { expected_votes, position: above.saturating_add(1), total_candidates: total })
}
