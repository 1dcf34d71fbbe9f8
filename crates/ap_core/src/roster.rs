//! Roster model: parties, their ordered candidate lists, and legend votes.
//!
//! The roster is an immutable value. Edits (adding a candidate) return a new
//! list or party; the gender grouping they maintain is display ordering only
//! and never feeds apportionment or candidate selection.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::ids::PartyName;

/// Display tag used to keep candidate lists grouped; no electoral meaning.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Candidate {
    pub name: String,
    pub votes: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gender: Gender,
}

impl Candidate {
    pub fn new(name: impl Into<String>, votes: u64) -> Self {
        Candidate { name: name.into(), votes, gender: Gender::Unspecified }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    #[inline]
    pub fn is_female(&self) -> bool {
        self.gender == Gender::Female
    }
}

/// A party: unique name, ordered candidates, and votes cast for the label itself.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Party {
    pub name: PartyName,
    pub candidates: Vec<Candidate>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub legend_votes: u64,
}

impl Party {
    pub fn new(name: PartyName, candidates: Vec<Candidate>, legend_votes: u64) -> Self {
        Party { name, candidates, legend_votes }
    }

    /// Σ candidate votes + legend votes.
    pub fn total_votes(&self) -> u64 {
        self.candidates
            .iter()
            .fold(self.legend_votes, |acc, c| acc.saturating_add(c.votes))
    }

    /// New party with `candidate` placed by the gender-grouping rule.
    pub fn with_candidate(&self, candidate: Candidate) -> Party {
        Party {
            name: self.name.clone(),
            candidates: insert_candidate(&self.candidates, candidate),
            legend_votes: self.legend_votes,
        }
    }
}

/// Insert `candidate` keeping the list as a male block followed by a female block.
///
/// - female: right after the last female candidate, or at the end if there is none;
/// - male or unspecified: right before the first female candidate, or at the end.
pub fn insert_candidate(list: &[Candidate], candidate: Candidate) -> Vec<Candidate> {
    let mut out = list.to_vec();
    let at = if candidate.is_female() {
        out.iter().rposition(Candidate::is_female).map(|i| i + 1)
    } else {
        out.iter().position(Candidate::is_female)
    };
    match at {
        Some(i) => out.insert(i, candidate),
        None => out.push(candidate),
    }
    out
}

/// Candidate with its 1-based number inside its gender group.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NumberedCandidate {
    pub number: u32,
    pub candidate: Candidate,
}

/// Presentation split: non-female and female blocks, each by votes descending.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GenderGroups {
    pub men: Vec<NumberedCandidate>,
    pub women: Vec<NumberedCandidate>,
}

pub fn split_by_gender(list: &[Candidate]) -> GenderGroups {
    let group = |female: bool| -> Vec<NumberedCandidate> {
        let mut block: Vec<&Candidate> = list.iter().filter(|c| c.is_female() == female).collect();
        block.sort_by(|a, b| b.votes.cmp(&a.votes));
        block
            .into_iter()
            .zip(1u32..)
            .map(|(c, number)| NumberedCandidate { number, candidate: c.clone() })
            .collect()
    };
    GenderGroups { men: group(false), women: group(true) }
}

/// Ordered list of parties with unique names. Order is the caller's
/// tie-break order for the remainder rounds.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Roster {
    parties: Vec<Party>,
}

impl Roster {
    pub fn new(parties: Vec<Party>) -> Result<Self, CoreError> {
        let mut seen = BTreeSet::new();
        for p in &parties {
            if p.name.as_str().trim().is_empty() {
                return Err(CoreError::EmptyPartyName);
            }
            if !seen.insert(p.name.as_str()) {
                return Err(CoreError::DuplicatePartyName(p.name.to_string()));
            }
        }
        Ok(Roster { parties })
    }

    #[inline]
    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    pub fn get(&self, name: &str) -> Option<&Party> {
        self.parties.iter().find(|p| p.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Party> {
        self.parties.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parties.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }
}
