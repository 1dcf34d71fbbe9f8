//! build_outcome.rs
//! Assemble the idless outcome body, hash its canonical bytes into `RES:<sha>`,
//! and return the identified `Outcome`.

use std::collections::BTreeMap;

use serde::Serialize;

use ap_algo::{Allocation, ElectedCandidate, ExpectedRank, RemainderStandings, RiskReport, Selection};
use ap_core::{split_by_gender, ElectionConfig, GenderGroups, PartyName, Ratio, Roster};
use ap_io::hasher;
use ap_io::scenario::{Scenario, ScenarioKind};

use crate::allocate::AllocateOutput;
use crate::PipelineError;

/// Scenario metadata echoed into the outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScenarioEcho {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: ScenarioKind,
    pub party_colors: BTreeMap<String, String>,
    /// sha256 of the scenario's canonical JSON.
    pub digest: String,
}

impl From<&Scenario> for ScenarioEcho {
    fn from(s: &Scenario) -> Self {
        ScenarioEcho {
            id: s.meta.id.clone(),
            name: s.meta.name.clone(),
            description: s.meta.description.clone(),
            kind: s.meta.kind,
            party_colors: s.meta.party_colors.clone(),
            digest: s.digest.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConfigEcho {
    pub quotient: u64,
    pub seats: u32,
    /// `0.8 × Q`
    pub party_threshold: Ratio,
    /// `0.2 × Q`
    pub candidate_threshold: Ratio,
}

impl From<&ElectionConfig> for ConfigEcho {
    fn from(c: &ElectionConfig) -> Self {
        ConfigEcho {
            quotient: c.quotient(),
            seats: c.seats(),
            party_threshold: c.party_threshold(),
            candidate_threshold: c.candidate_threshold(),
        }
    }
}

/// Presentation-only gender blocks of one party's list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PartyGroups {
    pub party: PartyName,
    #[serde(flatten)]
    pub groups: GenderGroups,
}

/// Outcome without its id; this is what gets hashed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OutcomeBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioEcho>,
    pub config: ConfigEcho,
    pub allocation: Allocation,
    pub selections: Vec<Selection>,
    pub elected: Vec<ElectedCandidate>,
    pub standings: RemainderStandings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<ExpectedRank>,
    pub gender_groups: Vec<PartyGroups>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// `RES:<sha256 of canonical body>`
    pub id: String,
    #[serde(flatten)]
    pub body: OutcomeBody,
}

pub fn build_outcome(
    roster: &Roster,
    config: &ElectionConfig,
    allocated: AllocateOutput,
    risk: Option<RiskReport>,
    ranking: Option<ExpectedRank>,
    scenario: Option<ScenarioEcho>,
) -> Result<Outcome, PipelineError> {
    let gender_groups = roster
        .iter()
        .map(|p| PartyGroups { party: p.name.clone(), groups: split_by_gender(&p.candidates) })
        .collect();

    let body = OutcomeBody {
        scenario,
        config: ConfigEcho::from(config),
        allocation: allocated.allocation,
        selections: allocated.selections,
        elected: allocated.ledger,
        standings: allocated.standings,
        risk,
        ranking,
        gender_groups,
    };

    let id = hasher::res_id_from_canonical(&body).map_err(|e| PipelineError::Build(e.to_string()))?;
    Ok(Outcome { id, body })
}
