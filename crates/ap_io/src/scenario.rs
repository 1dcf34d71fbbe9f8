//! Scenario files: the on-disk roster + configuration a run starts from.
//!
//! Load order: read → parse JSON → validate against the embedded schema →
//! typed deserialize → fold legend pseudo-candidates → build `Roster` and
//! `ElectionConfig`. Party order in the file is kept; it is the tie-break order.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use jsonschema::{Draft, JSONSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use ap_core::{Candidate, ElectionConfig, Gender, Party, PartyName, Roster};

use crate::{hasher, looks_like_url_strict, IoError};

/// Candidate name some scenario sources use to carry a party's legend votes.
pub const LEGEND_PSEUDO_CANDIDATE: &str = "VOTOS LEGENDA";

const SCENARIO_SCHEMA_JSON: &str = include_str!("../schemas/scenario.schema.json");

// ----------------------------- Wire-facing types -----------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    /// Official or reference figures.
    Base,
    /// User-edited what-if.
    #[default]
    Simulation,
}

/// Scenario file as written on disk (mirrors `schemas/scenario.schema.json`).
///
/// `quotient` and `seats` stay signed here so that out-of-range values reach
/// `ElectionConfig::from_signed` and are reported as configuration errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFile {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub kind: ScenarioKind,
    pub quotient: i64,
    pub seats: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_party: Option<String>,
    pub parties: Vec<PartyEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartyEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub legend_votes: u64,
    pub candidates: Vec<CandidateEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CandidateEntry {
    pub name: String,
    pub votes: u64,
    #[serde(default)]
    pub gender: Gender,
}

// ----------------------------- Loaded scenario -----------------------------

/// Descriptive fields carried through to the outcome; the engine ignores them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScenarioMeta {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: ScenarioKind,
    /// Display color per party name, for parties that declare one.
    pub party_colors: BTreeMap<String, String>,
}

/// Validated scenario ready for the pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scenario {
    pub meta: ScenarioMeta,
    pub roster: Roster,
    pub config: ElectionConfig,
    pub focus_party: Option<String>,
    /// SHA-256 of the scenario's canonical JSON.
    pub digest: String,
}

// ----------------------------- Loading -----------------------------

/// Load a scenario from a local file path. URL-like paths are rejected.
pub fn load_scenario_file(path: &Path) -> Result<Scenario, IoError> {
    let shown = path.to_string_lossy();
    if looks_like_url_strict(&shown) {
        return Err(IoError::Invalid(format!("scenario path must be a local file, got {shown}")));
    }
    let text = fs::read_to_string(path).map_err(|e| IoError::Path(format!("{shown}: {e}")))?;
    debug!(path = %shown, bytes = text.len(), "scenario file read");
    parse_scenario_str(&text)
}

/// Parse, validate and build a scenario from JSON text.
pub fn parse_scenario_str(text: &str) -> Result<Scenario, IoError> {
    let raw: Value = serde_json::from_str(text)?;
    validate_scenario_value(&raw)?;
    let digest = hasher::sha256_canonical_value(&raw)?;
    let file: ScenarioFile = serde_json::from_value(raw)?;
    file.into_scenario(digest)
}

/// Validate a parsed document against the embedded scenario schema.
/// Reports the first violation with its instance path.
pub fn validate_scenario_value(raw: &Value) -> Result<(), IoError> {
    let schema: Value = serde_json::from_str(SCENARIO_SCHEMA_JSON)
        .map_err(|e| IoError::Invalid(format!("invalid embedded scenario.schema.json: {e}")))?;
    let compiled = JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .map_err(|e| IoError::Invalid(format!("schema compile error: {e}")))?;

    if let Err(mut errors) = compiled.validate(raw) {
        if let Some(err) = errors.next() {
            let ptr = err.instance_path.to_string();
            return Err(IoError::Schema {
                pointer: if ptr.is_empty() { "/".to_string() } else { ptr },
                msg: err.to_string(),
            });
        }
    }
    Ok(())
}

impl ScenarioFile {
    /// Build the engine-facing scenario. `digest` identifies the source document.
    pub fn into_scenario(self, digest: String) -> Result<Scenario, IoError> {
        let config = ElectionConfig::from_signed(self.quotient, self.seats)?;

        let mut party_colors = BTreeMap::new();
        let mut parties = Vec::with_capacity(self.parties.len());
        for entry in self.parties {
            if let Some(color) = entry.color.clone() {
                party_colors.insert(entry.name.clone(), color);
            }
            parties.push(entry.into_party()?);
        }
        let roster = Roster::new(parties)?;

        let focus_party = self.focus_party.filter(|f| !f.trim().is_empty());
        if let Some(focus) = &focus_party {
            if roster.get(focus).is_none() {
                return Err(IoError::Invalid(format!("focus_party {focus:?} is not in the roster")));
            }
        }

        debug!(
            id = %self.id,
            parties = roster.len(),
            quotient = config.quotient(),
            seats = config.seats(),
            "scenario loaded"
        );

        Ok(Scenario {
            meta: ScenarioMeta {
                id: self.id,
                name: self.name,
                description: self.description,
                kind: self.kind,
                party_colors,
            },
            roster,
            config,
            focus_party,
            digest,
        })
    }
}

impl PartyEntry {
    /// Fold legend pseudo-candidates into `legend_votes` and drop them from the list.
    fn into_party(self) -> Result<Party, IoError> {
        let name = PartyName::new(self.name)?;
        let mut legend_votes = self.legend_votes;
        let mut candidates = Vec::with_capacity(self.candidates.len());

        for c in self.candidates {
            if is_legend_pseudo_candidate(&c.name) {
                warn!(party = %name, votes = c.votes, "legend pseudo-candidate folded into legend votes");
                legend_votes = legend_votes.saturating_add(c.votes);
            } else {
                candidates.push(Candidate::new(c.name, c.votes).with_gender(c.gender));
            }
        }
        Ok(Party::new(name, candidates, legend_votes))
    }
}

fn is_legend_pseudo_candidate(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case(LEGEND_PSEUDO_CANDIDATE)
}
