//! ap_pipeline: deterministic pipeline surface (allocate → select → standings → risk → rank → build).
//! This crate does no file I/O of its own; scenario loading and canonical JSON
//! live in `ap_io`, the arithmetic in `ap_algo`.
//!
//! Identical inputs produce byte-identical canonical outcome documents.

#![forbid(unsafe_code)]

use thiserror::Error;
use tracing::info;

use ap_algo::{rank_expected_votes, AllocError};
use ap_core::{CoreError, ElectionConfig, Roster};
use ap_io::{canonical_json, scenario::Scenario, IoError};

pub mod allocate;
pub mod assess;
pub mod build_outcome;

pub use allocate::{allocate_stage, AllocateOutput};
pub use assess::assess_stage;
pub use build_outcome::{build_outcome, ConfigEcho, Outcome, OutcomeBody, PartyGroups, ScenarioEcho};

/// Single error surface for the pipeline orchestration.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Roster, configuration, or focus party rejected.
    #[error("validation: {0}")]
    Validate(String),

    #[error(transparent)]
    Io(#[from] IoError),

    /// Outcome document could not be serialized or identified.
    #[error("build: {0}")]
    Build(String),
}

impl From<CoreError> for PipelineError {
    fn from(e: CoreError) -> Self {
        PipelineError::Validate(e.to_string())
    }
}

impl From<AllocError> for PipelineError {
    fn from(e: AllocError) -> Self {
        PipelineError::Validate(e.to_string())
    }
}

/// Optional analyses layered on top of the apportionment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Focus party for the risk ranking and seat margin.
    pub focus: Option<String>,
    /// Expected personal votes to rank against every candidate.
    pub expected_votes: Option<u64>,
    /// Candidate the expectation belongs to; left out of the comparison.
    pub candidate: Option<String>,
}

impl RunOptions {
    pub fn with_focus(focus: Option<&str>) -> Self {
        RunOptions { focus: focus.map(str::to_string), ..RunOptions::default() }
    }
}

/// Run the engine over an explicit roster and configuration.
///
/// `focus` selects the party for the risk ranking; `None` skips that stage.
pub fn run(roster: &Roster, config: &ElectionConfig, focus: Option<&str>) -> Result<Outcome, PipelineError> {
    execute(roster, config, &RunOptions::with_focus(focus), None)
}

/// Run a loaded scenario. `focus_override` wins over the scenario's own focus party.
pub fn run_scenario(scenario: &Scenario, focus_override: Option<&str>) -> Result<Outcome, PipelineError> {
    run_scenario_with(scenario, &RunOptions::with_focus(focus_override))
}

/// Run a loaded scenario with explicit options; `opts.focus` wins over the scenario's focus party.
pub fn run_scenario_with(scenario: &Scenario, opts: &RunOptions) -> Result<Outcome, PipelineError> {
    let mut opts = opts.clone();
    if opts.focus.is_none() {
        opts.focus = scenario.focus_party.clone();
    }
    execute(&scenario.roster, &scenario.config, &opts, Some(ScenarioEcho::from(scenario)))
}

/// Canonical JSON bytes of an outcome (sorted keys, compact).
pub fn outcome_bytes(outcome: &Outcome) -> Result<Vec<u8>, PipelineError> {
    Ok(canonical_json::to_canonical_bytes(outcome)?)
}

fn execute(
    roster: &Roster,
    config: &ElectionConfig,
    opts: &RunOptions,
    scenario: Option<ScenarioEcho>,
) -> Result<Outcome, PipelineError> {
    let allocated = allocate_stage(roster, config);
    let risk = assess_stage(&allocated.allocation, config, opts.focus.as_deref())?;
    let ranking = opts
        .expected_votes
        .and_then(|v| rank_expected_votes(roster, v, opts.candidate.as_deref()));
    let outcome = build_outcome(roster, config, allocated, risk, ranking, scenario)?;

    info!(
        id = %outcome.id,
        seats = config.seats(),
        awarded = outcome.body.allocation.seats_awarded(),
        "apportionment complete"
    );
    Ok(outcome)
}
