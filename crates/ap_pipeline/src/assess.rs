//! ASSESS stage: competitive risk for an optional focus party.

use ap_algo::{assess_focus, Allocation, RiskReport};
use ap_core::ElectionConfig;

use crate::PipelineError;

/// `None` focus skips the stage. A blank name counts as no focus.
pub fn assess_stage(
    allocation: &Allocation,
    config: &ElectionConfig,
    focus: Option<&str>,
) -> Result<Option<RiskReport>, PipelineError> {
    let Some(focus) = focus.map(str::trim).filter(|f| !f.is_empty()) else {
        return Ok(None);
    };
    let report = assess_focus(allocation, config, focus)?;
    tracing::debug!(focus, rivals = report.rivals.len(), "assess stage done");
    Ok(Some(report))
}
