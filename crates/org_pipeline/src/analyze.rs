//! Analysis run: scope → stats → data health → score.
//!
//! The scorer only ever sees the scoped, non-archived snapshot; the digest
//! is taken over that same snapshot so two runs over equal inputs can be
//! compared by hash alone.

use serde::Serialize;
use tracing::{debug, info};

use org_algo::{compute_data_health_with, compute_stats, score_breakdown, DataHealth, HealthBand, ScoreBreakdown, Stats};
use org_core::{HealthParams, OrgNode};
use org_io::hasher::snapshot_sha256;

use crate::visibility::{active_nodes, BusinessUnitFilter};
use crate::PipelineError;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub scope: String,
    pub stats: Stats,
    pub data_health: DataHealth,
    pub score: u8,
    pub band: HealthBand,
    pub breakdown: ScoreBreakdown,
    pub snapshot_sha256: String,
}

/// Analyze `nodes` exactly as given (the caller has already scoped them).
pub fn analyze(nodes: &[OrgNode], params: &HealthParams) -> Result<Analysis, PipelineError> {
    run(nodes, params, "ALL".to_string())
}

/// Analyze the active set under `filter`: archived roles and roles outside
/// the selected unit are dropped first.
pub fn analyze_scoped(
    nodes: &[OrgNode],
    filter: &BusinessUnitFilter,
    params: &HealthParams,
) -> Result<Analysis, PipelineError> {
    let active = active_nodes(nodes, filter);
    debug!(total = nodes.len(), active = active.len(), scope = %filter, "scoped snapshot");
    run(&active, params, filter.to_string())
}

fn run(nodes: &[OrgNode], params: &HealthParams, scope: String) -> Result<Analysis, PipelineError> {
    params.validate().map_err(PipelineError::Params)?;

    let stats = compute_stats(nodes);
    let data_health = compute_data_health_with(nodes, &stats, params);
    let breakdown = score_breakdown(&stats, &data_health, params);
    let score = breakdown.score;
    let band = HealthBand::from_score(score);
    let snapshot_sha256 = snapshot_sha256(nodes)?;

    info!(
        roles = stats.total_roles,
        score,
        band = band.as_str(),
        findings = data_health.finding_count(),
        "analysis complete"
    );

    Ok(Analysis { scope, stats, data_health, score, band, breakdown, snapshot_sha256 })
}
