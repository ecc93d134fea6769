//! Health scorer: 100 minus independent penalties, clamped and rounded.
//!
//! Works in hundredths of a point so the fractional vacancy penalty
//! (`(rate - 10) * 1.2`) is exact: a one-decimal rate in tenths times a
//! weight in tenths is already hundredths. Final rounding is half up.
//! Heavy managers never feed the score.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use org_core::HealthParams;

use crate::health::DataHealth;
use crate::metrics::Stats;

const FULL: u64 = 100 * 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PenaltyKind {
    Vacancy,
    SpanTooNarrow,
    SpanTooWide,
    Leadership,
    Duplicates,
    Orphans,
    SelfReports,
}

impl PenaltyKind {
    pub fn describe(self) -> &'static str {
        match self {
            PenaltyKind::Vacancy => "vacancy rate above threshold",
            PenaltyKind::SpanTooNarrow => "span of control below band",
            PenaltyKind::SpanTooWide => "span of control above band",
            PenaltyKind::Leadership => "leadership ratio above limit",
            PenaltyKind::Duplicates => "duplicate titles",
            PenaltyKind::Orphans => "orphan reporting lines",
            PenaltyKind::SelfReports => "self reporting",
        }
    }
}

/// One applied deduction, in hundredths of a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Penalty {
    pub kind: PenaltyKind,
    pub hundredths: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoreBreakdown {
    /// Only penalties that fired, in evaluation order.
    pub penalties: Vec<Penalty>,
    pub score: u8,
}

/// Coarse reading of a score: `>= 80` healthy, `>= 60` watch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum HealthBand {
    Critical,
    Watch,
    Healthy,
}

impl HealthBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => HealthBand::Healthy,
            60.. => HealthBand::Watch,
            _ => HealthBand::Critical,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HealthBand::Healthy => "healthy",
            HealthBand::Watch => "watch",
            HealthBand::Critical => "critical",
        }
    }
}

/// Default-parameter score in `0..=100`.
pub fn compute_health_score(stats: &Stats, health: &DataHealth) -> u8 {
    score_breakdown(stats, health, &HealthParams::default()).score
}

pub fn compute_health_score_with(stats: &Stats, health: &DataHealth, params: &HealthParams) -> u8 {
    score_breakdown(stats, health, params).score
}

pub fn score_breakdown(stats: &Stats, health: &DataHealth, params: &HealthParams) -> ScoreBreakdown {
    let mut penalties = Vec::new();
    let mut push = |kind: PenaltyKind, hundredths: u64| {
        if hundredths > 0 {
            penalties.push(Penalty { kind, hundredths });
        }
    };

    let vacancy = u64::from(stats.vacancy_rate.tenths());
    let vacancy_threshold = u64::from(params.vacancy_threshold_pct) * 10;
    if vacancy > vacancy_threshold {
        push(
            PenaltyKind::Vacancy,
            (vacancy - vacancy_threshold).saturating_mul(u64::from(params.vacancy_weight_tenths)),
        );
    }

    let span = u64::from(stats.span_of_control.tenths());
    if span < u64::from(params.span_min) * 10 {
        push(PenaltyKind::SpanTooNarrow, points(params.span_penalty));
    }
    if span > u64::from(params.span_max) * 10 {
        push(PenaltyKind::SpanTooWide, points(params.span_penalty));
    }

    if u64::from(stats.leadership_ratio.tenths()) > u64::from(params.leadership_max_pct) * 10 {
        push(PenaltyKind::Leadership, points(params.leadership_penalty));
    }

    if !health.duplicates.is_empty() {
        push(PenaltyKind::Duplicates, points(params.duplicate_penalty));
    }
    if !health.orphans.is_empty() {
        push(PenaltyKind::Orphans, points(params.orphan_penalty));
    }
    if !health.self_reports.is_empty() {
        push(PenaltyKind::SelfReports, points(params.self_report_penalty));
    }

    let total = penalties.iter().fold(0u64, |acc, p| acc.saturating_add(p.hundredths));
    let remaining = FULL.saturating_sub(total);
    // remaining <= 10_000, so the rounded value fits in u8.
    let score = u8::try_from((remaining + 50) / 100).unwrap_or(100);

    ScoreBreakdown { penalties, score }
}

#[inline]
fn points(p: u32) -> u64 {
    u64::from(p) * 100
}
