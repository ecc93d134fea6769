//! Metrics engine: counts, rates and ratios over an already-scoped snapshot.
//!
//! Integer arithmetic throughout; the three one-decimal figures are produced
//! by `org_core::rounding` (half up). Empty input yields all-zero stats.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use org_core::rounding::{percent_one_decimal_tenths, ratio_one_decimal_tenths};
use org_core::{Grade, OneDecimal, OrgNode};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Stats {
    pub total_roles: u32,
    pub filled: u32,
    pub vacancy: u32,
    /// `vacancy / total_roles * 100`, one decimal.
    pub vacancy_rate: OneDecimal,
    /// Every grade present, zero when unused.
    pub grade_dist: BTreeMap<Grade, u32>,
    /// Trimmed manager title -> number of nodes whose trimmed `up` equals it.
    pub reports_count: BTreeMap<String, u32>,
    /// Mean direct reports over nodes that are managers, one decimal.
    pub span_of_control: OneDecimal,
    /// Share of roles in leadership grades, one decimal percent.
    pub leadership_ratio: OneDecimal,
}

impl Stats {
    pub fn grade_count(&self, grade: Grade) -> u32 {
        self.grade_dist.get(&grade).copied().unwrap_or(0)
    }

    pub fn reports_to(&self, title: &str) -> u32 {
        self.reports_count.get(title.trim()).copied().unwrap_or(0)
    }
}

pub fn compute_stats(nodes: &[OrgNode]) -> Stats {
    let total = saturating_len(nodes.len());

    let mut grade_dist: BTreeMap<Grade, u32> = Grade::ALL.iter().map(|&g| (g, 0)).collect();
    let mut reports_count: BTreeMap<String, u32> = BTreeMap::new();
    let mut vacancy = 0u32;
    let mut leadership = 0u32;

    for n in nodes {
        if n.is_vacant() {
            vacancy += 1;
        }
        if n.grade.is_leadership() {
            leadership += 1;
        }
        *grade_dist.entry(n.grade).or_insert(0) += 1;
        if let Some(up) = n.up_ref() {
            *reports_count.entry(up.to_string()).or_insert(0) += 1;
        }
    }

    // Managers are found among this snapshot's own titles; a title carried
    // twice counts twice.
    let (mut span_sum, mut managers) = (0u64, 0u64);
    for n in nodes {
        if let Some(&c) = reports_count.get(n.trimmed_title()) {
            if c > 0 {
                span_sum += u64::from(c);
                managers += 1;
            }
        }
    }

    Stats {
        total_roles: total,
        filled: total - vacancy,
        vacancy,
        vacancy_rate: percent_one_decimal_tenths(u64::from(vacancy), u64::from(total)),
        grade_dist,
        reports_count,
        span_of_control: ratio_one_decimal_tenths(span_sum, managers),
        leadership_ratio: percent_one_decimal_tenths(u64::from(leadership), u64::from(total)),
    }
}

#[inline]
fn saturating_len(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
