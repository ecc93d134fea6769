//! List views: free-text search and grade grouping.

use std::collections::BTreeMap;

use org_core::determinism::cmp_by_title;
use org_core::{Grade, OrgNode};

use crate::visibility::BusinessUnitFilter;

/// Search criteria. Text matching is case-insensitive substring over the
/// descriptive and reporting fields; blank text matches everything.
#[derive(Clone, Debug, Default)]
pub struct NodeQuery {
    pub text: String,
    pub grade: Option<Grade>,
    pub unit: BusinessUnitFilter,
    pub include_archived: bool,
}

impl NodeQuery {
    pub fn matches(&self, n: &OrgNode) -> bool {
        if n.archived && !self.include_archived {
            return false;
        }
        if !self.unit.is_visible(n) {
            return false;
        }
        if self.grade.is_some_and(|g| g != n.grade) {
            return false;
        }
        let q = self.text.trim().to_lowercase();
        q.is_empty() || haystack(n).contains(&q)
    }
}

fn haystack(n: &OrgNode) -> String {
    let parts = [
        n.title.as_str(),
        n.incumbent_name.as_str(),
        n.bu_name.as_str(),
        n.grade.as_str(),
        n.level.as_deref().unwrap_or(""),
        &n.kpi.join(" "),
        &n.roles.join(" "),
        n.reporting.up.as_str(),
        n.reporting.dual.as_str(),
        n.reporting.down.as_str(),
        n.purpose.as_str(),
        n.accountability.as_str(),
    ];
    parts.join(" | ").to_lowercase()
}

/// Matching nodes in collection order.
pub fn search<'a>(nodes: &'a [OrgNode], query: &NodeQuery) -> Vec<&'a OrgNode> {
    nodes.iter().filter(|n| query.matches(n)).collect()
}

/// Every grade present (possibly empty), each group sorted by title.
/// Iterate with `Grade::ALL` for highest-first display.
pub fn group_by_grade<'a>(nodes: &[&'a OrgNode]) -> BTreeMap<Grade, Vec<&'a OrgNode>> {
    let mut by: BTreeMap<Grade, Vec<&OrgNode>> = Grade::ALL.iter().map(|&g| (g, Vec::new())).collect();
    for &n in nodes {
        by.entry(n.grade).or_default().push(n);
    }
    for group in by.values_mut() {
        group.sort_by(|a, b| cmp_by_title(a, b));
    }
    by
}
