//! Data health: four independent defect classes over one snapshot.
//!
//! A node may land in several classes at once. Findings are data, never
//! errors; `score` decides what they cost.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use org_core::node::non_blank;
use org_core::{HealthParams, OrgNode};

use crate::metrics::Stats;

/// A node whose `reporting.up` names no title in the snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OrphanRef {
    pub title: String,
    pub reports_to: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeavyManager {
    pub manager: String,
    pub reports: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DataHealth {
    /// Trimmed titles carried by two or more nodes, in first-seen order.
    pub duplicates: Vec<String>,
    pub orphans: Vec<OrphanRef>,
    pub self_reports: Vec<String>,
    /// Heaviest first; ties by manager title.
    pub heavy_managers: Vec<HeavyManager>,
}

impl DataHealth {
    /// True when none of the scored classes (duplicates, orphans,
    /// self-reports) has findings. Heavy managers are informational.
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.orphans.is_empty() && self.self_reports.is_empty()
    }

    pub fn finding_count(&self) -> usize {
        self.duplicates.len() + self.orphans.len() + self.self_reports.len() + self.heavy_managers.len()
    }
}

/// Data health with default thresholds.
pub fn compute_data_health(nodes: &[OrgNode], stats: &Stats) -> DataHealth {
    compute_data_health_with(nodes, stats, &HealthParams::default())
}

pub fn compute_data_health_with(nodes: &[OrgNode], stats: &Stats, params: &HealthParams) -> DataHealth {
    DataHealth {
        duplicates: duplicate_titles(nodes),
        orphans: orphan_refs(nodes),
        self_reports: nodes.iter().filter(|n| n.is_self_report()).map(|n| n.title.clone()).collect(),
        heavy_managers: heavy_managers(stats, params.heavy_manager_threshold),
    }
}

fn duplicate_titles(nodes: &[OrgNode]) -> Vec<String> {
    let mut count: BTreeMap<&str, u32> = BTreeMap::new();
    let mut order: Vec<&str> = Vec::new();
    for t in nodes.iter().filter_map(|n| non_blank(&n.title)) {
        let c = count.entry(t).or_insert(0);
        if *c == 0 {
            order.push(t);
        }
        *c += 1;
    }
    order
        .into_iter()
        .filter(|t| count.get(t).is_some_and(|&c| c > 1))
        .map(ToString::to_string)
        .collect()
}

fn orphan_refs(nodes: &[OrgNode]) -> Vec<OrphanRef> {
    let titles: BTreeSet<&str> = nodes.iter().filter_map(|n| non_blank(&n.title)).collect();
    nodes
        .iter()
        .filter_map(|n| {
            let up = n.up_ref()?;
            (!titles.contains(up)).then(|| OrphanRef { title: n.title.clone(), reports_to: up.to_string() })
        })
        .collect()
}

fn heavy_managers(stats: &Stats, threshold: u32) -> Vec<HeavyManager> {
    let mut out: Vec<HeavyManager> = stats
        .reports_count
        .iter()
        .filter(|&(_, &c)| c >= threshold)
        .map(|(m, &c)| HeavyManager { manager: m.clone(), reports: c })
        .collect();
    // reports_count iterates by title already; a stable sort keeps that for ties.
    out.sort_by(|a, b| b.reports.cmp(&a.reports));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute_stats;
    use alloc::format;
    use org_core::Grade;

    fn node(id: &str, title: &str, up: &str) -> OrgNode {
        let mut n = OrgNode::new(id.parse().unwrap(), Grade::G3, title, "t0");
        n.reporting.up = up.into();
        n
    }

    fn health(nodes: &[OrgNode]) -> DataHealth {
        compute_data_health(nodes, &compute_stats(nodes))
    }

    #[test]
    fn duplicate_titles_listed_once_in_first_seen_order() {
        let nodes = [
            node("1", "Engineer", ""),
            node("2", "Zed", ""),
            node("3", " Engineer", ""),
            node("4", "Zed", ""),
            node("5", "Zed", ""),
            node("6", "", ""),
            node("7", " ", ""),
        ];
        assert_eq!(health(&nodes).duplicates, ["Engineer", "Zed"]);
    }

    #[test]
    fn self_report_is_not_an_orphan() {
        let nodes = [node("1", "Lead", " Lead"), node("2", "Dev", "Ghost")];
        let h = health(&nodes);
        assert_eq!(h.self_reports, ["Lead"]);
        assert_eq!(h.orphans, [OrphanRef { title: "Dev".into(), reports_to: "Ghost".into() }]);
    }

    #[test]
    fn blank_title_and_blank_up_is_not_a_self_report() {
        assert!(health(&[node("1", "", "")]).self_reports.is_empty());
    }

    #[test]
    fn heavy_managers_at_threshold_sorted_by_load() {
        let mut nodes = Vec::new();
        for i in 0..10 {
            nodes.push(node(&format!("a{i}"), &format!("A{i}"), "Alpha"));
        }
        for i in 0..12 {
            nodes.push(node(&format!("b{i}"), &format!("B{i}"), "Beta"));
        }
        for i in 0..9 {
            nodes.push(node(&format!("c{i}"), &format!("C{i}"), "Gamma"));
        }
        let h = health(&nodes);
        assert_eq!(
            h.heavy_managers,
            [
                HeavyManager { manager: "Beta".into(), reports: 12 },
                HeavyManager { manager: "Alpha".into(), reports: 10 },
            ]
        );
        // Managers outside the snapshot are also orphan targets.
        assert_eq!(h.orphans.len(), 31);
    }

    #[test]
    fn custom_threshold() {
        let nodes = [node("m", "M", ""), node("1", "A", "M"), node("2", "B", "M")];
        let stats = compute_stats(&nodes);
        let p = HealthParams { heavy_manager_threshold: 2, ..HealthParams::default() };
        let h = compute_data_health_with(&nodes, &stats, &p);
        assert_eq!(h.heavy_managers, [HeavyManager { manager: "M".into(), reports: 2 }]);
        assert!(h.is_clean());
    }
}
