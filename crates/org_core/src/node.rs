//! Role record ("node").
//!
//! `title` is the de facto join key: `reporting.up` / `reporting.dual` hold
//! manager *titles*, resolved at read time (see `org_algo::resolve`).
//! Wire names follow the store format (camelCase).

use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::grade::Grade;
use crate::ids::NodeId;
use crate::mix::{default_mix_for_grade, WorkMix};

/// Reporting lines. `up`/`dual` are title references; `down` is free text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Reporting {
    pub up: String,
    pub down: String,
    pub dual: String,
}

impl Reporting {
    pub fn reporting_to(up: impl Into<String>) -> Self {
        Self { up: up.into(), ..Self::default() }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OrgNode {
    pub id: NodeId,
    pub grade: Grade,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub level: Option<String>,
    pub title: String,
    pub bu_name: String,
    pub tier_label: String,
    pub purpose: String,
    pub archetype: String,
    pub roles: Vec<String>,
    pub incumbent_name: String,
    pub kpi: Vec<String>,
    pub reporting: Reporting,
    pub accountability: String,
    pub yoe: String,
    pub ctc: String,
    pub work_mix: WorkMix,
    pub cost_object: String,
    pub charge_rule: String,
    pub location: String,
    pub archived: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Trim and map blank to `None`.
#[inline]
pub fn non_blank(s: &str) -> Option<&str> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t) }
}

impl OrgNode {
    /// A fresh, vacant, active role with grade-derived defaults.
    pub fn new(id: NodeId, grade: Grade, title: impl Into<String>, now: &str) -> Self {
        Self {
            id,
            grade,
            level: grade.default_level().map(ToString::to_string),
            title: title.into(),
            bu_name: "GL".to_string(),
            tier_label: "Standard".to_string(),
            purpose: String::new(),
            archetype: "Standard".to_string(),
            roles: Vec::new(),
            incumbent_name: String::new(),
            kpi: Vec::new(),
            reporting: Reporting::default(),
            accountability: String::new(),
            yoe: String::new(),
            ctc: String::new(),
            work_mix: default_mix_for_grade(grade),
            cost_object: "Project".to_string(),
            charge_rule: "Direct".to_string(),
            location: grade.location(),
            archived: false,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    pub fn trimmed_title(&self) -> &str {
        self.title.trim()
    }

    /// Primary manager reference (trimmed), `None` when blank.
    pub fn up_ref(&self) -> Option<&str> {
        non_blank(&self.reporting.up)
    }

    /// Matrix manager reference (trimmed), `None` when blank.
    pub fn dual_ref(&self) -> Option<&str> {
        non_blank(&self.reporting.dual)
    }

    pub fn is_vacant(&self) -> bool {
        self.incumbent_name.trim().is_empty()
    }

    /// Non-blank `reporting.up` equal to the node's own title (both trimmed).
    pub fn is_self_report(&self) -> bool {
        matches!(self.up_ref(), Some(up) if up == self.trimmed_title())
    }

    /// Grade change cascade: location always, level to `level` or the grade
    /// default, keeping the old level only when the grade has none.
    pub fn regrade(&mut self, grade: Grade, level: Option<&str>) {
        self.grade = grade;
        self.location = grade.location();
        if let Some(l) = level.or_else(|| grade.default_level()) {
            self.level = Some(l.to_string());
        }
    }

    pub fn touch(&mut self, now: &str) {
        self.updated_at = now.to_string();
    }
}
