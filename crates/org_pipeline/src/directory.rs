//! `OrgDirectory`: the single owner of the role collection.
//!
//! All writes go through here. Anything that can make a title disappear
//! (rename, title patch, archive, hard delete) sweeps the old title out of
//! every `reporting.up` / `reporting.dual` before returning, so the
//! collection never keeps references to a role that is gone.

use thiserror::Error;
use tracing::{debug, info, warn};

use org_algo::sweep_title_references;
use org_core::{normalize_mix, Grade, NodeId, OrgNode, PartialWorkMix};
use org_io::ids::generate_node_id;

use crate::activity::ActivityLog;
use crate::clock::{Clock, SystemClock};
use crate::visibility::BusinessUnitFilter;

pub const NEW_ROLE_TITLE: &str = "New Role Title";
pub const COPY_SUFFIX: &str = " (Copy)";
const NEW_ROLE_GRADE: Grade = Grade::G4;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("no role with id {0}")]
    UnknownId(NodeId),
    #[error("title must not be blank")]
    BlankTitle,
    #[error("parent title must not be blank")]
    BlankParent,
}

pub struct OrgDirectory {
    nodes: Vec<OrgNode>,
    activity: ActivityLog,
    clock: Box<dyn Clock>,
    scope: BusinessUnitFilter,
}

impl Default for OrgDirectory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl OrgDirectory {
    pub fn new(nodes: Vec<OrgNode>) -> Self {
        Self::with_clock(nodes, Box::new(SystemClock))
    }

    pub fn with_clock(nodes: Vec<OrgNode>, clock: Box<dyn Clock>) -> Self {
        Self { nodes, activity: ActivityLog::default(), clock, scope: BusinessUnitFilter::All }
    }

    pub fn nodes(&self) -> &[OrgNode] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<OrgNode> {
        self.nodes
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn scope(&self) -> &BusinessUnitFilter {
        &self.scope
    }

    /// Business unit new roles are created in when no unit is passed.
    pub fn set_scope(&mut self, scope: BusinessUnitFilter) {
        self.scope = scope;
    }

    pub fn get(&self, id: &NodeId) -> Option<&OrgNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    fn position(&self, id: &NodeId) -> Result<usize, DirectoryError> {
        self.nodes.iter().position(|n| &n.id == id).ok_or_else(|| {
            warn!(%id, "unknown role id");
            DirectoryError::UnknownId(id.clone())
        })
    }

    fn sweep(&mut self, title: &str, now: &str) -> usize {
        let touched = sweep_title_references(&mut self.nodes, title, now);
        if !touched.is_empty() {
            info!(title = title.trim(), cleared = touched.len(), "swept reporting references");
        }
        touched.len()
    }

    fn fresh_role(&self, bu: &str, now: &str) -> OrgNode {
        let mut n = OrgNode::new(generate_node_id(), NEW_ROLE_GRADE, NEW_ROLE_TITLE, now);
        n.bu_name = bu.to_string();
        n.yoe = "3–5 yrs".to_string();
        n.ctc = "Standard".to_string();
        n
    }

    /// New vacant G4 role at the front of the collection. `bu` defaults to
    /// the current scope's home unit.
    pub fn add_role(&mut self, bu: Option<&str>) -> NodeId {
        let now = self.clock.now_rfc3339();
        let bu = bu.map(str::trim).filter(|b| !b.is_empty()).unwrap_or(self.scope.home_unit()).to_string();
        let n = self.fresh_role(&bu, &now);
        let id = n.id.clone();
        debug!(%id, bu = %bu, "add role");
        self.activity.record(&now, "Add role", format!("{} ({})", n.title, n.grade.as_str()));
        self.nodes.insert(0, n);
        id
    }

    /// New G4 role reporting up to `parent_id`'s title, in the current
    /// scope's home unit.
    pub fn add_child_role(&mut self, parent_id: &NodeId) -> Result<NodeId, DirectoryError> {
        let idx = self.position(parent_id)?;
        let parent_title = self.nodes[idx].trimmed_title().to_string();
        if parent_title.is_empty() {
            warn!(%parent_id, "parent has a blank title");
            return Err(DirectoryError::BlankParent);
        }
        let now = self.clock.now_rfc3339();
        let mut n = self.fresh_role(self.scope.home_unit(), &now);
        n.reporting.up = parent_title.clone();
        let id = n.id.clone();
        debug!(%id, parent = %parent_title, "add child role");
        self.activity.record(&now, "Add child role", format!("Under {parent_title}"));
        self.nodes.insert(0, n);
        Ok(id)
    }

    pub fn duplicate_role(&mut self, id: &NodeId) -> Result<NodeId, DirectoryError> {
        let idx = self.position(id)?;
        let now = self.clock.now_rfc3339();
        let mut copy = self.nodes[idx].clone();
        copy.id = generate_node_id();
        copy.title = format!("{}{COPY_SUFFIX}", copy.title);
        copy.created_at = now.clone();
        copy.updated_at = now.clone();
        let new_id = copy.id.clone();
        debug!(from = %id, to = %new_id, "duplicate role");
        self.activity.record(&now, "Duplicate role", copy.title.clone());
        self.nodes.insert(0, copy);
        Ok(new_id)
    }

    /// Replace the stored node with the same id. A title change sweeps the
    /// old title; a grade change re-derives location and level.
    pub fn patch_node(&mut self, mut node: OrgNode) -> Result<(), DirectoryError> {
        let idx = self.position(&node.id)?;
        let now = self.clock.now_rfc3339();
        let old = &self.nodes[idx];
        let old_title = old.trimmed_title().to_string();
        let title_changed = old_title != node.trimmed_title();
        if old.grade != node.grade {
            let level = node.level.clone().filter(|l| node.grade.accepts_level(l));
            node.level = None;
            node.regrade(node.grade, level.as_deref());
        }
        node.work_mix = node.work_mix.normalized();
        node.touch(&now);
        debug!(id = %node.id, title_changed, "patch role");
        self.activity.record(&now, "Edit role", node.title.clone());
        self.nodes[idx] = node;
        if title_changed {
            self.sweep(&old_title, &now);
        }
        Ok(())
    }

    pub fn rename(&mut self, id: &NodeId, title: &str) -> Result<(), DirectoryError> {
        let title = title.trim();
        if title.is_empty() {
            warn!(%id, "rename rejected: blank title");
            return Err(DirectoryError::BlankTitle);
        }
        let idx = self.position(id)?;
        let now = self.clock.now_rfc3339();
        let old = self.nodes[idx].trimmed_title().to_string();
        self.nodes[idx].title = title.to_string();
        self.nodes[idx].touch(&now);
        debug!(%id, from = %old, to = %title, "rename role");
        self.activity.record(&now, "Rename role", format!("{old} → {title}"));
        if old != title {
            self.sweep(&old, &now);
        }
        Ok(())
    }

    /// Soft delete: references are swept first, then the node is flagged.
    pub fn archive(&mut self, id: &NodeId) -> Result<(), DirectoryError> {
        let idx = self.position(id)?;
        let now = self.clock.now_rfc3339();
        let title = self.nodes[idx].title.clone();
        self.sweep(&title, &now);
        let n = &mut self.nodes[idx];
        n.archived = true;
        n.touch(&now);
        debug!(%id, "archive role");
        self.activity.record(&now, "Archive role", title);
        Ok(())
    }

    /// Un-archive. Swept references are not restored.
    pub fn restore(&mut self, id: &NodeId) -> Result<(), DirectoryError> {
        let idx = self.position(id)?;
        let now = self.clock.now_rfc3339();
        let n = &mut self.nodes[idx];
        n.archived = false;
        n.touch(&now);
        let title = n.title.clone();
        debug!(%id, "restore role");
        self.activity.record(&now, "Restore role", title);
        Ok(())
    }

    pub fn delete_hard(&mut self, id: &NodeId) -> Result<OrgNode, DirectoryError> {
        let idx = self.position(id)?;
        let now = self.clock.now_rfc3339();
        let title = self.nodes[idx].title.clone();
        self.sweep(&title, &now);
        let removed = self.nodes.remove(idx);
        debug!(%id, "delete role");
        self.activity.record(&now, "Delete role", title);
        Ok(removed)
    }

    /// Change grade; level becomes `level` when the grade accepts it, else
    /// the grade default, else stays as it was.
    pub fn move_to_grade(&mut self, id: &NodeId, grade: Grade, level: Option<&str>) -> Result<(), DirectoryError> {
        let idx = self.position(id)?;
        let now = self.clock.now_rfc3339();
        let level = level.map(str::trim).filter(|l| grade.accepts_level(l));
        let n = &mut self.nodes[idx];
        n.regrade(grade, level);
        n.touch(&now);
        let detail = format!("{} → {}", n.title, grade.as_str());
        debug!(%id, grade = grade.as_str(), "move role");
        self.activity.record(&now, "Move role", detail);
        Ok(())
    }

    /// Point `reporting.dual` (matrix) or `reporting.up` at `parent_title`.
    pub fn set_reporting(&mut self, id: &NodeId, parent_title: &str, matrix: bool) -> Result<(), DirectoryError> {
        let parent = parent_title.trim();
        if parent.is_empty() {
            warn!(%id, "reporting change rejected: blank parent");
            return Err(DirectoryError::BlankParent);
        }
        let idx = self.position(id)?;
        let now = self.clock.now_rfc3339();
        let n = &mut self.nodes[idx];
        if matrix {
            n.reporting.dual = parent.to_string();
        } else {
            n.reporting.up = parent.to_string();
        }
        n.touch(&now);
        let line = if matrix { "matrix" } else { "solid" };
        let detail = format!("{} → {parent} ({line})", n.title);
        debug!(%id, parent, matrix, "update reporting");
        self.activity.record(&now, "Update reporting", detail);
        Ok(())
    }

    /// Apply one mix to every active role of `grade`. Returns the count.
    pub fn bulk_update_mix(&mut self, grade: Grade, mix: &PartialWorkMix) -> usize {
        let now = self.clock.now_rfc3339();
        let mix = normalize_mix(Some(mix));
        let mut count = 0;
        for n in self.nodes.iter_mut().filter(|n| n.grade == grade && !n.archived) {
            n.work_mix = mix;
            n.touch(&now);
            count += 1;
        }
        debug!(grade = grade.as_str(), count, "bulk work-mix update");
        self.activity.record(&now, "Bulk update mix", format!("{} ({count} roles)", grade.as_str()));
        count
    }

    /// Import: the incoming collection replaces everything.
    pub fn replace_all(&mut self, nodes: Vec<OrgNode>) {
        let now = self.clock.now_rfc3339();
        info!(count = nodes.len(), "replace collection");
        self.activity.record(&now, "Import", format!("{} roles", nodes.len()));
        self.nodes = nodes;
    }
}
