//! crates/org_algo/src/forest.rs
//! Tree builder: flat role records → forest of reporting trees.
//!
//! Placement per node (after resolving `reporting.up` via `TitleIndex`):
//! - resolves to a different node → child of that node (input order);
//! - otherwise root when the grade is root-eligible (G7/G6) or `up` is blank;
//! - otherwise orphan, kept apart for manual correction.
//!
//! Roots are sorted by grade descending, then title; orphans keep input order.
//! Multi-node cycles (A→B→C→A) are broken before assembly: the cycle member
//! that comes first in input order is detached and placed by the root/orphan
//! rule, and its id is listed in `cycle_breaks`. The result is always finite.

use alloc::vec;
use alloc::vec::Vec;

use org_core::determinism::cmp_roots;
use org_core::{NodeId, OrgNode};

use crate::resolve::TitleIndex;

/// A node with its direct reports attached.
///
/// `Drop` and `PartialEq` are iterative; a reporting chain can be as deep as
/// the collection is long.
#[derive(Debug)]
pub struct TreeNode {
    pub node: OrgNode,
    pub children: Vec<TreeNode>,
}

impl Drop for TreeNode {
    fn drop(&mut self) {
        let mut stack = core::mem::take(&mut self.children);
        while let Some(mut t) = stack.pop() {
            stack.append(&mut t.children);
        }
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.walk(), other.walk());
        a.len() == b.len()
            && a.iter().zip(b.iter()).all(|((da, x), (db, y))| {
                da == db && x.children.len() == y.children.len() && x.node == y.node
            })
    }
}

impl TreeNode {
    /// Number of nodes below this one (children, grandchildren, …).
    pub fn descendant_count(&self) -> usize {
        let mut count = 0usize;
        let mut stack: Vec<&TreeNode> = self.children.iter().collect();
        while let Some(t) = stack.pop() {
            count += 1;
            stack.extend(t.children.iter());
        }
        count
    }

    /// Pre-order walk yielding `(depth, node)`; depth 0 is `self`.
    pub fn walk(&self) -> Vec<(usize, &TreeNode)> {
        let mut out = Vec::new();
        let mut stack = vec![(0usize, self)];
        while let Some((d, t)) = stack.pop() {
            out.push((d, t));
            for c in t.children.iter().rev() {
                stack.push((d + 1, c));
            }
        }
        out
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct Forest {
    pub roots: Vec<TreeNode>,
    pub orphans: Vec<TreeNode>,
    /// Nodes detached from their resolved parent to break a reporting cycle.
    pub cycle_breaks: Vec<NodeId>,
}

impl Forest {
    /// Total nodes held in roots and orphan subtrees.
    pub fn node_count(&self) -> usize {
        self.roots
            .iter()
            .chain(self.orphans.iter())
            .map(|t| 1 + t.descendant_count())
            .sum()
    }
}

pub fn build_forest(nodes: &[OrgNode]) -> Forest {
    let index = TitleIndex::build(nodes);

    // Resolved parent per node (self-references and dangling refs stay None).
    let mut parent: Vec<Option<usize>> =
        nodes.iter().map(|n| index.resolve_up(n).resolved()).collect();

    let broken = break_cycles(&mut parent);

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    let mut root_ix = Vec::new();
    let mut orphan_ix = Vec::new();

    for (i, n) in nodes.iter().enumerate() {
        match parent[i] {
            Some(p) => children[p].push(i),
            None if n.grade.is_root_eligible() || n.up_ref().is_none() => root_ix.push(i),
            None => orphan_ix.push(i),
        }
    }

    let mut built: Vec<Option<TreeNode>> = core::iter::repeat_with(|| None).take(nodes.len()).collect();
    let mut roots: Vec<TreeNode> = root_ix
        .into_iter()
        .filter_map(|r| assemble(r, nodes, &children, &mut built))
        .collect();
    let orphans: Vec<TreeNode> = orphan_ix
        .into_iter()
        .filter_map(|r| assemble(r, nodes, &children, &mut built))
        .collect();

    // Stable: equal (grade, title) keep input order.
    roots.sort_by(|a, b| cmp_roots(&a.node, &b.node));

    let cycle_breaks = broken.into_iter().map(|i| nodes[i].id.clone()).collect();

    Forest { roots, orphans, cycle_breaks }
}

/// Cut every cycle in the parent graph at its lowest-index member.
/// Returns the cut indices in ascending order.
fn break_cycles(parent: &mut [Option<usize>]) -> Vec<usize> {
    const NEW: u8 = 0;
    const ON_PATH: u8 = 1;
    const DONE: u8 = 2;

    let mut state = vec![NEW; parent.len()];
    let mut cut = Vec::new();
    let mut path: Vec<usize> = Vec::new();

    for start in 0..parent.len() {
        if state[start] != NEW {
            continue;
        }
        path.clear();
        let mut cur = Some(start);
        while let Some(i) = cur {
            match state[i] {
                NEW => {
                    state[i] = ON_PATH;
                    path.push(i);
                    cur = parent[i];
                }
                ON_PATH => {
                    // `i` closes a loop: members are path[pos..].
                    if let Some(pos) = path.iter().position(|&p| p == i) {
                        if let Some(&victim) = path[pos..].iter().min() {
                            parent[victim] = None;
                            cut.push(victim);
                        }
                    }
                    break;
                }
                _ => break,
            }
        }
        for &p in &path {
            state[p] = DONE;
        }
    }

    cut.sort_unstable();
    cut
}

/// Iterative post-order assembly of the subtree rooted at `root`.
fn assemble(
    root: usize,
    nodes: &[OrgNode],
    children: &[Vec<usize>],
    built: &mut [Option<TreeNode>],
) -> Option<TreeNode> {
    let mut stack = vec![(root, false)];
    while let Some((i, expanded)) = stack.pop() {
        if expanded {
            let kids = children[i].iter().filter_map(|&c| built[c].take()).collect();
            built[i] = Some(TreeNode { node: nodes[i].clone(), children: kids });
        } else {
            stack.push((i, true));
            for &c in children[i].iter().rev() {
                stack.push((c, false));
            }
        }
    }
    built[root].take()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use org_core::Grade;

    fn node(id: &str, grade: Grade, title: &str, up: &str) -> OrgNode {
        let mut n = OrgNode::new(id.parse().unwrap(), grade, title, "t0");
        n.reporting.up = up.into();
        n
    }

    fn titles(ts: &[TreeNode]) -> Vec<String> {
        ts.iter().map(|t| t.node.title.clone()).collect()
    }

    #[test]
    fn basic_root_child_orphan() {
        let nodes = [
            node("1", Grade::G4, "A", ""),
            node("2", Grade::G4, "B", "A"),
            node("3", Grade::G4, "C", "Z"),
        ];
        let f = build_forest(&nodes);
        assert_eq!(titles(&f.roots), ["A"]);
        assert_eq!(titles(&f.roots[0].children), ["B"]);
        assert_eq!(titles(&f.orphans), ["C"]);
        assert!(f.cycle_breaks.is_empty());
    }

    #[test]
    fn top_grades_are_roots_even_when_dangling() {
        let nodes = [
            node("1", Grade::G6, "COO", "Board Chair"),
            node("2", Grade::G5, "Head", "Board Chair"),
        ];
        let f = build_forest(&nodes);
        assert_eq!(titles(&f.roots), ["COO"]);
        assert_eq!(titles(&f.orphans), ["Head"]);
    }

    #[test]
    fn self_report_lands_by_root_rule() {
        let nodes = [node("1", Grade::G3, "Lead", "Lead"), node("2", Grade::G7, "CMD", "CMD")];
        let f = build_forest(&nodes);
        assert_eq!(titles(&f.roots), ["CMD"]);
        assert_eq!(titles(&f.orphans), ["Lead"]);
    }

    #[test]
    fn roots_sorted_by_grade_then_title() {
        let nodes = [
            node("1", Grade::G4, "Zeta", ""),
            node("2", Grade::G6, "COO", ""),
            node("3", Grade::G4, "Alpha", ""),
            node("4", Grade::G7, "CMD", ""),
        ];
        let f = build_forest(&nodes);
        assert_eq!(titles(&f.roots), ["CMD", "COO", "Alpha", "Zeta"]);
    }

    #[test]
    fn children_keep_input_order_and_orphans_keep_subtrees() {
        let nodes = [
            node("1", Grade::G4, "Mgr", "Ghost"),
            node("2", Grade::G1, "Second", "Mgr"),
            node("3", Grade::G1, "First", "Mgr"),
        ];
        let f = build_forest(&nodes);
        assert!(f.roots.is_empty());
        assert_eq!(titles(&f.orphans), ["Mgr"]);
        assert_eq!(titles(&f.orphans[0].children), ["Second", "First"]);
        assert_eq!(f.orphans[0].descendant_count(), 2);
    }

    #[test]
    fn three_cycle_is_broken_at_first_member() {
        let nodes = [
            node("x", Grade::G7, "CMD", ""),
            node("a", Grade::G4, "A", "C"),
            node("b", Grade::G4, "B", "A"),
            node("c", Grade::G4, "C", "B"),
        ];
        let f = build_forest(&nodes);
        assert_eq!(f.cycle_breaks, ["a".parse::<NodeId>().unwrap()]);
        assert_eq!(titles(&f.roots), ["CMD"]);
        assert_eq!(titles(&f.orphans), ["A"]);
        let chain: Vec<_> = f.orphans[0].walk().iter().map(|(d, t)| (*d, t.node.title.clone())).collect();
        assert_eq!(chain, [(0, "A".into()), (1, "B".into()), (2, "C".into())]);
        assert_eq!(f.node_count(), 4);
    }

    #[test]
    fn two_cycle_with_top_grade_member_becomes_root() {
        let nodes = [node("p", Grade::G6, "P", "Q"), node("q", Grade::G5, "Q", "P")];
        let f = build_forest(&nodes);
        assert_eq!(titles(&f.roots), ["P"]);
        assert_eq!(titles(&f.roots[0].children), ["Q"]);
        assert!(f.orphans.is_empty());
    }

    fn chain(len: usize) -> Vec<OrgNode> {
        let mut nodes = alloc::vec![node("0", Grade::G7, "T0", "")];
        for i in 1..len {
            let prev = alloc::format!("T{}", i - 1);
            nodes.push(node(&alloc::format!("{i}"), Grade::G1, &alloc::format!("T{i}"), &prev));
        }
        nodes
    }

    #[test]
    fn deep_chain_builds_compares_and_drops() {
        let nodes = chain(120_000);
        let f = build_forest(&nodes);
        assert_eq!(f.roots.len(), 1);
        assert_eq!(f.roots[0].descendant_count(), 119_999);
        assert_eq!(f.node_count(), 120_000);
        assert!(f == build_forest(&nodes));
        drop(f);
    }

    #[test]
    fn equality_sees_structure() {
        let flat = [node("1", Grade::G7, "A", ""), node("2", Grade::G4, "B", "A"), node("3", Grade::G4, "C", "A")];
        let nested = [node("1", Grade::G7, "A", ""), node("2", Grade::G4, "B", "A"), node("3", Grade::G4, "C", "B")];
        assert!(build_forest(&flat) != build_forest(&nested));
        assert!(build_forest(&flat) == build_forest(&flat));
    }

    #[test]
    fn roots_sort_alphabetically_ignoring_case() {
        let nodes = [
            node("1", Grade::G4, "Beta", ""),
            node("2", Grade::G4, "alpha", ""),
            node("3", Grade::G4, "Alpha", ""),
            node("4", Grade::G7, "zeta", ""),
        ];
        let f = build_forest(&nodes);
        assert_eq!(titles(&f.roots), ["zeta", "Alpha", "alpha", "Beta"]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(build_forest(&[]), Forest::default());
    }
}
