//! Presentation of a reconstructed forest: a serialisable outline and an
//! indented text chart.

use org_algo::{Forest, TreeNode};

/// One role in a pre-order outline. `depth` 0 starts a new tree; every
/// following row with a greater depth belongs under it.
#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[cfg_attr(feature = "render_json", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, PartialEq)]
pub struct TreeView {
    pub id: String,
    pub title: String,
    pub grade: String,
    pub incumbent: Option<String>,
    pub depth: usize,
    pub descendants: usize,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[cfg_attr(feature = "render_json", serde(rename_all = "camelCase"))]
#[derive(Clone, Debug, PartialEq)]
pub struct ForestView {
    pub roots: Vec<TreeView>,
    pub orphans: Vec<TreeView>,
    pub cycle_breaks: Vec<String>,
}

impl From<&Forest> for ForestView {
    fn from(f: &Forest) -> Self {
        ForestView {
            roots: outline(&f.roots),
            orphans: outline(&f.orphans),
            cycle_breaks: f.cycle_breaks.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Flatten trees into pre-order rows, filling `descendants` with one pass
/// over a stack of still-open rows.
fn outline(trees: &[TreeNode]) -> Vec<TreeView> {
    let mut rows: Vec<TreeView> = Vec::new();
    let mut open: Vec<usize> = Vec::new();
    for tree in trees {
        for (depth, t) in tree.walk() {
            close_rows(&mut rows, &mut open, depth);
            open.push(rows.len());
            let incumbent = t.node.incumbent_name.trim();
            rows.push(TreeView {
                id: t.node.id.to_string(),
                title: t.node.title.clone(),
                grade: t.node.grade.as_str().to_string(),
                incumbent: (!incumbent.is_empty()).then(|| incumbent.to_string()),
                depth,
                descendants: 0,
            });
        }
    }
    close_rows(&mut rows, &mut open, 0);
    rows
}

/// Close every open row at `depth` or deeper; its subtree ends here.
fn close_rows(rows: &mut [TreeView], open: &mut Vec<usize>, depth: usize) {
    let end = rows.len();
    while let Some(&ix) = open.last() {
        if rows[ix].depth < depth {
            break;
        }
        rows[ix].descendants = end - ix - 1;
        open.pop();
    }
}

/// Two-space indented chart. Vacant roles show `(vacant)`; orphans follow
/// under their own heading.
pub fn render_forest_text(forest: &Forest) -> String {
    let mut out = String::new();
    for root in &forest.roots {
        push_tree(&mut out, root);
    }
    if !forest.orphans.is_empty() {
        out.push_str(&format!("\nUnlinked Roles ({})\n", forest.orphans.len()));
        for orphan in &forest.orphans {
            push_tree(&mut out, orphan);
        }
    }
    if !forest.cycle_breaks.is_empty() {
        let ids: Vec<String> = forest.cycle_breaks.iter().map(ToString::to_string).collect();
        out.push_str(&format!("\nCycle breaks: {}\n", ids.join(", ")));
    }
    out
}

fn push_tree(out: &mut String, root: &TreeNode) {
    for (depth, t) in root.walk() {
        let who = t.node.incumbent_name.trim();
        let who = if who.is_empty() { "(vacant)" } else { who };
        out.push_str(&format!(
            "{:indent$}[{}] {} · {}\n",
            "",
            t.node.grade.as_str(),
            t.node.trimmed_title(),
            who,
            indent = depth * 2
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use org_algo::build_forest;
    use org_core::{Grade, OrgNode};

    fn node(id: &str, grade: Grade, title: &str, up: &str) -> OrgNode {
        let mut n = OrgNode::new(id.parse().unwrap(), grade, title, "t0");
        n.reporting.up = up.into();
        n
    }

    #[test]
    fn text_chart_indents_children_and_lists_orphans() {
        let mut cfo = node("2", Grade::G6, "CFO", "CEO");
        cfo.incumbent_name = "Amit".into();
        let nodes = vec![node("1", Grade::G7, "CEO", ""), cfo, node("3", Grade::G3, "Analyst", "Ghost")];
        let text = render_forest_text(&build_forest(&nodes));
        assert!(text.starts_with("[G7] CEO · (vacant)\n  [G6] CFO · Amit\n"));
        assert!(text.contains("Unlinked Roles (1)\n[G3] Analyst · (vacant)\n"));
    }

    fn shape(rows: &[TreeView]) -> Vec<(&str, usize, usize)> {
        rows.iter().map(|r| (r.title.as_str(), r.depth, r.descendants)).collect()
    }

    #[test]
    fn outline_carries_depth_and_descendant_counts() {
        let nodes = vec![
            node("1", Grade::G7, "CEO", ""),
            node("2", Grade::G6, "CFO", "CEO"),
            node("3", Grade::G4, "FM", "CFO"),
            node("4", Grade::G6, "COO", "CEO"),
            node("5", Grade::G6, "CTO", ""),
            node("6", Grade::G3, "Analyst", "Ghost"),
        ];
        let view = ForestView::from(&build_forest(&nodes));
        assert_eq!(
            shape(&view.roots),
            [("CEO", 0, 3), ("CFO", 1, 1), ("FM", 2, 0), ("COO", 1, 0), ("CTO", 0, 0)]
        );
        assert_eq!(shape(&view.orphans), [("Analyst", 0, 0)]);
        assert_eq!(view.roots[1].incumbent, None);
    }

    #[test]
    fn deep_chain_converts_and_drops() {
        let mut nodes = vec![node("0", Grade::G7, "T0", "")];
        for i in 1..120_000 {
            nodes.push(node(&format!("{i}"), Grade::G1, &format!("T{i}"), &format!("T{}", i - 1)));
        }
        let forest = build_forest(&nodes);
        let view = ForestView::from(&forest);
        drop(forest);
        assert_eq!(view.roots.len(), 120_000);
        assert_eq!(view.roots[0].descendants, 119_999);
        assert_eq!(view.roots[119_999].depth, 119_999);
        assert!(render_forest_text(&build_forest(&nodes[..3])).contains("    [G1] T2"));
    }
}
