//! Identity & reference resolution: trimmed title -> node.
//!
//! This is the single place where title-keyed reporting lines are joined.
//! Matching is exact string equality after trimming: no case-folding, no
//! fuzzy matching. Blank titles never enter the index. When a title is
//! carried by several nodes the last one in input order wins (duplicates
//! are reported separately by `health`).

use alloc::collections::BTreeMap;

use org_core::node::non_blank;
use org_core::OrgNode;

/// Outcome of resolving one reference held by a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Reference field is empty or whitespace.
    Unset,
    /// Reference equals the node's own title.
    SelfReference,
    /// Index (into the indexed slice) of the referenced node.
    Resolved(usize),
    /// Non-blank, not self, and no node carries that title.
    Dangling,
}

impl Resolution {
    pub fn resolved(self) -> Option<usize> {
        match self {
            Resolution::Resolved(i) => Some(i),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TitleIndex<'a> {
    by_title: BTreeMap<&'a str, usize>,
}

impl<'a> TitleIndex<'a> {
    pub fn build(nodes: &'a [OrgNode]) -> Self {
        let mut by_title = BTreeMap::new();
        for (i, n) in nodes.iter().enumerate() {
            if let Some(t) = non_blank(&n.title) {
                by_title.insert(t, i);
            }
        }
        Self { by_title }
    }

    /// Look up a title (trimmed before matching).
    pub fn get(&self, title: &str) -> Option<usize> {
        self.by_title.get(title.trim()).copied()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.by_title.contains_key(title.trim())
    }

    /// Number of distinct non-blank titles.
    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }

    pub fn resolve_up(&self, node: &OrgNode) -> Resolution {
        self.resolve_ref(node, node.up_ref())
    }

    pub fn resolve_dual(&self, node: &OrgNode) -> Resolution {
        self.resolve_ref(node, node.dual_ref())
    }

    fn resolve_ref(&self, node: &OrgNode, reference: Option<&str>) -> Resolution {
        match reference {
            None => Resolution::Unset,
            Some(r) if r == node.trimmed_title() => Resolution::SelfReference,
            Some(r) => match self.by_title.get(r) {
                Some(&i) => Resolution::Resolved(i),
                None => Resolution::Dangling,
            },
        }
    }
}
