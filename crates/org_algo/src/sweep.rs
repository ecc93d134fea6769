//! Reference sweep: invariant maintenance for title-keyed reporting lines.
//!
//! Removing a title from the title universe (rename, archive, hard delete)
//! must clear every `reporting.up` / `reporting.dual` that names it, or the
//! referencing nodes silently become orphans.

use alloc::vec::Vec;

use org_core::node::non_blank;
use org_core::{NodeId, OrgNode};

/// Clear `up`/`dual` fields whose trimmed value equals the trimmed `title`,
/// stamping `updated_at` on each touched node. A blank `title` is a no-op.
/// Returns the ids of touched nodes in input order.
pub fn sweep_title_references(nodes: &mut [OrgNode], title: &str, stamp: &str) -> Vec<NodeId> {
    let Some(t) = non_blank(title) else {
        return Vec::new();
    };

    let mut touched = Vec::new();
    for n in nodes.iter_mut() {
        let up_hit = n.up_ref() == Some(t);
        let dual_hit = n.dual_ref() == Some(t);
        if !(up_hit || dual_hit) {
            continue;
        }
        if up_hit {
            n.reporting.up.clear();
        }
        if dual_hit {
            n.reporting.dual.clear();
        }
        n.touch(stamp);
        touched.push(n.id.clone());
    }
    touched
}
