//! Stable ordering helpers.

use core::cmp::Ordering;

use crate::node::OrgNode;

/// Alphabetical title order: case-folded comparison first, then raw bytes so
/// that `"Alpha"` and `"alpha"` still have a fixed order.
pub fn cmp_titles(a: &str, b: &str) -> Ordering {
    let fold = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<alloc::vec::Vec<char>>();
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

/// Root display order: grade descending (highest authority first), then
/// title alphabetically. Equal keys compare `Equal`, so a stable sort keeps
/// input order for ties.
pub fn cmp_roots(a: &OrgNode, b: &OrgNode) -> Ordering {
    b.grade.cmp(&a.grade).then_with(|| cmp_titles(&a.title, &b.title))
}

/// Sort for grade groups in list views: title alphabetically.
pub fn cmp_by_title(a: &OrgNode, b: &OrgNode) -> Ordering {
    cmp_titles(&a.title, &b.title)
}
