//! Business-unit scoping.
//!
//! With a specific unit selected: the Board (G7) is always visible; Group
//! Leadership (G6) is visible when it sits in `GL` or in the selected unit,
//! which keeps other units' sector heads from showing up as extra roots;
//! every other grade is visible only in its own unit.

use std::fmt;
use std::str::FromStr;

use org_core::{Grade, OrgNode};

/// Known business units as `(id, label)`. Units are free text on nodes;
/// this list is for display and validation hints.
pub const BUSINESS_UNITS: [(&str, &str); 13] = [
    ("GL", "Group Leadership"),
    ("PC", "People & Culture"),
    ("Fin", "Finance"),
    ("Admin", "Admin & Facilities"),
    ("Comp", "Compliance & Risk"),
    ("Legal", "Legal"),
    ("Cont", "Contracts"),
    ("HBT", "HBT"),
    ("Rail", "Railways & Metro"),
    ("Water", "Urban Water & Hydro"),
    ("Power", "Power & Energy"),
    ("TI", "Tech Innovation"),
    ("RDA", "RDA"),
];

/// Unit that holds enterprise-wide leadership.
pub const GROUP_UNIT: &str = "GL";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BusinessUnitFilter {
    #[default]
    All,
    Unit(String),
}

impl BusinessUnitFilter {
    pub fn is_visible(&self, n: &OrgNode) -> bool {
        let BusinessUnitFilter::Unit(bu) = self else {
            return true;
        };
        match n.grade {
            Grade::G7 => true,
            Grade::G6 => n.bu_name == GROUP_UNIT || n.bu_name == *bu,
            _ => n.bu_name == *bu,
        }
    }

    /// Unit new roles are created in: the selection, or `GL` under `All`.
    pub fn home_unit(&self) -> &str {
        match self {
            BusinessUnitFilter::All => GROUP_UNIT,
            BusinessUnitFilter::Unit(bu) => bu,
        }
    }

    pub fn is_known(&self) -> bool {
        match self {
            BusinessUnitFilter::All => true,
            BusinessUnitFilter::Unit(bu) => BUSINESS_UNITS.iter().any(|(id, _)| *id == bu.as_str()),
        }
    }
}

impl FromStr for BusinessUnitFilter {
    type Err = std::convert::Infallible;

    /// `ALL` (any case) or blank selects everything; anything else is a unit id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() || t.eq_ignore_ascii_case("all") {
            Ok(BusinessUnitFilter::All)
        } else {
            Ok(BusinessUnitFilter::Unit(t.to_string()))
        }
    }
}

impl fmt::Display for BusinessUnitFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusinessUnitFilter::All => f.write_str("ALL"),
            BusinessUnitFilter::Unit(bu) => f.write_str(bu),
        }
    }
}

/// Non-archived nodes visible under `filter`, in collection order. This is
/// the scope analysis and CSV export work on.
pub fn active_nodes(nodes: &[OrgNode], filter: &BusinessUnitFilter) -> Vec<OrgNode> {
    nodes.iter().filter(|n| !n.archived && filter.is_visible(n)).cloned().collect()
}
