//! Opaque node identifier.
//!
//! Ids are assigned once (seed, add, duplicate, import) and never reused.
//! The only structural rule is "non-blank"; generation lives in `org_io`.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str { &self.0 }

    /// Wrap generator output (`seed-N`, uuid). Must be non-blank.
    pub fn from_generated(s: String) -> Self {
        debug_assert!(!s.trim().is_empty());
        Self(s)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NodeId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() { Err(CoreError::InvalidId) } else { Ok(Self(t.to_string())) }
    }
}

impl PartialEq<str> for NodeId {
    fn eq(&self, other: &str) -> bool { self.0 == other }
}

impl PartialEq<&str> for NodeId {
    fn eq(&self, other: &&str) -> bool { self.0 == *other }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_and_trims() {
        assert_eq!("   ".parse::<NodeId>(), Err(CoreError::InvalidId));
        let id: NodeId = "  seed-3 ".parse().unwrap();
        assert_eq!(id.as_str(), "seed-3");
        assert_eq!(id, "seed-3");
    }
}
