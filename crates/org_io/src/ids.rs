//! Node id generation.

use org_core::NodeId;
use uuid::Uuid;

/// A fresh random (v4) id, hyphenated lowercase.
pub fn generate_node_id() -> NodeId {
    NodeId::from_generated(Uuid::new_v4().hyphenated().to_string())
}
