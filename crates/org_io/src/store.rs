//! Store documents.
//!
//! Current shape (v4):
//! `{"version": 4, "updatedAt": "...", "exportedAt"?: "...", "data": {"nodes": [...]}}`
//!
//! Accepted on load and migrated field by field:
//! - `{data: {nodes}}` or `{nodes}` (v4 and the versions that shared its node shape);
//! - legacy `{tiers: [...], tracks: [{id, nodes: [...]}]}`, optionally under `data`.
//!
//! Every node is rebuilt with defaults for missing or falsy fields; `location`
//! is always recomputed from the grade. Any other document is rejected.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use org_core::node::non_blank;
use org_core::{normalize_mix, Grade, NodeId, OrgNode, PartialWorkMix, Reporting};

use crate::canonical_json::write_atomic;
use crate::ids::generate_node_id;
use crate::{IoError, IoResult};

pub const STORE_VERSION: u32 = 4;

pub const UNTITLED_ROLE: &str = "Untitled Role";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorePayload {
    pub nodes: Vec<OrgNode>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreData {
    pub version: u32,
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    pub data: StorePayload,
}

impl StoreData {
    pub fn new(nodes: Vec<OrgNode>, now: &str) -> Self {
        Self {
            version: STORE_VERSION,
            updated_at: now.to_string(),
            exported_at: None,
            data: StorePayload { nodes },
        }
    }

    /// Backup flavour: stamped with `exportedAt`.
    pub fn backup(nodes: Vec<OrgNode>, now: &str) -> Self {
        Self { exported_at: Some(now.to_string()), ..Self::new(nodes, now) }
    }

    pub fn nodes(&self) -> &[OrgNode] {
        &self.data.nodes
    }

    pub fn into_nodes(self) -> Vec<OrgNode> {
        self.data.nodes
    }
}

/// Parse store text and migrate it.
pub fn parse_store(text: &str, now: &str) -> IoResult<StoreData> {
    let v: Value = serde_json::from_str(text)?;
    migrate_value(&v, now)
}

pub fn load_store(path: &Path, now: &str) -> IoResult<StoreData> {
    let text = fs::read_to_string(path).map_err(|e| IoError::Path(format!("{}: {e}", path.display())))?;
    parse_store(&text, now)
}

/// Pretty JSON (2-space), written atomically.
pub fn save_store(path: &Path, store: &StoreData) -> IoResult<()> {
    let mut bytes = serde_json::to_vec_pretty(store)?;
    bytes.push(b'\n');
    write_atomic(path, &bytes)
}

/// Migrate any accepted document shape to v4. `now` fills missing timestamps
/// and becomes the document's `updatedAt`.
pub fn migrate_value(raw: &Value, now: &str) -> IoResult<StoreData> {
    let data = raw.get("data").filter(|d| d.is_object()).unwrap_or(raw);

    if let Some((ptr, arr)) = nodes_array(raw) {
        let nodes = arr
            .iter()
            .enumerate()
            .map(|(i, v)| migrate_node(v, false, now, &format!("{ptr}/{i}")))
            .collect::<IoResult<Vec<_>>>()?;
        return Ok(StoreData::new(nodes, now));
    }

    let tiers = data.get("tiers").and_then(Value::as_array);
    let tracks = data.get("tracks").and_then(Value::as_array);
    if let (Some(tiers), Some(tracks)) = (tiers, tracks) {
        let mut nodes = Vec::new();
        for (i, v) in tiers.iter().enumerate() {
            nodes.push(migrate_node(v, true, now, &format!("/tiers/{i}"))?);
        }
        for (t, track) in tracks.iter().enumerate() {
            let track_nodes = track.get("nodes").and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[]);
            for (i, v) in track_nodes.iter().enumerate() {
                nodes.push(migrate_node(v, true, now, &format!("/tracks/{t}/nodes/{i}"))?);
            }
        }
        return Ok(StoreData::new(nodes, now));
    }

    Err(IoError::Migration(
        "expected {data:{nodes}}, {nodes}, or legacy {tiers, tracks}".to_string(),
    ))
}

fn nodes_array(raw: &Value) -> Option<(&'static str, &Vec<Value>)> {
    if let Some(arr) = raw.get("data").and_then(|d| d.get("nodes")).and_then(Value::as_array) {
        return Some(("/data/nodes", arr));
    }
    raw.get("nodes").and_then(Value::as_array).map(|arr| ("/nodes", arr))
}

/// `legacy` rows may carry their tier label in a `track` field.
fn migrate_node(v: &Value, legacy: bool, now: &str, pointer: &str) -> IoResult<OrgNode> {
    let obj = v.as_object().ok_or_else(|| IoError::Json {
        pointer: pointer.to_string(),
        msg: "node must be an object".to_string(),
    })?;

    let grade = Grade::parse_lenient(str_field(obj, "grade").unwrap_or(""));
    let id = match str_field(obj, "id").and_then(|s| s.parse::<NodeId>().ok()) {
        Some(id) => id,
        None => generate_node_id(),
    };
    let title = str_field(obj, "title").and_then(non_blank).unwrap_or(UNTITLED_ROLE);

    let mut n = OrgNode::new(id, grade, title, now);
    n.level = str_field(obj, "level").map(str::to_string).or(n.level);
    n.bu_name = text_or(obj, "buName", "GL");
    n.tier_label = str_field(obj, "tierLabel")
        .or_else(|| if legacy { str_field(obj, "track") } else { None })
        .unwrap_or("Standard")
        .to_string();
    n.purpose = text_or(obj, "purpose", "");
    n.archetype = text_or(obj, "archetype", "Standard");
    n.roles = string_list(obj, "roles");
    n.incumbent_name = text_or(obj, "incumbentName", "");
    n.kpi = string_list(obj, "kpi");
    n.reporting = reporting(obj.get("reporting"));
    n.accountability = text_or(obj, "accountability", "");
    n.yoe = text_or(obj, "yoe", "");
    n.ctc = text_or(obj, "ctc", "");
    n.work_mix = normalize_mix(Some(&partial_mix(obj.get("workMix"))));
    n.cost_object = text_or(obj, "costObject", "Project");
    n.charge_rule = text_or(obj, "chargeRule", "Direct");
    n.archived = obj.get("archived").is_some_and(truthy);
    n.created_at = text_or(obj, "createdAt", now);
    n.updated_at = text_or(obj, "updatedAt", now);
    Ok(n)
}

/// Non-empty string value of `key`.
fn str_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str).filter(|s| !s.is_empty())
}

fn text_or(obj: &Map<String, Value>, key: &str, default: &str) -> String {
    str_field(obj, key).unwrap_or(default).to_string()
}

fn string_list(obj: &Map<String, Value>, key: &str) -> Vec<String> {
    match obj.get(key).and_then(Value::as_array) {
        Some(arr) => arr.iter().filter_map(Value::as_str).map(str::to_string).collect(),
        None => Vec::new(),
    }
}

fn reporting(v: Option<&Value>) -> Reporting {
    let Some(obj) = v.and_then(Value::as_object) else {
        return Reporting::default();
    };
    Reporting {
        up: text_or(obj, "up", ""),
        down: text_or(obj, "down", ""),
        dual: text_or(obj, "dual", ""),
    }
}

fn partial_mix(v: Option<&Value>) -> PartialWorkMix {
    let field = |k: &str| v.and_then(|m| m.get(k)).and_then(number_like);
    PartialWorkMix {
        strategic: field("strategic"),
        tactical: field("tactical"),
        operational: field("operational"),
        admin: field("admin"),
    }
}

/// Numbers and numeric strings; anything else is absent.
fn number_like(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0 && !x.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
