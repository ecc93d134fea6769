//! org_report — pure report model and renderers (JSON / plain text).
//!
//! - No I/O here. Callers pass an `Analysis` (and a `Forest` for charts)
//!   already computed by the pipeline.
//! - Percent strings are formatted from integer tenths.
//! - Stable section order and field names.

#![deny(unsafe_code)]

use thiserror::Error;

pub mod render_text;
pub mod structure;
pub mod tree;

#[cfg(feature = "render_json")]
pub mod render_json;

pub use render_text::render_text;
pub use structure::{build_model, recommendation, HealthCard, ReportModel, CARD_ITEM_LIMIT};
pub use tree::{render_forest_text, ForestView, TreeView};

#[cfg(feature = "render_json")]
pub use render_json::{render_forest_json, render_json};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("serialize: {0}")]
    Serialize(String),
}
