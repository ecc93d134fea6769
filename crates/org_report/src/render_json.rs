//! JSON renderer. Key order follows the struct layout.

use crate::structure::ReportModel;
use crate::tree::ForestView;
use crate::ReportError;

/// Pretty-printed report document with a trailing newline.
pub fn render_json(model: &ReportModel) -> Result<String, ReportError> {
    to_pretty(model)
}

pub fn render_forest_json(view: &ForestView) -> Result<String, ReportError> {
    to_pretty(view)
}

fn to_pretty<T: serde::Serialize>(value: &T) -> Result<String, ReportError> {
    let mut s = serde_json::to_string_pretty(value).map_err(|e| ReportError::Serialize(e.to_string()))?;
    s.push('\n');
    Ok(s)
}
