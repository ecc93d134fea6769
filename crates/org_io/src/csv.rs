//! Flat CSV codec for role records.
//!
//! Export: UTF-8 BOM, fixed header, LF row separators, fields quoted when
//! they contain `,` `"` CR or LF, list fields joined with `" | "`, mix
//! values normalized.
//!
//! Import: header located by exact (trimmed) column name; `grade`, `title`,
//! `buName` are required columns. Rows shorter than 3 fields or with a
//! blank title are skipped. An import that keeps no row is an error.

use org_core::node::non_blank;
use org_core::{normalize_mix, Grade, NodeId, OrgNode, PartialWorkMix, Reporting};

use crate::ids::generate_node_id;
use crate::{IoError, IoResult};

pub const BOM: char = '\u{FEFF}';

pub const CSV_HEADER: [&str; 22] = [
    "id",
    "archived",
    "grade",
    "level",
    "title",
    "buName",
    "incumbentName",
    "reportsToUp",
    "reportsToDual",
    "responsibleForDown",
    "strategic",
    "tactical",
    "operational",
    "admin",
    "ctc",
    "yoe",
    "chargeRule",
    "costObject",
    "roles",
    "kpi",
    "purpose",
    "accountability",
];

pub const REQUIRED_COLUMNS: [&str; 3] = ["grade", "title", "buName"];

pub const LIST_SEPARATOR: &str = " | ";

/// Tier label stamped on every imported row.
pub const IMPORTED_TIER_LABEL: &str = "Imported";

pub fn to_csv(nodes: &[OrgNode]) -> String {
    let mut out = String::new();
    out.push(BOM);
    out.push_str(&CSV_HEADER.join(","));
    out.push('\n');

    let rows: Vec<String> = nodes.iter().map(csv_row).collect();
    out.push_str(&rows.join("\n"));
    out
}

fn csv_row(n: &OrgNode) -> String {
    let m = n.work_mix.normalized();
    let cells = [
        n.id.to_string(),
        n.archived.to_string(),
        n.grade.to_string(),
        n.level.clone().unwrap_or_default(),
        n.title.clone(),
        n.bu_name.clone(),
        n.incumbent_name.clone(),
        n.reporting.up.clone(),
        n.reporting.dual.clone(),
        n.reporting.down.clone(),
        m.strategic.to_string(),
        m.tactical.to_string(),
        m.operational.to_string(),
        m.admin.to_string(),
        n.ctc.clone(),
        n.yoe.clone(),
        n.charge_rule.clone(),
        n.cost_object.clone(),
        n.roles.join(LIST_SEPARATOR),
        n.kpi.join(LIST_SEPARATOR),
        n.purpose.clone(),
        n.accountability.clone(),
    ];
    cells.iter().map(|c| escape(c)).collect::<Vec<_>>().join(",")
}

fn escape(s: &str) -> String {
    if s.contains(|c: char| matches!(c, ',' | '"' | '\n' | '\r')) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Split CSV text into rows of raw fields.
///
/// Quotes toggle literal mode (`""` inside quotes is one `"`); CR is
/// dropped outside quotes; a leading BOM is ignored. A trailing empty line
/// does not produce a row.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            '\r' => {}
            _ => field.push(c),
        }
    }

    row.push(field);
    if row.len() > 1 || !row[0].is_empty() {
        rows.push(row);
    }
    rows
}

/// Column positions resolved from the header row.
struct Columns<'h> {
    header: &'h [String],
}

impl<'h> Columns<'h> {
    fn index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h.trim() == name)
    }

    /// Trimmed cell; empty when the column or the cell is missing.
    fn cell<'r>(&self, row: &'r [String], name: &str) -> &'r str {
        self.index(name).and_then(|i| row.get(i)).map(|s| s.trim()).unwrap_or("")
    }
}

/// Parse CSV text into nodes with generated ids for rows without one.
pub fn import_csv_text(text: &str, now: &str) -> IoResult<Vec<OrgNode>> {
    import_csv_with(text, now, generate_node_id)
}

pub fn import_csv_with(
    text: &str,
    now: &str,
    mut new_id: impl FnMut() -> NodeId,
) -> IoResult<Vec<OrgNode>> {
    let rows = parse_csv(text);
    let Some((header, body)) = rows.split_first() else {
        return Err(IoError::Csv { line: 0, msg: "empty CSV".to_string() });
    };
    let cols = Columns { header };
    for r in REQUIRED_COLUMNS {
        if cols.index(r).is_none() {
            return Err(IoError::Csv { line: 1, msg: format!("missing column: {r}") });
        }
    }

    let mut out = Vec::new();
    for row in body {
        if row.len() < 3 {
            continue;
        }
        let Some(title) = non_blank(cols.cell(row, "title")) else {
            continue;
        };
        out.push(row_to_node(&cols, row, title, now, &mut new_id));
    }

    if out.is_empty() {
        return Err(IoError::Csv { line: 0, msg: "no valid rows found".to_string() });
    }
    Ok(out)
}

fn row_to_node(
    cols: &Columns<'_>,
    row: &[String],
    title: &str,
    now: &str,
    new_id: &mut impl FnMut() -> NodeId,
) -> OrgNode {
    let cell = |name: &str| cols.cell(row, name);
    let or = |name: &str, default: &'static str| -> String {
        non_blank(cols.cell(row, name)).unwrap_or(default).to_string()
    };

    let grade = Grade::parse_lenient(cell("grade"));
    let id = cell("id").parse::<NodeId>().unwrap_or_else(|_| new_id());

    let mut n = OrgNode::new(id, grade, title, now);
    n.archived = cell("archived").eq_ignore_ascii_case("true");
    if let Some(level) = non_blank(cell("level")) {
        n.level = Some(level.to_string());
    }
    n.bu_name = or("buName", "GL");
    n.incumbent_name = cell("incumbentName").to_string();
    n.reporting = Reporting {
        up: cell("reportsToUp").to_string(),
        down: cell("responsibleForDown").to_string(),
        dual: cell("reportsToDual").to_string(),
    };
    let num = |name: &str| cell(name).parse::<f64>().ok();
    n.work_mix = normalize_mix(Some(&PartialWorkMix {
        strategic: num("strategic"),
        tactical: num("tactical"),
        operational: num("operational"),
        admin: num("admin"),
    }));
    n.ctc = cell("ctc").to_string();
    n.yoe = cell("yoe").to_string();
    n.charge_rule = or("chargeRule", "Direct");
    n.cost_object = or("costObject", "Project");
    n.roles = split_list(cell("roles"));
    n.kpi = split_list(cell("kpi"));
    n.purpose = cell("purpose").to_string();
    n.accountability = cell("accountability").to_string();
    n.tier_label = IMPORTED_TIER_LABEL.to_string();
    n
}

fn split_list(s: &str) -> Vec<String> {
    s.split('|').map(str::trim).filter(|p| !p.is_empty()).map(str::to_string).collect()
}
