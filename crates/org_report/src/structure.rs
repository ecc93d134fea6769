//! crates/org_report/src/structure.rs
//! Report data model and the mapper from an `Analysis`.
//! No I/O and no recomputation: every number comes from the analysis, and
//! percentages are formatted from tenths without float arithmetic.

use org_algo::Stats;
use org_core::{Grade, HealthParams, OneDecimal};
use org_core::rounding::percent_one_decimal_tenths;
use org_pipeline::Analysis;

/// Findings shown per health card before collapsing into "+N more".
pub const CARD_ITEM_LIMIT: usize = 5;

const VACANCY_ALERT_TENTHS: u32 = 150;
const SPAN_ALERT_TENTHS: u32 = 100;

// -------------------- Model (render order) --------------------

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ReportModel {
    pub cover: SectionCover,
    pub kpis: Vec<KpiTile>,
    pub grade_distribution: Vec<GradeRow>,
    pub health_cards: Vec<HealthCard>,
    pub recommendation: String,
    pub score: SectionScore,
    pub integrity: SectionIntegrity,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SectionCover {
    pub title: String,
    pub scope: String,
    pub score_line: String, // "78/100"
    pub band: String,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct KpiTile {
    pub label: String,
    pub value: String,
    pub sub: String,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct GradeRow {
    pub grade: String,
    pub label: String,
    pub count: u32,
    pub share_pct_1dp: String,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct HealthCard {
    pub title: String,
    pub ok: bool,
    pub ok_text: String,
    pub finding_count: usize,
    /// At most `CARD_ITEM_LIMIT` entries.
    pub items: Vec<String>,
    pub more: Option<String>,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SectionScore {
    pub score: u8,
    pub band: String,
    pub penalties: Vec<PenaltyRow>,
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct PenaltyRow {
    pub reason: String,
    pub points: String, // "-10.00"
}

#[cfg_attr(feature = "render_json", derive(serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SectionIntegrity {
    pub snapshot_sha256: String,
    pub generated_at: String,
    pub engine_name: String,
    pub engine_version: String,
}

// -------------------- Mapper --------------------

/// Build the report for one analysis run. `params` must be the set the
/// analysis ran with (the heavy-manager card title quotes its threshold).
pub fn build_model(analysis: &Analysis, params: &HealthParams, generated_at: &str) -> ReportModel {
    let stats = &analysis.stats;
    let health = &analysis.data_health;

    let title = if analysis.scope == "ALL" {
        "Enterprise Analysis".to_string()
    } else {
        format!("{} Analysis", analysis.scope)
    };
    let cover = SectionCover {
        title,
        scope: analysis.scope.clone(),
        score_line: format!("{}/100", analysis.score),
        band: analysis.band.as_str().to_string(),
    };

    let health_cards = vec![
        card("Duplicate Titles", "No duplicates found", health.duplicates.clone()),
        card(
            "Orphan Reporting",
            "All reporting lines valid",
            health.orphans.iter().map(|o| format!("{} → {}", o.title, o.reports_to)).collect(),
        ),
        card("Self Reporting", "No self-reporting", health.self_reports.clone()),
        card(
            &format!("Overloaded Managers (>={})", params.heavy_manager_threshold),
            "Spans within limits",
            health.heavy_managers.iter().map(|m| format!("{} ({})", m.manager, m.reports)).collect(),
        ),
    ];

    let penalties = analysis
        .breakdown
        .penalties
        .iter()
        .map(|p| PenaltyRow { reason: p.kind.describe().to_string(), points: format_points(p.hundredths) })
        .collect();

    ReportModel {
        cover,
        kpis: kpi_tiles(stats),
        grade_distribution: grade_rows(stats),
        health_cards,
        recommendation: recommendation(stats),
        score: SectionScore {
            score: analysis.score,
            band: analysis.band.as_str().to_string(),
            penalties,
        },
        integrity: SectionIntegrity {
            snapshot_sha256: analysis.snapshot_sha256.clone(),
            generated_at: generated_at.to_string(),
            engine_name: env!("CARGO_PKG_NAME").to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    }
}

/// One-line advice: vacancy first, then span, otherwise steady state.
pub fn recommendation(stats: &Stats) -> String {
    if stats.vacancy_rate.tenths() > VACANCY_ALERT_TENTHS {
        format!("High vacancy ({}%). Prioritize hiring for critical layers first.", stats.vacancy_rate)
    } else if stats.span_of_control.tenths() > SPAN_ALERT_TENTHS {
        format!("Span of control is high ({}). Add team lead layers or split teams.", stats.span_of_control)
    } else {
        "Structure looks stable. Focus on role harmonization and KPI standardization.".to_string()
    }
}

fn kpi_tiles(stats: &Stats) -> Vec<KpiTile> {
    let tile = |label: &str, value: String, sub: String| KpiTile { label: label.to_string(), value, sub };
    vec![
        tile("Headcount", stats.total_roles.to_string(), format!("{} Open", stats.vacancy)),
        tile("Span of Control", stats.span_of_control.to_string(), "Avg manager load".to_string()),
        tile("Leadership %", format!("{}%", stats.leadership_ratio), "G7–G5 density".to_string()),
        tile("Vacancy Rate", format!("{}%", stats.vacancy_rate), "Unfilled roles".to_string()),
    ]
}

fn grade_rows(stats: &Stats) -> Vec<GradeRow> {
    Grade::ALL
        .iter()
        .map(|&g| {
            let count = stats.grade_count(g);
            let share: OneDecimal = percent_one_decimal_tenths(u64::from(count), u64::from(stats.total_roles));
            GradeRow {
                grade: g.as_str().to_string(),
                label: g.label().to_string(),
                count,
                share_pct_1dp: format!("{share}%"),
            }
        })
        .collect()
}

fn card(title: &str, ok_text: &str, findings: Vec<String>) -> HealthCard {
    let finding_count = findings.len();
    let more = (finding_count > CARD_ITEM_LIMIT).then(|| format!("+{} more", finding_count - CARD_ITEM_LIMIT));
    let mut items = findings;
    items.truncate(CARD_ITEM_LIMIT);
    HealthCard {
        title: title.to_string(),
        ok: finding_count == 0,
        ok_text: ok_text.to_string(),
        finding_count,
        items,
        more,
    }
}

/// Hundredths of a point as a signed deduction, e.g. `1440` → `-14.40`.
fn format_points(hundredths: u64) -> String {
    format!("-{}.{:02}", hundredths / 100, hundredths % 100)
}
