//! Plain-text renderer for terminals and logs.

use std::fmt::Write;

use crate::structure::{HealthCard, ReportModel};

pub fn render_text(model: &ReportModel) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, model);
    out
}

fn write_report(out: &mut String, m: &ReportModel) -> std::fmt::Result {
    writeln!(out, "{}", m.cover.title)?;
    writeln!(out, "Health Score: {} ({})", m.cover.score_line, m.cover.band)?;
    writeln!(out)?;

    for k in &m.kpis {
        writeln!(out, "{:<16} {:>8}  {}", k.label, k.value, k.sub)?;
    }
    writeln!(out)?;

    writeln!(out, "Grade Distribution")?;
    for g in &m.grade_distribution {
        writeln!(out, "  {} {:<20} {:>4}  {:>6}", g.grade, g.label, g.count, g.share_pct_1dp)?;
    }
    writeln!(out)?;

    writeln!(out, "Data Health")?;
    for card in &m.health_cards {
        write_card(out, card)?;
    }
    writeln!(out)?;

    if !m.score.penalties.is_empty() {
        writeln!(out, "Score Deductions")?;
        for p in &m.score.penalties {
            writeln!(out, "  {:>7}  {}", p.points, p.reason)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Recommendation: {}", m.recommendation)?;
    writeln!(out, "Snapshot: {}", m.integrity.snapshot_sha256)?;
    Ok(())
}

fn write_card(out: &mut String, card: &HealthCard) -> std::fmt::Result {
    if card.ok {
        return writeln!(out, "  {}: {}", card.title, card.ok_text);
    }
    writeln!(out, "  {} ({})", card.title, card.finding_count)?;
    for item in &card.items {
        writeln!(out, "    - {item}")?;
    }
    if let Some(more) = &card.more {
        writeln!(out, "    {more}")?;
    }
    Ok(())
}
