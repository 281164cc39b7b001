//! Plain-text rendering of dashboard views for the terminal.

use sports_core::analysis::{CorrelationCell, CorrelationMatrix, HeadToHead, PopularityCorrelation, ScatterSeries};
use sports_core::api::{ApiError, OverviewView};
use std::fmt::Write;

const BAR_WIDTH: usize = 30;

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let len = ((value.abs() / max) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(len.min(BAR_WIDTH))
}

fn cell(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "-".to_string(),
    }
}

pub fn unavailable(title: &str, error: &ApiError) -> String {
    format!("⚠️  {title}: {} ({})\n", error.message, error.code)
}

pub fn overview(view: &OverviewView, limit: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📊 Dataset Overview");
    let _ = writeln!(out, "{}", view.column_names.join(" | "));

    let shown = limit.unwrap_or(view.records.len()).min(view.records.len());
    for row in &view.records[..shown] {
        let skills: Vec<String> = row.record.skills.iter().map(|v| cell(*v, 2)).collect();
        let rank = row.record.rank.map_or_else(|| "-".to_string(), |r| r.to_string());
        let marker = if row.is_imputed() { "*" } else { "" };
        let _ = writeln!(
            out,
            "{} | {} | {} | {} | {:.1}{}",
            row.sport(),
            rank,
            cell(row.record.total, 3),
            skills.join(" | "),
            row.popularity_index,
            marker
        );
    }
    if shown < view.records.len() {
        let _ = writeln!(out, "... {} more rows", view.records.len() - shown);
    }

    let _ = writeln!(out, "\nShape: {} rows, {} columns", view.rows, view.columns);
    let enrichment = &view.metadata.enrichment;
    if let Some(fill) = enrichment.imputed_popularity {
        let _ = writeln!(
            out,
            "* {} row(s) without a popularity reference, filled with {:.2}",
            enrichment.imputed_rows, fill
        );
    }
    if view.metadata.stats.incomplete > 0 {
        let _ = writeln!(out, "{} row(s) with missing values (shown as -)", view.metadata.stats.incomplete);
    }
    if view.metadata.stats.failed > 0 {
        let _ = writeln!(out, "{} malformed row(s) skipped", view.metadata.stats.failed);
    }
    out
}

fn cell_text(cell: &CorrelationCell) -> String {
    match cell.as_option() {
        Some(v) => format!("{v:>6.2}"),
        None => format!("{:>6}", "n/a"),
    }
}

pub fn heatmap(matrix: &CorrelationMatrix) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🔥 Correlation Between Sports Skills");
    let _ = write!(out, "{:>6}", "");
    for column in &matrix.columns {
        let _ = write!(out, " {:>6}", column.name());
    }
    out.push('\n');

    for (column, row) in matrix.columns.iter().zip(&matrix.cells) {
        let _ = write!(out, "{:>6}", column.name());
        for cell in row {
            let _ = write!(out, " {}", cell_text(cell));
        }
        out.push('\n');
    }

    let undefined = matrix.undefined_columns();
    if !undefined.is_empty() {
        let names: Vec<&str> = undefined.iter().map(|c| c.name()).collect();
        let _ = writeln!(out, "n/a: not computable, constant column(s) {}", names.join(", "));
    }
    out
}

pub fn scatter(series: &ScatterSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "💪 {} vs {}", series.x_label, series.y_label);
    for point in &series.points {
        let _ = writeln!(out, "{:>10} {:>10}  {}", cell(point.x, 3), cell(point.y, 3), point.sport);
    }
    let _ = writeln!(out, "{} points", series.len());
    out
}

pub fn popularity_correlation(entries: &[PopularityCorrelation]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "⭐ Feature Correlation with Popularity");
    for entry in entries {
        match entry.coefficient.as_option() {
            Some(r) => {
                let sign = if r < 0.0 { '-' } else { '+' };
                let _ = writeln!(out, "{:>4} {:>6.3} {}{}", entry.column.name(), r, sign, bar(r, 1.0));
            }
            None => {
                let _ = writeln!(out, "{:>4}    n/a", entry.column.name());
            }
        }
    }
    out
}

pub fn head_to_head(h2h: &HeadToHead) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🆚 {}", h2h.title());
    let max = h2h
        .sport_a
        .values
        .iter()
        .chain(&h2h.sport_b.values)
        .flatten()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));

    for (column, a, b) in h2h.rows() {
        for (name, sport, value) in [(column.name(), &h2h.sport_a.sport, a), ("", &h2h.sport_b.sport, b)] {
            let drawn = value.map(|v| bar(v, max)).unwrap_or_default();
            let _ = writeln!(out, "{:>4} {:<12} {:>6} {}", name, sport, cell(value, 2), drawn);
        }
    }
    out
}
