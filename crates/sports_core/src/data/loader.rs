//! Source CSV → EnrichedTable pipeline
//!
//! CSV bytes → Vec<SportRecord> → popularity join → mean imputation
//!
//! Columns are located by header name. Any index artifact column left behind
//! by a dataframe export (empty header or `Unnamed: N`) is ignored.

use crate::data::popularity::PopularityReference;
use crate::error::{DashboardError, Result};
use crate::models::{Attribute, EnrichedRow, EnrichedTable, PopularitySource, SportRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CSV parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub total_rows: u32,
    pub parsed: u32,
    /// Rows kept with at least one blank or unparseable numeric cell
    pub incomplete: u32,
    /// Rows rejected for a missing sport name or unreadable CSV
    pub failed: u32,
    pub dropped_index_column: bool,
}

/// Outcome of the popularity join
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    pub matched_rows: usize,
    pub imputed_rows: usize,
    /// Mean of matched rows, `None` when nothing needed imputing
    pub imputed_popularity: Option<f64>,
}

/// Everything `load_table` produces
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: EnrichedTable,
    pub stats: ParseStats,
    pub enrichment: Enrichment,
}

/// Header positions resolved from the first CSV row
#[derive(Debug, Clone)]
struct HeaderLayout {
    sport: usize,
    rank: usize,
    total: usize,
    skills: [usize; Attribute::COUNT],
    dropped_index_column: bool,
}

fn is_index_artifact(header: &str) -> bool {
    header.is_empty() || header.starts_with("Unnamed:")
}

impl HeaderLayout {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}'))
            .collect();

        let find = |wanted: &str| -> Result<usize> {
            names
                .iter()
                .position(|name| *name == wanted)
                .ok_or_else(|| DashboardError::column_not_found(wanted))
        };

        let mut skills = [0usize; Attribute::COUNT];
        for attr in Attribute::ALL {
            skills[attr.index()] = find(attr.code())?;
        }

        Ok(Self {
            sport: find("sport")?,
            rank: find("rank")?,
            total: find("total")?,
            skills,
            dropped_index_column: names.iter().any(|name| is_index_artifact(name)),
        })
    }
}

/// A numeric cell, `None` when absent, blank or not a finite number.
fn numeric_cell(record: &csv::StringRecord, idx: usize, name: &str, line: u32) -> Option<f64> {
    let raw = record.get(idx)?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            log::warn!("Line {}: invalid {} value '{}', kept as missing", line, name, raw);
            None
        }
    }
}

/// Ranks are integers but some exports write them as `3.0`.
fn rank_cell(record: &csv::StringRecord, idx: usize, line: u32) -> Option<u32> {
    let value = numeric_cell(record, idx, "rank", line)?;
    if value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        log::warn!("Line {}: invalid rank value '{}', kept as missing", line, value);
        None
    }
}

/// Only the sport name is required; numeric gaps are kept as `None`.
///
/// The name is taken as written apart from a leading BOM, so it joins the
/// reference table by exact match.
fn parse_row(record: &csv::StringRecord, layout: &HeaderLayout, line: u32) -> std::result::Result<SportRecord, String> {
    let sport = record
        .get(layout.sport)
        .map(|raw| raw.trim_start_matches('\u{feff}'))
        .ok_or_else(|| "missing sport field".to_string())?;
    if sport.trim().is_empty() {
        return Err("empty sport name".to_string());
    }

    let mut skills = [None; Attribute::COUNT];
    for attr in Attribute::ALL {
        skills[attr.index()] = numeric_cell(record, layout.skills[attr.index()], attr.code(), line);
    }

    Ok(SportRecord {
        sport: sport.to_string(),
        rank: rank_cell(record, layout.rank, line),
        total: numeric_cell(record, layout.total, "total", line),
        skills,
    })
}

/// Parse source CSV bytes into records, keeping source row order.
///
/// Every row with a sport name is kept, blank or unparseable numeric cells
/// becoming `None`. Rows without a sport name are skipped and counted; a
/// header that lacks a required column fails the whole parse.
pub fn parse_records(bytes: &[u8], delimiter: u8, origin: &Path) -> Result<(Vec<SportRecord>, ParseStats)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| DashboardError::MalformedSource {
            path: origin.to_path_buf(),
            reason: format!("unreadable header: {}", e),
        })?
        .clone();
    let layout = HeaderLayout::resolve(&headers)?;

    let mut stats = ParseStats {
        dropped_index_column: layout.dropped_index_column,
        ..ParseStats::default()
    };
    let mut records = Vec::new();

    for result in reader.records() {
        stats.total_rows += 1;
        let line = stats.total_rows;
        let parsed = result
            .map_err(|e| format!("CSV parse error: {}", e))
            .and_then(|record| parse_row(&record, &layout, line));

        match parsed {
            Ok(record) => {
                if record.missing_cells() > 0 {
                    stats.incomplete += 1;
                }
                records.push(record);
                stats.parsed += 1;
            }
            Err(reason) => {
                stats.failed += 1;
                log::warn!("Line {} skipped - {}", stats.total_rows, reason);
            }
        }
    }

    Ok((records, stats))
}

/// Left-join records against the popularity reference and impute the gaps.
///
/// The fill value is the mean of matched rows only; it is computed before
/// any row is filled so imputed values never feed back into it.
pub fn enrich(records: Vec<SportRecord>, reference: &PopularityReference) -> Result<(EnrichedTable, Enrichment)> {
    let joined: Vec<(SportRecord, Option<u32>)> = records
        .into_iter()
        .map(|record| {
            let popularity = reference.get(&record.sport);
            (record, popularity)
        })
        .collect();

    let matched: Vec<f64> = joined
        .iter()
        .filter_map(|(_, popularity)| popularity.map(f64::from))
        .collect();
    let unmatched = joined.len() - matched.len();

    let fill = if unmatched == 0 {
        None
    } else if matched.is_empty() {
        return Err(DashboardError::PopularityUnimputable { rows: joined.len() });
    } else {
        Some(matched.iter().sum::<f64>() / matched.len() as f64)
    };

    let rows = joined
        .into_iter()
        .map(|(record, popularity)| match popularity {
            Some(score) => EnrichedRow {
                record,
                popularity_index: f64::from(score),
                popularity_source: PopularitySource::Reference,
            },
            None => {
                // `fill` is Some whenever a row is unmatched
                let value = fill.unwrap_or_default();
                log::debug!("Imputed popularity {:.2} for '{}'", value, record.sport);
                EnrichedRow {
                    record,
                    popularity_index: value,
                    popularity_source: PopularitySource::Imputed,
                }
            }
        })
        .collect();

    if let Some(value) = fill {
        log::warn!(
            "{} of {} rows had no popularity reference; filled with matched mean {:.2}",
            unmatched,
            matched.len() + unmatched,
            value
        );
    }

    Ok((
        EnrichedTable::new(rows),
        Enrichment {
            matched_rows: matched.len(),
            imputed_rows: unmatched,
            imputed_popularity: fill,
        },
    ))
}

/// Read the source file, mapping any I/O failure to `SourceNotFound`.
pub fn read_source(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| DashboardError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse and enrich already-read source bytes.
pub fn load_from_bytes(
    bytes: &[u8],
    delimiter: u8,
    origin: &Path,
    reference: &PopularityReference,
) -> Result<LoadedTable> {
    let (records, stats) = parse_records(bytes, delimiter, origin)?;
    let (table, enrichment) = enrich(records, reference)?;

    log::info!(
        "Loaded {} rows from {} (incomplete: {}, failed: {}, imputed popularity: {})",
        table.len(),
        origin.display(),
        stats.incomplete,
        stats.failed,
        enrichment.imputed_rows
    );

    Ok(LoadedTable {
        table,
        stats,
        enrichment,
    })
}

/// Load the source file into an enriched table.
pub fn load_table(path: &Path, delimiter: u8, reference: &PopularityReference) -> Result<LoadedTable> {
    let bytes = read_source(path)?;
    load_from_bytes(&bytes, delimiter, path, reference)
}
