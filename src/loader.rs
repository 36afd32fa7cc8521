use crate::error::DashboardError;
use crate::normalize::{normalize_with, positional_id, ColumnSchema};
use crate::types::{RawRow, Region};
use csv::{ReaderBuilder, StringRecord, Terminator};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub short_rows: usize,
    // ids that fell back to `row-<index>` for lack of area or name
    pub positional_ids: usize,
    pub duplicate_ids: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    pub short_rows: usize,
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty()) && record.len() <= 1
}

/// Lines end at `\n` (a preceding `\r` is trimmed with the cell); a lone `\r`
/// stays inside its cell. Quotes carry no meaning, so a value with an
/// embedded comma spills into the next column.
pub fn parse_table(text: &str) -> ParsedTable {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut table = ParsedTable::default();

    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "skipping unreadable line");
                continue;
            }
        };
        if is_blank(&record) {
            continue;
        }
        if headers.is_none() {
            headers = Some(
                record
                    .iter()
                    .map(|h| h.trim_start_matches(BOM).trim().to_string())
                    .collect(),
            );
            continue;
        }
        let header = headers.as_deref().unwrap_or_default();

        if record.len() < header.len() {
            table.short_rows += 1;
        }
        let row: RawRow = header
            .iter()
            .enumerate()
            .map(|(i, key)| (key.clone(), record.get(i).unwrap_or("").trim().to_string()))
            .collect();
        table.rows.push(row);
    }

    table.headers = headers.unwrap_or_default();
    table
}

/// Parse `text` and normalize every row into a shared [`Region`].
///
/// Ids are unique within the pass: an `<area>-<name>` id seen before falls
/// back to `row-<index>`, and a positional id that is itself taken gets a
/// numeric suffix.
pub fn load_regions(text: &str, schema: &ColumnSchema) -> (Vec<Arc<Region>>, LoadReport) {
    let table = parse_table(text);
    let mut report = LoadReport {
        total_rows: table.rows.len(),
        short_rows: table.short_rows,
        ..LoadReport::default()
    };

    let mut seen: HashSet<String> = HashSet::with_capacity(table.rows.len());
    let mut regions = Vec::with_capacity(table.rows.len());
    for (index, row) in table.rows.into_iter().enumerate() {
        let mut region = normalize_with(schema, row, index);
        if region.area.is_empty() || region.name.is_empty() {
            report.positional_ids += 1;
        }
        if seen.contains(&region.id) {
            report.duplicate_ids += 1;
            debug!(id = %region.id, index, "duplicate region id");
            region.id = unique_positional_id(&seen, index);
        }
        seen.insert(region.id.clone());
        regions.push(Arc::new(region));
    }

    info!(
        rows = report.total_rows,
        short_rows = report.short_rows,
        positional_ids = report.positional_ids,
        duplicate_ids = report.duplicate_ids,
        "parsed region table"
    );
    (regions, report)
}

fn unique_positional_id(seen: &HashSet<String>, index: usize) -> String {
    let base = positional_id(index);
    if !seen.contains(&base) {
        return base;
    }
    (1..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !seen.contains(candidate))
        .unwrap_or(base)
}

pub fn load_regions_from_path(
    path: &Path,
    schema: &ColumnSchema,
) -> Result<(Vec<Arc<Region>>, LoadReport), DashboardError> {
    let text = std::fs::read_to_string(path).map_err(|source| DashboardError::ReadData {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(load_regions(&text, schema))
}
