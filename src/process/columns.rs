// src/process/columns.rs
//
// Column-window detection and extraction. The enrollment block sits between
// the "matrículas" and "matrícula em processo" labels; the district column
// lives outside the block and is reattached on the left.

use crate::error::NormalizeError;
use crate::process::Table;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Labels opening the enrollment block. Accented and plain spellings both
/// occur across years.
pub static BLOCK_START: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["matrículas", "matriculas"]));

/// Labels closing the block (exclusive end of the window).
pub static BLOCK_END: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["matrícula em processo", "matricula em processo"]));

/// The district identifier column.
pub static DISTRICT: Lazy<HashSet<&'static str>> = Lazy::new(|| HashSet::from(["distrito"]));

/// A single column pulled out of a table, to be reattached later.
#[derive(Debug, Clone)]
pub struct DistrictColumn {
    pub name: String,
    pub cells: Vec<String>,
}

fn header_matches(header: &str, candidates: &HashSet<&'static str>) -> bool {
    candidates.contains(header.trim().to_lowercase().as_str())
}

/// Index of the first header whose lowercased, trimmed form is in
/// `candidates`. A miss means the sheet layout is not the expected one and
/// the run must stop.
pub fn locate_column(
    headers: &[String],
    candidates: &HashSet<&'static str>,
    table: &str,
) -> Result<usize, NormalizeError> {
    headers
        .iter()
        .position(|h| header_matches(h, candidates))
        .ok_or_else(|| NormalizeError::ColumnNotFound {
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
            table: table.to_string(),
        })
}

/// Copy of the half-open column slice `[start, end)`. Ragged rows are
/// padded with empty cells.
pub fn extract_window(table: &Table, start: usize, end: usize) -> Table {
    let columns: Vec<String> = (start..end)
        .filter_map(|i| table.columns.get(i).cloned())
        .collect();
    let rows = table
        .rows
        .iter()
        .map(|row| {
            (start..end)
                .map(|i| row.get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    Table { columns, rows }
}

/// Copy of the district column at `idx`.
pub fn extract_district(table: &Table, idx: usize) -> DistrictColumn {
    DistrictColumn {
        name: table.columns.get(idx).cloned().unwrap_or_default(),
        cells: table
            .rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or_default())
            .collect(),
    }
}

/// Prepend the district column as the new leftmost column. Rows correspond
/// strictly by index — never a keyed join, so the original sheet order is
/// preserved as-is.
pub fn attach_district(window: &Table, district: &DistrictColumn) -> Table {
    let mut columns = Vec::with_capacity(window.columns.len() + 1);
    columns.push(district.name.clone());
    columns.extend(window.columns.iter().cloned());

    let rows = window
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut out = Vec::with_capacity(row.len() + 1);
            out.push(district.cells.get(i).cloned().unwrap_or_default());
            out.extend(row.iter().cloned());
            out
        })
        .collect();
    Table { columns, rows }
}
