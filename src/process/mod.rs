// src/process/mod.rs
//
// The TableNormalizer pipeline. Per source table: locate the enrollment
// column block, reattach the district column, cut everything at the TOTAL
// row, promote the real header, stamp the year — then union all tables and
// normalize names/types into the final corpus.

pub mod clean;
pub mod columns;
pub mod corpus;
pub mod rows;

use crate::error::NormalizeError;
use crate::load::{RawTable, TableSource};
use anyhow::Result;
use tracing::{debug, info};

pub use corpus::{Corpus, CorpusRow};

/// An intermediate table: named columns over string rows. Every pipeline
/// stage takes a `Table` by reference and returns a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Append a constant `ano` column holding `year` on every row.
fn stamp_year(table: Table, year: &str) -> Table {
    let mut columns = table.columns;
    columns.push("ano".to_string());
    let rows = table
        .rows
        .into_iter()
        .map(|mut row| {
            row.push(year.to_string());
            row
        })
        .collect();
    Table { columns, rows }
}

/// Run the per-table pipeline on one raw sheet.
///
/// Stages, in order: column-window detection, district reattachment,
/// truncation at the TOTAL row, header promotion, year stamping. Any
/// failure aborts the run — there is no skip-and-continue.
pub fn normalize_table(raw: &RawTable) -> Result<Table, NormalizeError> {
    let file = raw.source.display().to_string();

    let start = columns::locate_column(&raw.headers, &columns::BLOCK_START, &file)?;
    let end = columns::locate_column(&raw.headers, &columns::BLOCK_END, &file)?;
    let district_idx = columns::locate_column(&raw.headers, &columns::DISTRICT, &file)?;
    debug!(file = %file, start, end, district_idx, "column window located");

    let table = Table {
        columns: raw.headers.clone(),
        rows: raw.rows.clone(),
    };
    let window = columns::extract_window(&table, start, end);
    let district = columns::extract_district(&table, district_idx);
    let joined = columns::attach_district(&window, &district);

    let total_row = rows::find_total_row(&joined, &file)?;
    let trimmed = rows::truncate_before(&joined, total_row);
    let promoted = rows::promote_first_row(&trimmed);

    let year = clean::extract_year(&raw.source);
    Ok(stamp_year(promoted, &year))
}

/// Build the full corpus from a table source: per-table pipeline on every
/// raw sheet, row-wise union, then global name/type normalization.
pub fn normalize_all(source: &dyn TableSource) -> Result<Corpus> {
    let raws = source.tables()?;
    let mut tables = Vec::with_capacity(raws.len());
    for raw in &raws {
        info!(file = %raw.source.display(), rows = raw.rows.len(), "normalizing");
        tables.push(normalize_table(raw)?);
    }
    let assembled = corpus::assemble(&tables);
    let corpus = corpus::normalize(&assembled)?;
    info!(
        rows = corpus.rows.len(),
        categories = corpus.categories.len(),
        "corpus assembled"
    );
    Ok(corpus)
}
