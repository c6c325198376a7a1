// src/process/corpus.rs
//
// Cross-table assembly and the final name/type normalization pass.

use crate::error::NormalizeError;
use crate::process::clean::clean_col;
use crate::process::Table;
use tracing::warn;

/// The final tidy table: one row per (district, year), integer counts per
/// category column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    /// Normalized category column names, in first-appearance order.
    pub categories: Vec<String>,
    pub rows: Vec<CorpusRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusRow {
    pub distrito: String,
    /// Four-character year string stamped from the source file name.
    pub ano: String,
    /// Counts aligned with `Corpus::categories`.
    pub counts: Vec<i64>,
}

impl Corpus {
    /// Distinct `ano` values, in row order.
    pub fn years(&self) -> Vec<String> {
        let mut years: Vec<String> = Vec::new();
        for row in &self.rows {
            if !years.contains(&row.ano) {
                years.push(row.ano.clone());
            }
        }
        years
    }
}

/// Row-concatenate per-file tables, in input order. Columns are aligned by
/// name; a column absent from some table fills its rows with empty cells,
/// which the coercion pass then rejects. Column order follows first
/// appearance across the inputs.
pub fn assemble(tables: &[Table]) -> Table {
    let mut columns: Vec<String> = Vec::new();
    for table in tables {
        for col in &table.columns {
            if !columns.contains(col) {
                columns.push(col.clone());
            }
        }
    }

    let mut rows = Vec::with_capacity(tables.iter().map(|t| t.rows.len()).sum());
    for table in tables {
        if table.columns.len() != columns.len() {
            warn!(
                have = table.columns.len(),
                want = columns.len(),
                "table column set differs from corpus union"
            );
        }
        let positions: Vec<Option<usize>> = columns
            .iter()
            .map(|col| table.columns.iter().position(|c| c == col))
            .collect();
        for row in &table.rows {
            rows.push(
                positions
                    .iter()
                    .map(|pos| {
                        pos.and_then(|i| row.get(i).cloned())
                            .unwrap_or_default()
                    })
                    .collect(),
            );
        }
    }
    Table { columns, rows }
}

/// Final normalization: clean every column name except `Distrito` and `ano`,
/// then coerce every column except those two to integers. Non-numeric cells
/// — including the empty fill a column-set mismatch introduces — fail the
/// run rather than degrade to nulls.
pub fn normalize(table: &Table) -> Result<Corpus, NormalizeError> {
    let mut cleaned: Vec<String> = Vec::with_capacity(table.columns.len());
    for col in &table.columns {
        let name = if col == "Distrito" || col == "ano" {
            col.clone()
        } else {
            clean_col(col)
        };
        if let Some(prev) = cleaned.iter().position(|c| *c == name) {
            return Err(NormalizeError::SchemaMismatch {
                first: table.columns[prev].clone(),
                second: col.clone(),
                cleaned: name,
            });
        }
        cleaned.push(name);
    }

    let district_idx = require(&cleaned, "Distrito")?;
    let year_idx = require(&cleaned, "ano")?;

    let mut categories = Vec::new();
    let mut category_idx = Vec::new();
    for (i, name) in cleaned.iter().enumerate() {
        if i != district_idx && i != year_idx {
            categories.push(name.clone());
            category_idx.push(i);
        }
    }

    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut counts = Vec::with_capacity(category_idx.len());
        for (&i, name) in category_idx.iter().zip(&categories) {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let value =
                cell.trim()
                    .parse::<i64>()
                    .map_err(|_| NormalizeError::TypeConversion {
                        column: name.clone(),
                        value: cell.to_string(),
                    })?;
            counts.push(value);
        }
        rows.push(CorpusRow {
            distrito: row.get(district_idx).cloned().unwrap_or_default(),
            ano: row.get(year_idx).cloned().unwrap_or_default(),
            counts,
        });
    }

    Ok(Corpus { categories, rows })
}

fn require(columns: &[String], name: &str) -> Result<usize, NormalizeError> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| NormalizeError::ColumnNotFound {
            candidates: vec![name.to_string()],
            table: "corpus".to_string(),
        })
}
