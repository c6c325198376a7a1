// src/process/rows.rs
//
// Row-window detection and header promotion. Source sheets end their real
// data with a literal TOTAL row; everything from that row down (totals,
// footnotes, metadata) is dropped before the header row is promoted.

use crate::error::NormalizeError;
use crate::process::Table;

/// Index of the first row whose first cell is exactly `"TOTAL"`.
pub fn find_total_row(table: &Table, source: &str) -> Result<usize, NormalizeError> {
    table
        .rows
        .iter()
        .position(|row| row.first().map(String::as_str) == Some("TOTAL"))
        .ok_or_else(|| NormalizeError::MissingTotalRow {
            table: source.to_string(),
        })
}

/// Keep rows strictly above `idx`, dropping the TOTAL row and everything
/// below it.
pub fn truncate_before(table: &Table, idx: usize) -> Table {
    Table {
        columns: table.columns.clone(),
        rows: table.rows[..idx.min(table.rows.len())].to_vec(),
    }
}

/// Promote the first data row to column names and remove it from the data
/// area. A blank label becomes the literal `Distrito` — that column carries
/// no header text in the source sheets.
pub fn promote_first_row(table: &Table) -> Table {
    let Some((first, rest)) = table.rows.split_first() else {
        // a sheet whose TOTAL row comes first has no data rows at all
        return table.clone();
    };
    let columns = (0..table.columns.len())
        .map(|i| match first.get(i) {
            Some(label) if !label.trim().is_empty() => label.clone(),
            _ => "Distrito".to_string(),
        })
        .collect();
    Table {
        columns,
        rows: rest.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Table {
        Table {
            columns: row(&["Distrito", "Matriculas"]),
            rows: vec![
                row(&["", "Ens. Fund. I"]),
                row(&["A", "1"]),
                row(&["B", "2"]),
                row(&["TOTAL", "3"]),
                row(&["fonte: SME", ""]),
            ],
        }
    }

    #[test]
    fn total_row_is_found_by_exact_match() {
        assert_eq!(find_total_row(&sample(), "t").unwrap(), 3);
    }

    #[test]
    fn lowercase_total_does_not_count() {
        let mut table = sample();
        table.rows[3][0] = "Total".to_string();
        let err = find_total_row(&table, "demanda_2019.xls").unwrap_err();
        assert_eq!(
            err,
            NormalizeError::MissingTotalRow {
                table: "demanda_2019.xls".to_string()
            }
        );
    }

    #[test]
    fn truncation_excludes_the_total_row_and_below() {
        let table = sample();
        let idx = find_total_row(&table, "t").unwrap();
        let trimmed = truncate_before(&table, idx);
        assert_eq!(trimmed.rows.len(), 3);
        assert!(trimmed.rows.iter().all(|r| r[0] != "TOTAL"));
        assert!(trimmed.rows.iter().all(|r| r[0] != "fonte: SME"));
    }

    #[test]
    fn promotion_fills_the_blank_district_label() {
        let table = sample();
        let trimmed = truncate_before(&table, 3);
        let promoted = promote_first_row(&trimmed);
        assert_eq!(promoted.columns, row(&["Distrito", "Ens. Fund. I"]));
        assert_eq!(promoted.rows, vec![row(&["A", "1"]), row(&["B", "2"])]);
    }

    #[test]
    fn promoting_an_empty_table_is_a_no_op() {
        let table = Table {
            columns: row(&["a"]),
            rows: vec![],
        };
        assert_eq!(promote_first_row(&table), table);
    }
}
