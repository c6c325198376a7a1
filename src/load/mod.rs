// src/load/mod.rs
use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, DataType, Reader};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One source spreadsheet, read into memory as strings.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Column labels from the first sheet row. These are what the file
    /// claims; the real per-category header sits in the data area below.
    pub headers: Vec<String>,
    /// Every row below the label row, one `Vec<String>` per row.
    pub rows: Vec<Vec<String>>,
    /// Path of the workbook this table came from.
    pub source: PathBuf,
}

/// Produces labeled raw tables for the pipeline. Finite, in discovery order.
pub trait TableSource {
    fn tables(&self) -> Result<Vec<RawTable>>;
}

/// Reads every `.xls*` workbook under `<data_dir>/<folder>/`.
pub struct XlsDirSource {
    data_dir: PathBuf,
    folder: String,
}

impl XlsDirSource {
    pub fn new<P: Into<PathBuf>>(data_dir: P, folder: &str) -> Self {
        Self {
            data_dir: data_dir.into(),
            folder: folder.to_string(),
        }
    }

    fn matching_paths(&self) -> Result<Vec<PathBuf>> {
        let pattern = self
            .data_dir
            .join(&self.folder)
            .join("*.xls*")
            .to_string_lossy()
            .into_owned();
        let mut paths: Vec<PathBuf> = glob::glob(&pattern)
            .with_context(|| format!("bad glob pattern {pattern}"))?
            .collect::<std::result::Result<_, _>>()
            .with_context(|| format!("scanning {pattern}"))?;
        // glob order is platform dependent; sort for a deterministic run
        paths.sort();
        Ok(paths)
    }
}

impl TableSource for XlsDirSource {
    fn tables(&self) -> Result<Vec<RawTable>> {
        let paths = self.matching_paths()?;
        info!(
            folder = %self.folder,
            files = paths.len(),
            "discovered source workbooks"
        );
        paths.iter().map(|p| read_workbook(p)).collect()
    }
}

/// Read the first worksheet of `path` into a `RawTable`.
fn read_workbook(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("no worksheet in {}", path.display()))?
        .with_context(|| format!("failed to read worksheet of {}", path.display()))?;

    let mut rows = range.rows().map(|row| {
        row.iter()
            .map(|cell| cell.as_string().unwrap_or_else(|| format!("{cell}")))
            .collect::<Vec<String>>()
    });
    let headers = rows.next().unwrap_or_default();
    let rows: Vec<Vec<String>> = rows.collect();

    debug!(
        path = %path.display(),
        cols = headers.len(),
        rows = rows.len(),
        "loaded workbook"
    );
    Ok(RawTable {
        headers,
        rows,
        source: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn empty_folder_yields_no_tables() -> Result<()> {
        let tmp = TempDir::new()?;
        fs::create_dir_all(tmp.path().join("demanda_e_matriculas"))?;
        let source = XlsDirSource::new(tmp.path(), "demanda_e_matriculas");
        assert!(source.tables()?.is_empty());
        Ok(())
    }

    #[test]
    fn only_xls_family_extensions_are_discovered() -> Result<()> {
        let tmp = TempDir::new()?;
        let dir = tmp.path().join("demanda_e_matriculas");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("notas_2019.csv"), "a,b\n")?;
        fs::write(dir.join("leia-me.txt"), "not a workbook")?;
        let source = XlsDirSource::new(tmp.path(), "demanda_e_matriculas");
        // neither file matches *.xls*, so nothing is even opened
        assert!(source.tables()?.is_empty());
        Ok(())
    }

    #[test]
    fn discovery_order_is_sorted_by_path() -> Result<()> {
        let tmp = TempDir::new()?;
        let dir = tmp.path().join("demanda_e_matriculas");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("demanda_2019.xls"), b"")?;
        fs::write(dir.join("demanda_2017.xls"), b"")?;
        let source = XlsDirSource::new(tmp.path(), "demanda_e_matriculas");
        let paths = source.matching_paths()?;
        let names: Vec<_> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["demanda_2017.xls", "demanda_2019.xls"]);
        Ok(())
    }
}
