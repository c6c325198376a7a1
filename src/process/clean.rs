// src/process/clean.rs
//
// Small pure string helpers: accent stripping, column-name cleaning, and
// year extraction from file names.

use std::path::Path;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Remove diacritics: NFD-decompose, then drop combining marks.
pub fn strip_accents(s: &str) -> String {
    s.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Normalize one column name: lowercase, periods and spaces to underscores,
/// collapse underscore runs, trim edge underscores, strip accents, then the
/// two fixed rewrites ("ens_fund*" → "fund*", "ens_medio" → "ens_med").
/// Idempotent: cleaning a cleaned name changes nothing.
pub fn clean_col(col: &str) -> String {
    let mut col = col.to_lowercase().replace(['.', ' '], "_");
    while col.contains("__") {
        col = col.replace("__", "_");
    }
    let col = strip_accents(col.trim_matches('_'));
    let col = if col.starts_with("ens_fund") {
        col["ens_".len()..].to_string()
    } else {
        col
    };
    if col == "ens_medio" {
        "ens_med".to_string()
    } else {
        col
    }
}

/// Year of a source file: the last 4 characters of the file name before its
/// `.xls*` extension. No calendar validation — files are named `..._YYYY.xls`
/// by convention and whatever occupies that position is used verbatim.
pub fn extract_year(path: &Path) -> String {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    let stem = name.split(".xls").next().unwrap_or(name);
    let chars: Vec<char> = stem.chars().collect();
    chars[chars.len().saturating_sub(4)..].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn accents_are_stripped() {
        assert_eq!(strip_accents("Matrícula em Processo"), "Matricula em Processo");
        assert_eq!(strip_accents("médio"), "medio");
        assert_eq!(strip_accents("fund"), "fund");
    }

    #[test]
    fn fund_columns_lose_the_ens_prefix() {
        assert_eq!(clean_col("Ens. Fund. I"), "fund_i");
        assert_eq!(clean_col("Ens. Fund. II"), "fund_ii");
    }

    #[test]
    fn ens_medio_becomes_ens_med() {
        assert_eq!(clean_col("Ens. Médio"), "ens_med");
        // only the exact name is rewritten
        assert_eq!(clean_col("Ens. Médio Técnico"), "ens_medio_tecnico");
    }

    #[test]
    fn cleaning_is_idempotent() {
        for name in ["Ens. Fund. I", "Ens. Médio", "Educação Infantil", "EJA"] {
            let once = clean_col(name);
            assert_eq!(clean_col(&once), once);
        }
    }

    #[test]
    fn underscore_runs_collapse_and_edges_trim() {
        assert_eq!(clean_col("  Educação   Infantil. "), "educacao_infantil");
        assert_eq!(clean_col("a...b"), "a_b");
    }

    #[test]
    fn year_is_the_last_four_stem_chars() {
        assert_eq!(extract_year(Path::new("base/demanda_2019.xls")), "2019");
        assert_eq!(
            extract_year(&PathBuf::from("data/demanda_e_matriculas/demanda_2021.xlsx")),
            "2021"
        );
        // no validation: whatever sits there is used verbatim
        assert_eq!(extract_year(Path::new("abcd.xls")), "abcd");
        assert_eq!(extract_year(Path::new("x1.xls")), "x1");
    }
}
