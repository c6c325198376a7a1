use thiserror::Error;

/// Structural failures while building the corpus. All of these abort the
/// whole run: a malformed source file must not be silently included.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// None of the expected header labels is present in a sheet.
    #[error("columns {candidates:?} not found in `{table}`")]
    ColumnNotFound {
        candidates: Vec<String>,
        table: String,
    },

    /// The sheet carries no terminal `TOTAL` row marking the end of real data.
    #[error("`{table}` has no TOTAL row")]
    MissingTotalRow { table: String },

    /// A category cell could not be read as an integer count.
    #[error("column `{column}`: cell `{value}` is not an integer count")]
    TypeConversion { column: String, value: String },

    /// Cleaning collapsed two distinct source columns into the same name.
    #[error("columns `{first}` and `{second}` both normalize to `{cleaned}`")]
    SchemaMismatch {
        first: String,
        second: String,
        cleaned: String,
    },
}
