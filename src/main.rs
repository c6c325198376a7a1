use anyhow::Result;
use matriculas::{process, XlsDirSource};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Folder under the data root holding the yearly enrollment workbooks.
const FOLDER: &str = "demanda_e_matriculas";

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();
    info!("startup");

    let data_dir = env::var("DATA_FOLDER").unwrap_or_else(|_| "data".to_string());
    info!(data_dir = %data_dir, folder = FOLDER, "building corpus");

    let source = XlsDirSource::new(data_dir, FOLDER);
    let corpus = process::normalize_all(&source)?;

    info!(
        rows = corpus.rows.len(),
        categories = ?corpus.categories,
        years = ?corpus.years(),
        "done"
    );
    Ok(())
}
