pub mod error;
pub mod load;
pub mod process;

pub use error::NormalizeError;
pub use load::{RawTable, TableSource, XlsDirSource};
pub use process::{Corpus, CorpusRow};
