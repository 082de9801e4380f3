use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read records from {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path} has no `{column}` column")]
    MissingColumn { path: PathBuf, column: String },
    #[error("failed to write {path}: {source}")]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write review sheet {path}: {source}")]
    ReviewUnwritable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to read book {path}: {source}")]
    BookUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed book {path}: {source}")]
    BookMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
