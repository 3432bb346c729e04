//! Reading order tables and writing solve results
pub mod json;

use thiserror::Error;

/// Errors reading or writing files
#[derive(Error, Debug)]
pub enum IoError {
    #[error("couldn't access {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
