use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Underlying request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    // Non-success status together with whatever body the service sent back
    #[error("Geocoding service returned status {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to open address cache at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("Address cache query failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
