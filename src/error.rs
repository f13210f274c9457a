use std::io;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{restaurant}: malformed schedule segment '{segment}': {reason}")]
    MalformedSegment {
        restaurant: Arc<str>,
        segment: String,
        reason: String,
    },
    #[error("{restaurant}: no opening hours given")]
    MissingHours { restaurant: Arc<str> },
    #[error("no restaurants found in catalog")]
    EmptyCatalog,
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
