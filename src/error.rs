use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("resource '{resource}' unavailable: {reason}")]
    ResourceUnavailable { resource: String, reason: String },

    #[error("malformed {kind} record ({reason}): {record}")]
    MalformedRecord {
        kind: &'static str,
        reason: String,
        record: String,
    },

    #[error("not found")]
    NotFound,

    #[error("invalid identifier format: {0}")]
    InvalidIdentifierFormat(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Builds a `MalformedRecord` carrying the offending record as compact JSON.
    pub fn malformed(
        kind: &'static str,
        reason: impl Into<String>,
        record: &serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Error::MalformedRecord {
            kind,
            reason: reason.into(),
            record: serde_json::Value::Object(record.clone()).to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
