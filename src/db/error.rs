use thiserror::Error;

/// Failures surfaced by a [`DatabaseClient`](super::DatabaseClient).
///
/// Every variant renders as the bare underlying message so callers can forward
/// it to clients unchanged.
#[derive(Debug, Error)]
pub enum DbError {
    /// The store rejected the query and said why
    #[error("{message}")]
    Query {
        message: String,
        code: Option<String>,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{0}")]
    Sqlite(#[from] sqlx::Error),

    /// A row came back in a shape we could not turn into JSON
    #[error("{0}")]
    Decode(String),

    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

impl DbError {
    pub fn query(message: impl Into<String>) -> Self {
        DbError::Query {
            message: message.into(),
            code: None,
        }
    }
}
