use thiserror::Error;

/// Errors surfaced by the collection engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid schema or index declaration at collection construction.
    #[error("schema error: {reason}")]
    SchemaError { reason: String },

    /// A query or edit referenced a column the schema does not have.
    #[error("column not found: {column}")]
    ColumnNotFound { column: String },

    /// A value's runtime type does not match the declared column type.
    #[error("type mismatch on column '{column}': expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    /// A delete or edit referenced a record, value, or id that is absent.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// The record id space is exhausted; no further inserts are possible.
    #[error("record id pool exhausted")]
    IdPoolExhausted,

    /// The operation is not supported for the given type or index kind.
    #[error("not implemented: {what}")]
    NotImplemented { what: String },
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SchemaError {
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
