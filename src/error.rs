use thiserror::Error;

/// Errors that abort a pipeline run.
///
/// Recoverable anomalies (bad numeric fields, dropped biomes, duplicate
/// bodies) never surface here; they are reported through [`crate::report::Report`]
/// and the run continues with a documented fallback.
#[derive(Debug, Error)]
pub enum DataError {
    /// A short or full resource name collides case-insensitively with one
    /// already in the index.
    #[error("duplicate resource name '{name}' in catalog")]
    DuplicateResource { name: String },

    /// A name matches no catalog entry. The loader attaches the
    /// referencing system and body as context.
    #[error("unknown resource '{name}'")]
    UnknownResource { name: String },

    /// A field with no defined fallback failed to parse.
    #[error("invalid {field} ('{value}') for {system} -> {body}")]
    InvalidField {
        field: &'static str,
        value: String,
        system: String,
        body: String,
    },

    /// A required field is absent from the raw record.
    #[error("missing {field} for {system} -> {body}")]
    MissingField {
        field: &'static str,
        system: String,
        body: String,
    },

    /// The store rejected a row that the schema requires to be unique.
    #[error("schema violation inserting {table} row '{key}'")]
    SchemaViolation {
        table: &'static str,
        key: String,
        #[source]
        source: rusqlite::Error,
    },
}
