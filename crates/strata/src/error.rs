use strata_schema::SchemaError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReplayError {
    /// An instruction was rejected. Everything before it was applied, nothing
    /// after it was attempted.
    #[error("instruction #{position} `{instruction}` on table '{table}': {source}")]
    Instruction {
        position: usize,
        table: String,
        instruction: String,
        #[source]
        source: SchemaError,
    },

    #[error("migration {version}: {source}")]
    Migration {
        version: String,
        #[source]
        source: Box<ReplayError>,
    },

    #[error("migration {version} does not sort after {previous}, refusing to replay out of order")]
    OutOfOrder { previous: String, version: String },
}

impl ReplayError {
    /// The schema error at the root of this failure, if any.
    pub fn schema_error(&self) -> Option<&SchemaError> {
        match self {
            ReplayError::Instruction { source, .. } => Some(source),
            ReplayError::Migration { source, .. } => source.schema_error(),
            ReplayError::OutOfOrder { .. } => None,
        }
    }
}
