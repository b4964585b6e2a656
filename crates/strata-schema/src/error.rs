use crate::{IndexKind, TypeTag};
use thiserror::Error;

/// Everything that can go wrong while mutating a schema snapshot.
///
/// Column-scoped variants carry the qualified `table.column` name; table-scoped
/// variants carry the table separately.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("unknown column type '{name}'")]
    UnknownType { name: String },

    #[error("column '{column}': type '{tag}' {reason}")]
    TypeArgument {
        column: String,
        tag: TypeTag,
        reason: String,
    },

    #[error("column '{column}': unknown constraint '{constraint}'")]
    UnknownConstraint { column: String, constraint: String },

    #[error("column '{column}': constraint '{constraint}' expects {expected}, got {found}")]
    ConstraintArity {
        column: String,
        constraint: String,
        expected: &'static str,
        found: usize,
    },

    #[error("column '{column}': constraint '{constraint}' is not supported by type '{tag}'")]
    UnsupportedConstraint {
        column: String,
        constraint: String,
        tag: TypeTag,
    },

    #[error("column '{table}.{field}' already exists")]
    DuplicateField { table: String, field: String },

    #[error("column '{table}.{field}' does not exist")]
    UnknownField { table: String, field: String },

    #[error("index '{index}' already exists on table '{table}'")]
    DuplicateIndex { table: String, index: String },

    #[error("index '{index}' does not exist on table '{table}'")]
    UnknownIndex { table: String, index: String },

    #[error("{kind} index on table '{table}' needs at least one column")]
    EmptyIndex { table: String, kind: IndexKind },
}
