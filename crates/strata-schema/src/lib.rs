//! Schema snapshot types for strata.
//!
//! A [`SchemaRegistry`] maps table names to [`TableSchema`]s, each holding
//! ordered [`Field`]s and an index map keyed by synthetic index name. The
//! mutation methods here enforce the per-table invariants (unique column names,
//! columns must exist before they're changed, unique index names); sequencing
//! instructions against them is the job of the `strata` interpreter.

mod error;
mod field;
mod table;
mod types;

pub use error::SchemaError;
pub use field::{ConstraintCall, Field};
pub use table::{IndexKind, IndexSpec, SchemaRegistry, TableSchema};
pub use types::{Constraint, Family, TypeTag, Value};
