//! Schema reconstruction from migration instruction streams.
//!
//! This crate replays the table mutations of many migrations, in order, and
//! keeps the cumulative schema of every table they touch:
//! - [`Instruction`]s describe column and index changes
//! - [`apply`] and [`apply_all`] run them against a [`SchemaRegistry`]
//! - [`replay_migrations`] replays versioned groups, refusing them out of order
//! - [`dump`] renders the result as canonical builder statements
//!
//! # Example
//!
//! ```
//! use strata::{ColumnDef, ConstraintCall, SchemaRegistry, TypeTag, apply_all, dump};
//!
//! let instructions = [
//!     ColumnDef::new("users", "id", TypeTag::Increments).add(),
//!     ColumnDef::new("users", "name", TypeTag::String)
//!         .arg(50)
//!         .with(ConstraintCall::nullable())
//!         .add(),
//!     ColumnDef::new("users", "created_at", TypeTag::Timestamps).add(),
//! ];
//! let registry = apply_all(SchemaRegistry::new(), &instructions)?;
//!
//! assert_eq!(
//!     dump(&registry),
//!     "with schema.table('users') as table:\n    table.timestamps()\n    table.increments('id')\n    table.string('name', 50).nullable()\n"
//! );
//! # Ok::<(), strata::ReplayError>(())
//! ```
//!
//! # Change semantics
//!
//! A `ChangeColumn` redeclares a column from scratch: every constraint not
//! repeated in the new chain is gone afterwards. The column keeps its position.
//! Renaming moves a column to the end of its table. Neither renames nor drops
//! touch indexes; a dropped column that an index still covers is logged at
//! `warn` level.

pub mod config;
mod error;
mod instruction;
mod interpreter;
mod migration;
mod render;

pub use error::ReplayError;
pub use instruction::{ColumnDef, Instruction};
pub use interpreter::{apply, apply_all};
pub use migration::{Migration, derive_migration_version, replay_migrations};
pub use render::{RenderOptions, dump, dump_with, fingerprint};

pub use strata_config::Config;
pub use strata_schema::{
    Constraint, ConstraintCall, Family, Field, IndexKind, IndexSpec, SchemaError, SchemaRegistry,
    TableSchema, TypeTag, Value,
};

/// Result of replaying instructions.
pub type Result<T, E = ReplayError> = std::result::Result<T, E>;
