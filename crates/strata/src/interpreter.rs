//! The command interpreter: replays instructions against a [`SchemaRegistry`].
//!
//! Every instruction is applied to a staged copy of its table and committed
//! only when it fully succeeds, so a rejected instruction leaves the registry
//! exactly as it was, including not materializing a table it merely named.
//!
//! ## Embedded index calls
//!
//! Column chains may carry index calls scoped to the column being declared:
//!
//! ```text
//! table.integer('id').primary()
//! table.string('email').index()
//! ```
//!
//! A call whose name is not a known constraint but names an index kind
//! (`primary`, `index`) or its removal (`drop_primary`, `drop_unique`,
//! `drop_index`) is routed to the table's index registry with the owning
//! column as the only indexed column. `unique` is a column constraint and is
//! never routed.

use crate::{ColumnDef, Instruction, ReplayError};
use strata_schema::{
    Constraint, ConstraintCall, Field, IndexKind, SchemaError, SchemaRegistry, TableSchema,
};
use tracing::{debug, trace, warn};

/// Apply a single instruction.
pub fn apply(registry: &mut SchemaRegistry, instruction: &Instruction) -> Result<(), SchemaError> {
    let mut table = registry.stage(instruction.table());
    let still_covered = run(&mut table, instruction)?;
    registry.commit(table);

    for (column, index) in still_covered {
        warn!(
            table = instruction.table(),
            column = %column,
            index = %index,
            "dropped column is still covered by an index"
        );
    }
    Ok(())
}

/// Run `instruction` against a staged table. Returns the `(column, index)`
/// pairs left dangling by a successful drop.
fn run(
    table: &mut TableSchema,
    instruction: &Instruction,
) -> Result<Vec<(String, String)>, SchemaError> {
    let mut still_covered = Vec::new();

    match instruction {
        Instruction::AddColumn(def) => add_column(table, def)?,
        Instruction::ChangeColumn(def) => change_column(table, def)?,
        Instruction::DropColumn { names, .. } => {
            for name in names {
                table.remove_field(name)?;
                still_covered.extend(
                    table
                        .indexes_covering(name)
                        .map(|idx| (name.clone(), idx.name.clone())),
                );
            }
        }
        Instruction::RenameColumn { from, to, .. } => table.rename_field(from, to)?,
        Instruction::AddIndex { kind, columns, .. } => {
            table.add_index(*kind, columns)?;
        }
        Instruction::DropIndex { kind, columns, .. } => {
            table.drop_index(*kind, columns)?;
        }
    }

    Ok(still_covered)
}

/// Apply a whole stream in order, stopping at the first rejected instruction.
///
/// The registry is consumed: on failure no partially replayed snapshot is
/// handed back.
pub fn apply_all<'a, I>(mut registry: SchemaRegistry, instructions: I) -> Result<SchemaRegistry, ReplayError>
where
    I: IntoIterator<Item = &'a Instruction>,
{
    for (position, instruction) in instructions.into_iter().enumerate() {
        apply(&mut registry, instruction).map_err(|source| ReplayError::Instruction {
            position,
            table: instruction.table().to_string(),
            instruction: instruction.to_string(),
            source,
        })?;
        debug!(position, table = instruction.table(), "applied {}", instruction);
    }
    Ok(registry)
}

fn add_column(table: &mut TableSchema, def: &ColumnDef) -> Result<(), SchemaError> {
    if table.has_field(&def.name) {
        return Err(SchemaError::DuplicateField {
            table: table.name().to_string(),
            field: def.name.clone(),
        });
    }

    let mut field = Field::create(table.name(), &def.name, def.tag, def.args.clone())?;
    let index_calls = apply_chain(&mut field, &def.constraints)?;
    table.add_field(field)?;
    run_index_calls(table, &def.name, &index_calls)
}

fn change_column(table: &mut TableSchema, def: &ColumnDef) -> Result<(), SchemaError> {
    let field = table.field_mut(&def.name)?;
    field.reset();
    field.set_type(def.tag);
    field.declare_args(def.args.clone())?;
    let index_calls = apply_chain(field, &def.constraints)?;
    run_index_calls(table, &def.name, &index_calls)
}

/// An index call found inside a column chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexCall {
    Add(IndexKind),
    Drop(IndexKind),
}

impl IndexCall {
    const KINDS: [IndexKind; 3] = [IndexKind::Index, IndexKind::Unique, IndexKind::Primary];

    fn from_name(name: &str) -> Option<Self> {
        Self::KINDS.into_iter().find_map(|kind| {
            if kind.name() == name {
                Some(IndexCall::Add(kind))
            } else if kind.drop_name() == name {
                Some(IndexCall::Drop(kind))
            } else {
                None
            }
        })
    }
}

/// Apply a chain of constraint calls to `field`, returning the index calls
/// that were set aside for the table.
fn apply_chain(field: &mut Field, calls: &[ConstraintCall]) -> Result<Vec<IndexCall>, SchemaError> {
    let mut index_calls = Vec::new();

    for call in calls {
        if Constraint::from_name(&call.name).is_none() {
            if let Some(index_call) = IndexCall::from_name(&call.name) {
                if !call.args.is_empty() {
                    return Err(SchemaError::ConstraintArity {
                        column: field.qualified_name(),
                        constraint: call.name.clone(),
                        expected: "no arguments",
                        found: call.args.len(),
                    });
                }
                trace!(column = %field.qualified_name(), call = %call.name, "routing to index registry");
                index_calls.push(index_call);
                continue;
            }
        }
        field.apply_constraint(&call.name, &call.args)?;
    }

    Ok(index_calls)
}

fn run_index_calls(
    table: &mut TableSchema,
    column: &str,
    calls: &[IndexCall],
) -> Result<(), SchemaError> {
    for call in calls {
        match *call {
            IndexCall::Add(kind) => {
                table.add_index(kind, &[column])?;
            }
            IndexCall::Drop(kind) => {
                table.drop_index(kind, &[column])?;
            }
        }
    }
    Ok(())
}
