//! The instruction vocabulary a migration front-end hands to the interpreter.

use std::fmt;
use strata_schema::{ConstraintCall, IndexKind, TypeTag, Value};

/// A column declaration: the payload of `AddColumn` and `ChangeColumn`.
///
/// ```
/// use strata::{ColumnDef, ConstraintCall, TypeTag};
///
/// let add = ColumnDef::new("users", "name", TypeTag::String)
///     .arg(50)
///     .with(ConstraintCall::nullable())
///     .add();
/// assert_eq!(add.to_string(), "+ users.name: string(50).nullable()");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub table: String,
    pub name: String,
    pub tag: TypeTag,
    /// Positional type arguments, e.g. a string length.
    pub args: Vec<Value>,
    /// Constraint calls, applied in order.
    pub constraints: Vec<ConstraintCall>,
}

impl ColumnDef {
    pub fn new(table: impl Into<String>, name: impl Into<String>, tag: TypeTag) -> Self {
        Self {
            table: table.into(),
            name: name.into(),
            tag,
            args: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Append a positional type argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Append a constraint call.
    pub fn with(mut self, call: ConstraintCall) -> Self {
        self.constraints.push(call);
        self
    }

    pub fn add(self) -> Instruction {
        Instruction::AddColumn(self)
    }

    pub fn change(self) -> Instruction {
        Instruction::ChangeColumn(self)
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.table, self.name, self.tag)?;
        if !self.args.is_empty() {
            let args: Vec<_> = self.args.iter().map(|a| a.to_string()).collect();
            write!(f, "({})", args.join(", "))?;
        }
        for call in &self.constraints {
            write!(f, "{}", call)?;
        }
        Ok(())
    }
}

/// One schema-mutating command targeting a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Declare a new column.
    AddColumn(ColumnDef),
    /// Redeclare an existing column from scratch, keeping its position.
    ChangeColumn(ColumnDef),
    /// Remove one or more columns.
    DropColumn { table: String, names: Vec<String> },
    /// Move a column to a new name.
    RenameColumn {
        table: String,
        from: String,
        to: String,
    },
    /// Register an index over `columns`.
    AddIndex {
        table: String,
        kind: IndexKind,
        columns: Vec<String>,
    },
    /// Remove the index of `kind` over `columns`.
    DropIndex {
        table: String,
        kind: IndexKind,
        columns: Vec<String>,
    },
}

impl Instruction {
    pub fn drop_columns(table: impl Into<String>, names: &[&str]) -> Self {
        Instruction::DropColumn {
            table: table.into(),
            names: names.iter().map(|n| n.to_string()).collect(),
        }
    }

    pub fn rename_column(table: impl Into<String>, from: &str, to: &str) -> Self {
        Instruction::RenameColumn {
            table: table.into(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn add_index(table: impl Into<String>, kind: IndexKind, columns: &[&str]) -> Self {
        Instruction::AddIndex {
            table: table.into(),
            kind,
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn drop_index(table: impl Into<String>, kind: IndexKind, columns: &[&str]) -> Self {
        Instruction::DropIndex {
            table: table.into(),
            kind,
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// The table this instruction targets.
    pub fn table(&self) -> &str {
        match self {
            Instruction::AddColumn(def) | Instruction::ChangeColumn(def) => &def.table,
            Instruction::DropColumn { table, .. }
            | Instruction::RenameColumn { table, .. }
            | Instruction::AddIndex { table, .. }
            | Instruction::DropIndex { table, .. } => table,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::AddColumn(def) => write!(f, "+ {}", def),
            Instruction::ChangeColumn(def) => write!(f, "~ {}", def),
            Instruction::DropColumn { table, names } => {
                let names: Vec<_> = names.iter().map(|n| format!("{}.{}", table, n)).collect();
                write!(f, "- {}", names.join(", "))
            }
            Instruction::RenameColumn { table, from, to } => {
                write!(f, "~ rename {}.{} -> {}", table, from, to)
            }
            Instruction::AddIndex {
                table,
                kind,
                columns,
            } => write!(f, "+ {} {}({})", kind, table, columns.join(", ")),
            Instruction::DropIndex {
                table,
                kind,
                columns,
            } => write!(f, "- {} {}({})", kind, table, columns.join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let change = ColumnDef::new("users", "votes", TypeTag::Integer)
            .with(ConstraintCall::unsigned())
            .with(ConstraintCall::default(0))
            .change();
        assert_eq!(change.to_string(), "~ users.votes: integer.unsigned().default(0)");

        assert_eq!(
            Instruction::drop_columns("users", &["votes", "avatar"]).to_string(),
            "- users.votes, users.avatar"
        );
        assert_eq!(
            Instruction::rename_column("users", "from", "to").to_string(),
            "~ rename users.from -> to"
        );
        assert_eq!(
            Instruction::add_index("users", IndexKind::Unique, &["email", "tenant_id"]).to_string(),
            "+ unique users(email, tenant_id)"
        );
        assert_eq!(
            Instruction::drop_index("users", IndexKind::Primary, &["id"]).to_string(),
            "- primary users(id)"
        );
    }

    #[test]
    fn test_table() {
        let add = ColumnDef::new("posts", "title", TypeTag::String).add();
        assert_eq!(add.table(), "posts");
        assert_eq!(Instruction::drop_columns("tags", &["slug"]).table(), "tags");
    }
}
