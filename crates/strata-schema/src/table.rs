//! Tables, their indexes, and the registry holding them.

use crate::{Field, SchemaError};
use indexmap::IndexMap;
use std::fmt;
use strata_names::index_name;

/// Kind of index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndexKind {
    Index,
    Unique,
    Primary,
}

impl IndexKind {
    pub fn name(self) -> &'static str {
        match self {
            IndexKind::Index => "index",
            IndexKind::Unique => "unique",
            IndexKind::Primary => "primary",
        }
    }

    /// The builder method that removes an index of this kind.
    pub fn drop_name(self) -> &'static str {
        match self {
            IndexKind::Index => "drop_index",
            IndexKind::Unique => "drop_unique",
            IndexKind::Primary => "drop_primary",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An index registered on a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSpec {
    /// Synthetic name, see [`strata_names::index_name`].
    pub name: String,
    pub kind: IndexKind,
    /// Covered columns, in declaration order.
    pub columns: Vec<String>,
}

impl IndexSpec {
    pub fn covers(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Schema of one table: ordered columns plus indexes.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    name: String,
    fields: IndexMap<String, Field>,
    indexes: IndexMap<String, IndexSpec>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            indexes: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Columns in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Indexes in insertion order.
    pub fn indexes(&self) -> impl Iterator<Item = &IndexSpec> {
        self.indexes.values()
    }

    pub fn index(&self, name: &str) -> Option<&IndexSpec> {
        self.indexes.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn index_count(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.indexes.is_empty()
    }

    pub fn add_field(&mut self, field: Field) -> Result<(), SchemaError> {
        if self.fields.contains_key(field.name()) {
            return Err(self.duplicate_field(field.name()));
        }
        self.fields.insert(field.name().to_string(), field);
        Ok(())
    }

    pub fn field(&self, name: &str) -> Result<&Field, SchemaError> {
        self.fields.get(name).ok_or_else(|| self.unknown_field(name))
    }

    pub fn field_mut(&mut self, name: &str) -> Result<&mut Field, SchemaError> {
        if !self.fields.contains_key(name) {
            return Err(self.unknown_field(name));
        }
        Ok(&mut self.fields[name])
    }

    /// Remove a column. Indexes covering it are left alone.
    pub fn remove_field(&mut self, name: &str) -> Result<Field, SchemaError> {
        self.fields
            .shift_remove(name)
            .ok_or_else(|| self.unknown_field(name))
    }

    /// Move a column to a new name. The renamed column goes to the end of the
    /// iteration order; its type and constraints are untouched.
    pub fn rename_field(&mut self, old: &str, new: &str) -> Result<(), SchemaError> {
        if !self.fields.contains_key(old) {
            return Err(self.unknown_field(old));
        }
        if self.fields.contains_key(new) {
            return Err(self.duplicate_field(new));
        }
        if let Some(mut field) = self.fields.shift_remove(old) {
            field.set_name(new);
            self.fields.insert(new.to_string(), field);
        }
        Ok(())
    }

    /// Synthetic name an index of `kind` over `columns` gets on this table.
    pub fn index_name(&self, kind: IndexKind, columns: &[impl AsRef<str>]) -> String {
        index_name(&self.name, columns, kind.name())
    }

    pub fn add_index(
        &mut self,
        kind: IndexKind,
        columns: &[impl AsRef<str>],
    ) -> Result<&IndexSpec, SchemaError> {
        if columns.is_empty() {
            return Err(SchemaError::EmptyIndex {
                table: self.name.clone(),
                kind,
            });
        }
        let name = self.index_name(kind, columns);
        if self.indexes.contains_key(&name) {
            return Err(SchemaError::DuplicateIndex {
                table: self.name.clone(),
                index: name,
            });
        }
        let spec = IndexSpec {
            name: name.clone(),
            kind,
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
        };
        let spec = self.indexes.entry(name).or_insert(spec);
        Ok(&*spec)
    }

    pub fn drop_index(
        &mut self,
        kind: IndexKind,
        columns: &[impl AsRef<str>],
    ) -> Result<IndexSpec, SchemaError> {
        let name = self.index_name(kind, columns);
        match self.indexes.shift_remove(&name) {
            Some(spec) => Ok(spec),
            None => Err(SchemaError::UnknownIndex {
                table: self.name.clone(),
                index: name,
            }),
        }
    }

    /// Indexes that still mention `column`.
    pub fn indexes_covering<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a IndexSpec> {
        self.indexes.values().filter(move |idx| idx.covers(column))
    }

    fn unknown_field(&self, name: &str) -> SchemaError {
        SchemaError::UnknownField {
            table: self.name.clone(),
            field: name.to_string(),
        }
    }

    fn duplicate_field(&self, name: &str) -> SchemaError {
        SchemaError::DuplicateField {
            table: self.name.clone(),
            field: name.to_string(),
        }
    }
}

/// All tables of one replay session.
///
/// Tables appear the first time something references them and are never
/// removed implicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaRegistry {
    tables: IndexMap<String, TableSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    /// The table called `name`, created empty on first reference.
    pub fn table_for(&mut self, name: &str) -> &mut TableSchema {
        self.tables
            .entry(name.to_string())
            .or_insert_with(|| TableSchema::new(name))
    }

    /// Tables sorted by name.
    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        let mut tables: Vec<_> = self.tables.values().collect();
        tables.sort_by(|a, b| a.name.cmp(&b.name));
        tables.into_iter()
    }

    /// Look up a column, failing the same way for a missing table as for a
    /// missing column.
    pub fn field(&self, table: &str, name: &str) -> Result<&Field, SchemaError> {
        match self.tables.get(table) {
            Some(t) => t.field(name),
            None => Err(SchemaError::UnknownField {
                table: table.to_string(),
                field: name.to_string(),
            }),
        }
    }

    /// A detached copy of `name` (or a fresh empty table) to mutate before
    /// [`commit`](Self::commit)ting it back.
    pub fn stage(&self, name: &str) -> TableSchema {
        self.tables
            .get(name)
            .cloned()
            .unwrap_or_else(|| TableSchema::new(name))
    }

    /// Store a staged table, replacing the previous version in place.
    pub fn commit(&mut self, table: TableSchema) {
        self.tables.insert(table.name.clone(), table);
    }
}
