//! The field model: one column, its declared type and its constraints.

use crate::{Constraint, Family, SchemaError, TypeTag, Value};
use std::fmt;

/// One constraint call from a column chain, e.g. `.default(0)`.
///
/// The name is kept as written so that calls outside the constraint vocabulary
/// (embedded index calls, typos) can be routed or reported by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintCall {
    pub name: String,
    pub args: Vec<Value>,
}

impl ConstraintCall {
    pub fn new(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// A call without arguments, e.g. `.primary()`.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn nullable() -> Self {
        Self::bare("nullable")
    }

    pub fn unique() -> Self {
        Self::bare("unique")
    }

    pub fn unsigned() -> Self {
        Self::bare("unsigned")
    }

    pub fn default(value: impl Into<Value>) -> Self {
        Self::new("default", vec![value.into()])
    }

    pub fn reference(column: &str) -> Self {
        Self::new("reference", vec![column.into()])
    }

    pub fn on(table: &str) -> Self {
        Self::new("on", vec![table.into()])
    }

    pub fn on_delete(action: &str) -> Self {
        Self::new("on_delete", vec![action.into()])
    }
}

impl fmt::Display for ConstraintCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<_> = self.args.iter().map(|a| a.to_string()).collect();
        write!(f, ".{}({})", self.name, args.join(", "))
    }
}

/// A single column.
///
/// Identity is `(table, name)`. Attributes that don't apply to the column's
/// family are never set: `unsigned` only on integers, `reference`/`on`/`on_delete`
/// only on foreign keys, and a length only exists on string columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    table: String,
    name: String,
    tag: TypeTag,
    args: Vec<Value>,
    nullable: bool,
    unique: bool,
    default: Option<Value>,
    unsigned: bool,
    reference: Option<String>,
    on: Option<String>,
    on_delete: Option<String>,
}

impl Field {
    /// Declare a new column. Fails if `args` don't fit `tag`.
    pub fn create(
        table: impl Into<String>,
        name: impl Into<String>,
        tag: TypeTag,
        args: Vec<Value>,
    ) -> Result<Self, SchemaError> {
        let mut field = Self {
            table: table.into(),
            name: name.into(),
            tag,
            args: Vec::new(),
            nullable: false,
            unique: false,
            default: None,
            unsigned: false,
            reference: None,
            on: None,
            on_delete: None,
        };
        field.declare_args(args)?;
        Ok(field)
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `table.name`, used in error messages.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table, self.name)
    }

    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    pub fn family(&self) -> Family {
        self.tag.family()
    }

    /// Positional type arguments, as declared.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn nullable(&self) -> bool {
        self.nullable
    }

    pub fn unique(&self) -> bool {
        self.unique
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn unsigned(&self) -> bool {
        self.unsigned
    }

    /// Declared length of a string column.
    pub fn length(&self) -> Option<u32> {
        match self.family() {
            Family::String => self.args.first().and_then(Value::as_size),
            _ => None,
        }
    }

    /// Referenced column of a foreign key.
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Referenced table of a foreign key.
    pub fn on(&self) -> Option<&str> {
        self.on.as_deref()
    }

    /// `ON DELETE` action of a foreign key.
    pub fn on_delete(&self) -> Option<&str> {
        self.on_delete.as_deref()
    }

    /// Apply one constraint call.
    pub fn apply_constraint(&mut self, name: &str, args: &[Value]) -> Result<(), SchemaError> {
        let Some(constraint) = Constraint::from_name(name) else {
            return Err(SchemaError::UnknownConstraint {
                column: self.qualified_name(),
                constraint: name.to_string(),
            });
        };

        if !self.family().allows(constraint) {
            return Err(SchemaError::UnsupportedConstraint {
                column: self.qualified_name(),
                constraint: name.to_string(),
                tag: self.tag,
            });
        }

        if args.len() != constraint.arity() {
            return Err(SchemaError::ConstraintArity {
                column: self.qualified_name(),
                constraint: name.to_string(),
                expected: if constraint.arity() == 0 {
                    "no arguments"
                } else {
                    "1 argument"
                },
                found: args.len(),
            });
        }

        match constraint {
            Constraint::Nullable => self.nullable = true,
            Constraint::Unique => self.unique = true,
            Constraint::Unsigned => self.unsigned = true,
            Constraint::Default => self.default = Some(self.literal_arg(constraint, args)?),
            Constraint::Reference => self.reference = Some(self.string_arg(constraint, args)?),
            Constraint::On => self.on = Some(self.string_arg(constraint, args)?),
            Constraint::OnDelete => self.on_delete = Some(self.string_arg(constraint, args)?),
        }

        Ok(())
    }

    fn literal_arg(&self, constraint: Constraint, args: &[Value]) -> Result<Value, SchemaError> {
        if !args[0].is_finite() {
            return Err(SchemaError::ConstraintArity {
                column: self.qualified_name(),
                constraint: constraint.name().to_string(),
                expected: "1 finite literal",
                found: args.len(),
            });
        }
        Ok(args[0].clone())
    }

    fn string_arg(&self, constraint: Constraint, args: &[Value]) -> Result<String, SchemaError> {
        args[0]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| SchemaError::ConstraintArity {
                column: self.qualified_name(),
                constraint: constraint.name().to_string(),
                expected: "1 string argument",
                found: args.len(),
            })
    }

    /// Clear every constraint attribute. Name, type and type arguments stay.
    pub fn reset(&mut self) {
        self.nullable = false;
        self.unique = false;
        self.default = None;
        self.unsigned = false;
        self.reference = None;
        self.on = None;
        self.on_delete = None;
    }

    /// Change the declared type. Previous type arguments are dropped.
    pub fn set_type(&mut self, tag: TypeTag) {
        self.tag = tag;
        self.args.clear();
    }

    /// Replace the type arguments, validated against the current type.
    pub fn declare_args(&mut self, args: Vec<Value>) -> Result<(), SchemaError> {
        self.tag.check_args(&self.qualified_name(), &args)?;
        self.args = args;
        Ok(())
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integer(name: &str) -> Field {
        Field::create("users", name, TypeTag::Integer, vec![]).unwrap()
    }

    #[test]
    fn test_create_string_with_length() {
        let field = Field::create("users", "name", TypeTag::String, vec![50.into()]).unwrap();
        assert_eq!(field.length(), Some(50));
        assert_eq!(field.family(), Family::String);
        assert!(!field.nullable());
    }

    #[test]
    fn test_create_rejects_bad_arity() {
        let err = Field::create("users", "code", TypeTag::Char, vec![]).unwrap_err();
        assert!(matches!(err, SchemaError::TypeArgument { tag: TypeTag::Char, .. }));
    }

    #[test]
    fn test_length_only_on_string_family() {
        let field = Field::create("orders", "total", TypeTag::Decimal, vec![8.into(), 2.into()])
            .unwrap();
        assert_eq!(field.length(), None);
        assert_eq!(field.args(), &[Value::Int(8), Value::Int(2)]);
    }

    #[test]
    fn test_apply_constraints() {
        let mut field = integer("votes");
        field.apply_constraint("nullable", &[]).unwrap();
        field.apply_constraint("unsigned", &[]).unwrap();
        field.apply_constraint("default", &[0.into()]).unwrap();
        assert!(field.nullable());
        assert!(field.unsigned());
        assert_eq!(field.default_value(), Some(&Value::Int(0)));
    }

    #[test]
    fn test_unknown_constraint() {
        let mut field = integer("votes");
        let err = field.apply_constraint("autoincrement", &[]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "column 'users.votes': unknown constraint 'autoincrement'"
        );
    }

    #[test]
    fn test_constraint_arity() {
        let mut field = integer("votes");
        let err = field.apply_constraint("nullable", &[true.into()]).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::ConstraintArity { expected: "no arguments", found: 1, .. }
        ));

        let err = field.apply_constraint("default", &[]).unwrap_err();
        assert!(matches!(err, SchemaError::ConstraintArity { found: 0, .. }));
    }

    #[test]
    fn test_unsupported_constraint() {
        let mut field = Field::create("users", "email", TypeTag::String, vec![]).unwrap();
        let err = field.apply_constraint("unsigned", &[]).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnsupportedConstraint { tag: TypeTag::String, .. }
        ));
        assert!(!field.unsigned());

        let mut field = integer("user_id");
        let err = field.apply_constraint("reference", &["id".into()]).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedConstraint { .. }));
    }

    #[test]
    fn test_foreign_key_stores_on_delete_action() {
        let mut fk = Field::create("posts", "user_id", TypeTag::Foreign, vec![]).unwrap();
        fk.apply_constraint("reference", &["id".into()]).unwrap();
        fk.apply_constraint("on", &["users".into()]).unwrap();
        fk.apply_constraint("on_delete", &["cascade".into()]).unwrap();
        assert_eq!(fk.reference(), Some("id"));
        assert_eq!(fk.on(), Some("users"));
        assert_eq!(fk.on_delete(), Some("cascade"));

        let err = fk.apply_constraint("on_delete", &[true.into()]).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::ConstraintArity { expected: "1 string argument", .. }
        ));
        assert_eq!(fk.on_delete(), Some("cascade"));
    }

    #[test]
    fn test_default_rejects_non_finite_floats() {
        let mut field = Field::create("orders", "ratio", TypeTag::Double, vec![]).unwrap();
        for bad in [Value::Float(f64::NAN), Value::Float(f64::INFINITY), vec![1.5, f64::NEG_INFINITY].into()] {
            let err = field.apply_constraint("default", &[bad]).unwrap_err();
            assert!(matches!(
                err,
                SchemaError::ConstraintArity { expected: "1 finite literal", found: 1, .. }
            ));
        }
        assert_eq!(field.default_value(), None);

        field.apply_constraint("default", &[0.5.into()]).unwrap();
        assert_eq!(field.default_value(), Some(&Value::Float(0.5)));
    }

    #[test]
    fn test_reset_keeps_identity_and_type() {
        let mut field = Field::create("users", "name", TypeTag::String, vec![50.into()]).unwrap();
        field.apply_constraint("nullable", &[]).unwrap();
        field.apply_constraint("unique", &[]).unwrap();
        field.reset();
        assert_eq!(field.name(), "name");
        assert_eq!(field.tag(), TypeTag::String);
        assert_eq!(field.length(), Some(50));
        assert!(!field.nullable());
        assert!(!field.unique());
    }

    #[test]
    fn test_set_type_drops_args() {
        let mut field = Field::create("users", "name", TypeTag::String, vec![50.into()]).unwrap();
        field.set_type(TypeTag::Text);
        assert!(field.args().is_empty());

        field.set_type(TypeTag::String);
        field.declare_args(vec![120.into()]).unwrap();
        assert_eq!(field.length(), Some(120));
    }

    #[test]
    fn test_constraint_call_display() {
        assert_eq!(ConstraintCall::nullable().to_string(), ".nullable()");
        assert_eq!(ConstraintCall::default("n/a").to_string(), ".default('n/a')");
        assert_eq!(ConstraintCall::on_delete("cascade").to_string(), ".on_delete('cascade')");
    }
}
