//! Canonical rendering of a [`SchemaRegistry`] as builder statements.
//!
//! The output is a pure function of the registry's content: tables sorted by
//! name, columns sorted by name, indexes last and sorted by synthetic name.
//! Two registries that compare equal always render the same text.

use strata_config::{Config, Quote};
use strata_names::{QuoteStyle, quote_str};
use strata_schema::{Family, Field, IndexSpec, SchemaRegistry, TableSchema};

/// Knobs for [`dump_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Variable every statement is called on.
    pub receiver: String,
    /// Object whose `table(...)` opens each block.
    pub schema: String,
    /// Spaces of indentation inside a block.
    pub indent: usize,
    pub quote: QuoteStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            receiver: "table".to_string(),
            schema: "schema".to_string(),
            indent: 4,
            quote: QuoteStyle::Single,
        }
    }
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        let defaults = Self::default();
        let render = &config.render;
        Self {
            receiver: render.receiver.clone().unwrap_or(defaults.receiver),
            schema: render.schema.clone().unwrap_or(defaults.schema),
            indent: render.indent.map_or(defaults.indent, |n| n as usize),
            quote: match render.quote {
                Some(Quote::Double) => QuoteStyle::Double,
                Some(Quote::Single) | None => defaults.quote,
            },
        }
    }
}

/// Render with default options.
pub fn dump(registry: &SchemaRegistry) -> String {
    dump_with(registry, &RenderOptions::default())
}

/// Render every table as a `with ... as table:` block.
pub fn dump_with(registry: &SchemaRegistry, opts: &RenderOptions) -> String {
    let blocks: Vec<String> = registry
        .tables()
        .map(|table| table_block(table, opts))
        .collect();
    blocks.join("\n")
}

/// Content hash of the canonical dump.
pub fn fingerprint(registry: &SchemaRegistry) -> String {
    strata_names::fingerprint(&dump(registry))
}

fn table_block(table: &TableSchema, opts: &RenderOptions) -> String {
    let pad = " ".repeat(opts.indent);
    let mut out = format!(
        "with {}.table({}) as {}:\n",
        opts.schema,
        quote_str(table.name(), opts.quote),
        opts.receiver
    );

    let mut fields: Vec<&Field> = table.fields().collect();
    fields.sort_by(|a, b| a.name().cmp(b.name()));
    let mut indexes: Vec<&IndexSpec> = table.indexes().collect();
    indexes.sort_by(|a, b| a.name.cmp(&b.name));

    if fields.is_empty() && indexes.is_empty() {
        out.push_str(&pad);
        out.push_str("pass\n");
        return out;
    }

    for field in fields {
        out.push_str(&pad);
        out.push_str(&column_statement(field, opts));
        out.push('\n');
    }
    for index in indexes {
        out.push_str(&pad);
        out.push_str(&index_statement(index, opts));
        out.push('\n');
    }
    out
}

/// One column as a builder call chain, e.g. `table.string('name', 50).nullable()`.
pub(crate) fn column_statement(field: &Field, opts: &RenderOptions) -> String {
    let mut args = Vec::new();
    if field.family() != Family::Timestamp {
        args.push(quote_str(field.name(), opts.quote));
    }
    args.extend(field.args().iter().map(|a| a.render(opts.quote)));

    let mut out = format!("{}.{}({})", opts.receiver, field.tag(), args.join(", "));

    if field.nullable() {
        out.push_str(".nullable()");
    }
    if field.unique() {
        out.push_str(".unique()");
    }
    if field.unsigned() {
        out.push_str(".unsigned()");
    }
    if let Some(value) = field.default_value() {
        out.push_str(&format!(".default({})", value.render(opts.quote)));
    }
    for (name, value) in [
        ("reference", field.reference()),
        ("on", field.on()),
        ("on_delete", field.on_delete()),
    ] {
        if let Some(value) = value {
            out.push_str(&format!(".{}({})", name, quote_str(value, opts.quote)));
        }
    }
    out
}

fn index_statement(index: &IndexSpec, opts: &RenderOptions) -> String {
    let columns = match index.columns.as_slice() {
        [single] => quote_str(single, opts.quote),
        many => {
            let quoted: Vec<_> = many.iter().map(|c| quote_str(c, opts.quote)).collect();
            format!("[{}]", quoted.join(", "))
        }
    };
    format!("{}.{}({})", opts.receiver, index.kind, columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnDef, Instruction, apply_all};
    use strata_schema::{ConstraintCall, IndexKind, TypeTag, Value};

    fn replay(instructions: &[Instruction]) -> SchemaRegistry {
        apply_all(SchemaRegistry::new(), instructions).unwrap()
    }

    fn users() -> SchemaRegistry {
        replay(&[
            ColumnDef::new("users", "id", TypeTag::Increments).add(),
            ColumnDef::new("users", "name", TypeTag::String)
                .arg(50)
                .with(ConstraintCall::nullable())
                .add(),
            ColumnDef::new("users", "created_at", TypeTag::Timestamps).add(),
        ])
    }

    #[test]
    fn test_users_table() {
        insta::assert_snapshot!(dump(&users()), @r"
        with schema.table('users') as table:
            table.timestamps()
            table.increments('id')
            table.string('name', 50).nullable()
        ");
    }

    #[test]
    fn test_empty_registry_renders_nothing() {
        assert_eq!(dump(&SchemaRegistry::new()), "");
    }

    #[test]
    fn test_empty_table_renders_pass() {
        let registry = replay(&[
            ColumnDef::new("tags", "slug", TypeTag::String).add(),
            Instruction::drop_columns("tags", &["slug"]),
        ]);
        insta::assert_snapshot!(dump(&registry), @r"
        with schema.table('tags') as table:
            pass
        ");
    }

    #[test]
    fn test_constraint_suffix_order() {
        let registry = replay(&[
            ColumnDef::new("posts", "votes", TypeTag::Integer)
                .with(ConstraintCall::default(0))
                .with(ConstraintCall::unsigned())
                .with(ConstraintCall::unique())
                .with(ConstraintCall::nullable())
                .add(),
            ColumnDef::new("posts", "user_id", TypeTag::Foreign)
                .with(ConstraintCall::on_delete("cascade"))
                .with(ConstraintCall::on("users"))
                .with(ConstraintCall::reference("id"))
                .add(),
            ColumnDef::new("posts", "status", TypeTag::Enum)
                .arg(vec!["draft", "published"])
                .with(ConstraintCall::default("draft"))
                .add(),
            ColumnDef::new("posts", "score", TypeTag::Decimal)
                .arg(8)
                .arg(2)
                .add(),
        ]);
        insta::assert_snapshot!(dump(&registry), @r"
        with schema.table('posts') as table:
            table.decimal('score', 8, 2)
            table.enum('status', ['draft', 'published']).default('draft')
            table.foreign('user_id').reference('id').on('users').on_delete('cascade')
            table.integer('votes').nullable().unique().unsigned().default(0)
        ");
    }

    #[test]
    fn test_indexes_render_last() {
        let registry = replay(&[
            ColumnDef::new("users", "email", TypeTag::String).add(),
            ColumnDef::new("users", "tenant_id", TypeTag::Integer).add(),
            Instruction::add_index("users", IndexKind::Unique, &["email", "tenant_id"]),
            Instruction::add_index("users", IndexKind::Index, &["email"]),
        ]);
        insta::assert_snapshot!(dump(&registry), @r"
        with schema.table('users') as table:
            table.string('email')
            table.integer('tenant_id')
            table.index('email')
            table.unique(['email', 'tenant_id'])
        ");
    }

    #[test]
    fn test_tables_sorted_and_separated() {
        let registry = replay(&[
            ColumnDef::new("users", "id", TypeTag::Increments).add(),
            ColumnDef::new("accounts", "id", TypeTag::BigIncrements).add(),
        ]);
        insta::assert_snapshot!(dump(&registry), @r"
        with schema.table('accounts') as table:
            table.big_increments('id')

        with schema.table('users') as table:
            table.increments('id')
        ");
    }

    #[test]
    fn test_render_options() {
        let registry = replay(&[ColumnDef::new("users", "bio", TypeTag::Text)
            .with(ConstraintCall::default(Value::from("it's me")))
            .add()]);
        let opts = RenderOptions {
            receiver: "t".to_string(),
            schema: "builder".to_string(),
            indent: 2,
            quote: QuoteStyle::Double,
        };
        insta::assert_snapshot!(dump_with(&registry, &opts), @r#"
        with builder.table("users") as t:
          t.text("bio").default("it's me")
        "#);
    }

    #[test]
    fn test_multiline_default_stays_on_one_line() {
        let with_bio = |bio: &str| {
            replay(&[ColumnDef::new("users", "bio", TypeTag::Text)
                .with(ConstraintCall::default(bio))
                .add()])
        };
        let padded = with_bio("line  \nnext");
        insta::assert_snapshot!(dump(&padded), @r"
        with schema.table('users') as table:
            table.text('bio').default('line  \nnext')
        ");

        assert_ne!(fingerprint(&padded), fingerprint(&with_bio("line\nnext")));
        assert_ne!(fingerprint(&with_bio("line\r\nnext")), fingerprint(&with_bio("line\nnext")));
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        assert_eq!(RenderOptions::from(&config), RenderOptions::default());

        config.render.receiver = Some("t".to_string());
        config.render.indent = Some(2);
        config.render.quote = Some(Quote::Double);
        let opts = RenderOptions::from(&config);
        assert_eq!(opts.receiver, "t");
        assert_eq!(opts.schema, "schema");
        assert_eq!(opts.indent, 2);
        assert_eq!(opts.quote, QuoteStyle::Double);
    }

    #[test]
    fn test_fingerprint_ignores_insertion_order() {
        let a = replay(&[
            ColumnDef::new("users", "id", TypeTag::Increments).add(),
            ColumnDef::new("users", "email", TypeTag::String).add(),
        ]);
        let b = replay(&[
            ColumnDef::new("users", "email", TypeTag::String).add(),
            ColumnDef::new("users", "id", TypeTag::Increments).add(),
        ]);
        assert_eq!(fingerprint(&a), fingerprint(&b));
        assert_ne!(fingerprint(&a), fingerprint(&users()));
    }
}
