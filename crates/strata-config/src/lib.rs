//! Facet types for the strata configuration schema.
//!
//! The file lives at `.config/strata.styx`. Every key is optional:
//!
//! ```text
//! render {
//!   receiver t
//!   indent 2
//!   quote @double
//!   schema builder
//! }
//! ```

use facet::Facet;

/// Configuration loaded from `strata.styx`.
#[derive(Debug, Clone, Default, Facet)]
pub struct Config {
    /// How snapshots are rendered.
    #[facet(default)]
    pub render: RenderConfig,
}

/// Snapshot rendering configuration.
#[derive(Debug, Clone, Default, Facet)]
pub struct RenderConfig {
    /// Name of the builder variable each statement is called on (default `table`).
    #[facet(default)]
    pub receiver: Option<String>,

    /// Spaces of indentation inside a table block (default 4).
    #[facet(default)]
    pub indent: Option<u32>,

    /// Quote character for string literals (default single).
    #[facet(default)]
    pub quote: Option<Quote>,

    /// Name of the schema object opening each table block, as in
    /// `with schema.table('users') as table:` (default `schema`).
    #[facet(default)]
    pub schema: Option<String>,
}

/// Quote character for string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Facet)]
#[facet(rename_all = "lowercase")]
#[repr(u8)]
pub enum Quote {
    Single,
    Double,
}
