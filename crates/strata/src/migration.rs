//! Versioned groups of instructions.
//!
//! A migration is the instruction stream produced from one migration script.
//! Replaying several migrations requires them in version order; versions are
//! compared as strings, which is chronological for timestamp-prefixed names.

use crate::{Instruction, ReplayError, apply_all};
use strata_schema::SchemaRegistry;
use tracing::info;

/// The instructions of one migration script.
#[derive(Debug, Clone, PartialEq)]
pub struct Migration {
    pub version: String,
    pub instructions: Vec<Instruction>,
}

impl Migration {
    pub fn new(version: impl Into<String>, instructions: Vec<Instruction>) -> Self {
        Self {
            version: version.into(),
            instructions,
        }
    }

    /// A migration whose version is derived from its script's filename.
    pub fn from_filename(filename: &str, instructions: Vec<Instruction>) -> Self {
        Self::new(derive_migration_version(filename), instructions)
    }
}

/// Derive a migration version from a script filename.
///
/// Strips the extension and an optional leading `m_`, then separates the
/// leading all-digit segments (the timestamp) from the descriptive rest with a
/// dash.
///
/// ```
/// use strata::derive_migration_version;
///
/// assert_eq!(
///     derive_migration_version("m_2026_01_18_173711_create_users.py"),
///     "2026_01_18_173711-create_users"
/// );
/// assert_eq!(
///     derive_migration_version("2016_07_01_000000_create_users_table.py"),
///     "2016_07_01_000000-create_users_table"
/// );
/// assert_eq!(derive_migration_version("initial"), "initial");
/// ```
pub fn derive_migration_version(filename: &str) -> String {
    let stem = match filename.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => filename,
    };
    let stem = stem.strip_prefix("m_").unwrap_or(stem);

    let segments: Vec<&str> = stem.split('_').collect();
    let split = segments
        .iter()
        .position(|s| s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(segments.len());

    if split == 0 || split == segments.len() {
        return stem.to_string();
    }

    format!(
        "{}-{}",
        segments[..split].join("_"),
        segments[split..].join("_")
    )
}

/// Replay migrations in order on top of `registry`.
///
/// Fails before applying anything from a migration whose version does not
/// sort strictly after the previous one.
pub fn replay_migrations<'a, I>(
    mut registry: SchemaRegistry,
    migrations: I,
) -> Result<SchemaRegistry, ReplayError>
where
    I: IntoIterator<Item = &'a Migration>,
{
    let mut previous: Option<&str> = None;

    for migration in migrations {
        if let Some(prev) = previous {
            if migration.version.as_str() <= prev {
                return Err(ReplayError::OutOfOrder {
                    previous: prev.to_string(),
                    version: migration.version.clone(),
                });
            }
        }

        registry = apply_all(registry, &migration.instructions).map_err(|source| {
            ReplayError::Migration {
                version: migration.version.clone(),
                source: Box::new(source),
            }
        })?;

        info!(
            version = %migration.version,
            instructions = migration.instructions.len(),
            tables = registry.len(),
            "replayed migration"
        );
        previous = Some(migration.version.as_str());
    }

    Ok(registry)
}
