//! Naming and quoting helpers.
//!
//! Everything here is a pure function of its inputs: synthetic index names,
//! quoted builder literals and content fingerprints. The schema model and the
//! serializer both lean on these so that the same table/columns/kind triple
//! always maps to the same key and the same rendered text.

use std::fmt;


/// Which quote character string literals are rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// `'text'`
    #[default]
    Single,
    /// `"text"`
    Double,
}

impl QuoteStyle {
    /// The quote character itself.
    pub fn as_char(self) -> char {
        match self {
            QuoteStyle::Single => '\'',
            QuoteStyle::Double => '"',
        }
    }
}

/// A builder string literal wrapper.
///
/// Display writes the value quoted on a single line: backslashes and the
/// active quote character get a backslash, `\n`, `\r` and `\t` use their
/// short escapes, and other ASCII control characters become `\xNN`.
///
/// # Example
/// ```
/// use strata_names::{Lit, QuoteStyle};
/// assert_eq!(format!("{}", Lit("foo", QuoteStyle::Single)), "'foo'");
/// assert_eq!(format!("{}", Lit("it's", QuoteStyle::Single)), "'it\\'s'");
/// assert_eq!(format!("{}", Lit("it's", QuoteStyle::Double)), "\"it's\"");
/// ```
pub struct Lit<T: AsRef<str>>(pub T, pub QuoteStyle);

impl<T: AsRef<str>> fmt::Display for Lit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = self.1.as_char();
        write!(f, "{}", quote)?;
        for c in self.0.as_ref().chars() {
            match c {
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                c if c == quote || c == '\\' => write!(f, "\\{}", c)?,
                c if c.is_ascii_control() => write!(f, "\\x{:02x}", c as u32)?,
                c => write!(f, "{}", c)?,
            }
        }
        write!(f, "{}", quote)
    }
}

/// Quote a string literal with the given style.
pub fn quote_str(s: &str, style: QuoteStyle) -> String {
    format!("{}", Lit(s, style))
}

/// Generate the synthetic name of an index.
///
/// Uses the convention `{table}_{columns}_{kind}` where columns are joined by
/// underscore, in the order given.
///
/// # Examples
///
/// ```
/// assert_eq!(strata_names::index_name("users", &["email"], "unique"), "users_email_unique");
/// assert_eq!(
///     strata_names::index_name("posts", &["user_id", "created_at"], "index"),
///     "posts_user_id_created_at_index"
/// );
/// ```
pub fn index_name(table: &str, columns: &[impl AsRef<str>], kind: &str) -> String {
    let cols: Vec<&str> = columns.iter().map(|c| c.as_ref()).collect();
    if cols.is_empty() {
        return format!("{}_{}", table, kind);
    }
    format!("{}_{}_{}", table, cols.join("_"), kind)
}

/// Stable content fingerprint of a rendered snapshot.
///
/// Line endings are normalized and trailing whitespace is ignored, so a dump
/// that went through a CRLF checkout still fingerprints the same.
pub fn fingerprint(rendered: &str) -> String {
    let normalized = normalize_for_hash(rendered);
    blake3::hash(normalized.as_bytes()).to_hex().to_string()
}

fn normalize_for_hash(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out.truncate(out.trim_end().len());
    out
}
