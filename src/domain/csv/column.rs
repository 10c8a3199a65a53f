// ============================================================
// COLUMN IDENTIFIERS
// ============================================================
// Columns are addressed by header name or by position

use std::fmt;

/// A column key inside a csv record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    /// Header name, matched exactly
    Name(String),

    /// Zero-based field position
    Index(usize),
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::Name(name.to_string())
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Column::Name(name)
    }
}

impl From<&String> for Column {
    fn from(name: &String) -> Self {
        Column::Name(name.clone())
    }
}

impl From<usize> for Column {
    fn from(index: usize) -> Self {
        Column::Index(index)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Column::Name(name) => write!(f, "'{}'", name),
            Column::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// Canonical key of a column name: lowercased with spaces removed,
/// so `First Name` becomes `firstname` while `first_name` stays as is.
pub fn normalize_name(raw: &str) -> String {
    raw.to_lowercase().replace(' ', "")
}

/// Canonical key of a setter name. The conventional `set` prefix is removed
/// in any case (`setX`, `SetX`, `set_x`, `SET_X`) when a word boundary follows
/// it: an uppercase letter or an underscore. An all-lowercase name shows no
/// boundary, so `setx` and `settings` keep their prefix, as does a bare `set`.
/// The remainder is lowercased and loses whitespace and underscores, so
/// `setFirstName`, `set_first_name` and `firstName` all become `firstname`.
pub fn normalize_setter_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let rest = trimmed
        .get(..3)
        .filter(|prefix| prefix.eq_ignore_ascii_case("set"))
        .map(|_| &trimmed[3..]);

    let stripped = match rest {
        Some(rest) if rest.starts_with('_') && rest.len() > 1 => &rest[1..],
        Some(rest) if rest.starts_with(|c: char| c.is_uppercase()) => rest,
        _ => trimmed,
    };

    stripped
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}
