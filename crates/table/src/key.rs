//! Row keys and their physical encoding

use crate::error::TableError;
use std::fmt;

/// Reserved delimiter between table name and key parts
pub const SEPARATOR: char = ':';

/// Logical row address: table name plus ordered key parts.
///
/// With fewer parts than a full row key it acts as a scan prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
    table: String,
    parts: Vec<String>,
}

impl RowKey {
    /// Build a key, rejecting empty components and the reserved separator
    pub fn new<I, S>(table: impl Into<String>, parts: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = table.into();
        check_component("table name", &table)?;

        let parts: Vec<String> = parts.into_iter().map(Into::into).collect();
        for part in &parts {
            check_component("key part", part)?;
        }

        Ok(Self { table, parts })
    }

    /// Build a key without validation.
    ///
    /// The caller MUST ensure no component is empty or contains the
    /// separator. Use only for compile-time constant keys.
    pub fn new_unchecked(table: &str, parts: &[&str]) -> Self {
        Self {
            table: table.to_string(),
            parts: parts.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Key matching every row of `table`
    pub fn table_prefix(table: impl Into<String>) -> Result<Self, TableError> {
        Self::new(table, Vec::<String>::new())
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Physical world-state key
    pub fn encode(&self) -> String {
        let mut encoded = String::with_capacity(
            self.table.len() + 1 + self.parts.iter().map(|p| p.len() + 1).sum::<usize>(),
        );
        encoded.push_str(&self.table);
        encoded.push(SEPARATOR);
        for part in &self.parts {
            encoded.push_str(part);
            encoded.push(SEPARATOR);
        }
        encoded
    }

    /// Exclusive upper bound of the keys this key prefixes.
    ///
    /// An encoded key always ends with the separator and no component
    /// contains it, so bumping that last byte bounds the whole range.
    pub fn range_end(&self) -> String {
        let mut end = self.encode();
        end.pop();
        end.push(next_char(SEPARATOR));
        end
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

fn check_component(what: &str, value: &str) -> Result<(), TableError> {
    if value.is_empty() {
        return Err(TableError::InvalidKey(format!("{what} must not be empty")));
    }
    if value.contains(SEPARATOR) {
        return Err(TableError::InvalidKey(format!(
            "{what} {value:?} may not contain {SEPARATOR:?}"
        )));
    }
    Ok(())
}

fn next_char(c: char) -> char {
    // ':' + 1 = ';'
    match char::from_u32(c as u32 + 1) {
        Some(next) => next,
        None => char::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        let key = RowKey::new("AccountTable", ["bob"]).unwrap();
        assert_eq!(key.encode(), "AccountTable:bob:");

        let key = RowKey::new("T", ["a", "b"]).unwrap();
        assert_eq!(key.to_string(), "T:a:b:");

        let key = RowKey::table_prefix("AccountTable").unwrap();
        assert_eq!(key.encode(), "AccountTable:");
    }

    #[test]
    fn test_range_end_bounds_prefix() {
        let prefix = RowKey::table_prefix("AccountTable").unwrap();
        let end = prefix.range_end();
        assert_eq!(end, "AccountTable;");

        let row = RowKey::new("AccountTable", ["zzzz"]).unwrap().encode();
        assert!(row.as_str() >= prefix.encode().as_str());
        assert!(row.as_str() < end.as_str());

        // A longer table name sharing the prefix text is outside the range
        let other = RowKey::table_prefix("AccountTableX").unwrap().encode();
        assert!(!(other.as_str() >= prefix.encode().as_str() && other.as_str() < end.as_str()));
    }

    #[test]
    fn test_partial_key_is_not_a_prefix_of_longer_part() {
        let partial = RowKey::new("T", ["a"]).unwrap().encode();
        let longer = RowKey::new("T", ["ab", "c"]).unwrap().encode();
        assert!(!longer.starts_with(&partial));
    }

    #[test]
    fn test_rejects_separator_and_empty() {
        assert!(matches!(
            RowKey::new("T", ["a:b"]),
            Err(TableError::InvalidKey(_))
        ));
        assert!(matches!(
            RowKey::new("T:X", ["a"]),
            Err(TableError::InvalidKey(_))
        ));
        assert!(matches!(RowKey::new("T", [""]), Err(TableError::InvalidKey(_))));
        assert!(matches!(RowKey::table_prefix(""), Err(TableError::InvalidKey(_))));
    }
}
