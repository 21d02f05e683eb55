//! Ledger entities and their row keys
//!
//! Tables:
//! - `ConfigTable` / `["Admin"]` → `Admin`
//! - `AccountTable` / `[name]` → `Account`

use crate::error::{LedgerError, NameError};
use serde::{Deserialize, Serialize};
use simpleapp_table::{RowKey, SEPARATOR};
use std::fmt;

/// Table holding contract-wide configuration rows
pub const CONFIG_TABLE: &str = "ConfigTable";

/// Table holding one row per account
pub const ACCOUNT_TABLE: &str = "AccountTable";

const ADMIN_ROW: &str = "Admin";

/// The unique privileged user, set by the caller of `init`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Admin {
    pub name: String,
}

impl Admin {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A named balance.
///
/// # Invariant
/// `balance >= 0` for every committed row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    pub name: String,
    pub balance: i64,
}

impl Account {
    pub fn new(name: impl Into<String>, balance: i64) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (balance: {})", self.name, self.balance)
    }
}

/// Reject names that would break the flattened key space
pub fn validate_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.contains(SEPARATOR) {
        return Err(NameError::ReservedSeparator(name.to_string()));
    }
    Ok(())
}

/// Row key of the account `name`
pub fn account_key(name: &str) -> Result<RowKey, LedgerError> {
    validate_name(name)?;
    Ok(RowKey::new(ACCOUNT_TABLE, [name])?)
}

/// Row key of the Admin singleton
pub fn admin_key() -> RowKey {
    RowKey::new_unchecked(CONFIG_TABLE, &[ADMIN_ROW])
}

/// Row key prefix covering every account
pub(crate) fn account_table() -> RowKey {
    RowKey::new_unchecked(ACCOUNT_TABLE, &[])
}
