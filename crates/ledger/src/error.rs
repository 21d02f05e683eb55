//! Ledger errors

use simpleapp_identity::CredentialError;
use simpleapp_table::TableError;
use strum_macros::Display;
use thiserror::Error;

/// Account name validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("Invalid account name \"{0}\"; may not contain the char ':'")]
    ReservedSeparator(String),

    #[error("Invalid account name; must not be empty")]
    Empty,
}

/// Errors that can occur in ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Invalid credential: {0}")]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Name(#[from] NameError),

    #[error("Invalid arguments: {0}")]
    Argument(String),

    #[error("Caller \"{caller}\" is not authorized to {action}")]
    NotAuthorized { caller: String, action: String },

    #[error("{entity} \"{name}\" already exists")]
    AlreadyExists { entity: &'static str, name: String },

    #[error("{entity} \"{name}\" does not exist")]
    NotFound { entity: &'static str, name: String },

    #[error("Insufficient funds: account \"{account}\" balance ({balance}) is less than transfer amount ({amount})")]
    InsufficientFunds {
        account: String,
        balance: i64,
        amount: i64,
    },

    #[error("Can't transfer a negative amount ({0})")]
    InvalidAmount(i64),

    #[error("Crediting {amount} to account \"{account}\" would overflow its balance ({balance})")]
    BalanceOverflow {
        account: String,
        balance: i64,
        amount: i64,
    },

    #[error("Unknown operation \"{received}\"; must be one of {}", .expected.join(", "))]
    UnknownOperation {
        received: String,
        expected: Vec<String>,
    },

    #[error("Store error: {0}")]
    Store(TableError),
}

/// Result type alias with LedgerError
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Coarse classification of a `LedgerError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    CredentialError,
    NameError,
    ArgumentError,
    NotAuthorized,
    AlreadyExists,
    NotFound,
    InsufficientFunds,
    InvalidAmount,
    BalanceOverflow,
    UnknownOperation,
    StoreError,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Credential(_) => ErrorKind::CredentialError,
            LedgerError::Name(_) => ErrorKind::NameError,
            LedgerError::Argument(_) => ErrorKind::ArgumentError,
            LedgerError::NotAuthorized { .. } => ErrorKind::NotAuthorized,
            LedgerError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            LedgerError::NotFound { .. } => ErrorKind::NotFound,
            LedgerError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            LedgerError::InvalidAmount(_) => ErrorKind::InvalidAmount,
            LedgerError::BalanceOverflow { .. } => ErrorKind::BalanceOverflow,
            LedgerError::UnknownOperation { .. } => ErrorKind::UnknownOperation,
            LedgerError::Store(_) => ErrorKind::StoreError,
        }
    }

    /// Attach entity context to a row-store failure.
    ///
    /// Presence violations become `AlreadyExists`/`NotFound` naming the
    /// entity; everything else is an opaque `Store` error.
    pub fn from_table(err: TableError, entity: &'static str, name: &str) -> Self {
        match err {
            TableError::AlreadyExists { .. } => LedgerError::AlreadyExists {
                entity,
                name: name.to_string(),
            },
            TableError::NotFound { .. } => LedgerError::NotFound {
                entity,
                name: name.to_string(),
            },
            other => LedgerError::Store(other),
        }
    }

    pub fn is_not_authorized(&self) -> bool {
        matches!(self, LedgerError::NotAuthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound { .. })
    }

    pub fn argument(message: impl Into<String>) -> Self {
        LedgerError::Argument(message.into())
    }
}

impl From<TableError> for LedgerError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::AlreadyExists { key } => LedgerError::AlreadyExists {
                entity: "Row",
                name: key,
            },
            TableError::NotFound { key } => LedgerError::NotFound {
                entity: "Row",
                name: key,
            },
            other => LedgerError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simpleapp_shim::StubError;

    #[test]
    fn test_error_display() {
        let err = LedgerError::InsufficientFunds {
            account: "bob".to_string(),
            balance: 100,
            amount: 150,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: account \"bob\" balance (100) is less than transfer amount (150)"
        );

        let err = LedgerError::UnknownOperation {
            received: "steal".to_string(),
            expected: vec!["transfer".to_string(), "query_balance".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown operation \"steal\"; must be one of transfer, query_balance"
        );

        let err: LedgerError = NameError::ReservedSeparator("a:b".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Invalid account name \"a:b\"; may not contain the char ':'"
        );
    }

    #[test]
    fn test_from_table_names_entity() {
        let err = LedgerError::from_table(
            TableError::NotFound {
                key: "AccountTable:bob:".to_string(),
            },
            "Account",
            "bob",
        );
        assert_eq!(err.to_string(), "Account \"bob\" does not exist");
        assert!(err.is_not_found());

        let err = LedgerError::from_table(
            TableError::Store(StubError::Backend("disk".to_string())),
            "Account",
            "bob",
        );
        assert_eq!(err.kind(), ErrorKind::StoreError);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::InsufficientFunds.to_string(), "InsufficientFunds");
        assert_eq!(
            LedgerError::InvalidAmount(-1).kind(),
            ErrorKind::InvalidAmount
        );
    }
}
