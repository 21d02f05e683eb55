//! SimpleApp Ledger - the asset-ledger transaction logic
//!
//! All account state changes go through this crate.
//!
//! # Key Types
//! - `Admin`: the privileged user, a singleton row under a reserved key
//! - `Account`: named balance, keyed by its name
//! - `Requirement`: what an operation demands of the caller
//! - `LedgerError`: every way an operation can fail
//!
//! The functions in `accounts` and `transfer` do no permission checking;
//! callers gate them with `auth::authorize` first.

pub mod accounts;
pub mod auth;
pub mod error;
pub mod model;
pub mod transfer;

pub use accounts::{
    account_names, create_account, delete_account, get_account, get_admin, overwrite_account,
    set_admin,
};
pub use auth::{authorize, is, is_admin, Requirement};
pub use error::{ErrorKind, LedgerError, LedgerResult, NameError};
pub use model::{
    account_key, admin_key, validate_name, Account, Admin, ACCOUNT_TABLE, CONFIG_TABLE,
};
pub use transfer::{transfer, TransferOutcome};
