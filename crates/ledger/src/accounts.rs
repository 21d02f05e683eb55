//! Raw row operations on Admin and Account records.
//!
//! Nothing here checks permissions.

use crate::error::{LedgerError, LedgerResult};
use crate::model::{account_key, account_table, admin_key, Account, Admin};
use simpleapp_shim::ChaincodeStub;
use simpleapp_table::{self as table, OverwritePolicy, Presence};

/// Seed (or replace) the Admin singleton
pub fn set_admin(stub: &mut dyn ChaincodeStub, admin: &Admin) -> LedgerResult<()> {
    let previous = table::insert(
        stub,
        &admin_key(),
        admin,
        OverwritePolicy::DontFailUponOverwrite,
    )?;

    match previous {
        Some(old) if old != *admin => {
            tracing::warn!(new = %admin.name, old = %old.name, "Replacing existing Admin");
        }
        _ => tracing::info!(admin = %admin.name, "Admin set"),
    }
    Ok(())
}

pub fn get_admin(stub: &dyn ChaincodeStub) -> LedgerResult<Admin> {
    table::get(stub, &admin_key(), Presence::FailIfMissing)
        .map_err(|e| LedgerError::from_table(e, "Config", "Admin"))?
        .ok_or_else(|| LedgerError::NotFound {
            entity: "Config",
            name: "Admin".to_string(),
        })
}

/// Create `account`; fails if the name is taken
pub fn create_account(stub: &mut dyn ChaincodeStub, account: &Account) -> LedgerResult<()> {
    let key = account_key(&account.name)?;
    table::insert(stub, &key, account, OverwritePolicy::FailBeforeOverwrite)
        .map_err(|e| LedgerError::from_table(e, "Account", &account.name))?;

    tracing::info!(account = %account.name, balance = account.balance, "Account created");
    Ok(())
}

/// Replace an existing account row; fails if it does not exist
pub fn overwrite_account(stub: &mut dyn ChaincodeStub, account: &Account) -> LedgerResult<()> {
    let key = account_key(&account.name)?;
    table::insert(stub, &key, account, OverwritePolicy::FailUnlessOverwrite)
        .map_err(|e| LedgerError::from_table(e, "Account", &account.name))?;
    Ok(())
}

/// Delete the account `name`, returning its last state
pub fn delete_account(stub: &mut dyn ChaincodeStub, name: &str) -> LedgerResult<Account> {
    let key = account_key(name)?;
    let removed: Option<Account> = table::delete(stub, &key, Presence::FailIfMissing)
        .map_err(|e| LedgerError::from_table(e, "Account", name))?;
    let removed = removed.ok_or_else(|| not_found(name))?;

    tracing::info!(account = %name, balance = removed.balance, "Account deleted");
    Ok(removed)
}

pub fn get_account(stub: &dyn ChaincodeStub, name: &str) -> LedgerResult<Account> {
    let key = account_key(name)?;
    table::get(stub, &key, Presence::FailIfMissing)
        .map_err(|e| LedgerError::from_table(e, "Account", name))?
        .ok_or_else(|| not_found(name))
}

/// Names of all accounts, in world-state enumeration order
pub fn account_names(stub: &dyn ChaincodeStub) -> LedgerResult<Vec<String>> {
    let mut names = Vec::new();
    for row in table::scan::<Account>(stub, &account_table())? {
        names.push(row?.name);
    }
    Ok(names)
}

fn not_found(name: &str) -> LedgerError {
    LedgerError::NotFound {
        entity: "Account",
        name: name.to_string(),
    }
}
