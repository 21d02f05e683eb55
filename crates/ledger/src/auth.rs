//! Caller authorization
//!
//! Evaluated fresh on every call; nothing is cached across invocations.

use crate::accounts::get_admin;
use crate::error::{LedgerError, LedgerResult};
use simpleapp_identity::Identity;
use simpleapp_shim::ChaincodeStub;

/// What an operation demands of its caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement<'a> {
    /// Anyone may call
    Anyone,
    /// Only the registered admin
    Admin,
    /// The admin, or the holder of the named account
    AdminOrSelf { account: &'a str },
}

/// The caller's common name is exactly `name`
pub fn is(identity: &Identity, name: &str) -> bool {
    identity.common_name() == name
}

/// The caller is the registered admin.
///
/// A missing or unreadable Admin row means nobody is admin.
pub fn is_admin(stub: &dyn ChaincodeStub, identity: &Identity) -> bool {
    match get_admin(stub) {
        Ok(admin) => admin.name == identity.common_name(),
        Err(err) => {
            tracing::debug!(error = %err, "Admin unavailable; treating caller as non-admin");
            false
        }
    }
}

/// Gate `action` on `requirement`
pub fn authorize(
    stub: &dyn ChaincodeStub,
    identity: &Identity,
    requirement: Requirement<'_>,
    action: &str,
) -> LedgerResult<()> {
    let allowed = match requirement {
        Requirement::Anyone => true,
        Requirement::Admin => is_admin(stub, identity),
        Requirement::AdminOrSelf { account } => {
            is(identity, account) || is_admin(stub, identity)
        }
    };

    if allowed {
        return Ok(());
    }

    tracing::warn!(caller = %identity, action, "Caller not authorized");
    Err(LedgerError::NotAuthorized {
        caller: identity.common_name().to_string(),
        action: action.to_string(),
    })
}
