//! The contract registered with the host

use crate::request::{Operation, Request};
use serde::Serialize;
use simpleapp_identity::{resolve_identity, Identity};
use simpleapp_ledger::{self as ledger, Account, Admin, LedgerError, LedgerResult};
use simpleapp_shim::{Chaincode, ChaincodeStub, Response};
use simpleapp_table::TableError;

/// Asset-ledger contract.
///
/// Stateless: every call works only through the stub it is handed, so one
/// value can serve any number of invocations.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleChaincode;

impl SimpleChaincode {
    pub fn new() -> Self {
        Self
    }

    /// Make the caller the admin. Expects no arguments.
    pub fn initialize(&self, stub: &mut dyn ChaincodeStub) -> LedgerResult<()> {
        let (_, args) = stub.get_function_and_parameters();
        if !args.is_empty() {
            return Err(LedgerError::argument(format!(
                "init expects 0 arguments, got {}",
                args.len()
            )));
        }

        let identity = resolve_identity(stub)?;
        ledger::set_admin(stub, &Admin::new(identity.common_name()))
    }

    /// Resolve, parse, authorize and execute one request
    pub fn dispatch(&self, stub: &mut dyn ChaincodeStub) -> LedgerResult<Option<Vec<u8>>> {
        let (function, args) = stub.get_function_and_parameters();

        let identity = resolve_identity(stub)?;
        let operation = Operation::from_name(&function)?;
        let request = Request::parse(operation, &args)?;

        ledger::authorize(stub, &identity, request.requirement(), &request.action())?;
        execute(stub, &identity, request)
    }
}

fn execute(
    stub: &mut dyn ChaincodeStub,
    identity: &Identity,
    request: Request,
) -> LedgerResult<Option<Vec<u8>>> {
    match request {
        Request::CreateAccount {
            name,
            initial_balance,
        } => {
            ledger::create_account(stub, &Account::new(name, initial_balance))?;
            Ok(None)
        }
        Request::DeleteAccount { name } => {
            ledger::delete_account(stub, &name)?;
            Ok(None)
        }
        Request::Transfer { from, to, amount } => {
            ledger::transfer(stub, &from, &to, amount)?;
            Ok(None)
        }
        Request::QueryBalance { name } => {
            let account = ledger::get_account(stub, &name)?;
            let payload = to_payload(&account)?;
            tracing::debug!(caller = %identity, account = %account, "query_balance");
            Ok(Some(payload))
        }
        Request::QueryAccountNames => {
            let names = ledger::account_names(stub)?;
            tracing::debug!(caller = %identity, count = names.len(), "query_account_names");
            Ok(Some(to_payload(&names)?))
        }
    }
}

fn to_payload<T: Serialize>(value: &T) -> LedgerResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|source| {
        LedgerError::Store(TableError::Serialization {
            key: "response payload".to_string(),
            source,
        })
    })
}

fn respond(stub: &dyn ChaincodeStub, result: LedgerResult<Option<Vec<u8>>>) -> Response {
    if let Err(err) = &result {
        tracing::warn!(
            tx_id = %stub.tx_id(),
            kind = %err.kind(),
            error = %err,
            "Invocation rejected"
        );
    }
    Response::from(result)
}

impl Chaincode for SimpleChaincode {
    fn init(&self, stub: &mut dyn ChaincodeStub) -> Response {
        let _span = tracing::info_span!("init", tx_id = %stub.tx_id()).entered();
        let result = self.initialize(stub).map(|()| None);
        respond(stub, result)
    }

    fn invoke(&self, stub: &mut dyn ChaincodeStub) -> Response {
        let (function, _) = stub.get_function_and_parameters();
        let _span = tracing::info_span!("invoke", tx_id = %stub.tx_id(), %function).entered();
        let result = self.dispatch(stub);
        respond(stub, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simpleapp_identity::enroll::creator_for;
    use simpleapp_shim::MemoryStub;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_init_sets_caller_as_admin() {
        let alice = creator_for("Org0MSP", "alice").unwrap();
        let mut stub = MemoryStub::new();

        let response = stub.mock_init(&SimpleChaincode, &alice, vec![]);
        assert!(response.is_success(), "{:?}", response.message());

        let admin = stub.state().get("ConfigTable:Admin:").unwrap();
        assert_eq!(admin, br#"{"Name":"alice"}"#);
    }

    #[test]
    fn test_init_rejects_arguments() {
        let alice = creator_for("Org0MSP", "alice").unwrap();
        let mut stub = MemoryStub::new();

        let response = stub.mock_init(&SimpleChaincode, &alice, args(&["a", "100"]));
        assert_eq!(
            response.message(),
            Some("Invalid arguments: init expects 0 arguments, got 2")
        );
        assert!(stub.state().is_empty());
    }

    #[test]
    fn test_bad_credential_is_an_error_not_a_panic() {
        let mut stub = MemoryStub::new();

        let response = stub.mock_init(&SimpleChaincode, b"\xff\xff", vec![]);
        assert!(response.message().unwrap().starts_with("Invalid credential"));

        let response =
            stub.mock_invoke(&SimpleChaincode, b"\xff\xff", "query_account_names", vec![]);
        assert!(response.message().unwrap().starts_with("Invalid credential"));
        assert!(stub.state().is_empty());
    }

    #[test]
    fn test_unknown_operation() {
        let alice = creator_for("Org0MSP", "alice").unwrap();
        let mut stub = MemoryStub::new();

        let response = stub.mock_invoke(&SimpleChaincode, &alice, "mint", args(&["1000"]));
        let message = response.message().unwrap();
        assert!(message.starts_with("Unknown operation \"mint\""), "{message}");
        assert!(message.contains("query_account_names"));
    }

    #[test]
    fn test_query_account_names_empty_payload() {
        let alice = creator_for("Org0MSP", "alice").unwrap();
        let mut stub = MemoryStub::new();
        stub.mock_init(&SimpleChaincode, &alice, vec![]);

        let response = stub.mock_invoke(&SimpleChaincode, &alice, "query_account_names", vec![]);
        assert_eq!(response.payload(), Some(&b"[]"[..]));
    }
}
