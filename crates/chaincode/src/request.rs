//! Operation names and argument parsing

use simpleapp_ledger::{validate_name, LedgerError, LedgerResult, Requirement};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// Operations recognized by `invoke`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    CreateAccount,
    DeleteAccount,
    Transfer,
    QueryBalance,
    QueryAccountNames,
}

impl Operation {
    /// Resolve a function name sent by the host
    pub fn from_name(name: &str) -> LedgerResult<Self> {
        name.parse().map_err(|_| LedgerError::UnknownOperation {
            received: name.to_string(),
            expected: Self::iter().map(|op| op.to_string()).collect(),
        })
    }

    /// Positional argument names
    pub fn params(&self) -> &'static [&'static str] {
        match self {
            Operation::CreateAccount => &["account_name", "initial_balance"],
            Operation::DeleteAccount => &["account_name"],
            Operation::Transfer => &["from_account_name", "to_account_name", "amount"],
            Operation::QueryBalance => &["account_name"],
            Operation::QueryAccountNames => &[],
        }
    }
}

/// A parsed, validated request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    CreateAccount { name: String, initial_balance: i64 },
    DeleteAccount { name: String },
    Transfer { from: String, to: String, amount: i64 },
    QueryBalance { name: String },
    QueryAccountNames,
}

impl Request {
    /// Parse `args` for `operation`.
    ///
    /// Checks arity, numeric syntax and account names; touches no state.
    pub fn parse(operation: Operation, args: &[String]) -> LedgerResult<Self> {
        let params = operation.params();
        if args.len() != params.len() {
            return Err(LedgerError::argument(format!(
                "{operation} expects {} argument(s) [{}], got {}",
                params.len(),
                params.join(", "),
                args.len()
            )));
        }

        let request = match operation {
            Operation::CreateAccount => {
                let initial_balance = parse_integer("initial_balance", &args[1])?;
                if initial_balance < 0 {
                    return Err(LedgerError::argument(format!(
                        "Invalid initial_balance {initial_balance}; expecting nonnegative integer"
                    )));
                }
                Request::CreateAccount {
                    name: account_name(&args[0])?,
                    initial_balance,
                }
            }
            Operation::DeleteAccount => Request::DeleteAccount {
                name: account_name(&args[0])?,
            },
            Operation::Transfer => Request::Transfer {
                from: account_name(&args[0])?,
                to: account_name(&args[1])?,
                amount: parse_integer("amount", &args[2])?,
            },
            Operation::QueryBalance => Request::QueryBalance {
                name: account_name(&args[0])?,
            },
            Operation::QueryAccountNames => Request::QueryAccountNames,
        };
        Ok(request)
    }

    pub fn operation(&self) -> Operation {
        match self {
            Request::CreateAccount { .. } => Operation::CreateAccount,
            Request::DeleteAccount { .. } => Operation::DeleteAccount,
            Request::Transfer { .. } => Operation::Transfer,
            Request::QueryBalance { .. } => Operation::QueryBalance,
            Request::QueryAccountNames => Operation::QueryAccountNames,
        }
    }

    /// Who may issue this request
    pub fn requirement(&self) -> Requirement<'_> {
        match self {
            Request::CreateAccount { .. }
            | Request::DeleteAccount { .. }
            | Request::QueryAccountNames => Requirement::Admin,
            Request::QueryBalance { name } => Requirement::AdminOrSelf { account: name },
            Request::Transfer { from, .. } => Requirement::AdminOrSelf { account: from },
        }
    }

    /// Human-readable action, used in authorization failures
    pub fn action(&self) -> String {
        match self {
            Request::CreateAccount { name, .. } => format!("create account \"{name}\""),
            Request::DeleteAccount { name } => format!("delete account \"{name}\""),
            Request::Transfer { from, .. } => format!("transfer from account \"{from}\""),
            Request::QueryBalance { name } => format!("query account \"{name}\""),
            Request::QueryAccountNames => "query account names".to_string(),
        }
    }
}

fn account_name(arg: &str) -> LedgerResult<String> {
    validate_name(arg)?;
    Ok(arg.to_string())
}

fn parse_integer(what: &str, arg: &str) -> LedgerResult<i64> {
    arg.parse().map_err(|_| {
        LedgerError::argument(format!(
            "Malformed {what} \"{arg}\"; expecting a decimal integer"
        ))
    })
}
