//! Transfer engine - the debit/credit state transition

use crate::accounts::{get_account, overwrite_account};
use crate::error::{LedgerError, LedgerResult};
use crate::model::{validate_name, Account};
use simpleapp_shim::ChaincodeStub;

/// Account states written by a successful transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub from: Account,
    pub to: Account,
}

/// Move `amount` from `from` to `to`.
///
/// Both rows are written back with `FailUnlessOverwrite`. The two writes are
/// only safe because the host commits an invocation's writes together or not
/// at all; no compensation happens here.
pub fn transfer(
    stub: &mut dyn ChaincodeStub,
    from: &str,
    to: &str,
    amount: i64,
) -> LedgerResult<TransferOutcome> {
    validate_name(from)?;
    validate_name(to)?;

    if amount < 0 {
        return Err(LedgerError::InvalidAmount(amount));
    }

    let mut from_account = get_account(stub, from)?;
    if from_account.balance < amount {
        return Err(LedgerError::InsufficientFunds {
            account: from_account.name,
            balance: from_account.balance,
            amount,
        });
    }

    let mut to_account = get_account(stub, to)?;

    if from == to {
        // Reads never observe pending writes, so a second write to the same
        // row would clobber the first. Debit and credit cancel: write once.
        overwrite_account(stub, &from_account)?;
        tracing::info!(account = %from, amount, "Self-transfer; balance unchanged");
        return Ok(TransferOutcome {
            from: from_account.clone(),
            to: from_account,
        });
    }

    let credited = to_account
        .balance
        .checked_add(amount)
        .ok_or_else(|| LedgerError::BalanceOverflow {
            account: to_account.name.clone(),
            balance: to_account.balance,
            amount,
        })?;
    from_account.balance -= amount;
    to_account.balance = credited;

    overwrite_account(stub, &from_account)?;
    overwrite_account(stub, &to_account)?;

    tracing::info!(
        from = %from,
        to = %to,
        amount,
        from_balance = from_account.balance,
        to_balance = to_account.balance,
        "Transfer applied"
    );

    Ok(TransferOutcome {
        from: from_account,
        to: to_account,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::create_account;
    use crate::error::ErrorKind;
    use simpleapp_shim::MemoryStub;
    use std::collections::BTreeMap;

    fn ledger(accounts: &[(&str, i64)]) -> MemoryStub {
        let mut stub = MemoryStub::new();
        stub.execute(b"c", "seed", vec![], |s| {
            for (name, balance) in accounts {
                create_account(s, &Account::new(*name, *balance))?;
            }
            Ok::<_, LedgerError>(())
        })
        .unwrap();
        stub
    }

    fn run(
        stub: &mut MemoryStub,
        from: &str,
        to: &str,
        amount: i64,
    ) -> LedgerResult<TransferOutcome> {
        stub.execute(b"c", "transfer", vec![], |s| transfer(s, from, to, amount))
    }

    fn balance(stub: &mut MemoryStub, name: &str) -> i64 {
        stub.execute(b"c", "query", vec![], |s| get_account(s, name))
            .unwrap()
            .balance
    }

    fn snapshot(stub: &MemoryStub) -> BTreeMap<String, Vec<u8>> {
        stub.state().clone()
    }

    /// Nothing was buffered by the last invocation, committed or not
    fn assert_no_writes(stub: &MemoryStub) {
        let record = stub.last_invocation().unwrap();
        assert!(record.writes.is_empty(), "unexpected writes: {:?}", record.writes);
    }

    fn assert_untouched(stub: &MemoryStub) {
        let record = stub.last_invocation().unwrap();
        assert!(record.is_untouched(), "store accessed: {record:?}");
    }

    #[test]
    fn test_transfer_moves_amount_and_conserves_sum() -> anyhow::Result<()> {
        for amount in [0, 1, 40, 99, 100] {
            let mut stub = ledger(&[("bob", 100), ("carol", 7)]);
            let outcome = run(&mut stub, "bob", "carol", amount)?;

            assert_eq!(outcome.from.balance, 100 - amount);
            assert_eq!(outcome.to.balance, 7 + amount);
            assert_eq!(balance(&mut stub, "bob"), 100 - amount);
            assert_eq!(balance(&mut stub, "carol"), 7 + amount);
            assert_eq!(balance(&mut stub, "bob") + balance(&mut stub, "carol"), 107);
        }
        Ok(())
    }

    #[test]
    fn test_transfer_writes_both_rows_once() {
        let mut stub = ledger(&[("bob", 100), ("carol", 0)]);
        run(&mut stub, "bob", "carol", 40).unwrap();
        let keys: Vec<&str> = stub
            .last_invocation()
            .unwrap()
            .writes
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["AccountTable:bob:", "AccountTable:carol:"]);

        run(&mut stub, "bob", "bob", 10).unwrap();
        assert_eq!(stub.last_invocation().unwrap().writes.len(), 1);
    }

    #[test]
    fn test_self_transfer_leaves_balance_unchanged() {
        for amount in [0, 10, 60] {
            let mut stub = ledger(&[("bob", 60)]);
            let outcome = run(&mut stub, "bob", "bob", amount).unwrap();

            assert_eq!(outcome.from.balance, 60);
            assert_eq!(balance(&mut stub, "bob"), 60);
        }
    }

    #[test]
    fn test_self_transfer_still_checks_funds() {
        let mut stub = ledger(&[("bob", 60)]);
        let err = run(&mut stub, "bob", "bob", 61).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
        assert_no_writes(&stub);
    }

    #[test]
    fn test_negative_amount_writes_nothing() {
        let mut stub = ledger(&[("bob", 100), ("carol", 0)]);
        let before = snapshot(&stub);

        for amount in [-1, -100, i64::MIN] {
            let err = run(&mut stub, "bob", "carol", amount).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidAmount);
            assert_untouched(&stub);
        }
        assert_eq!(snapshot(&stub), before);
    }

    #[test]
    fn test_insufficient_funds_writes_nothing() {
        let mut stub = ledger(&[("bob", 100), ("carol", 0)]);
        let before = snapshot(&stub);

        let err = run(&mut stub, "bob", "carol", 101).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
        assert_no_writes(&stub);
        assert_eq!(snapshot(&stub), before);
    }

    #[test]
    fn test_insufficient_funds_reported_before_missing_destination() {
        let mut stub = ledger(&[("bob", 100)]);
        let err = run(&mut stub, "bob", "carol", 150).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientFunds);

        let err = run(&mut stub, "bob", "carol", 50).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Account \"carol\" does not exist");
        assert_eq!(balance(&mut stub, "bob"), 100);
    }

    #[test]
    fn test_missing_source() {
        let mut stub = ledger(&[("carol", 0)]);
        let err = run(&mut stub, "bob", "carol", 1).unwrap_err();
        assert_eq!(err.to_string(), "Account \"bob\" does not exist");
    }

    #[test]
    fn test_reserved_separator_rejected_before_store() {
        let mut stub = ledger(&[("bob", 100)]);
        for (from, to) in [("bob", "x:y"), ("x:y", "bob")] {
            let err = run(&mut stub, from, to, 1).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NameError);
            assert_untouched(&stub);
        }
        // Name errors win even over a bad amount
        let err = run(&mut stub, "bob", "x:y", -5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NameError);
        assert_untouched(&stub);
    }

    #[test]
    fn test_credit_overflow_rejected() {
        let mut stub = ledger(&[("bob", 10), ("whale", i64::MAX)]);
        let before = snapshot(&stub);

        let err = run(&mut stub, "bob", "whale", 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BalanceOverflow);
        assert_no_writes(&stub);
        assert_eq!(snapshot(&stub), before);
    }
}
