//! In-memory world state
//!
//! Models the host's commit contract: reads see committed state only, writes
//! are buffered per invocation and applied together when the invocation
//! succeeds, or dropped when it fails.
//!
//! The read/write set of the last invocation stays inspectable after it
//! finishes, committed or not.

use crate::error::StubError;
use crate::response::{Chaincode, Response};
use crate::stub::{ChaincodeStub, KeyValue, StateIter};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ops::Bound;
use uuid::Uuid;

struct Invocation {
    tx_id: String,
    creator: Vec<u8>,
    function: String,
    args: Vec<String>,
    reads: RefCell<Vec<String>>,
    ranges: RefCell<Vec<(String, String)>>,
}

/// Read/write set of one finished invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationRecord {
    pub tx_id: String,
    /// Keys passed to `get_state`, in call order
    pub reads: Vec<String>,
    /// `(start, end)` of every range query
    pub ranges: Vec<(String, String)>,
    /// Buffered writes; `None` is a delete
    pub writes: BTreeMap<String, Option<Vec<u8>>>,
    pub committed: bool,
}

impl InvocationRecord {
    /// True if the invocation never reached the world state
    pub fn is_untouched(&self) -> bool {
        self.reads.is_empty() && self.ranges.is_empty() && self.writes.is_empty()
    }
}

/// Ordered in-memory world state with per-invocation write sets
#[derive(Default)]
pub struct MemoryStub {
    state: BTreeMap<String, Vec<u8>>,
    /// `None` marks a pending delete
    pending: BTreeMap<String, Option<Vec<u8>>>,
    invocation: Option<Invocation>,
    last: Option<InvocationRecord>,
}

impl MemoryStub {
    /// Empty world state
    pub fn new() -> Self {
        Self::default()
    }

    /// World state seeded with committed entries
    pub fn with_state(state: BTreeMap<String, Vec<u8>>) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    /// Committed entries
    pub fn state(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.state
    }

    pub fn into_state(self) -> BTreeMap<String, Vec<u8>> {
        self.state
    }

    /// Read/write set of the most recent invocation
    pub fn last_invocation(&self) -> Option<&InvocationRecord> {
        self.last.as_ref()
    }

    /// Run `Chaincode::init` as one invocation
    pub fn mock_init(
        &mut self,
        chaincode: &dyn Chaincode,
        creator: &[u8],
        args: Vec<String>,
    ) -> Response {
        self.begin(creator, "init", args);
        let response = chaincode.init(self);
        self.finish(response.is_success());
        response
    }

    /// Run `Chaincode::invoke` as one invocation
    pub fn mock_invoke(
        &mut self,
        chaincode: &dyn Chaincode,
        creator: &[u8],
        function: &str,
        args: Vec<String>,
    ) -> Response {
        self.begin(creator, function, args);
        let response = chaincode.invoke(self);
        self.finish(response.is_success());
        response
    }

    /// Run `body` as one invocation, committing its writes only on `Ok`
    pub fn execute<T, E>(
        &mut self,
        creator: &[u8],
        function: &str,
        args: Vec<String>,
        body: impl FnOnce(&mut dyn ChaincodeStub) -> Result<T, E>,
    ) -> Result<T, E> {
        self.begin(creator, function, args);
        let result = body(&mut *self);
        self.finish(result.is_ok());
        result
    }

    fn begin(&mut self, creator: &[u8], function: &str, args: Vec<String>) {
        self.pending.clear();
        self.invocation = Some(Invocation {
            tx_id: Uuid::new_v4().to_string(),
            creator: creator.to_vec(),
            function: function.to_string(),
            args,
            reads: RefCell::default(),
            ranges: RefCell::default(),
        });
    }

    fn finish(&mut self, commit: bool) {
        let Some(invocation) = self.invocation.take() else {
            return;
        };
        let pending = std::mem::take(&mut self.pending);
        let record = InvocationRecord {
            tx_id: invocation.tx_id,
            reads: invocation.reads.into_inner(),
            ranges: invocation.ranges.into_inner(),
            writes: pending.clone(),
            committed: commit,
        };
        let tx_id = record.tx_id.clone();
        self.last = Some(record);

        if !commit {
            tracing::debug!(%tx_id, discarded = pending.len(), "Write set discarded");
            return;
        }

        tracing::debug!(%tx_id, writes = pending.len(), "Write set committed");
        for (key, value) in pending {
            match value {
                Some(value) => {
                    self.state.insert(key, value);
                }
                None => {
                    self.state.remove(&key);
                }
            }
        }
    }

    fn invocation(&self) -> Result<&Invocation, StubError> {
        self.invocation.as_ref().ok_or(StubError::NotInInvocation)
    }

    fn check_key(&self, key: &str) -> Result<(), StubError> {
        self.invocation()?;
        if key.is_empty() {
            return Err(StubError::Backend("key must not be empty".to_string()));
        }
        Ok(())
    }
}

impl ChaincodeStub for MemoryStub {
    fn tx_id(&self) -> &str {
        self.invocation
            .as_ref()
            .map(|inv| inv.tx_id.as_str())
            .unwrap_or_default()
    }

    fn get_creator(&self) -> Result<Vec<u8>, StubError> {
        Ok(self.invocation()?.creator.clone())
    }

    fn get_function_and_parameters(&self) -> (String, Vec<String>) {
        match &self.invocation {
            Some(inv) => (inv.function.clone(), inv.args.clone()),
            None => (String::new(), Vec::new()),
        }
    }

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StubError> {
        self.check_key(key)?;
        if let Some(inv) = &self.invocation {
            inv.reads.borrow_mut().push(key.to_string());
        }
        Ok(self.state.get(key).cloned())
    }

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StubError> {
        self.check_key(key)?;
        self.pending.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn del_state(&mut self, key: &str) -> Result<(), StubError> {
        self.check_key(key)?;
        self.pending.insert(key.to_string(), None);
        Ok(())
    }

    fn get_state_by_range(&self, start: &str, end: &str) -> Result<StateIter<'_>, StubError> {
        self.invocation()?
            .ranges
            .borrow_mut()
            .push((start.to_string(), end.to_string()));
        if start > end {
            return Err(StubError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let iter = self
            .state
            .range::<str, _>((Bound::Included(start), Bound::Excluded(end)))
            .map(|(key, value)| {
                Ok(KeyValue {
                    key: key.clone(),
                    value: value.clone(),
                })
            });
        Ok(Box::new(iter))
    }
}
