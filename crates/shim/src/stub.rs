//! Per-invocation view of the host

use crate::error::StubError;

/// One world-state entry returned by a range query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// Lazy iterator over a key range, in ascending key order
pub type StateIter<'a> = Box<dyn Iterator<Item = Result<KeyValue, StubError>> + 'a>;

/// What the host offers to one invocation.
///
/// Writes issued through `put_state`/`del_state` become visible only after
/// the host commits the whole invocation; reads always see committed state.
pub trait ChaincodeStub {
    /// Host-assigned transaction id of the current invocation
    fn tx_id(&self) -> &str;

    /// Serialized identity envelope of the caller
    fn get_creator(&self) -> Result<Vec<u8>, StubError>;

    /// Requested function name and its string arguments
    fn get_function_and_parameters(&self) -> (String, Vec<String>);

    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StubError>;

    fn put_state(&mut self, key: &str, value: Vec<u8>) -> Result<(), StubError>;

    fn del_state(&mut self, key: &str) -> Result<(), StubError>;

    /// Entries with `start <= key < end`
    fn get_state_by_range(&self, start: &str, end: &str) -> Result<StateIter<'_>, StubError>;
}
