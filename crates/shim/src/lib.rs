//! SimpleApp Shim - host interface
//!
//! The narrow contract between the ledger logic and the host platform:
//! - `ChaincodeStub`: per-invocation access to the caller credential, the
//!   request and the flat world state
//! - `Chaincode`: the two entry points the host calls (`init`, `invoke`)
//! - `Response`: success payload or error message
//! - `MemoryStub`: in-memory world state with all-or-nothing commit

pub mod error;
pub mod memory;
pub mod response;
pub mod stub;

pub use error::StubError;
pub use memory::{InvocationRecord, MemoryStub};
pub use response::{Chaincode, Response};
pub use stub::{ChaincodeStub, KeyValue, StateIter};
