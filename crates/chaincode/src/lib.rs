//! SimpleApp Chaincode - request dispatcher
//!
//! Maps `(function, args)` from the host onto the ledger operations, and
//! provides the local harness behind the `simpleapp` binary.

pub mod chaincode;
pub mod commands;
pub mod config;
pub mod request;
pub mod world_state;

pub use chaincode::SimpleChaincode;
pub use commands::Harness;
pub use config::{AppConfig, ConfigError};
pub use request::{Operation, Request};
pub use world_state::{StateFileError, WorldStateFile};
