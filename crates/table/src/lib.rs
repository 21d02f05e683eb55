//! SimpleApp Table - keyed rows over the flat world state
//!
//! A row is addressed by a table name plus an ordered list of key parts and
//! holds one JSON-serialized record.
//!
//! # Key encoding
//! `TABLE:PART1:PART2:...:` - every part is terminated by the separator, so a
//! partial key is a byte prefix of every full key extending it and a table
//! scan is a single range query.

pub mod error;
pub mod key;
pub mod policy;
pub mod rows;

pub use error::TableError;
pub use key::{RowKey, SEPARATOR};
pub use policy::{OverwritePolicy, Presence};
pub use rows::{delete, get, insert, scan};
