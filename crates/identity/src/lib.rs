//! SimpleApp Identity - who is calling
//!
//! The host hands every invocation an opaque creator credential: a protobuf
//! `SerializedIdentity` envelope wrapping a PEM-encoded X.509 certificate.
//! This crate turns it into an `Identity` whose common name drives all
//! authorization decisions.

pub mod envelope;
pub mod error;
pub mod resolver;

#[cfg(feature = "enroll")]
pub mod enroll;

pub use envelope::{serialize_identity, SerializedIdentity};
pub use error::CredentialError;
pub use resolver::{common_name_from_pem, resolve_identity, Identity};
