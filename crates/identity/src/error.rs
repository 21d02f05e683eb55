//! Credential errors

use thiserror::Error;

/// Reasons the caller credential cannot be turned into an identity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Could not obtain creator credential: {0}")]
    Creator(String),

    #[error("Malformed identity envelope: {0}")]
    Envelope(String),

    #[error("Identity bytes are not PEM: {0}")]
    Pem(String),

    #[error("Could not parse certificate: {0}")]
    Certificate(String),

    #[error("Certificate subject has no common name")]
    MissingCommonName,

    #[error("Could not enroll identity: {0}")]
    Enroll(String),
}
