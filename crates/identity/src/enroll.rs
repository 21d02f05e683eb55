//! Self-signed local identities
//!
//! Stands in for the certificate authority when running the contract
//! outside a real network.

use crate::envelope::serialize_identity;
use crate::error::CredentialError;
use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};

/// Certificate and private key of a freshly enrolled identity
#[derive(Debug, Clone)]
pub struct EnrolledIdentity {
    pub common_name: String,
    pub cert_pem: String,
    pub key_pem: String,
}

/// Self-sign a certificate whose subject CN is `common_name`
pub fn enroll(common_name: &str) -> Result<EnrolledIdentity, CredentialError> {
    let mut params = CertificateParams::new(Vec::<String>::new())
        .map_err(|e| CredentialError::Enroll(e.to_string()))?;
    params.distinguished_name = DistinguishedName::new();
    params
        .distinguished_name
        .push(DnType::CommonName, common_name.to_string());

    let key_pair = KeyPair::generate().map_err(|e| CredentialError::Enroll(e.to_string()))?;
    let cert = params
        .self_signed(&key_pair)
        .map_err(|e| CredentialError::Enroll(e.to_string()))?;

    Ok(EnrolledIdentity {
        common_name: common_name.to_string(),
        cert_pem: cert.pem(),
        key_pem: key_pair.serialize_pem(),
    })
}

/// Creator bytes for a new identity `common_name` in `msp_id`
pub fn creator_for(msp_id: &str, common_name: &str) -> Result<Vec<u8>, CredentialError> {
    let enrolled = enroll(common_name)?;
    Ok(serialize_identity(msp_id, enrolled.cert_pem.as_bytes()))
}
