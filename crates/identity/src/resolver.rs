//! Creator credential → Identity

use crate::envelope::SerializedIdentity;
use crate::error::CredentialError;
use prost::Message;
use simpleapp_shim::ChaincodeStub;
use std::fmt;
use x509_parser::pem::parse_x509_pem;

/// Resolved caller of the current invocation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    msp_id: String,
    common_name: String,
}

impl Identity {
    pub fn new(msp_id: impl Into<String>, common_name: impl Into<String>) -> Self {
        Self {
            msp_id: msp_id.into(),
            common_name: common_name.into(),
        }
    }

    /// Subject common name of the caller certificate
    pub fn common_name(&self) -> &str {
        &self.common_name
    }

    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.common_name, self.msp_id)
    }
}

/// Resolve the caller of the current invocation.
///
/// Pure function of the creator bytes, so repeated calls within one
/// invocation yield the same identity.
pub fn resolve_identity(stub: &dyn ChaincodeStub) -> Result<Identity, CredentialError> {
    let creator = stub
        .get_creator()
        .map_err(|e| CredentialError::Creator(e.to_string()))?;

    let envelope = SerializedIdentity::decode(creator.as_slice())
        .map_err(|e| CredentialError::Envelope(e.to_string()))?;

    let common_name = common_name_from_pem(&envelope.id_bytes)?;
    tracing::debug!(msp_id = %envelope.mspid, %common_name, "Resolved caller identity");

    Ok(Identity::new(envelope.mspid, common_name))
}

/// Subject common name of the first certificate in a PEM blob
pub fn common_name_from_pem(pem_bytes: &[u8]) -> Result<String, CredentialError> {
    let (_, pem) = parse_x509_pem(pem_bytes).map_err(|e| CredentialError::Pem(e.to_string()))?;
    let cert = pem
        .parse_x509()
        .map_err(|e| CredentialError::Certificate(e.to_string()))?;

    let attribute = cert
        .subject()
        .iter_common_name()
        .next()
        .ok_or(CredentialError::MissingCommonName)?;
    let common_name = attribute
        .as_str()
        .map_err(|e| CredentialError::Certificate(e.to_string()))?;

    Ok(common_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::serialize_identity;
    use rcgen::{CertificateParams, DistinguishedName, DnType, KeyPair};
    use simpleapp_shim::{Chaincode, MemoryStub, Response};

    fn cert_pem(common_name: Option<&str>) -> String {
        let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
        params.distinguished_name = DistinguishedName::new();
        if let Some(cn) = common_name {
            params.distinguished_name.push(DnType::CommonName, cn.to_string());
        } else {
            params
                .distinguished_name
                .push(DnType::OrganizationName, "org0".to_string());
        }
        let key = KeyPair::generate().unwrap();
        params.self_signed(&key).unwrap().pem()
    }

    /// Resolves the caller twice and reports the common name as payload
    struct WhoAmI;

    impl Chaincode for WhoAmI {
        fn init(&self, _stub: &mut dyn ChaincodeStub) -> Response {
            Response::ok()
        }

        fn invoke(&self, stub: &mut dyn ChaincodeStub) -> Response {
            let first = resolve_identity(stub);
            let second = resolve_identity(stub);
            match (first, second) {
                (Ok(a), Ok(b)) if a == b => Response::success(a.common_name().as_bytes().to_vec()),
                (Ok(_), Ok(_)) => Response::error("identity changed within invocation"),
                (Err(e), _) | (_, Err(e)) => Response::error(e.to_string()),
            }
        }
    }

    #[test]
    fn test_common_name_from_pem() {
        let pem = cert_pem(Some("alice"));
        assert_eq!(common_name_from_pem(pem.as_bytes()).unwrap(), "alice");
    }

    #[test]
    fn test_missing_common_name() {
        let pem = cert_pem(None);
        assert_eq!(
            common_name_from_pem(pem.as_bytes()),
            Err(CredentialError::MissingCommonName)
        );
    }

    #[test]
    fn test_not_pem() {
        let result = common_name_from_pem(b"definitely not a certificate");
        assert!(matches!(result, Err(CredentialError::Pem(_))));
    }

    #[test]
    fn test_pem_with_garbage_body() {
        let pem = "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n";
        let result = common_name_from_pem(pem.as_bytes());
        assert!(matches!(result, Err(CredentialError::Certificate(_))));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let creator = serialize_identity("Org0MSP", cert_pem(Some("bob")).as_bytes());
        let mut stub = MemoryStub::new();

        let response = stub.mock_invoke(&WhoAmI, &creator, "whoami", vec![]);
        assert_eq!(response.payload(), Some(&b"bob"[..]));
    }

    #[test]
    fn test_malformed_envelope() {
        let mut stub = MemoryStub::new();
        let response = stub.mock_invoke(&WhoAmI, &[0xff, 0xff, 0xff], "whoami", vec![]);

        let message = response.message().unwrap();
        assert!(message.starts_with("Malformed identity envelope"), "{message}");
    }

    #[test]
    fn test_identity_display() {
        let identity = Identity::new("Org0MSP", "carol");
        assert_eq!(identity.to_string(), "carol@Org0MSP");
    }
}
