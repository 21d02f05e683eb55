//! Wire form of the creator credential

use prost::Message;

/// Identity envelope as serialized by the host's membership service
#[derive(Clone, PartialEq, Message)]
pub struct SerializedIdentity {
    /// Membership service provider the identity belongs to
    #[prost(string, tag = "1")]
    pub mspid: String,

    /// PEM-encoded certificate
    #[prost(bytes = "vec", tag = "2")]
    pub id_bytes: Vec<u8>,
}

/// Build creator bytes for `msp_id` from a PEM certificate
pub fn serialize_identity(msp_id: &str, cert_pem: &[u8]) -> Vec<u8> {
    SerializedIdentity {
        mspid: msp_id.to_string(),
        id_bytes: cert_pem.to_vec(),
    }
    .encode_to_vec()
}
