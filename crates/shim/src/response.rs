//! Invocation results and the contract entry points

use crate::stub::ChaincodeStub;
use std::fmt;

/// Result of one `init` or `invoke` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Invocation succeeded; the payload is optional
    Success { payload: Option<Vec<u8>> },
    /// Invocation failed with a human-readable message
    Error { message: String },
}

impl Response {
    /// Success without payload
    pub fn ok() -> Self {
        Response::Success { payload: None }
    }

    /// Success carrying a payload
    pub fn success(payload: Vec<u8>) -> Self {
        Response::Success {
            payload: Some(payload),
        }
    }

    /// Failure with message
    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error { .. })
    }

    /// Payload of a successful response
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Response::Success { payload } => payload.as_deref(),
            Response::Error { .. } => None,
        }
    }

    /// Message of a failed response
    pub fn message(&self) -> Option<&str> {
        match self {
            Response::Success { .. } => None,
            Response::Error { message } => Some(message),
        }
    }
}

impl<E: fmt::Display> From<Result<Option<Vec<u8>>, E>> for Response {
    fn from(result: Result<Option<Vec<u8>>, E>) -> Self {
        match result {
            Ok(payload) => Response::Success { payload },
            Err(err) => Response::error(err.to_string()),
        }
    }
}

/// Contract logic registered with the host
pub trait Chaincode {
    /// Called once per contract lifecycle (instantiate/upgrade)
    fn init(&self, stub: &mut dyn ChaincodeStub) -> Response;

    /// Called once per transaction
    fn invoke(&self, stub: &mut dyn ChaincodeStub) -> Response;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_accessors() {
        let ok = Response::success(b"[]".to_vec());
        assert!(ok.is_success());
        assert_eq!(ok.payload(), Some(&b"[]"[..]));
        assert_eq!(ok.message(), None);

        let err = Response::error("boom");
        assert!(err.is_error());
        assert_eq!(err.payload(), None);
        assert_eq!(err.message(), Some("boom"));
    }

    #[test]
    fn test_response_from_result() {
        let result: Result<Option<Vec<u8>>, String> = Err("nope".into());
        assert_eq!(Response::from(result), Response::error("nope"));

        let result: Result<Option<Vec<u8>>, String> = Ok(None);
        assert_eq!(Response::from(result), Response::ok());
    }
}
