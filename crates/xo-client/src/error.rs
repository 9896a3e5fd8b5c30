//! Error types for the XO client.
//!
//! This module provides a unified error type [`XoError`] that encompasses
//! all failures surfaced by the client. Ledger-side rejections and poll
//! timeouts are not errors; see [`crate::client::SubmitOutcome`].

use std::fmt;
use thiserror::Error;

/// A specialized Result type for XO client operations.
pub type XoResult<T> = Result<T, XoError>;

/// The main error type for the XO client.
#[derive(Error, Debug)]
pub enum XoError {
    /// Error occurred during HTTP communication
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-2xx status
    #[error("API error ({status_code}): {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Reason phrase or body returned by the gateway
        message: String,
    },

    /// The gateway answered with a document the client cannot interpret
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Error occurred while parsing a YAML/JSON gateway document
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Error occurred while decoding a protobuf message
    #[error("Decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Error occurred while decoding base64 state data
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Error occurred during hex encoding/decoding
    #[error("Hex error: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The signer could not produce a signature
    #[error("Signing error: {0}")]
    Signing(String),

    /// Invalid private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Invalid public key
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Signature verification failed
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// A move payload could not be decoded
    #[error("Payload error: {0}")]
    Payload(String),

    /// Error occurred during URL parsing
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error occurred while reading key material
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl XoError {
    /// Creates a new API error from response details
    pub fn api(status_code: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status_code,
            message: message.into(),
        }
    }

    /// Creates a new protocol error
    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        Self::Protocol(msg.into())
    }

    /// Creates a new signing error
    pub fn signing<E: fmt::Display>(err: E) -> Self {
        Self::Signing(err.to_string())
    }

    /// Returns true if the gateway reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Api {
                status_code: 404,
                ..
            }
        )
    }

    /// Returns true if the error happened on the wire rather than in the
    /// content of a response
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. })
    }

    /// Returns true if the error came from the signer or its key material
    pub fn is_signing(&self) -> bool {
        matches!(
            self,
            Self::Signing(_)
                | Self::InvalidPrivateKey(_)
                | Self::InvalidPublicKey(_)
                | Self::SignatureVerificationFailed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = XoError::Payload("missing action".to_string());
        assert_eq!(err.to_string(), "Payload error: missing action");
    }

    #[test]
    fn test_api_error() {
        let err = XoError::api(503, "Service Unavailable");
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("Service Unavailable"));
        assert!(err.is_transport());
    }

    #[test]
    fn test_is_not_found() {
        assert!(XoError::api(404, "Not Found").is_not_found());
        assert!(!XoError::api(500, "Internal Server Error").is_not_found());
        assert!(!XoError::protocol("no data").is_not_found());
    }

    #[test]
    fn test_is_signing() {
        assert!(XoError::signing("hsm offline").is_signing());
        assert!(XoError::SignatureVerificationFailed.is_signing());
        assert!(!XoError::protocol("bad status").is_signing());
    }

    #[test]
    fn test_protocol_error() {
        let err = XoError::protocol("batch id missing from status document");
        assert!(matches!(err, XoError::Protocol(_)));
        assert!(!err.is_transport());
        assert!(err.to_string().contains("batch id missing"));
    }
}
