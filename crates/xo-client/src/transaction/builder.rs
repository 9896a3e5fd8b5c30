//! Transaction builder.

use crate::address::StateAddress;
use crate::crypto::{sha512_hex, Signer};
use crate::error::{XoError, XoResult};
use crate::transaction::types::{Transaction, TransactionHeader};
use prost::Message;
use std::time::{SystemTime, UNIX_EPOCH};

/// Family name of XO transactions.
pub const XO_FAMILY_NAME: &str = "xo";
/// Family version of XO transactions.
pub const XO_FAMILY_VERSION: &str = "1.0";
/// Payload encoding of XO transactions.
pub const XO_PAYLOAD_ENCODING: &str = "csv-utf8";

/// A builder for constructing signed transactions.
///
/// Each move touches exactly one game, so the built header reads and
/// writes the single address given, declares no dependencies, and names
/// the signer as its own batcher.
///
/// # Example
///
/// ```rust
/// use xo_client::address::xo_address;
/// use xo_client::crypto::{Secp256k1PrivateKey, Signer};
/// use xo_client::payload::XoPayload;
/// use xo_client::transaction::TransactionBuilder;
///
/// let signer = Secp256k1PrivateKey::generate();
/// let txn = TransactionBuilder::new()
///     .payload(XoPayload::create("game1").to_bytes())
///     .address(xo_address("game1"))
///     .build_and_sign(&signer)
///     .unwrap();
///
/// let header = txn.decode_header().unwrap();
/// assert_eq!(header.inputs, header.outputs);
/// assert_eq!(header.signer_pubkey, signer.public_key_hex());
/// ```
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    payload: Option<Vec<u8>>,
    address: Option<StateAddress>,
    family_name: String,
    family_version: String,
    payload_encoding: String,
    nonce: Option<String>,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionBuilder {
    /// Creates a new builder for the XO family.
    #[must_use]
    pub fn new() -> Self {
        Self {
            payload: None,
            address: None,
            family_name: XO_FAMILY_NAME.to_string(),
            family_version: XO_FAMILY_VERSION.to_string(),
            payload_encoding: XO_PAYLOAD_ENCODING.to_string(),
            nonce: None,
        }
    }

    /// Sets the payload bytes.
    #[must_use]
    pub fn payload(mut self, payload: Vec<u8>) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Sets the state address the transaction reads and writes.
    #[must_use]
    pub fn address(mut self, address: StateAddress) -> Self {
        self.address = Some(address);
        self
    }

    /// Sets the family name and version.
    #[must_use]
    pub fn family(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.family_name = name.into();
        self.family_version = version.into();
        self
    }

    /// Sets the payload encoding tag.
    #[must_use]
    pub fn payload_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.payload_encoding = encoding.into();
        self
    }

    /// Sets an explicit nonce instead of reading the clock.
    #[must_use]
    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Builds the unsigned header for the given signer's public key.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload or address is missing.
    pub fn build_header(&self, signer_pubkey: &str) -> XoResult<TransactionHeader> {
        let payload = self
            .payload
            .as_ref()
            .ok_or_else(|| XoError::Config("payload is required".into()))?;
        let address = self
            .address
            .as_ref()
            .ok_or_else(|| XoError::Config("address is required".into()))?;

        Ok(TransactionHeader {
            batcher_pubkey: signer_pubkey.to_string(),
            dependencies: Vec::new(),
            family_name: self.family_name.clone(),
            family_version: self.family_version.clone(),
            inputs: vec![address.to_string()],
            nonce: self.nonce.clone().unwrap_or_else(clock_nonce),
            outputs: vec![address.to_string()],
            payload_encoding: self.payload_encoding.clone(),
            payload_sha512: sha512_hex(payload),
            signer_pubkey: signer_pubkey.to_string(),
        })
    }

    /// Builds the header, signs its serialized bytes, and assembles the
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or the signer fails.
    pub fn build_and_sign<S: Signer + ?Sized>(self, signer: &S) -> XoResult<Transaction> {
        let header = self.build_header(&signer.public_key_hex())?;
        let header_bytes = header.encode_to_vec();
        let signature = signer.sign(&header_bytes)?;
        let payload = self.payload.unwrap_or_default();

        Ok(Transaction {
            header: header_bytes,
            header_signature: hex::encode(signature),
            payload,
        })
    }
}

/// Builds one signed XO transaction for `payload` at `address`.
///
/// # Errors
///
/// Returns [`XoError::Signing`] if the signer cannot sign the header.
pub fn build_transaction<S: Signer + ?Sized>(
    payload: Vec<u8>,
    address: StateAddress,
    signer: &S,
) -> XoResult<Transaction> {
    TransactionBuilder::new()
        .payload(payload)
        .address(address)
        .build_and_sign(signer)
}

/// Nanoseconds since the Unix epoch, hex encoded.
///
/// Two transactions built within the same clock tick get the same nonce.
fn clock_nonce() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{nanos:x}")
}
