//! Wire types for transactions and batches.
//!
//! These are protobuf messages whose field numbers are fixed by the
//! ledger. The ledger recomputes signatures and digests over the exact
//! header bytes, so headers are serialized once and carried as bytes.

use crate::error::XoResult;
use prost::Message;

/// Header of a transaction. Serialized and signed by the transactor.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct TransactionHeader {
    /// Public key of the batcher (hex).
    #[prost(string, tag = "1")]
    pub batcher_pubkey: String,
    /// Ids of transactions that must be committed before this one.
    #[prost(string, repeated, tag = "2")]
    pub dependencies: Vec<String>,
    /// Transaction family name.
    #[prost(string, tag = "3")]
    pub family_name: String,
    /// Transaction family version.
    #[prost(string, tag = "4")]
    pub family_version: String,
    /// State addresses the transaction reads.
    #[prost(string, repeated, tag = "5")]
    pub inputs: Vec<String>,
    /// Value making otherwise identical headers distinct.
    #[prost(string, tag = "6")]
    pub nonce: String,
    /// State addresses the transaction writes.
    #[prost(string, repeated, tag = "7")]
    pub outputs: Vec<String>,
    /// Encoding of the payload bytes.
    #[prost(string, tag = "8")]
    pub payload_encoding: String,
    /// SHA-512 of the payload bytes (hex).
    #[prost(string, tag = "9")]
    pub payload_sha512: String,
    /// Public key of the transactor (hex).
    #[prost(string, tag = "10")]
    pub signer_pubkey: String,
}

/// A signed transaction.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct Transaction {
    /// Serialized [`TransactionHeader`].
    #[prost(bytes = "vec", tag = "1")]
    pub header: Vec<u8>,
    /// Signature over `header` (hex). Also the transaction id.
    #[prost(string, tag = "2")]
    pub header_signature: String,
    /// Family-specific payload.
    #[prost(bytes = "vec", tag = "3")]
    pub payload: Vec<u8>,
}

impl Transaction {
    /// Returns the transaction id.
    pub fn id(&self) -> &str {
        &self.header_signature
    }

    /// Decodes the serialized header.
    ///
    /// # Errors
    ///
    /// Returns [`crate::XoError::Decode`] if the header bytes are malformed.
    pub fn decode_header(&self) -> XoResult<TransactionHeader> {
        Ok(TransactionHeader::decode(self.header.as_slice())?)
    }
}

/// Header of a batch. Serialized and signed by the batcher.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct BatchHeader {
    /// Public key of the batcher (hex).
    #[prost(string, tag = "1")]
    pub signer_pubkey: String,
    /// Ids of the batch's transactions, in batch order.
    #[prost(string, repeated, tag = "2")]
    pub transaction_ids: Vec<String>,
}

/// A signed batch of transactions that commits or fails as a unit.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct Batch {
    /// Serialized [`BatchHeader`].
    #[prost(bytes = "vec", tag = "1")]
    pub header: Vec<u8>,
    /// Signature over `header` (hex). Also the batch id.
    #[prost(string, tag = "2")]
    pub header_signature: String,
    /// Transactions, in the order listed by the header.
    #[prost(message, repeated, tag = "3")]
    pub transactions: Vec<Transaction>,
}

impl Batch {
    /// Returns the batch id.
    pub fn id(&self) -> &str {
        &self.header_signature
    }

    /// Decodes the serialized header.
    ///
    /// # Errors
    ///
    /// Returns [`crate::XoError::Decode`] if the header bytes are malformed.
    pub fn decode_header(&self) -> XoResult<BatchHeader> {
        Ok(BatchHeader::decode(self.header.as_slice())?)
    }
}

/// The unit submitted to the gateway.
#[derive(Clone, PartialEq, Eq, Message)]
pub struct BatchList {
    /// Batches, submitted in order.
    #[prost(message, repeated, tag = "1")]
    pub batches: Vec<Batch>,
}

impl BatchList {
    /// Wraps batches into a list.
    pub fn new(batches: Vec<Batch>) -> Self {
        Self { batches }
    }

    /// Returns the ids of all batches, in order.
    pub fn batch_ids(&self) -> Vec<&str> {
        self.batches.iter().map(Batch::id).collect()
    }

    /// Serializes the list to its protobuf wire form.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }

    /// Decodes a list from its protobuf wire form.
    ///
    /// # Errors
    ///
    /// Returns [`crate::XoError::Decode`] if the bytes are malformed.
    pub fn from_bytes(bytes: &[u8]) -> XoResult<Self> {
        Ok(Self::decode(bytes)?)
    }
}
