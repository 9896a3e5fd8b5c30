//! Transaction and batch assembly.
//!
//! This module provides the wire types the ledger accepts and the
//! builders that sign them.
//!
//! # Overview
//!
//! - [`TransactionBuilder`] / [`build_transaction`] - one signed move
//! - [`build_batch`] / [`build_batch_list`] - signed batches of moves
//! - [`types`] - protobuf messages with the ledger's field numbers
//!
//! # Example
//!
//! ```rust
//! use xo_client::address::xo_address;
//! use xo_client::crypto::Secp256k1PrivateKey;
//! use xo_client::payload::XoPayload;
//! use xo_client::transaction::{build_batch_list, TransactionBuilder};
//!
//! let signer = Secp256k1PrivateKey::generate();
//! let create = TransactionBuilder::new()
//!     .payload(XoPayload::create("game1").to_bytes())
//!     .address(xo_address("game1"))
//!     .build_and_sign(&signer)
//!     .unwrap();
//!
//! let batch_list = build_batch_list(vec![create], &signer).unwrap();
//! let wire_bytes = batch_list.to_bytes();
//! assert!(!wire_bytes.is_empty());
//! ```

pub mod batch;
pub mod builder;
pub mod types;

pub use batch::{build_batch, build_batch_list};
pub use builder::{
    build_transaction, TransactionBuilder, XO_FAMILY_NAME, XO_FAMILY_VERSION, XO_PAYLOAD_ENCODING,
};
pub use types::{Batch, BatchHeader, BatchList, Transaction, TransactionHeader};
