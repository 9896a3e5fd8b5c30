//! Batch assembly.
//!
//! A batch wraps one or more signed transactions under a signed header
//! that lists their ids in order. The ledger commits or rejects a batch as
//! a whole. This client always batches its own transactions, so the batch
//! is signed by the same key as its transactions.
//!
//! # Example
//!
//! ```rust
//! use xo_client::address::xo_address;
//! use xo_client::crypto::Secp256k1PrivateKey;
//! use xo_client::payload::XoPayload;
//! use xo_client::transaction::{build_batch_list, build_transaction};
//!
//! let signer = Secp256k1PrivateKey::generate();
//! let txn = build_transaction(
//!     XoPayload::take("game1", 5).to_bytes(),
//!     xo_address("game1"),
//!     &signer,
//! )
//! .unwrap();
//!
//! let batch_list = build_batch_list(vec![txn], &signer).unwrap();
//! assert_eq!(batch_list.batches.len(), 1);
//! ```

use crate::crypto::Signer;
use crate::error::XoResult;
use crate::transaction::types::{Batch, BatchHeader, BatchList, Transaction};
use prost::Message;

/// Wraps `transactions` into one batch signed by `signer`.
///
/// The header's transaction ids follow the order of `transactions`, and
/// the transactions are carried unchanged. No validation of the
/// transactions is done here.
///
/// # Errors
///
/// Returns [`crate::XoError::Signing`] if the signer cannot sign the header.
pub fn build_batch<S: Signer + ?Sized>(
    transactions: Vec<Transaction>,
    signer: &S,
) -> XoResult<Batch> {
    let header = BatchHeader {
        signer_pubkey: signer.public_key_hex(),
        transaction_ids: transactions
            .iter()
            .map(|txn| txn.header_signature.clone())
            .collect(),
    };
    let header_bytes = header.encode_to_vec();
    let signature = signer.sign(&header_bytes)?;

    Ok(Batch {
        header: header_bytes,
        header_signature: hex::encode(signature),
        transactions,
    })
}

/// Wraps `transactions` into a single-batch [`BatchList`] ready for
/// submission.
///
/// # Errors
///
/// Returns [`crate::XoError::Signing`] if the signer cannot sign the header.
pub fn build_batch_list<S: Signer + ?Sized>(
    transactions: Vec<Transaction>,
    signer: &S,
) -> XoResult<BatchList> {
    Ok(BatchList::new(vec![build_batch(transactions, signer)?]))
}
