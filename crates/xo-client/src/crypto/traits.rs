//! Signing capability consumed by the transaction and batch assemblers.
//!
//! The assemblers never see key material: they hand header bytes to a
//! [`Signer`] and record the hex-encoded result. Any signature scheme the
//! ledger accepts can be plugged in behind this trait.

use crate::error::XoResult;

/// A key holder that signs byte buffers.
pub trait Signer: Send + Sync {
    /// Signs the given message and returns the raw signature bytes.
    ///
    /// # Errors
    ///
    /// Returns [`crate::XoError::Signing`] if the key holder cannot sign.
    fn sign(&self, message: &[u8]) -> XoResult<Vec<u8>>;

    /// Returns the encoded public key matching the signing key.
    fn public_key(&self) -> Vec<u8>;

    /// Returns the public key as lowercase hex without a `0x` prefix, the
    /// form the ledger expects in transaction and batch headers.
    fn public_key_hex(&self) -> String {
        hex::encode(self.public_key())
    }
}

impl<S: Signer + ?Sized> Signer for &S {
    fn sign(&self, message: &[u8]) -> XoResult<Vec<u8>> {
        (**self).sign(message)
    }

    fn public_key(&self) -> Vec<u8> {
        (**self).public_key()
    }
}

impl<S: Signer + ?Sized> Signer for std::sync::Arc<S> {
    fn sign(&self, message: &[u8]) -> XoResult<Vec<u8>> {
        (**self).sign(message)
    }

    fn public_key(&self) -> Vec<u8> {
        (**self).public_key()
    }
}
