//! Secp256k1 ECDSA signer.
//!
//! The ledger verifies transaction and batch headers with secp256k1: the
//! message is digested with SHA-256, the signature is the 64-byte compact
//! `r || s` form with a low `s`, and public keys travel as 33-byte
//! compressed SEC1 points.

use crate::crypto::traits::Signer;
use crate::error::{XoError, XoResult};
use k256::ecdsa::{
    signature::Signer as K256Signer, signature::Verifier as K256Verifier,
    Signature as K256Signature, SigningKey, VerifyingKey,
};
use std::fmt;
use std::path::Path;
use zeroize::Zeroize;

/// Secp256k1 private key length in bytes.
pub const SECP256K1_PRIVATE_KEY_LENGTH: usize = 32;
/// Secp256k1 public key length in bytes (compressed).
pub const SECP256K1_PUBLIC_KEY_LENGTH: usize = 33;
/// Secp256k1 compact signature length in bytes.
pub const SECP256K1_SIGNATURE_LENGTH: usize = 64;

/// A Secp256k1 ECDSA private key.
///
/// The wrapped signing key is zeroized when dropped.
#[derive(Clone)]
pub struct Secp256k1PrivateKey {
    inner: SigningKey,
}

impl Secp256k1PrivateKey {
    /// Generates a new random Secp256k1 private key.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::rngs::OsRng);
        Self { inner: signing_key }
    }

    /// Creates a private key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the slice is not 32 bytes or is not a valid scalar.
    pub fn from_bytes(bytes: &[u8]) -> XoResult<Self> {
        if bytes.len() != SECP256K1_PRIVATE_KEY_LENGTH {
            return Err(XoError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                SECP256K1_PRIVATE_KEY_LENGTH,
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|e| XoError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self { inner: signing_key })
    }

    /// Creates a private key from a hex string, with or without `0x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not hex or does not hold a valid key.
    pub fn from_hex(hex_str: &str) -> XoResult<Self> {
        let hex_str = hex_str.trim();
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Loads a private key from a key file holding a single hex-encoded key.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are not a
    /// valid key.
    pub fn from_key_file(path: impl AsRef<Path>) -> XoResult<Self> {
        let path = path.as_ref();
        let mut contents = std::fs::read_to_string(path)?;
        let key = Self::from_hex(&contents);
        contents.zeroize();
        key.map_err(|e| match e {
            XoError::Hex(_) | XoError::InvalidPrivateKey(_) => XoError::InvalidPrivateKey(
                format!("key file {} does not hold a hex secp256k1 key", path.display()),
            ),
            other => other,
        })
    }

    /// Returns the private key as bytes.
    pub fn to_bytes(&self) -> [u8; SECP256K1_PRIVATE_KEY_LENGTH] {
        self.inner.to_bytes().into()
    }

    /// Returns the private key as a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.inner.to_bytes())
    }

    /// Returns the corresponding public key.
    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey {
            inner: *self.inner.verifying_key(),
        }
    }

    /// Signs a message (digested with SHA-256) and returns the signature.
    ///
    /// # Errors
    ///
    /// Returns [`XoError::Signing`] if the underlying ECDSA operation fails.
    pub fn sign_message(&self, message: &[u8]) -> XoResult<Secp256k1Signature> {
        let signature: K256Signature = self.inner.try_sign(message).map_err(XoError::signing)?;
        Ok(Secp256k1Signature { inner: signature })
    }
}

impl Signer for Secp256k1PrivateKey {
    fn sign(&self, message: &[u8]) -> XoResult<Vec<u8>> {
        Ok(self.sign_message(message)?.to_bytes().to_vec())
    }

    fn public_key(&self) -> Vec<u8> {
        Secp256k1PrivateKey::public_key(self).to_bytes()
    }
}

impl fmt::Debug for Secp256k1PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secp256k1PrivateKey([REDACTED])")
    }
}

/// A Secp256k1 ECDSA public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Secp256k1PublicKey {
    inner: VerifyingKey,
}

impl Secp256k1PublicKey {
    /// Creates a public key from SEC1 bytes (compressed or uncompressed).
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> XoResult<Self> {
        let verifying_key = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| XoError::InvalidPublicKey(e.to_string()))?;
        Ok(Self {
            inner: verifying_key,
        })
    }

    /// Creates a public key from a hex string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not hex or not a valid point.
    pub fn from_hex(hex_str: &str) -> XoResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Returns the public key as compressed bytes (33 bytes).
    pub fn to_bytes(&self) -> Vec<u8> {
        self.inner.to_sec1_bytes().to_vec()
    }

    /// Returns the public key as a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Verifies a signature against a message.
    ///
    /// # Errors
    ///
    /// Returns [`XoError::SignatureVerificationFailed`] on mismatch.
    pub fn verify(&self, message: &[u8], signature: &Secp256k1Signature) -> XoResult<()> {
        self.inner
            .verify(message, &signature.inner)
            .map_err(|_| XoError::SignatureVerificationFailed)
    }

    /// Verifies a hex-encoded signature, as carried in a header signature
    /// field, against a message.
    ///
    /// # Errors
    ///
    /// Returns an error if the hex is malformed or verification fails.
    pub fn verify_hex(&self, message: &[u8], signature_hex: &str) -> XoResult<()> {
        let signature = Secp256k1Signature::from_hex(signature_hex)?;
        self.verify(message, &signature)
    }
}

impl fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secp256k1PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for Secp256k1PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// A Secp256k1 ECDSA signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Secp256k1Signature {
    inner: K256Signature,
}

impl Secp256k1Signature {
    /// Creates a signature from raw bytes (64 bytes, r || s).
    ///
    /// # Errors
    ///
    /// Returns an error if the slice has the wrong length or is not a valid
    /// signature.
    pub fn from_bytes(bytes: &[u8]) -> XoResult<Self> {
        if bytes.len() != SECP256K1_SIGNATURE_LENGTH {
            return Err(XoError::Signing(format!(
                "expected {} signature bytes, got {}",
                SECP256K1_SIGNATURE_LENGTH,
                bytes.len()
            )));
        }
        let signature = K256Signature::from_slice(bytes).map_err(XoError::signing)?;
        Ok(Self { inner: signature })
    }

    /// Creates a signature from a hex string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not hex or not a valid signature.
    pub fn from_hex(hex_str: &str) -> XoResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Returns the signature as bytes (64 bytes, r || s).
    pub fn to_bytes(&self) -> [u8; SECP256K1_SIGNATURE_LENGTH] {
        self.inner.to_bytes().into()
    }

    /// Returns the signature as a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

impl fmt::Debug for Secp256k1Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secp256k1Signature({})", self.to_hex())
    }
}
