//! Cryptographic primitives for the XO client.
//!
//! This module holds the [`Signer`] capability the assemblers consume, the
//! secp256k1 implementation the ledger verifies, and the SHA-512 helpers
//! used for state addresses and payload digests.
//!
//! # Example
//!
//! ```rust
//! use xo_client::crypto::{Secp256k1PrivateKey, Signer};
//!
//! let private_key = Secp256k1PrivateKey::generate();
//! let signature = private_key.sign(b"header bytes").unwrap();
//! assert_eq!(signature.len(), 64);
//! assert_eq!(private_key.public_key_hex().len(), 66);
//! ```

mod hash;
mod secp256k1;
mod traits;

pub use hash::{sha512, sha512_hex};

pub use traits::Signer;

pub use secp256k1::{
    Secp256k1PrivateKey, Secp256k1PublicKey, Secp256k1Signature, SECP256K1_PRIVATE_KEY_LENGTH,
    SECP256K1_PUBLIC_KEY_LENGTH, SECP256K1_SIGNATURE_LENGTH,
};
