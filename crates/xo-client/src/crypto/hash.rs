//! Hash functions used for addressing and payload integrity.

use sha2::{Digest, Sha512};

/// Computes the SHA-512 hash of the input.
///
/// # Example
///
/// ```rust
/// use xo_client::crypto::sha512;
///
/// let hash = sha512(b"xo");
/// assert_eq!(hash.len(), 64);
/// ```
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 64];
    output.copy_from_slice(&result);
    output
}

/// Computes the SHA-512 hash of the input as 128 lowercase hex characters.
pub fn sha512_hex(data: &[u8]) -> String {
    hex::encode(sha512(data))
}
