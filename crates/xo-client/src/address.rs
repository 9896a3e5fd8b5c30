//! State address derivation.
//!
//! Every entry in ledger state lives at a hex address. An application owns
//! the slice of state whose addresses start with its namespace prefix: the
//! first six hex characters of the SHA-512 digest of the namespace name.
//! The rest of an address is the full SHA-512 digest of the entity name, so
//! each XO game maps to exactly one address.

use crate::crypto::sha512_hex;
use crate::error::{XoError, XoResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The namespace of the XO transaction family.
pub const XO_NAMESPACE: &str = "xo";

/// Length of the namespace prefix in hex characters.
pub const NAMESPACE_PREFIX_LENGTH: usize = 6;

/// Length of a full state address in hex characters.
pub const ADDRESS_LENGTH: usize = NAMESPACE_PREFIX_LENGTH + 128;

/// Returns the six-hex-character prefix owned by `namespace`.
///
/// # Example
///
/// ```rust
/// use xo_client::address::namespace_prefix;
///
/// assert_eq!(namespace_prefix("xo"), "5b7349");
/// ```
pub fn namespace_prefix(namespace: &str) -> String {
    let mut digest = sha512_hex(namespace.as_bytes());
    digest.truncate(NAMESPACE_PREFIX_LENGTH);
    digest
}

/// Derives the state address of `name` inside `namespace`.
pub fn address(namespace: &str, name: &str) -> StateAddress {
    let mut address = namespace_prefix(namespace);
    address.push_str(&sha512_hex(name.as_bytes()));
    StateAddress(address)
}

/// Returns the prefix of the XO namespace.
pub fn xo_prefix() -> String {
    namespace_prefix(XO_NAMESPACE)
}

/// Derives the state address of the XO game `name`.
pub fn xo_address(name: &str) -> StateAddress {
    address(XO_NAMESPACE, name)
}

/// A ledger state address: 134 lowercase hex characters.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateAddress(String);

impl StateAddress {
    /// Parses an address, checking its length and alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`XoError::Protocol`] if the string is not 134 lowercase hex
    /// characters.
    pub fn from_hex(hex_str: &str) -> XoResult<Self> {
        if hex_str.len() != ADDRESS_LENGTH {
            return Err(XoError::protocol(format!(
                "state address must be {} hex characters, got {}",
                ADDRESS_LENGTH,
                hex_str.len()
            )));
        }
        if !hex_str
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
        {
            return Err(XoError::protocol(format!(
                "state address is not lowercase hex: {hex_str}"
            )));
        }
        Ok(Self(hex_str.to_string()))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the namespace prefix part of the address.
    pub fn prefix(&self) -> &str {
        &self.0[..NAMESPACE_PREFIX_LENGTH]
    }

    /// Returns true if the address belongs to `namespace`.
    pub fn is_in_namespace(&self, namespace: &str) -> bool {
        self.prefix() == namespace_prefix(namespace)
    }
}

impl fmt::Debug for StateAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateAddress({})", self.0)
    }
}

impl fmt::Display for StateAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StateAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for StateAddress {
    type Err = XoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for StateAddress {
    type Error = XoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<StateAddress> for String {
    fn from(address: StateAddress) -> Self {
        address.0
    }
}
