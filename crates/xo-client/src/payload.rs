//! Move payload encoding.
//!
//! An XO move travels as `name,action,arg` in UTF-8 (the `csv-utf8`
//! payload encoding). Game names must not contain a comma; this is not
//! checked, and a name with a comma decodes into the wrong fields.

use crate::error::{XoError, XoResult};
use std::fmt;

/// Field separator of the `csv-utf8` encoding.
pub const DELIMITER: char = ',';

/// Action creating a new game.
pub const ACTION_CREATE: &str = "create";

/// Action marking a space on the board.
pub const ACTION_TAKE: &str = "take";

/// Encodes a move as `name,action,arg`.
///
/// `arg` is stringified, so numeric spaces and empty arguments are both
/// accepted.
///
/// # Example
///
/// ```rust
/// use xo_client::payload::encode;
///
/// assert_eq!(encode("game1", "take", 5), b"game1,take,5".to_vec());
/// assert_eq!(encode("game1", "create", ""), b"game1,create,".to_vec());
/// ```
pub fn encode(name: &str, action: &str, arg: impl fmt::Display) -> Vec<u8> {
    format!("{name}{DELIMITER}{action}{DELIMITER}{arg}").into_bytes()
}

/// Decodes a move into `(name, action, arg)`, splitting on the first two
/// delimiters. Anything after the second delimiter belongs to `arg`.
///
/// # Errors
///
/// Returns [`XoError::Payload`] if the bytes are not UTF-8 or hold fewer
/// than three fields.
pub fn decode(bytes: &[u8]) -> XoResult<(String, String, String)> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| XoError::Payload(format!("payload is not UTF-8: {e}")))?;
    let mut fields = text.splitn(3, DELIMITER);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(name), Some(action), Some(arg)) => {
            Ok((name.to_string(), action.to_string(), arg.to_string()))
        }
        _ => Err(XoError::Payload(format!(
            "expected name{DELIMITER}action{DELIMITER}arg, got {text:?}"
        ))),
    }
}

/// A single XO move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XoPayload {
    /// Name of the game the move applies to.
    pub name: String,
    /// The action, e.g. [`ACTION_CREATE`] or [`ACTION_TAKE`].
    pub action: String,
    /// Auxiliary argument; the board space for `take`, empty otherwise.
    pub arg: String,
}

impl XoPayload {
    /// Creates a payload from its three fields.
    pub fn new(name: impl Into<String>, action: impl Into<String>, arg: impl fmt::Display) -> Self {
        Self {
            name: name.into(),
            action: action.into(),
            arg: arg.to_string(),
        }
    }

    /// A move creating the game `name`.
    pub fn create(name: impl Into<String>) -> Self {
        Self::new(name, ACTION_CREATE, "")
    }

    /// A move taking board space `space` (1-9) in game `name`.
    pub fn take(name: impl Into<String>, space: u8) -> Self {
        Self::new(name, ACTION_TAKE, space)
    }

    /// Encodes the payload to its wire bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(&self.name, &self.action, &self.arg)
    }

    /// Decodes a payload from wire bytes.
    ///
    /// # Errors
    ///
    /// See [`decode`].
    pub fn from_bytes(bytes: &[u8]) -> XoResult<Self> {
        let (name, action, arg) = decode(bytes)?;
        Ok(Self { name, action, arg })
    }
}

impl fmt::Display for XoPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}{DELIMITER}{}",
            self.name, self.action, self.arg
        )
    }
}
