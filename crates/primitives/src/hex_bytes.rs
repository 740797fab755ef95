use std::{fmt, ops::Deref};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Wire-form violations for [`HexBytes`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidHexEncoding {
    #[error("hex input missing")]
    Empty,
    #[error("invalid `0x` prefix")]
    MissingPrefix,
    #[error("missing closing quote")]
    MissingSuffix,
    #[error("invalid hex payload: {0}")]
    Payload(#[from] hex::FromHexError),
}

/// Variable-length byte array carried on the wire as a quoted,
/// `0x`-prefixed lowercase hex string.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HexBytes(Vec<u8>);

impl HexBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Parses the unquoted string form, e.g. `0x1234`.
    ///
    /// An empty input and a missing `0x` prefix are rejected; `0x` alone
    /// decodes to the empty array. A malformed hex payload is propagated as
    /// [`InvalidHexEncoding::Payload`] rather than collapsed to an empty
    /// array.
    pub fn from_hex(input: &str) -> Result<Self, InvalidHexEncoding> {
        if input.is_empty() {
            return Err(InvalidHexEncoding::Empty);
        }
        let payload = input.strip_prefix("0x").ok_or(InvalidHexEncoding::MissingPrefix)?;
        Ok(Self(hex::decode(payload)?))
    }

    /// Parses the raw quoted wire token, quotes included, e.g. `"0x1234"`.
    pub fn from_wire(input: &[u8]) -> Result<Self, InvalidHexEncoding> {
        if input.is_empty() {
            return Err(InvalidHexEncoding::Empty);
        }
        if !input.starts_with(b"\"0x") {
            return Err(InvalidHexEncoding::MissingPrefix);
        }
        if input.len() < 4 || !input.ends_with(b"\"") {
            return Err(InvalidHexEncoding::MissingSuffix);
        }
        Ok(Self(hex::decode(&input[3..input.len() - 1])?))
    }
}

impl Deref for HexBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for HexBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for HexBytes {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl fmt::Display for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl fmt::Debug for HexBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl Serialize for HexBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(&self.0)))
    }
}

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}
