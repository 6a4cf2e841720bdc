use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Number of bytes in a UHRP content digest.
pub const CONTENT_HASH_LEN: usize = 32;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContentHashError {
    #[error("Content hash must be exactly 32 bytes, got {0}")]
    BadLength(usize),
    #[error("Content hash is not valid hex")]
    InvalidHex(#[from] hex::FromHexError),
}

/// SHA-256 digest of the advertised content.
///
/// This is the value a UHRP resolver looks files up by, so the exact-length
/// invariant is enforced at every conversion boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash([u8; CONTENT_HASH_LEN]);

impl ContentHash {
    /// Digest arbitrary content bytes.
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);

        ContentHash(hasher.finalize().into())
    }

    /// Exact-length conversion from an untrusted byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ContentHashError> {
        let digest: [u8; CONTENT_HASH_LEN] = bytes
            .try_into()
            .map_err(|_| ContentHashError::BadLength(bytes.len()))?;

        Ok(ContentHash(digest))
    }

    pub fn from_hex(text: &str) -> Result<Self, ContentHashError> {
        let bytes = hex::decode(text)?;
        Self::from_slice(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; CONTENT_HASH_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        ContentHash::from_hex(&text).map_err(D::Error::custom)
    }
}
