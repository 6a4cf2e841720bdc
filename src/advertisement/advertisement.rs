use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;
use url::Url;

use crate::script::cursor::{compact_size, Cursor, WireError};
use crate::types::identifiers::ContentHash;

/// Protocol address identifying UHRP advertisement tokens, field 0 of every
/// advertisement. Opaque to admission; carried through verbatim.
pub const PROTOCOL_ADDRESS: &[u8] = b"1UHRPYnMHPuQ5Tgb3AF8JXqwKkmZVy5hG";

/// Minimum field count of a UHRP advertisement token.
pub const MIN_FIELDS: usize = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Token carries {0} fields, UHRP advertisements need at least 5")]
    TooFewFields(usize),
    #[error("Content hash field is {0} bytes, expected 32")]
    BadHashLength(usize),
    #[error("Location field is not a valid absolute URL")]
    MalformedUrl,
    #[error("Location scheme {0:?} is not allowed, advertisements must be served over https")]
    InsecureScheme(String),
    #[error("Numeric field {index} is not a complete varint: {source}")]
    BadVarInt {
        index: usize,
        #[source]
        source: WireError,
    },
    #[error("Expiry time {expiry_time} or file size {file_size} is below the minimum of 1")]
    InvalidRange { expiry_time: u64, file_size: u64 },
}

/// A UHRP storage-commitment advertisement that passed every admission check:
/// the typed projection of a decoded token's field list.
///
/// [`from_fields`] is the only constructor and enforces the whole validation
/// contract, so holding a value of this type means the token was admissible.
/// Instances are ephemeral: built while evaluating one output, discarded
/// with the verdict, never persisted here.
///
/// Binding field layout (the admission gate's view): 0 protocol address
/// (opaque), 1 content hash (32 bytes), 2 location URL, 3 expiry time,
/// 4 file size, then optionally 5 owner address and 6 action tag, both
/// opaque.
///
/// [`from_fields`]: UhrpAdvertisement::from_fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UhrpAdvertisement {
    pub protocol_address: Vec<u8>,
    pub content_hash: ContentHash,
    pub location_url: Url,
    /// Milliseconds since the Unix epoch, by publisher convention. Admission
    /// only requires it to be at least 1; expiry enforcement against a clock
    /// is the overlay engine's policy.
    pub expiry_time: u64,
    pub file_size: u64,
    pub owner_address: Option<Vec<u8>>,
    pub action: Option<Vec<u8>>,
}

impl UhrpAdvertisement {
    /// Validate a decoded field list into a typed advertisement.
    ///
    /// Checks run in contract order and short-circuit on the first failure:
    /// field count, hash length, URL well-formedness, URL scheme, numeric
    /// decodes, numeric ranges. Pure; hardened against truncated or
    /// malformed numeric encodings.
    pub fn from_fields(fields: &[Vec<u8>]) -> Result<Self, ValidationError> {
        if fields.len() < MIN_FIELDS {
            return Err(ValidationError::TooFewFields(fields.len()));
        }

        let content_hash = ContentHash::from_slice(&fields[1])
            .map_err(|_| ValidationError::BadHashLength(fields[1].len()))?;

        let location = std::str::from_utf8(&fields[2]).map_err(|_| ValidationError::MalformedUrl)?;
        let location_url = Url::parse(location).map_err(|_| ValidationError::MalformedUrl)?;
        if location_url.scheme() != "https" {
            return Err(ValidationError::InsecureScheme(
                location_url.scheme().to_string(),
            ));
        }

        let expiry_time = decode_numeric_field(fields, 3)?;
        let file_size = decode_numeric_field(fields, 4)?;
        if expiry_time < 1 || file_size < 1 {
            return Err(ValidationError::InvalidRange {
                expiry_time,
                file_size,
            });
        }

        Ok(UhrpAdvertisement {
            protocol_address: fields[0].clone(),
            content_hash,
            location_url,
            expiry_time,
            file_size,
            owner_address: fields.get(5).cloned(),
            action: fields.get(6).cloned(),
        })
    }

    /// Inverse projection: the field list for this advertisement in the
    /// binding layout, suitable for locking into a commitment script.
    ///
    /// An `action` without an `owner_address` gets an empty owner field so
    /// positions stay stable.
    pub fn to_fields(&self) -> Vec<Vec<u8>> {
        let mut fields = vec![
            self.protocol_address.clone(),
            self.content_hash.as_bytes().to_vec(),
            self.location_url.as_str().as_bytes().to_vec(),
            compact_size(self.expiry_time),
            compact_size(self.file_size),
        ];
        match (&self.owner_address, &self.action) {
            (Some(owner), Some(action)) => {
                fields.push(owner.clone());
                fields.push(action.clone());
            }
            (Some(owner), None) => fields.push(owner.clone()),
            (None, Some(action)) => {
                fields.push(Vec::new());
                fields.push(action.clone());
            }
            (None, None) => {}
        }
        fields
    }

    /// Expiry as a UTC timestamp. `None` when the raw value is outside the
    /// representable range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let millis = i64::try_from(self.expiry_time).ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

/// Decode `fields[index]` as one complete compact-size varint. Partial reads
/// and trailing bytes both fail: a numeric field is exactly one varint.
fn decode_numeric_field(fields: &[Vec<u8>], index: usize) -> Result<u64, ValidationError> {
    let mut cur = Cursor::new(&fields[index]);
    let value = cur
        .read_compact_size()
        .map_err(|source| ValidationError::BadVarInt { index, source })?;
    if !cur.is_empty() {
        return Err(ValidationError::BadVarInt {
            index,
            source: WireError::TrailingBytes(cur.remaining()),
        });
    }
    Ok(value)
}
