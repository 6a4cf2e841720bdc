use thiserror::Error;

use crate::script::cursor::{write_compact_size, Cursor, WireError};

/// The transaction envelope could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Transaction envelope is malformed: {0}")]
pub struct EnvelopeError(#[from] pub WireError);

/// One output of a decoded transaction: a satoshi value and an opaque
/// locking script. Admission only ever inspects the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOutput {
    pub satoshis: u64,
    pub locking_script: Vec<u8>,
}

/// A decoded transaction, immutable once decoded. The admission core borrows
/// it read-only; ownership stays with the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    pub outputs: Vec<TransactionOutput>,
}

impl Transaction {
    /// Decode the cross-implementation wire envelope: a compact-size output
    /// count, then per output a little-endian `u64` satoshi value, a
    /// compact-size script length and the script bytes. Trailing bytes are
    /// rejected.
    pub fn from_wire(envelope: &[u8]) -> Result<Self, EnvelopeError> {
        let mut cur = Cursor::new(envelope);

        let count = cur.read_length()?;
        // The count is untrusted; allocate as outputs actually arrive.
        let mut outputs = Vec::new();
        for _ in 0..count {
            let satoshis = cur.read_u64le()?;
            let script_len = cur.read_length()?;
            let locking_script = cur.read_exact(script_len)?.to_vec();
            outputs.push(TransactionOutput {
                satoshis,
                locking_script,
            });
        }
        if !cur.is_empty() {
            return Err(WireError::TrailingBytes(cur.remaining()).into());
        }

        Ok(Transaction { outputs })
    }

    /// Inverse of [`from_wire`]. The admission core never serializes; this
    /// exists for fixture construction and as the format reference.
    ///
    /// [`from_wire`]: Transaction::from_wire
    pub fn to_wire(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_compact_size(&mut out, self.outputs.len() as u64);
        for output in &self.outputs {
            out.extend_from_slice(&output.satoshis.to_le_bytes());
            write_compact_size(&mut out, output.locking_script.len() as u64);
            out.extend_from_slice(&output.locking_script);
        }
        out
    }
}
