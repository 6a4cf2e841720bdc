use thiserror::Error;

use crate::script::cursor::{Cursor, WireError};

/// Length of the compressed public key committed in the lock prefix.
pub const LOCK_KEY_LEN: usize = 33;

const OP_0: u8 = 0x00;
const OP_PUSHDATA1: u8 = 0x4c;
const OP_PUSHDATA2: u8 = 0x4d;
const OP_PUSHDATA4: u8 = 0x4e;
const OP_1NEGATE: u8 = 0x4f;
const OP_1: u8 = 0x51;
const OP_16: u8 = 0x60;
const OP_2DROP: u8 = 0x6d;
const OP_DROP: u8 = 0x75;
const OP_CHECKSIG: u8 = 0xac;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenDecodeError {
    #[error("Locking script is empty")]
    EmptyScript,
    #[error("Locking script does not start with a 33-byte key push")]
    MissingLockKey,
    #[error("Expected OP_CHECKSIG after the lock key, got opcode 0x{0:02x}")]
    MissingChecksig(u8),
    #[error("Data push runs past the end of the script: {0}")]
    TruncatedPush(#[from] WireError),
    #[error("Opcode 0x{0:02x} is not a data push or drop")]
    UnexpectedOpcode(u8),
    #[error("Drop sequence does not clear the pushed fields")]
    MalformedDropSequence,
    #[error("Token carries no data fields")]
    NoFields,
}

/// A decoded commitment-script token: an ownership lock followed by an
/// ordered list of opaque data fields.
///
/// The only layout decoded is the lock-before-data form:
///
/// ```text
/// <33-byte key push> OP_CHECKSIG <field pushes...> <drop sequence>
/// ```
///
/// where the drop sequence is one `OP_2DROP` per field pair plus a trailing
/// `OP_DROP` for an odd field count, exactly the sequence [`to_script`]
/// emits.
///
/// [`to_script`]: PushDropToken::to_script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushDropToken {
    pub lock_public_key: [u8; LOCK_KEY_LEN],
    pub fields: Vec<Vec<u8>>,
}

impl PushDropToken {
    /// Decode a locking script into a token.
    ///
    /// Pure function of its input; failure means the script is not a
    /// commitment token at all.
    pub fn decode(locking_script: &[u8]) -> Result<Self, TokenDecodeError> {
        if locking_script.is_empty() {
            return Err(TokenDecodeError::EmptyScript);
        }
        let mut cur = Cursor::new(locking_script);

        // Lock prefix: a direct push of exactly the key length, then the
        // signature check.
        let opcode = cur.read_u8()?;
        if opcode as usize != LOCK_KEY_LEN {
            return Err(TokenDecodeError::MissingLockKey);
        }
        let mut lock_public_key = [0u8; LOCK_KEY_LEN];
        lock_public_key.copy_from_slice(cur.read_exact(LOCK_KEY_LEN)?);

        let opcode = cur.read_u8()?;
        if opcode != OP_CHECKSIG {
            return Err(TokenDecodeError::MissingChecksig(opcode));
        }

        // Data section: every chunk is a push until the drop sequence starts.
        let mut fields: Vec<Vec<u8>> = Vec::new();
        loop {
            if cur.is_empty() {
                // Ran out of script without a drop sequence.
                return Err(if fields.is_empty() {
                    TokenDecodeError::NoFields
                } else {
                    TokenDecodeError::MalformedDropSequence
                });
            }
            let opcode = cur.read_u8()?;
            match read_push(&mut cur, opcode)? {
                Some(field) => fields.push(field),
                None if opcode == OP_DROP || opcode == OP_2DROP => {
                    if fields.is_empty() {
                        return Err(TokenDecodeError::NoFields);
                    }
                    check_drop_sequence(opcode, &mut cur, fields.len())?;
                    break;
                }
                None => return Err(TokenDecodeError::UnexpectedOpcode(opcode)),
            }
        }

        Ok(PushDropToken {
            lock_public_key,
            fields,
        })
    }

    /// Encode the token back into a locking script, minimal push encodings
    /// throughout.
    pub fn to_script(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.push(LOCK_KEY_LEN as u8);
        out.extend_from_slice(&self.lock_public_key);
        out.push(OP_CHECKSIG);
        for field in &self.fields {
            write_push(&mut out, field);
        }
        let mut pending = self.fields.len();
        while pending > 1 {
            out.push(OP_2DROP);
            pending -= 2;
        }
        if pending == 1 {
            out.push(OP_DROP);
        }
        out
    }
}

/// Decode one push chunk. `Ok(None)` means `opcode` is not a push.
fn read_push(cur: &mut Cursor<'_>, opcode: u8) -> Result<Option<Vec<u8>>, TokenDecodeError> {
    let data = match opcode {
        OP_0 => Vec::new(),
        1..=0x4b => cur.read_exact(opcode as usize)?.to_vec(),
        OP_PUSHDATA1 => {
            let len = cur.read_u8()? as usize;
            cur.read_exact(len)?.to_vec()
        }
        OP_PUSHDATA2 => {
            let len = cur.read_u16le()? as usize;
            cur.read_exact(len)?.to_vec()
        }
        OP_PUSHDATA4 => {
            let declared = cur.read_u32le()?;
            let len = usize::try_from(declared)
                .map_err(|_| WireError::LengthOverflow(u64::from(declared)))?;
            cur.read_exact(len)?.to_vec()
        }
        OP_1NEGATE => vec![0x81],
        OP_1..=OP_16 => vec![opcode - (OP_1 - 1)],
        _ => return Ok(None),
    };
    Ok(Some(data))
}

/// Verify that `first` plus the rest of the script is exactly the canonical
/// drop sequence for `field_count` fields, and that nothing follows it.
fn check_drop_sequence(
    first: u8,
    cur: &mut Cursor<'_>,
    field_count: usize,
) -> Result<(), TokenDecodeError> {
    let mut expected = Vec::new();
    let mut pending = field_count;
    while pending > 1 {
        expected.push(OP_2DROP);
        pending -= 2;
    }
    if pending == 1 {
        expected.push(OP_DROP);
    }

    let mut actual = Vec::with_capacity(expected.len());
    actual.push(first);
    while !cur.is_empty() {
        actual.push(cur.read_u8()?);
    }
    if actual != expected {
        return Err(TokenDecodeError::MalformedDropSequence);
    }
    Ok(())
}

/// Append the minimal push encoding of `data` to `out`.
fn write_push(out: &mut Vec<u8>, data: &[u8]) {
    if data.is_empty() {
        out.push(OP_0);
        return;
    }
    if data.len() == 1 {
        let byte = data[0];
        if (1..=16).contains(&byte) {
            out.push(OP_1 - 1 + byte);
            return;
        }
        if byte == 0x81 {
            out.push(OP_1NEGATE);
            return;
        }
    }
    match data.len() {
        1..=0x4b => out.push(data.len() as u8),
        0x4c..=0xff => {
            out.push(OP_PUSHDATA1);
            out.push(data.len() as u8);
        }
        0x100..=0xffff => {
            out.push(OP_PUSHDATA2);
            out.extend_from_slice(&(data.len() as u16).to_le_bytes());
        }
        _ => {
            out.push(OP_PUSHDATA4);
            out.extend_from_slice(&(data.len() as u32).to_le_bytes());
        }
    }
    out.extend_from_slice(data);
}
