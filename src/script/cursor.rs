use thiserror::Error;

/// Wire-level read failure over untrusted bytes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WireError {
    #[error("Truncated input: needed {needed} more bytes, {remaining} left")]
    Truncated { needed: usize, remaining: usize },
    #[error("Declared length {0} does not fit in memory")]
    LengthOverflow(u64),
    #[error("{0} trailing bytes after the value")]
    TrailingBytes(usize),
}

/// Bounds-checked reader over a borrowed byte slice.
///
/// Every read either yields the requested bytes or fails with a typed error.
/// The cursor never reads past the end of the slice and never panics.
#[derive(Debug)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_exact(&mut self, len: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < len {
            return Err(WireError::Truncated {
                needed: len,
                remaining: self.remaining(),
            });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.bytes[start..start + len])
    }

    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        Ok(self.read_exact(1)?[0])
    }

    pub fn read_u16le(&mut self) -> Result<u16, WireError> {
        let b = self.read_exact(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32le(&mut self) -> Result<u32, WireError> {
        let b = self.read_exact(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u64le(&mut self) -> Result<u64, WireError> {
        let b = self.read_exact(8)?;
        Ok(u64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// Read a Bitcoin compact-size integer: a tag byte below `0xfd` is the
    /// value itself; `0xfd`, `0xfe` and `0xff` prefix a little-endian `u16`,
    /// `u32` or `u64`.
    ///
    /// Non-minimal encodings are accepted; this is a filter over third-party
    /// data, not a consensus rule.
    pub fn read_compact_size(&mut self) -> Result<u64, WireError> {
        let tag = self.read_u8()?;
        match tag {
            0x00..=0xfc => Ok(u64::from(tag)),
            0xfd => Ok(u64::from(self.read_u16le()?)),
            0xfe => Ok(u64::from(self.read_u32le()?)),
            0xff => self.read_u64le(),
        }
    }

    /// Read a compact-size value that will be used as an in-memory length.
    pub fn read_length(&mut self) -> Result<usize, WireError> {
        let n = self.read_compact_size()?;
        usize::try_from(n).map_err(|_| WireError::LengthOverflow(n))
    }
}

/// Append the minimal compact-size encoding of `n` to `out`.
pub fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    if n < 0xfd {
        out.push(n as u8);
    } else if n <= 0xffff {
        out.push(0xfd);
        out.extend_from_slice(&(n as u16).to_le_bytes());
    } else if n <= 0xffff_ffff {
        out.push(0xfe);
        out.extend_from_slice(&(n as u32).to_le_bytes());
    } else {
        out.push(0xff);
        out.extend_from_slice(&n.to_le_bytes());
    }
}

/// Minimal compact-size encoding of `n` as a standalone field.
pub fn compact_size(n: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(9);
    write_compact_size(&mut out, n);
    out
}
