#![doc = r#"
A positional cursor over a byte slice.

Every read either yields the requested bytes or fails with a positional
[`ErrorKind::TruncatedData`] error; the position survives in the error so a
caller can point at the offending offset.
"#]

use crate::error::{DecodeError, DecodeResult, ErrorKind};

/// A cursor over the raw bytes of a MIDI stream.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over a byte slice, positioned at the start.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// The current byte offset into the stream.
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// The number of bytes left to read.
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// Build a [`DecodeError`] at the current position.
    pub(crate) const fn err(&self, kind: ErrorKind) -> DecodeError {
        DecodeError::new(self.position, kind)
    }

    /// Read exactly `count` bytes, advancing the cursor.
    pub fn read_exact(&mut self, count: usize) -> DecodeResult<&'a [u8]> {
        let Some(end) = self.position.checked_add(count) else {
            return Err(self.err(ErrorKind::TruncatedData));
        };
        if end > self.bytes.len() {
            return Err(self.err(ErrorKind::TruncatedData));
        }
        let slice = &self.bytes[self.position..end];
        self.position = end;
        Ok(slice)
    }

    /// Read exactly `N` bytes into an array, advancing the cursor.
    pub fn read_exact_size<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let slice = self.read_exact(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.read_exact_size::<1>()?[0])
    }

    /// Read a big-endian u16.
    pub fn read_u16_be(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_be_bytes(self.read_exact_size::<2>()?))
    }

    /// Read a big-endian u32.
    pub fn read_u32_be(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_be_bytes(self.read_exact_size::<4>()?))
    }
}

#[test]
fn reads_advance_the_position() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::new(&[0x4D, 0x54, 0x68, 0x64, 0x00, 0x00]);
    assert_eq!(reader.read_exact_size::<4>().unwrap(), *b"MThd");
    assert_eq!(reader.buffer_position(), 4);
    assert_eq!(reader.read_u16_be().unwrap(), 0);
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn short_read_is_truncated() {
    use pretty_assertions::assert_eq;
    let mut reader = Reader::new(&[0x01, 0x02]);
    let err = reader.read_u32_be().unwrap_err();
    assert_eq!(err.position(), 0);
    assert_eq!(*err.kind(), ErrorKind::TruncatedData);
    // a failed read consumes nothing
    assert_eq!(reader.read_u16_be().unwrap(), 0x0102);
}
