#![doc = r#"
The outer chunk framing of a Standard MIDI File.

Every chunk is a 4-byte ASCII type tag, a big-endian u32 byte length, and
exactly that many body bytes. The SMF specification defines two tags: the
header chunk (`"MThd"`, first in the file) and the track chunk (`"MTrk"`,
one per track). A tag other than the one its context requires is rejected
as [`ErrorKind::BadMagic`].
"#]

use crate::{
    error::{DecodeResult, EncodeResult, ErrorKind},
    reader::Reader,
};
use alloc::vec::Vec;

/// The header chunk tag, `"MThd"`.
pub const HEADER_TAG: [u8; 4] = *b"MThd";
/// The track chunk tag, `"MTrk"`.
pub const TRACK_TAG: [u8; 4] = *b"MTrk";

/// The tag and declared body length of one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// The 4-byte ASCII type tag.
    pub tag: [u8; 4],
    /// The byte count of the body that follows.
    pub len: u32,
}

impl ChunkHeader {
    /// Read a chunk's tag and length prefix.
    ///
    /// The body is left in the stream; callers consume exactly
    /// [`len`](Self::len) bytes after this returns. The length is checked
    /// against the bytes remaining so a declared body that overruns the
    /// stream fails here as [`ErrorKind::TruncatedData`].
    pub fn read(reader: &mut Reader) -> DecodeResult<Self> {
        let tag_position = reader.buffer_position();
        let tag = reader.read_exact_size::<4>()?;
        let len = reader.read_u32_be()?;
        if (len as usize) > reader.remaining() {
            return Err(crate::error::DecodeError::new(
                tag_position,
                ErrorKind::TruncatedData,
            ));
        }
        Ok(Self { tag, len })
    }

    /// Read a chunk prefix and require its tag.
    pub fn expect(reader: &mut Reader, expected: [u8; 4]) -> DecodeResult<Self> {
        let tag_position = reader.buffer_position();
        let header = Self::read(reader)?;
        if header.tag != expected {
            return Err(crate::error::DecodeError::new(
                tag_position,
                ErrorKind::BadMagic {
                    expected,
                    found: header.tag,
                },
            ));
        }
        Ok(header)
    }
}

/// Write one complete chunk: tag, big-endian length, body.
///
/// # Errors
/// [`ErrorKind::Overflow`] if the body exceeds the u32 length a chunk
/// prefix can declare.
pub fn write_chunk(out: &mut Vec<u8>, tag: [u8; 4], body: &[u8]) -> EncodeResult<()> {
    let len = u32::try_from(body.len()).map_err(|_| ErrorKind::Overflow)?;
    out.extend_from_slice(&tag);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(body);
    Ok(())
}
