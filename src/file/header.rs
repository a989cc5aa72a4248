use crate::{
    chunk::{ChunkHeader, HEADER_TAG, write_chunk},
    error::{DecodeError, DecodeResult, EncodeResult, ErrorKind},
    file::Division,
    reader::Reader,
};
use alloc::vec::Vec;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The track arrangement declared by the header chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Format {
    /// Format 0: a single track carrying all channels.
    SingleMultiChannel = 0,
    /// Format 1: multiple tracks played simultaneously.
    Simultaneous = 1,
    /// Format 2: multiple independent single-track patterns.
    SequentiallyIndependent = 2,
}

/// The decoded body of a header chunk: format, declared track count and
/// time division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Header {
    pub format: Format,
    pub track_count: u16,
    pub division: Division,
}

impl Header {
    /// Read the `"MThd"` chunk.
    ///
    /// The body is fixed at six bytes; a longer header (non-standard, but
    /// seen in the wild) has its remainder skipped, a shorter one is a
    /// [`ErrorKind::LengthMismatch`].
    pub fn read(reader: &mut Reader) -> DecodeResult<Self> {
        let chunk = ChunkHeader::expect(reader, HEADER_TAG)?;
        if chunk.len < 6 {
            return Err(reader.err(ErrorKind::LengthMismatch {
                declared: chunk.len,
                consumed: 6,
            }));
        }

        let raw_format = reader.read_u16_be()?;
        let format = Format::try_from(raw_format)
            .map_err(|_| reader.err(ErrorKind::InvalidFormat(raw_format)))?;
        let track_count = reader.read_u16_be()?;
        let division_position = reader.buffer_position();
        let raw_division = reader.read_u16_be()?;
        let division = Division::from_raw(raw_division)
            .map_err(|kind| DecodeError::new(division_position, kind))?;

        // consume remainder (for non-standard headers)
        reader.read_exact(chunk.len as usize - 6)?;

        Ok(Self {
            format,
            track_count,
            division,
        })
    }

    /// Write the `"MThd"` chunk.
    pub fn write(&self, out: &mut Vec<u8>) -> EncodeResult<()> {
        let mut body = [0u8; 6];
        body[0..2].copy_from_slice(&u16::from(self.format).to_be_bytes());
        body[2..4].copy_from_slice(&self.track_count.to_be_bytes());
        body[4..6].copy_from_slice(&self.division.to_raw()?.to_be_bytes());
        write_chunk(out, HEADER_TAG, &body)
    }
}
