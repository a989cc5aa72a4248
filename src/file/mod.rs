#![doc = r#"
The file-level codec: header chunk plus ordered track chunks.

[`MidiFile::decode`] reads the `"MThd"` chunk, then one `"MTrk"` chunk per
declared track; [`MidiFile::encode`] is the exact mirror, writing the actual
track count of the in-memory structure. Strictness of validation (declared
track count, end-of-track) is an explicit caller choice.
"#]

mod division;
pub use division::*;

mod header;
pub use header::Format;
use header::Header;

mod track;
pub use track::*;

use crate::{
    chunk::{ChunkHeader, TRACK_TAG, write_chunk},
    error::{DecodeResult, EncodeResult, ErrorKind},
    reader::Reader,
};
use alloc::vec::Vec;

/// How much malformedness decoding tolerates.
///
/// Strict is the default everywhere; leniency never happens silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Enforce the declared track count and the final end-of-track event.
    #[default]
    Strict,
    /// Accept the tracks that are present and tracks without a final
    /// end-of-track event.
    Lenient,
}

/// Options for [`MidiFile::encode_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeOptions {
    /// Omit repeated channel-voice status bytes (running status). Off by
    /// default; unconditional status bytes are always valid output.
    pub running_status: bool,
}

#[doc = r#"
A complete Standard MIDI File.

Owns its tracks, which own their events; fully constructed at decode time
and immutable thereafter. Two files compare equal exactly when format,
division and every track's event sequence agree.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MidiFile {
    format: Format,
    division: Division,
    tracks: Vec<Track>,
}

impl MidiFile {
    /// Assemble a file from its parts.
    pub const fn new(format: Format, division: Division, tracks: Vec<Track>) -> Self {
        Self {
            format,
            division,
            tracks,
        }
    }

    /// The declared track arrangement.
    pub const fn format(&self) -> Format {
        self.format
    }

    /// The time division delta-times are interpreted against.
    pub const fn division(&self) -> Division {
        self.division
    }

    /// The tracks, in file order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Consume the file, yielding its tracks.
    pub fn into_tracks(self) -> Vec<Track> {
        self.tracks
    }

    /// Decode a byte stream, strictly.
    ///
    /// Equivalent to [`decode_with`](Self::decode_with) using
    /// [`Strictness::Strict`].
    pub fn decode(bytes: &[u8]) -> DecodeResult<Self> {
        Self::decode_with(bytes, Strictness::Strict)
    }

    /// Decode a byte stream.
    ///
    /// Track chunks are read until the end of input. In strict mode a
    /// count that disagrees with the header is a
    /// [`ErrorKind::TrackCountMismatch`]; in lenient mode the tracks
    /// present are accepted. A trailing chunk with a tag other than
    /// `"MTrk"` is a [`ErrorKind::BadMagic`] in both modes.
    pub fn decode_with(bytes: &[u8], strictness: Strictness) -> DecodeResult<Self> {
        let mut reader = Reader::new(bytes);
        let header = Header::read(&mut reader)?;

        let mut tracks = Vec::with_capacity(header.track_count as usize);
        while reader.remaining() > 0 {
            let chunk = ChunkHeader::expect(&mut reader, TRACK_TAG)?;
            tracks.push(Track::read(&mut reader, chunk.len, strictness)?);
        }

        if strictness == Strictness::Strict && tracks.len() != header.track_count as usize {
            return Err(reader.err(ErrorKind::TrackCountMismatch {
                declared: header.track_count,
                found: tracks.len() as u16,
            }));
        }

        Ok(Self {
            format: header.format,
            division: header.division,
            tracks,
        })
    }

    /// Encode into bytes, emitting every status byte.
    ///
    /// Equivalent to [`encode_with`](Self::encode_with) using default
    /// options.
    pub fn encode(&self) -> EncodeResult<Vec<u8>> {
        self.encode_with(EncodeOptions::default())
    }

    /// Encode into bytes.
    ///
    /// The header chunk declares the actual number of in-memory tracks.
    pub fn encode_with(&self, options: EncodeOptions) -> EncodeResult<Vec<u8>> {
        let track_count = u16::try_from(self.tracks.len()).map_err(|_| ErrorKind::ValueRange {
            value: u32::try_from(self.tracks.len()).unwrap_or(u32::MAX),
            bits: 16,
        })?;

        let mut out = Vec::new();
        Header {
            format: self.format,
            track_count,
            division: self.division,
        }
        .write(&mut out)?;

        for track in &self.tracks {
            let body = track.write_body(options.running_status)?;
            write_chunk(&mut out, TRACK_TAG, &body)?;
        }
        Ok(out)
    }

    /// Read and decode a file from disk, strictly.
    ///
    /// The handle is scoped to this call and released on every exit path.
    #[cfg(feature = "std")]
    pub fn read_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, crate::error::IoError> {
        let bytes = std::fs::read(path)?;
        Ok(Self::decode(&bytes)?)
    }

    /// Encode and write this file to disk.
    #[cfg(feature = "std")]
    pub fn write_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), crate::error::IoError> {
        let bytes = self.encode()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
