#![doc = r#"
Error types produced while decoding or encoding MIDI bytes.

Every failure is detected at the point of occurrence and propagated as a
typed result; the codec performs no recovery or best-effort repair. Lenient
behavior (see [`Strictness`](crate::file::Strictness)) is an explicit caller
choice, never a silent default.
"#]

use thiserror::Error;

/// A kind of error that decoding or encoding can produce.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A chunk tag did not match the tag expected in its context.
    #[error("bad chunk tag: expected {expected:?}, found {found:?}")]
    BadMagic {
        /// The tag the context requires (`"MThd"` or `"MTrk"`).
        expected: [u8; 4],
        /// The tag actually present in the stream.
        found: [u8; 4],
    },
    /// The stream ended before a declared field or payload was fully read.
    #[error("stream ended before a declared field or payload was fully read")]
    TruncatedData,
    /// A variable-length quantity exceeds the representable 32-bit range.
    #[error("variable-length quantity exceeds the 32-bit range")]
    Overflow,
    /// A field value does not fit in its format-defined bit width.
    #[error("value {value} does not fit in {bits} bits")]
    ValueRange {
        /// The offending value.
        value: u32,
        /// The bit width the format allots to the field.
        bits: u8,
    },
    /// A status byte that maps to no known event category.
    #[error("unknown status byte {0:#04X}")]
    UnknownStatus(u8),
    /// A channel-voice data byte with its high bit set.
    #[error("channel-voice data byte {0:#04X} has its high bit set")]
    MalformedEvent(u8),
    /// A chunk body's declared length disagrees with the bytes consumed.
    #[error("chunk declared {declared} bytes, consumed {consumed}")]
    LengthMismatch {
        /// The length declared by the chunk prefix.
        declared: u32,
        /// The bytes actually consumed (or required).
        consumed: u32,
    },
    /// A track does not end with an end-of-track meta event.
    #[error("track does not end with an end-of-track meta event")]
    MissingEndOfTrack,
    /// The header's declared track count disagrees with the chunks present.
    #[error("header declared {declared} tracks, found {found}")]
    TrackCountMismatch {
        /// The count declared by the header chunk.
        declared: u16,
        /// The number of track chunks actually present.
        found: u16,
    },
    /// A header format code other than 0, 1 or 2.
    #[error("unknown file format {0}")]
    InvalidFormat(u16),
    /// An SMPTE division with a frame rate other than -24, -25, -29 or -30.
    #[error("invalid SMPTE frame rate {0}")]
    InvalidSmpteFps(i8),
}

#[doc = r#"
An error produced while decoding bytes into the midi representation.
"#]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("decoding at byte {position}: {kind}")]
pub struct DecodeError {
    position: usize,
    kind: ErrorKind,
}

impl DecodeError {
    /// Create a decode error from a position and kind.
    pub const fn new(position: usize, kind: ErrorKind) -> Self {
        Self { position, kind }
    }

    /// The byte offset at which the error occurred.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// The kind of error.
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// True if the stream ended before a declared field was fully read.
    pub const fn is_truncated(&self) -> bool {
        matches!(self.kind, ErrorKind::TruncatedData)
    }
}

/// The decode result type (see [`DecodeError`]).
pub type DecodeResult<T> = Result<T, DecodeError>;

#[doc = r#"
An error produced while encoding the midi representation into bytes.

Encoding walks an in-memory value rather than a byte stream, so unlike
[`DecodeError`] there is no position to report.
"#]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("encoding: {0}")]
pub struct EncodeError(pub(crate) ErrorKind);

impl EncodeError {
    /// The kind of error.
    pub const fn kind(&self) -> &ErrorKind {
        &self.0
    }
}

impl From<ErrorKind> for EncodeError {
    fn from(kind: ErrorKind) -> Self {
        Self(kind)
    }
}

/// The encode result type (see [`EncodeError`]).
pub type EncodeResult<T> = Result<T, EncodeError>;

/// An error produced by the file-path convenience wrappers.
#[cfg(feature = "std")]
#[derive(Debug, Error)]
pub enum IoError {
    /// The underlying filesystem operation failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// The file's bytes did not decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The in-memory value did not encode.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}
