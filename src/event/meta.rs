use crate::error::ErrorKind;
use alloc::vec::Vec;
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
A meta event: `FF` + type byte + VLQ length + payload.

Meta events are file-structural; they are never transmitted over a wire.
The type byte is kept raw so unrecognized types round-trip untouched;
[`MetaEvent::kind`] maps the recognized ones to [`MetaKind`].
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetaEvent {
    kind: u8,
    data: Vec<u8>,
}

impl MetaEvent {
    /// Create a meta event from a raw type byte and payload.
    pub const fn new(kind: u8, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// The end-of-track event, `FF 2F 00`.
    ///
    /// Every well-formed track ends with this event.
    pub const fn end_of_track() -> Self {
        Self {
            kind: MetaKind::EndOfTrack as u8,
            data: Vec::new(),
        }
    }

    /// A set-tempo event carrying microseconds per quarter note.
    ///
    /// # Errors
    /// [`ErrorKind::ValueRange`] if the tempo does not fit the 3-byte field.
    pub fn set_tempo(micros_per_quarter_note: u32) -> Result<Self, ErrorKind> {
        if micros_per_quarter_note > 0x00FF_FFFF {
            return Err(ErrorKind::ValueRange {
                value: micros_per_quarter_note,
                bits: 24,
            });
        }
        let be = micros_per_quarter_note.to_be_bytes();
        Ok(Self {
            kind: MetaKind::SetTempo as u8,
            data: [be[1], be[2], be[3]].to_vec(),
        })
    }

    /// The raw type byte.
    pub const fn kind_byte(&self) -> u8 {
        self.kind
    }

    /// The recognized meta type, if any.
    pub fn kind(&self) -> Option<MetaKind> {
        MetaKind::try_from(self.kind).ok()
    }

    /// The payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// True for the end-of-track event.
    pub const fn is_end_of_track(&self) -> bool {
        self.kind == MetaKind::EndOfTrack as u8
    }

    /// Microseconds per quarter note, if this is a well-formed set-tempo
    /// event.
    pub fn tempo(&self) -> Option<u32> {
        if self.kind != MetaKind::SetTempo as u8 {
            return None;
        }
        let [a, b, c] = *self.data.as_slice() else {
            return None;
        };
        Some(u32::from_be_bytes([0, a, b, c]))
    }
}

/// The meta-event types named by the SMF specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum MetaKind {
    SequenceNumber = 0x00,
    Text = 0x01,
    Copyright = 0x02,
    TrackName = 0x03,
    InstrumentName = 0x04,
    Lyric = 0x05,
    Marker = 0x06,
    CuePoint = 0x07,
    ChannelPrefix = 0x20,
    EndOfTrack = 0x2F,
    SetTempo = 0x51,
    SmpteOffset = 0x54,
    TimeSignature = 0x58,
    KeySignature = 0x59,
    SequencerSpecific = 0x7F,
}

#[test]
fn tempo_round_trip() {
    use pretty_assertions::assert_eq;
    let tempo = MetaEvent::set_tempo(500_000).unwrap();
    assert_eq!(tempo.kind(), Some(MetaKind::SetTempo));
    assert_eq!(tempo.data(), [0x07, 0xA1, 0x20]);
    assert_eq!(tempo.tempo(), Some(500_000));
}

#[test]
fn tempo_out_of_range() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        MetaEvent::set_tempo(0x0100_0000).unwrap_err(),
        ErrorKind::ValueRange {
            value: 0x0100_0000,
            bits: 24,
        }
    );
}

#[test]
fn unrecognized_kind_is_preserved() {
    use pretty_assertions::assert_eq;
    let event = MetaEvent::new(0x42, [1, 2].to_vec());
    assert_eq!(event.kind(), None);
    assert_eq!(event.kind_byte(), 0x42);
}
