use crate::{
    error::{DecodeResult, EncodeResult, ErrorKind},
    event::{RunningStatus, TrackEvent},
    file::Strictness,
    reader::Reader,
};
use alloc::vec::Vec;

#[doc = r#"
One track: an ordered, order-significant sequence of events.

Order carries the temporal meaning: each event's delta-time counts from its
predecessor. A well-formed track ends with the end-of-track meta event.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    events: Vec<TrackEvent>,
}

impl Track {
    /// Create a track from its event sequence.
    pub const fn new(events: Vec<TrackEvent>) -> Self {
        Self { events }
    }

    /// The events, in temporal order.
    pub fn events(&self) -> &[TrackEvent] {
        &self.events
    }

    /// Consume the track, yielding its events.
    pub fn into_events(self) -> Vec<TrackEvent> {
        self.events
    }

    /// Decode one track-chunk body of `length` bytes from the stream.
    ///
    /// Events are decoded until the consumed byte count equals the chunk's
    /// declared length; an event crossing the boundary is a
    /// [`ErrorKind::LengthMismatch`]. In strict mode the final event must
    /// be end-of-track. The running-status slot lives and dies inside this
    /// call.
    pub(crate) fn read(
        reader: &mut Reader,
        length: u32,
        strictness: Strictness,
    ) -> DecodeResult<Self> {
        let start = reader.buffer_position();
        let end = start + length as usize;
        let mut running = RunningStatus::new();
        let mut events = Vec::new();

        while reader.buffer_position() < end {
            events.push(TrackEvent::read(reader, &mut running)?);
            if reader.buffer_position() > end {
                return Err(reader.err(ErrorKind::LengthMismatch {
                    declared: length,
                    consumed: (reader.buffer_position() - start) as u32,
                }));
            }
        }

        if strictness == Strictness::Strict
            && !events.last().is_some_and(|e| e.event.is_end_of_track())
        {
            return Err(reader.err(ErrorKind::MissingEndOfTrack));
        }

        Ok(Self { events })
    }

    /// Encode the track-chunk body: each event's delta-time then payload.
    ///
    /// The caller hands the returned buffer's length to the chunk framer.
    /// Encoding a track whose final event is not end-of-track is a
    /// [`ErrorKind::MissingEndOfTrack`] error regardless of mode.
    pub(crate) fn write_body(&self, compress: bool) -> EncodeResult<Vec<u8>> {
        if !self
            .events
            .last()
            .is_some_and(|e| e.event.is_end_of_track())
        {
            return Err(ErrorKind::MissingEndOfTrack.into());
        }

        let mut body = Vec::new();
        let mut running = RunningStatus::new();
        for event in &self.events {
            event.write(&mut body, &mut running, compress)?;
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Channel, DataByte, event::Event, event::MetaEvent};
    use pretty_assertions::assert_eq;

    // delta 100, NoteOn ch0 key 60 vel 100; delta 1100, NoteOff ch0 key 60
    // vel 0; delta 1, end of track
    const BODY: [u8; 13] = [
        0x64, 0x90, 0x3C, 0x64, 0x88, 0x4C, 0x80, 0x3C, 0x00, 0x01, 0xFF, 0x2F, 0x00,
    ];

    fn three_events() -> Vec<TrackEvent> {
        [
            TrackEvent {
                delta: 100,
                event: Event::NoteOn {
                    channel: Channel::new_unchecked(0),
                    key: DataByte::new_unchecked(60),
                    velocity: DataByte::new_unchecked(100),
                },
            },
            TrackEvent {
                delta: 1100,
                event: Event::NoteOff {
                    channel: Channel::new_unchecked(0),
                    key: DataByte::new_unchecked(60),
                    velocity: DataByte::new_unchecked(0),
                },
            },
            TrackEvent {
                delta: 1,
                event: Event::Meta(MetaEvent::end_of_track()),
            },
        ]
        .to_vec()
    }

    #[test]
    fn encode_concrete_scenario() {
        let track = Track::new(three_events());
        let body = track.write_body(false).unwrap();
        assert_eq!(body, BODY);
    }

    #[test]
    fn decode_concrete_scenario() {
        let mut reader = Reader::new(&BODY);
        let track = Track::read(&mut reader, BODY.len() as u32, Strictness::Strict).unwrap();
        assert_eq!(track.events(), three_events());
    }

    #[test]
    fn event_crossing_declared_length() {
        let mut reader = Reader::new(&BODY);
        // cut the declared length inside the first event
        let err = Track::read(&mut reader, 2, Strictness::Strict).unwrap_err();
        assert_eq!(
            *err.kind(),
            ErrorKind::LengthMismatch {
                declared: 2,
                consumed: 4,
            }
        );
    }

    #[test]
    fn missing_end_of_track_is_strict_only() {
        // single note on, no end of track
        let body = [0x00, 0x90, 0x3C, 0x64];
        let mut reader = Reader::new(&body);
        let err = Track::read(&mut reader, 4, Strictness::Strict).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::MissingEndOfTrack);

        let mut reader = Reader::new(&body);
        let track = Track::read(&mut reader, 4, Strictness::Lenient).unwrap();
        assert_eq!(track.events().len(), 1);
    }

    #[test]
    fn early_end_of_track_is_not_final() {
        // end of track followed by a note on, inside the declared length
        let body = [0x00, 0xFF, 0x2F, 0x00, 0x00, 0x90, 0x3C, 0x64];
        let mut reader = Reader::new(&body);
        let err = Track::read(&mut reader, 8, Strictness::Strict).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::MissingEndOfTrack);
    }

    #[test]
    fn encode_requires_end_of_track() {
        let mut events = three_events();
        events.pop();
        let err = Track::new(events).write_body(false).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::MissingEndOfTrack);

        let err = Track::new(Vec::new()).write_body(false).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::MissingEndOfTrack);
    }

    #[test]
    fn empty_body_decodes_to_no_events_when_lenient() {
        let mut reader = Reader::new(&[]);
        let track = Track::read(&mut reader, 0, Strictness::Lenient).unwrap();
        assert_eq!(track.events(), []);
    }
}
