#![doc = r#"
Track events and the event codec.

# Hierarchy

```text
          |------------|
          | TrackEvent |  delta-time + event
          |------------|
          /     |      \
|---------------| |------| |-------|
| Channel voice | | Meta | | SysEx |
|---------------| |------| |-------|
```

Channel-voice events carry a channel nibble and one or two 7-bit data
bytes; their status byte may be omitted on the wire when it repeats the
previous one (running status). Meta and sysex events always spell out
their status byte and reset the running-status slot.
"#]

mod meta;
pub use meta::*;

mod sysex;
pub use sysex::*;

use crate::{
    Channel, DataByte,
    error::{DecodeResult, EncodeResult, ErrorKind},
    reader::Reader,
    vlq::{read_vlq, write_vlq},
};
use alloc::vec::Vec;

// Channel-voice status nibbles.
const NOTE_OFF: u8 = 0x8;
const NOTE_ON: u8 = 0x9;
const POLY_KEY_PRESSURE: u8 = 0xA;
const CONTROL_CHANGE: u8 = 0xB;
const PROGRAM_CHANGE: u8 = 0xC;
const CHANNEL_PRESSURE: u8 = 0xD;
const PITCH_BEND: u8 = 0xE;

const META_STATUS: u8 = 0xFF;

#[doc = r#"
One event of a track: a delta-time plus the event payload.

The delta is the tick count since the previous event in the same track
(zero for simultaneity), encoded on the wire as a VLQ.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackEvent {
    /// Ticks since the previous event.
    pub delta: u32,
    /// The event payload.
    pub event: Event,
}

impl TrackEvent {
    /// Decode one (delta-time, event) pair from the stream.
    pub fn read(reader: &mut Reader, running: &mut RunningStatus) -> DecodeResult<Self> {
        let delta = read_vlq(reader)?;
        let event = Event::read(reader, running)?;
        Ok(Self { delta, event })
    }

    /// Encode this event's delta-time and payload.
    ///
    /// With `compress` set, a channel-voice status byte equal to the slot's
    /// current value is omitted.
    pub fn write(
        &self,
        out: &mut Vec<u8>,
        running: &mut RunningStatus,
        compress: bool,
    ) -> EncodeResult<()> {
        write_vlq(out, self.delta);
        self.event.write(out, running, compress)
    }
}

#[doc = r#"
The set of events a track can carry.

Channel-voice variants hold their data bytes as checked
[`DataByte`]/[`Channel`] values, so a constructed event is encodable by
construction; out-of-range input is rejected when the newtypes are built.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// `8n key velocity`: release a key.
    NoteOff {
        /// The channel nibble of the status byte.
        channel: Channel,
        /// The key number, 0-127 (60 = middle C).
        key: DataByte,
        /// The release velocity.
        velocity: DataByte,
    },
    /// `9n key velocity`: press a key. Velocity zero conventionally means
    /// note-off, but the codec carries it verbatim.
    NoteOn {
        /// The channel nibble of the status byte.
        channel: Channel,
        /// The key number, 0-127.
        key: DataByte,
        /// The press velocity.
        velocity: DataByte,
    },
    /// `An key pressure`: per-key aftertouch.
    PolyKeyPressure {
        /// The channel nibble of the status byte.
        channel: Channel,
        /// The key number, 0-127.
        key: DataByte,
        /// The pressure amount.
        pressure: DataByte,
    },
    /// `Bn controller value`: a controller change.
    ControlChange {
        /// The channel nibble of the status byte.
        channel: Channel,
        /// The controller number.
        controller: DataByte,
        /// The controller value.
        value: DataByte,
    },
    /// `Cn program`: select a program (patch).
    ProgramChange {
        /// The channel nibble of the status byte.
        channel: Channel,
        /// The program number.
        program: DataByte,
    },
    /// `Dn pressure`: channel-wide aftertouch.
    ChannelPressure {
        /// The channel nibble of the status byte.
        channel: Channel,
        /// The pressure amount.
        pressure: DataByte,
    },
    /// `En lsb msb`: a 14-bit pitch-bend value, least significant 7 bits
    /// first.
    PitchBend {
        /// The channel nibble of the status byte.
        channel: Channel,
        /// The low 7 bits of the bend value.
        lsb: DataByte,
        /// The high 7 bits of the bend value.
        msb: DataByte,
    },
    /// `FF type length payload`: a meta event.
    Meta(MetaEvent),
    /// `F0/F7 length payload`: a system-exclusive event.
    SysEx(SysExEvent),
}

impl Event {
    /// Decode one event, given the stream positioned at its status byte
    /// candidate and the track's running-status slot.
    pub fn read(reader: &mut Reader, running: &mut RunningStatus) -> DecodeResult<Self> {
        let first = reader.read_u8()?;

        // A clear high bit means the status byte was omitted: the byte is
        // the first data byte and the stored status applies.
        let (status, pending) = if first & 0x80 != 0 {
            (first, None)
        } else {
            let Some(status) = running.get() else {
                return Err(reader.err(ErrorKind::UnknownStatus(first)));
            };
            (status, Some(first))
        };

        match status {
            META_STATUS => {
                running.clear();
                Self::read_meta(reader)
            }
            status if SysExKind::try_from(status).is_ok() => {
                running.clear();
                Self::read_sysex(reader, status)
            }
            _ => match status >> 4 {
                NOTE_OFF..=PITCH_BEND => {
                    running.set(status);
                    Self::read_channel_voice(reader, status, pending)
                }
                _ => Err(reader.err(ErrorKind::UnknownStatus(status))),
            },
        }
    }

    fn read_meta(reader: &mut Reader) -> DecodeResult<Self> {
        let kind = reader.read_u8()?;
        let length = read_vlq(reader)?;
        let data = reader.read_exact(length as usize)?.to_vec();
        Ok(Self::Meta(MetaEvent::new(kind, data)))
    }

    fn read_sysex(reader: &mut Reader, status: u8) -> DecodeResult<Self> {
        // status is known to be F0 or F7 when calling this
        let kind = SysExKind::try_from(status).unwrap_or(SysExKind::Normal);
        let length = read_vlq(reader)?;
        let data = reader.read_exact(length as usize)?.to_vec();
        Ok(Self::SysEx(SysExEvent::new(kind, data)))
    }

    fn read_channel_voice(
        reader: &mut Reader,
        status: u8,
        mut pending: Option<u8>,
    ) -> DecodeResult<Self> {
        let channel = Channel::new_unchecked(status & 0x0F);
        let event = match status >> 4 {
            NOTE_OFF => Self::NoteOff {
                channel,
                key: data_byte(reader, &mut pending)?,
                velocity: data_byte(reader, &mut pending)?,
            },
            NOTE_ON => Self::NoteOn {
                channel,
                key: data_byte(reader, &mut pending)?,
                velocity: data_byte(reader, &mut pending)?,
            },
            POLY_KEY_PRESSURE => Self::PolyKeyPressure {
                channel,
                key: data_byte(reader, &mut pending)?,
                pressure: data_byte(reader, &mut pending)?,
            },
            CONTROL_CHANGE => Self::ControlChange {
                channel,
                controller: data_byte(reader, &mut pending)?,
                value: data_byte(reader, &mut pending)?,
            },
            PROGRAM_CHANGE => Self::ProgramChange {
                channel,
                program: data_byte(reader, &mut pending)?,
            },
            CHANNEL_PRESSURE => Self::ChannelPressure {
                channel,
                pressure: data_byte(reader, &mut pending)?,
            },
            PITCH_BEND => Self::PitchBend {
                channel,
                lsb: data_byte(reader, &mut pending)?,
                msb: data_byte(reader, &mut pending)?,
            },
            _ => unreachable!("caller dispatched on the voice nibble range"),
        };
        Ok(event)
    }

    /// Encode this event, updating the running-status slot.
    pub fn write(
        &self,
        out: &mut Vec<u8>,
        running: &mut RunningStatus,
        compress: bool,
    ) -> EncodeResult<()> {
        match self {
            Self::Meta(meta) => {
                running.clear();
                out.push(META_STATUS);
                out.push(meta.kind_byte());
                write_payload(out, meta.data())
            }
            Self::SysEx(sysex) => {
                running.clear();
                out.push(sysex.status_byte());
                write_payload(out, sysex.data())
            }
            _ => {
                let status = self.status_byte();
                if !(compress && running.get() == Some(status)) {
                    out.push(status);
                }
                running.set(status);
                match *self {
                    Self::NoteOff { key, velocity, .. } | Self::NoteOn { key, velocity, .. } => {
                        out.push(key.value());
                        out.push(velocity.value());
                    }
                    Self::PolyKeyPressure { key, pressure, .. } => {
                        out.push(key.value());
                        out.push(pressure.value());
                    }
                    Self::ControlChange {
                        controller, value, ..
                    } => {
                        out.push(controller.value());
                        out.push(value.value());
                    }
                    Self::ProgramChange { program, .. } => out.push(program.value()),
                    Self::ChannelPressure { pressure, .. } => out.push(pressure.value()),
                    Self::PitchBend { lsb, msb, .. } => {
                        out.push(lsb.value());
                        out.push(msb.value());
                    }
                    Self::Meta(_) | Self::SysEx(_) => unreachable!("handled above"),
                }
                Ok(())
            }
        }
    }

    /// The status byte this event emits on the wire.
    pub const fn status_byte(&self) -> u8 {
        match self {
            Self::NoteOff { channel, .. } => (NOTE_OFF << 4) | channel.value(),
            Self::NoteOn { channel, .. } => (NOTE_ON << 4) | channel.value(),
            Self::PolyKeyPressure { channel, .. } => (POLY_KEY_PRESSURE << 4) | channel.value(),
            Self::ControlChange { channel, .. } => (CONTROL_CHANGE << 4) | channel.value(),
            Self::ProgramChange { channel, .. } => (PROGRAM_CHANGE << 4) | channel.value(),
            Self::ChannelPressure { channel, .. } => (CHANNEL_PRESSURE << 4) | channel.value(),
            Self::PitchBend { channel, .. } => (PITCH_BEND << 4) | channel.value(),
            Self::Meta(_) => META_STATUS,
            Self::SysEx(sysex) => sysex.status_byte(),
        }
    }

    /// The channel this event addresses, for channel-voice events.
    pub const fn channel(&self) -> Option<Channel> {
        match self {
            Self::NoteOff { channel, .. }
            | Self::NoteOn { channel, .. }
            | Self::PolyKeyPressure { channel, .. }
            | Self::ControlChange { channel, .. }
            | Self::ProgramChange { channel, .. }
            | Self::ChannelPressure { channel, .. }
            | Self::PitchBend { channel, .. } => Some(*channel),
            Self::Meta(_) | Self::SysEx(_) => None,
        }
    }

    /// True for the end-of-track meta event.
    pub const fn is_end_of_track(&self) -> bool {
        match self {
            Self::Meta(meta) => meta.is_end_of_track(),
            _ => false,
        }
    }
}

/// Read one channel-voice data byte, consuming the pending first byte when
/// running status left one behind.
fn data_byte(reader: &mut Reader, pending: &mut Option<u8>) -> DecodeResult<DataByte> {
    let byte = match pending.take() {
        Some(byte) => byte,
        None => reader.read_u8()?,
    };
    if byte > 0x7F {
        return Err(reader.err(ErrorKind::MalformedEvent(byte)));
    }
    Ok(DataByte::new_unchecked(byte))
}

fn write_payload(out: &mut Vec<u8>, data: &[u8]) -> EncodeResult<()> {
    let length = u32::try_from(data.len()).map_err(|_| ErrorKind::Overflow)?;
    write_vlq(out, length);
    out.extend_from_slice(data);
    Ok(())
}

#[doc = r#"
The running-status slot for one track pass.

Remembers the most recent channel-voice status byte so a repeated status
may be omitted on the wire. The slot is scoped to a single track
decode or encode pass; it is never shared across tracks or stored beyond
one call chain.
"#]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunningStatus(Option<u8>);

impl RunningStatus {
    /// An empty slot; no status byte has been seen yet.
    pub const fn new() -> Self {
        Self(None)
    }

    /// The stored status byte, if any.
    pub const fn get(&self) -> Option<u8> {
        self.0
    }

    pub(crate) fn set(&mut self, status: u8) {
        self.0 = Some(status);
    }

    pub(crate) fn clear(&mut self) {
        self.0 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn note_on(channel: u8, key: u8, velocity: u8) -> Event {
        Event::NoteOn {
            channel: Channel::new(channel).unwrap(),
            key: DataByte::new(key).unwrap(),
            velocity: DataByte::new(velocity).unwrap(),
        }
    }

    fn decode_events(bytes: &[u8], count: usize) -> Vec<TrackEvent> {
        let mut reader = Reader::new(bytes);
        let mut running = RunningStatus::new();
        (0..count)
            .map(|_| TrackEvent::read(&mut reader, &mut running).unwrap())
            .collect()
    }

    #[test]
    fn decode_note_on() {
        let events = decode_events(&[0x64, 0x93, 0x3C, 0x40], 1);
        assert_eq!(events[0].delta, 100);
        assert_eq!(events[0].event, note_on(3, 0x3C, 0x40));
    }

    #[test]
    fn running_status_reuses_the_stored_status() {
        // second event omits the 0x90 status byte
        let events = decode_events(&[0x00, 0x90, 0x3C, 0x64, 0x10, 0x40, 0x64], 2);
        assert_eq!(events[0].event, note_on(0, 0x3C, 0x64));
        assert_eq!(events[1].delta, 0x10);
        assert_eq!(events[1].event, note_on(0, 0x40, 0x64));
    }

    #[test]
    fn data_byte_with_no_stored_status() {
        let mut reader = Reader::new(&[0x00, 0x3C, 0x64]);
        let mut running = RunningStatus::new();
        let err = TrackEvent::read(&mut reader, &mut running).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::UnknownStatus(0x3C));
    }

    #[test]
    fn meta_resets_running_status() {
        // note on, then text meta, then a status-less data byte
        let bytes = [
            0x00, 0x90, 0x3C, 0x64, // note on
            0x00, 0xFF, 0x01, 0x02, b'h', b'i', // meta text "hi"
            0x00, 0x3C, 0x00, // would need running status
        ];
        let mut reader = Reader::new(&bytes);
        let mut running = RunningStatus::new();
        TrackEvent::read(&mut reader, &mut running).unwrap();
        let meta = TrackEvent::read(&mut reader, &mut running).unwrap();
        assert_eq!(
            meta.event,
            Event::Meta(MetaEvent::new(0x01, b"hi".to_vec()))
        );
        let err = TrackEvent::read(&mut reader, &mut running).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::UnknownStatus(0x3C));
    }

    #[test]
    fn sysex_decodes_and_resets_running_status() {
        let bytes = [0x00, 0xF0, 0x03, 0x43, 0x12, 0x00];
        let events = decode_events(&bytes, 1);
        assert_eq!(
            events[0].event,
            Event::SysEx(SysExEvent::new(
                SysExKind::Normal,
                [0x43, 0x12, 0x00].to_vec()
            ))
        );
    }

    #[test]
    fn unknown_status_nibble() {
        // F4 is undefined in SMF streams
        let mut reader = Reader::new(&[0x00, 0xF4, 0x00]);
        let mut running = RunningStatus::new();
        let err = TrackEvent::read(&mut reader, &mut running).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::UnknownStatus(0xF4));
    }

    #[test]
    fn malformed_data_byte() {
        let mut reader = Reader::new(&[0x00, 0x90, 0x3C, 0x90]);
        let mut running = RunningStatus::new();
        let err = TrackEvent::read(&mut reader, &mut running).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::MalformedEvent(0x90));
    }

    #[test]
    fn truncated_payload() {
        let mut reader = Reader::new(&[0x00, 0xFF, 0x51, 0x03, 0x07]);
        let mut running = RunningStatus::new();
        let err = TrackEvent::read(&mut reader, &mut running).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::TruncatedData);
    }

    #[test]
    fn encode_emits_status_by_default() {
        let mut out = Vec::new();
        let mut running = RunningStatus::new();
        for event in [note_on(0, 0x3C, 0x64), note_on(0, 0x40, 0x64)] {
            TrackEvent { delta: 0, event }
                .write(&mut out, &mut running, false)
                .unwrap();
        }
        assert_eq!(out, [0x00, 0x90, 0x3C, 0x64, 0x00, 0x90, 0x40, 0x64]);
    }

    #[test]
    fn encode_compressed_omits_repeated_status() {
        let mut out = Vec::new();
        let mut running = RunningStatus::new();
        for event in [
            note_on(0, 0x3C, 0x64),
            note_on(0, 0x40, 0x64),
            // different channel forces a fresh status byte
            note_on(1, 0x40, 0x64),
        ] {
            TrackEvent { delta: 0, event }
                .write(&mut out, &mut running, true)
                .unwrap();
        }
        assert_eq!(
            out,
            [0x00, 0x90, 0x3C, 0x64, 0x00, 0x40, 0x64, 0x00, 0x91, 0x40, 0x64]
        );
    }

    #[test]
    fn compressed_stream_decodes_to_the_original_events() {
        let original = [note_on(5, 0x30, 0x20), note_on(5, 0x32, 0x21)];
        let mut out = Vec::new();
        let mut running = RunningStatus::new();
        for event in &original {
            TrackEvent {
                delta: 1,
                event: event.clone(),
            }
            .write(&mut out, &mut running, true)
            .unwrap();
        }

        let decoded = decode_events(&out, 2);
        assert_eq!(decoded[0].event, original[0]);
        assert_eq!(decoded[1].event, original[1]);
    }

    #[test]
    fn meta_between_voice_events_interrupts_compression() {
        let mut out = Vec::new();
        let mut running = RunningStatus::new();
        let events = [
            note_on(0, 0x3C, 0x64),
            Event::Meta(MetaEvent::new(0x06, b"m".to_vec())),
            note_on(0, 0x40, 0x64),
        ];
        for event in events {
            TrackEvent { delta: 0, event }
                .write(&mut out, &mut running, true)
                .unwrap();
        }
        // the second note on must re-emit 0x90
        assert_eq!(
            out,
            [0x00, 0x90, 0x3C, 0x64, 0x00, 0xFF, 0x06, 0x01, b'm', 0x00, 0x90, 0x40, 0x64]
        );
    }

    #[test]
    fn program_change_takes_one_data_byte() {
        let events = decode_events(&[0x00, 0xC2, 0x15, 0x00, 0xD2, 0x44], 2);
        assert_eq!(
            events[0].event,
            Event::ProgramChange {
                channel: Channel::new(2).unwrap(),
                program: DataByte::new(0x15).unwrap(),
            }
        );
        assert_eq!(
            events[1].event,
            Event::ChannelPressure {
                channel: Channel::new(2).unwrap(),
                pressure: DataByte::new(0x44).unwrap(),
            }
        );
    }

    #[test]
    fn pitch_bend_round_trip() {
        let event = Event::PitchBend {
            channel: Channel::new(7).unwrap(),
            lsb: DataByte::new(0x00).unwrap(),
            msb: DataByte::new(0x40).unwrap(),
        };
        let mut out = Vec::new();
        let mut running = RunningStatus::new();
        TrackEvent {
            delta: 0,
            event: event.clone(),
        }
        .write(&mut out, &mut running, false)
        .unwrap();
        assert_eq!(out, [0x00, 0xE7, 0x00, 0x40]);
        assert_eq!(decode_events(&out, 1)[0].event, event);
    }
}
