#![doc = r#"
Encoder and decoder for the Standard MIDI File (SMF) format.

# Overview

A Standard MIDI File is a sequence of chunks. The first chunk (`"MThd"`)
declares the file format, the number of tracks and the time division; every
following chunk (`"MTrk"`) carries one track: a run of (delta-time, event)
pairs, where delta-times and meta-event lengths use the variable-length
quantity (VLQ) encoding and consecutive channel-voice events may share a
status byte ("running status").

This crate round-trips that byte layout faithfully:

```rust
use iomidi::prelude::*;

let track = Track::new(vec![
    TrackEvent {
        delta: 100,
        event: Event::NoteOn {
            channel: Channel::new(0).unwrap(),
            key: DataByte::new(60).unwrap(),
            velocity: DataByte::new(100).unwrap(),
        },
    },
    TrackEvent {
        delta: 1100,
        event: Event::NoteOff {
            channel: Channel::new(0).unwrap(),
            key: DataByte::new(60).unwrap(),
            velocity: DataByte::new(0).unwrap(),
        },
    },
    TrackEvent {
        delta: 1,
        event: Event::Meta(MetaEvent::end_of_track()),
    },
]);

let file = MidiFile::new(
    Format::SingleMultiChannel,
    Division::TicksPerQuarterNote(220),
    vec![track],
);

let bytes = file.encode().unwrap();
let decoded = MidiFile::decode(&bytes).unwrap();
assert_eq!(file, decoded);
```

Decoding is strict by default: a missing end-of-track event or a track count
that disagrees with the header is an error. Lenient acceptance is an explicit
opt-in via [`Strictness::Lenient`](prelude::Strictness).
"#]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod chunk;
mod data_byte;
pub use data_byte::*;

pub mod error;
pub mod event;
pub mod file;
pub mod reader;
pub mod vlq;

/// Common re-exports.
pub mod prelude {
    pub use crate::{
        Channel, DataByte,
        chunk::{HEADER_TAG, TRACK_TAG},
        error::{DecodeError, DecodeResult, EncodeError, EncodeResult, ErrorKind},
        event::{Event, MetaEvent, MetaKind, RunningStatus, SysExEvent, SysExKind, TrackEvent},
        file::{Division, EncodeOptions, Format, MidiFile, SmpteFps, Strictness, Track},
        reader::Reader,
    };

    #[cfg(feature = "std")]
    pub use crate::error::IoError;
}
