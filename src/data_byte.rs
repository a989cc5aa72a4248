use crate::error::ErrorKind;
use core::fmt;

#[doc = r#"
A 7-bit MIDI data byte.

Every data byte of a channel-voice event (key, velocity, controller number,
program, pressure, pitch-bend halves) must leave its high bit clear. The
check lives here once; every decode and encode boundary goes through it.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataByte(pub(crate) u8);

impl DataByte {
    /// Create a new data byte, checking that the high bit is clear.
    pub const fn new(byte: u8) -> Result<Self, ErrorKind> {
        if byte > 0x7F {
            return Err(ErrorKind::ValueRange {
                value: byte as u32,
                bits: 7,
            });
        }
        Ok(Self(byte))
    }

    /// Create a data byte without checking the high bit.
    pub const fn new_unchecked(byte: u8) -> Self {
        Self(byte)
    }

    /// Returns the underlying byte.
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DataByte {
    type Error = ErrorKind;
    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::new(byte)
    }
}

impl From<DataByte> for u8 {
    fn from(byte: DataByte) -> Self {
        byte.0
    }
}

impl fmt::Display for DataByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[doc = r#"
A MIDI channel, `0`-`15`.

Stored as the low nibble of a channel-voice status byte.
"#]
#[derive(Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Channel(pub(crate) u8);

impl Channel {
    /// Create a new channel, checking that the value fits in a nibble.
    pub const fn new(channel: u8) -> Result<Self, ErrorKind> {
        if channel > 0xF {
            return Err(ErrorKind::ValueRange {
                value: channel as u32,
                bits: 4,
            });
        }
        Ok(Self(channel))
    }

    /// Create a channel without checking the nibble range.
    pub const fn new_unchecked(channel: u8) -> Self {
        Self(channel)
    }

    /// Returns the channel number.
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Channel {
    type Error = ErrorKind;
    fn try_from(channel: u8) -> Result<Self, Self::Error> {
        Self::new(channel)
    }
}

impl From<Channel> for u8 {
    fn from(channel: Channel) -> Self {
        channel.0
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[test]
fn data_byte_bounds() {
    use pretty_assertions::assert_eq;
    assert_eq!(DataByte::new(0x7F).unwrap().value(), 0x7F);
    assert_eq!(
        DataByte::new(0x80).unwrap_err(),
        ErrorKind::ValueRange {
            value: 0x80,
            bits: 7
        }
    );
}

#[test]
fn channel_bounds() {
    use pretty_assertions::assert_eq;
    assert_eq!(Channel::new(15).unwrap().value(), 15);
    assert_eq!(
        Channel::new(16).unwrap_err(),
        ErrorKind::ValueRange { value: 16, bits: 4 }
    );
}
