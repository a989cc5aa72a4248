use alloc::vec::Vec;
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
A system-exclusive event: `F0`/`F7` + VLQ length + opaque payload.

The payload is vendor-defined and carried untouched. `F0` starts a normal
sysex transmission; `F7` is the escape form, used for continuation packets
and raw byte runs.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SysExEvent {
    kind: SysExKind,
    data: Vec<u8>,
}

impl SysExEvent {
    /// Create a sysex event from its status form and payload.
    pub const fn new(kind: SysExKind, data: Vec<u8>) -> Self {
        Self { kind, data }
    }

    /// The status form, `F0` or `F7`.
    pub const fn kind(&self) -> SysExKind {
        self.kind
    }

    /// The status byte this event emits on the wire.
    pub const fn status_byte(&self) -> u8 {
        self.kind as u8
    }

    /// The payload bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// The two system-exclusive status forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SysExKind {
    /// `F0`: a complete (or initial) sysex transmission.
    Normal = 0xF0,
    /// `F7`: the escape form; continuation packets or arbitrary bytes.
    Escape = 0xF7,
}
