#![doc = r#"
The variable-length quantity (VLQ) integer encoding.

Delta-times and meta/sysex payload lengths are stored as a run of bytes
carrying 7 payload bits each, most significant group first, with the high
bit of every byte except the last set as a continuation flag. The format
caps values at the unsigned 32-bit range.
"#]

use crate::{
    error::{DecodeResult, ErrorKind},
    reader::Reader,
};
use alloc::vec::Vec;

/// Decode one variable-length quantity from the stream.
///
/// # Errors
/// [`ErrorKind::TruncatedData`] if the stream ends before a byte with a
/// clear high bit, [`ErrorKind::Overflow`] if the accumulated value would
/// exceed `u32::MAX`.
pub fn read_vlq(reader: &mut Reader) -> DecodeResult<u32> {
    let mut value: u32 = 0;
    loop {
        let byte = reader.read_u8()?;
        if value > u32::MAX >> 7 {
            return Err(reader.err(ErrorKind::Overflow));
        }
        value = (value << 7) | u32::from(byte & 0x7F);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
}

/// Encode a value as a variable-length quantity.
///
/// Emits the minimum number of 7-bit groups; zero encodes as a single
/// `0x00` byte. Negative inputs are unrepresentable by type.
pub fn write_vlq(out: &mut Vec<u8>, mut value: u32) {
    // low group first, then emitted in reverse
    let mut groups = [0u8; 5];
    let mut count = 0;
    loop {
        groups[count] = (value & 0x7F) as u8;
        count += 1;
        value >>= 7;
        if value == 0 {
            break;
        }
    }
    for i in (0..count).rev() {
        let continuation = if i == 0 { 0 } else { 0x80 };
        out.push(groups[i] | continuation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn encoded(value: u32) -> Vec<u8> {
        let mut out = Vec::new();
        write_vlq(&mut out, value);
        out
    }

    #[test]
    fn known_vectors() {
        assert_eq!(encoded(0x00), [0x00]);
        assert_eq!(encoded(0x7F), [0x7F]);
        assert_eq!(encoded(0x80), [0x81, 0x00]);
        assert_eq!(encoded(100), [0x64]);
        assert_eq!(encoded(1100), [0x88, 0x4C]);
        assert_eq!(encoded(0x3FFF), [0xFF, 0x7F]);
        assert_eq!(encoded(0x0FFF_FFFF), [0xFF, 0xFF, 0xFF, 0x7F]);
        assert_eq!(encoded(u32::MAX), [0x8F, 0xFF, 0xFF, 0xFF, 0x7F]);
    }

    #[test]
    fn round_trip() {
        for value in [
            0,
            1,
            0x7F,
            0x80,
            0x2000,
            0x3FFF,
            0x4000,
            0x1F_FFFF,
            0x20_0000,
            0x0FFF_FFFF,
            0x1000_0000,
            u32::MAX,
        ] {
            let bytes = encoded(value);
            let mut reader = Reader::new(&bytes);
            assert_eq!(read_vlq(&mut reader).unwrap(), value);
            assert_eq!(reader.remaining(), 0);
        }
    }

    #[test]
    fn truncated_sequence() {
        let mut reader = Reader::new(&[0x81, 0x80]);
        let err = read_vlq(&mut reader).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::TruncatedData);
    }

    #[test]
    fn overflow_past_u32() {
        // one bit more than u32::MAX
        let mut reader = Reader::new(&[0x90, 0x80, 0x80, 0x80, 0x00]);
        let err = read_vlq(&mut reader).unwrap_err();
        assert_eq!(*err.kind(), ErrorKind::Overflow);
    }

    #[test]
    fn non_minimal_encoding_is_accepted() {
        let mut reader = Reader::new(&[0x80, 0x80, 0x01]);
        assert_eq!(read_vlq(&mut reader).unwrap(), 1);
    }
}
