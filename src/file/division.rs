use crate::error::ErrorKind;

/// The header time-division field.
///
/// This is either the number of ticks per quarter note or the alternative
/// SMPTE frame-based form. The high bit of the raw u16 discriminates the
/// two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Division {
    /// Delta-times count ticks of a quarter note; 15-bit value.
    TicksPerQuarterNote(u16),
    /// Delta-times count subdivisions of an SMPTE frame.
    Smpte {
        /// The frame rate.
        fps: SmpteFps,
        /// Ticks per frame (typically 4, 8, 10, 80 or 100).
        ticks_per_frame: u8,
    },
}

impl Division {
    /// Interpret the raw division field of a header chunk.
    ///
    /// # Errors
    /// [`ErrorKind::InvalidSmpteFps`] when the high bit is set but the
    /// negated frame rate is not one of 24, 25, 29 or 30.
    pub fn from_raw(raw: u16) -> Result<Self, ErrorKind> {
        if raw & 0x8000 == 0 {
            return Ok(Self::TicksPerQuarterNote(raw));
        }
        // Bits 14 thru 8 hold one of -24, -25, -29, -30
        let byte = (raw >> 8) as u8 as i8;
        let Some(fps) = SmpteFps::from_raw(byte) else {
            return Err(ErrorKind::InvalidSmpteFps(byte));
        };
        Ok(Self::Smpte {
            fps,
            ticks_per_frame: (raw & 0x00FF) as u8,
        })
    }

    /// Produce the raw division field for a header chunk.
    ///
    /// # Errors
    /// [`ErrorKind::ValueRange`] when a ticks-per-quarter-note value uses
    /// the discriminating high bit.
    pub fn to_raw(&self) -> Result<u16, ErrorKind> {
        match *self {
            Self::TicksPerQuarterNote(tpqn) => {
                if tpqn > 0x7FFF {
                    return Err(ErrorKind::ValueRange {
                        value: tpqn as u32,
                        bits: 15,
                    });
                }
                Ok(tpqn)
            }
            Self::Smpte {
                fps,
                ticks_per_frame,
            } => Ok(((fps.as_raw() as u8 as u16) << 8) | ticks_per_frame as u16),
        }
    }

    /// Returns Some if the division is ticks per quarter note.
    pub const fn ticks_per_quarter_note(&self) -> Option<u16> {
        match self {
            Self::TicksPerQuarterNote(tpqn) => Some(*tpqn),
            _ => None,
        }
    }
}

/// The possible frame rates of an SMPTE division.
///
/// The MIDI specification defines only four: 24 fps (film), 25 fps
/// (PAL/SECAM), 29.97 fps (NTSC drop-frame) and 30 fps (NTSC
/// black & white).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SmpteFps {
    /// 24 frames per second.
    TwentyFour,
    /// 25 frames per second.
    TwentyFive,
    /// 29.97 frames per second (30000/1001, drop-frame timecode).
    TwentyNine,
    /// 30 frames per second.
    Thirty,
}

impl SmpteFps {
    /// Map the negated frame-rate byte of the division field.
    pub const fn from_raw(byte: i8) -> Option<Self> {
        match byte {
            -24 => Some(Self::TwentyFour),
            -25 => Some(Self::TwentyFive),
            -29 => Some(Self::TwentyNine),
            -30 => Some(Self::Thirty),
            _ => None,
        }
    }

    /// The negated frame-rate byte stored in the division field.
    ///
    /// Note that drop-frame 29.97 fps is stored as -29 even though its
    /// nominal rate is 30.
    pub const fn as_raw(&self) -> i8 {
        match self {
            Self::TwentyFour => -24,
            Self::TwentyFive => -25,
            Self::TwentyNine => -29,
            Self::Thirty => -30,
        }
    }

    /// The precise frame rate, including the fractional drop-frame rate.
    pub const fn as_f64(&self) -> f64 {
        match self {
            Self::TwentyFour => 24.,
            Self::TwentyFive => 25.,
            Self::TwentyNine => DROP_FRAME,
            Self::Thirty => 30.,
        }
    }
}

/// The precise value for NTSC drop-frame rate: 29.97002997... fps
const DROP_FRAME: f64 = 30_000. / 1001.;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ticks_per_quarter_note_round_trip() {
        let division = Division::from_raw(220).unwrap();
        assert_eq!(division, Division::TicksPerQuarterNote(220));
        assert_eq!(division.to_raw().unwrap(), 220);
    }

    #[test]
    fn smpte_round_trip() {
        // -29 << 8 | 40
        let raw = 0xE328;
        let division = Division::from_raw(raw).unwrap();
        assert_eq!(
            division,
            Division::Smpte {
                fps: SmpteFps::TwentyNine,
                ticks_per_frame: 40,
            }
        );
        assert_eq!(division.to_raw().unwrap(), raw);
    }

    #[test]
    fn invalid_smpte_fps() {
        let err = Division::from_raw(0xE428).unwrap_err();
        assert_eq!(err, ErrorKind::InvalidSmpteFps(-28));
    }

    #[test]
    fn tpqn_high_bit_rejected_on_encode() {
        let division = Division::TicksPerQuarterNote(0x8000);
        assert_eq!(
            division.to_raw().unwrap_err(),
            ErrorKind::ValueRange {
                value: 0x8000,
                bits: 15,
            }
        );
    }
}
