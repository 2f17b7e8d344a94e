//! Intervall-Codec für periodische Updates
//!
//! Ein Intervall ist ein Byte: die oberen 2 Bits wählen die Schrittweite
//! (100 ms, 1 s, 10 s, 10 min), die unteren 6 Bits den Zähler (0..=63).
//! Format wie "Publish Period" im Mesh Profile (Abschnitt 4.2.2.2).
//!
//! Jedes Byte ist dekodierbar. Ein Zähler von 0 ergibt 0 ms und bedeutet
//! "kein periodisches Update".

/// Maske für die Schrittweiten-Bits
pub const STEP_RES_BIT_MASK: u8 = 0xC0;

/// Maske für den 6-Bit Zähler
pub const COUNT_MASK: u8 = 0x3F;

/// Größter darstellbarer Zähler
pub const MAX_COUNT: u8 = COUNT_MASK;

/// Schrittweite eines Intervalls (obere 2 Bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepResolution {
    Millis100 = 0,
    Seconds1 = 1,
    Seconds10 = 2,
    Minutes10 = 3,
}

impl StepResolution {
    /// Alle Schrittweiten in Bit-Reihenfolge
    pub const ALL: [StepResolution; 4] = [
        StepResolution::Millis100,
        StepResolution::Seconds1,
        StepResolution::Seconds10,
        StepResolution::Minutes10,
    ];

    /// Bits an ihrer Position im Intervall-Byte
    pub const fn bits(self) -> u8 {
        (self as u8) << 6
    }

    /// Länge eines Schritts in Millisekunden
    pub const fn step_millis(self) -> u32 {
        match self {
            StepResolution::Millis100 => 100,
            StepResolution::Seconds1 => 1_000,
            StepResolution::Seconds10 => 10_000,
            StepResolution::Minutes10 => 600_000,
        }
    }

    /// Liest die Schrittweite aus einem Intervall-Byte
    pub const fn from_byte(byte: u8) -> Self {
        match (byte & STEP_RES_BIT_MASK) >> 6 {
            0 => StepResolution::Millis100,
            1 => StepResolution::Seconds1,
            2 => StepResolution::Seconds10,
            _ => StepResolution::Minutes10,
        }
    }
}

/// Kodiert Schrittweite und Zähler in ein Byte.
///
/// Zähler > 63 werden auf 6 Bit maskiert, nicht abgelehnt.
///
/// ```
/// # use mesh_core::time_codec::{encode_step, StepResolution};
/// assert_eq!(encode_step(StepResolution::Seconds1, 10), 0x4A);
/// assert_eq!(encode_step(StepResolution::Millis100, 0x4A), 0x0A);
/// ```
pub const fn encode_step(resolution: StepResolution, count: u8) -> u8 {
    resolution.bits() | (count & COUNT_MASK)
}

/// Dekodiert ein Intervall-Byte in Millisekunden
pub const fn decode_to_millis(byte: u8) -> u32 {
    let count = (byte & COUNT_MASK) as u32;
    StepResolution::from_byte(byte).step_millis() * count
}

/// Typisiertes Intervall-Byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interval(u8);

impl Interval {
    /// `100 ms × 0` - kein periodisches Update
    pub const DISABLED: Interval = Interval(0);

    pub const fn encode(resolution: StepResolution, count: u8) -> Self {
        Interval(encode_step(resolution, count))
    }

    pub const fn from_raw(byte: u8) -> Self {
        Interval(byte)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn resolution(self) -> StepResolution {
        StepResolution::from_byte(self.0)
    }

    pub const fn count(self) -> u8 {
        self.0 & COUNT_MASK
    }

    pub const fn to_millis(self) -> u32 {
        decode_to_millis(self.0)
    }

    /// `true` wenn das Intervall keine Dauer hat (Zähler 0)
    pub const fn is_disabled(self) -> bool {
        self.count() == 0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Interval {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Interval {{ raw: {=u8:#x}, ms: {} }}",
            self.0,
            self.to_millis()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_second_times_ten() {
        let byte = encode_step(StepResolution::Seconds1, 10);
        assert_eq!(decode_to_millis(byte), 10_000);
    }

    #[test]
    fn test_each_resolution() {
        assert_eq!(decode_to_millis(encode_step(StepResolution::Millis100, 10)), 1_000);
        assert_eq!(decode_to_millis(encode_step(StepResolution::Seconds10, 6)), 60_000);
        assert_eq!(decode_to_millis(encode_step(StepResolution::Minutes10, 1)), 600_000);
        assert_eq!(
            decode_to_millis(encode_step(StepResolution::Minutes10, MAX_COUNT)),
            37_800_000
        );
    }

    #[test]
    fn test_zero_count_is_disabled() {
        for resolution in StepResolution::ALL {
            let interval = Interval::encode(resolution, 0);
            assert_eq!(interval.to_millis(), 0);
            assert!(interval.is_disabled());
        }
        assert_eq!(Interval::DISABLED.raw(), 0);
    }

    #[test]
    fn test_count_is_masked() {
        // 64 = 0b0100_0000 → Zähler 0
        assert_eq!(encode_step(StepResolution::Seconds1, 64), StepResolution::Seconds1.bits());
        assert_eq!(encode_step(StepResolution::Millis100, 0xFF), 0x3F);
    }

    #[test]
    fn test_resolution_roundtrip_from_byte() {
        for resolution in StepResolution::ALL {
            let interval = Interval::encode(resolution, 5);
            assert_eq!(interval.resolution(), resolution);
            assert_eq!(interval.count(), 5);
        }
    }

    #[test]
    fn test_every_byte_decodes() {
        for byte in 0..=u8::MAX {
            let expected =
                StepResolution::from_byte(byte).step_millis() * u32::from(byte & COUNT_MASK);
            assert_eq!(decode_to_millis(byte), expected);
        }
    }
}
