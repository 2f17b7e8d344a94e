//! Sensor-Payload Codec
//!
//! 8 Bytes auf dem Draht:
//!
//! | Bytes    | Inhalt                       |
//! |----------|------------------------------|
//! | `[0..4)` | Luftfeuchte, milli-%, LSB zuerst |
//! | `[4..8)` | Temperatur, milli-°C, LSB zuerst |
//!
//! `decode` faltet jede Hälfte vom höchsten Index abwärts (MSB zuerst).
//! Zusammen mit dem LSB-first `encode` ergibt das wieder den Ausgangswert.
//! Die Gegenstelle kodiert genauso, die Reihenfolge darf sich nicht ändern.

/// Länge eines Sensor-Payloads in Bytes
pub const PAYLOAD_LEN: usize = 8;

/// Messwert in Festkomma milli-Einheiten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reading {
    /// Relative Luftfeuchte in milli-%
    pub humidity: i32,
    /// Temperatur in milli-°C
    pub temperature: i32,
}

impl Reading {
    /// Nullwert für fehlgeschlagene Sensor-Lesungen
    pub const ZERO: Reading = Reading {
        humidity: 0,
        temperature: 0,
    };

    pub const fn new(humidity: i32, temperature: i32) -> Self {
        Self {
            humidity,
            temperature,
        }
    }
}

/// 8-Byte Wire-Payload eines Messwerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Payload([u8; PAYLOAD_LEN]);

impl Payload {
    pub const ZERO: Payload = Payload([0; PAYLOAD_LEN]);

    pub const fn from_bytes(bytes: [u8; PAYLOAD_LEN]) -> Self {
        Payload(bytes)
    }

    /// Übernimmt ein Slice genau dann wenn es 8 Bytes lang ist
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; PAYLOAD_LEN]>::try_from(bytes).ok().map(Payload)
    }

    pub const fn as_bytes(&self) -> &[u8; PAYLOAD_LEN] {
        &self.0
    }

    /// Kodiert einen Messwert, beide Felder LSB zuerst
    pub fn encode(reading: Reading) -> Self {
        let mut bytes = [0u8; PAYLOAD_LEN];
        let humidity = reading.humidity.to_le_bytes();
        let temperature = reading.temperature.to_le_bytes();
        for i in 0..4 {
            bytes[i] = humidity[i];
            bytes[i + 4] = temperature[i];
        }
        Payload(bytes)
    }

    /// Dekodiert beide Felder, jeweils vom höchsten Byte der Hälfte abwärts
    pub fn decode(&self) -> Reading {
        Reading {
            humidity: fold_descending(&self.0[0..4]),
            temperature: fold_descending(&self.0[4..8]),
        }
    }

    /// Faltet alle 8 Bytes MSB zuerst in einen u64 (Wert für den RingStore)
    pub fn fold(&self) -> u64 {
        self.0
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
    }
}

fn fold_descending(half: &[u8]) -> i32 {
    half.iter()
        .rev()
        .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte)) as i32
}

/// Rechnet milli-°C in milli-°F um.
///
/// Erst auf ganze Grad abschneiden, dann umrechnen: `25999` ergibt
/// dasselbe wie `25000`.
///
/// ```
/// # use mesh_core::payload::celsius_milli_to_fahrenheit_milli;
/// assert_eq!(celsius_milli_to_fahrenheit_milli(25_000), 77_000);
/// ```
pub fn celsius_milli_to_fahrenheit_milli(temperature_milli: i32) -> i32 {
    let celsius = (temperature_milli / 1000) as f32;
    let fahrenheit = (f64::from(celsius) * 1.8 + 32.0) as f32;
    (fahrenheit * 1000.0) as i32
}

#[cfg(feature = "defmt")]
impl defmt::Format for Reading {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "Reading {{ humidity: {} m%, temperature: {} mdegC }}",
            self.humidity,
            self.temperature
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Payload {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=[u8]:x}", &self.0[..])
    }
}
