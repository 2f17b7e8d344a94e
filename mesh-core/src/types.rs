//! Core Types für Mesh Sensor Nodes
//!
//! Datenstrukturen ohne Hardware-Dependencies

use crate::payload::Reading;

/// Opcode der Vendor-Model Sensor-Nachricht
pub const SENSOR_STATUS_OPCODE: u8 = 0x01;

/// Taster auf dem Board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// PB0: Daten senden / in der Auswahl vorwärts / Auswahl bestätigen
    Pb0 = 0,
    /// PB1: Periode wählen / in der Auswahl zurück
    Pb1 = 1,
}

impl core::convert::TryFrom<u8> for Button {
    type Error = ();

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Button::Pb0),
            1 => Ok(Button::Pb1),
            _ => Err(()),
        }
    }
}

/// Dauer-Klasse eines Tastendrucks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressDuration {
    /// < 250 ms
    Short,
    /// 250 ms .. 1 s
    Medium,
    /// 1 s .. 5 s
    Long,
    /// >= 5 s
    VeryLong,
}

impl PressDuration {
    pub const MEDIUM_FROM_MS: u64 = 250;
    pub const LONG_FROM_MS: u64 = 1_000;
    pub const VERY_LONG_FROM_MS: u64 = 5_000;

    /// Klassifiziert eine gemessene Haltedauer
    pub fn from_held_ms(held_ms: u64) -> Self {
        match held_ms {
            ms if ms < Self::MEDIUM_FROM_MS => PressDuration::Short,
            ms if ms < Self::LONG_FROM_MS => PressDuration::Medium,
            ms if ms < Self::VERY_LONG_FROM_MS => PressDuration::Long,
            _ => PressDuration::VeryLong,
        }
    }
}

/// Entprellter Tastendruck vom Button-Treiber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    pub button: Button,
    pub duration: PressDuration,
}

impl ButtonEvent {
    pub const fn new(button: Button, duration: PressDuration) -> Self {
        Self { button, duration }
    }
}

/// Die zwei Timer-Handles eines Nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerId {
    /// Wiederholender Timer für periodische Sensor-Updates
    PeriodicUpdate,
    /// Einmaliger Timer für den Reboot nach Factory Reset
    DelayedReset,
}

/// Rolle eines Nodes im Mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Liest den Sensor und published
    Client,
    /// Empfängt, filtert Duplikate und zeigt an
    Server,
}

impl core::convert::TryFrom<&str> for NodeRole {
    type Error = ();

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        match name {
            "client" | "Client" => Ok(NodeRole::Client),
            "server" | "Server" => Ok(NodeRole::Server),
            _ => Err(()),
        }
    }
}

/// Eingehende Vendor-Model Nachricht
///
/// Adressen werden nur geloggt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InboundMessage<'a> {
    pub opcode: u8,
    pub source: u16,
    pub destination: u16,
    pub payload: &'a [u8],
}

/// Dekodierter Sensor-Status für Anzeige/Log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReport {
    pub reading: Reading,
    /// Temperatur in milli-°F
    pub fahrenheit_milli: i32,
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for ButtonEvent {
    fn format(&self, fmt: defmt::Formatter) {
        let button = match self.button {
            Button::Pb0 => "PB0",
            Button::Pb1 => "PB1",
        };
        let duration = match self.duration {
            PressDuration::Short => "short",
            PressDuration::Medium => "medium",
            PressDuration::Long => "long",
            PressDuration::VeryLong => "very long",
        };
        defmt::write!(fmt, "{} {}", button, duration)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimerId {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            TimerId::PeriodicUpdate => defmt::write!(fmt, "PeriodicUpdate"),
            TimerId::DelayedReset => defmt::write!(fmt, "DelayedReset"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for NodeRole {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            NodeRole::Client => defmt::write!(fmt, "Client"),
            NodeRole::Server => defmt::write!(fmt, "Server"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorReport {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "SensorReport {{ {}, fahrenheit: {} mdegF }}",
            self.reading,
            self.fahrenheit_milli
        )
    }
}
