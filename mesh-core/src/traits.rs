//! Plattform-Traits
//!
//! Schmale Schnittstellen zur Mesh-Plattform (Timer, Sensor, Publish,
//! Anzeige, Node-Steuerung) ohne konkrete Implementierung.
//!
//! # Implementierungen
//! - **Production:** `FirmwarePlatform` (ESP32-C6, embassy + MQTT)
//! - **Testing:** `MockPlatform` (in-memory Mock)

use crate::payload::Reading;
use crate::types::TimerId;

/// Fehler beim Lesen des Sensors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Noch keine Messung vorhanden
    NotReady,
    ReadFailed,
}

/// Fehler der Mesh-Plattform beim Publish
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshError {
    /// Status-Code != OK von der Plattform
    Status(u32),
    /// Ausgangs-Queue voll
    QueueFull,
}

/// Timer der Plattform
///
/// Ein Handle pro [`TimerId`]. `start` ersetzt einen laufenden Timer
/// mit derselben Id.
pub trait IntervalTimer {
    fn start(&mut self, timer: TimerId, period_ms: u32, repeating: bool);

    /// Stoppt den Timer. Ein bereits gestoppter Timer ist kein Fehler.
    fn stop(&mut self, timer: TimerId);
}

/// Temperatur/Luftfeuchte-Sensor
///
/// Darf nicht blockieren.
pub trait SensorSource {
    fn read(&mut self) -> Result<Reading, SensorError>;
}

/// Vendor-Model Publish
///
/// Zwei Schritte wie in der Plattform-API: erst Publication setzen,
/// dann publishen. Beide dürfen nicht blockieren.
pub trait MeshPublisher {
    fn set_publication(&mut self, opcode: u8, payload: &[u8]) -> Result<(), MeshError>;

    fn publish(&mut self) -> Result<(), MeshError>;
}

/// Textanzeige (LCD-Zeilen)
pub trait StatusDisplay {
    fn show(&mut self, row: u8, text: &str);
}

/// Node-Steuerung für Factory Reset
pub trait NodeControl {
    /// Löscht Provisioning-Daten des Nodes
    fn reset_node(&mut self);

    fn reboot(&mut self);
}

/// Alle Plattform-Dienste die ein Node braucht
pub trait NodePlatform:
    IntervalTimer + SensorSource + MeshPublisher + StatusDisplay + NodeControl
{
}

impl<T> NodePlatform for T where
    T: IntervalTimer + SensorSource + MeshPublisher + StatusDisplay + NodeControl
{
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SensorError::NotReady => defmt::write!(fmt, "sensor not ready"),
            SensorError::ReadFailed => defmt::write!(fmt, "sensor read failed"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MeshError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MeshError::Status(code) => defmt::write!(fmt, "status {=u32:#06x}", code),
            MeshError::QueueFull => defmt::write!(fmt, "queue full"),
        }
    }
}
