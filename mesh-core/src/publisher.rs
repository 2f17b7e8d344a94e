//! Periodisches Publishen von Sensor-Daten
//!
//! Der Publisher steuert den `PeriodicUpdate`-Timer und sendet bei jedem
//! Tick einen frischen Messwert. Fehler werden geloggt und nicht
//! wiederholt, der nächste Tick ersetzt einen fehlgeschlagenen.

use crate::payload::{Payload, Reading};
use crate::traits::{IntervalTimer, MeshError, MeshPublisher, SensorSource};
use crate::types::{SENSOR_STATUS_OPCODE, TimerId};

#[derive(Debug, Clone)]
pub struct PeriodicPublisher {
    opcode: u8,
    period_ms: Option<u32>,
}

impl Default for PeriodicPublisher {
    fn default() -> Self {
        Self::new(SENSOR_STATUS_OPCODE)
    }
}

impl PeriodicPublisher {
    pub const fn new(opcode: u8) -> Self {
        Self {
            opcode,
            period_ms: None,
        }
    }

    /// Aktive Periode, `None` wenn periodische Updates aus sind
    pub fn period_ms(&self) -> Option<u32> {
        self.period_ms
    }

    /// Stoppt den laufenden Timer und startet ihn mit neuer Periode.
    ///
    /// `0` lässt den Timer gestoppt.
    pub fn configure<T: IntervalTimer>(&mut self, duration_ms: u32, timer: &mut T) {
        timer.stop(TimerId::PeriodicUpdate);

        if duration_ms > 0 {
            timer.start(TimerId::PeriodicUpdate, duration_ms, true);
            self.period_ms = Some(duration_ms);
            info!("Periodic update every {} ms", duration_ms);
        } else {
            self.period_ms = None;
            info!("Periodic update stopped.");
        }
    }

    /// Timer-Tick: Messwert lesen und publishen
    pub fn on_tick<P>(&self, platform: &mut P) -> Result<Payload, MeshError>
    where
        P: SensorSource + MeshPublisher,
    {
        info!("New data update");
        self.publish_reading(platform)
    }

    /// Liest den Sensor, kodiert und published genau einmal
    pub fn publish_reading<P>(&self, platform: &mut P) -> Result<Payload, MeshError>
    where
        P: SensorSource + MeshPublisher,
    {
        let payload = Payload::encode(sample(platform));

        if let Err(e) = platform.set_publication(self.opcode, payload.as_bytes()) {
            error!("Set publication error: {}", e);
            return Err(e);
        }
        debug!("Set publication done. Publishing...");

        if let Err(e) = platform.publish() {
            error!("Publish error: {}", e);
            return Err(e);
        }
        info!("Publish done.");

        Ok(payload)
    }
}

/// Liest den Sensor, bei Fehler ein Null-Messwert
pub fn sample<S: SensorSource>(sensor: &mut S) -> Reading {
    match sensor.read() {
        Ok(reading) => reading,
        Err(e) => {
            warn!("Error while reading sensor ({}). Clear the buffer.", e);
            Reading::ZERO
        }
    }
}
