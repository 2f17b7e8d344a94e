// Firmware-Plattform: Implementiert die mesh-core Traits auf embassy
//
// Alle Methoden laufen im Node Task und blockieren nicht:
// Timer werden über Signals gesteuert, Sensorwerte kommen aus dem Cache,
// Publishes landen per try_send im Outbound-Channel.

use defmt::{info, warn};
use mesh_core::{
    IntervalTimer, MeshError, MeshFrame, MeshPublisher, NodeControl, Reading, SensorError,
    SensorSource, StatusDisplay, TimerId,
};

use crate::config::PUBLISH_GROUP_ADDRESS;
use crate::{OutboundSender, SampleCell, TimerCommand, TimerSignals, timer_slot};

/// Status-Code: Publish ohne vorherige Publication
pub const STATUS_NO_PUBLICATION: u32 = 0x01;

/// Status-Code: Payload passt nicht in einen Frame
pub const STATUS_PAYLOAD_TOO_LONG: u32 = 0x02;

pub struct FirmwarePlatform {
    address: u16,
    timers: &'static TimerSignals,
    sample: &'static SampleCell,
    outbound: OutboundSender,
    publication: Option<MeshFrame>,
}

impl FirmwarePlatform {
    /// # Parameter
    /// - `address`: Unicast-Adresse dieses Nodes (Quell-Adresse der Frames)
    /// - `timers`: Steuer-Signale der Timer Tasks
    /// - `sample`: Messwert-Cache des Sensor Tasks
    /// - `outbound`: Channel zum MQTT Task
    pub fn new(
        address: u16,
        timers: &'static TimerSignals,
        sample: &'static SampleCell,
        outbound: OutboundSender,
    ) -> Self {
        Self {
            address,
            timers,
            sample,
            outbound,
            publication: None,
        }
    }
}

impl IntervalTimer for FirmwarePlatform {
    fn start(&mut self, timer: TimerId, period_ms: u32, repeating: bool) {
        self.timers[timer_slot(timer)].signal(TimerCommand::Start {
            period_ms,
            repeating,
        });
    }

    fn stop(&mut self, timer: TimerId) {
        self.timers[timer_slot(timer)].signal(TimerCommand::Stop);
    }
}

impl SensorSource for FirmwarePlatform {
    fn read(&mut self) -> Result<Reading, SensorError> {
        self.sample
            .lock(|cell| cell.get())
            .ok_or(SensorError::NotReady)
    }
}

impl MeshPublisher for FirmwarePlatform {
    fn set_publication(&mut self, opcode: u8, payload: &[u8]) -> Result<(), MeshError> {
        let frame = MeshFrame::new(opcode, self.address, PUBLISH_GROUP_ADDRESS, payload)
            .map_err(|_| MeshError::Status(STATUS_PAYLOAD_TOO_LONG))?;
        self.publication = Some(frame);
        Ok(())
    }

    fn publish(&mut self) -> Result<(), MeshError> {
        let frame = self
            .publication
            .take()
            .ok_or(MeshError::Status(STATUS_NO_PUBLICATION))?;
        self.outbound.try_send(frame).map_err(|_| {
            warn!("Outbound queue full, frame dropped");
            MeshError::QueueFull
        })
    }
}

impl StatusDisplay for FirmwarePlatform {
    // Board hat kein LCD
    fn show(&mut self, row: u8, text: &str) {
        info!("LCD[{}]: {}", row, text);
    }
}

impl NodeControl for FirmwarePlatform {
    fn reset_node(&mut self) {
        // Provisioning liegt nur im RAM, Reset verwirft die Publication
        self.publication = None;
        info!("Node reset, publication cleared");
    }

    fn reboot(&mut self) {
        info!("Rebooting...");
        esp_hal::system::software_reset();
    }
}
