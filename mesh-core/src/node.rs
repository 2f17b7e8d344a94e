//! Mesh Node: Client- und Server-Rolle hinter einem Event-Einstieg
//!
//! Der gesamte Zustand eines Nodes (Auswahl, Publisher, Duplikat-Cache,
//! Ringpuffer) lebt in einem [`MeshNode`]. Die Plattform serialisiert alle
//! Events auf einen Kontext und ruft [`MeshNode::handle`] auf, es gibt
//! daher keine Locks.

use crate::dedup::{DedupVerdict, ReceiveDeduper};
use crate::payload::{Payload, celsius_milli_to_fahrenheit_milli};
use crate::publisher::PeriodicPublisher;
use crate::ring_store::RingStore;
use crate::selector::{PeriodSelector, SelectorAction, cadence_label, cadence_name};
use crate::traits::NodePlatform;
use crate::types::{
    ButtonEvent, InboundMessage, NodeRole, SENSOR_STATUS_OPCODE, SensorReport, TimerId,
};

/// LCD-Zeile für Tasten-Hinweise
pub const ROW_HINT: u8 = 3;
/// LCD-Zeile für die Auswahl-Aufforderung
pub const ROW_PROMPT: u8 = 4;
/// LCD-Zeile für die gewählte Periode
pub const ROW_VALUE: u8 = 5;

/// Verzögerung zwischen Factory Reset und Reboot
pub const RESET_DELAY_MS: u32 = 100;
/// Untergrenze für die Reset-Verzögerung
pub const MIN_RESET_DELAY_MS: u32 = 10;

pub fn reset_delay_ms(requested_ms: u32) -> u32 {
    requested_ms.max(MIN_RESET_DELAY_MS)
}

/// Events die die Plattform an einen Node liefert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeEvent<'a> {
    /// System-Boot; `button_held` wenn beim Start ein Taster gedrückt war
    Boot { button_held: bool },
    Button(ButtonEvent),
    TimerExpired(TimerId),
    Message(InboundMessage<'a>),
}

/// Ergebnis einer empfangenen Nachricht auf dem Server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// Gleicher Payload wie zuletzt, verworfen
    Duplicate,
    /// Neuer Payload im Ringpuffer, bei `sensor_status` dekodiert
    Stored {
        slot: usize,
        report: Option<SensorReport>,
    },
    /// Payload-Länge != 8, weder verglichen noch gespeichert
    Unframed { opcode: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOutcome {
    Handled,
    /// Event hat in dieser Rolle keine Bedeutung
    Ignored,
    Received(ReceiveOutcome),
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ClientNode {
    selector: PeriodSelector,
    publisher: PeriodicPublisher,
}

impl ClientNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selector(&self) -> &PeriodSelector {
        &self.selector
    }

    pub fn publisher(&self) -> &PeriodicPublisher {
        &self.publisher
    }

    fn on_button<P: NodePlatform>(
        &mut self,
        event: ButtonEvent,
        platform: &mut P,
    ) -> NodeOutcome {
        match self.selector.on_button(event) {
            SelectorAction::PublishOnce => {
                info!("B0 Pressed. Data is sent once.");
                // Fehler sind bereits geloggt
                let _ = self.publisher.publish_reading(platform);
            }
            SelectorAction::EnterSelection { index } | SelectorAction::Moved { index } => {
                show_choice(platform, index);
            }
            SelectorAction::Committed { index, interval } => {
                info!("Mode {} selected.", index);
                info!("Period update time: {}", cadence_label(index));
                self.publisher.configure(interval.to_millis(), platform);
                show_menu(platform);
                info!("Set periodic update done.");
            }
            SelectorAction::Ignored => {
                debug!("Button event ignored");
                return NodeOutcome::Ignored;
            }
        }
        NodeOutcome::Handled
    }

    fn on_tick<P: NodePlatform>(&mut self, platform: &mut P) -> NodeOutcome {
        let _ = self.publisher.on_tick(platform);
        NodeOutcome::Handled
    }
}

fn show_choice<P: NodePlatform>(platform: &mut P, index: usize) {
    platform.show(ROW_HINT, "Hold PB0 to choose");
    platform.show(ROW_PROMPT, "Choose your period update: ");
    platform.show(ROW_VALUE, cadence_name(index));
}

fn show_menu<P: NodePlatform>(platform: &mut P) {
    platform.show(ROW_HINT, "PB0: Public data");
    platform.show(ROW_PROMPT, "PB1: Set period");
}

// ============================================================================
// Server
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ServerNode {
    deduper: ReceiveDeduper,
    store: RingStore,
}

impl ServerNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deduper(&self) -> &ReceiveDeduper {
        &self.deduper
    }

    pub fn store(&self) -> &RingStore {
        &self.store
    }

    pub fn on_message(&mut self, message: InboundMessage<'_>) -> ReceiveOutcome {
        match self.deduper.check(message.payload) {
            DedupVerdict::Duplicate => {
                info!("Duplicate payload detected, skipping processing.");
                ReceiveOutcome::Duplicate
            }
            DedupVerdict::Unframed => {
                log_message(&message);
                if message.opcode == SENSOR_STATUS_OPCODE {
                    warn!(
                        "sensor_status with {} bytes, expected 8. Not decoded.",
                        message.payload.len()
                    );
                }
                ReceiveOutcome::Unframed {
                    opcode: message.opcode,
                }
            }
            DedupVerdict::Fresh(payload) => {
                let slot = self.store.push(payload.fold());
                info!("New data stored in slot {}.", slot);
                log_message(&message);

                let report = if message.opcode == SENSOR_STATUS_OPCODE {
                    Some(report_reading(&payload))
                } else {
                    info!("Opcode {=u8:#x} not decoded.", message.opcode);
                    None
                };
                ReceiveOutcome::Stored { slot, report }
            }
        }
    }
}

fn log_message(message: &InboundMessage<'_>) {
    info!(
        "Vendor model data received. src: {=u16:#06x}, dst: {=u16:#06x}, opcode: {=u8:#04x}, payload: {=[u8]:x}",
        message.source,
        message.destination,
        message.opcode,
        message.payload
    );
}

fn report_reading(payload: &Payload) -> SensorReport {
    let reading = payload.decode();
    let fahrenheit_milli = celsius_milli_to_fahrenheit_milli(reading.temperature);

    info!(
        "Temperature = {}.{} Celsius",
        reading.temperature / 1000,
        (reading.temperature % 1000).unsigned_abs()
    );
    info!(
        "Temperature = {}.{} Fahrenheit",
        fahrenheit_milli / 1000,
        (fahrenheit_milli % 1000).unsigned_abs()
    );
    info!("Humidity = {} %", reading.humidity / 1000);

    SensorReport {
        reading,
        fahrenheit_milli,
    }
}

// ============================================================================
// Role dispatch
// ============================================================================

/// Ein Node in seiner Rolle
#[derive(Debug, Clone)]
pub enum MeshNode {
    Client(ClientNode),
    Server(ServerNode),
}

impl MeshNode {
    pub fn new(role: NodeRole) -> Self {
        match role {
            NodeRole::Client => MeshNode::Client(ClientNode::new()),
            NodeRole::Server => MeshNode::Server(ServerNode::new()),
        }
    }

    pub fn role(&self) -> NodeRole {
        match self {
            MeshNode::Client(_) => NodeRole::Client,
            MeshNode::Server(_) => NodeRole::Server,
        }
    }

    /// Einziger Einstiegspunkt für alle Plattform-Events
    pub fn handle<P: NodePlatform>(
        &mut self,
        event: NodeEvent<'_>,
        platform: &mut P,
    ) -> NodeOutcome {
        match (self, event) {
            (node, NodeEvent::Boot { button_held }) => node.on_boot(button_held, platform),
            (_, NodeEvent::TimerExpired(TimerId::DelayedReset)) => {
                platform.reboot();
                NodeOutcome::Handled
            }
            (MeshNode::Client(client), NodeEvent::Button(event)) => {
                client.on_button(event, platform)
            }
            (MeshNode::Client(client), NodeEvent::TimerExpired(TimerId::PeriodicUpdate)) => {
                client.on_tick(platform)
            }
            (MeshNode::Server(server), NodeEvent::Message(message)) => {
                NodeOutcome::Received(server.on_message(message))
            }
            _ => NodeOutcome::Ignored,
        }
    }

    fn on_boot<P: NodePlatform>(&mut self, button_held: bool, platform: &mut P) -> NodeOutcome {
        if button_held {
            info!("Factory reset");
            platform.reset_node();
            platform.start(
                TimerId::DelayedReset,
                reset_delay_ms(RESET_DELAY_MS),
                false,
            );
            return NodeOutcome::Handled;
        }

        match self {
            MeshNode::Client(_) => {
                info!("Client Device");
                show_menu(platform);
            }
            MeshNode::Server(_) => info!("Server Device"),
        }
        NodeOutcome::Handled
    }
}
