// Library-Root: Plattform-Anbindung des Mesh-Sensor-Nodes
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Module
pub mod config;
pub mod hal;
pub mod platform;
pub mod tasks;

// Re-exports von mesh-core
pub use mesh_core::{ButtonEvent, MeshFrame, MeshNode, NodeEvent, NodeRole, Reading, TimerId};

use core::cell::Cell;

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::signal::Signal;

use crate::config::{EVENT_QUEUE_DEPTH, OUTBOUND_QUEUE_DEPTH};

// ============================================================================
// Events zum Node-Task
// ============================================================================

/// Alles was der Node-Task verarbeitet
///
/// Besitzt den Frame, damit Events über einen Channel laufen können.
/// [`FirmwareEvent::as_node_event`] leiht ihn für [`MeshNode::handle`].
#[derive(Debug, Clone)]
pub enum FirmwareEvent {
    Button(ButtonEvent),
    TimerExpired(TimerId),
    Message(MeshFrame),
}

impl FirmwareEvent {
    pub fn as_node_event(&self) -> NodeEvent<'_> {
        match self {
            FirmwareEvent::Button(event) => NodeEvent::Button(*event),
            FirmwareEvent::TimerExpired(timer) => NodeEvent::TimerExpired(*timer),
            FirmwareEvent::Message(frame) => NodeEvent::Message(frame.as_inbound()),
        }
    }
}

/// Kommando an einen Timer-Task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    Start { period_ms: u32, repeating: bool },
    Stop,
}

/// Alle Timer-Ids in Slot-Reihenfolge
pub const TIMERS: [TimerId; 2] = [TimerId::PeriodicUpdate, TimerId::DelayedReset];

/// Slot eines Timers in [`TimerSignals`]
pub const fn timer_slot(timer: TimerId) -> usize {
    match timer {
        TimerId::PeriodicUpdate => 0,
        TimerId::DelayedReset => 1,
    }
}

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================

/// Channel für Events (Taster, Timer, MQTT → Node Task)
pub type EventChannel = Channel<NoopRawMutex, FirmwareEvent, EVENT_QUEUE_DEPTH>;

/// Sender für Events, einer pro produzierendem Task
pub type EventSender = Sender<'static, NoopRawMutex, FirmwareEvent, EVENT_QUEUE_DEPTH>;

/// Receiver für Events (nur der Node Task)
pub type EventReceiver = Receiver<'static, NoopRawMutex, FirmwareEvent, EVENT_QUEUE_DEPTH>;

/// Channel für ausgehende Frames (Node Task → MQTT Task)
pub type OutboundChannel = Channel<NoopRawMutex, MeshFrame, OUTBOUND_QUEUE_DEPTH>;

pub type OutboundSender = Sender<'static, NoopRawMutex, MeshFrame, OUTBOUND_QUEUE_DEPTH>;

pub type OutboundReceiver = Receiver<'static, NoopRawMutex, MeshFrame, OUTBOUND_QUEUE_DEPTH>;

/// Steuer-Signal eines Timer-Tasks
/// Das letzte Kommando gewinnt: stop + start ergibt start
pub type TimerSignal = Signal<NoopRawMutex, TimerCommand>;

/// Ein Signal pro Timer-Id, indiziert über [`timer_slot`]
pub type TimerSignals = [TimerSignal; TIMERS.len()];

/// Letzter Sensor-Messwert (None bis zur ersten erfolgreichen Messung)
pub type SampleCell = Mutex<NoopRawMutex, Cell<Option<Reading>>>;
