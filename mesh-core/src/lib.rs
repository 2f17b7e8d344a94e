//! Mesh Core - Platform-agnostic Logic and Traits
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Codecs, State Machines und die Traits zur Mesh-Plattform.

#![no_std]

// Muss vor den anderen Modulen stehen (Logging-Makros)
mod fmt;

pub mod dedup;
pub mod frame;
pub mod node;
pub mod payload;
pub mod publisher;
pub mod ring_store;
pub mod selector;
pub mod time_codec;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use dedup::{DedupVerdict, ReceiveDeduper};
pub use frame::{FrameError, MeshFrame};
pub use node::{ClientNode, MeshNode, NodeEvent, NodeOutcome, ReceiveOutcome, ServerNode};
pub use payload::{Payload, Reading, celsius_milli_to_fahrenheit_milli};
pub use publisher::PeriodicPublisher;
pub use ring_store::RingStore;
pub use selector::{PERIOD_CANDIDATES, PeriodSelector, SelectorAction, SelectorMode};
pub use time_codec::{Interval, StepResolution, decode_to_millis, encode_step};
pub use traits::{
    IntervalTimer, MeshError, MeshPublisher, NodeControl, NodePlatform, SensorError,
    SensorSource, StatusDisplay,
};
pub use types::{
    Button, ButtonEvent, InboundMessage, NodeRole, PressDuration, SENSOR_STATUS_OPCODE,
    SensorReport, TimerId,
};
