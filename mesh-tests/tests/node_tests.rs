//! Integration Tests für Mesh Node Logic
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen MockPlatform

use mesh_core::node::{ROW_HINT, ROW_PROMPT, ROW_VALUE};
use mesh_core::{
    Button, ButtonEvent, InboundMessage, IntervalTimer, MeshError, MeshNode, MeshPublisher,
    NodeControl, NodeEvent, NodeOutcome, NodeRole, Payload, PressDuration, Reading,
    ReceiveOutcome, SENSOR_STATUS_OPCODE, SensorError, SensorSource, StatusDisplay, TimerId,
};

// ============================================================================
// Mock Platform
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCall {
    Start {
        timer: TimerId,
        period_ms: u32,
        repeating: bool,
    },
    Stop(TimerId),
}

#[derive(Default)]
pub struct MockPlatform {
    pub timer_calls: Vec<TimerCall>,
    pub reading: Option<Reading>,
    pub published: Vec<(u8, Vec<u8>)>,
    pending: Option<(u8, Vec<u8>)>,
    pub fail_next_set_publication: bool,
    pub fail_next_publish: bool,
    pub display: Vec<(u8, String)>,
    pub node_resets: usize,
    pub reboots: usize,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reading(humidity: i32, temperature: i32) -> Self {
        Self {
            reading: Some(Reading::new(humidity, temperature)),
            ..Self::default()
        }
    }

    /// Letzter Text in einer LCD-Zeile
    pub fn row(&self, row: u8) -> Option<&str> {
        self.display
            .iter()
            .rev()
            .find(|(r, _)| *r == row)
            .map(|(_, text)| text.as_str())
    }
}

impl IntervalTimer for MockPlatform {
    fn start(&mut self, timer: TimerId, period_ms: u32, repeating: bool) {
        self.timer_calls.push(TimerCall::Start {
            timer,
            period_ms,
            repeating,
        });
    }

    fn stop(&mut self, timer: TimerId) {
        self.timer_calls.push(TimerCall::Stop(timer));
    }
}

impl SensorSource for MockPlatform {
    fn read(&mut self) -> Result<Reading, SensorError> {
        self.reading.ok_or(SensorError::ReadFailed)
    }
}

impl MeshPublisher for MockPlatform {
    fn set_publication(&mut self, opcode: u8, payload: &[u8]) -> Result<(), MeshError> {
        if self.fail_next_set_publication {
            self.fail_next_set_publication = false;
            return Err(MeshError::Status(0x0002));
        }
        self.pending = Some((opcode, payload.to_vec()));
        Ok(())
    }

    fn publish(&mut self) -> Result<(), MeshError> {
        if self.fail_next_publish {
            self.fail_next_publish = false;
            return Err(MeshError::QueueFull);
        }
        match self.pending.clone() {
            Some(message) => {
                self.published.push(message);
                Ok(())
            }
            None => Err(MeshError::Status(0x0001)),
        }
    }
}

impl StatusDisplay for MockPlatform {
    fn show(&mut self, row: u8, text: &str) {
        self.display.push((row, text.to_string()));
    }
}

impl NodeControl for MockPlatform {
    fn reset_node(&mut self) {
        self.node_resets += 1;
    }

    fn reboot(&mut self) {
        self.reboots += 1;
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn press(button: Button, duration: PressDuration) -> NodeEvent<'static> {
    NodeEvent::Button(ButtonEvent::new(button, duration))
}

fn pb0_short() -> NodeEvent<'static> {
    press(Button::Pb0, PressDuration::Short)
}

fn pb1_short() -> NodeEvent<'static> {
    press(Button::Pb1, PressDuration::Short)
}

fn pb0_long() -> NodeEvent<'static> {
    press(Button::Pb0, PressDuration::Long)
}

fn sensor_message(payload: &[u8]) -> NodeEvent<'_> {
    NodeEvent::Message(InboundMessage {
        opcode: SENSOR_STATUS_OPCODE,
        source: 0x0002,
        destination: 0xC001,
        payload,
    })
}

fn client() -> MeshNode {
    MeshNode::new(NodeRole::Client)
}

fn server() -> MeshNode {
    MeshNode::new(NodeRole::Server)
}

fn selector_index(node: &MeshNode) -> usize {
    match node {
        MeshNode::Client(client) => client.selector().index(),
        MeshNode::Server(_) => panic!("Expected client node"),
    }
}

fn store_cursor(node: &MeshNode) -> usize {
    match node {
        MeshNode::Server(server) => server.store().cursor(),
        MeshNode::Client(_) => panic!("Expected server node"),
    }
}

// ============================================================================
// Tests: Client - Publish
// ============================================================================

#[test]
fn test_pb0_short_publishes_once() {
    let mut node = client();
    let mut platform = MockPlatform::with_reading(45_000, 25_000);

    assert_eq!(node.handle(pb0_short(), &mut platform), NodeOutcome::Handled);

    let expected = Payload::encode(Reading::new(45_000, 25_000));
    assert_eq!(
        platform.published,
        vec![(SENSOR_STATUS_OPCODE, expected.as_bytes().to_vec())]
    );
    assert!(platform.timer_calls.is_empty());
}

#[test]
fn test_pb0_medium_also_publishes() {
    let mut node = client();
    let mut platform = MockPlatform::with_reading(1, 2);

    node.handle(press(Button::Pb0, PressDuration::Medium), &mut platform);

    assert_eq!(platform.published.len(), 1);
}

#[test]
fn test_sensor_failure_publishes_zero_payload() {
    let mut node = client();
    let mut platform = MockPlatform::new();

    node.handle(pb0_short(), &mut platform);

    assert_eq!(platform.published, vec![(SENSOR_STATUS_OPCODE, vec![0; 8])]);
}

#[test]
fn test_set_publication_failure_is_not_retried() {
    let mut node = client();
    let mut platform = MockPlatform::with_reading(1, 2);
    platform.fail_next_set_publication = true;

    assert_eq!(node.handle(pb0_short(), &mut platform), NodeOutcome::Handled);
    assert!(platform.published.is_empty());

    // Nächster Druck funktioniert wieder
    node.handle(pb0_short(), &mut platform);
    assert_eq!(platform.published.len(), 1);
}

#[test]
fn test_publish_failure_is_logged_and_ignored() {
    let mut node = client();
    let mut platform = MockPlatform::with_reading(1, 2);
    platform.fail_next_publish = true;

    assert_eq!(
        node.handle(NodeEvent::TimerExpired(TimerId::PeriodicUpdate), &mut platform),
        NodeOutcome::Handled
    );
    assert!(platform.published.is_empty());
}

#[test]
fn test_periodic_tick_publishes_fresh_reading() {
    let mut node = client();
    let mut platform = MockPlatform::with_reading(40_000, 20_000);

    node.handle(NodeEvent::TimerExpired(TimerId::PeriodicUpdate), &mut platform);
    platform.reading = Some(Reading::new(41_000, 21_000));
    node.handle(NodeEvent::TimerExpired(TimerId::PeriodicUpdate), &mut platform);

    assert_eq!(platform.published.len(), 2);
    let last = Payload::from_slice(&platform.published[1].1).unwrap();
    assert_eq!(last.decode(), Reading::new(41_000, 21_000));
}

// ============================================================================
// Tests: Client - Period Selection
// ============================================================================

#[test]
fn test_pb1_enters_selection_and_shows_first_choice() {
    let mut node = client();
    let mut platform = MockPlatform::new();

    node.handle(pb1_short(), &mut platform);

    assert_eq!(platform.row(ROW_HINT), Some("Hold PB0 to choose"));
    assert_eq!(platform.row(ROW_PROMPT), Some("Choose your period update: "));
    assert_eq!(platform.row(ROW_VALUE), Some("1 second"));
    assert!(platform.published.is_empty());
}

#[test]
fn test_selection_intercepts_publish_button() {
    let mut node = client();
    let mut platform = MockPlatform::with_reading(1, 2);

    node.handle(pb1_short(), &mut platform);
    node.handle(pb0_short(), &mut platform);

    assert!(platform.published.is_empty());
    assert_eq!(selector_index(&node), 1);
    assert_eq!(platform.row(ROW_VALUE), Some("10 seconds"));
}

#[test]
fn test_six_advances_visit_expected_indices() {
    let mut node = client();
    let mut platform = MockPlatform::new();
    node.handle(pb1_short(), &mut platform);

    let visited: Vec<usize> = (0..6)
        .map(|_| {
            node.handle(pb0_short(), &mut platform);
            selector_index(&node)
        })
        .collect();

    assert_eq!(visited, vec![1, 2, 3, 4, 0, 1]);
}

#[test]
fn test_retreat_from_zero_shows_no_update() {
    let mut node = client();
    let mut platform = MockPlatform::new();

    node.handle(pb1_short(), &mut platform);
    node.handle(pb1_short(), &mut platform);

    assert_eq!(selector_index(&node), 4);
    assert_eq!(platform.row(ROW_VALUE), Some("No update"));
}

#[test]
fn test_commit_ten_seconds_restarts_timer() {
    let mut node = client();
    let mut platform = MockPlatform::new();

    node.handle(pb1_short(), &mut platform);
    node.handle(pb0_short(), &mut platform);
    node.handle(pb0_long(), &mut platform);

    assert_eq!(
        platform.timer_calls,
        vec![
            TimerCall::Stop(TimerId::PeriodicUpdate),
            TimerCall::Start {
                timer: TimerId::PeriodicUpdate,
                period_ms: 10_000,
                repeating: true,
            },
        ]
    );
    assert_eq!(platform.row(ROW_HINT), Some("PB0: Public data"));
    assert_eq!(platform.row(ROW_PROMPT), Some("PB1: Set period"));
}

#[test]
fn test_commit_no_update_only_stops_timer() {
    let mut node = client();
    let mut platform = MockPlatform::new();

    node.handle(pb1_short(), &mut platform);
    node.handle(pb1_short(), &mut platform);
    node.handle(pb0_long(), &mut platform);

    assert_eq!(
        platform.timer_calls,
        vec![TimerCall::Stop(TimerId::PeriodicUpdate)]
    );
    match &node {
        MeshNode::Client(client) => assert_eq!(client.publisher().period_ms(), None),
        MeshNode::Server(_) => panic!("Expected client node"),
    }
}

#[test]
fn test_pb1_long_while_selecting_is_noop() {
    let mut node = client();
    let mut platform = MockPlatform::new();

    node.handle(pb1_short(), &mut platform);
    node.handle(pb0_short(), &mut platform);
    let outcome = node.handle(press(Button::Pb1, PressDuration::Long), &mut platform);

    assert_eq!(outcome, NodeOutcome::Ignored);
    assert_eq!(selector_index(&node), 1);
    assert!(platform.timer_calls.is_empty());
}

#[test]
fn test_after_commit_pb0_publishes_again() {
    let mut node = client();
    let mut platform = MockPlatform::with_reading(1, 2);

    node.handle(pb1_short(), &mut platform);
    node.handle(pb0_long(), &mut platform);
    node.handle(pb0_short(), &mut platform);

    assert_eq!(platform.published.len(), 1);
}

#[test]
fn test_client_ignores_inbound_messages() {
    let mut node = client();
    let mut platform = MockPlatform::new();

    let outcome = node.handle(sensor_message(&[1, 2, 3, 4, 5, 6, 7, 8]), &mut platform);

    assert_eq!(outcome, NodeOutcome::Ignored);
}

// ============================================================================
// Tests: Server - Receive Pipeline
// ============================================================================

#[test]
fn test_server_decodes_sensor_status() {
    let mut node = server();
    let mut platform = MockPlatform::new();
    let payload = Payload::encode(Reading::new(55_000, 25_000));

    let outcome = node.handle(sensor_message(payload.as_bytes()), &mut platform);

    match outcome {
        NodeOutcome::Received(ReceiveOutcome::Stored { slot, report }) => {
            assert_eq!(slot, 0);
            let report = report.expect("sensor_status must be decoded");
            assert_eq!(report.reading, Reading::new(55_000, 25_000));
            assert_eq!(report.fahrenheit_milli, 77_000);
        }
        other => panic!("Unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_server_drops_identical_payload() {
    let mut node = server();
    let mut platform = MockPlatform::new();
    let bytes = [1, 2, 3, 4, 5, 6, 7, 8];

    node.handle(sensor_message(&bytes), &mut platform);
    let outcome = node.handle(sensor_message(&bytes), &mut platform);

    assert_eq!(outcome, NodeOutcome::Received(ReceiveOutcome::Duplicate));
    assert_eq!(store_cursor(&node), 1);
}

#[test]
fn test_server_accepts_one_byte_change() {
    let mut node = server();
    let mut platform = MockPlatform::new();

    node.handle(sensor_message(&[1, 2, 3, 4, 5, 6, 7, 8]), &mut platform);
    node.handle(sensor_message(&[1, 2, 3, 4, 5, 6, 7, 9]), &mut platform);

    assert_eq!(store_cursor(&node), 2);
    match &node {
        MeshNode::Server(server) => {
            assert_eq!(server.deduper().cache().as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 9]);
            assert_eq!(server.store().slot(1), Some(0x0102_0304_0506_0709));
        }
        MeshNode::Client(_) => panic!("Expected server node"),
    }
}

#[test]
fn test_server_initial_zero_payload_is_duplicate() {
    let mut node = server();
    let mut platform = MockPlatform::new();

    let outcome = node.handle(sensor_message(&[0; 8]), &mut platform);

    assert_eq!(outcome, NodeOutcome::Received(ReceiveOutcome::Duplicate));
    assert_eq!(store_cursor(&node), 0);
}

#[test]
fn test_server_ring_wraps_after_nine_messages() {
    let mut node = server();
    let mut platform = MockPlatform::new();

    for value in 1..=9u8 {
        node.handle(sensor_message(&[0, 0, 0, 0, 0, 0, 0, value]), &mut platform);
    }

    match &node {
        MeshNode::Server(server) => {
            assert_eq!(server.store().slot(0), Some(9));
            assert_eq!(server.store().slot(7), Some(8));
            assert_eq!(server.store().cursor(), 1);
        }
        MeshNode::Client(_) => panic!("Expected server node"),
    }
}

#[test]
fn test_server_skips_store_for_wrong_length() {
    let mut node = server();
    let mut platform = MockPlatform::new();

    let short = node.handle(sensor_message(&[]), &mut platform);
    let long = node.handle(sensor_message(&[0; 9]), &mut platform);

    let expected = NodeOutcome::Received(ReceiveOutcome::Unframed {
        opcode: SENSOR_STATUS_OPCODE,
    });
    assert_eq!(short, expected);
    assert_eq!(long, expected);
    assert_eq!(store_cursor(&node), 0);
}

#[test]
fn test_server_stores_but_does_not_decode_other_opcodes() {
    let mut node = server();
    let mut platform = MockPlatform::new();

    let outcome = node.handle(
        NodeEvent::Message(InboundMessage {
            opcode: 0x04,
            source: 0x0002,
            destination: 0xC001,
            payload: &[9; 8],
        }),
        &mut platform,
    );

    assert_eq!(
        outcome,
        NodeOutcome::Received(ReceiveOutcome::Stored {
            slot: 0,
            report: None,
        })
    );
}

#[test]
fn test_server_ignores_buttons_and_ticks() {
    let mut node = server();
    let mut platform = MockPlatform::new();

    assert_eq!(node.handle(pb0_short(), &mut platform), NodeOutcome::Ignored);
    assert_eq!(
        node.handle(NodeEvent::TimerExpired(TimerId::PeriodicUpdate), &mut platform),
        NodeOutcome::Ignored
    );
    assert!(platform.published.is_empty());
}

// ============================================================================
// Tests: Boot / Factory Reset
// ============================================================================

#[test]
fn test_boot_with_button_held_resets_then_reboots() {
    let mut node = client();
    let mut platform = MockPlatform::new();

    node.handle(NodeEvent::Boot { button_held: true }, &mut platform);

    assert_eq!(platform.node_resets, 1);
    assert_eq!(platform.reboots, 0);
    assert_eq!(
        platform.timer_calls,
        vec![TimerCall::Start {
            timer: TimerId::DelayedReset,
            period_ms: 100,
            repeating: false,
        }]
    );

    node.handle(NodeEvent::TimerExpired(TimerId::DelayedReset), &mut platform);
    assert_eq!(platform.reboots, 1);
}

#[test]
fn test_normal_boot_shows_client_menu() {
    let mut node = client();
    let mut platform = MockPlatform::new();

    node.handle(NodeEvent::Boot { button_held: false }, &mut platform);

    assert_eq!(platform.node_resets, 0);
    assert!(platform.timer_calls.is_empty());
    assert_eq!(platform.row(ROW_HINT), Some("PB0: Public data"));
}

#[test]
fn test_server_boot_with_button_held_resets() {
    let mut node = server();
    let mut platform = MockPlatform::new();

    node.handle(NodeEvent::Boot { button_held: true }, &mut platform);

    assert_eq!(platform.node_resets, 1);
    assert!(platform.display.is_empty());
}
