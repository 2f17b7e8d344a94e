// Node Task - Einziger Besitzer des MeshNode
use defmt::{debug, info};
use mesh_core::{MeshNode, NodeEvent, NodeOutcome, ReceiveOutcome};

use crate::EventReceiver;
use crate::platform::FirmwarePlatform;

/// Node Task - serialisiert alle Events auf einen Kontext
///
/// Taster, Timer und MQTT schicken Events über den Channel, nur dieser Task
/// ruft [`MeshNode::handle`] auf. Deshalb braucht der Node keine Locks.
///
/// # Parameter
/// - `node`: Node in seiner Rolle
/// - `platform`: Timer, Sensor-Cache und Outbound-Channel
/// - `events`: Receiver für alle Events
/// - `button_held`: War beim Boot ein Taster gedrückt (Factory Reset)
#[embassy_executor::task]
pub async fn node_task(
    mut node: MeshNode,
    mut platform: FirmwarePlatform,
    events: EventReceiver,
    button_held: bool,
) {
    info!("Node: Starting as {}", node.role());
    node.handle(NodeEvent::Boot { button_held }, &mut platform);

    loop {
        let event = events.receive().await;
        match node.handle(event.as_node_event(), &mut platform) {
            NodeOutcome::Ignored => debug!("Node: Event ignored in this role"),
            NodeOutcome::Received(ReceiveOutcome::Stored {
                report: Some(report),
                ..
            }) => info!("Node: {}", report),
            NodeOutcome::Handled | NodeOutcome::Received(_) => {}
        }
    }
}
