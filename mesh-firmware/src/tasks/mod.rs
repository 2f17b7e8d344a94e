// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig. Taster, Timer und MQTT
// schicken Events an den Node Task, der als einziger den MeshNode besitzt.

pub mod button;
pub mod mqtt;
pub mod node;
pub mod sensor;
pub mod timer;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use button::button_task;
pub use mqtt::mqtt_task;
pub use node::node_task;
pub use sensor::sensor_task;
pub use timer::timer_task;
pub use wifi::{connection_task, net_task};
