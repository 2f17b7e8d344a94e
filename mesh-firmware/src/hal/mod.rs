// Hardware Abstraction Layer (HAL) Module
//
// Kapselt Sensor-Hardware hinter mesh-core Typen.

pub mod climate;

pub use climate::Sht4xSensor;
