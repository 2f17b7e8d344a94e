// Sensor Task - Liest den SHT4x periodisch in den Messwert-Cache
use defmt::{debug, warn};
use embassy_time::{Duration, Timer};
use esp_hal::Async;
use esp_hal::i2c::master::I2c;

use crate::SampleCell;
use crate::config::SENSOR_SAMPLE_INTERVAL_MS;
use crate::hal::Sht4xSensor;

/// Sensor Task - hält den letzten Messwert aktuell
///
/// Der Node Task liest nur den Cache und blockiert dadurch nie auf I2C.
/// Nach einem Fehler wird der Cache geleert, der Publisher sendet dann Nullen.
#[embassy_executor::task]
pub async fn sensor_task(
    mut sensor: Sht4xSensor<I2c<'static, Async>>,
    sample: &'static SampleCell,
) {
    loop {
        match sensor.measure().await {
            Ok(reading) => {
                debug!("Sensor: {}", reading);
                sample.lock(|cell| cell.set(Some(reading)));
            }
            Err(e) => {
                warn!("Sensor: {}", e);
                sample.lock(|cell| cell.set(None));
            }
        }
        Timer::after(Duration::from_millis(SENSOR_SAMPLE_INTERVAL_MS)).await;
    }
}
