// SHT4x Temperatur/Feuchte-Sensor über I2C
//
// Liefert Messwerte in milli-°C und milli-% als mesh-core Reading.

use defmt::{Debug2Format, error};
use embedded_hal_async::i2c::I2c;
use mesh_core::{Reading, SensorError};
use sht4x::Sht4xAsync;

pub struct Sht4xSensor<I> {
    sensor: Sht4xAsync<I, embassy_time::Delay>,
}

impl<I: I2c> Sht4xSensor<I> {
    pub fn new(i2c: I) -> Self {
        Self {
            sensor: Sht4xAsync::<I, embassy_time::Delay>::new(i2c),
        }
    }

    /// Eine Messung mit hoher Präzision (~9 ms)
    pub async fn measure(&mut self) -> Result<Reading, SensorError> {
        let measurement = self
            .sensor
            .measure(sht4x::Precision::High, &mut embassy_time::Delay)
            .await
            .map_err(|e| {
                error!("SHT4x: Measurement failed: {}", Debug2Format(&e));
                SensorError::ReadFailed
            })?;

        let temperature = (measurement.temperature_celsius().to_num::<f32>() * 1000.0) as i32;
        let humidity = (measurement.humidity_percent().to_num::<f32>() * 1000.0) as i32;

        Ok(Reading::new(humidity, temperature))
    }
}
