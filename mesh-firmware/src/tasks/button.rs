// Button Task - Misst Haltedauer und klassifiziert Tastendrücke
use defmt::info;
use embassy_time::{Duration, Instant, Timer};
use esp_hal::gpio::Input;
use mesh_core::{Button, ButtonEvent, PressDuration};

use crate::config::BUTTON_DEBOUNCE_MS;
use crate::{EventSender, FirmwareEvent};

/// Button Task - eine Instanz pro Taster
///
/// Taster sind active-low mit Pull-Up. Ein Event wird erst beim Loslassen
/// gesendet, die Haltedauer bestimmt die [`PressDuration`].
///
/// # Parameter
/// - `button`: Welcher Taster (PB0/PB1)
/// - `input`: GPIO-Eingang des Tasters
/// - `events`: Sender zum Node Task
#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(button: Button, mut input: Input<'static>, events: EventSender) {
    info!("Button: Task for {} started", button as u8);

    loop {
        input.wait_for_low().await;
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        if input.is_high() {
            // Prellen
            continue;
        }

        let pressed_at = Instant::now();
        input.wait_for_high().await;
        let held_ms = pressed_at.elapsed().as_millis();
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        let event = ButtonEvent::new(button, PressDuration::from_held_ms(held_ms));
        info!("Button: {} after {} ms", event, held_ms);
        events.send(FirmwareEvent::Button(event)).await;
    }
}
