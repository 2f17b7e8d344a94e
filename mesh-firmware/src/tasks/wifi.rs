// WiFi Task - Station-Verbindung als Transport für die Mesh-Frames
use defmt::{Debug2Format, error, info, warn};
use embassy_net::{Runner, Stack};
use embassy_time::{Duration, Timer};
use esp_radio::wifi::{ClientConfig, ModeConfig, WifiController, WifiDevice, WifiEvent};

use crate::config::{WIFI_PASSWORD, WIFI_RETRY_DELAY_SECS, WIFI_SSID};

/// WiFi Connection Task
///
/// Startet den Station-Modus, verbindet mit dem Access Point und verbindet
/// nach einem Disconnect erneut.
#[embassy_executor::task]
pub async fn connection_task(mut controller: WifiController<'static>) {
    info!("WiFi: Starting connection task");

    loop {
        if matches!(controller.is_started(), Ok(false)) {
            if let Err(e) = start_station(&mut controller).await {
                error!("WiFi: {}", e);
                retry_delay().await;
                continue;
            }
            info!("WiFi: Station started");
        }

        info!("WiFi: Connecting to '{}'...", WIFI_SSID);
        if let Err(e) = controller.connect_async().await {
            error!("WiFi: Connection failed: {}", Debug2Format(&e));
            retry_delay().await;
            continue;
        }
        info!("WiFi: Connected");

        controller.wait_for_event(WifiEvent::StaDisconnected).await;
        warn!("WiFi: Disconnected from AP, will retry...");
        retry_delay().await;
    }
}

async fn start_station(controller: &mut WifiController<'static>) -> Result<(), &'static str> {
    let client_config = ModeConfig::Client(
        ClientConfig::default()
            .with_ssid(WIFI_SSID.into())
            .with_password(WIFI_PASSWORD.into()),
    );

    controller
        .set_config(&client_config)
        .map_err(|_| "Failed to set configuration")?;
    controller
        .start_async()
        .await
        .map_err(|_| "Failed to start")
}

async fn retry_delay() {
    Timer::after(Duration::from_secs(WIFI_RETRY_DELAY_SECS)).await;
}

/// Network Task - prozessiert Pakete des embassy-net Stacks
#[embassy_executor::task]
pub async fn net_task(mut runner: Runner<'static, WifiDevice<'static>>) -> ! {
    runner.run().await
}

/// Wartet bis Link und DHCP-Adresse vorhanden sind und loggt die Adresse
pub async fn wait_for_network(stack: &'static Stack<'static>) {
    loop {
        if stack.is_link_up() {
            if let Some(config) = stack.config_v4() {
                info!("WiFi: IP {}", Debug2Format(&config.address.address()));
                return;
            }
        }
        Timer::after(Duration::from_millis(500)).await;
    }
}
