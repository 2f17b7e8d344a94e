// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

use core::cell::Cell;

// Embassy Async Runtime
use defmt::info;
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Pull};
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::rng::Rng;
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use mesh_core::Button;
use mesh_sensor_node::config::{
    CLIENT_MODEL_ID, EXTRA_HEAP_SIZE, I2C_FREQUENCY_KHZ, NODE_ADDRESS, NODE_ROLE,
    SERVER_MODEL_ID, VENDOR_COMPANY_ID, WIFI_HEAP_SIZE,
};
use mesh_sensor_node::hal::Sht4xSensor;
use mesh_sensor_node::platform::FirmwarePlatform;
use mesh_sensor_node::tasks::{
    button_task, connection_task, mqtt_task, net_task, node_task, sensor_task, timer_task,
};
use mesh_sensor_node::{
    EventChannel, MeshNode, NodeRole, OutboundChannel, SampleCell, TIMERS, TimerSignal,
    TimerSignals, timer_slot,
};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Initialisiert Hardware, WiFi und Channels, spawnt die Tasks.
/// Danach schläft main() - alle Arbeit läuft in Tasks.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Build-Konfiguration prüfen bevor irgendetwas gestartet wird
    let role = NodeRole::try_from(NODE_ROLE).expect("NODE_ROLE must be 'client' or 'server'");
    let address =
        u16::from_str_radix(NODE_ADDRESS, 16).expect("NODE_ADDRESS must be a hex u16");
    let model_id = match role {
        NodeRole::Client => CLIENT_MODEL_ID,
        NodeRole::Server => SERVER_MODEL_ID,
    };
    info!(
        "Node: role={} address={=u16:#06x} model={=u16:#06x}:{=u16:#06x}",
        role, address, VENDOR_COMPANY_ID, model_id
    );

    // Heap Allocator initialisieren (WiFi braucht dynamischen Speicher!)
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // Taster (active-low) - vor allem anderen lesen, für Factory Reset beim Boot
    let button_config = InputConfig::default().with_pull(Pull::Up);
    let pb0 = Input::new(peripherals.GPIO9, button_config);
    let pb1 = Input::new(peripherals.GPIO2, button_config);
    let button_held = pb0.is_low() || pb1.is_low();

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    // Sockets: MQTT (1) + DNS
    static RESOURCES: static_cell::StaticCell<StackResources<3>> = static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
    let stack = &*STACK.init(stack);

    // Channels und Signals (alle Tasks laufen auf demselben Executor)
    static EVENTS: static_cell::StaticCell<EventChannel> = static_cell::StaticCell::new();
    let events = &*EVENTS.init(EventChannel::new());

    static OUTBOUND: static_cell::StaticCell<OutboundChannel> = static_cell::StaticCell::new();
    let outbound = &*OUTBOUND.init(OutboundChannel::new());

    static TIMER_SIGNALS: static_cell::StaticCell<TimerSignals> = static_cell::StaticCell::new();
    let timer_signals = &*TIMER_SIGNALS.init([TimerSignal::new(), TimerSignal::new()]);

    static SAMPLE: static_cell::StaticCell<SampleCell> = static_cell::StaticCell::new();
    let sample = &*SAMPLE.init(Mutex::new(Cell::new(None)));

    // Spawn WiFi Tasks
    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();

    // Spawn Timer Tasks (einer pro Timer-Id)
    for timer in TIMERS {
        spawner
            .spawn(timer_task(
                timer,
                &timer_signals[timer_slot(timer)],
                events.sender(),
            ))
            .unwrap();
    }

    // Spawn Button Tasks
    spawner
        .spawn(button_task(Button::Pb0, pb0, events.sender()))
        .unwrap();
    spawner
        .spawn(button_task(Button::Pb1, pb1, events.sender()))
        .unwrap();

    // Sensor nur auf dem Client (Server misst nicht)
    if role == NodeRole::Client {
        let i2c = I2c::new(
            peripherals.I2C0,
            I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ)),
        )
        .expect("Failed to initialize I2C")
        .with_sda(peripherals.GPIO6)
        .with_scl(peripherals.GPIO7)
        .into_async();
        spawner
            .spawn(sensor_task(Sht4xSensor::new(i2c), sample))
            .unwrap();
    }

    // Spawn MQTT Task (Transport der Mesh-Frames)
    spawner
        .spawn(mqtt_task(
            stack,
            role,
            outbound.receiver(),
            events.sender(),
        ))
        .unwrap();

    // Spawn Node Task (besitzt den MeshNode)
    let platform = FirmwarePlatform::new(address, timer_signals, sample, outbound.sender());
    spawner
        .spawn(node_task(
            MeshNode::new(role),
            platform,
            events.receiver(),
            button_held,
        ))
        .unwrap();

    // Main-Loop: schläft (alle Arbeit läuft in Tasks)
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
