// Projekt-Konfiguration: Konstanten, Mesh-Adressen und Hardware-Zuordnungen
#![allow(dead_code)]

// ============================================================================
// Node Konfiguration
// ============================================================================

/// Rolle dieses Nodes ("client" oder "server")
/// Wird zur Build-Zeit aus der Environment Variable NODE_ROLE geladen
pub const NODE_ROLE: &str = env!(
    "NODE_ROLE",
    "Node-Rolle nicht gesetzt! NODE_ROLE=client oder NODE_ROLE=server in .env"
);

/// Unicast-Adresse dieses Nodes als Hex-String (z.B. "0002")
pub const NODE_ADDRESS: &str = env!(
    "NODE_ADDRESS",
    "Node-Adresse nicht gesetzt! NODE_ADDRESS=0002 in .env"
);

// ============================================================================
// Vendor Model Konfiguration
// ============================================================================

/// Company Identifier des Vendor Models
pub const VENDOR_COMPANY_ID: u16 = 0x1221;

/// Model ID des Client-Models (publiziert Messwerte)
pub const CLIENT_MODEL_ID: u16 = 0x2222;

/// Model ID des Server-Models (empfängt Messwerte)
pub const SERVER_MODEL_ID: u16 = 0x1111;

/// Gruppen-Adresse an die der Client publiziert
pub const PUBLISH_GROUP_ADDRESS: u16 = 0xC001;

// ============================================================================
// Hardware Konfiguration
// ============================================================================

/// GPIO-Pin für Taster PB0 (active-low)
pub const PB0_GPIO_PIN: u8 = 9;

/// GPIO-Pin für Taster PB1 (active-low)
pub const PB1_GPIO_PIN: u8 = 2;

/// Entprell-Zeit für Taster in Millisekunden
pub const BUTTON_DEBOUNCE_MS: u64 = 30;

/// I2C Taktfrequenz für den SHT4x in kHz
pub const I2C_FREQUENCY_KHZ: u32 = 400;

/// Intervall zwischen zwei Sensor-Messungen
/// Der Publisher liest immer den letzten Messwert aus dem Cache
pub const SENSOR_SAMPLE_INTERVAL_MS: u64 = 1000;

// ============================================================================
// Channel Kapazitäten
// ============================================================================

/// Events aus Tastern, Timern und Netzwerk zum Node-Task
pub const EVENT_QUEUE_DEPTH: usize = 8;

/// Ausgehende Frames vom Node-Task zum MQTT-Task
pub const OUTBOUND_QUEUE_DEPTH: usize = 4;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Heap-Größe für WiFi (Bytes)
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

/// Wartezeit nach WiFi-Fehlern in Sekunden
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

// ============================================================================
// MQTT Konfiguration (Transport der Mesh-Frames)
// ============================================================================

/// MQTT Broker Hostname oder IP-Adresse
pub const MQTT_BROKER: &str = env!(
    "MQTT_BROKER",
    "MQTT Broker nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// MQTT Broker Port (1883 unverschlüsselt)
pub const MQTT_PORT: u16 = 1883;

/// MQTT Client ID, muss pro Node eindeutig sein
pub const MQTT_CLIENT_ID: &str = env!(
    "MQTT_CLIENT_ID",
    "MQTT Client ID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Topic der Publish-Gruppe, auf dem Frames ausgetauscht werden (z.B. "mesh/c001")
pub const MQTT_TOPIC: &str = env!(
    "MQTT_TOPIC",
    "MQTT Topic nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit nach Verbindungsfehler vor erneutem Versuch
pub const MQTT_RECONNECT_DELAY_SECS: u64 = 5;

/// MQTT Buffer-Größe in Bytes
pub const MQTT_BUFFER_SIZE: usize = 256;

/// TCP Socket Buffer-Größe in Bytes
pub const TCP_BUFFER_SIZE: usize = 1024;

/// MQTT Keep-Alive in Sekunden
pub const MQTT_KEEP_ALIVE_SECS: u16 = 30;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;
