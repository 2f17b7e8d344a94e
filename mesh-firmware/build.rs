// Build-Script: Wird vor dem Kompilieren ausgeführt
// Backt die Node-Konfiguration ein und konfiguriert den Linker für ESP32-C6

/// Variablen die aus .env an rustc weitergereicht werden (für env! in config.rs)
const FORWARDED_VARS: [&str; 7] = [
    "WIFI_SSID",
    "WIFI_PASSWORD",
    "MQTT_BROKER",
    "MQTT_CLIENT_ID",
    "MQTT_TOPIC",
    "NODE_ROLE",
    "NODE_ADDRESS",
];

fn main() {
    // Fehler ignorieren wenn .env nicht existiert (dann müssen ENV vars gesetzt sein)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  .env file nicht gefunden: {}", e);
        eprintln!("   Setze {} als Environment-Variablen", FORWARDED_VARS.join(", "));
    }

    for key in FORWARDED_VARS {
        println!("cargo:rerun-if-env-changed={}", key);
        if let Ok(value) = std::env::var(key) {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }

    linker_be_nice();

    // defmt.x: Symbole für defmt's binäres Log-Format
    println!("cargo:rustc-link-arg=-Tdefmt.x");

    // linkall.x: Flash/RAM-Layout, muss als LETZTES kommen
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

// Wird vom Linker als "--error-handling-script" aufgerufen und gibt
// Hinweise zu fehlenden Symbolen aus
fn linker_be_nice() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 2 {
        let hint = match (args[1].as_str(), args[2].as_str()) {
            ("undefined-symbol", what) if what.starts_with("_defmt_") => {
                Some("`defmt` not found - make sure `defmt.x` is added as a linker script")
            }
            ("undefined-symbol", "_stack_start") => {
                Some("Is the linker script `linkall.x` missing?")
            }
            ("undefined-symbol", what) if what.starts_with("esp_rtos_") => Some(
                "`esp-radio` has no scheduler enabled. Make sure `esp-rtos` is initialized.",
            ),
            (
                "undefined-symbol",
                "free" | "malloc" | "calloc" | "get_free_internal_heap_size" | "malloc_internal"
                | "realloc_internal" | "calloc_internal" | "free_internal",
            ) => Some("Did you forget the `esp-alloc` dependency?"),
            ("undefined-symbol", _) => None,
            _ => std::process::exit(1),
        };

        if let Some(hint) = hint {
            eprintln!();
            eprintln!("💡 {}", hint);
            eprintln!();
        }
        std::process::exit(0);
    }

    if let Ok(exe) = std::env::current_exe() {
        println!(
            "cargo:rustc-link-arg=--error-handling-script={}",
            exe.display()
        );
    }
}
