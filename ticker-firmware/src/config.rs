// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

use ticker_core::{Endpoint, TickerConfig};

// ============================================================================
// LED Konfiguration
// ============================================================================

/// GPIO-Pin für die RGB LED (WS2812/Neopixel)
/// Grün = Kurs steigt, Rot = Kurs fällt, Blau blinkend = Alarm
pub const LED_GPIO_PIN: u8 = 8;

/// Helligkeits-Level für die LED (0-255)
/// Wert ist gedimmt für Augenschonung
pub const LED_BRIGHTNESS: u8 = 10;

/// RMT Taktfrequenz in MHz
/// 80 MHz ist optimal für WS2812 LED-Timing
pub const RMT_CLOCK_MHZ: u32 = 80;

// ============================================================================
// LCD Konfiguration (HD44780 über PCF8574 I2C-Backpack)
// ============================================================================

/// I2C-Adresse des Backpacks (0x27, manche Module 0x3F)
pub const LCD_I2C_ADDRESS: u8 = 0x27;

/// I2C Pins (GPIO6 = SDA, GPIO7 = SCL)
pub const LCD_SDA_GPIO_PIN: u8 = 6;
pub const LCD_SCL_GPIO_PIN: u8 = 7;

/// I2C Takt in kHz (PCF8574 kann maximal 100 kHz)
pub const LCD_I2C_FREQ_KHZ: u32 = 100;

/// Display-Größe (1602 Modul)
pub const LCD_COLS: u8 = 16;
pub const LCD_ROWS: u8 = 2;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit nach fehlgeschlagenem Verbindungsversuch
/// Ein Reconnect-Wunsch des Tickers verkürzt sie
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
/// Dashboard-Antworten (JSON) liegen ebenfalls auf dem Heap
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

// ============================================================================
// Kurs-Ticker Konfiguration
// ============================================================================

/// Basis-URL der Kurs-API (nur http://, kein TLS)
/// Optional aus PRICE_API_BASE, z.B. ein lokaler Relay "http://192.168.1.10:8080"
pub const PRICE_API_BASE: &str = match option_env!("PRICE_API_BASE") {
    Some(base) => base,
    None => "http://api.binance.com",
};

/// Start-Symbol, über das Dashboard zur Laufzeit änderbar
pub const TICKER_SYMBOL: &str = match option_env!("TICKER_SYMBOL") {
    Some(symbol) => symbol,
    None => "BTCUSDT",
};

/// Anzahl Kurswerte im Verlauf (Ringpuffer)
pub const HISTORY_CAPACITY: usize = 50;

/// Abruf-Intervall in Sekunden
pub const FETCH_INTERVAL_SECS: u32 = 10;

/// Screen-Wechsel auf dem LCD in Sekunden
pub const DISPLAY_INTERVAL_SECS: u32 = 4;

/// Alarm-Schwelle in Prozent (Änderung zum letzten Abruf)
pub const ALERT_THRESHOLD_PCT: f32 = 1.0;

/// Alarm: 20 Blinkzyklen zu je 80 ms an/aus
pub const ALERT_FLASHES: u8 = 20;
pub const ALERT_FLASH_MS: u32 = 80;

/// HTTP Timeout für einen Kurs-Abruf
pub const FETCH_TIMEOUT_MS: u32 = 5_000;

/// Reconnect: bis zu 20 Polls im Abstand von 500 ms (max. 10 s)
pub const RECONNECT_ATTEMPTS: u8 = 20;
pub const RECONNECT_POLL_MS: u32 = 500;

/// Pause zwischen zwei Scheduler-Durchläufen
pub const TICK_MS: u32 = 20;

/// DNS Query Timeout in Sekunden
pub const DNS_TIMEOUT_SECS: u64 = 10;

/// TCP Buffer für den Kurs-Abruf
pub const FETCH_TCP_RX_BUFFER_SIZE: usize = 1024;
pub const FETCH_TCP_TX_BUFFER_SIZE: usize = 512;

/// Laufzeit-Konfiguration für den Scheduler
pub fn ticker_config() -> TickerConfig {
    TickerConfig {
        symbol: TICKER_SYMBOL,
        api_base: PRICE_API_BASE,
        endpoint: Endpoint::Ticker24h,
        fetch_interval_secs: FETCH_INTERVAL_SECS,
        display_interval_secs: DISPLAY_INTERVAL_SECS,
        alert_threshold_pct: ALERT_THRESHOLD_PCT,
        fetch_timeout_ms: FETCH_TIMEOUT_MS,
        reconnect_attempts: RECONNECT_ATTEMPTS,
        reconnect_poll_ms: RECONNECT_POLL_MS,
        alert_flashes: ALERT_FLASHES,
        alert_flash_ms: ALERT_FLASH_MS,
        tick_ms: TICK_MS,
        display_cols: LCD_COLS,
        display_rows: LCD_ROWS,
        ..TickerConfig::default()
    }
}

// ============================================================================
// HTTP Server Konfiguration (Dashboard)
// ============================================================================

/// Anzahl paralleler Server-Tasks (pool_size in tasks/http.rs)
pub const HTTP_TASK_COUNT: usize = 4;

pub const HTTP_PORT: u16 = 80;

/// HTTP Buffer-Größe in Bytes
/// Für HTTP Request/Response Headers und Body
pub const HTTP_BUFFER_SIZE: usize = 1024;

/// TCP RX Buffer-Größe in Bytes
/// Für eingehende TCP-Daten vom Client
pub const TCP_RX_BUFFER_SIZE: usize = 1024;

/// TCP TX Buffer-Größe in Bytes
/// Für ausgehende TCP-Daten zum Client
pub const TCP_TX_BUFFER_SIZE: usize = 1024;

/// JSON Buffer für Status-Antworten
/// 50 Verlaufswerte à ~12 Zeichen plus Kopf
pub const JSON_BUFFER_SIZE: usize = 1536;

/// Max. Requests in der Queue zum Ticker
pub const REQUEST_QUEUE_DEPTH: usize = 4;

/// So lange wartet ein Server-Task auf die Antwort des Tickers
/// Ein Reconnect kann den Ticker bis zu 10 s blockieren
pub const REPLY_TIMEOUT_MS: u64 = 12_000;
