//! Laufzeit-Konfiguration des Tickers
//!
//! Wird vor dem Start der Hauptschleife validiert. Ein ungültiger Wert
//! ist ein Programmierfehler und wird hier abgefangen, nie pro Tick.

use crate::types::{Symbol, SymbolError};

/// Obergrenze für den blockierenden Reconnect (Versuche * Poll-Intervall)
pub const MAX_RECONNECT_WAIT_MS: u32 = 30_000;

/// Kleinste unterstützte Display-Größe
pub const MIN_DISPLAY_COLS: u8 = 8;

/// Welcher REST-Endpunkt abgefragt wird
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endpoint {
    /// `/api/v3/avgPrice` - nur Durchschnittspreis
    AveragePrice,
    /// `/api/v3/ticker/24hr` - letzter Preis plus 24h-Änderung
    Ticker24h,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::AveragePrice => "/api/v3/avgPrice",
            Endpoint::Ticker24h => "/api/v3/ticker/24hr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Ein Task-Intervall ist 0
    ZeroInterval,
    /// Scheduler-Tick länger als das kürzeste Task-Intervall
    TickTooCoarse,
    /// Fetch-Timeout nicht kürzer als das Fetch-Intervall
    TimeoutExceedsInterval,
    /// Reconnect ohne (oder mit zu großer) Obergrenze
    ReconnectUnbounded,
    /// Schwelle negativ oder nicht endlich
    InvalidThreshold,
    InvalidSymbol(SymbolError),
    DisplayTooSmall,
    /// API-Basis muss mit `http://` beginnen und ohne `/` enden
    InvalidApiBase,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickerConfig {
    /// Start-Symbol (z.B. "BTCUSDT")
    pub symbol: &'static str,
    /// z.B. "http://api.binance.com"
    pub api_base: &'static str,
    pub endpoint: Endpoint,
    /// Abruf-Intervall in Sekunden
    pub fetch_interval_secs: u32,
    /// Wechsel zwischen Display-Screens in Sekunden
    pub display_interval_secs: u32,
    /// Mindestabstand zwischen zwei Reconnect-Prozeduren in Sekunden
    pub reconnect_interval_secs: u32,
    /// Alarm-Schwelle in Prozent
    pub alert_threshold_pct: f32,
    pub fetch_timeout_ms: u32,
    pub reconnect_attempts: u8,
    pub reconnect_poll_ms: u32,
    /// Anzahl an/aus-Zyklen beim Alarm
    pub alert_flashes: u8,
    pub alert_flash_ms: u32,
    /// Pause zwischen zwei Scheduler-Durchläufen
    pub tick_ms: u32,
    pub display_cols: u8,
    pub display_rows: u8,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            symbol: "BTCUSDT",
            api_base: "http://api.binance.com",
            endpoint: Endpoint::Ticker24h,
            fetch_interval_secs: 10,
            display_interval_secs: 4,
            reconnect_interval_secs: 5,
            alert_threshold_pct: 1.0,
            fetch_timeout_ms: 5_000,
            reconnect_attempts: 20,
            reconnect_poll_ms: 500,
            alert_flashes: 20,
            alert_flash_ms: 80,
            tick_ms: 20,
            display_cols: 16,
            display_rows: 2,
        }
    }
}

impl TickerConfig {
    pub fn fetch_interval_ms(&self) -> u64 {
        u64::from(self.fetch_interval_secs) * 1_000
    }

    pub fn display_interval_ms(&self) -> u64 {
        u64::from(self.display_interval_secs) * 1_000
    }

    pub fn reconnect_interval_ms(&self) -> u64 {
        u64::from(self.reconnect_interval_secs) * 1_000
    }

    /// Prüft alle Werte und liefert das normalisierte Start-Symbol
    pub fn validate(&self) -> Result<Symbol, ConfigError> {
        let symbol = Symbol::parse(self.symbol).map_err(ConfigError::InvalidSymbol)?;

        if self.fetch_interval_secs == 0
            || self.display_interval_secs == 0
            || self.reconnect_interval_secs == 0
            || self.alert_flash_ms == 0
            || self.tick_ms == 0
        {
            return Err(ConfigError::ZeroInterval);
        }

        let shortest = self
            .fetch_interval_ms()
            .min(self.display_interval_ms())
            .min(self.reconnect_interval_ms())
            .min(u64::from(self.alert_flash_ms));
        if u64::from(self.tick_ms) > shortest {
            return Err(ConfigError::TickTooCoarse);
        }

        if u64::from(self.fetch_timeout_ms) >= self.fetch_interval_ms() {
            return Err(ConfigError::TimeoutExceedsInterval);
        }

        let reconnect_wait = u32::from(self.reconnect_attempts).saturating_mul(self.reconnect_poll_ms);
        if self.reconnect_attempts == 0
            || self.reconnect_poll_ms == 0
            || reconnect_wait > MAX_RECONNECT_WAIT_MS
        {
            return Err(ConfigError::ReconnectUnbounded);
        }

        if !self.alert_threshold_pct.is_finite() || self.alert_threshold_pct < 0.0 {
            return Err(ConfigError::InvalidThreshold);
        }

        if self.display_cols < MIN_DISPLAY_COLS || self.display_rows == 0 {
            return Err(ConfigError::DisplayTooSmall);
        }

        if !self.api_base.starts_with("http://") || self.api_base.ends_with('/') {
            return Err(ConfigError::InvalidApiBase);
        }

        Ok(symbol)
    }
}
