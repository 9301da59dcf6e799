//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für Netzwerk, Display, LED
//! und Web-Server ohne konkrete Implementierung. Der Scheduler kennt
//! nur diese Traits.
//!
//! # Implementierungen
//! - **Production:** ticker-firmware (embassy-net, RMT, HD44780 über I2C)
//! - **Testing:** Mocks in ticker-tests

use rgb::RGB8;

use crate::request::{Request, Response};
use crate::scheduler::TaskEvent;
use crate::types::{Glyph, LedChannel};

// ============================================================================
// LED
// ============================================================================

/// Fehler-Typ für LED-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedError {
    WriteFailed,
}

/// Trait für SmartLED Hardware-Zugriff
///
/// Abstrahiert den Zugriff auf RGB LEDs (WS2812/Neopixel).
pub trait SmartLedWriter: Send {
    /// Schreibt eine RGB-Farbe auf die LED
    ///
    /// # Fehlerbehandlung
    /// Gibt `LedError::WriteFailed` zurück wenn Hardware-Zugriff fehlschlägt
    fn write(&mut self, color: RGB8) -> Result<(), LedError>;
}

/// Schaltet logische LED-Kanäle (Kurs hoch/runter, Alarm)
pub trait StatusLed {
    fn set(&mut self, channel: LedChannel, on: bool) -> Result<(), LedError>;
}

// ============================================================================
// Display
// ============================================================================

/// Fehler-Typ für Display-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus-Kommunikation fehlgeschlagen
    BusError,
    /// Position liegt außerhalb des Displays
    OutOfBounds,
}

/// Zeichen-Display (z.B. 16x2 LCD)
pub trait TextDisplay {
    /// Löscht das komplette Display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Schreibt Text ab einer Position
    ///
    /// - `row`: Zeile (0-basiert)
    /// - `col`: Spalte (0-basiert)
    fn write_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Setzt einen Indikator-Glyph (Pfeil hoch/runter)
    fn set_indicator(&mut self, slot: u8, glyph: Glyph) -> Result<(), DisplayError>;
}

// ============================================================================
// Netzwerk
// ============================================================================

/// Fehler-Typ für HTTP-Abrufe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetError {
    /// DNS, TCP-Verbindung oder Lesen/Schreiben fehlgeschlagen
    Transport,
    /// Harte Deadline des Abrufs überschritten
    Timeout,
    /// Antwort passt nicht in den Puffer
    BufferTooSmall,
    /// URL konnte nicht gebaut oder zerlegt werden
    InvalidUrl,
}

/// Ergebnis eines HTTP-Abrufs; der Body liegt in `buf[..len]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HttpResponse {
    pub status: u16,
    pub len: usize,
}

/// HTTP-Client mit harter Deadline
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    /// Führt einen GET-Request aus und schreibt den Body nach `buf`
    async fn get(
        &mut self,
        url: &str,
        timeout_ms: u32,
        buf: &mut [u8],
    ) -> Result<HttpResponse, NetError>;
}

/// Fehler beim Anstoßen einer WLAN-Verbindung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectivityError {
    StartFailed,
}

/// WLAN-Status und Reconnect
pub trait Connectivity {
    fn is_connected(&mut self) -> bool;

    /// Stößt einen Verbindungsaufbau an (kehrt sofort zurück)
    fn begin(&mut self) -> Result<(), ConnectivityError>;
}

// ============================================================================
// Web-Server, Zeit, Logging
// ============================================================================

/// Transport für Dashboard-Requests
///
/// `try_next()` darf nie blockieren. Das `Ticket` ordnet die Antwort
/// dem wartenden Client zu.
pub trait RequestPort<const N: usize> {
    type Ticket;

    fn try_next(&mut self) -> Option<(Self::Ticket, Request)>;

    fn reply(&mut self, ticket: Self::Ticket, response: Response<N>);
}

/// Monotone Zeitquelle in Millisekunden
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Empfänger für Task-Ergebnisse (Logging, Tests)
pub trait Observer {
    fn on_event(&mut self, event: &TaskEvent);
}
