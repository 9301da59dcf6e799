//! Core Types für den Kurs-Ticker
//!
//! Datenstrukturen ohne Hardware-Dependencies

use core::fmt;

use heapless::String;
use serde::Serialize;

/// Maximale Länge eines Handelspaar-Symbols (z.B. "BTCUSDT")
pub const SYMBOL_MAX_LEN: usize = 16;

/// Handelspaar das der Ticker verfolgt
///
/// Invariante: nicht leer, nur ASCII-Buchstaben und Ziffern, immer
/// in Großbuchstaben gespeichert. Damit kann das Symbol ohne Escaping
/// direkt in die Request-URL eingesetzt werden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Symbol(String<SYMBOL_MAX_LEN>);

/// Fehler beim Validieren eines Symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SymbolError {
    Empty,
    TooLong,
    InvalidChar,
}

impl SymbolError {
    /// Client-lesbare Fehlermeldung (landet im Dashboard)
    pub fn message(self) -> &'static str {
        match self {
            SymbolError::Empty => "symbol must not be empty",
            SymbolError::TooLong => "symbol is too long",
            SymbolError::InvalidChar => "symbol must be alphanumeric",
        }
    }
}

impl Symbol {
    /// Validiert und normalisiert ein Symbol
    ///
    /// ```
    /// # use ticker_core::Symbol;
    /// let symbol = Symbol::parse(" ethusdt ").unwrap();
    /// assert_eq!(symbol.as_str(), "ETHUSDT");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, SymbolError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(SymbolError::Empty);
        }
        if raw.len() > SYMBOL_MAX_LEN {
            return Err(SymbolError::TooLong);
        }

        let mut symbol = String::new();
        for c in raw.chars() {
            if !c.is_ascii_alphanumeric() {
                return Err(SymbolError::InvalidChar);
            }
            symbol
                .push(c.to_ascii_uppercase())
                .map_err(|_| SymbolError::TooLong)?;
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kursrichtung seit dem letzten Abruf (für LED und Pfeil-Glyph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Up,
    Down,
    Flat,
}

/// Indikator-Glyph auf dem Display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Glyph {
    ArrowUp,
    ArrowDown,
    Level,
}

impl From<Direction> for Glyph {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Glyph::ArrowUp,
            Direction::Down => Glyph::ArrowDown,
            Direction::Flat => Glyph::Level,
        }
    }
}

/// Logische LED-Kanäle
///
/// Auf dem ESP32-C6 DevKit werden alle Kanäle auf die eine
/// RGB-LED abgebildet (siehe `led::RgbIndicator`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedChannel {
    Up,
    Down,
    Alert,
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Symbol {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=str}", self.as_str())
    }
}
