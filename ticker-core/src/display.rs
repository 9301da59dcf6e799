//! Display-Presenter: rotiert durch feste Screens
//!
//! Liest ausschließlich den Telemetrie-Zustand, schreibt ihn nie.
//! Zu breiter Text wird abgeschnitten oder nach links verschoben,
//! Rendering schlägt daran nie fehl.

use core::fmt::Write;

use heapless::String;

use crate::telemetry::TelemetryState;
use crate::traits::{DisplayError, TextDisplay};
use crate::types::Glyph;

/// Puffer für eine Display-Zeile (größer als jedes unterstützte Display)
const LINE_CAPACITY: usize = 40;

/// Indikator-Slot für den Richtungspfeil
pub const DIRECTION_SLOT: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Symbol + Pfeil, aktueller Kurs
    Price,
    /// Änderung seit letztem Abruf, 24h-Änderung
    Change,
    /// Tief/Hoch aus dem Verlauf
    Range,
}

/// Reihenfolge der Rotation
pub const SCREENS: [Screen; 3] = [Screen::Price, Screen::Change, Screen::Range];

pub struct DisplayPresenter {
    cols: u8,
    rows: u8,
    next: usize,
}

impl DisplayPresenter {
    pub fn new(cols: u8, rows: u8) -> Self {
        Self { cols, rows, next: 0 }
    }

    /// Screen der beim nächsten Tick gezeigt wird
    pub fn upcoming(&self) -> Screen {
        SCREENS[self.next]
    }

    /// Wechselt zum nächsten Screen und rendert ihn
    pub fn advance<D: TextDisplay, const N: usize>(
        &mut self,
        state: &TelemetryState<N>,
        display: &mut D,
    ) -> Result<Screen, DisplayError> {
        let screen = SCREENS[self.next];
        self.next = (self.next + 1) % SCREENS.len();
        self.render(screen, state, display)?;
        Ok(screen)
    }

    /// Rendert einen Screen (idempotent)
    pub fn render<D: TextDisplay, const N: usize>(
        &self,
        screen: Screen,
        state: &TelemetryState<N>,
        display: &mut D,
    ) -> Result<(), DisplayError> {
        display.clear()?;

        let mut top: String<LINE_CAPACITY> = String::new();
        let mut bottom: String<LINE_CAPACITY> = String::new();

        if !state.has_quote() {
            // Kein Kurs für dieses Symbol: Warte-Anzeige auf allen Screens
            let _ = top.push_str(state.symbol().as_str());
            let _ = bottom.push_str("--");
            self.put(display, 0, 0, &top)?;
            return self.put(display, 1, 0, &bottom);
        }

        match screen {
            Screen::Price => {
                let _ = top.push_str(state.symbol().as_str());
                format_price(&mut bottom, state.latest_price());

                // Letzte Spalte bleibt für den Pfeil frei
                self.put_clipped(display, 0, &top, self.cols.saturating_sub(2))?;
                self.put(display, 1, 0, &bottom)?;
                display.set_indicator(DIRECTION_SLOT, Glyph::from(state.direction()))?;
            }
            Screen::Change => {
                let _ = write!(top, "chg {:+.2}%", state.percent_change());
                match state.secondary_change() {
                    Some(change) => {
                        let _ = write!(bottom, "24h {:+.2}%", change);
                    }
                    None => {
                        let _ = bottom.push_str("24h n/a");
                    }
                }
                self.put(display, 0, 0, &top)?;
                self.put(display, 1, 0, &bottom)?;
            }
            Screen::Range => {
                match state.history().min_max() {
                    Some((lo, hi)) => {
                        let _ = top.push_str("lo ");
                        format_price(&mut top, lo);
                        let _ = bottom.push_str("hi ");
                        format_price(&mut bottom, hi);
                    }
                    None => {
                        let _ = top.push_str("no data");
                    }
                }
                self.put(display, 0, 0, &top)?;
                self.put(display, 1, 0, &bottom)?;
            }
        }
        Ok(())
    }

    fn put<D: TextDisplay>(
        &self,
        display: &mut D,
        row: u8,
        col: u8,
        text: &str,
    ) -> Result<(), DisplayError> {
        if row >= self.rows || text.is_empty() {
            return Ok(());
        }
        let (col, text) = fit(col, text, self.cols);
        display.write_at(row, col, text)
    }

    fn put_clipped<D: TextDisplay>(
        &self,
        display: &mut D,
        row: u8,
        text: &str,
        width: u8,
    ) -> Result<(), DisplayError> {
        let (_, clipped) = fit(0, text, width);
        self.put(display, row, 0, clipped)
    }
}

/// Passt Text in `width` Spalten ein
///
/// Zu langer Text wird abgeschnitten, Text der ab `col` überlaufen
/// würde wird nach links verschoben.
pub fn fit(col: u8, text: &str, width: u8) -> (u8, &str) {
    let width = usize::from(width);
    let chars = text.chars().count();

    if chars >= width {
        let end = text
            .char_indices()
            .nth(width)
            .map_or(text.len(), |(index, _)| index);
        return (0, &text[..end]);
    }

    let col = usize::from(col).min(width - chars);
    (col as u8, text)
}

/// Formatiert einen Preis mit passender Genauigkeit
fn format_price<const C: usize>(out: &mut String<C>, price: f32) {
    let _ = if price >= 1_000.0 {
        write!(out, "{:.2}", price)
    } else if price >= 1.0 {
        write!(out, "{:.4}", price)
    } else {
        write!(out, "{:.6}", price)
    };
}
