//! LED-Kanäle auf einer einzelnen RGB-LED

use crate::logic::indicator_color;
use crate::traits::{LedError, SmartLedWriter, StatusLed};
use crate::types::LedChannel;

/// Adapter: `StatusLed`-Kanäle → eine SmartLED
///
/// Merkt sich den Zustand aller Kanäle und schreibt bei jeder Änderung
/// die kombinierte Farbe (siehe `indicator_color`).
pub struct RgbIndicator<W: SmartLedWriter> {
    writer: W,
    brightness: u8,
    up: bool,
    down: bool,
    alert: bool,
}

impl<W: SmartLedWriter> RgbIndicator<W> {
    pub fn new(writer: W, brightness: u8) -> Self {
        Self {
            writer,
            brightness,
            up: false,
            down: false,
            alert: false,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}

impl<W: SmartLedWriter> StatusLed for RgbIndicator<W> {
    fn set(&mut self, channel: LedChannel, on: bool) -> Result<(), LedError> {
        match channel {
            LedChannel::Up => self.up = on,
            LedChannel::Down => self.down = on,
            LedChannel::Alert => self.alert = on,
        }
        self.writer
            .write(indicator_color(self.up, self.down, self.alert, self.brightness))
    }
}
