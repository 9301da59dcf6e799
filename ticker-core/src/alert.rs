//! Alarm-Policy und Richtungs-Klassifikation

use crate::types::Direction;

/// Entscheidet ob eine Kursbewegung einen Alarm auslöst
///
/// Beim Kaltstart (`previous_price == 0`) nie. Sonst strikt
/// `|percent_change| > threshold`, ein Wert genau auf der Schwelle
/// löst also nicht aus.
pub fn should_alert(percent_change: f32, threshold: f32, previous_price: f32) -> bool {
    if previous_price == 0.0 {
        return false;
    }
    percent_change.abs() > threshold
}

impl Direction {
    /// Richtung aus dem Vorzeichen der Änderung (unabhängig vom Alarm)
    pub fn from_change(percent_change: f32) -> Self {
        if percent_change > 0.0 {
            Direction::Up
        } else if percent_change < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        }
    }
}

/// Nicht-blockierendes Blinken der Alarm-LED
///
/// Pro Aufruf von `step()` wird die LED einmal umgeschaltet. Eine
/// Sequenz endet immer mit ausgeschalteter LED.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AlertFlasher {
    remaining_toggles: u16,
    lit: bool,
}

impl AlertFlasher {
    pub const fn new() -> Self {
        Self {
            remaining_toggles: 0,
            lit: false,
        }
    }

    /// Startet (oder verlängert) eine Sequenz mit `flashes` an/aus-Zyklen
    pub fn trigger(&mut self, flashes: u8) {
        let toggles = u16::from(flashes) * 2;
        // Läuft gerade ein "an"-Zustand, braucht es einen Schritt mehr bis "aus"
        self.remaining_toggles = if self.lit { toggles + 1 } else { toggles };
    }

    /// Bricht die Sequenz ab; liefert `true` wenn die LED noch an war
    pub fn cancel(&mut self) -> bool {
        let was_lit = self.lit;
        self.remaining_toggles = 0;
        self.lit = false;
        was_lit
    }

    pub fn is_active(&self) -> bool {
        self.remaining_toggles > 0
    }

    /// Nächster LED-Zustand oder `None` wenn keine Sequenz läuft
    pub fn step(&mut self) -> Option<bool> {
        if self.remaining_toggles == 0 {
            return None;
        }
        self.remaining_toggles -= 1;
        self.lit = !self.lit;
        Some(self.lit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_alert_on_cold_start() {
        assert!(!should_alert(50.0, 2.0, 0.0));
        assert!(!should_alert(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_alert_threshold_is_strict() {
        assert!(!should_alert(2.0, 2.0, 100.0));
        assert!(!should_alert(-2.0, 2.0, 100.0));
        assert!(should_alert(2.0 + 1e-4, 2.0, 100.0));
        assert!(should_alert(-2.0 - 1e-4, 2.0, 100.0));
    }

    #[test]
    fn test_direction_from_change() {
        assert_eq!(Direction::from_change(1.5), Direction::Up);
        assert_eq!(Direction::from_change(-0.01), Direction::Down);
        assert_eq!(Direction::from_change(0.0), Direction::Flat);
    }

    #[test]
    fn test_flasher_sequence_ends_off() {
        let mut flasher = AlertFlasher::new();
        flasher.trigger(3);

        let mut toggles = 0;
        let mut last = true;
        while let Some(lit) = flasher.step() {
            toggles += 1;
            last = lit;
        }
        assert_eq!(toggles, 6);
        assert!(!last);
        assert!(!flasher.is_active());
    }

    #[test]
    fn test_flasher_retrigger_while_lit_ends_off() {
        let mut flasher = AlertFlasher::new();
        flasher.trigger(2);
        assert_eq!(flasher.step(), Some(true));

        flasher.trigger(1);
        let mut last = true;
        while let Some(lit) = flasher.step() {
            last = lit;
        }
        assert!(!last);
    }

    #[test]
    fn test_flasher_cancel() {
        let mut flasher = AlertFlasher::new();
        flasher.trigger(5);
        flasher.step();
        assert!(flasher.cancel());
        assert_eq!(flasher.step(), None);
    }
}
