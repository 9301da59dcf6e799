//! Pure Business Logic Functions
//!
//! Funktionen ohne Hardware-Dependencies (testbar!)

use rgb::RGB8;

/// Prozentuale Änderung von `previous` zu `latest`
///
/// Bei `previous == 0` (Kaltstart) ist das Ergebnis `0`: keine Division
/// durch Null und kein falscher Alarm beim ersten Messwert.
///
/// # Beispiele
///
/// ```
/// # use ticker_core::percent_change;
/// assert_eq!(percent_change(103.0, 100.0), 3.0);
/// assert_eq!(percent_change(42.0, 0.0), 0.0);
/// ```
pub fn percent_change(latest: f32, previous: f32) -> f32 {
    if previous == 0.0 {
        return 0.0;
    }
    (latest - previous) * 100.0 / previous
}

/// Bildet die LED-Kanäle auf die eine RGB-LED ab
///
/// Alarm (Blau) hat Vorrang vor Richtung: Grün = hoch, Rot = runter.
pub fn indicator_color(up: bool, down: bool, alert: bool, brightness: u8) -> RGB8 {
    match (alert, up, down) {
        (true, _, _) => RGB8 {
            r: 0,
            g: 0,
            b: brightness,
        },
        (false, true, _) => RGB8 {
            r: 0,
            g: brightness,
            b: 0,
        },
        (false, false, true) => RGB8 {
            r: brightness,
            g: 0,
            b: 0,
        },
        (false, false, false) => RGB8::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_percent_change_cold_start_is_zero() {
        assert_eq!(percent_change(27_000.0, 0.0), 0.0);
    }

    #[test]
    fn test_percent_change_divides_by_previous() {
        assert!(approx(percent_change(103.0, 100.0), 3.0));
        assert!(approx(percent_change(101.5, 100.0), 1.5));
        assert!(approx(percent_change(90.0, 100.0), -10.0));
        // Division durch den aktuellen Preis wäre hier 50.0
        assert!(approx(percent_change(200.0, 100.0), 100.0));
    }

    #[test]
    fn test_indicator_color_up_is_green() {
        assert_eq!(
            indicator_color(true, false, false, 10),
            RGB8 { r: 0, g: 10, b: 0 }
        );
    }

    #[test]
    fn test_indicator_color_down_is_red() {
        assert_eq!(
            indicator_color(false, true, false, 10),
            RGB8 { r: 10, g: 0, b: 0 }
        );
    }

    #[test]
    fn test_indicator_color_alert_wins() {
        assert_eq!(
            indicator_color(true, false, true, 10),
            RGB8 { r: 0, g: 0, b: 10 }
        );
    }

    #[test]
    fn test_indicator_color_all_off() {
        assert_eq!(indicator_color(false, false, false, 10), RGB8::default());
    }
}
