//! Gemeinsamer Telemetrie-Zustand
//!
//! Eine Instanz pro Prozess, gehört dem Scheduler. Geschrieben nur vom
//! Fetch-Task (`commit`) und vom Request-Handler (`switch_symbol`),
//! gelesen von Display und Dashboard.

use heapless::Vec;
use serde::Serialize;

use crate::alert::should_alert;
use crate::decode::Quote;
use crate::history::PriceHistory;
use crate::logic::percent_change;
use crate::types::{Direction, Symbol};

/// Ergebnis eines erfolgreichen Abrufs (für Observer und LEDs)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PriceUpdate {
    pub price: f32,
    pub previous_price: f32,
    pub percent_change: f32,
    pub secondary_change: Option<f32>,
    pub direction: Direction,
    pub alert: bool,
}

/// Momentaufnahme für das Dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<const N: usize> {
    pub symbol: Symbol,
    pub latest_price: f32,
    pub previous_price: f32,
    pub percent_change: f32,
    pub secondary_change: Option<f32>,
    pub direction: Direction,
    pub fetch_count: u32,
    /// Kursverlauf, ältester Wert zuerst
    pub history: Vec<f32, N>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryState<const N: usize> {
    symbol: Symbol,
    latest_price: f32,
    previous_price: f32,
    percent_change: f32,
    secondary_change: Option<f32>,
    history: PriceHistory<N>,
    fetch_count: u32,
}

impl<const N: usize> TelemetryState<N> {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            latest_price: 0.0,
            previous_price: 0.0,
            percent_change: 0.0,
            secondary_change: None,
            history: PriceHistory::new(),
            fetch_count: 0,
        }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn latest_price(&self) -> f32 {
        self.latest_price
    }

    pub fn previous_price(&self) -> f32 {
        self.previous_price
    }

    pub fn percent_change(&self) -> f32 {
        self.percent_change
    }

    pub fn secondary_change(&self) -> Option<f32> {
        self.secondary_change
    }

    pub fn history(&self) -> &PriceHistory<N> {
        &self.history
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetch_count
    }

    pub fn direction(&self) -> Direction {
        Direction::from_change(self.percent_change)
    }

    /// `true` sobald für das aktuelle Symbol ein Kurs vorliegt
    pub fn has_quote(&self) -> bool {
        !self.history.is_empty()
    }

    /// Übernimmt einen neuen Kurs
    ///
    /// Alle Werte werden zuerst berechnet und dann gemeinsam geschrieben.
    /// Referenz für die Änderung ist der bisher letzte Kurs; danach gilt
    /// `previous_price` = Referenz und `latest_price` = neuer Kurs.
    pub fn commit(&mut self, quote: &Quote, alert_threshold: f32) -> PriceUpdate {
        let reference = self.latest_price;
        let change = percent_change(quote.price, reference);
        let update = PriceUpdate {
            price: quote.price,
            previous_price: reference,
            percent_change: change,
            secondary_change: quote.change_24h,
            direction: Direction::from_change(change),
            alert: should_alert(change, alert_threshold, reference),
        };

        self.history.push(quote.price);
        self.previous_price = reference;
        self.latest_price = quote.price;
        self.percent_change = change;
        self.secondary_change = quote.change_24h;
        self.fetch_count = self.fetch_count.wrapping_add(1);

        update
    }

    /// Wechselt das Symbol und erzwingt Kaltstart-Semantik
    ///
    /// Der nächste Abruf rechnet keine Änderung gegen den Kurs eines
    /// anderen Instruments. Der Verlauf wird ebenfalls geleert.
    pub fn switch_symbol(&mut self, symbol: Symbol) {
        self.symbol = symbol;
        self.latest_price = 0.0;
        self.previous_price = 0.0;
        self.percent_change = 0.0;
        self.secondary_change = None;
        self.history.clear();
    }

    pub fn snapshot(&self) -> Snapshot<N> {
        let mut history = Vec::new();
        for value in self.history.iter() {
            // len() <= N, kann nicht überlaufen
            let _ = history.push(value);
        }

        Snapshot {
            symbol: self.symbol.clone(),
            latest_price: self.latest_price,
            previous_price: self.previous_price,
            percent_change: self.percent_change,
            secondary_change: self.secondary_change,
            direction: self.direction(),
            fetch_count: self.fetch_count,
            history,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> TelemetryState<8> {
        TelemetryState::new(Symbol::parse("BTCUSDT").unwrap())
    }

    fn quote(price: f32) -> Quote {
        Quote {
            price,
            change_24h: None,
        }
    }

    #[test]
    fn test_first_commit_is_cold_start() {
        let mut state = state();
        let update = state.commit(&quote(27_000.0), 0.5);

        assert_eq!(update.percent_change, 0.0);
        assert!(!update.alert);
        assert_eq!(state.previous_price(), 0.0);
        assert_eq!(state.latest_price(), 27_000.0);
        assert_eq!(state.history().latest(), Some(27_000.0));
    }

    #[test]
    fn test_second_commit_uses_previous_reading() {
        let mut state = state();
        state.commit(&quote(100.0), 2.0);
        let update = state.commit(&quote(103.0), 2.0);

        assert_eq!(update.percent_change, 3.0);
        assert!(update.alert);
        assert_eq!(update.direction, Direction::Up);
        assert_eq!(state.previous_price(), 100.0);
        assert_eq!(state.latest_price(), 103.0);
        assert_eq!(state.fetch_count(), 2);
    }

    #[test]
    fn test_switch_symbol_forces_cold_start() {
        let mut state = state();
        state.commit(&quote(100.0), 2.0);
        state.commit(&quote(110.0), 2.0);

        state.switch_symbol(Symbol::parse("ETHUSDT").unwrap());
        assert_eq!(state.previous_price(), 0.0);
        assert!(!state.has_quote());

        let update = state.commit(&quote(1_600.0), 2.0);
        assert_eq!(update.percent_change, 0.0);
        assert!(!update.alert);
    }

    #[test]
    fn test_snapshot_is_stable_between_commits() {
        let mut state = state();
        state.commit(&quote(1.0), 2.0);
        state.commit(&quote(2.0), 2.0);

        let first = state.snapshot();
        let second = state.snapshot();
        assert_eq!(first, second);
        assert_eq!(first.history.as_slice(), &[1.0, 2.0]);
    }
}
