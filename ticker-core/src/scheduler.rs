//! Kooperativer Scheduler des Tickers
//!
//! Ein einziger Task, keine Parallelität. Jeder Durchlauf (`tick`)
//! prüft in fester Reihenfolge:
//!
//! 1. WLAN-Verbindung (bei Bedarf begrenzter Reconnect)
//! 2. höchstens einen Dashboard-Request
//! 3. Kurs-Abruf (nur online)
//! 4. Display-Rotation
//! 5. Alarm-Blinken
//!
//! Ein periodischer Task läuft, sobald seit seinem letzten Lauf
//! mindestens sein Intervall vergangen ist. Fehler eines Tasks werden
//! an den `Observer` gemeldet und beenden die Schleife nie.

use embedded_hal_async::delay::DelayNs;

use crate::alert::AlertFlasher;
use crate::config::{ConfigError, TickerConfig};
use crate::display::{DisplayPresenter, Screen};
use crate::fetcher::{FetchOutcome, PriceFetcher};
use crate::request::{self, Response};
use crate::telemetry::{PriceUpdate, TelemetryState};
use crate::traits::{
    Clock, Connectivity, DisplayError, HttpClient, LedError, Observer, RequestPort, StatusLed,
    TextDisplay,
};
use crate::types::{Direction, LedChannel};

/// Task-Deskriptor: Intervall und Zeitpunkt des letzten Laufs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTask {
    interval_ms: u64,
    last_run_ms: Option<u64>,
}

impl PeriodicTask {
    /// Neuer Task, beim ersten Check sofort fällig
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_run_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn last_run_ms(&self) -> Option<u64> {
        self.last_run_ms
    }

    /// Fällig wenn `now - last_run >= interval` (Grenze inklusive)
    pub fn is_due(&self, now_ms: u64) -> bool {
        match self.last_run_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        }
    }

    pub fn mark_run(&mut self, now_ms: u64) {
        self.last_run_ms = Some(now_ms);
    }

    /// Macht den Task beim nächsten Check fällig
    pub fn expedite(&mut self) {
        self.last_run_ms = None;
    }
}

/// Ergebnis der Reconnect-Prozedur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReconnectOutcome {
    Connected { polls: u8 },
    GaveUp { polls: u8 },
    StartFailed,
}

/// Meldungen an den Observer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskEvent {
    Reconnect(ReconnectOutcome),
    Request { status: u16 },
    SymbolChanged,
    Fetch(FetchOutcome),
    Alert { percent_change: f32, direction: Direction },
    Display(Result<Screen, DisplayError>),
    LedFailed(LedError),
}

/// Was in einem Durchlauf gelaufen ist
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub reconnect: Option<ReconnectOutcome>,
    /// HTTP-Status des beantworteten Requests
    pub request: Option<u16>,
    pub fetch: Option<FetchOutcome>,
    pub display: Option<Result<Screen, DisplayError>>,
    /// Neuer Zustand der Alarm-LED
    pub alert_led: Option<bool>,
}

/// Alle externen Fähigkeiten die der Scheduler benutzt
pub struct Capabilities<W, H, D, L, R, O, Y> {
    pub network: W,
    pub http: H,
    pub display: D,
    pub led: L,
    pub requests: R,
    pub observer: O,
    pub delay: Y,
}

pub struct Coordinator<const N: usize> {
    config: TickerConfig,
    state: TelemetryState<N>,
    reconnect_task: PeriodicTask,
    fetch_task: PeriodicTask,
    display_task: PeriodicTask,
    blink_task: PeriodicTask,
    fetcher: PriceFetcher,
    presenter: DisplayPresenter,
    flasher: AlertFlasher,
}

impl<const N: usize> Coordinator<N> {
    /// Validiert die Konfiguration und legt alle Tasks an
    pub fn new(config: TickerConfig) -> Result<Self, ConfigError> {
        let symbol = config.validate()?;

        Ok(Self {
            state: TelemetryState::new(symbol),
            reconnect_task: PeriodicTask::new(config.reconnect_interval_ms()),
            fetch_task: PeriodicTask::new(config.fetch_interval_ms()),
            display_task: PeriodicTask::new(config.display_interval_ms()),
            blink_task: PeriodicTask::new(u64::from(config.alert_flash_ms)),
            fetcher: PriceFetcher::new(&config),
            presenter: DisplayPresenter::new(config.display_cols, config.display_rows),
            flasher: AlertFlasher::new(),
            config,
        })
    }

    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    pub fn state(&self) -> &TelemetryState<N> {
        &self.state
    }

    pub fn fetch_task(&self) -> &PeriodicTask {
        &self.fetch_task
    }

    pub fn display_task(&self) -> &PeriodicTask {
        &self.display_task
    }

    /// Ein Scheduler-Durchlauf zum Zeitpunkt `now_ms`
    pub async fn tick<W, H, D, L, R, O, Y>(
        &mut self,
        now_ms: u64,
        caps: &mut Capabilities<W, H, D, L, R, O, Y>,
    ) -> TickReport
    where
        W: Connectivity,
        H: HttpClient,
        D: TextDisplay,
        L: StatusLed,
        R: RequestPort<N>,
        O: Observer,
        Y: DelayNs,
    {
        let mut report = TickReport::default();

        // 1. Verbindung: einziger (begrenzt) blockierender Abschnitt
        let mut online = caps.network.is_connected();
        if !online && self.reconnect_task.is_due(now_ms) {
            let outcome = reconnect(
                &mut caps.network,
                &mut caps.delay,
                self.config.reconnect_attempts,
                self.config.reconnect_poll_ms,
            )
            .await;
            self.reconnect_task.mark_run(now_ms);
            caps.observer.on_event(&TaskEvent::Reconnect(outcome));
            online = matches!(outcome, ReconnectOutcome::Connected { .. });
            report.reconnect = Some(outcome);
        }

        // 2. Höchstens ein Request pro Durchlauf
        if let Some((ticket, request)) = caps.requests.try_next() {
            let response = request::handle(&mut self.state, &request);
            let status = response.status_code();
            if let Response::SymbolChanged(_) = &response {
                self.on_symbol_changed(caps);
            }
            caps.observer.on_event(&TaskEvent::Request { status });
            caps.requests.reply(ticket, response);
            report.request = Some(status);
        }

        // 3. Kurs-Abruf; offline bleibt der Task fällig
        if online && self.fetch_task.is_due(now_ms) {
            let outcome = self.fetcher.fetch(&mut self.state, &mut caps.http).await;
            self.fetch_task.mark_run(now_ms);
            caps.observer.on_event(&TaskEvent::Fetch(outcome));
            if let FetchOutcome::Updated(update) = &outcome {
                self.apply_indicators(update, caps);
            }
            report.fetch = Some(outcome);
        }

        // 4. Display
        if self.display_task.is_due(now_ms) {
            let result = self.presenter.advance(&self.state, &mut caps.display);
            self.display_task.mark_run(now_ms);
            caps.observer.on_event(&TaskEvent::Display(result));
            report.display = Some(result);
        }

        // 5. Alarm-LED
        if self.blink_task.is_due(now_ms) {
            self.blink_task.mark_run(now_ms);
            if let Some(lit) = self.flasher.step() {
                if let Err(error) = caps.led.set(LedChannel::Alert, lit) {
                    caps.observer.on_event(&TaskEvent::LedFailed(error));
                }
                report.alert_led = Some(lit);
            }
        }

        report
    }

    /// Endlosschleife: Tick, dann Kontrolle an die Plattform abgeben
    pub async fn run<C, W, H, D, L, R, O, Y>(
        &mut self,
        clock: &C,
        caps: &mut Capabilities<W, H, D, L, R, O, Y>,
    ) -> !
    where
        C: Clock,
        W: Connectivity,
        H: HttpClient,
        D: TextDisplay,
        L: StatusLed,
        R: RequestPort<N>,
        O: Observer,
        Y: DelayNs,
    {
        loop {
            self.tick(clock.now_ms(), caps).await;
            caps.delay.delay_ms(self.config.tick_ms).await;
        }
    }

    /// Richtungs-LEDs setzen und bei Alarm das Blinken starten
    fn apply_indicators<W, H, D, L, R, O, Y>(
        &mut self,
        update: &PriceUpdate,
        caps: &mut Capabilities<W, H, D, L, R, O, Y>,
    ) where
        L: StatusLed,
        O: Observer,
    {
        let up = update.direction == Direction::Up;
        let down = update.direction == Direction::Down;
        let result = caps
            .led
            .set(LedChannel::Up, up)
            .and_then(|_| caps.led.set(LedChannel::Down, down));
        if let Err(error) = result {
            caps.observer.on_event(&TaskEvent::LedFailed(error));
        }

        if update.alert {
            self.flasher.trigger(self.config.alert_flashes);
            caps.observer.on_event(&TaskEvent::Alert {
                percent_change: update.percent_change,
                direction: update.direction,
            });
        }
    }

    /// Nach einem Symbolwechsel: Anzeigen zurücksetzen, sofort abrufen
    fn on_symbol_changed<W, H, D, L, R, O, Y>(&mut self, caps: &mut Capabilities<W, H, D, L, R, O, Y>)
    where
        L: StatusLed,
        O: Observer,
    {
        self.fetch_task.expedite();
        self.flasher.cancel();

        let result = caps
            .led
            .set(LedChannel::Alert, false)
            .and_then(|_| caps.led.set(LedChannel::Up, false))
            .and_then(|_| caps.led.set(LedChannel::Down, false));
        if let Err(error) = result {
            caps.observer.on_event(&TaskEvent::LedFailed(error));
        }
        caps.observer.on_event(&TaskEvent::SymbolChanged);
    }
}

/// Begrenzter Reconnect
///
/// Stößt die Verbindung an und pollt höchstens `attempts` mal im
/// Abstand von `poll_ms`. Gesamt-Wartezeit ist damit durch
/// `attempts * poll_ms` begrenzt.
pub async fn reconnect<W: Connectivity, Y: DelayNs>(
    network: &mut W,
    delay: &mut Y,
    attempts: u8,
    poll_ms: u32,
) -> ReconnectOutcome {
    if network.begin().is_err() {
        return ReconnectOutcome::StartFailed;
    }

    for poll in 1..=attempts {
        delay.delay_ms(poll_ms).await;
        if network.is_connected() {
            return ReconnectOutcome::Connected { polls: poll };
        }
    }
    ReconnectOutcome::GaveUp { polls: attempts }
}
